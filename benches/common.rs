// Shared benchmark helpers
// Functions here are used across different benchmark files
#![allow(dead_code)]

use git2::{Repository, Signature, Time};
use locscope::model::LineEdit;
use locscope::repository::Database;
use std::path::PathBuf;
use tempfile::TempDir;
use time::{Duration, OffsetDateTime};

const LANGUAGES: [&str; 6] = ["rs", "js", "css", "html", "md", "toml"];

/// Generate `num_commits` commits of `lines_per_commit` edits each, an hour apart
pub fn generate_edits(num_commits: usize, lines_per_commit: usize) -> Vec<LineEdit> {
    let start = OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap();
    (0..num_commits)
        .flat_map(|c| {
            let at = start + Duration::minutes(c as i64 * 61);
            (0..lines_per_commit).map(move |l| {
                let kind = LANGUAGES[(c + l) % LANGUAGES.len()];
                LineEdit::new(
                    format!("{:040x}", c + 1),
                    format!("src/dir_{}/file_{}.{}", c % 20, l % 7, kind),
                    l as u32 + 1,
                    kind,
                    format!("author_{}", c % 5),
                    at,
                )
                .with_shape((l % 4) as u32 * 4, 40)
            })
        })
        .collect()
}

/// Create in-memory database for benchmarks
pub async fn setup_bench_db() -> Database {
    let db = Database::new(":memory:").await.unwrap();
    db.init_schema().await.unwrap();
    db
}

/// Create a temporary git repository for benchmarks
pub fn create_bench_repo() -> (TempDir, PathBuf, Repository) {
    let dir = TempDir::new().unwrap();
    let repo_path = dir.path().to_path_buf();
    let repo = Repository::init(&repo_path).unwrap();

    let mut config = repo.config().unwrap();
    config.set_str("user.name", "Bench User").unwrap();
    config.set_str("user.email", "bench@example.com").unwrap();

    (dir, repo_path, repo)
}

/// Add files and create a commit at a fixed time
pub fn add_commit(repo: &Repository, files: &[(&str, &[u8])], message: &str, seconds: i64) -> git2::Oid {
    let sig = Signature::new("Bench User", "bench@example.com", &Time::new(seconds, 0)).unwrap();
    let mut index = repo.index().unwrap();

    for (path, content) in files {
        let full_path = repo.workdir().unwrap().join(path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&full_path, content).unwrap();
        index.add_path(std::path::Path::new(path)).unwrap();
    }

    index.write().unwrap();
    let tree_id = index.write_tree().unwrap();
    let tree = repo.find_tree(tree_id).unwrap();

    let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());

    if let Some(parent) = parent {
        repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &[&parent]).unwrap()
    } else {
        repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &[]).unwrap()
    }
}

/// Source file with `lines` numbered lines
pub fn generate_source(file: usize, version: usize, lines: usize) -> Vec<u8> {
    (0..lines)
        .map(|l| format!("    let v{}_{} = {};\n", file, l, version))
        .collect::<String>()
        .into_bytes()
}
