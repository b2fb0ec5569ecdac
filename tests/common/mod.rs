// Shared test fixtures for integration tests
// Functions here are used across different test files
#![allow(dead_code)]

use git2::{Repository, Signature, Time};
use locscope::model::LineEdit;
use locscope::repository::Database;
use std::path::PathBuf;
use tempfile::TempDir;
use time::macros::datetime;

/// 2024-03-04 02:00 UTC
pub const MONDAY_NIGHT: i64 = 1_709_517_600;
/// 2024-03-05 14:30 UTC
pub const TUESDAY_AFTERNOON: i64 = 1_709_649_000;
/// 2024-03-06 23:00 UTC
pub const WEDNESDAY_EVENING: i64 = 1_709_766_000;

/// Create an in-memory test database
pub async fn create_test_db() -> Database {
    Database::new(":memory:").await.unwrap()
}

/// Create an in-memory database with the schema in place
pub async fn setup_db() -> Database {
    let db = create_test_db().await;
    db.init_schema().await.unwrap();
    db
}

/// Create a temporary git repository
pub fn create_test_repo() -> (TempDir, PathBuf, Repository) {
    let dir = TempDir::new().unwrap();
    let repo_path = dir.path().to_path_buf();
    let repo = Repository::init(&repo_path).unwrap();

    // Configure git user for commits
    let mut config = repo.config().unwrap();
    config.set_str("user.name", "Test User").unwrap();
    config.set_str("user.email", "test@example.com").unwrap();

    (dir, repo_path, repo)
}

/// Write files, stage them and commit at a fixed time so blame results are stable
pub fn add_commit_at(
    repo: &Repository,
    files: &[(&str, &[u8])],
    message: &str,
    author: &str,
    seconds: i64,
    offset_minutes: i32,
) -> git2::Oid {
    let sig = Signature::new(author, "test@example.com", &Time::new(seconds, offset_minutes)).unwrap();

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
    let parents: Vec<&git2::Commit> = parent.iter().collect();

    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents).unwrap()
}

/// Commit as "Test User" at UTC
pub fn add_commit(repo: &Repository, files: &[(&str, &[u8])], message: &str, seconds: i64) -> git2::Oid {
    add_commit_at(repo, files, message, "Test User", seconds, 0)
}

/// Build the three-commit history used across tests:
/// a 5-line js commit at 02:00, a 10-line css commit at 14:30, a 1-line html commit at 23:00
pub fn create_three_commit_repo() -> (TempDir, PathBuf, Repository, [git2::Oid; 3]) {
    let (dir, path, repo) = create_test_repo();
    let js = numbered_lines("let x", 5);
    let css = numbered_lines(".c", 10);
    let a = add_commit(&repo, &[("app.js", js.as_bytes())], "js", MONDAY_NIGHT);
    let b = add_commit(&repo, &[("style.css", css.as_bytes())], "css", TUESDAY_AFTERNOON);
    let c = add_commit(&repo, &[("index.html", b"<p>hi</p>\n")], "html", WEDNESDAY_EVENING);
    (dir, path, repo, [a, b, c])
}

/// `count` distinct lines, each ending in a newline
pub fn numbered_lines(prefix: &str, count: usize) -> String {
    (0..count).map(|i| format!("{}{}\n", prefix, i)).collect()
}

/// Synthetic edits without a repository
pub fn sample_edits() -> Vec<LineEdit> {
    vec![
        LineEdit::new("a1", "app.js", 1, "js", "alice", datetime!(2024-03-04 2:00 UTC)).with_shape(0, 9),
        LineEdit::new("a1", "app.js", 2, "js", "alice", datetime!(2024-03-04 2:00 UTC)).with_shape(2, 11),
        LineEdit::new("b2", "style.css", 1, "css", "bob", datetime!(2024-03-05 14:30 +01:00)).with_shape(0, 4),
        LineEdit::new("c3", "index.html", 1, "html", "alice", datetime!(2024-03-06 23:00 -05:00)).with_shape(4, 12),
    ]
}
