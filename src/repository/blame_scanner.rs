//! Git blame ingestion
//!
//! Attributes every line of every text file in `HEAD` to the commit that
//! last touched it, producing one `LineEdit` per line.

use anyhow::{Context, Result};
use git2::{BlameOptions, ObjectType, Oid, Repository};
use rustc_hash::FxHashMap;
use std::path::{Path, PathBuf};
use std::time::Instant;
use time::{OffsetDateTime, UtcOffset};

use crate::model::LineEdit;
use crate::util::{indent_depth, language_tag};

use super::progress::{NoopProgress, ProgressReporter, VerboseProgress};
use super::store::EditStore;

/// Author shown for working-tree lines that are not committed yet
pub const UNCOMMITTED_AUTHOR: &str = "Not Committed Yet";

/// Repository scanner that blames `HEAD` into line edits
pub struct BlameScanner {
    repo_path: PathBuf,
    verbose: bool,
    profile: bool,
    uncommitted: bool,
}

impl BlameScanner {
    pub fn new(repo_path: impl Into<PathBuf>) -> Self {
        Self {
            repo_path: repo_path.into(),
            verbose: true,
            profile: false,
            uncommitted: false,
        }
    }

    /// Create a quiet scanner (no logging output, used by tests and benchmarks)
    pub fn quiet(repo_path: impl Into<PathBuf>) -> Self {
        Self {
            verbose: false,
            ..Self::new(repo_path)
        }
    }

    /// Create a profiling scanner (detailed timing output)
    pub fn profiling(repo_path: impl Into<PathBuf>) -> Self {
        Self {
            profile: true,
            ..Self::new(repo_path)
        }
    }

    /// Also blame working-tree changes; those lines get the all-zero commit id
    pub fn with_uncommitted(mut self, uncommitted: bool) -> Self {
        self.uncommitted = uncommitted;
        self
    }

    /// Blame the repository, reusing `store` when HEAD has not moved
    pub async fn scan(&self, store: &impl EditStore) -> Result<Vec<LineEdit>> {
        let total_start = Instant::now();
        let progress: Box<dyn ProgressReporter> = if self.profile {
            Box::new(NoopProgress)
        } else {
            Box::new(VerboseProgress::new(self.verbose))
        };

        // Phase 1: Open repository
        self.log(&format!("Opening repository at: {}", self.repo_path.display()));
        let phase_start = Instant::now();
        let repo = Repository::open(&self.repo_path).context("Failed to open git repository")?;
        let head = repo
            .head()
            .and_then(|h| h.peel_to_commit())
            .context("Failed to get HEAD commit")?;
        let head_hex = head.id().to_string();
        self.profile_phase("Open repo + get HEAD", phase_start);

        // Phase 2: Check cache; working-tree scans are never cached
        if !self.uncommitted && store.get_head_oid().await.as_deref() == Some(head_hex.as_str()) {
            self.log(&format!(
                "Index is up to date (HEAD: {}), loading from cache...",
                &head_hex[..8]
            ));
            let phase_start = Instant::now();
            let edits = store.load_edits().await?;
            self.profile_phase(&format!("Load {} cached edits", edits.len()), phase_start);
            return Ok(edits);
        }

        // Phase 3: List text files in HEAD
        self.log("Scanning current HEAD for files...");
        let phase_start = Instant::now();
        let files = self.list_files(&repo, &head.tree()?)?;
        self.profile_phase(&format!("Scan HEAD tree ({} files)", files.len()), phase_start);

        // Phase 4: Blame
        let phase_start = Instant::now();
        let edits = self.blame_files(&repo, head.id(), &files, progress.as_ref())?;
        self.profile_phase(
            &format!("Blame {} files ({} lines)", files.len(), edits.len()),
            phase_start,
        );

        // Phase 5: Persist
        if !self.uncommitted {
            let phase_start = Instant::now();
            store.replace_edits(&edits, progress.as_ref()).await?;
            store.set_head_oid(&head_hex).await?;
            self.profile_phase("Save edits", phase_start);
        }

        if self.profile {
            eprintln!("[PROFILE] TOTAL scanning time: {:?}", total_start.elapsed());
        }

        Ok(edits)
    }

    /// Paths of every blob in the tree, in tree order
    fn list_files(&self, repo: &Repository, tree: &git2::Tree<'_>) -> Result<Vec<(String, Oid)>> {
        let mut files = Vec::new();
        tree.walk(git2::TreeWalkMode::PreOrder, |dir, entry| {
            if entry.kind() == Some(ObjectType::Blob) {
                if let Some(name) = entry.name() {
                    files.push((format!("{}{}", dir, name), entry.id()));
                }
            }
            git2::TreeWalkResult::Ok
        })?;

        // Binary blobs have no lines worth attributing
        files.retain(|(_, oid)| repo.find_blob(*oid).map(|b| !b.is_binary()).unwrap_or(false));
        Ok(files)
    }

    fn blame_files(
        &self,
        repo: &Repository,
        head: Oid,
        files: &[(String, Oid)],
        progress: &dyn ProgressReporter,
    ) -> Result<Vec<LineEdit>> {
        let pb = progress.start("Blaming", files.len() as u64);
        let mut authors = AuthorCache::default();
        let mut edits = Vec::new();
        let now = OffsetDateTime::now_utc();

        for (path, blob_oid) in files {
            pb.set_message(path);
            pb.inc(1);

            let text = match self.file_text(repo, path, *blob_oid)? {
                Some(text) => text,
                None => continue,
            };

            let mut opts = BlameOptions::new();
            opts.newest_commit(head);
            let committed = repo
                .blame_file(Path::new(path), Some(&mut opts))
                .with_context(|| format!("Failed to blame {}", path))?;
            let working;
            let blame = if self.uncommitted {
                working = committed
                    .blame_buffer(text.as_bytes())
                    .with_context(|| format!("Failed to blame working copy of {}", path))?;
                &working
            } else {
                &committed
            };

            let kind = language_tag(path);
            for (idx, line) in text.lines().enumerate() {
                let line_no = idx + 1;
                let Some(hunk) = blame.get_line(line_no) else {
                    continue;
                };
                let commit_oid = hunk.final_commit_id();
                let (author, datetime) = if commit_oid.is_zero() {
                    (UNCOMMITTED_AUTHOR.to_string(), now)
                } else {
                    authors.get(repo, commit_oid)?
                };

                edits.push(
                    LineEdit::new(commit_oid.to_string(), path.as_str(), line_no as u32, &*kind, author, datetime)
                        .with_shape(indent_depth(line), line.chars().count() as u32),
                );
            }
        }

        pb.finish();

        if self.profile {
            eprintln!("[PROFILE] Distinct commits seen: {}", authors.len());
        }

        Ok(edits)
    }

    /// File contents to attribute: the working copy for uncommitted scans, else the HEAD blob.
    /// Returns `None` for non-UTF-8 content or a working copy that no longer exists.
    fn file_text(&self, repo: &Repository, path: &str, blob_oid: Oid) -> Result<Option<String>> {
        let bytes = if self.uncommitted {
            let workdir = repo.workdir().context("Repository has no working tree")?;
            match std::fs::read(workdir.join(path)) {
                Ok(bytes) => bytes,
                Err(_) => return Ok(None),
            }
        } else {
            repo.find_blob(blob_oid)?.content().to_vec()
        };
        Ok(String::from_utf8(bytes).ok())
    }

    fn log(&self, msg: &str) {
        if self.verbose {
            eprintln!("{}", msg);
        }
    }

    fn profile_phase(&self, name: &str, start: Instant) {
        if self.profile {
            eprintln!("[PROFILE] {}: {:?}", name, start.elapsed());
        }
    }
}

/// Author name and timestamp per commit, looked up once
#[derive(Default)]
struct AuthorCache {
    by_commit: FxHashMap<Oid, (String, OffsetDateTime)>,
}

impl AuthorCache {
    fn get(&mut self, repo: &Repository, oid: Oid) -> Result<(String, OffsetDateTime)> {
        if let Some(entry) = self.by_commit.get(&oid) {
            return Ok(entry.clone());
        }
        let commit = repo.find_commit(oid)?;
        let author = commit.author();
        let entry = (
            author.name().unwrap_or("unknown").to_string(),
            git_time_to_datetime(author.when())?,
        );
        self.by_commit.insert(oid, entry.clone());
        Ok(entry)
    }

    fn len(&self) -> usize {
        self.by_commit.len()
    }
}

/// Convert a git timestamp into the author's own offset
pub fn git_time_to_datetime(when: git2::Time) -> Result<OffsetDateTime> {
    let offset = UtcOffset::from_whole_seconds(when.offset_minutes() * 60)
        .context("Invalid timezone offset in commit")?;
    Ok(OffsetDateTime::from_unix_timestamp(when.seconds())
        .context("Invalid commit timestamp")?
        .to_offset(offset))
}

/// URL of the `origin` remote, if the repository has one
pub fn origin_url(repo_path: &Path) -> Option<String> {
    let repo = Repository::open(repo_path).ok()?;
    let remote = repo.find_remote("origin").ok()?;
    remote.url().map(str::to_string)
}
