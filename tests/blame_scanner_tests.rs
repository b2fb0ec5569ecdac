// Blame scanner integration tests
// Builds small repositories with fixed commit times and checks attribution

mod common;

use locscope::repository::{BlameScanner, NoStore, UNCOMMITTED_AUTHOR};
use time::macros::{datetime, offset};

#[tokio::test]
async fn test_every_line_becomes_an_edit() {
    let (_dir, path, _repo, [a, b, c]) = common::create_three_commit_repo();

    let edits = BlameScanner::quiet(&path).scan(&NoStore).await.unwrap();

    assert_eq!(edits.len(), 16);
    let count = |oid: git2::Oid| edits.iter().filter(|e| e.commit_id == oid.to_string()).count();
    assert_eq!(count(a), 5);
    assert_eq!(count(b), 10);
    assert_eq!(count(c), 1);
}

#[tokio::test]
async fn test_edit_fields() {
    let (_dir, path, repo) = common::create_test_repo();
    let oid = common::add_commit_at(
        &repo,
        &[("src/main.rs", b"fn main() {\n    run();\n}\n")],
        "init",
        "Ada",
        common::TUESDAY_AFTERNOON,
        120,
    );

    let edits = BlameScanner::quiet(&path).scan(&NoStore).await.unwrap();

    assert_eq!(edits.len(), 3);
    let second = &edits[1];
    assert_eq!(second.commit_id, oid.to_string());
    assert_eq!(second.file, "src/main.rs");
    assert_eq!(second.line, 2);
    assert_eq!(second.kind, "rs");
    assert_eq!(second.author, "Ada");
    assert_eq!(second.depth, 4);
    assert_eq!(second.length, 10);
    assert_eq!(second.timezone, offset!(+02:00));
    assert_eq!(second.datetime, datetime!(2024-03-05 16:30 +02:00));
    assert_eq!(second.time.hour(), 16);
}

#[tokio::test]
async fn test_later_commit_takes_over_changed_lines() {
    let (_dir, path, repo) = common::create_test_repo();
    let first = common::add_commit(&repo, &[("notes.txt", b"one\ntwo\nthree\n")], "first", common::MONDAY_NIGHT);
    let second = common::add_commit(&repo, &[("notes.txt", b"one\nTWO\nthree\n")], "second", common::TUESDAY_AFTERNOON);

    let edits = BlameScanner::quiet(&path).scan(&NoStore).await.unwrap();

    let ids: Vec<_> = edits.iter().map(|e| e.commit_id.clone()).collect();
    assert_eq!(ids, [first.to_string(), second.to_string(), first.to_string()]);
}

#[tokio::test]
async fn test_binary_files_are_skipped() {
    let (_dir, path, repo) = common::create_test_repo();
    common::add_commit(
        &repo,
        &[("logo.png", b"\x89PNG\r\n\x1a\n\0\0\0binary"), ("a.js", b"x;\n")],
        "assets",
        common::MONDAY_NIGHT,
    );

    let edits = BlameScanner::quiet(&path).scan(&NoStore).await.unwrap();

    assert_eq!(edits.len(), 1);
    assert_eq!(edits[0].file, "a.js");
}

#[tokio::test]
async fn test_files_without_extension_use_name() {
    let (_dir, path, repo) = common::create_test_repo();
    common::add_commit(&repo, &[("Makefile", b"all:\n\ttrue\n")], "make", common::MONDAY_NIGHT);

    let edits = BlameScanner::quiet(&path).scan(&NoStore).await.unwrap();

    assert!(edits.iter().all(|e| e.kind == "Makefile"));
    assert_eq!(edits[1].depth, 1);
}

#[tokio::test]
async fn test_cache_is_used_when_head_unchanged() {
    let (_dir, path, _repo, _) = common::create_three_commit_repo();
    let db = common::setup_db().await;
    let scanner = BlameScanner::quiet(&path);

    let first = scanner.scan(&db).await.unwrap();
    assert_eq!(db.line_edit_count().await.unwrap(), first.len());
    assert!(db.get_metadata("head_oid").await.is_some());

    // Emptying the table proves the next scan reads the cache instead of blaming
    db.clear_line_edits().await.unwrap();
    let second = scanner.scan(&db).await.unwrap();
    assert!(second.is_empty());
}

#[tokio::test]
async fn test_new_commit_invalidates_cache() {
    let (_dir, path, repo, _) = common::create_three_commit_repo();
    let db = common::setup_db().await;
    let scanner = BlameScanner::quiet(&path);

    let before = scanner.scan(&db).await.unwrap();
    let head = common::add_commit(&repo, &[("more.py", b"a = 1\nb = 2\n")], "py", common::WEDNESDAY_EVENING + 60);

    let after = scanner.scan(&db).await.unwrap();
    assert_eq!(after.len(), before.len() + 2);
    assert_eq!(db.get_metadata("head_oid").await, Some(head.to_string()));
    assert_eq!(db.load_line_edits().await.unwrap(), after);
}

#[tokio::test]
async fn test_uncommitted_lines_use_zero_id() {
    let (_dir, path, repo) = common::create_test_repo();
    common::add_commit(&repo, &[("a.js", b"one\ntwo\n")], "init", common::MONDAY_NIGHT);
    std::fs::write(path.join("a.js"), b"one\ntwo\nthree\n").unwrap();

    let db = common::setup_db().await;
    let edits = BlameScanner::quiet(&path).with_uncommitted(true).scan(&db).await.unwrap();

    assert_eq!(edits.len(), 3);
    let last = &edits[2];
    assert!(locscope::model::is_root_id(&last.commit_id));
    assert_eq!(last.author, UNCOMMITTED_AUTHOR);
    assert!(!locscope::model::is_root_id(&edits[0].commit_id));

    // Working-tree scans are never written to the cache
    assert_eq!(db.line_edit_count().await.unwrap(), 0);
    assert!(db.get_metadata("head_oid").await.is_none());
}

#[tokio::test]
async fn test_not_a_repository() {
    let dir = tempfile::TempDir::new().unwrap();
    let result = BlameScanner::quiet(dir.path()).scan(&NoStore).await;
    assert!(result.is_err());
}
