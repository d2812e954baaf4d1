//! 索引流程集成测试

use std::fs;
use std::path::Path;
use tempfile::TempDir;
use zettel_indexer::cli::{commands, Cli};
use zettel_indexer::core::{Config, Indexer};

/// 辅助函数：在笔记库中写入文件
fn write(root: &Path, name: &str, content: &str) {
    let path = root.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn read(root: &Path, name: &str) -> String {
    fs::read_to_string(root.join(name)).unwrap()
}

#[test]
fn test_end_to_end() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write(root, "A.md", "# A\n");
    write(root, "B.md", "# B\n");
    write(root, "index.md", "Start here: [[A]]\n");

    let summary = Indexer::new(Config::new(root)).run().unwrap();

    assert_eq!(summary.unindexed, vec!["B"]);
    assert_eq!(read(root, "unindexed.md"), "[[B]]\n");
    assert_eq!(read(root, "index.md"), "#index\nStart here: [[A]]\n");
    assert_eq!(read(root, "A.md"), "# A\n");
}

#[test]
fn test_second_run_is_idempotent() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write(root, "A.md", "");
    write(root, "B.md", "");
    write(root, "C.md", "");
    write(
        root,
        "sub/Reading Index.md",
        "---\ntitle: Reading\n---\n- [[B|Book B]]\n",
    );

    let indexer = Indexer::new(Config::new(root));
    let first = indexer.run().unwrap();
    let unindexed = read(root, "unindexed.md");
    let index = read(root, "sub/Reading Index.md");

    assert_eq!(first.tags_added, 1);
    assert_eq!(unindexed, "[[A]]\n[[C]]\n");
    assert_eq!(index, "---\ntitle: Reading\n---\n#index\n- [[B|Book B]]\n");

    let second = indexer.run().unwrap();
    assert_eq!(second.tags_added, 0);
    assert_eq!(read(root, "unindexed.md"), unindexed);
    assert_eq!(read(root, "sub/Reading Index.md"), index);
}

#[test]
fn test_overwrites_previous_output() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write(root, "A.md", "");
    write(root, "unindexed.md", "[[Stale]]\nhand-written notes\n");

    Indexer::new(Config::new(root)).run().unwrap();

    assert_eq!(read(root, "unindexed.md"), "[[A]]\n");
}

#[test]
fn test_multiple_index_files_union() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write(root, "A.md", "");
    write(root, "B.md", "");
    write(root, "C.md", "");
    write(root, "Projects Index.md", "#index\n[[A]]\n");
    write(root, "archive/people-INDEX.md", "[[B.md]]\n[[Unclosed\n");

    let summary = Indexer::new(Config::new(root)).run().unwrap();

    assert_eq!(summary.index_files, 2);
    assert_eq!(summary.unindexed, vec!["C"]);
    assert_eq!(summary.tags_added, 1);
    assert_eq!(read(root, "Projects Index.md"), "#index\n[[A]]\n");
    assert_eq!(
        read(root, "archive/people-INDEX.md"),
        "#index\n[[B.md]]\n[[Unclosed\n"
    );
}

#[test]
fn test_upper_case_index_file_is_processed() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write(root, "A.md", "");
    write(root, "B.md", "");
    write(root, "Hub INDEX.MD", "[[A]]\n");

    let summary = Indexer::new(Config::new(root)).run().unwrap();

    assert_eq!(summary.index_files, 1);
    assert_eq!(summary.unindexed, vec!["B"]);
    assert_eq!(summary.tags_added, 1);
    assert_eq!(read(root, "unindexed.md"), "[[B]]\n");
    assert_eq!(read(root, "Hub INDEX.MD"), "#index\n[[A]]\n");
}

#[test]
fn test_excluded_directories_are_skipped() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write(root, "A.md", "");
    write(root, ".obsidian/plugins.md", "");
    write(root, ".trash/old index.md", "");

    let summary = Indexer::new(Config::new(root)).run().unwrap();

    assert_eq!(summary.notes_scanned, 1);
    assert_eq!(summary.index_files, 0);
    assert_eq!(read(root, ".trash/old index.md"), "");
}

#[test]
fn test_empty_collection_writes_nothing() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write(root, "readme.txt", "not a note");

    let summary = Indexer::new(Config::new(root)).run().unwrap();

    assert_eq!(summary.notes_scanned, 0);
    assert!(!root.join("unindexed.md").exists());
}

#[test]
fn test_command_run_with_config_file() {
    let temp = TempDir::new().unwrap();
    let notes = temp.path().join("notes");
    write(&notes, "A.md", "");
    write(&notes, "index.md", "");

    let config_path = temp.path().join("config.json");
    let config = serde_json::json!({ "zettelkasten_folder_path": notes });
    fs::write(&config_path, config.to_string()).unwrap();

    let cli = Cli {
        config: Some(config_path),
        verbose: false,
    };
    let summary = commands::run(&cli).unwrap();

    assert_eq!(summary.unindexed, vec!["A"]);
    assert_eq!(read(&notes, "index.md"), "#index\n");
}

#[test]
fn test_command_run_missing_root_is_fatal() {
    let temp = TempDir::new().unwrap();
    let config_path = temp.path().join("config.json");
    let config = serde_json::json!({ "zettelkasten_folder_path": temp.path().join("missing") });
    fs::write(&config_path, config.to_string()).unwrap();

    let cli = Cli {
        config: Some(config_path),
        verbose: false,
    };
    assert!(commands::run(&cli).is_err());
}

#[test]
fn test_command_run_missing_config_is_fatal() {
    let temp = TempDir::new().unwrap();
    let cli = Cli {
        config: Some(temp.path().join("absent.json")),
        verbose: false,
    };
    assert!(commands::run(&cli).is_err());
}
