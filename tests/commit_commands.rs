use crate::common::command::{
    gt_commit, init_repository_dir, read_head, repository_dir, run_gt_command, stdout_of,
};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use rstest::rstest;

mod common;

#[rstest]
fn write_tree_lists_every_indexed_file(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let tree_id = stdout_of(init_repository_dir.path(), &["write-tree"]);
    let tree_id = tree_id.trim();

    run_gt_command(init_repository_dir.path(), &["cat-file", "-t", tree_id])
        .assert()
        .success()
        .stdout("tree\n");

    let listing = stdout_of(init_repository_dir.path(), &["cat-file", "-p", tree_id]);
    let names = listing
        .lines()
        .filter_map(|line| line.split('\t').nth(1))
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["1.txt", "a/2.txt", "a/b/3.txt"]);

    let blob_id = stdout_of(init_repository_dir.path(), &["hash-object", "a/2.txt"]);
    assert!(listing.contains(&format!("{}\ta/2.txt", blob_id.trim())));

    Ok(())
}

#[rstest]
fn write_tree_is_stable(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let first = stdout_of(init_repository_dir.path(), &["write-tree"]);
    let second = stdout_of(init_repository_dir.path(), &["write-tree"]);

    assert_eq!(first, second);

    Ok(())
}

#[rstest]
fn empty_index_writes_an_empty_tree(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_gt_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    let tree_id = stdout_of(repository_dir.path(), &["write-tree"]);

    run_gt_command(repository_dir.path(), &["cat-file", tree_id.trim()])
        .assert()
        .success()
        .stdout("");

    Ok(())
}

#[rstest]
fn commit_tree_records_tree_parents_and_message(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    let tree_id = stdout_of(dir, &["write-tree"]);
    let tree_id = tree_id.trim();
    let head = read_head(dir);

    let commit_id = run_gt_command(
        dir,
        &["commit-tree", tree_id, "-p", &head, "-m", "Second snapshot\n"],
    )
    .env("GT_AUTHOR_NAME", "grace")
    .assert()
    .success();
    let commit_id = String::from_utf8(commit_id.get_output().stdout.clone())?;
    let commit_id = commit_id.trim();

    run_gt_command(dir, &["cat-file", "-t", commit_id])
        .assert()
        .success()
        .stdout("commit\n");

    let payload = stdout_of(dir, &["cat-file", commit_id]);
    let lines = payload.lines().collect::<Vec<_>>();
    assert_eq!(lines[0], format!("tree {tree_id}"));
    assert_eq!(lines[1], format!("parent {head}"));
    assert!(lines[2].starts_with("author grace "));
    assert!(lines[3].starts_with("committer grace "));
    assert_eq!(lines[4], "");
    assert_eq!(lines[5], "Second snapshot");

    Ok(())
}

#[rstest]
fn commit_tree_reads_message_from_standard_input(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    let tree_id = stdout_of(dir, &["write-tree"]);

    let commit_id = run_gt_command(dir, &["commit-tree", tree_id.trim()])
        .write_stdin("piped message\n")
        .assert()
        .success();
    let commit_id = String::from_utf8(commit_id.get_output().stdout.clone())?;

    run_gt_command(dir, &["cat-file", commit_id.trim()])
        .assert()
        .success()
        .stdout(predicate::str::ends_with("\n\npiped message\n"))
        .stdout(predicate::str::contains("parent").not());

    Ok(())
}

#[rstest]
fn commit_tree_rejects_too_many_parents(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    let tree_id = stdout_of(dir, &["write-tree"]);
    let head = read_head(dir);

    let mut args = vec!["commit-tree", tree_id.trim(), "-m", "octopus"];
    for _ in 0..21 {
        args.extend(["-p", head.as_str()]);
    }

    run_gt_command(dir, &args).assert().failure();

    Ok(())
}

#[rstest]
fn commit_tree_rejects_malformed_tree_id(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_gt_command(
        init_repository_dir.path(),
        &["commit-tree", "not-a-sha", "-m", "message"],
    )
    .assert()
    .failure();

    Ok(())
}

#[rstest]
fn first_commit_moves_head(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir.path();
    run_gt_command(dir, &["init"]).assert().success();
    write_file(FileSpec::new(dir.join("readme.md"), "# readme\n".to_string()));
    run_gt_command(dir, &["add", "readme.md"]).assert().success();

    repository_dir
        .child(".gt")
        .child("HEAD")
        .assert(predicate::path::missing());

    let output = gt_commit(dir, "  Initial commit\n\nwith body  ")
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^\[[0-9a-f]{40}\] Initial commit\n$")?);
    let stdout = String::from_utf8(output.get_output().stdout.clone())?;

    let head = read_head(dir);
    assert_eq!(head.len(), 40);
    assert_eq!(&stdout[1..41], head);

    let payload = stdout_of(dir, &["cat-file", &head]);
    assert!(payload.ends_with("\n\nInitial commit\n\nwith body\n"));
    assert!(!payload.contains("parent"));

    Ok(())
}

#[rstest]
fn subsequent_commits_chain_through_head(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    let first = read_head(dir);

    write_file(FileSpec::new(dir.join("4.txt"), "four\n".to_string()));
    run_gt_command(dir, &["add", "4.txt"]).assert().success();
    gt_commit(dir, "Second commit").assert().success();

    let second = read_head(dir);
    assert_ne!(first, second);

    run_gt_command(dir, &["cat-file", &second])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("parent {first}\n")));

    Ok(())
}
