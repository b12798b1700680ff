use crate::common::command::{repository_dir, run_gt_command};
use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::*;
use rstest::rstest;

mod common;

#[rstest]
fn init_repository_successfully(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir_absolute_path = repository_dir
        .path()
        .canonicalize()?
        .join(".gt")
        .display()
        .to_string();

    run_gt_command(repository_dir.path(), &["init"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(
            r"^Initialized empty gt repository in .+\n$",
        )?)
        .stdout(predicate::str::contains(dir_absolute_path));

    repository_dir
        .child(".gt")
        .child("objects")
        .assert(predicate::path::is_dir());
    repository_dir
        .child(".gt")
        .child("index")
        .assert(predicate::path::missing());

    Ok(())
}

#[rstest]
fn init_is_idempotent(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    run_gt_command(repository_dir.path(), &["init"])
        .assert()
        .success();
    repository_dir.child("note.txt").write_str("kept")?;
    run_gt_command(repository_dir.path(), &["add", "note.txt"])
        .assert()
        .success();

    run_gt_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    run_gt_command(repository_dir.path(), &["ls-files"])
        .assert()
        .success()
        .stdout(predicate::str::contains("note.txt"));

    Ok(())
}

#[rstest]
fn repository_directory_follows_environment(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_gt_command(repository_dir.path(), &["init"])
        .env("GT_DIRECTORY", "store")
        .assert()
        .success();

    repository_dir
        .child("store")
        .child("objects")
        .assert(predicate::path::is_dir());
    repository_dir
        .child(".gt")
        .assert(predicate::path::missing());

    Ok(())
}

#[rstest]
fn repository_directory_follows_flag(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_gt_command(repository_dir.path(), &["--directory", "custom", "init"])
        .assert()
        .success();

    repository_dir
        .child("custom")
        .child("objects")
        .assert(predicate::path::is_dir());

    Ok(())
}

#[rstest]
fn adding_before_init_fails(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    repository_dir.child("file.txt").write_str("content")?;

    run_gt_command(repository_dir.path(), &["add", "file.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("repository not initialized"));

    Ok(())
}
