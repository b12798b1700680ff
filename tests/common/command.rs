use crate::common::file::{FileSpec, write_file};
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

/// A repository whose three files were added and committed once
#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_gt_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    let file1 = FileSpec::new(repository_dir.path().join("1.txt"), "one\n".to_string());
    write_file(file1);

    let file2 = FileSpec::new(
        repository_dir.path().join("a").join("2.txt"),
        "two\n".to_string(),
    );
    write_file(file2);

    let file3 = FileSpec::new(
        repository_dir.path().join("a").join("b").join("3.txt"),
        "three\nthree again\n".to_string(),
    );
    write_file(file3);

    run_gt_command(repository_dir.path(), &["add", "."])
        .assert()
        .success();

    gt_commit(repository_dir.path(), "Initial commit")
        .assert()
        .success();

    repository_dir
}

pub fn run_gt_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("gt").expect("Failed to find gt binary");
    cmd.env_remove("GT_DIRECTORY");
    cmd.env_remove("GT_LOG");
    cmd.env("NO_COLOR", "1");
    cmd.env("GT_AUTHOR_NAME", random_author());
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

fn random_author() -> String {
    use fake::Fake;
    use fake::faker::name::en::Name;

    Name().fake::<String>().replace(" ", "_")
}

pub fn gt_commit(dir: &Path, message: &str) -> Command {
    run_gt_command(dir, &["commit", "-m", message])
}

/// Content of `.gt/HEAD`
pub fn read_head(dir: &Path) -> String {
    std::fs::read_to_string(dir.join(".gt").join("HEAD")).expect("Failed to read HEAD")
}

/// Stdout of a successful command, as a string
pub fn stdout_of(dir: &Path, args: &[&str]) -> String {
    let output = run_gt_command(dir, args).assert().success();
    String::from_utf8(output.get_output().stdout.clone()).expect("stdout is not UTF-8")
}
