use assert_cmd::Command;
use predicates::prelude::predicate::str;

#[test]
fn solve_default_input_outputs_overlay() {
    let mut cmd = Command::cargo_bin("solve").unwrap();

    cmd.assert()
        .success()
        .stdout(str::contains("Path found!"))
        .stdout(str::contains("S*********"))
        .stdout(str::contains(".........E"));
}

#[test]
fn solve_reports_no_path() {
    let mut cmd = Command::cargo_bin("solve").unwrap();
    cmd.arg("tests/no_path.txt");

    cmd.assert().success().stdout(str::contains("No path found."));
}

#[test]
fn solve_reports_no_start() {
    let mut cmd = Command::cargo_bin("solve").unwrap();
    cmd.arg("tests/no_start.txt");

    cmd.assert()
        .success()
        .stdout(str::contains("No start position 'S' found."));
}

#[test]
fn solve_fails_on_missing_file() {
    let mut cmd = Command::cargo_bin("solve").unwrap();
    cmd.arg("no_such_maze.txt");

    cmd.assert()
        .failure()
        .stderr(str::contains("Failed to read maze"));
}
