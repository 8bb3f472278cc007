use assert_cmd::Command;
use assert_fs::{prelude::*, TempDir};
use predicates::prelude::*;

fn numset() -> Command {
    let mut cmd = Command::cargo_bin("numset").unwrap();
    cmd.args(["--color", "never"]);
    cmd
}

fn path_with(temp: &TempDir, name: &str, contents: &str) -> String {
    let f = temp.child(name);
    f.write_str(contents).unwrap();
    f.path().to_str().unwrap().to_string()
}

#[test]
fn requires_two_operands() {
    numset().assert().failure();
    numset().arg("a.txt").assert().failure();
}

#[test]
fn reports_counts_overlap_and_union() {
    let temp = TempDir::new().unwrap();
    let a = path_with(&temp, "a.txt", "1\n2\n\nabc\n3,4 5");
    let b = path_with(&temp, "b.csv", "4,5,6\n7\n");
    let output = numset().args([a.as_str(), b.as_str()]).output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Overlap (A and B) : 2\n"), "{stdout}");
    assert!(stdout.contains("Union (A or B)    : 7\n"), "{stdout}");
    assert!(stdout.contains("5 + 4 - 2 = 7\n"), "{stdout}");
}

#[test]
fn missing_file_warns_and_counts_as_empty() {
    let temp = TempDir::new().unwrap();
    let a = path_with(&temp, "a.txt", "2 4 6");
    let b = temp.child("absent.txt");
    numset()
        .arg(&a)
        .arg(b.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("absent.txt not found, counted as empty"))
        .stdout(predicate::str::contains("3 + 0 - 0 = 3"))
        .stderr(predicate::str::contains("input file not found"));
}

#[test]
fn missing_file_can_be_fatal() {
    let temp = TempDir::new().unwrap();
    let a = path_with(&temp, "a.txt", "2 4 6");
    let b = temp.child("absent.txt");
    numset()
        .args(["--missing", "fail"])
        .arg(&a)
        .arg(b.path())
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Can't find file"));
}

#[test]
fn values_above_the_bound_are_flagged() {
    let temp = TempDir::new().unwrap();
    let a = path_with(&temp, "a.txt", "0\n720\n721");
    let b = path_with(&temp, "b.txt", "");
    numset()
        .args(["--max", "720", a.as_str(), b.as_str()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Left out of A\n  721 (greater than 720)\n"))
        .stdout(predicate::str::contains("2 + 0 - 0 = 2"));
}

#[test]
fn gap_scan_lists_short_results() {
    let temp = TempDir::new().unwrap();
    let a = path_with(&temp, "a.txt", "0,2,4");
    let b = path_with(&temp, "b.txt", "6");
    numset()
        .args(["--max", "10", "--even", "--gaps", a.as_str(), b.as_str()])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Of the multiples of 2 up to 10, 2 are missing.\n  8, 10\n",
        ));
}

#[test]
fn gap_scan_of_a_huge_range_is_counted_not_listed() {
    let temp = TempDir::new().unwrap();
    let a = path_with(&temp, "a.txt", "1 2");
    let b = path_with(&temp, "b.txt", "2");
    numset()
        .args(["--order", "20", "--gaps", a.as_str(), b.as_str()])
        .assert()
        .success()
        .stdout(predicate::str::ends_with(
            "Of the values up to 2432902008176640000, 2432902008176639999 are missing.\n",
        ));
}

#[test]
fn gap_scan_needs_a_bound() {
    let temp = TempDir::new().unwrap();
    let a = path_with(&temp, "a.txt", "0");
    numset()
        .args(["--gaps", a.as_str(), a.as_str()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--gaps"));
}

#[test]
fn failed_expectations_fail_the_run() {
    let temp = TempDir::new().unwrap();
    let a = path_with(&temp, "nonsingular.txt", "0 6 24 120");
    let b = path_with(&temp, "singular.txt", "0 24 48");
    numset()
        .args(["--label-a", "Nonsingular", "--label-b", "Singular", a.as_str(), b.as_str()])
        .args(["--expect-overlap", "2", "--expect-union", "5", "--absent-from-a", "0"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("✓ overlap: 2 (expected 2)"))
        .stdout(predicate::str::contains("✓ union: 5 (expected 5)"))
        .stdout(predicate::str::contains("✗ 0 in A: present (expected absent)"));
}

#[test]
fn met_expectations_pass() {
    let temp = TempDir::new().unwrap();
    let a = path_with(&temp, "a.txt", "6 24 120");
    let b = path_with(&temp, "b.txt", "0 24 48");
    numset()
        .args(["--expect-a", "3", "--expect-b", "3", "--absent-from-a", "0"])
        .args([a.as_str(), b.as_str()])
        .assert()
        .success();
}

#[test]
fn line_mode_ignores_lines_with_several_numbers() {
    let temp = TempDir::new().unwrap();
    let a = path_with(&temp, "a.txt", "1\n2\n3,4 5\n");
    let b = path_with(&temp, "b.txt", "");
    numset()
        .args(["--split", "lines", "--list-overlap", a.as_str(), a.as_str(), "--expect-a", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Overlap values\n  1, 2\n"));
    numset().args(["--split", "lines", a.as_str(), b.as_str()]).assert().success();
}

#[test]
fn permsets_lists_singular_permanents() {
    Command::cargo_bin("permsets")
        .unwrap()
        .args(["singular", "--order", "3", "--log-level", "error"])
        .assert()
        .success()
        .stdout("0\n2\n4\n6\n");
}

#[test]
fn permsets_writes_a_file_numset_can_read() {
    let temp = TempDir::new().unwrap();
    let out = temp.child("nonsingular.txt");
    Command::cargo_bin("permsets")
        .unwrap()
        .args(["nonsingular", "-o", "4", "--out"])
        .arg(out.path())
        .assert()
        .success()
        .stdout("");
    out.assert("1\n2\n3\n4\n5\n6\n7\n9\n11\n");
    let path = out.path().to_str().unwrap();
    numset().args(["--expect-a", "9", "--absent-from-a", "0", path, path]).assert().success();
}

#[test]
fn permsets_rejects_orders_out_of_range() {
    Command::cargo_bin("permsets")
        .unwrap()
        .args(["singular", "--order", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("order must be between 1 and 8, not 0"));
}
