//! Command line behavior of the `nctable` binary.

mod common;

use assert_cmd::Command;
use common::{climate, TestResult};
use predicates::prelude::*;

fn nctable() -> Command {
    Command::cargo_bin("nctable").expect("binary is built")
}

#[test]
fn test_missing_file() {
    nctable()
        .arg("/nonexistent/climate.nc")
        .arg("--dump")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Path not found"));
}

#[test]
fn test_list() -> TestResult {
    let (_dir, path) = climate()?;
    nctable()
        .arg(&path)
        .arg("--list")
        .assert()
        .success()
        .stdout(predicate::str::contains("time<double> time(time)"))
        .stdout(predicate::str::contains("float pr(time, lat, lon) ; Precipitation"))
        .stdout(predicate::str::contains("int stations(lat)"));
    Ok(())
}

#[test]
fn test_dump_page() -> TestResult {
    let (_dir, path) = climate()?;
    let output = nctable()
        .arg(&path)
        .args(["pr", "tas", "--dump", "--page-size", "10", "--page", "2"])
        .output()?;
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout)?;
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 11);
    assert_eq!(lines[0], "time\tlat\tlon\tpr\ttas");
    assert_eq!(lines[4], "2000-01-02T12:00:00\t-45\t1\t13\t215");
    Ok(())
}

#[test]
fn test_dump_all_rows() -> TestResult {
    let (_dir, path) = climate()?;
    nctable()
        .arg(&path)
        .args(["pr", "--dump", "--page", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2000-01-01T00:00:00\t-45\t0\t0\n"))
        .stdout(predicate::str::contains("2000-01-02T12:00:00\t45\t3\t23\n"));
    Ok(())
}

#[test]
fn test_dump_defaults_to_first_data_variable() -> TestResult {
    let (_dir, path) = climate()?;
    nctable()
        .arg(&path)
        .arg("--dump")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("time\tlat\tlon\tpr\n"));
    Ok(())
}

#[test]
fn test_page_is_clamped() -> TestResult {
    let (_dir, path) = climate()?;
    nctable()
        .arg(&path)
        .args(["pr", "--dump", "--page-size", "10", "--page", "99"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\t23\n"))
        .stdout(predicate::str::contains("\t19\n").not());
    Ok(())
}

#[test]
fn test_calendar_option() -> TestResult {
    let (_dir, path) = climate()?;
    nctable()
        .arg(&path)
        .args(["pr", "--dump", "--calendar", "360_day", "--page-size", "1"])
        .assert()
        .success();
    nctable()
        .arg(&path)
        .args(["pr", "--dump", "--calendar", "julian_ish"])
        .assert()
        .failure();
    Ok(())
}

#[test]
fn test_incongruent_selection_fails() -> TestResult {
    let (_dir, path) = climate()?;
    nctable()
        .arg(&path)
        .args(["pr", "stations", "--dump"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("incongruent variable 'stations'"));
    Ok(())
}

#[test]
fn test_log_file() -> TestResult {
    let (dir, path) = climate()?;
    let log = dir.path().join("nctable.log");
    nctable()
        .arg(&path)
        .args(["--list", "--log"])
        .arg(&log)
        .assert()
        .success();
    let text = std::fs::read_to_string(&log)?;
    assert!(text.contains("Opening netCDF file"));
    Ok(())
}
