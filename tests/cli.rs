//! End-to-end runs of the `suite_builder` binary inside scratch directories.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn suite_builder(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("suite_builder").unwrap();
    cmd.current_dir(dir);
    cmd
}

fn write_settings(dir: &TempDir, content: &str) {
    fs::write(dir.path().join("suite_builder.toml"), content).unwrap();
}

#[test]
fn clean_removes_build_dir() {
    let temp_dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(temp_dir.path().join("build/CMakeFiles")).unwrap();
    fs::write(temp_dir.path().join("build/CMakeCache.txt"), "").unwrap();

    suite_builder(temp_dir.path())
        .args(["--action", "clean", "--build-dir", "build"])
        .assert()
        .success();

    assert!(!temp_dir.path().join("build").exists());
}

#[test]
fn clean_refuses_filesystem_root() {
    let temp_dir = tempfile::tempdir().unwrap();

    suite_builder(temp_dir.path())
        .args(["--action", "clean", "--build-dir", "/"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("filesystem root"));

    assert!(Path::new("/").exists());
}

#[test]
fn debug_and_quiet_is_a_usage_error() {
    let temp_dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(temp_dir.path().join("build")).unwrap();

    suite_builder(temp_dir.path())
        .args(["--action", "clean", "--debug", "--quiet"])
        .assert()
        .code(2);

    assert!(temp_dir.path().join("build").exists());
}

#[test]
fn unknown_action_is_rejected() {
    let temp_dir = tempfile::tempdir().unwrap();

    suite_builder(temp_dir.path())
        .args(["--action", "make"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[cfg(not(windows))]
#[test]
fn build_without_msbuild_spawns_nothing() {
    let temp_dir = tempfile::tempdir().unwrap();
    write_settings(&temp_dir, "cmake = \"true\"\n");

    suite_builder(temp_dir.path())
        .args(["--action", "build"])
        .assert()
        .code(5)
        .stderr(predicate::str::contains("MSBuild"));

    assert!(!temp_dir.path().join("build").exists());
}

#[test]
fn recmake_without_cache_fails() {
    let temp_dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(temp_dir.path().join("build")).unwrap();

    suite_builder(temp_dir.path())
        .args(["--action", "recmake"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("CMakeCache.txt"));
}

#[test]
fn malformed_options_file_fails() {
    let temp_dir = tempfile::tempdir().unwrap();
    fs::write(temp_dir.path().join("opts.json"), "{ not json").unwrap();

    suite_builder(temp_dir.path())
        .args(["--action", "cmake", "--cmake-options", "opts.json"])
        .assert()
        .code(4);
}

#[cfg(unix)]
#[test]
fn configure_passes_build_type_and_definitions() {
    let temp_dir = tempfile::tempdir().unwrap();
    // `echo` stands in for cmake, so its stdout is the argument list.
    write_settings(&temp_dir, "cmake = \"echo\"\n");
    fs::write(temp_dir.path().join("opts.json"), r#"{"FOO":"1"}"#).unwrap();

    suite_builder(temp_dir.path())
        .args([
            "--action",
            "cmake",
            "--cmake-options",
            "opts.json",
            "--build-type",
            "Release",
        ])
        .assert()
        .success()
        .stderr(predicate::str::contains("../test -DCMAKE_BUILD_TYPE=Release -DFOO=1"));

    assert!(temp_dir.path().join("build").is_dir());
}

#[cfg(unix)]
#[test]
fn definition_values_reach_cmake_intact() {
    let temp_dir = tempfile::tempdir().unwrap();
    write_settings(&temp_dir, "cmake = \"echo\"\n");
    fs::write(
        temp_dir.path().join("opts.json"),
        r#"{"CMAKE_CONFIGURATION_TYPES":"Debug;Release","X":"1;>INJECTED"}"#,
    )
    .unwrap();

    suite_builder(temp_dir.path())
        .args(["--action", "cmake", "--cmake-options", "opts.json"])
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "-DCMAKE_CONFIGURATION_TYPES=Debug;Release -DX=1;>INJECTED",
        ))
        .stderr(predicate::str::contains("not found").not());

    assert!(!temp_dir.path().join("build/INJECTED").exists());
}

#[cfg(unix)]
#[test]
fn generator_override_disables_generator_flag() {
    let temp_dir = tempfile::tempdir().unwrap();
    write_settings(&temp_dir, "cmake = \"echo\"\n");

    suite_builder(temp_dir.path())
        .args(["--action", "cmake", "--generator", "Ninja"])
        .assert()
        .success()
        .stderr(predicate::str::contains("-DCMAKE_BUILD_TYPE=Debug"))
        .stderr(predicate::str::contains("-G").not())
        .stderr(predicate::str::contains("Ninja").not());
}

#[cfg(unix)]
#[test]
fn quiet_suppresses_logging() {
    let temp_dir = tempfile::tempdir().unwrap();
    write_settings(&temp_dir, "cmake = \"echo\"\n");

    suite_builder(temp_dir.path())
        .args(["--action", "cmake", "--quiet"])
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

#[cfg(unix)]
#[test]
fn failing_configure_is_fatal() {
    let temp_dir = tempfile::tempdir().unwrap();
    write_settings(&temp_dir, "cmake = \"false\"\n");

    suite_builder(temp_dir.path())
        .args(["--action", "cmake"])
        .assert()
        .code(6);
}

#[cfg(unix)]
#[test]
fn rebuild_cleans_configures_and_builds() {
    let temp_dir = tempfile::tempdir().unwrap();
    let root = temp_dir.path();
    fs::create_dir_all(root.join("build")).unwrap();
    fs::write(root.join("build/stale.txt"), "old").unwrap();

    // `sh` runs the "test dir" as the configure step, which emits a solution
    // file; `/bin/sh` as MSBuild then runs that solution as a script.
    fs::write(
        root.join("configure.sh"),
        "echo 'echo built > built.txt' > Suite.sln\n",
    )
    .unwrap();
    write_settings(&temp_dir, "cmake = \"sh\"\nmsbuild = \"/bin/sh\"\n");

    suite_builder(root)
        .args(["--action", "rebuild", "--test-dir", "configure.sh"])
        .assert()
        .success();

    assert!(!root.join("build/stale.txt").exists());
    assert!(root.join("build/Suite.sln").is_file());
    assert_eq!(fs::read_to_string(root.join("built.txt")).unwrap().trim(), "built");
}

#[cfg(unix)]
#[test]
fn recmake_deletes_only_the_cache() {
    let temp_dir = tempfile::tempdir().unwrap();
    let root = temp_dir.path();
    fs::create_dir_all(root.join("build")).unwrap();
    fs::write(root.join("build/CMakeCache.txt"), "").unwrap();
    fs::write(root.join("build/keep.txt"), "").unwrap();
    write_settings(&temp_dir, "cmake = \"true\"\n");

    suite_builder(root)
        .args(["--action", "recmake"])
        .assert()
        .success();

    assert!(!root.join("build/CMakeCache.txt").exists());
    assert!(root.join("build/keep.txt").exists());
}
