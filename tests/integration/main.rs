//! Integration tests for xgo

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::fs;
    use tempfile::TempDir;

    /// xgo with an isolated config file and no inherited build environment
    fn xgo(config_dir: &TempDir) -> Command {
        let mut cmd = cargo_bin_cmd!("xgo");
        cmd.env_remove("XGO_IN_XGO")
            .env_remove("XGO_LOG")
            .arg("--config")
            .arg(config_dir.path().join("config.toml"));
        cmd
    }

    #[test]
    fn help_displays() {
        let dir = TempDir::new().unwrap();
        xgo(&dir)
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Cross compile cgo projects"));
    }

    #[test]
    fn version_displays() {
        let dir = TempDir::new().unwrap();
        xgo(&dir)
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("xgo"));
    }

    #[test]
    fn config_path_honours_flag() {
        let dir = TempDir::new().unwrap();
        xgo(&dir)
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));
    }

    #[test]
    fn config_show_prints_defaults() {
        let dir = TempDir::new().unwrap();
        xgo(&dir)
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[engine]"))
            .stdout(predicate::str::contains("ghcr.io/crazy-max/xgo"));
    }

    #[test]
    fn config_init_writes_file() {
        let dir = TempDir::new().unwrap();
        xgo(&dir).args(["config", "init"]).assert().success();
        assert!(dir.path().join("config.toml").is_file());
    }

    #[test]
    fn cache_path_follows_config() {
        let dir = TempDir::new().unwrap();
        let cache = dir.path().join("deps");
        fs::write(
            dir.path().join("config.toml"),
            format!("[cache]\ndir = {:?}\n", cache.to_str().unwrap()),
        )
        .unwrap();

        xgo(&dir)
            .args(["cache", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("deps"));

        xgo(&dir)
            .args(["cache", "list"])
            .assert()
            .success()
            .stdout(predicate::str::contains("No cached dependencies"));
    }

    #[test]
    fn invalid_config_is_reported() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("config.toml"), "[engine\n").unwrap();

        xgo(&dir)
            .args(["config", "show"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid configuration"));
    }

    #[test]
    fn build_missing_project_fails_fast() {
        let dir = TempDir::new().unwrap();
        xgo(&dir)
            .current_dir(dir.path())
            .args(["build", "./does-not-exist"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Path not found"));
    }

    #[test]
    fn build_outside_gopath_fails_fast() {
        let dir = TempDir::new().unwrap();
        let gopath = TempDir::new().unwrap();
        let project = dir.path().join("legacy");
        fs::create_dir(&project).unwrap();

        xgo(&dir)
            .current_dir(&project)
            .env("GOPATH", gopath.path())
            .args(["build", "."])
            .assert()
            .failure()
            .stderr(predicate::str::contains("not inside any GOPATH workspace"))
            .stderr(predicate::str::contains("Hint:"));
    }

    #[test]
    fn contained_build_rejects_file_project() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("main.go"), "package main\n").unwrap();

        xgo(&dir)
            .current_dir(dir.path())
            .env("XGO_IN_XGO", "1")
            .args(["build", "./main.go"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid path"));
    }
}
