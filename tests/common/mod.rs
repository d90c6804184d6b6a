#![allow(dead_code)]

use assert_cmd::Command;
use std::path::Path;
use tempfile::TempDir;

pub fn lights_cmd() -> Command {
    let mut cmd = Command::cargo_bin("lights").unwrap();
    cmd.env_remove("LIGHTS_ROOT");
    cmd.env_remove("LIGHTS_LOG");
    cmd.env_remove("EDITOR");
    cmd.env_remove("VISUAL");
    cmd
}

/// `lights` running inside `dir`
pub fn lights_in(dir: &Path) -> Command {
    let mut cmd = lights_cmd();
    cmd.current_dir(dir);
    cmd
}

/// A freshly initialized journal owned by "sam"
pub fn journal() -> TempDir {
    let temp = TempDir::new().unwrap();
    lights_cmd()
        .arg("init")
        .arg(temp.path())
        .args(["--name", "sam"])
        .assert()
        .success();
    temp
}
