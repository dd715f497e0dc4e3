#![allow(dead_code)]

pub mod pool;

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tempfile::TempDir;

/// Write `contents` to `name` inside `dir` and return the path.
pub fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write temp file");
    path
}

/// Serialise `value` as JSON into `name` inside `dir`.
pub fn write_json(dir: &TempDir, name: &str, value: &Value) -> PathBuf {
    write_file(
        dir,
        name,
        &serde_json::to_string(value).expect("serialise table"),
    )
}

pub fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).expect("read file")).expect("parse json")
}
