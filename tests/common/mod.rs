#![allow(dead_code)]

mod mocks;

use std::{
    fs,
    path::{Path, PathBuf},
};

pub use mocks::MockFile;

/// Path of a fixture under `tests/data`.
pub fn data(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

/// Writes `rooms` and `students` documents into `dir` and returns their paths.
pub fn write_inputs(dir: &Path, rooms: &str, students: &str) -> (PathBuf, PathBuf) {
    let rooms_path = dir.join("rooms.json");
    let students_path = dir.join("students.json");
    fs::write(&rooms_path, rooms).expect("Unable to write rooms");
    fs::write(&students_path, students).expect("Unable to write students");
    (rooms_path, students_path)
}
