use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

#[allow(dead_code)]
pub fn php_compat_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_php-compat"))
}

#[allow(dead_code)]
pub fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("legacy")
        .join(name)
}

/// Copies a fixture app into a fresh temp dir so the build can write into it
#[allow(dead_code)]
pub fn copy_fixture(name: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    copy_dir(&fixture_path(name), dir.path());
    dir
}

fn copy_dir(from: &Path, to: &Path) {
    fs::create_dir_all(to).unwrap();
    for entry in fs::read_dir(from).unwrap() {
        let entry = entry.unwrap();
        let target = to.join(entry.file_name());
        if entry.file_type().unwrap().is_dir() {
            copy_dir(&entry.path(), &target);
        } else {
            fs::copy(entry.path(), &target).unwrap();
        }
    }
}

#[allow(dead_code)]
pub fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

/// A buildpack plan asking for php-compat, as the lifecycle would pass it to build
#[allow(dead_code)]
pub fn write_buildpack_plan(dir: &Path) -> PathBuf {
    let path = dir.join("plan.toml");
    fs::write(&path, "[[entries]]\nname = \"php-compat\"\n").unwrap();
    path
}
