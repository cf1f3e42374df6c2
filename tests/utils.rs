use config_render::cli::{run, Args, RenderSummary};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Prints a diff of files and their contents between two directories.
/// Shows files only present in one directory and content differences for files present in both.
///
/// # Arguments
/// * `dir1` - The first directory to compare (actual output).
/// * `dir2` - The second directory to compare (expected output).
pub fn print_dir_diff(dir1: &Path, dir2: &Path) {
    let relative_files = |root: &Path| -> std::collections::BTreeSet<PathBuf> {
        WalkDir::new(root)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|e| e.path().is_file())
            .map(|e| e.path().strip_prefix(root).unwrap().to_path_buf())
            .collect()
    };
    let files1 = relative_files(dir1);
    let files2 = relative_files(dir2);

    println!("\n=== Directory Comparison ===");
    println!("Actual output:   {dir1:?}");
    println!("Expected output: {dir2:?}");

    for file in files1.difference(&files2) {
        println!("  + {file:?} (only in actual)");
    }
    for file in files2.difference(&files1) {
        println!("  - {file:?} (only in expected)");
    }
    for file in files1.intersection(&files2) {
        let actual = fs::read_to_string(dir1.join(file)).unwrap_or_default();
        let expected = fs::read_to_string(dir2.join(file)).unwrap_or_default();
        if actual != expected {
            println!("\n  File: {file:?}");
            println!("  --- Actual content:\n{actual}");
            println!("  --- Expected content:\n{expected}");
        }
    }
    println!("=== End of Comparison ===\n");
}

/// Arguments for a non-interactive render without environment variables.
pub fn base_args() -> Args {
    Args { no_env: true, non_interactive: true, verbose: 2, ..Default::default() }
}

/// Renders `template` into a fresh directory and asserts it matches `expected_dir`.
///
/// # Arguments
/// * `template` - Template file or directory, relative to the crate root.
/// * `expected_dir` - Directory holding the expected output.
/// * `context` - Data files merged into the context.
/// * `set` - `KEY=VALUE` overrides.
pub fn run_and_assert(template: &str, expected_dir: &str, context: &[&str], set: &[&str]) {
    let tmp_dir = tempfile::tempdir().unwrap();
    let args = Args {
        templates: vec![PathBuf::from(template)],
        output: Some(tmp_dir.path().to_path_buf()),
        context: context.iter().map(PathBuf::from).collect(),
        set: set.iter().map(|s| s.to_string()).collect(),
        force: true,
        ..base_args()
    };
    run(args).unwrap();
    let result = dir_diff::is_different(tmp_dir.path(), expected_dir);
    match result {
        Ok(different) => {
            if different {
                print_dir_diff(tmp_dir.path(), expected_dir.as_ref());
                panic!("Directories differ. See above for details.");
            }
        }
        Err(e) => {
            debug!("Error comparing directories: {e}");
        }
    }
    assert!(!dir_diff::is_different(tmp_dir.path(), expected_dir).unwrap());
}

/// Runs with `args` inside `dir`.
pub fn run_in(dir: &Path, args: Args) -> RenderSummary {
    run(Args { directory: Some(dir.to_path_buf()), ..args }).unwrap()
}
