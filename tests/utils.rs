#![allow(dead_code)]

use create_stylus::compose::Composer;
use create_stylus::config::ToolPaths;
use create_stylus::error::Result;
use create_stylus::git::{Git2, VersionControl};
use create_stylus::options::Options;
use create_stylus::renderer::MiniJinjaRenderer;
use create_stylus::template::TemplateRegistry;
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use walkdir::WalkDir;

/// Writes `files` (relative path, content) under `root`, creating parents.
pub fn write_tree(root: &Path, files: &[(&str, &str)]) {
    for (relative, content) in files {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }
}

/// Every file under `root` outside `.git`, relative and `/`-separated, sorted.
pub fn list_files(root: &Path) -> Vec<String> {
    let mut files: Vec<String> = WalkDir::new(root)
        .into_iter()
        .filter_entry(|e| e.file_name() != ".git")
        .filter_map(std::result::Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            e.path()
                .strip_prefix(root)
                .unwrap()
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/")
        })
        .collect();
    files.sort();
    files
}

pub fn read(root: &Path, relative: &str) -> String {
    fs::read_to_string(root.join(relative))
        .unwrap_or_else(|e| panic!("cannot read '{relative}': {e}"))
}

/// A throwaway tool layout: `templates/{base,extensions}` plus a sibling
/// `externalExtensions` directory.
pub struct TemplateFixture {
    pub dir: TempDir,
}

impl TemplateFixture {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("templates/base")).unwrap();
        fs::create_dir_all(dir.path().join("templates/extensions")).unwrap();
        Self { dir }
    }

    pub fn base_dir(&self) -> PathBuf {
        self.dir.path().join("templates/base")
    }

    pub fn extension_dir(&self, name: &str) -> PathBuf {
        self.dir.path().join("templates/extensions").join(name)
    }

    pub fn external_root(&self, name: &str) -> PathBuf {
        self.dir.path().join("externalExtensions").join(name).join("extension")
    }

    pub fn base(self, files: &[(&str, &str)]) -> Self {
        write_tree(&self.base_dir(), files);
        self
    }

    pub fn extension(self, name: &str, files: &[(&str, &str)]) -> Self {
        write_tree(&self.extension_dir(name), files);
        self
    }

    pub fn external(self, name: &str, files: &[(&str, &str)]) -> Self {
        write_tree(&self.external_root(name), files);
        self
    }

    pub fn paths(&self) -> ToolPaths {
        ToolPaths::resolve(Some(&self.dir.path().join("templates"))).unwrap()
    }
}

/// Version control that "clones" a prepared tree and records what it was asked.
///
/// Repository init and commits go to the real libgit2 backend.
#[derive(Default)]
pub struct FakeVcs {
    pub remote_tree: Vec<(String, String)>,
    pub cloned: RefCell<Vec<(String, Option<String>)>>,
    pub clone_destinations: RefCell<Vec<PathBuf>>,
}

impl FakeVcs {
    pub fn with_remote_tree(files: &[(&str, &str)]) -> Self {
        Self {
            remote_tree: files.iter().map(|(p, c)| (p.to_string(), c.to_string())).collect(),
            ..Self::default()
        }
    }
}

impl VersionControl for FakeVcs {
    fn clone_repository(&self, url: &str, branch: Option<&str>, destination: &Path) -> Result<()> {
        self.cloned.borrow_mut().push((url.to_string(), branch.map(str::to_string)));
        self.clone_destinations.borrow_mut().push(destination.to_path_buf());
        let files: Vec<(&str, &str)> =
            self.remote_tree.iter().map(|(p, c)| (p.as_str(), c.as_str())).collect();
        write_tree(destination, &files);
        Ok(())
    }

    fn init_repository(&self, directory: &Path, branch: &str) -> Result<()> {
        Git2.init_repository(directory, branch)
    }

    fn commit_all(&self, directory: &Path, message: &str) -> Result<()> {
        Git2.commit_all(directory, message)
    }
}

/// Composes `options` from `fixture` into a fresh directory named after the project.
pub fn compose_with(
    fixture: &TemplateFixture,
    vcs: &dyn VersionControl,
    registry: &TemplateRegistry,
    options: &Options,
) -> Result<(TempDir, PathBuf)> {
    let out = TempDir::new().unwrap();
    let target = out.path().join(&options.project);
    let engine = MiniJinjaRenderer::new();
    Composer::new(&fixture.paths(), vcs, &engine, registry).compose(options, &target)?;
    Ok((out, target))
}

pub fn compose(fixture: &TemplateFixture, options: &Options) -> (TempDir, PathBuf) {
    compose_with(fixture, &FakeVcs::default(), &TemplateRegistry::new(), options).unwrap()
}

/// Prints a diff of files and their contents between two directories.
/// Shows files only present in one directory and content differences for files present in both.
///
/// # Arguments
/// * `dir1` - The first directory to compare (actual output).
/// * `dir2` - The second directory to compare (expected output).
pub fn print_dir_diff(dir1: &Path, dir2: &Path) {
    let files1: std::collections::BTreeSet<_> = list_files(dir1).into_iter().collect();
    let files2: std::collections::BTreeSet<_> = list_files(dir2).into_iter().collect();

    println!("\n=== Directory Comparison ===");
    println!("Actual output:   {:?}", dir1);
    println!("Expected output: {:?}", dir2);

    for file in files1.difference(&files2) {
        println!("  + {file}");
    }
    for file in files2.difference(&files1) {
        println!("  - {file}");
    }
    for file in files1.intersection(&files2) {
        let content1 = fs::read(dir1.join(file)).unwrap();
        let content2 = fs::read(dir2.join(file)).unwrap();
        if content1 != content2 {
            println!("\n  File: {file}");
            println!("  --- Actual content:\n{}", String::from_utf8_lossy(&content1));
            println!("  --- Expected content:\n{}", String::from_utf8_lossy(&content2));
        }
    }
    println!("=== End of Comparison ===\n");
}

/// Asserts that two directories hold the same files with the same content.
pub fn assert_same_tree(actual: &Path, expected: &Path) {
    let different = dir_diff::is_different(actual, expected).unwrap();
    if different {
        print_dir_diff(actual, expected);
        panic!("Directories differ. See above for details.");
    }
}
