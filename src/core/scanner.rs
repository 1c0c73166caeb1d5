use rayon::prelude::*;
use std::borrow::Cow;
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::parsers::{FileParser, ParsedFile};

/// A file offered to the scanner: a root-relative path and its bytes.
pub trait FileEntry {
    fn relative_path(&self) -> &Path;
    fn contents(&self) -> std::io::Result<Cow<'_, [u8]>>;
}

/// A file from a non-filesystem collection, with its content already fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteFile {
    pub path: String,
    pub content: Vec<u8>,
    pub is_dir: bool,
}

impl RemoteFile {
    pub fn new(path: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            is_dir: false,
        }
    }

    pub fn directory(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: Vec::new(),
            is_dir: true,
        }
    }
}

/// Where a project's files come from.
#[derive(Debug, Clone)]
pub enum ProjectSource {
    Local(PathBuf),
    Remote(Vec<RemoteFile>),
}

impl ProjectSource {
    pub fn local(root: impl Into<PathBuf>) -> Self {
        ProjectSource::Local(root.into())
    }

    pub fn remote(files: Vec<RemoteFile>) -> Self {
        ProjectSource::Remote(files)
    }

    /// Pick a source from optional inputs, preferring the local root.
    pub fn from_parts(local: Option<PathBuf>, remote: Option<Vec<RemoteFile>>) -> Result<Self> {
        match (local, remote) {
            (Some(root), _) => Ok(ProjectSource::Local(root)),
            (None, Some(files)) => Ok(ProjectSource::Remote(files)),
            (None, None) => Err(Error::Scan(
                "either a local project directory or a remote file list is required".to_string(),
            )),
        }
    }

    /// Every file of the source. Directories are never returned.
    pub fn entries(&self) -> Result<Vec<SourceEntry<'_>>> {
        match self {
            ProjectSource::Local(root) => {
                if !root.is_dir() {
                    return Err(Error::Scan(format!("{} is not a directory", root.display())));
                }
                Ok(WalkDir::new(root)
                    .follow_links(false)
                    .sort_by_file_name()
                    .into_iter()
                    .filter_map(|e| e.ok())
                    .filter(|entry| entry.file_type().is_file())
                    .filter_map(|entry| {
                        let relative = entry.path().strip_prefix(root).ok()?.to_path_buf();
                        Some(SourceEntry::Local {
                            relative,
                            absolute: entry.into_path(),
                        })
                    })
                    .collect())
            }
            ProjectSource::Remote(files) => Ok(files
                .iter()
                .filter(|file| !file.is_dir)
                .map(|file| SourceEntry::Remote {
                    relative: normalize(Path::new(&file.path)),
                    file,
                })
                .collect()),
        }
    }
}

#[derive(Debug, Clone)]
pub enum SourceEntry<'a> {
    Local { relative: PathBuf, absolute: PathBuf },
    Remote { relative: PathBuf, file: &'a RemoteFile },
}

impl FileEntry for SourceEntry<'_> {
    fn relative_path(&self) -> &Path {
        match self {
            SourceEntry::Local { relative, .. } | SourceEntry::Remote { relative, .. } => relative,
        }
    }

    fn contents(&self) -> std::io::Result<Cow<'_, [u8]>> {
        match self {
            SourceEntry::Local { absolute, .. } => fs::read(absolute).map(Cow::Owned),
            SourceEntry::Remote { file, .. } => Ok(Cow::Borrowed(&file.content)),
        }
    }
}

/// Drops `./` and leading `/` from a remote path. `..` is kept so the scanner
/// can reject it.
fn normalize(path: &Path) -> PathBuf {
    path.components()
        .filter(|component| matches!(component, Component::Normal(_) | Component::ParentDir))
        .collect()
}

fn escapes_root(relative: &Path) -> bool {
    relative
        .components()
        .any(|component| matches!(component, Component::ParentDir))
}

/// Number of path components below the root: `root/a.py` is at depth 1.
pub fn depth(relative: &Path) -> usize {
    relative.components().count()
}

/// Dotted module name: `pkg/sub/mod.py` -> `pkg.sub.mod`.
pub fn module_name(relative: &Path) -> String {
    let mut parts: Vec<String> = relative
        .parent()
        .into_iter()
        .flat_map(|parent| parent.components())
        .map(|component| component.as_os_str().to_string_lossy().into_owned())
        .collect();
    if let Some(stem) = relative.file_stem() {
        parts.push(stem.to_string_lossy().into_owned());
    }
    parts.join(".")
}

/// Slash-joined key: `pkg/sub/mod.py`.
pub fn path_key(relative: &Path) -> String {
    relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// A file that was selected for parsing but could not be turned into a graph.
#[derive(Debug)]
pub struct FileFailure {
    pub path: String,
    pub error: Error,
}

/// Per-file results of a scan, keyed by slash-joined relative path.
#[derive(Debug, Default)]
pub struct ScanReport {
    pub files: BTreeMap<String, ParsedFile>,
    pub failures: Vec<FileFailure>,
}

pub struct ProjectScanner {
    parser: FileParser,
    parallel: bool,
}

impl ProjectScanner {
    pub fn new(parser: FileParser) -> Self {
        Self {
            parser,
            parallel: true,
        }
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn parser(&self) -> &FileParser {
        &self.parser
    }

    pub fn scan(&self, source: &ProjectSource, max_depth: usize) -> Result<ScanReport> {
        let entries = source.entries()?;
        info!(entries = entries.len(), max_depth, "scanning project");

        let mut report = ScanReport::default();
        let mut seen = HashSet::new();
        let mut candidates = Vec::new();
        for entry in &entries {
            let relative = entry.relative_path();
            if self.parser.registry().language_for_path(relative).is_none() {
                debug!(path = %relative.display(), "skipping unsupported extension");
                continue;
            }
            if escapes_root(relative) {
                report.failures.push(FileFailure {
                    path: path_key(relative),
                    error: Error::OutsideRoot(relative.to_path_buf()),
                });
                continue;
            }
            if depth(relative) > max_depth {
                debug!(path = %relative.display(), "skipping file below depth limit");
                continue;
            }
            let key = path_key(relative);
            if !seen.insert(key.clone()) {
                report.failures.push(FileFailure {
                    error: Error::DuplicatePath(key.clone()),
                    path: key,
                });
                continue;
            }
            candidates.push((key, entry));
        }

        let parse = |(key, entry): &(String, &SourceEntry<'_>)| {
            (key.clone(), self.parse_entry(entry, key))
        };
        let results: Vec<(String, Result<ParsedFile>)> = if self.parallel {
            candidates.par_iter().map(parse).collect()
        } else {
            candidates.iter().map(parse).collect()
        };

        for (path, result) in results {
            match result {
                Ok(parsed) => {
                    report.files.insert(path, parsed);
                }
                Err(error) => report.failures.push(FileFailure { path, error }),
            }
        }
        report.failures.sort_by(|a, b| a.path.cmp(&b.path));
        for failure in &report.failures {
            warn!(path = %failure.path, error = %failure.error, "excluding file from graphs");
        }

        info!(
            parsed = report.files.len(),
            failed = report.failures.len(),
            "scan finished"
        );
        Ok(report)
    }

    fn parse_entry(&self, entry: &SourceEntry<'_>, key: &str) -> Result<ParsedFile> {
        let relative = entry.relative_path();
        let contents = entry.contents().map_err(|source| Error::Io {
            path: relative.to_path_buf(),
            source,
        })?;
        let module = module_name(relative);
        self.parser.parse_file(Path::new(key), &contents, Some(&module))
    }
}
