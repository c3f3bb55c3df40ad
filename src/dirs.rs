//! `pushd` / `popd` style directory stack.
//!
//! Unlike a shell, the stack is an ordinary value owned by the caller instead
//! of hidden process-wide state. The process working directory is still
//! global, so a [`DirStack`] driving [`ProcessDir`] must not be shared with
//! other threads that change directories.

use std::env;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Errors produced by [`DirStack`].
#[derive(Debug, Error)]
pub enum DirStackError {
    /// The current working directory couldn't be determined.
    #[error("can't read current directory")]
    CurrentDir(#[source] io::Error),
    /// Changing into `path` failed.
    #[error("can't change directory to {}", path.display())]
    ChangeDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// `popd` was called with nothing recorded.
    #[error("directory stack empty")]
    Empty,
}

/// Access to a working directory.
///
/// [`ProcessDir`] is the real thing; tests can provide their own.
pub trait WorkingDir {
    /// Returns the current working directory.
    fn current_dir(&self) -> io::Result<PathBuf>;

    /// Changes the current working directory.
    fn set_current_dir(&mut self, path: &Path) -> io::Result<()>;
}

/// The working directory of this process.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessDir;

impl WorkingDir for ProcessDir {
    fn current_dir(&self) -> io::Result<PathBuf> {
        env::current_dir()
    }

    fn set_current_dir(&mut self, path: &Path) -> io::Result<()> {
        env::set_current_dir(path)
    }
}

/// Stack of previously visited working directories.
#[derive(Debug)]
pub struct DirStack<W = ProcessDir> {
    wd: W,
    // Most recent entry last.
    entries: Vec<PathBuf>,
}

impl DirStack<ProcessDir> {
    /// Creates an empty stack that changes the directory of this process.
    pub fn new() -> Self {
        Self::with_working_dir(ProcessDir)
    }
}

impl Default for DirStack<ProcessDir> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: WorkingDir> DirStack<W> {
    /// Creates an empty stack on top of a custom [`WorkingDir`].
    pub fn with_working_dir(wd: W) -> Self {
        Self {
            wd,
            entries: Vec::new(),
        }
    }

    /// Remembers the current directory, then changes to `path`.
    ///
    /// Nothing is recorded if either step fails.
    pub fn pushd(&mut self, path: impl AsRef<Path>) -> Result<(), DirStackError> {
        let path = path.as_ref();
        let current = self.wd.current_dir().map_err(DirStackError::CurrentDir)?;

        self.wd
            .set_current_dir(path)
            .map_err(|source| DirStackError::ChangeDir {
                path: path.to_path_buf(),
                source,
            })?;

        debug!(from = %current.display(), to = %path.display(), "pushd");
        self.entries.push(current);
        Ok(())
    }

    /// Changes back to the most recently pushed directory and forgets it.
    ///
    /// Returns the directory that is now current. The entry stays recorded if
    /// the change fails, and an empty stack yields [`DirStackError::Empty`].
    pub fn popd(&mut self) -> Result<PathBuf, DirStackError> {
        let dir = self.entries.last().ok_or(DirStackError::Empty)?;

        self.wd
            .set_current_dir(dir)
            .map_err(|source| DirStackError::ChangeDir {
                path: dir.clone(),
                source,
            })?;

        debug!(to = %dir.display(), "popd");
        self.entries.pop().ok_or(DirStackError::Empty)
    }

    /// Most recently pushed directory.
    pub fn peek(&self) -> Option<&Path> {
        self.entries.last().map(PathBuf::as_path)
    }

    /// Recorded directories, most recent first.
    pub fn dirs(&self) -> impl Iterator<Item = &Path> {
        self.entries.iter().rev().map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Current directory as seen by the underlying [`WorkingDir`].
    pub fn current_dir(&self) -> Result<PathBuf, DirStackError> {
        self.wd.current_dir().map_err(DirStackError::CurrentDir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    /// In-memory working directory over a fixed set of existing paths.
    struct FakeDir {
        cwd: Option<PathBuf>,
        existing: HashSet<PathBuf>,
    }

    impl FakeDir {
        fn new(cwd: &str, existing: &[&str]) -> Self {
            Self {
                cwd: Some(PathBuf::from(cwd)),
                existing: existing.iter().map(PathBuf::from).collect(),
            }
        }
    }

    impl WorkingDir for FakeDir {
        fn current_dir(&self) -> io::Result<PathBuf> {
            self.cwd
                .clone()
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "cwd removed"))
        }

        fn set_current_dir(&mut self, path: &Path) -> io::Result<()> {
            if self.existing.contains(path) {
                self.cwd = Some(path.to_path_buf());
                Ok(())
            } else {
                Err(io::Error::new(io::ErrorKind::NotFound, "no such dir"))
            }
        }
    }

    #[test]
    fn test_pushd_records_previous_dir() {
        let mut ds = DirStack::with_working_dir(FakeDir::new("/home", &["/home", "/tmp", "/srv"]));

        ds.pushd("/tmp").unwrap();
        ds.pushd("/srv").unwrap();

        assert_eq!(ds.current_dir().unwrap(), PathBuf::from("/srv"));
        let listed: Vec<&Path> = ds.dirs().collect();
        assert_eq!(listed, vec![Path::new("/tmp"), Path::new("/home")]);
        assert_eq!(ds.peek(), Some(Path::new("/tmp")));
    }

    #[test]
    fn test_popd_returns_in_reverse_order() {
        let mut ds = DirStack::with_working_dir(FakeDir::new("/home", &["/home", "/tmp", "/srv"]));
        ds.pushd("/tmp").unwrap();
        ds.pushd("/srv").unwrap();

        assert_eq!(ds.popd().unwrap(), PathBuf::from("/tmp"));
        assert_eq!(ds.current_dir().unwrap(), PathBuf::from("/tmp"));
        assert_eq!(ds.popd().unwrap(), PathBuf::from("/home"));
        assert!(ds.is_empty());
    }

    #[test]
    fn test_pushd_failed_change_records_nothing() {
        let mut ds = DirStack::with_working_dir(FakeDir::new("/home", &["/home"]));

        let err = ds.pushd("/nope").unwrap_err();
        assert!(matches!(err, DirStackError::ChangeDir { ref path, .. } if path == Path::new("/nope")));
        assert_eq!(ds.len(), 0);
        assert_eq!(ds.current_dir().unwrap(), PathBuf::from("/home"));
    }

    #[test]
    fn test_pushd_without_cwd_fails() {
        let mut fake = FakeDir::new("/home", &["/tmp"]);
        fake.cwd = None;
        let mut ds = DirStack::with_working_dir(fake);

        let err = ds.pushd("/tmp").unwrap_err();
        assert!(matches!(err, DirStackError::CurrentDir(_)));
        assert!(ds.is_empty());
    }

    #[test]
    fn test_popd_on_empty_is_an_error() {
        let mut ds = DirStack::with_working_dir(FakeDir::new("/home", &["/home"]));
        let err = ds.popd().unwrap_err();
        assert!(matches!(err, DirStackError::Empty));
        assert_eq!(err.to_string(), "directory stack empty");
    }

    #[test]
    fn test_popd_keeps_entry_when_change_fails() {
        let mut ds = DirStack::with_working_dir(FakeDir::new("/home", &["/home", "/tmp"]));
        ds.pushd("/tmp").unwrap();
        ds.wd.existing.remove(Path::new("/home"));

        assert!(matches!(ds.popd(), Err(DirStackError::ChangeDir { .. })));
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.peek(), Some(Path::new("/home")));
    }
}
