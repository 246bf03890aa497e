use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::debug;

use crate::shell::error::BuiltinError;

/// State that outlives a single line.
///
/// The shell never changes its own process working directory; children are
/// moved into `working_directory` right after they are forked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellState {
    working_directory: PathBuf,
}

impl ShellState {
    pub fn new(working_directory: impl Into<PathBuf>) -> Self {
        Self {
            working_directory: working_directory.into(),
        }
    }

    pub fn from_process() -> io::Result<Self> {
        Ok(Self::new(env::current_dir()?))
    }

    pub fn working_directory(&self) -> &Path {
        &self.working_directory
    }

    /// The `cd` built-in. Relative targets resolve against the current
    /// working directory; the state is untouched on failure.
    pub fn change_directory(&mut self, target: Option<&str>) -> Result<&Path, BuiltinError> {
        let target = target.ok_or(BuiltinError::MissingOperand)?;
        let resolved = fs::canonicalize(self.working_directory.join(target))
            .map_err(|_| BuiltinError::NotFound(PathBuf::from(target)))?;
        if !resolved.is_dir() {
            return Err(BuiltinError::NotADirectory(PathBuf::from(target)));
        }

        debug!("working directory: {} -> {}", self.working_directory.display(), resolved.display());
        self.working_directory = resolved;
        Ok(&self.working_directory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;

    #[allow(clippy::unwrap_used)]
    #[test]
    fn test_cd_relative_and_back() {
        let root = tempfile::tempdir().unwrap();
        let root_path = fs::canonicalize(root.path()).unwrap();
        fs::create_dir(root_path.join("sub")).unwrap();

        let mut state = ShellState::new(&root_path);
        assert_eq!(state.change_directory(Some("sub")).unwrap(), root_path.join("sub"));
        assert_eq!(state.change_directory(Some("..")).unwrap(), root_path);
    }

    #[allow(clippy::unwrap_used)]
    #[test]
    fn test_cd_absolute() {
        let root = tempfile::tempdir().unwrap();
        let root_path = fs::canonicalize(root.path()).unwrap();

        let mut state = ShellState::new("/");
        state.change_directory(root_path.to_str()).unwrap();
        assert_eq!(state.working_directory(), root_path);
    }

    #[allow(clippy::unwrap_used)]
    #[test]
    fn test_cd_failures_keep_state() {
        let root = tempfile::tempdir().unwrap();
        let root_path = fs::canonicalize(root.path()).unwrap();
        File::create(root_path.join("plain.txt")).unwrap();

        let mut state = ShellState::new(&root_path);
        assert_eq!(state.change_directory(None), Err(BuiltinError::MissingOperand));
        assert_eq!(
            state.change_directory(Some("missing")),
            Err(BuiltinError::NotFound(PathBuf::from("missing")))
        );
        assert_eq!(
            state.change_directory(Some("plain.txt")),
            Err(BuiltinError::NotADirectory(PathBuf::from("plain.txt")))
        );
        assert_eq!(state.working_directory(), root_path);
    }
}
