//! Where the coordinator gets the initial board.
//!
//! Only the coordinator ever holds a [`GridSource`]; the full board never
//! exists on any other worker.

use std::fs;
use std::path::{Path, PathBuf};

use lifeslab_core::Grid;

use crate::config::ConfigError;

/// Capability to load the initial board.
pub trait GridSource: Send + Sync {
    /// Load the full board.
    fn load(&self) -> Result<Grid, ConfigError>;
}

/// Reads the `'0'`/`'1'` text format from a file.
#[derive(Clone, Debug)]
pub struct TextFileSource {
    path: PathBuf,
}

impl TextFileSource {
    /// A source reading `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file this source reads.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl GridSource for TextFileSource {
    fn load(&self) -> Result<Grid, ConfigError> {
        let text = fs::read_to_string(&self.path).map_err(|e| ConfigError::Unreadable {
            path: self.path.clone(),
            reason: e.to_string(),
        })?;
        Ok(Grid::parse(&text)?)
    }
}

/// An in-memory board is its own source.
impl GridSource for Grid {
    fn load(&self) -> Result<Grid, ConfigError> {
        Ok(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lifeslab_core::GridError;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("lifeslab-source-{}-{name}", std::process::id()))
    }

    #[test]
    fn loads_text_file() {
        let path = temp_path("ok.txt");
        fs::write(&path, "0110\n1001\n").unwrap();
        let grid = TextFileSource::new(&path).load().unwrap();
        fs::remove_file(&path).ok();
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.columns(), 4);
        assert_eq!(grid.population(), 4);
    }

    #[test]
    fn missing_file_is_unreadable() {
        let path = temp_path("does-not-exist.txt");
        let err = TextFileSource::new(&path).load().unwrap_err();
        assert!(matches!(err, ConfigError::Unreadable { path: p, .. } if p == path));
    }

    #[test]
    fn malformed_file_is_grid_error() {
        let path = temp_path("bad.txt");
        fs::write(&path, "01\n011\n").unwrap();
        let err = TextFileSource::new(&path).load().unwrap_err();
        fs::remove_file(&path).ok();
        assert_eq!(
            err,
            ConfigError::Grid(GridError::RaggedRow {
                row: 1,
                expected: 2,
                found: 3
            })
        );
    }

    #[test]
    fn grid_is_its_own_source() {
        let grid = Grid::parse("10\n01\n").unwrap();
        assert_eq!(grid.load().unwrap(), grid);
    }
}
