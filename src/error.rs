use std::path::PathBuf;

use semver::Version;

pub type Result<T> = std::result::Result<T, Error>;

/// Every way a generator run can fail. All of them are fatal.
#[derive(Debug, thiserror::Error)]
pub enum Error {
  #[error("Failed to discover source files in {}: {reason}", path.display())]
  Discovery {
    path:   PathBuf,
    reason: String
  },

  #[error("Failed to read manifest ({}): {reason}", path.display())]
  Manifest {
    path:   PathBuf,
    reason: String
  },

  #[error("Invalid min_version {value:?}: {source}")]
  VersionFormat {
    value:  String,
    source: semver::SemVerError
  },

  #[error("Project does not support this version: expected {expected} but running {current}")]
  Version {
    expected: Version,
    current:  Version
  },

  #[error("Identifier {id} is shared by {first:?} and {second:?}")]
  Collision {
    id:     String,
    first:  String,
    second: String
  },

  #[error("Failed to write {}: {source}", path.display())]
  Write {
    path:   PathBuf,
    source: std::io::Error
  }
}

impl Error {
  pub fn discovery<S: ToString>(path: impl Into<PathBuf>, reason: S) -> Self {
    Error::Discovery { path: path.into(), reason: reason.to_string() }
  }

  pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
    Error::Write { path: path.into(), source }
  }
}
