use glob::{MatchOptions, Pattern};
use std::path::Path;

use crate::ctx::{join_components, SourceFile};
use crate::error::{Error, Result};

/// Recursively collects every file under `dir` with the given extension,
/// sorted by relative path. Ordering is fixed here and never changed later.
pub fn find_sources(dir: &Path, extension: &str) -> Result<Vec<SourceFile>> {
  let meta = std::fs::metadata(dir).map_err(|e| Error::discovery(dir, e))?;
  if !meta.is_dir() {
    return Err(Error::discovery(dir, "not a directory"));
  }

  let base = dir.to_str()
    .ok_or_else(|| Error::discovery(dir, "path is not valid UTF-8"))?;
  let pattern = [&Pattern::escape(base), "/**/*.", &Pattern::escape(extension)].join("");

  let options = MatchOptions {
    case_sensitive:              true,
    require_literal_separator:   true,
    require_literal_leading_dot: false
  };

  let mut files = Vec::new();
  for m in glob::glob_with(&pattern, options).map_err(|e| Error::discovery(dir, e))? {
    let full = m.map_err(|e| Error::discovery(dir, e))?;
    if !full.is_file() {
      continue;
    }

    let rel = full.strip_prefix(dir).map_err(|e| Error::discovery(&full, e))?;
    if rel.to_str().is_none() {
      return Err(Error::discovery(&full, "path is not valid UTF-8"));
    }

    files.push(SourceFile::new(join_components(rel)));
  }

  files.sort_unstable_by(|a, b| a.path.cmp(&b.path));
  tracing::info!(dir = %dir.display(), count = files.len(), "discovered source files");
  Ok(files)
}
