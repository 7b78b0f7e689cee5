use serde::Deserialize;
use semver::Version;
use std::borrow::Cow;
use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

pub type DynResult<T> = std::result::Result<T, Box<dyn std::error::Error>>;

pub const MANIFEST_NAME: &str = "Pbxgen.toml";

/// Everything a generator run needs, resolved once from the command line and
/// the optional manifest.
pub struct Context<'a> {
  pub root_dir:   PathBuf,
  pub source_dir: PathBuf,
  pub project:    Project<'a>
}

impl<'a> Context<'a> {
  pub fn new(root_dir: PathBuf, info: &'a ProjectInfo<'a>) -> Self {
    let project    = info.resolve(&root_dir);
    let source_dir = root_dir.join(&*project.source_dir);
    Context { root_dir, source_dir, project }
  }

  /// Path of the generated descriptor, always `<root>/<Name>.xcodeproj/project.pbxproj`.
  pub fn output_path(&self) -> PathBuf {
    let mut path = self.root_dir.join(&*self.project.name);
    path.set_extension("xcodeproj");
    path.push("project.pbxproj");
    path
  }

  /// Source directory relative to the project root, `/` separated. Empty when
  /// the sources live directly in the root.
  pub fn source_rel(&self) -> String {
    pathdiff::diff_paths(&self.source_dir, &self.root_dir)
      .map(|p| join_components(&p))
      .unwrap_or_default()
  }
}

/// Root of the `Pbxgen.toml` manifest.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest<'a> {
  #[serde(rename = "project")]
  #[serde(borrow)]
  #[serde(default)]
  pub info: ProjectInfo<'a>
}

impl<'a> Manifest<'a> {
  pub fn parse(bytes: &'a [u8], path: &Path) -> Result<Self> {
    toml::from_slice(bytes).map_err(|e| Error::Manifest {
      path:   path.to_path_buf(),
      reason: e.to_string()
    })
  }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
#[serde(deny_unknown_fields)]
pub struct ProjectInfo<'a> {
  #[serde(borrow)]
  pub name:              Option<&'a str>,
  pub min_version:       &'a str,
  pub source_dir:        Option<&'a str>,
  pub source_extension:  Option<&'a str>,
  pub bundle_identifier: Option<&'a str>,
  pub deployment_target: Option<&'a str>,
  pub marketing_version: Option<&'a str>,
  pub development_team:  &'a str,

  /// Categories always emitted as groups, in this order, even when empty.
  pub categories: Vec<&'a str>
}

impl<'a> ProjectInfo<'a> {
  /// Fills every unset field. The project name falls back to the root
  /// directory's name.
  pub fn resolve(&'a self, root_dir: &Path) -> Project<'a> {
    let name: Cow<'a, str> = match self.name {
      Some(name) => Cow::Borrowed(name),
      None       => Cow::Owned(root_dir.file_name()
                                 .map(|x| x.to_string_lossy().into_owned())
                                 .unwrap_or_else(|| "App".to_string()))
    };

    let bundle_identifier = match self.bundle_identifier {
      Some(id) => Cow::Borrowed(id),
      None     => Cow::Owned(["com.", &bundle_segment(&name), ".app"].join(""))
    };

    let source_dir = match self.source_dir {
      Some(dir) => Cow::Borrowed(dir),
      None      => name.clone()
    };

    Project {
      name,
      source_dir,
      bundle_identifier,
      source_extension:  self.source_extension.unwrap_or("swift"),
      deployment_target: self.deployment_target.unwrap_or("17.0"),
      marketing_version: self.marketing_version.unwrap_or("1.0"),
      development_team:  self.development_team,
      categories:        &self.categories
    }
  }
}

/// The manifest with every default applied.
#[derive(Debug)]
pub struct Project<'a> {
  pub name:              Cow<'a, str>,
  pub source_dir:        Cow<'a, str>,
  pub bundle_identifier: Cow<'a, str>,
  pub source_extension:  &'a str,
  pub deployment_target: &'a str,
  pub marketing_version: &'a str,
  pub development_team:  &'a str,
  pub categories:        &'a [&'a str]
}

/// A discovered source file. Immutable once discovered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceFile {
  /// Path relative to the source directory, `/` separated.
  pub path: String
}

impl SourceFile {
  pub fn new<S: Into<String>>(path: S) -> Self {
    SourceFile { path: path.into() }
  }

  /// First path segment, or `None` for files directly in the source root.
  pub fn category(&self) -> Option<&'_ str> {
    match self.path.find('/') {
      Some(i) => Some(&self.path[..i]),
      None    => None
    }
  }

  pub fn name(&self) -> &'_ str {
    match self.path.rfind('/') {
      Some(i) => &self.path[i + 1 ..],
      None    => &self.path
    }
  }

  /// Path relative to the category directory.
  pub fn category_path(&self) -> &'_ str {
    match self.path.find('/') {
      Some(i) => &self.path[i + 1 ..],
      None    => &self.path
    }
  }
}

pub fn join_components(path: &Path) -> String {
  path.components()
    .filter(|x| *x != Component::CurDir)
    .map(|x| x.as_os_str().to_string_lossy())
    .collect::<Vec<_>>()
    .join("/")
}

fn bundle_segment(name: &str) -> String {
  name.chars()
    .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
    .flat_map(|c| c.to_lowercase())
    .collect()
}

pub fn is_supported(min_version: &str) -> Result<()> {
  if !min_version.is_empty() {
    let expected = Version::parse(min_version).map_err(|source| Error::VersionFormat {
      value: min_version.to_string(),
      source
    })?;
    let current = Version::parse(env!("CARGO_PKG_VERSION"))
      .map_err(|source| Error::VersionFormat {
        value: env!("CARGO_PKG_VERSION").to_string(),
        source
      })?;
    if expected > current {
      return Err(Error::Version { expected, current })
    }
  }
  Ok(())
}
