//! Every object of the project, keyed by identifier.
//!
//! The catalog is filled once per run, in a fixed construction order, and is
//! read-only afterwards. That order is also the order objects are written in
//! within their section.

use std::borrow::Cow;
use std::collections::HashMap;
use std::ops::Index;

use super::id::{Id, Key};
use super::plist::Ref;
use super::settings::BuildSettings;
use crate::error::{Error, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceTree {
  Group,
  BuiltProducts
}

impl SourceTree {
  pub fn as_str(self) -> &'static str {
    match self {
      SourceTree::Group         => "<group>",
      SourceTree::BuiltProducts => "BUILT_PRODUCTS_DIR"
    }
  }
}

/// How a file reference declares its type. Explicit types are used for build
/// products, which are also excluded from the index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileType {
  Known(&'static str),
  Explicit(&'static str)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PhaseKind {
  Sources,
  Frameworks,
  Resources
}

impl PhaseKind {
  pub fn name(self) -> &'static str {
    match self {
      PhaseKind::Sources    => "Sources",
      PhaseKind::Frameworks => "Frameworks",
      PhaseKind::Resources  => "Resources"
    }
  }

  pub fn isa(self) -> &'static str {
    match self {
      PhaseKind::Sources    => "PBXSourcesBuildPhase",
      PhaseKind::Frameworks => "PBXFrameworksBuildPhase",
      PhaseKind::Resources  => "PBXResourcesBuildPhase"
    }
  }
}

#[derive(Debug)]
pub struct FileReference {
  pub file_type:   FileType,
  /// Display name, only set when it differs from the last path component.
  pub name:        Option<String>,
  pub path:        String,
  pub source_tree: SourceTree
}

impl FileReference {
  pub fn display_name(&self) -> &'_ str {
    match &self.name {
      Some(name) => name,
      None       => &self.path
    }
  }
}

/// A file reference as consumed by one build phase.
#[derive(Debug)]
pub struct BuildFile {
  pub file_ref: Id,
  pub name:     String,
  pub phase:    PhaseKind
}

#[derive(Debug)]
pub struct Group {
  pub main:     bool,
  pub name:     Option<String>,
  pub path:     Option<String>,
  pub children: Vec<Id>
}

#[derive(Debug)]
pub struct Phase {
  pub kind:  PhaseKind,
  pub files: Vec<Id>
}

#[derive(Debug)]
pub struct Target {
  pub name:         String,
  pub config_list:  Id,
  pub phases:       Vec<Id>,
  pub product:      Id,
  pub product_type: &'static str
}

#[derive(Debug)]
pub struct Project {
  pub config_list:    Id,
  pub main_group:     Id,
  pub products_group: Id,
  pub targets:        Vec<Id>
}

#[derive(Debug)]
pub struct ConfigurationList {
  pub owner_isa:      &'static str,
  pub owner_name:     String,
  pub configurations: Vec<Id>,
  pub default:        &'static str
}

#[derive(Debug)]
pub struct Configuration {
  pub name:     &'static str,
  pub settings: BuildSettings
}

#[derive(Debug)]
pub enum Entity {
  FileReference(FileReference),
  BuildFile(BuildFile),
  Group(Group),
  Phase(Phase),
  Target(Target),
  Project(Project),
  ConfigurationList(ConfigurationList),
  Configuration(Configuration)
}

impl Entity {
  pub fn isa(&self) -> &'static str {
    match self {
      Entity::FileReference(_)     => "PBXFileReference",
      Entity::BuildFile(_)         => "PBXBuildFile",
      Entity::Group(_)             => "PBXGroup",
      Entity::Phase(p)             => p.kind.isa(),
      Entity::Target(_)            => "PBXNativeTarget",
      Entity::Project(_)           => "PBXProject",
      Entity::ConfigurationList(_) => "XCConfigurationList",
      Entity::Configuration(_)     => "XCBuildConfiguration"
    }
  }

  /// The comment written after the identifier wherever it appears.
  pub fn comment(&self) -> Option<Cow<'_, str>> {
    match self {
      Entity::FileReference(f) => Some(Cow::Borrowed(f.display_name())),
      Entity::BuildFile(b)     => Some(Cow::Owned([&b.name, " in ", b.phase.name()].join(""))),
      Entity::Group(g)         => match g.main {
        true  => None,
        false => g.name.as_deref().or(g.path.as_deref()).map(Cow::Borrowed)
      },
      Entity::Phase(p)         => Some(Cow::Borrowed(p.kind.name())),
      Entity::Target(t)        => Some(Cow::Borrowed(&t.name)),
      Entity::Project(_)       => Some(Cow::Borrowed("Project object")),
      Entity::ConfigurationList(l) => Some(Cow::Owned(format!(
        "Build configuration list for {} \"{}\"", l.owner_isa, l.owner_name))),
      Entity::Configuration(c) => Some(Cow::Borrowed(c.name))
    }
  }

  /// Every identifier this entity points at.
  #[cfg(test)]
  pub fn references(&self) -> Vec<Id> {
    match self {
      Entity::FileReference(_)     => Vec::new(),
      Entity::BuildFile(b)         => vec![b.file_ref],
      Entity::Group(g)             => g.children.clone(),
      Entity::Phase(p)             => p.files.clone(),
      Entity::Target(t)            => {
        let mut v = vec![t.config_list, t.product];
        v.extend(&t.phases);
        v
      },
      Entity::Project(p)           => {
        let mut v = vec![p.config_list, p.main_group, p.products_group];
        v.extend(&p.targets);
        v
      },
      Entity::ConfigurationList(l) => l.configurations.clone(),
      Entity::Configuration(_)     => Vec::new()
    }
  }
}

struct Entry {
  id:     Id,
  key:    Key,
  entity: Entity
}

#[derive(Default)]
pub struct Catalog {
  entries: Vec<Entry>,
  index:   HashMap<Id, usize>
}

impl Catalog {
  pub fn new() -> Self {
    Catalog::default()
  }

  /// Adds an entity under the identifier derived from `key`. Fails when the
  /// identifier is already taken, whether by the same key or a colliding one.
  pub fn insert(&mut self, key: Key, entity: Entity) -> Result<Id> {
    let id = key.id();
    if let Some(&i) = self.index.get(&id) {
      return Err(Error::Collision {
        id:     id.to_string(),
        first:  self.entries[i].key.as_str().to_string(),
        second: key.as_str().to_string()
      });
    }

    tracing::trace!(%id, key = key.as_str(), isa = entity.isa(), "catalog insert");
    self.index.insert(id, self.entries.len());
    self.entries.push(Entry { id, key, entity });
    Ok(id)
  }

  pub fn get(&self, id: Id) -> Option<&Entity> {
    self.index.get(&id).map(|&i| &self.entries[i].entity)
  }

  /// The identifier with its comment, as written wherever it is referenced.
  pub fn reference(&self, id: Id) -> Ref<'_> {
    Ref { id, comment: self[id].comment() }
  }

  /// Entities in construction order.
  pub fn iter(&self) -> impl Iterator<Item = (Id, &Entity)> {
    self.entries.iter().map(|e| (e.id, &e.entity))
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// The project object, root of the graph.
  pub fn root(&self) -> Option<Id> {
    self.iter()
      .find(|(_, e)| matches!(e, Entity::Project(_)))
      .map(|(id, _)| id)
  }
}

impl Index<Id> for Catalog {
  type Output = Entity;

  fn index(&self, id: Id) -> &Entity {
    match self.get(id) {
      Some(e) => e,
      None    => panic!("identifier {} is not in the catalog", id)
    }
  }
}
