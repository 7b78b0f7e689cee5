use super::catalog::{Catalog, Entity, Phase, PhaseKind};
use super::id::{Id, Key};
use crate::error::Result;

/// Build phases in the order the target runs them.
pub struct Phases {
  pub sources:    Id,
  pub frameworks: Id,
  pub resources:  Id
}

impl Phases {
  pub fn ids(&self) -> Vec<Id> {
    vec![self.sources, self.frameworks, self.resources]
  }
}

/// Build files of one phase, in catalog order.
fn members(catalog: &Catalog, kind: PhaseKind) -> Vec<Id> {
  catalog.iter()
    .filter_map(|(id, e)| match e {
      Entity::BuildFile(b) if b.phase == kind => Some(id),
      _                                       => None
    })
    .collect()
}

fn add(catalog: &mut Catalog, name: &'static str, kind: PhaseKind) -> Result<Id> {
  let files = members(catalog, kind);
  tracing::debug!(phase = kind.name(), files = files.len(), "build phase");
  catalog.insert(Key::named(name), Entity::Phase(Phase { kind, files }))
}

/// Each phase lists exactly the build files the catalog holds for it, so a
/// build file can neither be missing from its phase nor dangle.
pub fn assemble(catalog: &mut Catalog) -> Result<Phases> {
  let sources    = add(catalog, "sources_phase",    PhaseKind::Sources)?;
  let frameworks = add(catalog, "frameworks_phase", PhaseKind::Frameworks)?;
  let resources  = add(catalog, "resources_phase",  PhaseKind::Resources)?;

  Ok(Phases { sources, frameworks, resources })
}
