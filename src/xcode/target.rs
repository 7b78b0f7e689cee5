use super::catalog::{Catalog, Configuration, ConfigurationList, Entity, Project, Target};
use super::groups::Tree;
use super::id::{Id, Key};
use super::phases::Phases;
use super::settings::{self, BuildSettings, Profile, DEFAULT_PROFILE, PROFILES};
use crate::ctx::Context;
use crate::error::Result;

const PRODUCT_TYPE: &str = "com.apple.product-type.application";

fn config_key(owner: &str, profile: Profile) -> Key {
  match (owner, profile) {
    ("PBXProject", Profile::Debug)   => Key::named("config_project_debug"),
    ("PBXProject", Profile::Release) => Key::named("config_project_release"),
    (_,            Profile::Debug)   => Key::named("config_target_debug"),
    (_,            Profile::Release) => Key::named("config_target_release")
  }
}

fn config_list<F>(catalog: &mut Catalog, key: &'static str, owner_isa: &'static str,
                  owner_name: &str, settings: F) -> Result<Id>
  where F: Fn(Profile) -> BuildSettings
{
  let mut configurations = Vec::with_capacity(PROFILES.len());
  for &profile in PROFILES {
    configurations.push(catalog.insert(config_key(owner_isa, profile),
                                       Entity::Configuration(Configuration {
      name:     profile.to_str(),
      settings: settings(profile)
    }))?);
  }

  catalog.insert(Key::named(key), Entity::ConfigurationList(ConfigurationList {
    owner_isa,
    configurations,
    owner_name: owner_name.to_string(),
    default:    DEFAULT_PROFILE.to_str()
  }))
}

/// Adds the configurations, the application target and the project object.
/// Returns the project identifier, the root of the graph.
pub fn assemble(catalog: &mut Catalog, ctx: &Context, tree: &Tree, phases: &Phases,
                product: Id) -> Result<Id>
{
  let project = &ctx.project;
  let name    = &*project.name;

  let info_plist = match ctx.source_rel().as_str() {
    ""  => super::INFO_PLIST.to_string(),
    rel => [rel, "/", super::INFO_PLIST].join("")
  };

  let project_cfgs = config_list(catalog, "config_list_project", "PBXProject", name,
                                 |p| settings::project(p, project))?;
  let target_cfgs  = config_list(catalog, "config_list_target", "PBXNativeTarget", name,
                                 |_| settings::target(project, &info_plist))?;

  let target = catalog.insert(Key::named("target"), Entity::Target(Target {
    name:         name.to_string(),
    config_list:  target_cfgs,
    phases:       phases.ids(),
    product,
    product_type: PRODUCT_TYPE
  }))?;

  catalog.insert(Key::named("project"), Entity::Project(Project {
    config_list:    project_cfgs,
    main_group:     tree.main,
    products_group: tree.products,
    targets:        vec![target]
  }))
}
