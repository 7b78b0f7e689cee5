//! Project generator for Xcode.
//!
//! Xcode uses the NeXTSTEP property list format. The entire project is stored
//! in a single file named "project.pbxproj", short for Project Builder XCode
//! Project. This file lives in a folder named after the project with the
//! "xcodeproj" extension.
//!
//! This property list format provides the following data types:
//! - Number:     42
//! - String:     "contents"
//! - Array:      ( element, ... )
//! - Dictionary: { key = value; ... }
//!
//! Comments of the form /* contents */ follow every object identifier. Xcode
//! does not need them, but writes them itself, so emitting them keeps the file
//! stable when the project is later saved from Xcode.
//!
//! The file holds a single root dictionary whose "objects" entry maps every
//! object identifier to its properties. Objects are grouped by their "isa"
//! type, with banner comments between groups:
//!
//! ```text
//! /* Begin <SECTION-NAME> section */
//! <OBJECT-ID> /* <OBJECT-NAME> */ = <OBJECT-PROPERTIES-DICTIONARY>;
//! ...
//! /* End <SECTION-NAME> section */
//! ```
//!
//! Identifiers are 96-bit hexadecimal strings. They are derived from what each
//! object represents rather than drawn at random, so running the generator
//! again over the same sources rewrites the same file byte for byte, and adding
//! a file only adds the lines describing it.
//!
//! Generation runs in stages, each reading what the previous ones put in the
//! catalog:
//! - source files: one PBXFileReference and one PBXBuildFile each
//! - scaffold: the product, Info.plist, the asset catalog and Config.plist
//! - groups: main group, one group per category, Products
//! - phases: Sources, Frameworks, Resources
//! - target: configurations, configuration lists, the target and the project
//!
//! References:
//! - https://en.wikipedia.org/wiki/Property_list
//! - http://monoobjc.net/xcode-project-file-format.html

mod catalog;
mod groups;
mod id;
mod phases;
mod plist;
mod serialize;
mod settings;
mod target;

use std::fs;
use std::path::{Path, PathBuf};

use crate::ctx::{Context, SourceFile};
use crate::error::{Error, Result};

use self::catalog::{BuildFile, Catalog, Entity, FileReference, FileType, PhaseKind, SourceTree};
use self::id::{Id, Key};

use self::serialize::render;

pub const INFO_PLIST:   &str = "Info.plist";
pub const ASSETS:       &str = "Assets.xcassets";
pub const CONFIG_PLIST: &str = "Config.plist";

/// Fixed file references present in every project.
pub struct Scaffold {
  pub product:      Id,
  pub info_plist:   Id,
  pub assets:       Id,
  pub config_plist: Id
}

impl Scaffold {
  /// Scaffold files listed in the main group, in display order.
  pub fn group_files(&self) -> Vec<Id> {
    vec![self.info_plist, self.assets, self.config_plist]
  }
}

fn get_file_type(name: &str) -> &'static str {
  match Path::new(name).extension().and_then(|x| x.to_str()).unwrap_or("") {
    "swift"        => "sourcecode.swift",
    "h"            => "sourcecode.c.h",
    "c"            => "sourcecode.c",
    "cc" | "cpp"   => "sourcecode.cpp.cpp",
    "m"            => "sourcecode.c.objc",
    "mm"           => "sourcecode.cpp.objcpp",
    "metal"        => "sourcecode.metal",
    "plist"        => "text.plist.xml",
    "xcassets"     => "folder.assetcatalog",
    &_             => "text"
  }
}

fn file_ref(path: &str, name: Option<&str>, file_type: FileType, source_tree: SourceTree) -> Entity {
  Entity::FileReference(FileReference {
    file_type,
    source_tree,
    name: name.map(str::to_string),
    path: path.to_string()
  })
}

/// One file reference and one build file per source, in discovery order.
/// Every discovered file is compiled, whatever its extension.
fn add_sources(catalog: &mut Catalog, files: &[SourceFile]) -> Result<()> {
  for file in files {
    let pbx_type = get_file_type(file.name());
    let path     = file.category_path();
    let name = match path == file.name() {
      true  => None,
      false => Some(file.name())
    };

    let ref_id = catalog.insert(Key::file_ref(&file.path),
                                file_ref(path, name, FileType::Known(pbx_type), SourceTree::Group))?;
    catalog.insert(Key::build_file(&file.path), Entity::BuildFile(BuildFile {
      file_ref: ref_id,
      name:     file.name().to_string(),
      phase:    PhaseKind::Sources
    }))?;
  }
  Ok(())
}

fn add_scaffold(catalog: &mut Catalog, ctx: &Context) -> Result<Scaffold> {
  let product_name = [&*ctx.project.name, ".app"].join("");
  let product = catalog.insert(Key::named("app_product"),
                               file_ref(&product_name, None,
                                        FileType::Explicit("wrapper.application"),
                                        SourceTree::BuiltProducts))?;

  let mut known = |key: &'static str, name: &str| {
    let pbx_type = FileType::Known(get_file_type(name));
    catalog.insert(Key::named(key), file_ref(name, None, pbx_type, SourceTree::Group))
  };

  let info_plist   = known("info_plist",   INFO_PLIST)?;
  let assets       = known("assets",       ASSETS)?;
  let config_plist = known("config_plist", CONFIG_PLIST)?;

  let resources = [
    ("buildfile_assets", ASSETS,       assets),
    ("buildfile_config", CONFIG_PLIST, config_plist)
  ];
  for &(key, name, ref_id) in &resources {
    catalog.insert(Key::named(key), Entity::BuildFile(BuildFile {
      file_ref: ref_id,
      name:     name.to_string(),
      phase:    PhaseKind::Resources
    }))?;
  }

  Ok(Scaffold { product, info_plist, assets, config_plist })
}

/// Builds the full object graph for the given sources.
pub fn build(ctx: &Context, files: &[SourceFile]) -> Result<Catalog> {
  let mut catalog = Catalog::new();

  add_sources(&mut catalog, files)?;
  let scaffold = add_scaffold(&mut catalog, ctx)?;
  let tree     = groups::build(&mut catalog, files, ctx.project.categories,
                               &scaffold, &ctx.source_rel())?;
  let phases   = phases::assemble(&mut catalog)?;
  target::assemble(&mut catalog, ctx, &tree, &phases, scaffold.product)?;

  tracing::info!(objects = catalog.len(), groups = tree.categories.len(), "project graph built");
  Ok(catalog)
}

/// Replaces `path` with `contents` in one step. The document is written next
/// to its destination and renamed over it, so a failed write never leaves a
/// truncated project behind.
fn write_atomic(path: &Path, contents: &str) -> Result<()> {
  if let Some(dir) = path.parent() {
    fs::create_dir_all(dir).map_err(|e| Error::write(dir, e))?;
  }

  let mut tmp = path.as_os_str().to_owned();
  tmp.push(".tmp");
  let tmp = PathBuf::from(tmp);

  if let Err(e) = fs::write(&tmp, contents).and_then(|_| fs::rename(&tmp, path)) {
    let _ = fs::remove_file(&tmp);
    return Err(Error::write(path, e));
  }
  Ok(())
}

/// Builds, renders and writes the project. Returns the number of bytes written.
pub fn generate(ctx: &Context, files: &[SourceFile]) -> Result<usize> {
  let catalog = build(ctx, files)?;
  let text    = render(&catalog);
  let path    = ctx.output_path();

  write_atomic(&path, &text)?;
  tracing::info!(path = %path.display(), bytes = text.len(), "project written");
  Ok(text.len())
}

#[cfg(test)]
mod tests;
