use super::catalog::{Catalog, Entity, FileType};
use super::plist::{Ref, Str, Writer};
use super::settings::Setting;

/// Sections in the order Xcode writes them. Sections without objects are
/// left out.
const SECTIONS: &[&str] = &[
  "PBXBuildFile",
  "PBXFileReference",
  "PBXFrameworksBuildPhase",
  "PBXGroup",
  "PBXNativeTarget",
  "PBXProject",
  "PBXResourcesBuildPhase",
  "PBXSourcesBuildPhase",
  "XCBuildConfiguration",
  "XCConfigurationList"
];

const OBJECT_VERSION: &str = "56";

/// Renders the whole descriptor. Objects keep their catalog order within each
/// section so unchanged objects stay on the same lines between runs.
pub fn render(catalog: &Catalog) -> String {
  let mut w = Writer::new();
  w.begin_document();
  w.field("archiveVersion", 1);
  w.begin_map("classes");
  w.end_map();
  w.field("objectVersion", OBJECT_VERSION);
  w.begin_map("objects");

  for &section in SECTIONS {
    let mut objects = catalog.iter().filter(|(_, e)| e.isa() == section).peekable();
    if objects.peek().is_none() {
      continue;
    }

    w.begin_section(section);
    for (id, entity) in objects {
      write_object(&mut w, catalog, Ref { id, comment: entity.comment() }, entity);
    }
    w.end_section(section);
  }

  w.end_map();
  if let Some(root) = catalog.root() {
    w.field("rootObject", catalog.reference(root));
  }
  w.end_document();
  w.finish()
}

fn refs<'a>(catalog: &'a Catalog, ids: &'a [super::id::Id]) -> impl Iterator<Item = Ref<'a>> {
  ids.iter().map(move |&id| catalog.reference(id))
}

fn write_object(w: &mut Writer, catalog: &Catalog, r: Ref, entity: &Entity) {
  match entity {
    Entity::BuildFile(b) => {
      w.begin_inline(&r);
      w.string("isa", entity.isa());
      w.field("fileRef", catalog.reference(b.file_ref));
      w.end_map();
    },

    Entity::FileReference(f) => {
      w.begin_inline(&r);
      w.string("isa", entity.isa());
      match f.file_type {
        FileType::Known(t)    => w.string("lastKnownFileType", t),
        FileType::Explicit(t) => {
          w.string("explicitFileType", t);
          w.field("includeInIndex", 0);
        }
      }
      if let Some(name) = &f.name {
        w.string("name", name);
      }
      w.string("path", &f.path);
      w.string("sourceTree", f.source_tree.as_str());
      w.end_map();
    },

    Entity::Group(g) => {
      w.begin_object(&r);
      w.string("isa", entity.isa());
      w.list("children", refs(catalog, &g.children));
      if let Some(name) = &g.name {
        w.string("name", name);
      }
      if let Some(path) = &g.path {
        w.string("path", path);
      }
      w.string("sourceTree", "<group>");
      w.end_map();
    },

    Entity::Phase(p) => {
      w.begin_object(&r);
      w.string("isa", entity.isa());
      w.field("buildActionMask", 2_147_483_647u32);
      w.list("files", refs(catalog, &p.files));
      w.field("runOnlyForDeploymentPostprocessing", 0);
      w.end_map();
    },

    Entity::Target(t) => {
      w.begin_object(&r);
      w.string("isa", entity.isa());
      w.field("buildConfigurationList", catalog.reference(t.config_list));
      w.list("buildPhases", refs(catalog, &t.phases));
      w.list("buildRules", Vec::<Str>::new());
      w.list("dependencies", Vec::<Str>::new());
      w.string("name", &t.name);
      w.string("productName", &t.name);
      w.field("productReference", catalog.reference(t.product));
      w.string("productType", t.product_type);
      w.end_map();
    },

    Entity::Project(p) => {
      w.begin_object(&r);
      w.string("isa", entity.isa());
      w.begin_map("attributes");
      w.field("BuildIndependentTargetsInParallel", 1);
      w.field("LastSwiftUpdateCheck", 1500);
      w.field("LastUpgradeCheck", 1500);
      w.begin_map("TargetAttributes");
      for &target in &p.targets {
        w.begin_map(target);
        w.field("CreatedOnToolsVersion", "15.0");
        w.end_map();
      }
      w.end_map();
      w.end_map();
      w.field("buildConfigurationList", catalog.reference(p.config_list));
      w.string("compatibilityVersion", "Xcode 14.0");
      w.string("developmentRegion", "en");
      w.field("hasScannedForEncodings", 0);
      w.list("knownRegions", vec![Str("en"), Str("Base")]);
      w.field("mainGroup", catalog.reference(p.main_group));
      w.field("productRefGroup", catalog.reference(p.products_group));
      w.string("projectDirPath", "");
      w.string("projectRoot", "");
      w.list("targets", refs(catalog, &p.targets));
      w.end_map();
    },

    Entity::Configuration(c) => {
      w.begin_object(&r);
      w.string("isa", entity.isa());
      w.begin_map("buildSettings");
      for (key, setting) in &c.settings {
        match setting {
          Setting::Value(v)  => w.string(key, v),
          Setting::List(vs) => w.list(key, vs.iter().map(|v| Str(v)))
        }
      }
      w.end_map();
      w.string("name", c.name);
      w.end_map();
    },

    Entity::ConfigurationList(l) => {
      w.begin_object(&r);
      w.string("isa", entity.isa());
      w.list("buildConfigurations", refs(catalog, &l.configurations));
      w.field("defaultConfigurationIsVisible", 0);
      w.string("defaultConfigurationName", l.default);
      w.end_map();
    }
  }
}
