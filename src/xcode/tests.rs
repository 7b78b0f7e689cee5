use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use super::*;
use crate::ctx::ProjectInfo;

fn sources(paths: &[&str]) -> Vec<SourceFile> {
  paths.iter().map(|&p| SourceFile::new(p)).collect()
}

fn render_project(root: &Path, paths: &[&str]) -> String {
  let info = ProjectInfo { name: Some("Demo"), ..ProjectInfo::default() };
  let ctx  = Context::new(root.to_path_buf(), &info);
  render(&build(&ctx, &sources(paths)).unwrap())
}

fn is_id(token: &str) -> bool {
  token.len() == 24 && token.chars().all(|c| c.is_ascii_digit() || ('A' ..= 'F').contains(&c))
}

/// Identifiers defined as objects, in document order.
fn definitions(text: &str) -> Vec<&str> {
  text.lines()
    .filter(|l| l.starts_with("\t\t") && !l.starts_with("\t\t\t"))
    .filter_map(|l| l.trim_start().get(..24))
    .filter(|t| is_id(t))
    .collect()
}

/// Every identifier token that is not an object definition.
fn references(text: &str) -> Vec<&str> {
  let mut out = Vec::new();
  for line in text.lines() {
    let mut tokens = line.split(|c: char| !c.is_ascii_alphanumeric()).filter(|t| is_id(t));
    let defines = line.starts_with("\t\t") && !line.starts_with("\t\t\t")
      && line.trim_start().get(..24).map_or(false, is_id);
    if defines {
      tokens.next();
    }
    out.extend(tokens);
  }
  out
}

fn object_line<'a>(text: &'a str, id: Id) -> &'a str {
  let prefix = format!("\t\t{}", id);
  text.lines()
    .find(|l| l.starts_with(&prefix))
    .unwrap_or_else(|| panic!("{} is not defined", id))
}

fn section<'a>(text: &'a str, isa: &str) -> &'a str {
  let begin = format!("/* Begin {} section */\n", isa);
  let end   = format!("/* End {} section */", isa);
  let start = text.find(&begin).unwrap_or_else(|| panic!("no {} section", isa)) + begin.len();
  let stop  = start + text[start..].find(&end).unwrap();
  &text[start..stop]
}

#[test]
fn two_categories_three_sources() {
  let dir  = tempfile::tempdir().unwrap();
  let text = render_project(dir.path(), &["A/One.x", "A/Two.x", "B/Three.x"]);

  let one   = Key::file_ref("A/One.x").id();
  let three = Key::file_ref("B/Three.x").id();
  assert_eq!(object_line(&text, one), format!(
    "\t\t{} /* One.x */ = {{isa = PBXFileReference; lastKnownFileType = text; \
     path = One.x; sourceTree = \"<group>\"; }};", one));
  assert_eq!(object_line(&text, Key::build_file("B/Three.x").id()), format!(
    "\t\t{} /* Three.x in Sources */ = {{isa = PBXBuildFile; fileRef = {} /* Three.x */; }};",
    Key::build_file("B/Three.x").id(), three));

  let groups = section(&text, "PBXGroup");
  let a = groups.find(&format!("{} /* A */ = {{", Key::group("A").id())).unwrap();
  let b = groups.find(&format!("{} /* B */ = {{", Key::group("B").id())).unwrap();
  assert!(a < b);
  assert!(groups[a..b].contains(&format!("\t\t\t\t{} /* One.x */,\n\t\t\t\t{} /* Two.x */,\n",
                                         one, Key::file_ref("A/Two.x").id())));
  assert!(groups[a..b].contains("\t\t\tpath = A;\n"));

  let phase = section(&text, "PBXSourcesBuildPhase");
  let names: Vec<&str> = phase.lines()
    .filter(|l| l.ends_with(" in Sources */,"))
    .map(|l| l.trim())
    .collect();
  assert_eq!(names.len(), 3);
  assert!(names[0].contains("One.x") && names[1].contains("Two.x") && names[2].contains("Three.x"));
}

#[test]
fn empty_project_is_complete() {
  let dir  = tempfile::tempdir().unwrap();
  let text = render_project(dir.path(), &[]);

  assert!(text.starts_with("// !$*UTF8*$!\n{\n\tarchiveVersion = 1;\n\tclasses = {\n\t};\n\
                            \tobjectVersion = 56;\n\tobjects = {\n"));
  assert!(text.ends_with(&format!("\trootObject = {} /* Project object */;\n}}\n",
                                  Key::named("project").id())));

  assert_eq!(definitions(section(&text, "PBXGroup")).len(), 2);
  assert!(section(&text, "PBXSourcesBuildPhase").contains("\t\t\tfiles = (\n\t\t\t);\n"));

  // Only the resource build files remain.
  let build_files: Vec<&str> = section(&text, "PBXBuildFile").lines().collect();
  assert_eq!(build_files.len(), 2);
  assert!(build_files[0].contains("Assets.xcassets in Resources"));
  assert!(build_files[1].contains("Config.plist in Resources"));
}

#[test]
fn sections_follow_the_fixed_order() {
  let dir  = tempfile::tempdir().unwrap();
  let text = render_project(dir.path(), &["App.x"]);

  let banners: Vec<&str> = text.lines()
    .filter(|l| l.starts_with("/* Begin "))
    .map(|l| &l["/* Begin ".len() .. l.len() - " section */".len()])
    .collect();
  assert_eq!(banners, vec![
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
  ]);
  for banner in text.lines().filter(|l| l.starts_with("/* ")) {
    assert!(text.contains(&format!("\n\n{}\n", banner)) || banner.starts_with("/* End "));
  }
}

#[test]
fn every_reference_resolves_to_one_definition() {
  let dir  = tempfile::tempdir().unwrap();
  let text = render_project(dir.path(), &["App.x", "Core/Store.x", "Views/Home.x", "Views/Rows/Row.x"]);

  let defined = definitions(&text);
  let mut seen = HashSet::new();
  for id in &defined {
    assert!(seen.insert(*id), "{} is defined twice", id);
  }

  let mut counts: HashMap<&str, usize> = HashMap::new();
  for id in references(&text) {
    assert!(seen.contains(id), "{} is referenced but never defined", id);
    *counts.entry(id).or_default() += 1;
  }
  for id in &defined {
    assert!(counts.contains_key(id), "{} is defined but never referenced", id);
  }
}

#[test]
fn nested_files_keep_their_names() {
  let dir  = tempfile::tempdir().unwrap();
  let text = render_project(dir.path(), &["Views/Rows/Row.x"]);
  let id   = Key::file_ref("Views/Rows/Row.x").id();
  assert!(object_line(&text, id).contains("name = Row.x; path = Rows/Row.x;"));
}

#[test]
fn adding_a_file_keeps_existing_lines() {
  let dir    = tempfile::tempdir().unwrap();
  let before = render_project(dir.path(), &["A/One.x", "B/Three.x"]);
  let after  = render_project(dir.path(), &["A/One.x", "A/Two.x", "B/Three.x"]);

  for path in &["A/One.x", "B/Three.x"] {
    for id in &[Key::file_ref(path).id(), Key::build_file(path).id()] {
      assert_eq!(object_line(&before, *id), object_line(&after, *id));
    }
  }
  assert_eq!(before, render_project(dir.path(), &["A/One.x", "B/Three.x"]));
}

#[test]
fn generate_is_idempotent() {
  let dir  = tempfile::tempdir().unwrap();
  let info = ProjectInfo { name: Some("Demo"), ..ProjectInfo::default() };
  let ctx  = Context::new(dir.path().to_path_buf(), &info);
  let files = sources(&["App.x", "Core/Store.x"]);

  let written = generate(&ctx, &files).unwrap();
  let first   = fs::read(ctx.output_path()).unwrap();
  assert_eq!(first.len(), written);

  generate(&ctx, &files).unwrap();
  assert_eq!(first, fs::read(ctx.output_path()).unwrap());

  let entries: Vec<_> = fs::read_dir(dir.path().join("Demo.xcodeproj")).unwrap()
    .map(|e| e.unwrap().file_name().into_string().unwrap())
    .collect();
  assert_eq!(entries, vec!["project.pbxproj"]);
}

#[test]
fn unwritable_destination_is_reported() {
  let dir = tempfile::tempdir().unwrap();
  fs::write(dir.path().join("Demo.xcodeproj"), b"not a directory").unwrap();

  let info = ProjectInfo { name: Some("Demo"), ..ProjectInfo::default() };
  let ctx  = Context::new(dir.path().to_path_buf(), &info);
  match generate(&ctx, &sources(&["App.x"])) {
    Err(Error::Write { .. }) => {},
    other => panic!("expected a write error, got {:?}", other)
  }
}

#[test]
fn catalog_has_no_dangling_references() {
  let dir  = tempfile::tempdir().unwrap();
  let info = ProjectInfo {
    name:       Some("Demo"),
    categories: vec!["Models"],
    ..ProjectInfo::default()
  };
  let ctx     = Context::new(dir.path().to_path_buf(), &info);
  let catalog = build(&ctx, &sources(&["App.x", "Core/Store.x"])).unwrap();

  for (id, entity) in catalog.iter() {
    for target in entity.references() {
      assert!(catalog.get(target).is_some(), "{} {} points at missing {}", entity.isa(), id, target);
    }
  }
  assert_eq!(catalog.root(), Some(Key::named("project").id()));
}

#[test]
fn failed_rename_removes_the_temporary_file() {
  let dir    = tempfile::tempdir().unwrap();
  let output = dir.path().join("Demo.xcodeproj").join("project.pbxproj");
  fs::create_dir_all(&output).unwrap();

  let info = ProjectInfo { name: Some("Demo"), ..ProjectInfo::default() };
  let ctx  = Context::new(dir.path().to_path_buf(), &info);
  match generate(&ctx, &sources(&["App.x"])) {
    Err(Error::Write { path, .. }) => assert_eq!(path, output),
    other => panic!("expected a write error, got {:?}", other)
  }

  assert!(output.is_dir());
  assert!(!dir.path().join("Demo.xcodeproj").join("project.pbxproj.tmp").exists());
}

#[test]
fn root_source_named_like_a_scaffold_file() {
  let dir  = tempfile::tempdir().unwrap();
  let info = ProjectInfo {
    name:             Some("Demo"),
    source_extension: Some("plist"),
    ..ProjectInfo::default()
  };
  let ctx  = Context::new(dir.path().to_path_buf(), &info);
  let text = render(&build(&ctx, &sources(&["Config.plist", "Core/Settings.plist"])).unwrap());

  let compiled = section(&text, "PBXSourcesBuildPhase");
  assert!(compiled.contains(&format!("{} /* Config.plist in Sources */,",
                                     Key::build_file("Config.plist").id())));
  let resources = section(&text, "PBXResourcesBuildPhase");
  assert!(resources.contains(&format!("{} /* Config.plist in Resources */,",
                                      Key::named("buildfile_config").id())));

  let defined = definitions(&text);
  let unique: HashSet<&str> = defined.iter().cloned().collect();
  assert_eq!(defined.len(), unique.len());
}
