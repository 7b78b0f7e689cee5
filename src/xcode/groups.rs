//! The group tree shown in the project navigator.
//!
//! Two levels only: the main group holds one group per category (the first
//! directory of a source path), then the entry-point files found directly in
//! the source root, then the scaffold files and the products group. Deeper
//! directories are not mirrored; their files sit in the category group with a
//! path relative to it.

use super::catalog::{Catalog, Entity, Group};
use super::id::{Id, Key};
use super::Scaffold;
use crate::ctx::SourceFile;
use crate::error::Result;

pub struct Tree {
  pub main:       Id,
  pub products:   Id,
  pub categories: Vec<Id>
}

struct Category<'a> {
  name:    &'a str,
  members: Vec<Id>
}

/// Pinned categories come first in declared order and exist even without
/// members. Other categories follow sorted by name.
fn partition<'a>(files: &'a [SourceFile], pinned: &[&'a str]) -> (Vec<Category<'a>>, Vec<Id>) {
  let mut categories: Vec<Category<'a>> = Vec::with_capacity(pinned.len());
  for &name in pinned {
    if !categories.iter().any(|c| c.name == name) {
      categories.push(Category { name, members: Vec::new() });
    }
  }

  let num_pinned = categories.len();
  let mut entry_points = Vec::new();

  for file in files {
    let id = Key::file_ref(&file.path).id();
    match file.category() {
      None       => entry_points.push(id),
      Some(name) => match categories.iter().position(|c| c.name == name) {
        Some(i) => categories[i].members.push(id),
        None    => categories.push(Category { name, members: vec![id] })
      }
    }
  }

  categories[num_pinned..].sort_by(|a, b| a.name.cmp(b.name));
  (categories, entry_points)
}

pub fn build(catalog: &mut Catalog, files: &[SourceFile], pinned: &[&str],
             scaffold: &Scaffold, source_rel: &str) -> Result<Tree>
{
  let (categories, entry_points) = partition(files, pinned);

  let products_key = Key::named("products_group");
  let category_ids: Vec<Id> = categories.iter().map(|c| Key::group(c.name).id()).collect();

  let mut children = category_ids.clone();
  children.extend(entry_points);
  children.extend(scaffold.group_files());
  children.push(products_key.id());

  let main = catalog.insert(Key::named("main_group"), Entity::Group(Group {
    main:     true,
    name:     None,
    path:     match source_rel.is_empty() {
      true  => None,
      false => Some(source_rel.to_string())
    },
    children
  }))?;

  let products = catalog.insert(products_key, Entity::Group(Group {
    main:     false,
    name:     Some("Products".to_string()),
    path:     None,
    children: vec![scaffold.product]
  }))?;

  for category in categories {
    tracing::debug!(category = category.name, files = category.members.len(), "group");
    catalog.insert(Key::group(category.name), Entity::Group(Group {
      main:     false,
      name:     None,
      path:     Some(category.name.to_string()),
      children: category.members
    }))?;
  }

  Ok(Tree { main, products, categories: category_ids })
}
