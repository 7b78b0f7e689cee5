use std::fmt;

/// A 96-bit object identifier, written as 24 uppercase hex characters.
///
/// Identifiers are derived from a semantic key instead of being random so
/// regenerating a project only changes the objects whose keys changed.
/// Truncating the digest means two keys may collide; the catalog refuses to
/// insert a colliding key rather than silently merging objects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id([u8; 12]);

impl Id {
  pub fn from_key(key: &str) -> Self {
    let digest = md5::compute(key.as_bytes());
    let mut bytes = [0u8; 12];
    bytes.copy_from_slice(&digest.0[..12]);
    Id(bytes)
  }
}

impl fmt::Display for Id {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    let mut s = String::with_capacity(24);
    for b in &self.0 {
      s.push(hex_char(b >> 4));
      s.push(hex_char(b & 0xF));
    }
    f.write_str(&s)
  }
}

fn hex_char(b: u8) -> char {
  match b < 10 {
    true  => (b'0' + b)        as char,
    false => (b'A' + (b - 10)) as char
  }
}

/// The semantic key an identifier is derived from.
///
/// Fixed objects use a plain name (`main_group`); per-file objects use
/// `role:path` (`fileref:Core/App.swift`). Names never contain `:` so the two
/// forms cannot produce the same key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Key(String);

impl Key {
  pub fn named(name: &'static str) -> Self {
    debug_assert!(!name.contains(':'));
    Key(name.to_string())
  }

  fn role(role: &'static str, path: &str) -> Self {
    Key([role, ":", path].join(""))
  }

  pub fn file_ref(path: &str) -> Self {
    Key::role("fileref", path)
  }

  pub fn build_file(path: &str) -> Self {
    Key::role("buildfile", path)
  }

  pub fn group(name: &str) -> Self {
    Key::role("group", name)
  }

  pub fn id(&self) -> Id {
    Id::from_key(&self.0)
  }

  pub fn as_str(&self) -> &'_ str {
    &self.0
  }
}
