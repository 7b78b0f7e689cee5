//! Writer for the NeXTSTEP property list text syntax.
//!
//! All quoting, comment and indentation rules live here so the serializer
//! only describes which fields an object has.

use std::borrow::Cow;
use std::fmt;

use super::id::Id;

/// Quotes a string unless it only holds characters Xcode writes bare.
pub fn quote(s: &str) -> Cow<'_, str> {
  let bare = !s.is_empty() && s.chars().all(|c| {
    c.is_ascii_alphanumeric() || c == '_' || c == '$' || c == '.' || c == '/'
  });

  match bare {
    true  => Cow::Borrowed(s),
    false => {
      let mut out = String::with_capacity(s.len() + 2);
      out.push('"');
      for c in s.chars() {
        match c {
          '"'  => out.push_str("\\\""),
          '\\' => out.push_str("\\\\"),
          '\n' => out.push_str("\\n"),
          '\t' => out.push_str("\\t"),
          _    => out.push(c)
        }
      }
      out.push('"');
      Cow::Owned(out)
    }
  }
}

/// An identifier followed by its inline comment.
pub struct Ref<'a> {
  pub id:      Id,
  pub comment: Option<Cow<'a, str>>
}

impl fmt::Display for Ref<'_> {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match &self.comment {
      None    => write!(f, "{}", self.id),
      // A stray terminator would end the comment early.
      Some(c) => write!(f, "{} /* {} */", self.id, c.replace("*/", "* /"))
    }
  }
}

/// A quoted-as-needed string value.
pub struct Str<'a>(pub &'a str);

impl fmt::Display for Str<'_> {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.write_str(&quote(self.0))
  }
}

/// Builds the document text. Objects opened with `begin_inline` are written
/// on a single line, everything else one field per line.
pub struct Writer {
  buf:    String,
  depth:  usize,
  /// Depth of the enclosing single-line object, if any.
  inline: Option<usize>
}

impl Writer {
  pub fn new() -> Self {
    Writer {
      buf:    String::new(),
      depth:  0,
      inline: None
    }
  }

  pub fn finish(self) -> String {
    self.buf
  }

  fn indent(&mut self) {
    for _ in 0..self.depth {
      self.buf.push('\t');
    }
  }

  fn is_inline(&self) -> bool {
    self.inline.is_some()
  }

  fn start(&mut self) {
    if !self.is_inline() {
      self.indent();
    }
  }

  fn end(&mut self) {
    match self.is_inline() {
      true  => self.buf.push(' '),
      false => self.buf.push('\n')
    }
  }

  pub fn begin_document(&mut self) {
    self.buf.push_str("// !$*UTF8*$!\n{\n");
    self.depth = 1;
  }

  pub fn end_document(&mut self) {
    self.depth = 0;
    self.buf.push_str("}\n");
  }

  pub fn begin_section(&mut self, isa: &str) {
    self.buf.push_str("\n/* Begin ");
    self.buf.push_str(isa);
    self.buf.push_str(" section */\n");
  }

  pub fn end_section(&mut self, isa: &str) {
    self.buf.push_str("/* End ");
    self.buf.push_str(isa);
    self.buf.push_str(" section */\n");
  }

  /// Opens a nested dictionary under `key`.
  pub fn begin_map<K: fmt::Display>(&mut self, key: K) {
    self.start();
    self.buf.push_str(&key.to_string());
    self.buf.push_str(" = {");
    match self.is_inline() {
      true  => {},
      false => self.buf.push('\n')
    }
    self.depth += 1;
  }

  /// Opens an object written across several lines.
  pub fn begin_object(&mut self, r: &Ref) {
    self.begin_map(r);
  }

  /// Opens an object written on one line. Nested maps and lists inside it are
  /// inlined as well.
  pub fn begin_inline(&mut self, r: &Ref) {
    self.indent();
    self.buf.push_str(&r.to_string());
    self.buf.push_str(" = {");
    self.inline = Some(self.depth);
    self.depth += 1;
  }

  /// Closes the innermost map or object.
  pub fn end_map(&mut self) {
    self.depth -= 1;
    self.start();
    self.buf.push_str("};");
    if self.inline == Some(self.depth) {
      self.inline = None;
    }
    self.end();
  }

  /// Writes `key = value;` where the value is already rendered.
  pub fn field<V: fmt::Display>(&mut self, key: &str, value: V) {
    self.start();
    self.buf.push_str(key);
    self.buf.push_str(" = ");
    self.buf.push_str(&value.to_string());
    self.buf.push(';');
    self.end();
  }

  /// Writes `key = value;` quoting the value as needed.
  pub fn string(&mut self, key: &str, value: &str) {
    self.field(key, Str(value));
  }

  /// Writes `key = ( item, ... );` with one item per line.
  pub fn list<I>(&mut self, key: &str, items: I)
  where I: IntoIterator, I::Item: fmt::Display
  {
    self.start();
    self.buf.push_str(key);
    self.buf.push_str(" = (");
    match self.is_inline() {
      true => {
        for item in items {
          self.buf.push_str(&item.to_string());
          self.buf.push_str(", ");
        }
      },
      false => {
        self.buf.push('\n');
        self.depth += 1;
        for item in items {
          self.indent();
          self.buf.push_str(&item.to_string());
          self.buf.push_str(",\n");
        }
        self.depth -= 1;
        self.indent();
      }
    }
    self.buf.push_str(");");
    self.end();
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::xcode::id::Key;

  #[test]
  fn quoting_rules() {
    assert_eq!(quote("YES"), "YES");
    assert_eq!(quote("wrapper.application"), "wrapper.application");
    assert_eq!(quote("Kilwinning/Info.plist"), "Kilwinning/Info.plist");
    assert_eq!(quote("BUILT_PRODUCTS_DIR"), "BUILT_PRODUCTS_DIR");
    assert_eq!(quote(""), "\"\"");
    assert_eq!(quote("<group>"), "\"<group>\"");
    assert_eq!(quote("gnu++20"), "\"gnu++20\"");
    assert_eq!(quote("dwarf-with-dsym"), "\"dwarf-with-dsym\"");
    assert_eq!(quote("$(TARGET_NAME)"), "\"$(TARGET_NAME)\"");
    assert_eq!(quote("Xcode 14.0"), "\"Xcode 14.0\"");
    assert_eq!(quote("Città.swift"), "\"Città.swift\"");
    assert_eq!(quote("say \"hi\""), "\"say \\\"hi\\\"\"");
  }

  #[test]
  fn references_carry_comments() {
    let id = Key::named("main_group").id();
    assert_eq!(Ref { id, comment: None }.to_string(), "5928955287B8089ED2177128");
    assert_eq!(Ref { id, comment: Some("Core".into()) }.to_string(),
               "5928955287B8089ED2177128 /* Core */");
    assert_eq!(Ref { id, comment: Some("a*/b".into()) }.to_string(),
               "5928955287B8089ED2177128 /* a* /b */");
  }

  #[test]
  fn inline_object_on_one_line() {
    let id = Key::named("main_group").id();
    let mut w = Writer::new();
    w.begin_document();
    w.begin_map("objects");
    w.begin_inline(&Ref { id, comment: Some("A.swift".into()) });
    w.string("isa", "PBXFileReference");
    w.string("path", "A.swift");
    w.string("sourceTree", "<group>");
    w.end_map();
    w.end_map();
    w.end_document();

    assert_eq!(w.finish(), concat!(
      "// !$*UTF8*$!\n",
      "{\n",
      "\tobjects = {\n",
      "\t\t5928955287B8089ED2177128 /* A.swift */ = {isa = PBXFileReference; ",
      "path = A.swift; sourceTree = \"<group>\"; };\n",
      "\t};\n",
      "}\n"));
  }

  #[test]
  fn block_object_with_list_and_map() {
    let id = Key::named("main_group").id();
    let mut w = Writer::new();
    w.begin_document();
    w.begin_map("objects");
    w.begin_object(&Ref { id, comment: None });
    w.string("isa", "PBXGroup");
    w.list("children", vec![Str("One"), Str("Two words")]);
    w.list("empty", Vec::<Str>::new());
    w.begin_map("attributes");
    w.field("LastUpgradeCheck", 1500);
    w.end_map();
    w.end_map();
    w.end_map();
    w.end_document();

    assert_eq!(w.finish(), concat!(
      "// !$*UTF8*$!\n",
      "{\n",
      "\tobjects = {\n",
      "\t\t5928955287B8089ED2177128 = {\n",
      "\t\t\tisa = PBXGroup;\n",
      "\t\t\tchildren = (\n",
      "\t\t\t\tOne,\n",
      "\t\t\t\t\"Two words\",\n",
      "\t\t\t);\n",
      "\t\t\tempty = (\n",
      "\t\t\t);\n",
      "\t\t\tattributes = {\n",
      "\t\t\t\tLastUpgradeCheck = 1500;\n",
      "\t\t\t};\n",
      "\t\t};\n",
      "\t};\n",
      "}\n"));
  }

  #[test]
  fn sections_are_bannered() {
    let mut w = Writer::new();
    w.begin_section("PBXGroup");
    w.end_section("PBXGroup");
    assert_eq!(w.finish(), "\n/* Begin PBXGroup section */\n/* End PBXGroup section */\n");
  }
}
