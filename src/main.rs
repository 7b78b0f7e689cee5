mod ctx;
mod discover;
mod error;
mod xcode;

use clap::{Arg, App};
use std::fmt::Display;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::Level;

fn main() {
  // Parse the command line.
  let args = App::new(env!("CARGO_PKG_NAME"))
    .version(env!("CARGO_PKG_VERSION"))
    .author(env!("CARGO_PKG_AUTHORS"))
    .about(env!("CARGO_PKG_DESCRIPTION"))
    .arg(Arg::with_name("ROOT")
         .help("Project root containing the source folder [default: current directory]"))
    .arg(Arg::with_name("config")
         .short("c")
         .long("config")
         .value_name("FILE")
         .help("Manifest file, relative to the project root")
         .takes_value(true))
    .arg(Arg::with_name("v")
         .short("v")
         .multiple(true)
         .help("Verbosity level"))
    .get_matches();

  init_logging(args.occurrences_of("v"));

  let root_dir = match args.value_of("ROOT") {
    Some(dir) => PathBuf::from(dir),
    None      => std::env::current_dir().check(|| "Failed to read the current directory")
  };
  let root_dir = root_dir.canonicalize()
    .check(|| format!("Failed to resolve project root ({:?})", root_dir));

  // Load the project's manifest, if any.
  let (path, explicit) = match args.value_of("config") {
    Some(file) => (root_dir.join(file), true),
    None       => (root_dir.join(ctx::MANIFEST_NAME), false)
  };
  let bytes = read_manifest(&path, explicit)
    .check(|| format!("Failed to open manifest ({:?})", path));
  let manifest = match &bytes {
    Some(bytes) => ctx::Manifest::parse(bytes, &path).check(|| "Invalid manifest"),
    None        => ctx::Manifest::default()
  };

  ctx::is_supported(manifest.info.min_version).check(|| "Min version check failed");

  let ctx = ctx::Context::new(root_dir, &manifest.info);
  tracing::debug!(project = ?ctx.project, "resolved manifest");

  let files = discover::find_sources(&ctx.source_dir, ctx.project.source_extension)
    .check(|| "Source discovery failed");

  xcode::generate(&ctx, &files).check(|| "Project generation failed");

  println!("Generated {}", ctx.output_path().display());
  println!("  source files:      {}", files.len());
  println!("  bundle identifier: {}", ctx.project.bundle_identifier);
  println!("  deployment target: iOS {}", ctx.project.deployment_target);
}

fn init_logging(verbosity: u64) {
  let level = match verbosity {
    0 => Level::WARN,
    1 => Level::INFO,
    2 => Level::DEBUG,
    _ => Level::TRACE
  };

  tracing_subscriber::fmt()
    .with_max_level(level)
    .with_target(false)
    .with_writer(std::io::stderr)
    .init();
}

/// Reads the manifest bytes. A missing manifest is only an error when it was
/// named on the command line.
fn read_manifest(path: &Path, explicit: bool) -> ctx::DynResult<Option<Vec<u8>>> {
  match std::fs::read(path) {
    Ok(bytes)                                             => Ok(Some(bytes)),
    Err(e) if e.kind() == ErrorKind::NotFound && !explicit => {
      tracing::info!(path = %path.display(), "no manifest, using defaults");
      Ok(None)
    },
    Err(e) => Err(Box::new(e))
  }
}

trait Check {
  type R;
  fn check<F, S>(self, msg: F) -> Self::R where F: FnOnce() -> S, S: Display;
}

impl<T, E> Check for Result<T, E> where E: Display {
  type R = T;
  fn check<F, S>(self, msg: F) -> Self::R where F: FnOnce() -> S, S: Display {
    match self {
      Ok (v) => v,
      Err(e) => fatal(format!("{}: {}", msg(), e))
    }
  }
}

fn fatal<S: Display>(msg: S) -> ! {
  eprintln!("{}", msg);
  std::process::exit(1)
}
