//! Toolchain bootstrap CLI.
//!
//! Usage: codec-toolchain [OPTIONS] [COMMAND]
//!
//! With no command this runs the full sequence: check build tools, clone
//! every pinned source repository, and build everything in manifest order
//! with FFmpeg last.

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::{error, info};

use codec_toolchain::driver::{Driver, Workspace};
use codec_toolchain::fetch::clone_if_missing;
use codec_toolchain::manifest::Manifest;
use codec_toolchain::platform::{cpu_cores, OsKind};
use codec_toolchain::tools::check_host_tools;
use codec_toolchain::Result;

#[derive(Parser)]
#[command(name = "codec-toolchain", version, about)]
struct Cli {
  /// Workspace root holding sources/ and build/
  #[arg(long, default_value = "toolchain")]
  root: PathBuf,

  /// Parallel make jobs (defaults to the CPU core count)
  #[arg(long)]
  jobs: Option<usize>,

  /// JSON manifest overriding the builtin recipe matrix
  #[arg(long)]
  manifest: Option<PathBuf>,

  /// Include optional hardware-codec SDK recipes
  #[arg(long)]
  hwaccel: bool,

  /// Verbose output (log every command before it runs)
  #[arg(short, long)]
  verbose: bool,

  #[command(subcommand)]
  command: Option<Cmd>,
}

#[derive(Subcommand)]
enum Cmd {
  /// Check tools, fetch all sources, build everything (the default)
  All,
  /// Check/install the required build tools only
  Tools,
  /// Clone one recipe's source, or all of them
  Fetch { name: Option<String> },
  /// Build one recipe, or all of them in manifest order
  Build { name: Option<String> },
  /// Print the command plan without executing anything
  Plan { name: Option<String> },
  /// Remove all compile products (sources are kept)
  Clean,
}

fn main() -> ExitCode {
  let cli = Cli::parse();

  env_logger::Builder::from_env(
    env_logger::Env::default().default_filter_or(if cli.verbose { "debug" } else { "info" }),
  )
  .format_timestamp(None)
  .init();

  match run(cli) {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      error!("{}", err);
      ExitCode::FAILURE
    }
  }
}

fn print_plan(driver: &Driver, recipe: &codec_toolchain::manifest::Recipe) {
  println!("[{}]", recipe.name);
  for step in driver.plan(recipe) {
    println!("  {}", step);
  }
}

fn run(cli: Cli) -> Result<()> {
  let os = OsKind::detect();
  let jobs = cli.jobs.unwrap_or_else(cpu_cores);

  let manifest = match &cli.manifest {
    Some(path) => Manifest::from_path(path)?,
    None => Manifest::builtin(),
  };

  // Commands run from each source dir, so the install prefixes baked into
  // configure flags must be absolute.
  let root = if cli.root.is_absolute() {
    cli.root.clone()
  } else {
    env::current_dir()?.join(&cli.root)
  };
  let workspace = Workspace::new(root);
  let driver = Driver::new(workspace, os, jobs);

  info!("building for: {} ({} jobs)", os, jobs);

  match cli.command.unwrap_or(Cmd::All) {
    Cmd::All => {
      check_host_tools(os)?;
      for recipe in manifest.selected(cli.hwaccel) {
        clone_if_missing(recipe, &driver.workspace().source_dir(&recipe.name))?;
      }
      for recipe in manifest.selected(cli.hwaccel) {
        driver.build(recipe)?;
      }
      info!("all dependencies built successfully");
    }
    Cmd::Tools => {
      check_host_tools(os)?;
    }
    Cmd::Fetch { name } => match name {
      Some(name) => {
        let recipe = manifest.get(&name)?;
        clone_if_missing(recipe, &driver.workspace().source_dir(&recipe.name))?;
      }
      None => {
        for recipe in manifest.selected(cli.hwaccel) {
          clone_if_missing(recipe, &driver.workspace().source_dir(&recipe.name))?;
        }
      }
    },
    Cmd::Build { name } => match name {
      Some(name) => driver.build(manifest.get(&name)?)?,
      None => {
        for recipe in manifest.selected(cli.hwaccel) {
          driver.build(recipe)?;
        }
      }
    },
    Cmd::Plan { name } => match name {
      Some(name) => print_plan(&driver, manifest.get(&name)?),
      None => {
        for recipe in manifest.selected(cli.hwaccel) {
          print_plan(&driver, recipe);
        }
      }
    },
    Cmd::Clean => {
      for recipe in &manifest.recipes {
        driver.clean(recipe)?;
      }
    }
  }

  Ok(())
}
