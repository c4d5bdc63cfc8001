//! The generic fetch+build runner.
//!
//! A [`Driver`] turns a [`Recipe`] into a linear command plan (configure or
//! cmake generation, `make -jN`, `make install`, `make clean`) and executes
//! it step by step. Planning is separate from execution so a plan can be
//! printed or asserted against without touching the host.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use log::{debug, info};

use crate::error::{Error, Result};
use crate::manifest::{BuildSystem, Recipe};
use crate::platform::OsKind;

/// Directory layout of a toolchain workspace: checkouts under `sources/`,
/// per-recipe install prefixes under `build/`.
#[derive(Debug, Clone)]
pub struct Workspace {
  root: PathBuf,
}

impl Workspace {
  pub fn new(root: impl Into<PathBuf>) -> Self {
    Self { root: root.into() }
  }

  pub fn root(&self) -> &Path {
    &self.root
  }

  /// Checkout directory for a recipe.
  pub fn source_dir(&self, name: &str) -> PathBuf {
    self.root.join("sources").join(name)
  }

  /// Install prefix for a recipe's compile products.
  pub fn prefix(&self, name: &str) -> PathBuf {
    self.root.join("build").join(name)
  }
}

/// One external command in a build plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedCommand {
  pub program: String,
  pub args: Vec<String>,
  pub cwd: PathBuf,
}

impl PlannedCommand {
  fn new(program: &str, args: Vec<String>, cwd: &Path) -> Self {
    Self {
      program: program.to_string(),
      args,
      cwd: cwd.to_path_buf(),
    }
  }
}

impl fmt::Display for PlannedCommand {
  /// Shell-style rendering; arguments containing whitespace are quoted.
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.program)?;
    for arg in &self.args {
      if arg.contains(char::is_whitespace) {
        write!(f, " \"{}\"", arg)?;
      } else {
        write!(f, " {}", arg)?;
      }
    }
    Ok(())
  }
}

/// True when a directory exists and has at least one entry. Used for both
/// "checkout already cloned" and "recipe already built" short-circuits.
pub fn dir_is_populated(path: &Path) -> bool {
  match fs::read_dir(path) {
    Ok(mut entries) => entries.next().is_some(),
    Err(_) => false,
  }
}

/// Executes recipe build plans against a workspace.
pub struct Driver {
  workspace: Workspace,
  os: OsKind,
  jobs: usize,
}

impl Driver {
  pub fn new(workspace: Workspace, os: OsKind, jobs: usize) -> Self {
    Self { workspace, os, jobs }
  }

  pub fn workspace(&self) -> &Workspace {
    &self.workspace
  }

  /// The full command sequence that would build this recipe.
  pub fn plan(&self, recipe: &Recipe) -> Vec<PlannedCommand> {
    let source = self.workspace.source_dir(&recipe.name);
    let prefix = self.workspace.prefix(&recipe.name);
    let mut plan = Vec::new();

    match &recipe.build {
      BuildSystem::Autotools { autogen, flags } => {
        if *autogen {
          plan.push(PlannedCommand::new("./autogen.sh", Vec::new(), &source));
        }

        let mut args = vec![format!("--prefix={}", prefix.display())];
        args.extend(flags.iter().cloned());
        args.extend(recipe.os_flags(self.os).iter().cloned());
        plan.push(PlannedCommand::new("./configure", args, &source));
        self.push_make_steps(&mut plan, &source);
      }
      BuildSystem::Cmake {
        source_subdir,
        defines,
      } => {
        let mut args = vec![
          "-G".to_string(),
          "Unix Makefiles".to_string(),
          format!("-DCMAKE_INSTALL_PREFIX={}", prefix.display()),
        ];
        args.extend(defines.iter().cloned());
        args.extend(recipe.os_flags(self.os).iter().cloned());
        args.push(match source_subdir {
          Some(subdir) => format!("./{}", subdir),
          None => ".".to_string(),
        });
        plan.push(PlannedCommand::new("cmake", args, &source));
        self.push_make_steps(&mut plan, &source);
      }
      BuildSystem::MakeInstallOnly => {
        plan.push(PlannedCommand::new(
          "make",
          vec!["install".to_string(), format!("PREFIX={}", prefix.display())],
          &source,
        ));
      }
    }

    plan
  }

  fn push_make_steps(&self, plan: &mut Vec<PlannedCommand>, source: &Path) {
    plan.push(PlannedCommand::new(
      "make",
      vec![format!("-j{}", self.jobs)],
      source,
    ));
    plan.push(PlannedCommand::new(
      "make",
      vec!["install".to_string()],
      source,
    ));
    plan.push(PlannedCommand::new(
      "make",
      vec!["clean".to_string()],
      source,
    ));
  }

  /// Build one recipe: verify the checkout, skip when the install prefix is
  /// already populated, otherwise run every planned step in order. The first
  /// failing step aborts the whole run.
  pub fn build(&self, recipe: &Recipe) -> Result<()> {
    let source = self.workspace.source_dir(&recipe.name);
    if !source.exists() {
      return Err(Error::SourceMissing {
        name: recipe.name.clone(),
        path: source,
      });
    }

    let prefix = self.workspace.prefix(&recipe.name);
    if dir_is_populated(&prefix) {
      info!(
        "[{}] compile products exist at {}, skipping build",
        recipe.name,
        prefix.display()
      );
      return Ok(());
    }

    info!("building [{}]...", recipe.name);
    for step in self.plan(recipe) {
      self.run(&step)?;
    }
    info!("[{}] build completed", recipe.name);
    Ok(())
  }

  /// Remove a recipe's install prefix; the checkout is kept.
  pub fn clean(&self, recipe: &Recipe) -> Result<()> {
    let prefix = self.workspace.prefix(&recipe.name);
    if prefix.exists() {
      info!("removing [{}] products at {}", recipe.name, prefix.display());
      fs::remove_dir_all(&prefix)?;
    }
    Ok(())
  }

  fn run(&self, step: &PlannedCommand) -> Result<()> {
    debug!("running: {} (in {})", step, step.cwd.display());

    let status = Command::new(&step.program)
      .args(&step.args)
      .current_dir(&step.cwd)
      .status()?;

    if status.success() {
      Ok(())
    } else {
      Err(Error::CommandFailed {
        program: step.program.clone(),
        status,
      })
    }
  }
}
