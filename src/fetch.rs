//! Shallow-cloning of recipe sources.

use std::path::Path;
use std::process::Command;

use log::{debug, info};

use crate::driver::dir_is_populated;
use crate::error::{Error, Result};
use crate::manifest::Recipe;

/// Clone a recipe's repository into `dest` unless a non-empty checkout is
/// already there. Always a shallow single-branch clone; the pinned branch or
/// tag is all a build ever needs.
pub fn clone_if_missing(recipe: &Recipe, dest: &Path) -> Result<()> {
  if dir_is_populated(dest) {
    debug!("[{}] checkout exists, skipping clone", recipe.name);
    return Ok(());
  }

  info!(
    "cloning [{}] ({} @ {})...",
    recipe.name, recipe.repo, recipe.branch
  );

  let status = Command::new("git")
    .args(["clone", "-b", recipe.branch.as_str(), "--depth=1"])
    .arg(&recipe.repo)
    .arg(dest)
    .status()?;

  if !status.success() {
    return Err(Error::CloneFailed {
      name: recipe.name.clone(),
    });
  }

  info!("[{}] cloned", recipe.name);
  Ok(())
}
