use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// Errors surfaced while bootstrapping the toolchain.
///
/// Every variant is fatal: the whole run stops at the first failure and the
/// binary exits nonzero. There is no retry or rollback.
#[derive(Debug, Error)]
pub enum Error {
  #[error(transparent)]
  Io(#[from] std::io::Error),

  #[error("[{tool}] cannot be found; install it or add it to PATH")]
  ToolMissing { tool: String },

  #[error("installing [{tool}] via {manager} failed")]
  InstallFailed { tool: String, manager: String },

  #[error("`{program}` exited with {status}")]
  CommandFailed { program: String, status: ExitStatus },

  #[error("git clone of [{name}] failed")]
  CloneFailed { name: String },

  #[error("[{name}] source dir does not exist: {path} (run `fetch` first)")]
  SourceMissing { name: String, path: PathBuf },

  #[error("no recipe named [{0}] in the manifest")]
  UnknownRecipe(String),

  #[error("failed to parse manifest: {0}")]
  Manifest(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
