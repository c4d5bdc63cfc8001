//! Build-tool availability checks and best-effort installation.

use std::path::PathBuf;
use std::process::Command;

use log::{info, warn};

use crate::error::{Error, Result};
use crate::platform::OsKind;

/// Look up a tool on PATH.
pub fn find_tool(name: &str) -> Option<PathBuf> {
  which::which(name).ok()
}

/// Require a tool to be present, failing the run otherwise.
pub fn require(name: &str) -> Result<PathBuf> {
  match find_tool(name) {
    Some(path) => {
      info!("[{}] is available at {}", name, path.display());
      Ok(path)
    }
    None => Err(Error::ToolMissing {
      tool: name.to_string(),
    }),
  }
}

/// Check for a tool and install it via the platform package manager when
/// missing: brew on macOS, vcpkg elsewhere (followed by
/// `vcpkg integrate install`).
pub fn ensure_installed(os: OsKind, name: &str) -> Result<PathBuf> {
  if let Some(path) = find_tool(name) {
    info!("[{}] is available at {}", name, path.display());
    return Ok(path);
  }

  let manager = os.package_manager();
  info!("[{}] not found, installing via {}...", name, manager);

  let status = Command::new(manager).args(["install", name]).status()?;
  if !status.success() {
    return Err(Error::InstallFailed {
      tool: name.to_string(),
      manager: manager.to_string(),
    });
  }

  if manager == "vcpkg" {
    // Hook the vcpkg toolchain into the ambient build environment.
    let status = Command::new("vcpkg")
      .args(["integrate", "install"])
      .status()?;
    if !status.success() {
      warn!("vcpkg integrate install failed, continuing anyway");
    }
  }

  find_tool(name).ok_or_else(|| Error::InstallFailed {
    tool: name.to_string(),
    manager: manager.to_string(),
  })
}

/// Verify the whole host tool set needed before any fetch or build step.
pub fn check_host_tools(os: OsKind) -> Result<()> {
  info!("checking build tools...");

  if os == OsKind::Macos {
    require("brew")?;
  }
  require("git")?;
  require("vcpkg")?;

  ensure_installed(os, "yasm")?;
  ensure_installed(os, "autoconf")?;

  require(os.pkg_config_binary())?;

  Ok(())
}
