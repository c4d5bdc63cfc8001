//! Host platform detection.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The three operating systems the toolchain build supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OsKind {
  Windows,
  Macos,
  Linux,
}

impl OsKind {
  /// Detect the host OS at compile time.
  pub fn detect() -> Self {
    if cfg!(target_os = "windows") {
      OsKind::Windows
    } else if cfg!(target_os = "macos") {
      OsKind::Macos
    } else {
      OsKind::Linux
    }
  }

  /// Package manager used to install missing build tools.
  pub fn package_manager(&self) -> &'static str {
    match self {
      OsKind::Macos => "brew",
      OsKind::Windows | OsKind::Linux => "vcpkg",
    }
  }

  /// pkg-config binary name differs between macOS (brew) and the others.
  pub fn pkg_config_binary(&self) -> &'static str {
    match self {
      OsKind::Macos => "pkg-config",
      OsKind::Windows | OsKind::Linux => "pkgconf",
    }
  }
}

impl fmt::Display for OsKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      OsKind::Windows => "Windows",
      OsKind::Macos => "macOS",
      OsKind::Linux => "Linux",
    };
    f.write_str(name)
  }
}

/// Parallel job count for `make -jN`.
pub fn cpu_cores() -> usize {
  num_cpus::get()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_detect_matches_cfg() {
    let os = OsKind::detect();
    if cfg!(target_os = "macos") {
      assert_eq!(os, OsKind::Macos);
    } else if cfg!(target_os = "windows") {
      assert_eq!(os, OsKind::Windows);
    } else {
      assert_eq!(os, OsKind::Linux);
    }
  }

  #[test]
  fn test_package_manager_per_os() {
    assert_eq!(OsKind::Macos.package_manager(), "brew");
    assert_eq!(OsKind::Linux.package_manager(), "vcpkg");
    assert_eq!(OsKind::Windows.package_manager(), "vcpkg");
  }

  #[test]
  fn test_cpu_cores_nonzero() {
    assert!(cpu_cores() >= 1);
  }
}
