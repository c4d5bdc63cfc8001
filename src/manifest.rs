//! The declarative build manifest.
//!
//! A [`Manifest`] is the tool/version/flag matrix: one [`Recipe`] per codec
//! plus the media framework itself. [`Manifest::builtin`] carries the
//! known-good matrix; a JSON file with the same shape can override it via
//! `--manifest`.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::platform::OsKind;

// Pinned upstream sources
const X264_REPO: &str = "https://code.videolan.org/videolan/x264.git";
const X264_BRANCH: &str = "stable";
const X265_REPO: &str = "https://bitbucket.org/multicoreware/x265_git.git";
const X265_BRANCH: &str = "stable";
const OPUS_REPO: &str = "https://gitlab.xiph.org/xiph/opus.git";
const OPUS_BRANCH: &str = "master";
const VPX_REPO: &str = "https://chromium.googlesource.com/webm/libvpx";
const VPX_BRANCH: &str = "v1.11.0";
const NV_CODEC_HEADERS_REPO: &str = "https://github.com/FFmpeg/nv-codec-headers.git";
const NV_CODEC_HEADERS_BRANCH: &str = "n11.1.5.1";
const FFMPEG_REPO: &str = "https://git.ffmpeg.org/ffmpeg.git";
const FFMPEG_BRANCH: &str = "n5.0";

/// How a recipe's source tree is configured and built.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BuildSystem {
  /// `./configure` (optionally preceded by `./autogen.sh`), then make.
  Autotools {
    #[serde(default)]
    autogen: bool,
    flags: Vec<String>,
  },
  /// In-source `cmake -G "Unix Makefiles"` generation, then make.
  Cmake {
    /// CMakeLists.txt location relative to the checkout (x265 keeps it
    /// under `source/`).
    #[serde(default)]
    source_subdir: Option<String>,
    defines: Vec<String>,
  },
  /// No configure step at all; `make install PREFIX=...` does everything
  /// (header-only packages like nv-codec-headers).
  MakeInstallOnly,
}

/// One buildable dependency: where to get it and how to build it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
  pub name: String,
  pub repo: String,
  pub branch: String,
  pub build: BuildSystem,
  /// Extra configure flags appended on macOS only.
  #[serde(default)]
  pub macos_flags: Vec<String>,
  /// Extra configure flags appended on Windows only.
  #[serde(default)]
  pub windows_flags: Vec<String>,
  /// Extra configure flags appended on Linux only.
  #[serde(default)]
  pub linux_flags: Vec<String>,
  /// Optional recipes (hardware-codec SDKs) are skipped unless requested.
  #[serde(default)]
  pub optional: bool,
}

impl Recipe {
  /// Flags appended to the configure step on the given OS.
  pub fn os_flags(&self, os: OsKind) -> &[String] {
    match os {
      OsKind::Macos => &self.macos_flags,
      OsKind::Windows => &self.windows_flags,
      OsKind::Linux => &self.linux_flags,
    }
  }
}

/// The ordered set of recipes. The media framework must come last so its
/// configure step can see every codec already installed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
  pub recipes: Vec<Recipe>,
}

impl Manifest {
  /// The known-good matrix for the static FFmpeg toolchain.
  pub fn builtin() -> Self {
    let strings = |flags: &[&str]| flags.iter().map(|s| s.to_string()).collect::<Vec<_>>();

    let x264 = Recipe {
      name: "x264".to_string(),
      repo: X264_REPO.to_string(),
      branch: X264_BRANCH.to_string(),
      build: BuildSystem::Autotools {
        autogen: false,
        flags: strings(&["--enable-pic", "--enable-static", "--disable-cli"]),
      },
      macos_flags: Vec::new(),
      windows_flags: Vec::new(),
      linux_flags: Vec::new(),
      optional: false,
    };

    let x265 = Recipe {
      name: "x265".to_string(),
      repo: X265_REPO.to_string(),
      branch: X265_BRANCH.to_string(),
      build: BuildSystem::Cmake {
        source_subdir: Some("source".to_string()),
        defines: strings(&[
          "-DENABLE_STATIC=ON",
          "-DENABLE_SHARED=OFF",
          "-DENABLE_SHARED_LIBS=OFF",
          "-DENABLE_CLI=OFF",
        ]),
      },
      macos_flags: Vec::new(),
      windows_flags: Vec::new(),
      linux_flags: Vec::new(),
      optional: false,
    };

    let opus = Recipe {
      name: "opus".to_string(),
      repo: OPUS_REPO.to_string(),
      branch: OPUS_BRANCH.to_string(),
      build: BuildSystem::Autotools {
        autogen: true,
        flags: strings(&[
          "--enable-static",
          "--disable-shared",
          "--disable-doc",
          "--disable-extra-programs",
        ]),
      },
      macos_flags: Vec::new(),
      windows_flags: Vec::new(),
      linux_flags: Vec::new(),
      optional: false,
    };

    let libvpx = Recipe {
      name: "libvpx".to_string(),
      repo: VPX_REPO.to_string(),
      branch: VPX_BRANCH.to_string(),
      build: BuildSystem::Autotools {
        autogen: false,
        flags: strings(&[
          "--enable-vp9",
          "--enable-pic",
          "--enable-better-hw-compatibility",
          "--enable-realtime-only",
          "--disable-vp8",
          "--disable-examples",
          "--disable-tools",
          "--disable-docs",
        ]),
      },
      macos_flags: Vec::new(),
      windows_flags: Vec::new(),
      linux_flags: Vec::new(),
      optional: false,
    };

    let nv_codec_headers = Recipe {
      name: "nv-codec-headers".to_string(),
      repo: NV_CODEC_HEADERS_REPO.to_string(),
      branch: NV_CODEC_HEADERS_BRANCH.to_string(),
      build: BuildSystem::MakeInstallOnly,
      macos_flags: Vec::new(),
      windows_flags: Vec::new(),
      linux_flags: Vec::new(),
      optional: true,
    };

    let ffmpeg = Recipe {
      name: "ffmpeg".to_string(),
      repo: FFMPEG_REPO.to_string(),
      branch: FFMPEG_BRANCH.to_string(),
      build: BuildSystem::Autotools {
        autogen: false,
        flags: strings(&[
          "--disable-all",
          "--disable-autodetect",
          "--arch=x86_64",
          "--enable-lto",
          "--enable-pic",
          "--enable-hardcoded-tables",
          "--enable-gpl",
          "--enable-nonfree",
          "--enable-version3",
          "--enable-avdevice",
          "--enable-avcodec",
          "--enable-avformat",
          "--enable-pthreads",
          "--enable-libx264",
          "--enable-libx265",
          "--enable-libvpx",
          "--enable-libopus",
          "--enable-encoder=libx264",
          "--enable-decoder=h264",
          "--enable-encoder=libx265",
          "--enable-decoder=hevc",
          "--enable-encoder=libvpx_vp9",
          "--enable-decoder=libvpx_vp9",
          "--enable-encoder=libopus",
          "--enable-decoder=libopus",
          "--disable-doc",
          "--disable-htmlpages",
          "--disable-manpages",
          "--disable-podpages",
          "--disable-txtpages",
        ]),
      },
      macos_flags: strings(&[
        "--enable-videotoolbox",
        "--enable-audiotoolbox",
        "--enable-hwaccel=h264_videotoolbox",
        "--enable-hwaccel=hevc_videotoolbox",
        "--enable-hwaccel=vp9_videotoolbox",
      ]),
      windows_flags: Vec::new(),
      linux_flags: Vec::new(),
      optional: false,
    };

    Manifest {
      recipes: vec![x264, x265, opus, libvpx, nv_codec_headers, ffmpeg],
    }
  }

  /// Load a manifest override from a JSON file.
  pub fn from_path(path: &Path) -> Result<Self> {
    let content = fs::read_to_string(path)?;
    let manifest: Manifest = serde_json::from_str(&content)?;
    Ok(manifest)
  }

  /// Look up a single recipe by name.
  pub fn get(&self, name: &str) -> Result<&Recipe> {
    self
      .recipes
      .iter()
      .find(|r| r.name == name)
      .ok_or_else(|| Error::UnknownRecipe(name.to_string()))
  }

  /// Recipes to process, in manifest order. Optional recipes are skipped
  /// unless hardware-codec SDKs were requested.
  pub fn selected(&self, hwaccel: bool) -> impl Iterator<Item = &Recipe> {
    self
      .recipes
      .iter()
      .filter(move |r| hwaccel || !r.optional)
  }
}
