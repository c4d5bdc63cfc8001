//! Golden command-line plans for every builtin recipe.
//!
//! The whole value of the manifest is that a recipe renders to a known-good
//! command sequence, so these tests pin the exact lines per OS.

#![cfg(unix)]

use std::path::Path;

use codec_toolchain::driver::{Driver, Workspace};
use codec_toolchain::manifest::Manifest;
use codec_toolchain::platform::OsKind;

fn driver(os: OsKind) -> Driver {
  Driver::new(Workspace::new("/toolchain"), os, 8)
}

fn rendered(os: OsKind, recipe: &str) -> Vec<String> {
  let manifest = Manifest::builtin();
  driver(os)
    .plan(manifest.get(recipe).unwrap())
    .iter()
    .map(|step| step.to_string())
    .collect()
}

#[test]
fn x264_plan_linux() {
  assert_eq!(
    rendered(OsKind::Linux, "x264"),
    [
      "./configure --prefix=/toolchain/build/x264 --enable-pic --enable-static --disable-cli",
      "make -j8",
      "make install",
      "make clean",
    ]
  );
}

#[test]
fn x265_plan_uses_unix_makefiles_and_source_subdir() {
  assert_eq!(
    rendered(OsKind::Linux, "x265"),
    [
      "cmake -G \"Unix Makefiles\" -DCMAKE_INSTALL_PREFIX=/toolchain/build/x265 \
-DENABLE_STATIC=ON -DENABLE_SHARED=OFF -DENABLE_SHARED_LIBS=OFF -DENABLE_CLI=OFF ./source",
      "make -j8",
      "make install",
      "make clean",
    ]
  );
}

#[test]
fn opus_plan_runs_autogen_first() {
  assert_eq!(
    rendered(OsKind::Linux, "opus"),
    [
      "./autogen.sh",
      "./configure --prefix=/toolchain/build/opus --enable-static --disable-shared \
--disable-doc --disable-extra-programs",
      "make -j8",
      "make install",
      "make clean",
    ]
  );
}

#[test]
fn libvpx_plan_linux() {
  assert_eq!(
    rendered(OsKind::Linux, "libvpx"),
    [
      "./configure --prefix=/toolchain/build/libvpx --enable-vp9 --enable-pic \
--enable-better-hw-compatibility --enable-realtime-only --disable-vp8 \
--disable-examples --disable-tools --disable-docs",
      "make -j8",
      "make install",
      "make clean",
    ]
  );
}

#[test]
fn nv_codec_headers_plan_is_make_install_only() {
  assert_eq!(
    rendered(OsKind::Linux, "nv-codec-headers"),
    ["make install PREFIX=/toolchain/build/nv-codec-headers"]
  );
}

#[test]
fn ffmpeg_plan_linux() {
  let expected_configure = "./configure --prefix=/toolchain/build/ffmpeg \
--disable-all --disable-autodetect --arch=x86_64 --enable-lto --enable-pic \
--enable-hardcoded-tables --enable-gpl --enable-nonfree --enable-version3 \
--enable-avdevice --enable-avcodec --enable-avformat --enable-pthreads \
--enable-libx264 --enable-libx265 --enable-libvpx --enable-libopus \
--enable-encoder=libx264 --enable-decoder=h264 --enable-encoder=libx265 \
--enable-decoder=hevc --enable-encoder=libvpx_vp9 --enable-decoder=libvpx_vp9 \
--enable-encoder=libopus --enable-decoder=libopus --disable-doc \
--disable-htmlpages --disable-manpages --disable-podpages --disable-txtpages";
  assert_eq!(
    rendered(OsKind::Linux, "ffmpeg"),
    [expected_configure, "make -j8", "make install", "make clean"]
  );
}

#[test]
fn ffmpeg_plan_macos_appends_videotoolbox() {
  let plan = rendered(OsKind::Macos, "ffmpeg");
  let configure = &plan[0];
  assert!(configure.ends_with(
    "--enable-videotoolbox --enable-audiotoolbox \
--enable-hwaccel=h264_videotoolbox --enable-hwaccel=hevc_videotoolbox \
--enable-hwaccel=vp9_videotoolbox"
  ));
  // Everything before the macOS extras matches the Linux configure line.
  let linux = rendered(OsKind::Linux, "ffmpeg");
  assert!(configure.starts_with(linux[0].as_str()));
}

#[test]
fn plan_steps_run_in_the_source_checkout() {
  let manifest = Manifest::builtin();
  let driver = driver(OsKind::Linux);
  for recipe in &manifest.recipes {
    for step in driver.plan(recipe) {
      assert_eq!(
        step.cwd,
        Path::new("/toolchain/sources").join(&recipe.name),
        "step `{}` of [{}]",
        step,
        recipe.name
      );
    }
  }
}

#[test]
fn windows_plans_match_linux_for_builtin_recipes() {
  // The builtin matrix has no Windows-specific flags; only macOS diverges.
  let manifest = Manifest::builtin();
  for recipe in &manifest.recipes {
    assert_eq!(
      rendered(OsKind::Windows, &recipe.name),
      rendered(OsKind::Linux, &recipe.name),
      "[{}]",
      recipe.name
    );
  }
}
