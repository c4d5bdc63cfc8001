//! Loading a user-supplied manifest file in place of the builtin matrix.

use std::env;
use std::fs;

use codec_toolchain::driver::{Driver, Workspace};
use codec_toolchain::manifest::Manifest;
use codec_toolchain::platform::OsKind;

#[test]
#[cfg(unix)]
fn from_path_loads_and_plans_a_custom_recipe() {
  let path = env::temp_dir().join(format!("codec-toolchain-manifest-{}.json", std::process::id()));
  fs::write(
    &path,
    r#"{
      "recipes": [
        {
          "name": "x264",
          "repo": "https://code.videolan.org/videolan/x264.git",
          "branch": "master",
          "build": {
            "kind": "autotools",
            "flags": ["--enable-static", "--enable-pic"]
          },
          "linux_flags": ["--disable-asm"]
        }
      ]
    }"#,
  )
  .unwrap();

  let manifest = Manifest::from_path(&path).unwrap();
  fs::remove_file(&path).unwrap();

  assert_eq!(manifest.recipes.len(), 1);
  let x264 = manifest.get("x264").unwrap();
  assert_eq!(x264.branch, "master");

  let driver = Driver::new(Workspace::new("/toolchain"), OsKind::Linux, 2);
  let plan = driver.plan(x264);
  assert_eq!(
    plan[0].to_string(),
    "./configure --prefix=/toolchain/build/x264 --enable-static --enable-pic --disable-asm"
  );
  assert_eq!(plan[1].to_string(), "make -j2");
}

#[test]
fn from_path_rejects_malformed_json() {
  let path = env::temp_dir().join(format!(
    "codec-toolchain-bad-manifest-{}.json",
    std::process::id()
  ));
  fs::write(&path, "{ not json").unwrap();

  let result = Manifest::from_path(&path);
  fs::remove_file(&path).unwrap();
  assert!(result.is_err());
}
