#![deny(clippy::all)]

//! Manifest-driven bootstrap of a static media-codec toolchain.
//!
//! Detects the host OS, verifies the native build tools, shallow-clones a
//! pinned set of codec repositories (x264, x265, opus, libvpx, optionally
//! nv-codec-headers) and builds each one, then builds FFmpeg statically
//! linked against them. The tool/version/flag matrix lives in a declarative
//! [`manifest::Manifest`]; [`driver::Driver`] is the generic runner that
//! turns each recipe into a configure → make → install → clean sequence.

pub mod driver;
pub mod error;
pub mod fetch;
pub mod manifest;
pub mod platform;
pub mod tools;

pub use error::{Error, Result};
