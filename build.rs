//! Build script guarding the package identity.
//!
//! The version lives only in `Cargo.toml`. Cargo substitutes `0.0.0` when the
//! `version` key is left out, so that value is rejected here and the build
//! stops instead of shipping an anonymous binary.

use std::env;

#[path = "build/version.rs"]
mod version;

fn main() {
    println!("cargo::rerun-if-changed=build.rs");
    println!("cargo::rerun-if-changed=build/version.rs");
    println!("cargo::rerun-if-changed=Cargo.toml");

    let version = env::var("CARGO_PKG_VERSION").unwrap_or_default();
    if let Err(message) = version::check_version(&version) {
        panic!("{message}");
    }

    let target = env::var("TARGET").unwrap_or_default();
    println!("cargo::rustc-env=CONFIG_RENDER_BUILD_TARGET={target}");
}
