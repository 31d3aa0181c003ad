//! Stamps the binary with its git revision for `auto-gallery --version`.
//!
//! `GIT_HASH` is the short commit hash, empty outside a git checkout.
//! `ON_RELEASE_TAG` is `true` only when HEAD carries the tag for this
//! package version (`v0.1.0` or `0.1.0`).

use std::process::Command;

fn main() {
    for path in [".git/HEAD", ".git/refs/", ".git/packed-refs"] {
        println!("cargo:rerun-if-changed={path}");
    }

    let hash = git(&["rev-parse", "--short", "HEAD"]).unwrap_or_default();

    let version = std::env::var("CARGO_PKG_VERSION").unwrap_or_default();
    let on_release_tag = git(&["tag", "--points-at", "HEAD"]).is_some_and(|tags| {
        tags.lines()
            .map(str::trim)
            .any(|tag| tag.strip_prefix('v').unwrap_or(tag) == version)
    });

    println!("cargo:rustc-env=GIT_HASH={hash}");
    println!("cargo:rustc-env=ON_RELEASE_TAG={on_release_tag}");
}

/// Trimmed stdout of a successful git command.
fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    output
        .status
        .success()
        .then(|| String::from_utf8_lossy(&output.stdout).trim().to_string())
}
