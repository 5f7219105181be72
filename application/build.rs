use std::{env, fs, io, path::PathBuf};

/// Build-time identity: `ADCFILT_VERSION` and `ADCFILT_GIT_REF` can be set by
/// the release job, otherwise the package version and "dirty" are stamped.
fn stamp(key: &str, fallback: &str) {
    let value = env::var(key).unwrap_or_else(|_| fallback.into());
    println!("cargo:rustc-env={key}={value}");
    println!("cargo:rerun-if-env-changed={key}");
}

fn main() -> io::Result<()> {
    stamp("ADCFILT_VERSION", env!("CARGO_PKG_VERSION"));
    stamp("ADCFILT_GIT_REF", "dirty");

    // cortex-m-rt's link.x includes memory.x from the search path
    let out = env::var_os("OUT_DIR")
        .map(PathBuf::from)
        .ok_or_else(|| io::Error::other("OUT_DIR not set"))?;
    fs::copy("memory.x", out.join("memory.x"))?;
    println!("cargo:rustc-link-search={}", out.display());
    println!("cargo:rerun-if-changed=memory.x");
    Ok(())
}
