use core::fmt;

/// Identity of the running image, stamped in by `build.rs`.
pub struct BuildInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub git_ref: &'static str,
}

pub const BUILD: BuildInfo = BuildInfo {
    name: env!("CARGO_PKG_NAME"),
    version: env!("ADCFILT_VERSION"),
    git_ref: env!("ADCFILT_GIT_REF"),
};

impl fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.name, self.version, self.git_ref)
    }
}
