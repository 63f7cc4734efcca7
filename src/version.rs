//! Version and build.

/// Return the program name.
pub const fn name() -> &'static str {
    match option_env!("PROGRAM_NAME") {
        Some(s) => s,
        None => "coords",
    }
}

/// Return the program version.
pub const fn version() -> Option<&'static str> {
    option_env!("CARGO_PKG_VERSION")
}

/// Return a `name version` banner for the CLI.
pub fn banner() -> String {
    match version() {
        Some(v) => format!("{} {}", name(), v),
        None => name().to_string(),
    }
}
