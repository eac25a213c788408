//! Shared setup for the Rabbit command-line tools

use std::path::{Path, PathBuf};

use tracing_subscriber::EnvFilter;

/// Install the stderr log subscriber
///
/// `RUST_LOG` overrides `default_filter`. Logs go to stderr so they never
/// mix with program output on stdout.
pub fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Default assembler output path: the input path with `.o` appended
pub fn default_object_path(input: &Path) -> PathBuf {
    let mut name = input.as_os_str().to_owned();
    name.push(".o");
    PathBuf::from(name)
}
