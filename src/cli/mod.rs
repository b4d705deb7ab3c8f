//! CLI commands
//!
//! Command implementations for the `iconsync` binary.

mod auth;
mod config;
mod extract;
mod progress;
mod publish;
mod style;

pub use auth::{run_auth_setup, run_auth_test};
pub use config::{run_config_path, run_config_show};
pub use extract::run_extract;
pub use publish::{run_publish, PublishArgs};

use tracing_subscriber::{fmt, EnvFilter};

/// Install the stderr log subscriber
///
/// `RUST_LOG` wins over the verbosity flag.
pub fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "icon_sync=debug,iconsync=debug,warn",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
