//! Process-wide log output.
//!
//! Handlers log through the `tracing` macros; a disabled level costs no formatting,
//! so `trace!`/`debug!` arguments are only evaluated when those levels are enabled.

use tracing::Level;
use tracing::subscriber::SetGlobalDefaultError;
use tracing_subscriber::FmtSubscriber;

/// Installs a formatting subscriber that writes everything at `level` and above to stdout.
///
/// Fails if a global subscriber is already set.
pub fn init(level: Level) -> Result<(), SetGlobalDefaultError> {
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)
}

/// Parses a level name such as `info` or `DEBUG`, falling back to `INFO`.
pub fn level_from_str(level: &str) -> Level {
    level.trim().parse().unwrap_or(Level::INFO)
}
