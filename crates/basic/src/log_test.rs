//! Leveled logging with deferred formatting.

use std::fmt::Display;

use mvc_web::handler_fn;
use mvc_web::router::{RouterBuilder, any};
use tracing::{debug, info, trace};

pub fn routes(router: RouterBuilder) -> RouterBuilder {
    router.route("/log-test", any(handler_fn(log_test)))
}

pub async fn log_test() -> &'static str {
    log_levels(&"Spring");
    "ok"
}

/// Logs `name` at trace, debug and info.
///
/// The arguments are formatted only at the levels the subscriber has enabled.
pub fn log_levels(name: &dyn Display) {
    trace!("trace log={}", name);
    debug!("debug log={}", name);
    info!("info log={}", name);
}
