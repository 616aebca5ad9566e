use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

use mvc_basic::log_test::log_levels;
use tracing::{Level, Subscriber};
use tracing_subscriber::FmtSubscriber;

/// Counts how often it is formatted.
struct Counted<'a>(&'a AtomicUsize);

impl fmt::Display for Counted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fetch_add(1, Ordering::SeqCst);
        f.write_str("Spring")
    }
}

fn subscriber(level: Level) -> impl Subscriber + Send + Sync {
    FmtSubscriber::builder().with_max_level(level).with_writer(std::io::sink).finish()
}

#[test]
fn disabled_levels_never_format_arguments() {
    let formatted = AtomicUsize::new(0);

    tracing::subscriber::with_default(subscriber(Level::WARN), || log_levels(&Counted(&formatted)));
    assert_eq!(formatted.load(Ordering::SeqCst), 0);

    tracing::subscriber::with_default(subscriber(Level::INFO), || log_levels(&Counted(&formatted)));
    let at_info = formatted.load(Ordering::SeqCst);
    assert!(at_info > 0);

    tracing::subscriber::with_default(subscriber(Level::TRACE), || log_levels(&Counted(&formatted)));
    assert_eq!(formatted.load(Ordering::SeqCst) - at_info, 3 * at_info);
}
