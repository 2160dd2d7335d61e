//! Serial rspec runner for suites that tick a Bevy `App`.

use std::sync::Arc;

use rspec::report::Report;
use rspec::{block::Suite, ConfigurationBuilder, Logger, Runner};

/// Runs `suite` on one thread and panics if any example failed.
pub fn run_serial<T>(suite: &Suite<T>)
where
    T: Clone + Send + Sync + std::fmt::Debug,
{
    let logger = Arc::new(Logger::new(std::io::stdout()));
    let config = ConfigurationBuilder::default()
        .parallel(false)
        .exit_on_failure(false)
        .build()
        .unwrap_or_else(|e| panic!("rspec configuration failed: {e}"));
    let report = Runner::new(config, vec![logger]).run(suite);
    assert!(report.is_success(), "rspec suite reported failures");
}
