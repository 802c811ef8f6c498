/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

//! Subscriber setup for binaries and tests that consume `gridmat`.
//!
//! The library crates only emit `tracing` events: `warn!` when a sentinel operation falls
//! back to the null matrix, and `debug!` when a parallel fill is partitioned. Installing a
//! subscriber is left to the final application, which can use [`init_subscriber`] to get
//! the workspace defaults.

use tracing_subscriber::{
    filter::LevelFilter, fmt, prelude::*, util::TryInitError, EnvFilter, Registry,
};

/// The environment variable holding the filter directives, in `RUST_LOG` syntax.
pub const LOG_ENV: &str = "RUST_LOG";

/// Build the layered subscriber shared by [`init_subscriber`] and [`init_test_subscriber`].
///
/// Directives are read from [`LOG_ENV`]. Without any, events at `default` and above are
/// kept.
fn subscriber(
    default: LevelFilter,
    for_tests: bool,
) -> impl ::tracing::Subscriber + Send + Sync {
    let filter = EnvFilter::builder()
        .with_default_directive(default.into())
        .with_env_var(LOG_ENV)
        .from_env_lossy();

    // `with_test_writer` routes output through the test harness so it is only shown for
    // failing tests.
    let fmt_layer = fmt::layer().with_target(true);
    let fmt_layer = if for_tests {
        fmt_layer.with_test_writer().boxed()
    } else {
        fmt_layer.boxed()
    };

    Registry::default().with(filter).with(fmt_layer)
}

/// Install the global subscriber, logging to `stdout` at "info" unless [`LOG_ENV`] says
/// otherwise.
///
/// Returns an error if a global subscriber has already been installed.
pub fn init_subscriber() -> Result<(), TryInitError> {
    subscriber(LevelFilter::INFO, false).try_init()
}

/// Create a subscriber for tests.
///
/// The subscriber is only installed for the current thread and is removed when the
/// returned guard is dropped, so concurrently running tests do not conflict. Tests log at
/// "debug" by default so the parallel fill partitioning is visible.
pub fn init_test_subscriber() -> ::tracing::subscriber::DefaultGuard {
    ::tracing::subscriber::set_default(subscriber(LevelFilter::DEBUG, true))
}
