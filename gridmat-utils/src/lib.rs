/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

//! Helpers shared by the crates in the `gridmat` workspace.

mod lazystring;
pub use lazystring::LazyString;

pub mod random;
pub use random::{RngBuilder, StdRngBuilder};

pub mod tracing;
pub use tracing::{init_subscriber, init_test_subscriber};
