/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

use std::fmt::{Display, Error, Formatter};

/// A message whose formatting is deferred until it is actually displayed.
///
/// Matrix tests loop over many shapes and positions and attach a context message to every
/// assertion. Building those messages eagerly with `format!` would allocate on every
/// iteration, even though the message is only ever read when an assertion fails.
///
/// `LazyString` captures a closure that writes the message and implements
/// `std::fmt::Display`, so the formatting work only happens when someone asks for it.
pub struct LazyString<F>(F)
where
    F: Fn(&mut Formatter<'_>) -> Result<(), Error>;

impl<F> LazyString<F>
where
    F: Fn(&mut Formatter<'_>) -> Result<(), Error>,
{
    /// Construct a new `LazyString` around the provided closure.
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F> Display for LazyString<F>
where
    F: Fn(&mut Formatter<'_>) -> Result<(), Error>,
{
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        (self.0)(f)
    }
}

/// A macro with the same syntax as `format!` that builds a [`LazyString`] instead of a
/// `String`.
///
/// ```
/// use gridmat_utils::lazy_format;
///
/// let (row, col) = (2, 3);
/// let context = lazy_format!("at position ({row}, {col})");
/// assert_eq!(context.to_string(), "at position (2, 3)");
/// ```
#[macro_export]
macro_rules! lazy_format {
    ($($arg:tt)*) => {
        $crate::LazyString::new(|f: &mut std::fmt::Formatter<'_>| {
            write!(f, $($arg)*)
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_lazy_string() {
        let nrows: usize = 4;
        let ncols: usize = 3;

        let lazy = LazyString::new(|f: &mut std::fmt::Formatter| {
            write!(f, "shape = {nrows} x {ncols}")
        });
        assert_eq!(lazy.to_string(), "shape = 4 x 3");

        let lazy = lazy_format!("shape = {nrows} x {ncols}");
        assert_eq!(lazy.to_string(), "shape = 4 x 3");
    }

    #[test]
    fn closure_runs_only_when_displayed() {
        let calls = std::cell::Cell::new(0);
        let lazy = LazyString::new(|f: &mut std::fmt::Formatter| {
            calls.set(calls.get() + 1);
            write!(f, "called")
        });
        assert_eq!(calls.get(), 0);
        let _ = lazy.to_string();
        let _ = lazy.to_string();
        assert_eq!(calls.get(), 2);
    }
}
