//! Iterator adapters for automatic progress tracking.
//!
//! The [`ProgressIteratorExt`] trait attaches a registry bar to any Rust
//! [`Iterator`] with a single method call. The adapter registers the bar,
//! sizes it from [`Iterator::size_hint`] (an inexact hint yields a total of
//! 0, which renders as indeterminate), updates it on every item, and marks
//! it finished when the iterator is exhausted.
//!
//! # Example
//!
//! ```no_run
//! use multibar::{ProgressIteratorExt, ProgressRegistry};
//!
//! let registry = ProgressRegistry::new();
//! for _entry in ["a.ini", "b.ini", "c.ini"]
//!     .iter()
//!     .progress_in(&registry, 1, "config files")
//! {
//!     // ...
//! }
//! registry.stop();
//! ```

use compact_str::CompactString;

use crate::registry::{Bar, ProgressRegistry};

/// An iterator adapter that advances a [`Bar`] on every item.
pub struct ProgressIter<I> {
    iter: I,
    bar: Bar,
    seen: u64,
}

impl<I> ProgressIter<I> {
    /// Creates a new `ProgressIter` driving the given bar.
    ///
    /// Usually constructed via [`ProgressIteratorExt`] methods.
    pub const fn new(iter: I, bar: Bar) -> Self {
        Self { iter, bar, seen: 0 }
    }
}

impl<I: Iterator> Iterator for ProgressIter<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.iter.next();

        if item.is_some() {
            self.seen += 1;
            self.bar.update(self.seen);
        } else {
            self.bar.finish();
        }

        item
    }
}

/// Extension trait to attach registry-backed progress tracking to any
/// [`Iterator`].
pub trait ProgressIteratorExt: Sized {
    /// Registers bar `id` in `registry`, sized from `size_hint`, and wraps
    /// the iterator so each item advances it.
    fn progress_in(
        self,
        registry: &ProgressRegistry,
        id: u32,
        name: impl Into<CompactString>,
    ) -> ProgressIter<Self>;

    /// Wraps the iterator around an existing [`Bar`] handle.
    fn progress_with(self, bar: Bar) -> ProgressIter<Self>;
}

impl<I: Iterator> ProgressIteratorExt for I {
    fn progress_in(
        self,
        registry: &ProgressRegistry,
        id: u32,
        name: impl Into<CompactString>,
    ) -> ProgressIter<Self> {
        // An exact upper bound becomes the total; anything else renders as
        // indeterminate (total 0).
        let (lower, upper) = self.size_hint();
        let total = match upper {
            Some(upper) if upper == lower => upper as u64,
            _ => 0,
        };

        registry.register(id, name, total);
        ProgressIter::new(self, registry.bar(id))
    }

    fn progress_with(self, bar: Bar) -> ProgressIter<Self> {
        ProgressIter::new(self, bar)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::builder::RegistryBuilder;

    use super::ProgressIteratorExt as _;

    /// Iterator Integration
    /// The adapter registers, sizes from the hint, counts items, and
    /// finishes the bar on exhaustion.
    #[test]
    fn test_iterator_adapter() {
        let registry = RegistryBuilder::new()
            .with_writer(Vec::new())
            .with_tick_interval(Duration::from_millis(10))
            .build();

        let data = [1, 2, 3, 4, 5];
        let mut count = 0;
        for _ in data.iter().progress_in(&registry, 1, "items") {
            count += 1;
        }

        assert_eq!(count, 5);

        let snap = registry.snapshot();
        assert_eq!(snap[0].total(), 5, "total inferred from size_hint");
        assert_eq!(snap[0].processed(), 5);
        assert!(snap[0].finished(), "exhaustion finishes the bar");

        registry.stop();
    }

    /// Iterator Integration
    /// An inexact size hint registers an indeterminate bar.
    #[test]
    fn test_inexact_hint_is_indeterminate() {
        let registry = RegistryBuilder::new()
            .with_writer(Vec::new())
            .with_tick_interval(Duration::from_millis(10))
            .build();

        let odd = (0..10).filter(|n| n % 2 == 1);
        let consumed: Vec<_> = odd.progress_in(&registry, 2, "odds").collect();

        assert_eq!(consumed.len(), 5);

        let snap = registry.snapshot();
        assert_eq!(snap[0].total(), 0);
        assert_eq!(snap[0].processed(), 5);

        registry.stop();
    }
}
