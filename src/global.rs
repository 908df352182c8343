//! The process-wide shared registry.
//!
//! Most callers construct their own [`ProgressRegistry`] and pass it where
//! it is needed. For programs whose background tasks have no convenient
//! injection point, this module offers a single lazily-initialized instance
//! shared by the whole process.
//!
//! # Init/teardown ordering
//!
//! The instance is constructed on first use. Call
//! [`registry().stop()`](ProgressRegistry::stop) before the process exits so
//! the redraw thread is joined while stdout is still intact; `stop` is
//! idempotent, so any number of teardown paths may call it.

use once_cell::sync::Lazy;

use crate::registry::ProgressRegistry;

static GLOBAL: Lazy<ProgressRegistry> = Lazy::new(ProgressRegistry::new);

/// Returns the process-wide shared registry, constructing it on first use.
#[must_use]
pub fn registry() -> &'static ProgressRegistry {
    &GLOBAL
}

#[cfg(test)]
mod tests {
    use super::registry;

    /// Singleton Identity
    /// Every call hands back the same instance.
    #[test]
    fn test_same_instance() {
        assert!(std::ptr::eq(registry(), registry()));
    }
}
