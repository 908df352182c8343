//! Fluent construction of [`ProgressRegistry`] instances.
//!
//! [`ProgressRegistry::new`] covers the common case (stdout, 100 ms redraw
//! interval, 50-cell gauge). The builder exists for the rest:
//!
//! * **Custom sinks:** Any `Write + Send` can replace stdout. Tests use this
//!   to capture frames in memory; embedders can point the display at an
//!   alternate tty.
//! * **Timing and geometry:** The redraw interval and gauge width are
//!   adjustable for environments where the defaults are too chatty or too
//!   wide.

use std::{
    fmt,
    io::{self, Write},
    time::Duration,
};

use crate::{
    registry::{ProgressRegistry, TICK_INTERVAL},
    render::GAUGE_WIDTH,
};

/// A builder for [`ProgressRegistry`] instances with a non-default output
/// sink, redraw interval, or gauge width.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use multibar::RegistryBuilder;
///
/// let registry = RegistryBuilder::new()
///     .with_writer(Vec::new())
///     .with_tick_interval(Duration::from_millis(25))
///     .build();
/// registry.stop();
/// ```
pub struct RegistryBuilder {
    writer: Box<dyn Write + Send>,
    interval: Duration,
    width: usize,
}

impl fmt::Debug for RegistryBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryBuilder")
            .field("interval", &self.interval)
            .field("width", &self.width)
            .finish()
    }
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistryBuilder {
    /// Starts a builder with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            writer: Box::new(io::stdout()),
            interval: TICK_INTERVAL,
            width: GAUGE_WIDTH,
        }
    }

    /// Replaces the output sink the redraw thread writes frames to.
    #[must_use]
    pub fn with_writer(mut self, writer: impl Write + Send + 'static) -> Self {
        self.writer = Box::new(writer);
        self
    }

    /// Sets the sleep interval between redraw frames.
    #[must_use]
    pub const fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Sets the gauge width in glyph cells.
    #[must_use]
    pub const fn with_gauge_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Consumes the builder and returns the configured registry.
    ///
    /// The redraw thread is not spawned here; it starts lazily on the first
    /// registration.
    #[must_use]
    pub fn build(self) -> ProgressRegistry {
        ProgressRegistry::from_parts(self.writer, self.interval, self.width)
    }
}

#[cfg(test)]
mod tests {
    use std::{
        io::{self, Write},
        sync::Arc,
        thread,
        time::Duration,
    };

    use parking_lot::Mutex;

    use super::RegistryBuilder;

    #[derive(Clone, Default)]
    struct CaptureSink(Arc<Mutex<Vec<u8>>>);

    impl Write for CaptureSink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Custom Geometry
    /// A narrow gauge shows up in the rendered frames.
    #[test]
    fn test_custom_sink_and_width() {
        let sink = CaptureSink::default();
        let registry = RegistryBuilder::new()
            .with_writer(sink.clone())
            .with_tick_interval(Duration::from_millis(10))
            .with_gauge_width(10)
            .build();

        registry.register(1, "narrow", 10);
        thread::sleep(Duration::from_millis(50));
        registry.stop();

        let output = String::from_utf8_lossy(&sink.0.lock()).into_owned();
        let empties = output
            .rsplit("\u{1b}[1;0H")
            .next()
            .unwrap()
            .chars()
            .filter(|c| *c == '┈')
            .count();
        assert_eq!(empties, 10, "0% on a 10-cell gauge is 10 empty cells");
    }
}
