//! I/O wrappers for tracking data transfer.
//!
//! [`ProgressReader`] and [`ProgressWriter`] wrap any implementation of
//! [`std::io::Read`] or [`std::io::Write`] as pass-through middleware: every
//! byte successfully transferred advances the associated registry [`Bar`].
//! Useful for file copies, downloads, and hashing passes where the unit of
//! work is bytes.

use std::io::{self, Read, Write};

use crate::registry::Bar;

/// A wrapper around [`Read`] that advances a [`Bar`] by the bytes read.
pub struct ProgressReader<R> {
    inner: R,
    bar: Bar,
}

impl<R> ProgressReader<R> {
    /// Creates a new `ProgressReader` wrapping `inner` with the given bar.
    pub const fn new(inner: R, bar: Bar) -> Self {
        Self { inner, bar }
    }
}

impl<R: Read> Read for ProgressReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.bar.inc(n as u64);
        Ok(n)
    }
}

/// A wrapper around [`Write`] that advances a [`Bar`] by the bytes written.
pub struct ProgressWriter<W> {
    inner: W,
    bar: Bar,
}

impl<W> ProgressWriter<W> {
    /// Creates a new `ProgressWriter` wrapping `inner` with the given bar.
    pub const fn new(inner: W, bar: Bar) -> Self {
        Self { inner, bar }
    }
}

impl<W: Write> Write for ProgressWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.bar.inc(n as u64);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

#[cfg(test)]
mod tests {
    use std::{
        io::{Cursor, Read as _, Write as _},
        time::Duration,
    };

    use crate::builder::RegistryBuilder;

    use super::{ProgressReader, ProgressWriter};

    /// Reader Tracking
    /// Bytes read advance the bar.
    #[test]
    fn test_io_reader() {
        let registry = RegistryBuilder::new()
            .with_writer(Vec::new())
            .with_tick_interval(Duration::from_millis(10))
            .build();
        registry.register(1, "read", 100);

        let data = vec![0u8; 100];
        let mut reader = ProgressReader::new(Cursor::new(&data), registry.bar(1));

        let mut buf = [0u8; 10];
        reader.read_exact(&mut buf).unwrap();

        assert_eq!(registry.snapshot()[0].processed(), 10);
        registry.stop();
    }

    /// Writer Tracking
    /// Bytes written advance the bar.
    #[test]
    fn test_io_writer() {
        let registry = RegistryBuilder::new()
            .with_writer(Vec::new())
            .with_tick_interval(Duration::from_millis(10))
            .build();
        registry.register(1, "write", 50);

        let mut writer = ProgressWriter::new(Vec::new(), registry.bar(1));
        writer.write_all(&[1, 2, 3, 4, 5]).unwrap();

        assert_eq!(registry.snapshot()[0].processed(), 5);
        registry.stop();
    }
}
