//! Output sink abstraction for streaming formatted text.
//!
//! A small `Write` trait is defined here instead of using [`std::io::Write`]
//! so formatting can stream into user sinks in a no-std context.
//!
//! [`std::io::Write`]: <https://doc.rust-lang.org/std/io/trait.Write.html>

use alloc::string::String;
use core::fmt;

use crate::Error;

/// A sink for formatted text.
pub trait Write {
    /// Attempts to write a string slice into this writer.
    ///
    /// # Errors
    ///
    /// Can produce an [`Error`] when the underlying sink fails.
    fn write_str(&mut self, s: &str) -> Result<(), Error>;

    /// Attempts to write a single character into this writer.
    ///
    /// # Errors
    ///
    /// Can produce an [`Error`] when the underlying sink fails.
    fn write_char(&mut self, ch: char) -> Result<(), Error> {
        self.write_str(ch.encode_utf8(&mut [0; 4]))
    }
}

/// Write is implemented for `String` by appending to the string.
impl Write for String {
    fn write_str(&mut self, s: &str) -> Result<(), Error> {
        self.push_str(s);
        Ok(())
    }
}

/// An adapter exposing any [`core::fmt::Write`] as a sink.
///
/// Formatter errors are reported as [`Error::Io`].
#[derive(Debug)]
pub struct FmtWrite<'a, W: fmt::Write + ?Sized> {
    /// Inner writer.
    inner: &'a mut W,
}

impl<'a, W: fmt::Write + ?Sized> FmtWrite<'a, W> {
    /// Construct a new `FmtWrite` adapter.
    pub fn new(inner: &'a mut W) -> Self {
        Self { inner }
    }
}

impl<W: fmt::Write + ?Sized> Write for FmtWrite<'_, W> {
    fn write_str(&mut self, s: &str) -> Result<(), Error> {
        self.inner.write_str(s).map_err(|_| Error::Io)
    }
}
