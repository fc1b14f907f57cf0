//! Streaming binary sources
//!
//! A [`BinarySource`] wraps a reader embedded in a payload. Deconstruction
//! drains it into an attachment buffer. The reader is taken out of the
//! handle on the first drain, so a source referenced from several places in
//! a tree contributes its content once; later occurrences read empty.

use bytes::{BufMut, BytesMut};
use parking_lot::Mutex;
use std::fmt;
use std::io::{self, Read};
use std::sync::Arc;

/// A reader holding a resource that must be released once drained
pub trait ReadClose: Read + Send {
    fn close(&mut self) -> io::Result<()>;
}

enum Reader {
    Plain(Box<dyn Read + Send>),
    Closable(Box<dyn ReadClose>),
}

/// Shared handle to a streamable byte source
#[derive(Clone)]
pub struct BinarySource {
    inner: Arc<Mutex<Option<Reader>>>,
}

impl BinarySource {
    /// Wrap a reader with nothing to release
    pub fn from_reader(reader: impl Read + Send + 'static) -> Self {
        Self::with(Reader::Plain(Box::new(reader)))
    }

    /// Wrap a reader that is closed right after it is drained
    pub fn from_closable(reader: impl ReadClose + 'static) -> Self {
        Self::with(Reader::Closable(Box::new(reader)))
    }

    fn with(reader: Reader) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Some(reader))),
        }
    }

    /// Whether the reader has already been consumed
    pub fn is_drained(&self) -> bool {
        self.inner.lock().is_none()
    }

    /// Read the source to the end, appending to `buf`.
    ///
    /// Returns the number of bytes appended. A closable reader is closed
    /// after the read, whether or not the read succeeded; a read error takes
    /// precedence over a close error.
    pub fn drain_into(&self, buf: &mut BytesMut) -> io::Result<usize> {
        let Some(reader) = self.inner.lock().take() else {
            return Ok(0);
        };

        let mut writer = buf.writer();
        match reader {
            Reader::Plain(mut r) => io::copy(&mut r, &mut writer).map(|n| n as usize),
            Reader::Closable(mut r) => {
                let read = io::copy(&mut r, &mut writer);
                let closed = r.close();
                let n = read?;
                closed?;
                Ok(n as usize)
            }
        }
    }
}

impl PartialEq for BinarySource {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for BinarySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BinarySource")
            .field("drained", &self.is_drained())
            .finish()
    }
}
