// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Line-atomic output sinks shared by concurrent writers.

use std::io::{self, Write};
use std::sync::Arc;

use parking_lot::Mutex;

/// Cloneable handle to one destination stream.
///
/// Every clone shares the same lock, and each [`write_line`](Self::write_line)
/// holds it for the whole line, so lines from different writers never
/// interleave mid-line.
#[derive(Clone)]
pub struct LineSink {
    inner: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl LineSink {
    pub fn new(writer: impl Write + Send + 'static) -> Self {
        Self { inner: Arc::new(Mutex::new(Box::new(writer))) }
    }

    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }

    /// Write `line` plus a newline as a single locked write, then flush.
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut buf = Vec::with_capacity(line.len() + 1);
        buf.extend_from_slice(line.as_bytes());
        buf.push(b'\n');

        let mut writer = self.inner.lock();
        writer.write_all(&buf)?;
        writer.flush()
    }
}

/// In-memory writer whose clones share one buffer.
#[derive(Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
