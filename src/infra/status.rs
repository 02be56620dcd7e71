//! # Status Stream / 状态输出流
//!
//! The only shared mutable resource of a run. Workers emit their start and
//! finish lines through a [`StatusSink`]; each line is written and flushed
//! while holding one lock, so lines from concurrent workers never
//! interleave. The lock is never held across a blocking external call.
//!
//! 一次运行中唯一的共享可变资源。工作单元通过 [`StatusSink`] 输出开始和结束状态行；
//! 每一行都在持有同一把锁的情况下完成写入和刷新，因此并发工作单元的输出行不会交错。
//! 该锁绝不会跨越阻塞的外部调用持有。

use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

type SharedWriter = Arc<Mutex<Box<dyn Write + Send>>>;

/// A cloneable handle to one lock-guarded output stream.
#[derive(Clone)]
pub struct StatusSink {
    writer: SharedWriter,
}

impl StatusSink {
    /// Wraps any writer. Every clone of the returned sink shares the same lock.
    pub fn new<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Arc::new(Mutex::new(Box::new(writer))),
        }
    }

    /// A sink writing to the process's standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    /// Emits one complete line atomically with respect to every other clone.
    ///
    /// Write errors are reported on stderr and otherwise ignored: status lines
    /// are advisory and must never fail a job.
    pub fn emit(&self, line: impl fmt::Display) {
        // Format before locking so the critical section covers only the write.
        let mut text = line.to_string();
        text.push('\n');

        let mut writer = match self.writer.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Err(e) = writer.write_all(text.as_bytes()).and_then(|_| writer.flush()) {
            eprintln!("Failed to write status line: {}", e);
        }
    }
}

impl fmt::Debug for StatusSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StatusSink").finish_non_exhaustive()
    }
}

/// An in-memory writer whose contents can be read back, for capturing status
/// output in tests and embedding callers.
///
/// 可回读内容的内存写入器，用于在测试或嵌入调用方中捕获状态输出。
#[derive(Clone, Default)]
pub struct MemoryWriter {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl MemoryWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns everything written so far, lossily decoded as UTF-8.
    pub fn contents(&self) -> String {
        let buffer = match self.buffer.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        String::from_utf8_lossy(&buffer).into_owned()
    }
}

impl Write for MemoryWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut buffer = self
            .buffer
            .lock()
            .map_err(|_| io::Error::other("memory writer poisoned"))?;
        buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
