// tracing → OBS log bridge

use super::LOG_PREFIX;
use crate::ffi;
use std::ffi::CString;
use std::io;
use std::os::raw::c_int;
use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;

/// Install a fmt subscriber whose output lands in the OBS log
pub fn init() {
    let filter = tracing_subscriber::EnvFilter::try_from_env("OBSC_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    // OBS may load the module more than once per process
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(BlogMakeWriter)
        .with_ansi(false)
        .without_time()
        .with_target(false)
        .try_init();
}

fn blog_level(level: &Level) -> c_int {
    match *level {
        Level::ERROR => ffi::LOG_ERROR,
        Level::WARN => ffi::LOG_WARNING,
        Level::INFO => ffi::LOG_INFO,
        _ => ffi::LOG_DEBUG,
    }
}

struct BlogMakeWriter;

impl<'a> MakeWriter<'a> for BlogMakeWriter {
    type Writer = BlogWriter;

    fn make_writer(&'a self) -> Self::Writer {
        BlogWriter::new(ffi::LOG_INFO)
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        BlogWriter::new(blog_level(meta.level()))
    }
}

/// Buffers one formatted event and hands it to `blog` on drop
struct BlogWriter {
    level: c_int,
    buf: Vec<u8>,
}

impl BlogWriter {
    fn new(level: c_int) -> Self {
        Self {
            level,
            buf: Vec::with_capacity(256),
        }
    }
}

impl io::Write for BlogWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for BlogWriter {
    fn drop(&mut self) {
        let text = String::from_utf8_lossy(&self.buf);
        let line = format!("{} {}", LOG_PREFIX, text.trim_end()).replace('\0', " ");

        if let Ok(line) = CString::new(line) {
            unsafe { ffi::blog(self.level, c"%s".as_ptr(), line.as_ptr()) };
        }
    }
}
