#![allow(dead_code)]

use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use tracing_subscriber::fmt::MakeWriter;

use vmnet_core::dependency::Capability;
use vmnet_core::error::DependencyError;

/// In-memory sink for formatted log lines.
#[derive(Clone, Default)]
pub struct LogCapture {
    buf: Arc<Mutex<Vec<u8>>>,
}

pub struct CaptureWriter {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl io::Write for CaptureWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.lock().unwrap().extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = CaptureWriter;

    fn make_writer(&'a self) -> Self::Writer {
        CaptureWriter {
            buf: self.buf.clone(),
        }
    }
}

impl LogCapture {
    pub fn lines(&self) -> Vec<String> {
        let buf = self.buf.lock().unwrap();
        String::from_utf8_lossy(&buf)
            .lines()
            .map(str::to_string)
            .collect()
    }

    /// Lines emitted at `level` ("DEBUG", "ERROR", ...).
    pub fn at_level(&self, level: &str) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|line| line.trim_start().starts_with(level))
            .collect()
    }
}

/// Run `f` with every tracing event captured.
pub fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, LogCapture) {
    let capture = LogCapture::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(capture.clone())
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .without_time()
        .with_target(false)
        .finish();
    let out = tracing::subscriber::with_default(subscriber, f);
    (out, capture)
}

/// Capability with a fixed answer that counts how often it is asked.
pub struct MockCapability {
    installed: bool,
    requires_root: bool,
    installed_calls: AtomicUsize,
    install_calls: AtomicUsize,
}

impl MockCapability {
    pub fn new(installed: bool) -> Arc<Self> {
        Arc::new(Self {
            installed,
            requires_root: false,
            installed_calls: AtomicUsize::new(0),
            install_calls: AtomicUsize::new(0),
        })
    }

    pub fn installed_calls(&self) -> usize {
        self.installed_calls.load(Ordering::SeqCst)
    }

    pub fn install_calls(&self) -> usize {
        self.install_calls.load(Ordering::SeqCst)
    }
}

impl Capability for MockCapability {
    fn installed(&self) -> bool {
        self.installed_calls.fetch_add(1, Ordering::SeqCst);
        self.installed
    }

    fn install(&self) -> Result<(), DependencyError> {
        self.install_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn requires_root(&self) -> bool {
        self.requires_root
    }
}
