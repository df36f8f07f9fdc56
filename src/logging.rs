//! Process-wide logging facade over the [`log`] crate.
//!
//! The backend must be installed exactly once, before the first log call.
//! Logging before [`init`] is a configuration error in the hosting program
//! and aborts with a panic rather than dropping messages silently.

use log::{Level, LevelFilter, Log, Metadata, Record};
use std::sync::atomic::{AtomicBool, Ordering};

static INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Installs the process-wide logging backend.
///
/// Fails if a backend was already installed, by this function or anything
/// else talking to the `log` crate.
pub fn init(backend: Box<dyn Log>) -> anyhow::Result<()> {
    log::set_boxed_logger(backend)
        .map_err(|e| anyhow::anyhow!("logger already initialized: {}", e))?;
    log::set_max_level(LevelFilter::Debug);
    INITIALIZED.store(true, Ordering::Release);
    Ok(())
}

fn ensure_initialized() {
    if !INITIALIZED.load(Ordering::Acquire) {
        panic!("logging used before logging::init was called");
    }
}

pub fn log_verbose(message: &str) {
    ensure_initialized();
    log::debug!("{}", message);
}

pub fn log_info(message: &str) {
    ensure_initialized();
    log::info!("{}", message);
}

pub fn log_warning(message: &str) {
    ensure_initialized();
    log::warn!("{}", message);
}

pub fn log_error(message: &str) {
    ensure_initialized();
    log::error!("{}", message);
}

/// Minimal backend writing `[LEVEL] message` lines to standard error.
pub struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Debug
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

#[cfg(test)]
mod tests {
    use super::{StderrLogger, init, log_info};

    // One test covers the whole lifecycle: `log::set_boxed_logger` is
    // process-global, so splitting these assertions across tests would make
    // them order-dependent.
    #[test]
    fn test_init_once_then_reject_reinit() {
        init(Box::new(StderrLogger)).unwrap();
        log_info("logging is up");
        assert!(init(Box::new(StderrLogger)).is_err());
    }
}
