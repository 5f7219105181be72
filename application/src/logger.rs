use core::fmt::Write;

use arrayvec::ArrayString;
use cortex_m_semihosting::hio;
use log::{LevelFilter, Log, Metadata, Record};

// Semihosting stalls the core until the debugger answers, keep the lines short.
const LINE_SIZE: usize = 128;

struct SemihostingLogger;

static LOGGER: SemihostingLogger = SemihostingLogger;

impl Log for SemihostingLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let mut line = ArrayString::<LINE_SIZE>::new();
        write!(line, "{:<5} {}: {}", record.level(), record.target(), record.args()).ok();

        if let Ok(mut out) = hio::hstdout() {
            out.write_str(&line).ok();
            out.write_str("\n").ok();
        }
    }

    fn flush(&self) {}
}

pub fn init(level: LevelFilter) {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}
