use super::println;

static LOGGER: RzLogger = RzLogger;

/// Installs the console logger with the given maximum log level.
///
/// Records are written synchronously through [`println!`], so they land on the
/// UART given to [`crate::init_print`].
pub fn init_logger(level: log::LevelFilter) {
    unsafe {
        // Single core, called once during startup.
        if log::set_logger_racy(&LOGGER).is_err() {
            return;
        }
        log::set_max_level_racy(level);
    }
}

struct RzLogger;

impl log::Log for RzLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    #[allow(unused)]
    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        const RESET: &str = "\u{001B}[0m";
        const RED: &str = "\u{001B}[31m";
        const GREEN: &str = "\u{001B}[32m";
        const YELLOW: &str = "\u{001B}[33m";
        const BLUE: &str = "\u{001B}[34m";
        const MAGENTA: &str = "\u{001B}[35m";

        #[cfg(feature = "log-colors")]
        let (color, reset) = (
            match record.level() {
                log::Level::Error => RED,
                log::Level::Warn => YELLOW,
                log::Level::Info => GREEN,
                log::Level::Debug => BLUE,
                log::Level::Trace => MAGENTA,
            },
            RESET,
        );

        #[cfg(not(feature = "log-colors"))]
        let (color, reset) = ("", "");

        println!("{}{} - {}{}", color, record.level(), record.args(), reset);
    }

    fn flush(&self) {}
}
