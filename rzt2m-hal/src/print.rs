use crate::uart::{write_byte_raw, Uart, UartPeripheral};
use core::panic::PanicInfo;
use core::sync::atomic::{AtomicUsize, Ordering};

// Base address of the console UART, 0 until `init_print` runs.
static CONSOLE_BASE: AtomicUsize = AtomicUsize::new(0);
static CONSOLE_TX: AtomicUsize = AtomicUsize::new(0);

/// Routes `print!`/`println!` to `uart`.
///
/// The printer writes to the UART's registers directly and does not take
/// ownership, so the same UART can also be handed to other code afterwards.
pub fn init_print<T: UartPeripheral>(uart: &Uart<T>) {
    CONSOLE_TX.store(uart.tx_addr(), Ordering::Relaxed);
    CONSOLE_BASE.store(uart.base(), Ordering::Release);
}

fn console_puts(base: usize, tx_addr: usize, s: &str) {
    for byte in s.bytes() {
        if byte == b'\n' {
            write_byte_raw(base, tx_addr, b'\r');
        }
        write_byte_raw(base, tx_addr, byte);
    }
}

pub struct Printer;

impl Printer {
    // Hold the critical section across the whole `writeln`, which calls
    // `write_str` several times.
    pub fn with_lock<F>(f: F)
    where
        F: FnOnce(),
    {
        critical_section::with(|_| f());
    }
}

impl core::fmt::Write for Printer {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        let base = CONSOLE_BASE.load(Ordering::Acquire);
        if base != 0 {
            console_puts(base, CONSOLE_TX.load(Ordering::Relaxed), s);
        }
        Ok(())
    }
}

#[macro_export]
macro_rules! println {
    ($($arg:tt)*) => {{
        {
            use core::fmt::Write;
            $crate::Printer::with_lock(|| {
                writeln!($crate::Printer, $($arg)*).ok();
            });
        }
    }};
}

#[macro_export]
macro_rules! print {
    ($($arg:tt)*) => {{
        {
            use core::fmt::Write;
            $crate::Printer::with_lock(|| {
                write!($crate::Printer, $($arg)*).ok();
            });
        }
    }};
}

pub fn print_panic(panic: &PanicInfo<'_>) {
    // No critical section here: the panic may have happened inside one.
    use core::fmt::Write;
    if let Some(location) = panic.location() {
        writeln!(
            Printer,
            "PANIC at {}:{}: {}",
            location.file(),
            location.line(),
            panic.message()
        )
        .ok();
    } else {
        writeln!(Printer, "PANIC: {}", panic.message()).ok();
    }
}
