#![no_std]
#![no_main]

#[macro_use]
extern crate rzt2m_hal;

use rzt2m_hal::delay::delay_cycles;
use rzt2m_hal::line::{CarriageReturn, LineReader};
use rzt2m_hal::terminal::EchoTerminal;
use rzt2m_hal::transport::Transport;
use rzt2m_hal::uart::*;
use rzt2m_hal::Peripheral;

const GREETING: &str = "Hello from CPU0 to CPU1!";

/// CPU0: greets CPU1 over SCI0, reports the answer on the SCI1 console and
/// then serves the echo terminal on SCI1.
#[rzt2m_hal::entry]
fn main() -> ! {
    let mut link = Uart::new(UART0::take().unwrap(), UartConfig::default());
    let console = Uart::new(UART1::take().unwrap(), UartConfig::default());
    rzt2m_hal::init_print(&console);
    rzt2m_hal::init_logger(log::LevelFilter::Info);

    delay_cycles(10_000);

    link.send_str(GREETING);
    link.send_str("\n");

    // SCI0 is looped back too: the first line may be our own greeting.
    let mut reader = LineReader::<64>::with_policy(CarriageReturn::Ignore);
    if reader.read_line(&mut link) == GREETING.as_bytes() {
        reader.read_line(&mut link);
    }

    println!("Hello from CPU0 to debug!");
    println!(
        "CPU0 received: {}",
        core::str::from_utf8(reader.line()).unwrap_or("<invalid utf-8>")
    );
    log::info!("starting echo terminal on SCI{}", console.number());

    // SCI1 belongs to the terminal from here on and its output loops back.
    log::set_max_level(log::LevelFilter::Off);
    let mut terminal = EchoTerminal::new(console);
    terminal.start()
}

#[panic_handler]
fn panic(info: &core::panic::PanicInfo) -> ! {
    rzt2m_hal::print_panic(info);
    rzt2m_hal::idle_forever()
}
