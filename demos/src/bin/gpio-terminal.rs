#![no_std]
#![no_main]

#[macro_use]
extern crate rzt2m_hal;

use embedded_hal::digital::{InputPin, OutputPin};
use rzt2m_hal::delay::delay_cycles;
use rzt2m_hal::gpio::{Input, Output, P0_0, P0_1};
use rzt2m_hal::line::{CarriageReturn, LineReader};
use rzt2m_hal::terminal::EchoTerminal;
use rzt2m_hal::transport::Transport;
use rzt2m_hal::uart::*;
use rzt2m_hal::Peripheral;

/// CPU1: reads CPU0's greeting from SCI0, answers it, drives P0.0 high,
/// reports P0.1 on both UARTs and then serves the echo terminal on SCI1.
#[rzt2m_hal::entry]
fn main() -> ! {
    let mut link = Uart::new(UART0::take().unwrap(), UartConfig::default());
    let console = Uart::new(UART1::take().unwrap(), UartConfig::default());
    rzt2m_hal::init_print(&console);
    rzt2m_hal::init_logger(log::LevelFilter::Info);

    delay_cycles(10_000);

    let mut reader = LineReader::<64>::with_policy(CarriageReturn::Ignore);
    let received = reader.read_line(&mut link);

    println!("Hello from CPU1 debug!");
    println!(
        "CPU1 received: {}",
        core::str::from_utf8(received).unwrap_or("<invalid utf-8>")
    );

    link.send_str("Hello from CPU1 to CPU0!\n");

    let mut led = Output::new(P0_0::take().unwrap());
    let mut button = Input::new(P0_1::take().unwrap());
    led.set_high().unwrap();
    delay_cycles(10_000);
    println!("CPU1: set P0.0 HIGH");
    link.send_str("CPU1: set P0.0 HIGH\n");

    let high = button.is_high().unwrap();
    let level = if high { "HIGH" } else { "LOW" };
    println!("CPU1: read P0.1 = {}", level);
    link.send_str("CPU1: read P0.1 = ");
    link.send_str(level);
    link.send_str("\n");
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
