#![no_std]
#![no_main]

#[macro_use]
extern crate rzt2m_hal;

use embedded_hal::digital::{InputPin, OutputPin};
use rzt2m_hal::delay::delay_cycles;
use rzt2m_hal::gpio::{Input, Output, P0_0, P0_1};
use rzt2m_hal::uart::*;
use rzt2m_hal::Peripheral;

/// Single core GPIO check: drive P0.0 high, read P0.1 back and report it on
/// SCI0.
#[rzt2m_hal::entry]
fn main() -> ! {
    let uart = Uart::new(UART0::take().unwrap(), UartConfig::default());
    rzt2m_hal::init_print(&uart);

    let mut out = Output::new(P0_0::take().unwrap());
    let mut input = Input::new(P0_1::take().unwrap());
    out.set_high().unwrap();
    delay_cycles(10_000);

    let level = if input.is_high().unwrap() { "HIGH" } else { "LOW" };
    println!("CPU{}: read P0.1 = {}", rzt2m_hal::cpu_id(), level);

    loop {
        delay_cycles(1_000_000);
    }
}

#[panic_handler]
fn panic(info: &core::panic::PanicInfo) -> ! {
    rzt2m_hal::print_panic(info);
    rzt2m_hal::idle_forever()
}
