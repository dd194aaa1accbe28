#![no_std]
#![no_main]

#[macro_use]
extern crate rzt2m_hal;

use rzt2m_hal::uart::*;
use rzt2m_hal::Peripheral;

/// Greeting on the PL011 of Renode's generic Cortex-R52 platform.
#[rzt2m_hal::entry]
fn main() -> ! {
    let uart = Uart::new(PL011::take().unwrap(), UartConfig::default());
    rzt2m_hal::init_print(&uart);
    println!("\nHello, World!");
    rzt2m_hal::idle_forever()
}

#[panic_handler]
fn panic(info: &core::panic::PanicInfo) -> ! {
    rzt2m_hal::print_panic(info);
    rzt2m_hal::idle_forever()
}
