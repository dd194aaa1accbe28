#![no_std]
#![no_main]

use rzt2m_hal::delay::delay_cycles;
use rzt2m_hal::transport::Transport;
use rzt2m_hal::uart::*;
use rzt2m_hal::Peripheral;

/// CPU0 side of the CPU-to-CPU link: one greeting on SCI0, then idle.
#[rzt2m_hal::entry]
fn main() -> ! {
    let mut link = Uart::new(UART0::take().unwrap(), UartConfig::default());
    delay_cycles(10_000);
    link.send_str("Hello from CPU0 to CPU1!\n");
    rzt2m_hal::idle_forever()
}

#[panic_handler]
fn panic(info: &core::panic::PanicInfo) -> ! {
    rzt2m_hal::print_panic(info);
    rzt2m_hal::idle_forever()
}
