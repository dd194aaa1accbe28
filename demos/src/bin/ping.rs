#![no_std]
#![no_main]

use rzt2m_hal::delay::delay_cycles;
use rzt2m_hal::transport::Transport;
use rzt2m_hal::uart::*;
use rzt2m_hal::Peripheral;

/// Sends `ping` to the peer on SCI0 and collects a four byte answer, forever.
#[rzt2m_hal::entry]
fn main() -> ! {
    let mut link = Uart::new(UART0::take().unwrap(), UartConfig::default());
    delay_cycles(10_000); // let CPU1 boot

    loop {
        link.send_str("ping\n");
        let mut answer = [0u8; 4];
        for byte in answer.iter_mut() {
            *byte = link.receive_byte();
        }
        delay_cycles(10_000_000);
    }
}

#[panic_handler]
fn panic(info: &core::panic::PanicInfo) -> ! {
    rzt2m_hal::print_panic(info);
    rzt2m_hal::idle_forever()
}
