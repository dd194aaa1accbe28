#![no_std]
#![no_main]

use embedded_io::{Read, Write};
use rzt2m_hal::uart::*;
use rzt2m_hal::Peripheral;

/// CPU1 side of the CPU-to-CPU link: everything received on SCI0 is sent back.
#[rzt2m_hal::entry]
fn main() -> ! {
    let mut link = Uart::new(UART0::take().unwrap(), UartConfig::default());
    let mut buf = [0u8; 16];
    loop {
        let n = match link.read(&mut buf) {
            Ok(n) => n,
            Err(e) => match e {},
        };
        if let Err(e) = link.write_all(&buf[..n]) {
            match e {}
        }
    }
}

#[panic_handler]
fn panic(info: &core::panic::PanicInfo) -> ! {
    rzt2m_hal::print_panic(info);
    rzt2m_hal::idle_forever()
}
