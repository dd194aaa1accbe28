#![no_std]
#![no_main]

#[macro_use]
extern crate rzt2m_hal;

use rzt2m_hal::delay::delay_cycles;
use rzt2m_hal::uart::*;
use rzt2m_hal::Peripheral;

/// Word to watch, in the part of SRAM left out of the image by `memory.x`.
/// Poke it from the Renode monitor to see the change reported.
const WATCH_ADDR: usize = 0x1000_0200;
const POLL_DELAY: u32 = 800_000;

/// RZ/T2M memory watch: reports changes of one SRAM word on SCI0.
#[rzt2m_hal::entry]
fn main() -> ! {
    let uart = Uart::new(UART0::take().unwrap(), UartConfig::default());
    rzt2m_hal::init_print(&uart);

    let watched = WATCH_ADDR as *const u32;
    let read = || unsafe { core::ptr::read_volatile(watched) };

    println!("\n[RZ/T2M] UART up. Memory watch demo.");
    println!(
        "Watching 32-bit word at 0x{:08X} (change it from Renode to see updates)",
        WATCH_ADDR
    );

    let mut last = read();
    println!("Initial value: 0x{:08X}", last);

    loop {
        let value = read();
        if value != last {
            println!(
                "Change detected @0x{:08X}: 0x{:08X} -> 0x{:08X}",
                WATCH_ADDR, last, value
            );
            last = value;
        }
        delay_cycles(POLL_DELAY);
    }
}

#[panic_handler]
fn panic(info: &core::panic::PanicInfo) -> ! {
    rzt2m_hal::print_panic(info);
    rzt2m_hal::idle_forever()
}
