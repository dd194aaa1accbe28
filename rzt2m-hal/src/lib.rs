#![cfg_attr(not(test), no_std)]

pub use rzt2m_pac as pac;

pub use pac::cpu_id;

#[cfg(all(target_arch = "arm", target_os = "none"))]
mod critical_section_impl;
#[cfg(all(target_arch = "arm", target_os = "none"))]
critical_section::set_impl!(critical_section_impl::SingleCoreCriticalSection);

mod peripheral;
pub use peripheral::*;

pub mod delay;
pub mod gpio;
pub mod line;
pub mod terminal;
pub mod transport;
pub mod uart;

#[cfg(feature = "print")]
mod print;
#[cfg(feature = "print")]
pub use print::*;

#[cfg(feature = "logger")]
mod logger;
#[cfg(feature = "logger")]
pub use logger::init_logger;

pub use rzt2m_hal_procmacros::entry;

//------------------------------------------------------------------------------------
// Startup

#[cfg(all(target_arch = "arm", target_os = "none"))]
core::arch::global_asm!(
    ".section .text._start, \"ax\"",
    ".global _start",
    ".type _start, %function",
    "_start:",
    "    ldr sp, =_stack_top",
    "    bl __rzt2m_start",
    "1:  b 1b",
);

#[cfg(all(target_arch = "arm", target_os = "none"))]
extern "C" {
    static mut __sbss: u32;
    static mut __ebss: u32;
    fn __rzt2m_entry() -> !;
}

#[cfg(all(target_arch = "arm", target_os = "none"))]
#[no_mangle]
unsafe extern "C" fn __rzt2m_start() -> ! {
    // The simulator loads .data in place; only .bss needs clearing.
    let mut bss = core::ptr::addr_of_mut!(__sbss);
    let end = core::ptr::addr_of_mut!(__ebss);
    while bss < end {
        core::ptr::write_volatile(bss, 0);
        bss = bss.add(1);
    }
    __rzt2m_entry()
}

/// The final state of a program with nothing left to do.
pub fn idle_forever() -> ! {
    loop {
        core::hint::spin_loop();
    }
}
