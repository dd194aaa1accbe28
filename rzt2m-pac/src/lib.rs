#![no_std]

mod gpio;
pub use gpio::*;

mod uart;
pub use uart::*;

/// Reads a 32-bit register.
///
/// # Safety
///
/// `addr` must be a valid, aligned MMIO register address.
#[inline(always)]
pub unsafe fn read32(addr: usize) -> u32 {
    core::ptr::read_volatile(addr as *const u32)
}

/// Writes a 32-bit register.
///
/// # Safety
///
/// `addr` must be a valid, aligned MMIO register address.
#[inline(always)]
pub unsafe fn write32(addr: usize, value: u32) {
    core::ptr::write_volatile(addr as *mut u32, value)
}

/// # Safety
///
/// `addr` must be a valid, aligned MMIO register address.
#[inline(always)]
pub unsafe fn read16(addr: usize) -> u16 {
    core::ptr::read_volatile(addr as *const u16)
}

/// # Safety
///
/// `addr` must be a valid, aligned MMIO register address.
#[inline(always)]
pub unsafe fn write16(addr: usize, value: u16) {
    core::ptr::write_volatile(addr as *mut u16, value)
}

/// # Safety
///
/// `addr` must be a valid MMIO register address.
#[inline(always)]
pub unsafe fn read8(addr: usize) -> u8 {
    core::ptr::read_volatile(addr as *const u8)
}

/// # Safety
///
/// `addr` must be a valid MMIO register address.
#[inline(always)]
pub unsafe fn write8(addr: usize, value: u8) {
    core::ptr::write_volatile(addr as *mut u8, value)
}

/// Index of the Cortex-R52 core executing this code (MPIDR.Aff0).
#[cfg(target_arch = "arm")]
#[inline]
pub fn cpu_id() -> usize {
    let mpidr: u32;
    unsafe {
        core::arch::asm!("mrc p15, 0, {}, c0, c0, 5", out(reg) mpidr, options(nomem, nostack));
    }
    (mpidr & 0xFF) as usize
}

#[cfg(not(target_arch = "arm"))]
#[inline]
pub fn cpu_id() -> usize {
    0
}
