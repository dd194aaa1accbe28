use core::sync::atomic::{compiler_fence, Ordering};
use critical_section::RawRestoreState;

/// IRQ mask bit of the CPSR.
const CPSR_I: u32 = 1 << 7;

/// Single-core critical section: masks IRQs and restores the previous mask on
/// release. The restore state records whether IRQs were enabled on entry.
pub struct SingleCoreCriticalSection;

unsafe impl critical_section::Impl for SingleCoreCriticalSection {
    unsafe fn acquire() -> RawRestoreState {
        let cpsr: u32;
        core::arch::asm!("mrs {}, cpsr", out(reg) cpsr, options(nomem, nostack, preserves_flags));
        core::arch::asm!("cpsid i", options(nomem, nostack, preserves_flags));
        compiler_fence(Ordering::SeqCst);
        cpsr & CPSR_I == 0
    }

    unsafe fn release(was_enabled: RawRestoreState) {
        compiler_fence(Ordering::SeqCst);
        if was_enabled {
            core::arch::asm!("cpsie i", options(nomem, nostack, preserves_flags));
        }
    }
}
