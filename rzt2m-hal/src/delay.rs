/// Spins for roughly `cycles` loop iterations.
///
/// There is no clock source; the duration depends entirely on the core and
/// on how fast the simulator runs it.
#[inline(never)]
pub fn delay_cycles(cycles: u32) {
    for _ in 0..cycles {
        core::hint::spin_loop();
    }
}
