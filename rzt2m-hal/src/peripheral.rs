/// A singleton hardware resource.
pub trait Peripheral {
    /// Returns the peripheral the first time it is called, `None` afterwards.
    fn take() -> Option<Self>
    where
        Self: Sized;

    /// Returns the peripheral regardless of whether it was already taken.
    ///
    /// # Safety
    ///
    /// The caller must not let two owners drive the hardware at the same time.
    unsafe fn steal() -> Self;
}
