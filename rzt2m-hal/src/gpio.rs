//! Port GPIO of the simulated board.
//!
//! Each port has an 8-bit data register and a 16-bit mode register with two
//! bits per pin. Mode and level changes are read-modify-write and are done
//! inside a critical section.

use core::convert::Infallible;

use crate::pac;
use paste::paste;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinMode {
    Input,
    Output,
}

impl PinMode {
    fn bits(self) -> u16 {
        match self {
            PinMode::Input => pac::GPIO_PMODE_INPUT,
            PinMode::Output => pac::GPIO_PMODE_OUTPUT,
        }
    }
}

/// `pmode` with the mode field of `pin` replaced.
fn with_mode(pmode: u16, pin: u8, mode: PinMode) -> u16 {
    let shift = 2 * pin as u16;
    (pmode & !(pac::GPIO_PMODE_MASK << shift)) | (mode.bits() << shift)
}

/// `port` with bit `pin` set to `level`.
fn with_level(port: u8, pin: u8, level: bool) -> u8 {
    if level {
        port | (1 << pin)
    } else {
        port & !(1 << pin)
    }
}

#[doc(hidden)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pin {
    port: u8,
    number: u8,
}

impl Pin {
    // Meant to be used only by board-support code
    #[doc(hidden)]
    pub const fn new(port: u8, number: u8) -> Self {
        debug_assert!(number < pac::GPIO_PINS_PER_PORT);
        Self { port, number }
    }

    pub fn port(&self) -> u8 {
        self.port
    }

    pub fn number(&self) -> u8 {
        self.number
    }

    #[doc(hidden)]
    pub fn set_mode(&self, mode: PinMode) {
        log::trace!("Configuring GPIO P{}.{} as {:?}", self.port, self.number, mode);
        let addr = pac::gpio_pmode_addr(self.port);
        critical_section::with(|_| unsafe {
            let pmode = pac::read16(addr);
            pac::write16(addr, with_mode(pmode, self.number, mode));
        });
    }

    #[doc(hidden)]
    pub fn set_level(&self, level: bool) {
        log::trace!("Setting GPIO P{}.{} to {}", self.port, self.number, level);
        let addr = pac::gpio_port_addr(self.port);
        critical_section::with(|_| unsafe {
            let port = pac::read8(addr);
            pac::write8(addr, with_level(port, self.number, level));
        });
    }

    #[doc(hidden)]
    pub fn is_high(&self) -> bool {
        let port = unsafe { pac::read8(pac::gpio_port_addr(self.port)) };
        (port >> self.number) & 1 != 0
    }
}

/// All GPIO pins implement this trait
pub trait GpioPin: 'static {
    #[doc(hidden)]
    fn address(&self) -> Pin;
}

//----------------------------------------------------------------------
// Output

pub struct Output {
    pub pin: Pin,
}

impl Output {
    pub fn new<P: GpioPin>(pin: P) -> Self {
        let address = pin.address();
        address.set_mode(PinMode::Output);
        Self { pin: address }
    }
}

impl embedded_hal::digital::ErrorType for Output {
    type Error = Infallible;
}

impl embedded_hal::digital::OutputPin for Output {
    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.pin.set_level(true);
        Ok(())
    }

    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.pin.set_level(false);
        Ok(())
    }
}

impl embedded_hal::digital::StatefulOutputPin for Output {
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.pin.is_high())
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.pin.is_high())
    }
}

//----------------------------------------------------------------------
// Input

pub struct Input {
    pub pin: Pin,
}

impl Input {
    pub fn new<P: GpioPin>(pin: P) -> Self {
        let address = pin.address();
        address.set_mode(PinMode::Input);
        Self { pin: address }
    }
}

impl embedded_hal::digital::ErrorType for Input {
    type Error = Infallible;
}

impl embedded_hal::digital::InputPin for Input {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.pin.is_high())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.pin.is_high())
    }
}

//----------------------------------------------------------------------

macro_rules! impl_gpio_pin {
    ($port:literal, $n:literal) => {
        paste! {
            impl_gpio_pin!([<P $port _ $n>], [<P $port _ $n _TAKEN>], $port, $n);
        }
    };

    ($PIN:ident, $PIN_TAKEN:ident, $port:literal, $num:literal) => {
        pub struct $PIN {
            _private: (),
        }
        static mut $PIN_TAKEN: bool = false;

        impl crate::Peripheral for $PIN {
            fn take() -> Option<Self> {
                critical_section::with(|_| unsafe {
                    if $PIN_TAKEN {
                        None
                    } else {
                        $PIN_TAKEN = true;
                        Some(Self { _private: () })
                    }
                })
            }

            unsafe fn steal() -> Self {
                Self { _private: () }
            }
        }

        impl GpioPin for $PIN {
            fn address(&self) -> Pin {
                Pin::new($port, $num)
            }
        }
    };
}

macro_rules! impl_gpio_port {
    ($port:literal) => {
        impl_gpio_pin!($port, 0);
        impl_gpio_pin!($port, 1);
        impl_gpio_pin!($port, 2);
        impl_gpio_pin!($port, 3);
        impl_gpio_pin!($port, 4);
        impl_gpio_pin!($port, 5);
        impl_gpio_pin!($port, 6);
        impl_gpio_pin!($port, 7);
    };
}

// P0_0 .. P3_7
impl_gpio_port!(0);
impl_gpio_port!(1);
impl_gpio_port!(2);
impl_gpio_port!(3);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_field_is_two_bits_per_pin() {
        assert_eq!(with_mode(0x0000, 0, PinMode::Output), 0b10);
        assert_eq!(with_mode(0x0000, 3, PinMode::Output), 0b10 << 6);
        assert_eq!(with_mode(0xFFFF, 1, PinMode::Input), 0xFFF3);
        assert_eq!(with_mode(0b11, 0, PinMode::Output), 0b10);
    }

    #[test]
    fn every_pin_of_a_port_has_its_own_fields() {
        for pin in 0..pac::GPIO_PINS_PER_PORT {
            assert_eq!(with_level(0, pin, true).count_ones(), 1);
            assert_eq!(with_mode(0, pin, PinMode::Output).count_ones(), 1);
            let others = with_level(0, pin, true) ^ 0xFF;
            assert_eq!(with_level(0xFF, pin, false), others);
        }
    }

    #[test]
    #[should_panic]
    fn pin_number_past_port_width_is_rejected() {
        let _ = Pin::new(0, pac::GPIO_PINS_PER_PORT);
    }

    #[test]
    fn level_touches_only_its_bit() {
        assert_eq!(with_level(0b0000_0000, 0, true), 0b0000_0001);
        assert_eq!(with_level(0b1111_1111, 1, false), 0b1111_1101);
        assert_eq!(with_level(0b1000_0000, 7, true), 0b1000_0000);
    }
}
