use crate::pac;
use crate::transport::Transport;
use paste::paste;

pub trait UartPeripheral {
    fn base(&self) -> usize;
    fn number(&self) -> u8;
    fn variant(&self) -> Variant;
}

/// Register model of a UART instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// Board SCI channel: transmit through `TDR`, receive ready in `FRSR.DR`.
    Sci,
    /// Plain PL011: `DR` both ways, receive ready while `FR.RXFE` is clear.
    Pl011,
}

impl Variant {
    pub(crate) fn tx_offset(self) -> usize {
        match self {
            Variant::Sci => pac::UART_TDR,
            Variant::Pl011 => pac::UART_DR,
        }
    }
}

//-------------------------------------------------------------------
// Create the UART peripherals

macro_rules! impl_uart {
    ($n:expr) => {
        paste! {
            impl_uart!([<UART $n>], [<UART $n _TAKEN>], $n, pac::[<UART $n _BASE>], Variant::Sci);
        }
    };

    // E.g. impl_uart!(UART0, UART0_TAKEN, 0, pac::UART0_BASE, Variant::Sci);
    ($UART:ident, $UART_TAKEN:ident, $num:expr, $base:expr, $variant:expr) => {
        pub struct $UART {
            _private: (),
        }
        static mut $UART_TAKEN: bool = false;

        impl crate::Peripheral for $UART {
            fn take() -> Option<Self> {
                critical_section::with(|_| unsafe {
                    if $UART_TAKEN {
                        None
                    } else {
                        $UART_TAKEN = true;
                        Some(Self { _private: () })
                    }
                })
            }

            unsafe fn steal() -> Self {
                Self { _private: () }
            }
        }

        impl UartPeripheral for $UART {
            fn base(&self) -> usize {
                $base
            }

            fn number(&self) -> u8 {
                $num
            }

            fn variant(&self) -> Variant {
                $variant
            }
        }
    };
}

macro_rules! impl_uarts {
    ($($n:expr),*) => {
        $(impl_uart!($n);)*
    };
}

// Generates UART0 (SCI0) and UART1 (SCI1)
impl_uarts!(0, 1);

// UART0 of the generic Cortex-R52 platform
impl_uart!(PL011, PL011_TAKEN, 0, pac::PLATFORM_UART_BASE, Variant::Pl011);

//-------------------------------------------------------------------
// Configs

/// Renode does not model line timing, so the divisor defaults to the
/// placeholder `1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UartConfig {
    pub baud_divisor: BaudDivisor,
    pub data_bits: DataBits,
    pub fifo: bool,
}

impl Default for UartConfig {
    fn default() -> Self {
        Self {
            baud_divisor: BaudDivisor {
                integer: 1,
                fractional: 0,
            },
            data_bits: DataBits::Data8,
            fifo: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaudDivisor {
    pub integer: u16,
    /// In 64ths.
    pub fractional: u8,
}

impl BaudDivisor {
    /// Divisor for `baud` from a UART reference clock of `clock_hz`.
    ///
    /// `None` if `baud` is zero or the divisor does not fit the registers.
    pub fn from_baud(clock_hz: u32, baud: u32) -> Option<Self> {
        if baud == 0 {
            return None;
        }
        // divisor = clock / (16 * baud), fraction rounded to 1/64
        let scaled = (clock_hz as u64 * 4 + baud as u64 / 2) / baud as u64;
        let integer = u16::try_from(scaled >> 6).ok()?;
        if integer == 0 {
            return None;
        }
        Some(Self {
            integer,
            fractional: (scaled & 0x3F) as u8,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DataBits {
    Data5,
    Data6,
    Data7,
    Data8,
}

impl DataBits {
    pub fn value(&self) -> u32 {
        match self {
            DataBits::Data5 => pac::LCRH_WLEN_5,
            DataBits::Data6 => pac::LCRH_WLEN_6,
            DataBits::Data7 => pac::LCRH_WLEN_7,
            DataBits::Data8 => pac::LCRH_WLEN_8,
        }
    }
}

impl UartConfig {
    fn line_control(&self) -> u32 {
        let fifo = if self.fifo { pac::LCRH_FEN } else { 0 };
        self.data_bits.value() | fifo
    }
}

//-------------------------------------------------------------------
/// A polled UART. Every operation spins on the status flags.
pub struct Uart<T: UartPeripheral> {
    peripheral: T,
}

impl<T: UartPeripheral> Uart<T> {
    pub fn new(peripheral: T, config: UartConfig) -> Self {
        critical_section::with(|_| {
            let mut uart = Uart { peripheral };
            uart.set_config(&config);
            uart
        })
    }

    /// Disables the UART, programs `config` and re-enables transmit and
    /// receive.
    pub fn set_config(&mut self, config: &UartConfig) {
        let base = self.peripheral.base();
        unsafe {
            pac::write32(base + pac::UART_CR, 0);
            pac::write32(base + pac::UART_IBRD, config.baud_divisor.integer as u32);
            pac::write32(base + pac::UART_FBRD, config.baud_divisor.fractional as u32);
            pac::write32(base + pac::UART_LCRH, config.line_control());
            pac::write32(
                base + pac::UART_CR,
                pac::CR_UARTEN | pac::CR_TXE | pac::CR_RXE,
            );
        }
    }

    pub fn number(&self) -> u8 {
        self.peripheral.number()
    }

    pub fn variant(&self) -> Variant {
        self.peripheral.variant()
    }

    pub(crate) fn base(&self) -> usize {
        self.peripheral.base()
    }

    /// Address of the transmit data register.
    pub(crate) fn tx_addr(&self) -> usize {
        self.base() + self.variant().tx_offset()
    }

    pub fn tx_full(&self) -> bool {
        unsafe { pac::read32(self.base() + pac::UART_FR) & pac::FR_TXFF != 0 }
    }

    pub fn rx_ready(&self) -> bool {
        let base = self.base();
        match self.variant() {
            Variant::Sci => unsafe { pac::read32(base + pac::UART_FRSR) & pac::FRSR_DR != 0 },
            Variant::Pl011 => unsafe { pac::read32(base + pac::UART_FR) & pac::FR_RXFE == 0 },
        }
    }

    pub fn write_byte(&mut self, byte: u8) {
        write_byte_raw(self.base(), self.tx_addr(), byte);
    }

    pub fn read_byte(&mut self) -> Option<u8> {
        if !self.rx_ready() {
            return None;
        }
        Some(unsafe { pac::read32(self.base() + pac::UART_DR) as u8 })
    }
}

/// Spins until the transmit FIFO of the UART at `base` has room, then writes
/// `byte` to `tx_addr`.
pub(crate) fn write_byte_raw(base: usize, tx_addr: usize, byte: u8) {
    unsafe {
        while pac::read32(base + pac::UART_FR) & pac::FR_TXFF != 0 {
            core::hint::spin_loop();
        }
        pac::write32(tx_addr, byte as u32);
    }
}

impl<T: UartPeripheral> Transport for Uart<T> {
    fn send_byte(&mut self, byte: u8) {
        self.write_byte(byte);
    }

    fn try_receive_byte(&mut self) -> Option<u8> {
        self.read_byte()
    }
}

//-------------------------------------------------------------------
// embedded-io

#[derive(Debug)]
pub enum Error {}

impl embedded_io::Error for Error {
    fn kind(&self) -> embedded_io::ErrorKind {
        embedded_io::ErrorKind::Other
    }
}

impl<T: UartPeripheral> embedded_io::ErrorType for Uart<T> {
    type Error = Error;
}

impl<T: UartPeripheral> embedded_io::Write for Uart<T> {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Error> {
        Ok(self.send_bytes(buf))
    }

    fn flush(&mut self) -> Result<(), Error> {
        Ok(())
    }
}

impl<T: UartPeripheral> embedded_io::WriteReady for Uart<T> {
    fn write_ready(&mut self) -> Result<bool, Error> {
        Ok(!self.tx_full())
    }
}

impl<T: UartPeripheral> embedded_io::Read for Uart<T> {
    /// Spins for the first byte, then takes whatever else is already pending.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Error> {
        if buf.is_empty() {
            return Ok(0);
        }
        buf[0] = self.receive_byte();
        let mut n = 1;
        while n < buf.len() {
            match self.read_byte() {
                Some(byte) => {
                    buf[n] = byte;
                    n += 1;
                }
                None => break,
            }
        }
        Ok(n)
    }
}

impl<T: UartPeripheral> embedded_io::ReadReady for Uart<T> {
    fn read_ready(&mut self) -> Result<bool, Error> {
        Ok(self.rx_ready())
    }
}
