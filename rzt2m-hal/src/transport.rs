//! Byte-level capability the line editor and the echo terminal are built on.
//!
//! Every wait is a spin on [`Transport::try_receive_byte`]; nothing here blocks
//! in any other way.

/// A serial link that can send one byte and poll for one received byte.
pub trait Transport {
    /// Sends `byte`, spinning until the transmitter can take it.
    fn send_byte(&mut self, byte: u8);

    /// Returns the next received byte, or `None` if nothing is pending.
    fn try_receive_byte(&mut self) -> Option<u8>;

    /// Spins until a byte arrives.
    fn receive_byte(&mut self) -> u8 {
        loop {
            if let Some(byte) = self.try_receive_byte() {
                return byte;
            }
            core::hint::spin_loop();
        }
    }

    /// Sends `bytes` unchanged. Returns the number of bytes put on the wire.
    fn send_bytes(&mut self, bytes: &[u8]) -> usize {
        for &byte in bytes {
            self.send_byte(byte);
        }
        bytes.len()
    }

    /// Sends `s`, preceding every `\n` with a `\r`.
    ///
    /// Returns the number of bytes put on the wire, which is
    /// [`wire_len`]`(s.as_bytes())`.
    fn send_str(&mut self, s: &str) -> usize {
        let mut sent = 0;
        for &byte in s.as_bytes() {
            if byte == b'\n' {
                self.send_byte(b'\r');
                sent += 1;
            }
            self.send_byte(byte);
            sent += 1;
        }
        sent
    }
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn send_byte(&mut self, byte: u8) {
        (**self).send_byte(byte)
    }

    fn try_receive_byte(&mut self) -> Option<u8> {
        (**self).try_receive_byte()
    }
}

/// Number of bytes [`Transport::send_str`] puts on the wire for `bytes`.
pub fn wire_len(bytes: &[u8]) -> usize {
    bytes.len() + bytes.iter().filter(|&&b| b == b'\n').count()
}

/// Discards pending input until `idle_polls` consecutive polls find nothing.
///
/// Each received byte resets the idle count, so this returns exactly
/// `idle_polls` empty polls after the last byte. The count is in poll
/// iterations, not time. Returns the number of bytes discarded.
///
/// Nothing is logged here: the flushed line may be the one the logger writes to.
pub fn flush_until_idle<T: Transport>(transport: &mut T, idle_polls: u32) -> usize {
    let mut idle = 0;
    let mut dropped = 0;
    while idle < idle_polls {
        if transport.try_receive_byte().is_some() {
            dropped += 1;
            idle = 0;
        } else {
            idle += 1;
        }
    }
    dropped
}
