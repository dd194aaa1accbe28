#![allow(dead_code)]

use std::collections::VecDeque;

use rzt2m_hal::terminal::{EchoTerminal, Step};
use rzt2m_hal::transport::Transport;

/// A console line with TX wired back to RX after `latency` polls, and an
/// operator typing into the same RX.
///
/// The operator only types while nothing is in flight, so typed bytes never
/// interleave with the echo.
#[derive(Default)]
pub struct LoopbackLine {
    pub latency: usize,
    clock: usize,
    in_flight: VecDeque<(usize, u8)>,
    typed: VecDeque<u8>,
    /// Everything transmitted, in order.
    pub wire: Vec<u8>,
}

impl LoopbackLine {
    pub fn with_latency(latency: usize) -> Self {
        Self {
            latency,
            ..Default::default()
        }
    }

    pub fn type_bytes(&mut self, bytes: &[u8]) {
        self.typed.extend(bytes);
    }

    /// Puts `bytes` on the receive side as if sent earlier by someone else.
    pub fn inject_echo(&mut self, bytes: &[u8]) {
        let due = self.clock;
        self.in_flight.extend(bytes.iter().map(|&b| (due, b)));
    }

    pub fn is_quiet(&self) -> bool {
        self.in_flight.is_empty() && self.typed.is_empty()
    }
}

impl Transport for LoopbackLine {
    fn send_byte(&mut self, byte: u8) {
        self.wire.push(byte);
        self.in_flight.push_back((self.clock + self.latency, byte));
    }

    fn try_receive_byte(&mut self) -> Option<u8> {
        self.clock += 1;
        match self.in_flight.front() {
            Some(&(due, byte)) if due <= self.clock => {
                self.in_flight.pop_front();
                Some(byte)
            }
            Some(_) => None,
            None => self.typed.pop_front(),
        }
    }
}

/// Polls until the line is quiet and the terminal has seen it empty.
pub fn settle<const N: usize>(term: &mut EchoTerminal<&mut LoopbackLine, N>) -> Vec<Step> {
    let mut steps = Vec::new();
    loop {
        match term.poll() {
            Step::Idle if term.transport_mut().is_quiet() => return steps,
            Step::Idle => {}
            step => steps.push(step),
        }
    }
}

pub fn reply_for(line: &[u8]) -> Vec<u8> {
    let mut reply = b"You typed: ".to_vec();
    reply.extend_from_slice(line);
    reply.extend_from_slice(b"\r\n");
    reply
}
