//! Line echo terminal for a looped-back serial line.
//!
//! The terminal assembles lines with a [`LineReader`] and answers every
//! non-empty line `L` with `prefix + L + "\r\n"`. On the simulated board the
//! transmit and receive pins of the console are joined, so each reply comes
//! back in on the receive side. After replying the terminal therefore discards
//! exactly as many received bytes as it just sent before it treats input as
//! typed text again.
//!
//! ```text
//!   Listening --(non-empty line)--> reply --> Draining { remaining }
//!       ^                                          |
//!       +------------(remaining hits 0)------------+
//! ```
//!
//! Empty lines produce no reply and no drain.
//!
//! Anything else written to the terminal's line while it runs (log output in
//! particular) also loops back and upsets the drain count, so the terminal
//! itself does not log once [`EchoTerminal::run`] is entered.

use crate::delay::delay_cycles;
use crate::line::{LineEvent, LineReader, MAX_LINE};
use crate::transport::{flush_until_idle, Transport};

pub const REPLY_PREFIX: &str = "You typed: ";

/// Line terminator of every reply.
pub const CRLF: &[u8; 2] = b"\r\n";

/// Number of looped-back bytes to discard after replying to a line of
/// `line_len` bytes with a prefix of `prefix_len` bytes.
///
/// This is the length of the reply as written by [`EchoTerminal`]: the prefix
/// and the line go out verbatim and are followed by [`CRLF`].
pub const fn suppression_count(prefix_len: usize, line_len: usize) -> usize {
    prefix_len + line_len + CRLF.len()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalConfig {
    /// Sent verbatim ahead of the echoed line.
    pub prefix: &'static str,
    /// Consecutive empty polls that end the startup flush.
    pub flush_idle_polls: u32,
    /// Busy-wait iterations before the startup flush.
    pub startup_delay: u32,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            prefix: REPLY_PREFIX,
            flush_idle_polls: 2000,
            startup_delay: 20_000_000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Received bytes go to the line editor.
    Listening,
    /// Received bytes are our own reply coming back and are discarded.
    Draining { remaining: usize },
}

/// What a single [`EchoTerminal::poll`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Nothing was pending.
    Idle,
    /// A byte went to the line editor without completing a line.
    Received(u8),
    /// An empty line was committed; nothing was sent.
    EmptyLine,
    /// A line was echoed; `sent` bytes went out and as many will be drained.
    Replied { sent: usize },
    /// A looped-back byte was discarded and more are expected.
    Discarded { remaining: usize },
    /// The last looped-back byte was discarded; listening again.
    Resumed,
}

pub struct EchoTerminal<T: Transport, const N: usize = MAX_LINE> {
    transport: T,
    reader: LineReader<N>,
    state: State,
    config: TerminalConfig,
}

impl<T: Transport> EchoTerminal<T> {
    pub fn new(transport: T) -> Self {
        Self::with_config(transport, TerminalConfig::default())
    }
}

impl<T: Transport, const N: usize> EchoTerminal<T, N> {
    pub fn with_config(transport: T, config: TerminalConfig) -> Self {
        Self {
            transport,
            reader: LineReader::new(),
            state: State::Listening,
            config,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn config(&self) -> &TerminalConfig {
        &self.config
    }

    /// The line being edited.
    pub fn line(&self) -> &[u8] {
        self.reader.line()
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn release(self) -> T {
        self.transport
    }

    /// Waits out the startup delay, flushes stale input and runs the terminal.
    ///
    /// The flush comes last so that it also swallows anything looped back
    /// during the delay, including the log line written here.
    pub fn start(&mut self) -> ! {
        delay_cycles(self.config.startup_delay);
        log::debug!(
            "terminal starting, flushing until {} idle polls",
            self.config.flush_idle_polls
        );
        flush_until_idle(&mut self.transport, self.config.flush_idle_polls);
        self.run()
    }

    pub fn run(&mut self) -> ! {
        loop {
            self.poll();
        }
    }

    /// Polls the transport once and advances the state machine.
    pub fn poll(&mut self) -> Step {
        match self.state {
            State::Draining { remaining } => {
                if self.transport.try_receive_byte().is_none() {
                    return Step::Idle;
                }
                let remaining = remaining - 1;
                if remaining > 0 {
                    self.state = State::Draining { remaining };
                    return Step::Discarded { remaining };
                }
                self.reader.clear();
                self.state = State::Listening;
                Step::Resumed
            }
            State::Listening => {
                let Some(byte) = self.transport.try_receive_byte() else {
                    return Step::Idle;
                };
                match self.reader.push(byte) {
                    LineEvent::Pending => Step::Received(byte),
                    LineEvent::Committed(0) => Step::EmptyLine,
                    LineEvent::Committed(len) => {
                        let sent = self.reply(len);
                        Step::Replied { sent }
                    }
                }
            }
        }
    }

    fn reply(&mut self, len: usize) -> usize {
        let prefix = self.config.prefix.as_bytes();
        let line = self.reader.line();
        let sent = self.transport.send_bytes(prefix)
            + self.transport.send_bytes(line)
            + self.transport.send_bytes(CRLF);

        let remaining = suppression_count(prefix.len(), len);
        debug_assert_eq!(sent, remaining, "drain count out of step with reply");

        self.reader.clear();
        self.state = State::Draining { remaining };
        sent
    }
}
