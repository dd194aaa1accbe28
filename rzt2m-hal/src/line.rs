//! Line assembly with terminal editing.
//!
//! Bytes are fed one at a time to a [`LineState`], which applies the editing
//! rules to a caller-provided buffer. [`LineReader`] owns a fixed buffer and
//! adds the blocking [`LineReader::read_line`]; [`read_line`] does the same for
//! a borrowed buffer.
//!
//! With [`CarriageReturn::Terminate`] (the interactive editor):
//!
//! - `\r` and `\n` commit the line. A `\n` directly after a `\r` is swallowed,
//!   so `\r\n` commits once.
//! - Backspace (0x08) and delete (0x7F) remove the last buffered byte, if any.
//! - Anything else is appended while there is room and dropped otherwise. A
//!   full buffer never commits on its own.
//!
//! With [`CarriageReturn::Ignore`] (raw link reads): `\r` is discarded, only
//! `\n` commits, editing bytes are ordinary data, and the line commits as soon
//! as the buffer is full.
//!
//! A buffer of `N` bytes holds at most `N - 1` bytes of line, the last slot
//! being reserved for a terminator.

use crate::transport::Transport;

/// Default line buffer size, terminator slot included.
pub const MAX_LINE: usize = 128;

pub const BACKSPACE: u8 = 0x08;
pub const DELETE: u8 = 0x7F;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum CarriageReturn {
    /// `\r` commits the line, `\r\n` collapses into one commit.
    #[default]
    Terminate,
    /// `\r` is dropped.
    Ignore,
}

/// Outcome of feeding one byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEvent {
    /// The byte was consumed and the line is still open.
    Pending,
    /// The line was committed with this many bytes.
    Committed(usize),
}

/// Editing state for a line held in an external buffer.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LineState {
    len: usize,
    last_was_cr: bool,
    committed: bool,
    policy: CarriageReturn,
}

impl LineState {
    pub const fn new(policy: CarriageReturn) -> Self {
        Self {
            len: 0,
            last_was_cr: false,
            committed: false,
            policy,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn policy(&self) -> CarriageReturn {
        self.policy
    }

    /// Drops the buffered bytes and forgets a pending `\r`.
    pub fn clear(&mut self) {
        self.len = 0;
        self.last_was_cr = false;
        self.committed = false;
    }

    /// Applies `byte` to the line held in `buf`.
    ///
    /// `buf` must be the same buffer across calls. A committed line stays in
    /// `buf[..len]` until the next byte is pushed, or past the swallowed `\n`
    /// of a `\r\n`.
    pub fn push(&mut self, buf: &mut [u8], byte: u8) -> LineEvent {
        let capacity = buf.len().saturating_sub(1);
        // The `\n` of a `\r\n` belongs to the line the `\r` committed.
        if self.last_was_cr && byte == b'\n' {
            self.last_was_cr = false;
            return LineEvent::Pending;
        }
        if self.committed {
            self.len = 0;
            self.committed = false;
        }

        match (byte, self.policy) {
            (b'\r', CarriageReturn::Ignore) => LineEvent::Pending,
            (b'\r' | b'\n', _) => {
                self.last_was_cr = byte == b'\r';
                self.commit()
            }
            (BACKSPACE | DELETE, CarriageReturn::Terminate) => {
                self.len = self.len.saturating_sub(1);
                self.last_was_cr = false;
                LineEvent::Pending
            }
            _ => {
                self.last_was_cr = false;
                if self.len < capacity {
                    buf[self.len] = byte;
                    self.len += 1;
                }
                if self.policy == CarriageReturn::Ignore && self.len == capacity {
                    return self.commit();
                }
                LineEvent::Pending
            }
        }
    }

    fn commit(&mut self) -> LineEvent {
        self.committed = true;
        LineEvent::Committed(self.len)
    }
}

/// A line editor with its own `N`-byte buffer.
#[derive(Debug, Clone)]
pub struct LineReader<const N: usize = MAX_LINE> {
    buf: [u8; N],
    state: LineState,
}

impl<const N: usize> Default for LineReader<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> LineReader<N> {
    /// An interactive editor.
    pub const fn new() -> Self {
        Self::with_policy(CarriageReturn::Terminate)
    }

    pub const fn with_policy(policy: CarriageReturn) -> Self {
        Self {
            buf: [0; N],
            state: LineState::new(policy),
        }
    }

    /// Most bytes a line can hold.
    pub const fn capacity(&self) -> usize {
        N.saturating_sub(1)
    }

    /// The current, or just committed, line.
    pub fn line(&self) -> &[u8] {
        &self.buf[..self.state.len()]
    }

    pub fn len(&self) -> usize {
        self.state.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    pub fn clear(&mut self) {
        self.state.clear();
    }

    pub fn push(&mut self, byte: u8) -> LineEvent {
        self.state.push(&mut self.buf, byte)
    }

    /// Spins on `transport` until a line is committed and returns it.
    pub fn read_line<T: Transport>(&mut self, transport: &mut T) -> &[u8] {
        read_into(transport, &mut self.state, &mut self.buf);
        self.line()
    }
}

/// Reads one interactively edited line into `buf`, returning its length.
///
/// The length is at most `buf.len() - 1`. Spins until a terminator arrives.
pub fn read_line<T: Transport>(transport: &mut T, buf: &mut [u8]) -> usize {
    let mut state = LineState::new(CarriageReturn::Terminate);
    read_into(transport, &mut state, buf)
}

fn read_into<T: Transport>(transport: &mut T, state: &mut LineState, buf: &mut [u8]) -> usize {
    if state.policy() == CarriageReturn::Ignore && buf.len() <= 1 {
        state.clear();
        return 0;
    }
    loop {
        if let LineEvent::Committed(len) = state.push(buf, transport.receive_byte()) {
            return len;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::tests::FakeLine;

    fn feed<const N: usize>(reader: &mut LineReader<N>, bytes: &[u8]) -> Vec<LineEvent> {
        bytes.iter().map(|&b| reader.push(b)).collect()
    }

    #[test]
    fn newline_commits_line() {
        let mut reader = LineReader::<MAX_LINE>::new();
        let events = feed(&mut reader, b"hello\n");
        assert_eq!(events.last(), Some(&LineEvent::Committed(5)));
        assert_eq!(reader.line(), b"hello");
    }

    #[test]
    fn carriage_return_commits_and_swallows_following_newline() {
        let mut reader = LineReader::<MAX_LINE>::new();
        let events = feed(&mut reader, b"ab\r\ncd\r\n");
        let commits: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, LineEvent::Committed(_)))
            .collect();
        assert_eq!(commits, [&LineEvent::Committed(2), &LineEvent::Committed(2)]);
        assert_eq!(reader.line(), b"cd");
    }

    #[test]
    fn committed_line_survives_its_crlf_newline() {
        let mut reader = LineReader::<MAX_LINE>::new();
        reader.push(b'h');
        reader.push(b'i');
        assert_eq!(reader.push(b'\r'), LineEvent::Committed(2));
        assert_eq!(reader.line(), b"hi");
        assert_eq!(reader.push(b'\n'), LineEvent::Pending);
        assert_eq!(reader.line(), b"hi");

        reader.push(b'x');
        assert_eq!(reader.line(), b"x");
    }

    #[test]
    fn lone_newlines_each_commit_empty_lines() {
        let mut reader = LineReader::<MAX_LINE>::new();
        assert_eq!(reader.push(b'\n'), LineEvent::Committed(0));
        assert_eq!(reader.push(b'\n'), LineEvent::Committed(0));
        assert_eq!(reader.push(b'\r'), LineEvent::Committed(0));
        assert_eq!(reader.push(b'\r'), LineEvent::Committed(0));
        assert_eq!(reader.push(b'\n'), LineEvent::Pending);
    }

    #[test]
    fn backspace_and_delete_remove_last_byte() {
        let mut reader = LineReader::<MAX_LINE>::new();
        feed(&mut reader, b"abx\x08c\x7f\x7fd\n");
        assert_eq!(reader.line(), b"ad");
    }

    #[test]
    fn backspace_on_empty_line_is_noop() {
        let mut reader = LineReader::<MAX_LINE>::new();
        let events = feed(&mut reader, b"\x08\x7f\x08ok\n");
        assert_eq!(events.last(), Some(&LineEvent::Committed(2)));
        assert_eq!(reader.line(), b"ok");
    }

    #[test]
    fn backspace_breaks_crlf_pair() {
        let mut reader = LineReader::<MAX_LINE>::new();
        assert_eq!(reader.push(b'\r'), LineEvent::Committed(0));
        assert_eq!(reader.push(BACKSPACE), LineEvent::Pending);
        assert_eq!(reader.push(b'\n'), LineEvent::Committed(0));
    }

    #[test]
    fn overflow_is_dropped_without_commit() {
        let mut reader = LineReader::<4>::new();
        let events = feed(&mut reader, b"abcdef");
        assert!(events.iter().all(|e| *e == LineEvent::Pending));
        assert_eq!(reader.line(), b"abc");
        assert_eq!(reader.push(b'\n'), LineEvent::Committed(3));
    }

    #[test]
    fn backspace_after_overflow_edits_buffered_tail() {
        let mut reader = LineReader::<4>::new();
        feed(&mut reader, b"abcdef\x08z\n");
        assert_eq!(reader.line(), b"abz");
    }

    #[test]
    fn next_byte_starts_a_fresh_line() {
        let mut reader = LineReader::<MAX_LINE>::new();
        feed(&mut reader, b"first\n");
        assert_eq!(reader.line(), b"first");
        reader.push(b'x');
        assert_eq!(reader.line(), b"x");
    }

    #[test]
    fn ignore_policy_drops_carriage_returns() {
        let mut reader = LineReader::<MAX_LINE>::with_policy(CarriageReturn::Ignore);
        let events = feed(&mut reader, b"a\rb\r\n");
        assert_eq!(events.last(), Some(&LineEvent::Committed(2)));
        assert_eq!(reader.line(), b"ab");
    }

    #[test]
    fn ignore_policy_keeps_editing_bytes_and_commits_when_full() {
        let mut reader = LineReader::<4>::with_policy(CarriageReturn::Ignore);
        assert_eq!(reader.push(b'a'), LineEvent::Pending);
        assert_eq!(reader.push(BACKSPACE), LineEvent::Pending);
        assert_eq!(reader.push(b'c'), LineEvent::Committed(3));
        assert_eq!(reader.line(), b"a\x08c");
    }

    #[test]
    fn read_line_spins_until_terminator() {
        let mut link = FakeLine::default();
        link.silence(3);
        link.feed(b"hi");
        link.silence(2);
        link.feed(b"\r\nrest");

        let mut buf = [0u8; 16];
        let len = read_line(&mut link, &mut buf);

        assert_eq!(&buf[..len], b"hi");
        assert_eq!(link.script.len(), 5);
    }

    #[test]
    fn read_line_caps_length_below_buffer_size() {
        let mut link = FakeLine::with_input(b"0123456789\n");
        let mut buf = [0u8; 5];
        assert_eq!(read_line(&mut link, &mut buf), 4);
        assert_eq!(&buf[..4], b"0123");
    }

    #[test]
    fn raw_reader_returns_full_line_without_terminator() {
        let mut link = FakeLine::with_input(b"abcdefg");
        let mut reader = LineReader::<4>::with_policy(CarriageReturn::Ignore);
        assert_eq!(reader.read_line(&mut link), b"abc");
        assert_eq!(reader.read_line(&mut link), b"def");
    }

    #[test]
    fn raw_reader_with_no_room_reads_nothing() {
        let mut link = FakeLine::with_input(b"abc");
        let mut reader = LineReader::<1>::with_policy(CarriageReturn::Ignore);
        assert_eq!(reader.read_line(&mut link), b"");
        assert_eq!(link.polls, 0);
    }
}
