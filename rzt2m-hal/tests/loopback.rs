mod common;

use common::{reply_for, settle, LoopbackLine};
use rzt2m_hal::terminal::{suppression_count, EchoTerminal, State, Step, REPLY_PREFIX};
use rzt2m_hal::transport::flush_until_idle;

fn run_session(latency: usize) -> Vec<u8> {
    let mut line = LoopbackLine::with_latency(latency);
    let mut term = EchoTerminal::new(&mut line);

    for input in [
        &b"hi\r\n"[..],
        b"hello world\n",
        b"\n",
        b"\r\n",
        b"abc\x7f\x7fz\r",
        b"\x08\x08ok\n",
    ] {
        term.transport_mut().type_bytes(input);
        settle(&mut term);
        assert_eq!(term.state(), State::Listening);
        assert!(term.line().is_empty());
    }

    drop(term);
    line.wire
}

#[test]
fn session_over_looped_back_console() {
    let mut expected = Vec::new();
    for typed in [&b"hi"[..], b"hello world", b"az", b"ok"] {
        expected.extend(reply_for(typed));
    }
    assert_eq!(run_session(0), expected);
}

#[test]
fn echo_latency_does_not_change_the_session() {
    let reference = run_session(0);
    for latency in [1, 3, 17, 64] {
        assert_eq!(run_session(latency), reference, "latency {}", latency);
    }
}

#[test]
fn reply_for_hi_and_its_drain() {
    let mut line = LoopbackLine::with_latency(8);
    let mut term = EchoTerminal::new(&mut line);
    term.transport_mut().type_bytes(b"hi\n");

    let mut replied = None;
    while replied.is_none() {
        if let Step::Replied { sent } = term.poll() {
            replied = Some(sent);
        }
    }

    assert_eq!(replied, Some(15));
    assert_eq!(suppression_count(REPLY_PREFIX.len(), 2), 15);
    assert_eq!(term.state(), State::Draining { remaining: 15 });

    let steps = settle(&mut term);
    assert!(!steps.iter().any(|s| matches!(s, Step::Replied { .. })));
    assert_eq!(steps.last(), Some(&Step::Resumed));
    drop(term);
    assert_eq!(line.wire, b"You typed: hi\r\n");
}

#[test]
fn enter_alone_sends_nothing() {
    let mut line = LoopbackLine::with_latency(2);
    let mut term = EchoTerminal::new(&mut line);
    term.transport_mut().type_bytes(b"\n");

    let steps = settle(&mut term);

    assert_eq!(steps, [Step::EmptyLine]);
    assert_eq!(term.state(), State::Listening);
    drop(term);
    assert!(line.wire.is_empty());
}

#[test]
fn startup_flush_clears_stale_console_output() {
    let mut line = LoopbackLine::with_latency(4);
    // Banner printed before the terminal took over, still coming back.
    line.inject_echo(b"Hello from CPU0 to debug!\r\nCPU0 received: ...\r\n");

    let dropped = flush_until_idle(&mut line, 2000);
    assert_eq!(dropped, 47);
    assert!(line.is_quiet());

    let mut term = EchoTerminal::new(&mut line);
    term.transport_mut().type_bytes(b"x\n");
    settle(&mut term);
    drop(term);
    assert_eq!(line.wire, reply_for(b"x"));
}

#[test]
fn stale_output_without_flush_is_read_as_input() {
    let mut line = LoopbackLine::with_latency(0);
    line.inject_echo(b"boot\r\n");

    let mut term = EchoTerminal::new(&mut line);
    settle(&mut term);
    drop(term);
    assert_eq!(line.wire, reply_for(b"boot"));
}
