//! Raw terminal bytes → classified key events.

use std::io;
use std::os::unix::io::RawFd;

use nix::poll::{PollFd, PollFlags, PollTimeout};
use nix::unistd;
use smallvec::SmallVec;
use tracing::{trace, warn};

use richline_terminfo::Terminfo;

use crate::event::{is_control, is_printable, KeyEvent};

const ESC: char = '\u{1b}';
const CSI_SINGLE: char = '\u{9b}';

/// A source of raw bytes for the decoder. Implementors are responsible for
/// blocking (the decoder's suspension point) until a byte is available, and
/// for retrying silently on interruption (EINTR).
pub trait ByteSource {
    /// Returns the next byte, or `Ok(None)` at end of stream.
    fn read_byte(&mut self) -> io::Result<Option<u8>>;
}

/// A [`ByteSource`] that reads one byte at a time from any blocking
/// [`io::Read`] implementation, used in tests and for piped (non-tty)
/// input.
pub struct BlockingSource<R>(pub R);

impl<R: io::Read> ByteSource for BlockingSource<R> {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let mut buf = [0u8; 1];
        loop {
            match self.0.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buf[0])),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }
}

/// A [`ByteSource`] that reads directly from a raw file descriptor (stdin,
/// normally left in non-blocking mode by [`crate::RawModeGuard`]), waiting
/// for readiness with `poll(2)` rather than busy-looping.
pub struct StdinSource {
    fd: RawFd,
}

impl StdinSource {
    #[must_use]
    pub fn new(fd: RawFd) -> Self {
        StdinSource { fd }
    }
}

impl ByteSource for StdinSource {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        loop {
            // SAFETY: `self.fd` is owned by the caller for the lifetime of
            // this call; we don't retain the borrow past it.
            let borrowed = unsafe { std::os::fd::BorrowedFd::borrow_raw(self.fd) };
            let mut fds = [PollFd::new(borrowed, PollFlags::POLLIN)];
            match nix::poll::poll(&mut fds, PollTimeout::NONE) {
                Ok(_) => {}
                Err(nix::errno::Errno::EINTR) => continue,
                Err(e) => return Err(e.into()),
            }

            let mut buf = [0u8; 1];
            match unistd::read(self.fd, &mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buf[0])),
                Err(nix::errno::Errno::EINTR | nix::errno::Errno::EAGAIN) => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }
}

fn utf8_len(lead: u8) -> usize {
    if lead & 0x80 == 0 {
        1
    } else if lead & 0xE0 == 0xC0 {
        2
    } else if lead & 0xF0 == 0xE0 {
        3
    } else if lead & 0xF8 == 0xF0 {
        4
    } else {
        1
    }
}

fn read_char<S: ByteSource>(source: &mut S) -> io::Result<Option<char>> {
    let Some(lead) = source.read_byte()? else {
        return Ok(None);
    };
    // The single-byte CSI introducer (0x9B) is a C1 control code that isn't
    // valid as a standalone UTF-8 byte; treat it as its own code point
    // rather than requiring the 2-byte UTF-8 encoding of U+009B.
    if lead == 0x9B {
        return Ok(Some(CSI_SINGLE));
    }

    let len = utf8_len(lead);
    if len == 1 {
        return Ok(Some(lead as char));
    }

    let mut buf = [0u8; 4];
    buf[0] = lead;
    for slot in buf.iter_mut().take(len).skip(1) {
        match source.read_byte()? {
            Some(b) => *slot = b,
            None => return Ok(None),
        }
    }
    match std::str::from_utf8(&buf[..len]) {
        Ok(s) => Ok(s.chars().next()),
        Err(_) => Ok(Some(lead as char)),
    }
}

fn is_escape_start(c: char) -> bool {
    c == ESC || c == CSI_SINGLE
}

fn is_csi_final_byte(c: char) -> bool {
    matches!(c as u32, 0x40..=0x7E | 0x24)
}

/// Consume one escape sequence starting with `starter` (ESC or the
/// single-byte CSI), restarting from scratch — rather than recursing — any
/// time a byte that itself starts a new escape sequence interrupts the one
/// in progress.
///
/// Returns the sequence bytes normalized to always begin with ESC, e.g.
/// `ESC [ A` for both `ESC [ A` and the bare CSI byte followed by `A`.
fn consume_escape_sequence<S: ByteSource>(
    source: &mut S,
    mut starter: char,
) -> io::Result<SmallVec<[u8; 16]>> {
    'restart: loop {
        let mut raw: SmallVec<[u8; 16]> = SmallVec::new();
        raw.push(b'\x1b');

        let first = if starter == CSI_SINGLE {
            '['
        } else {
            match read_char(source)? {
                Some(c) => c,
                None => return Ok(raw),
            }
        };

        if is_escape_start(first) {
            starter = first;
            continue 'restart;
        }
        push_char(&mut raw, first);

        match first {
            '[' => loop {
                let Some(b) = read_char(source)? else { break };
                if is_escape_start(b) {
                    starter = b;
                    continue 'restart;
                }
                push_char(&mut raw, b);
                if is_csi_final_byte(b) {
                    break;
                }
            },
            'O' => {
                if let Some(b) = read_char(source)? {
                    if is_escape_start(b) {
                        starter = b;
                        continue 'restart;
                    }
                    push_char(&mut raw, b);
                }
            }
            _ => {}
        }

        return Ok(raw);
    }
}

fn push_char(buf: &mut SmallVec<[u8; 16]>, c: char) {
    let mut tmp = [0u8; 4];
    buf.extend_from_slice(c.encode_utf8(&mut tmp).as_bytes());
}

/// Decodes a byte stream into [`KeyEvent`]s against a loaded [`Terminfo`].
pub struct Decoder<'t, S> {
    source: S,
    term: &'t Terminfo,
}

impl<'t, S: ByteSource> Decoder<'t, S> {
    pub fn new(source: S, term: &'t Terminfo) -> Self {
        Decoder { source, term }
    }
}

/// Read a "cursor position report" reply (`ESC [ row ; col R`) off `source`,
/// using the same escape-sequence collector the main decoder uses. The
/// caller is responsible for first writing the `ESC [ 6 n` request.
///
/// Returns `(column, row)`, both 1-based, matching [`crate::event`]'s
/// column-before-row convention.
pub fn read_cursor_position_reply<S: ByteSource>(source: &mut S) -> io::Result<(u16, u16)> {
    loop {
        match read_char(source)? {
            Some(c) if is_escape_start(c) => {
                let raw = consume_escape_sequence(source, c)?;
                return parse_cursor_reply(&raw).ok_or_else(|| {
                    io::Error::new(io::ErrorKind::InvalidData, "malformed cursor position reply")
                });
            }
            Some(_) => continue,
            None => {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "eof while awaiting cursor position reply",
                ))
            }
        }
    }
}

fn parse_cursor_reply(raw: &[u8]) -> Option<(u16, u16)> {
    let s = std::str::from_utf8(raw).ok()?;
    let body = s.strip_prefix("\x1b[")?.strip_suffix('R')?;
    let (row, col) = body.split_once(';')?;
    Some((col.parse().ok()?, row.parse().ok()?))
}

impl<S: ByteSource> Iterator for Decoder<'_, S> {
    type Item = io::Result<KeyEvent>;

    fn next(&mut self) -> Option<Self::Item> {
        let c = match read_char(&mut self.source) {
            Ok(Some(c)) => c,
            Ok(None) => return None,
            Err(e) => return Some(Err(e)),
        };

        if is_escape_start(c) {
            let raw = match consume_escape_sequence(&mut self.source, c) {
                Ok(r) => r,
                Err(e) => return Some(Err(e)),
            };
            let cap = self.term.detect(&raw);
            if cap.kind == richline_terminfo::CapabilityKind::Unknown {
                warn!(?raw, "unrecognized escape sequence");
            } else {
                trace!(capability = %cap.capname, "escape sequence");
            }
            return Some(Ok(KeyEvent::EscapeSequence(cap, raw.into_vec())));
        }

        trace!(char = ?c, "decoded input char");
        if is_printable(c) {
            Some(Ok(KeyEvent::PrintableChar(c)))
        } else {
            debug_assert!(is_control(c));
            Some(Ok(KeyEvent::ControlKey(c)))
        }
    }
}
