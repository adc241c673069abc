//! TTY raw-mode guard and raw-byte-stream → key-event decoder.

mod decoder;
mod error;
mod event;
mod raw_mode;

pub use decoder::{read_cursor_position_reply, BlockingSource, ByteSource, Decoder, StdinSource};
pub use error::Error;
pub use event::{is_control, is_printable, KeyEvent, BS, DEL, EOT};
pub use raw_mode::RawModeGuard;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    use richline_terminfo::parse_compiled;

    fn test_term() -> richline_terminfo::Terminfo {
        let names = b"xterm\0";
        let strings: &[(&str, &[u8])] = &[
            ("kcuu1", b"\x1b[A"),
            ("kcud1", b"\x1b[B"),
            ("kcuf1", b"\x1b[C"),
            ("kcub1", b"\x1b[D"),
            ("kdch1", b"\x1b[3~"),
            ("khome", b"\x1b[H"),
            ("kend", b"\x1b[F"),
            ("kf1", b"\x1bOP"),
        ];
        // Reuse richline_terminfo's own binary builder via parse_compiled of
        // a hand-assembled blob (mirrors the fixture in that crate's tests).
        let mut offsets: Vec<i16> = vec![-1; richline_terminfo::caps::STRING_CAPS.len()];
        let mut table = Vec::new();
        for (capname, value) in strings {
            let idx = richline_terminfo::caps::STRING_CAPS
                .iter()
                .position(|c| c.capname == *capname)
                .unwrap();
            offsets[idx] = table.len() as i16;
            table.extend_from_slice(value);
            table.push(0);
        }
        let mut offset_bytes = Vec::new();
        for o in &offsets {
            offset_bytes.extend_from_slice(&o.to_le_bytes());
        }
        let header = [
            0o432i16,
            names.len() as i16,
            0,
            0,
            offsets.len() as i16,
            table.len() as i16,
        ];
        let mut data = Vec::new();
        for h in header {
            data.extend_from_slice(&h.to_le_bytes());
        }
        data.extend_from_slice(names);
        data.extend_from_slice(&offset_bytes);
        data.extend_from_slice(&table);
        parse_compiled(&data).expect("synthetic terminfo parses")
    }

    fn decode_all(bytes: &[u8], term: &richline_terminfo::Terminfo) -> Vec<KeyEvent> {
        let src = BlockingSource(Cursor::new(bytes.to_vec()));
        Decoder::new(src, term)
            .map(|r| r.expect("no io errors from an in-memory source"))
            .collect()
    }

    #[test]
    fn plain_text_is_one_to_one() {
        let term = test_term();
        let events = decode_all(b"ab\x03", &term);
        assert_eq!(
            events,
            vec![
                KeyEvent::PrintableChar('a'),
                KeyEvent::PrintableChar('b'),
                KeyEvent::ControlKey('\u{3}'),
            ]
        );
    }

    #[test]
    fn csi_arrow_resolves_to_capability() {
        let term = test_term();
        let events = decode_all(b"\x1b[D", &term);
        match &events[..] {
            [KeyEvent::EscapeSequence(cap, raw)] => {
                assert_eq!(cap.capname, "kcub1");
                assert_eq!(raw, b"\x1b[D");
            }
            other => panic!("unexpected events: {other:?}"),
        }
    }

    #[test]
    fn single_byte_csi_normalizes_the_same_as_esc_bracket() {
        let term = test_term();
        let a = decode_all(b"\x9bA", &term);
        let b = decode_all(b"\x1b[A", &term);
        assert_eq!(a, b);
    }

    #[test]
    fn escape_interrupted_by_new_escape_restarts() {
        let term = test_term();
        // ESC [ then a fresh ESC O P (kf1) before the first sequence's
        // final byte arrives: the first collection is abandoned.
        let events = decode_all(b"\x1b[\x1bOP", &term);
        match &events[..] {
            [KeyEvent::EscapeSequence(cap, raw)] => {
                assert_eq!(cap.capname, "kf1");
                assert_eq!(raw, b"\x1bOP");
            }
            other => panic!("unexpected events: {other:?}"),
        }
    }

    #[test]
    fn unknown_escape_sequence_yields_sentinel() {
        let term = test_term();
        let events = decode_all(b"\x1b[9~", &term);
        match &events[..] {
            [KeyEvent::EscapeSequence(cap, _)] => {
                assert_eq!(cap.kind, richline_terminfo::CapabilityKind::Unknown);
            }
            other => panic!("unexpected events: {other:?}"),
        }
    }
}
