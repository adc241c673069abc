//! Terminfo database loading and capability lookup.
//!
//! Parses the compiled (legacy, 16-bit) terminfo binary format and indexes
//! the result three ways — by variable name, by capname and by termcap code
//! — plus a reverse escape-sequence index used to classify raw bytes
//! received from the terminal.

pub mod caps;
pub mod capability;
mod database;
mod error;
mod loader;

pub use capability::{Capability, CapabilityKind, CapabilityValue};
pub use database::Terminfo;
pub use error::Error;
pub use loader::{load_terminfo, parse_compiled};

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Build a minimal, well-formed legacy terminfo blob for one boolean,
    /// one number, and the string capabilities needed by the decoder and
    /// line editor tests (in canonical-table order).
    pub(crate) fn synth_terminfo(
        names: &str,
        bool_count: usize,
        numbers: &[i16],
        strings: &[(&str, &[u8])],
    ) -> Vec<u8> {
        let mut names_bytes = names.as_bytes().to_vec();
        names_bytes.push(0);

        let bool_bytes = vec![1u8; bool_count];

        let mut number_bytes = Vec::new();
        for &n in numbers {
            number_bytes.extend_from_slice(&n.to_le_bytes());
        }

        // build the string table and offsets by scanning the canonical
        // order for each requested capname
        let mut offsets: Vec<i16> = vec![-1; caps::STRING_CAPS.len().min(256)];
        let mut table = Vec::new();
        for (capname, value) in strings {
            let idx = caps::STRING_CAPS
                .iter()
                .position(|c| c.capname == *capname)
                .expect("unknown capname in test fixture");
            if idx >= offsets.len() {
                offsets.resize(idx + 1, -1);
            }
            offsets[idx] = table.len() as i16;
            table.extend_from_slice(value);
            table.push(0);
        }
        let mut offset_bytes = Vec::new();
        for o in &offsets {
            offset_bytes.extend_from_slice(&o.to_le_bytes());
        }

        let mut after_bools = names_bytes.len() + bool_bytes.len();
        let mut padding = Vec::new();
        if after_bools % 2 != 0 {
            padding.push(0u8);
            after_bools += 1;
        }
        let _ = after_bools;

        let header = [
            0o432i16,
            names_bytes.len() as i16,
            bool_count as i16,
            numbers.len() as i16,
            offsets.len() as i16,
            table.len() as i16,
        ];

        let mut result = Vec::new();
        for h in header {
            result.extend_from_slice(&h.to_le_bytes());
        }
        result.extend_from_slice(&names_bytes);
        result.extend_from_slice(&bool_bytes);
        result.extend_from_slice(&padding);
        result.extend_from_slice(&number_bytes);
        result.extend_from_slice(&offset_bytes);
        result.extend_from_slice(&table);
        result
    }

    #[test]
    fn bad_magic_is_rejected() {
        let data = vec![0u8; 20];
        assert!(matches!(parse_compiled(&data), Err(Error::BadMagic(_))));
    }

    #[test]
    fn round_trips_every_capname() {
        let data = synth_terminfo(
            "xterm|xterm terminal",
            2,
            &[80, 24],
            &[
                ("kcuu1", b"\x1b[A"),
                ("kcub1", b"\x1b[D"),
                ("kcuf1", b"\x1b[C"),
                ("kdch1", b"\x1b[3~"),
                ("khome", b"\x1b[H"),
                ("kend", b"\x1b[F"),
                ("cuf1", b"\x1b[C"),
                ("cub1", b"\x08"),
                ("clr_eos", b"\x1b[J"),
            ],
        );
        let term = parse_compiled(&data).expect("parses");
        assert_eq!(term.primary_name(), "xterm");

        for cap in term
            .booleans()
            .iter()
            .chain(term.numbers())
            .chain(term.strings())
        {
            if cap.variable.is_empty() {
                continue;
            }
            let found = term.get(&cap.capname).expect("capname resolves");
            assert_eq!(found.variable, cap.variable);
        }
    }

    #[test]
    fn detect_matches_get_for_every_nonempty_string() {
        let data = synth_terminfo(
            "xterm",
            0,
            &[],
            &[("kcuu1", b"\x1b[A"), ("clr_eos", b"\x1b[J")],
        );
        let term = parse_compiled(&data).expect("parses");
        for cap in term.strings() {
            if let Some(bytes) = cap.value.as_bytes() {
                if bytes.is_empty() {
                    continue;
                }
                let detected = term.detect(bytes);
                assert_eq!(detected.variable, cap.variable);
            }
        }
    }

    #[test]
    fn detect_unknown_sequence_returns_sentinel() {
        let data = synth_terminfo("xterm", 0, &[], &[("kcuu1", b"\x1b[A")]);
        let term = parse_compiled(&data).expect("parses");
        let cap = term.detect(b"\x1b[999~");
        assert_eq!(cap.kind, CapabilityKind::Unknown);
        assert_eq!(cap.value.as_bytes(), Some(&b"\x1b[999~"[..]));
    }

    #[test]
    fn get_unknown_name_is_lookup_error() {
        let data = synth_terminfo("xterm", 0, &[], &[]);
        let term = parse_compiled(&data).expect("parses");
        assert!(matches!(term.get("no_such_cap"), Err(Error::NotAnEntry(_))));
    }
}
