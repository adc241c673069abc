use richline_terminfo::Capability;
use unicode_general_category::{get_general_category, GeneralCategory};

/// A single classified input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyEvent {
    /// A single code point whose Unicode general category does not start
    /// with `C`.
    PrintableChar(char),
    /// A single control character that did not begin an escape sequence
    /// (backspace, DEL, EOT, ...).
    ControlKey(char),
    /// A normalized escape byte string bound to a terminfo string
    /// capability, or to the unknown-capability sentinel on a miss. The
    /// raw form always begins with ESC, even if the terminal sent the
    /// single-byte CSI introducer (0x9B).
    EscapeSequence(Capability, Vec<u8>),
}

impl KeyEvent {
    /// The code point this event represents for the purpose of matching a
    /// `read` terminator, or `None` for an escape sequence (which has no
    /// single-character string representation).
    #[must_use]
    pub fn terminator_char(&self) -> Option<char> {
        match self {
            KeyEvent::PrintableChar(c) | KeyEvent::ControlKey(c) => Some(*c),
            KeyEvent::EscapeSequence(..) => None,
        }
    }
}

/// EOT (`^D`), used to abort a read in progress.
pub const EOT: char = '\u{4}';
/// Backspace.
pub const BS: char = '\u{8}';
/// DEL, treated the same as backspace.
pub const DEL: char = '\u{7F}';

#[must_use]
pub fn is_printable(c: char) -> bool {
    !is_control(c)
}

/// Whether `c` belongs to the Unicode `C` general category group (Cc, Cf,
/// Co, Cs, or Cn) and is therefore not printable. `char::is_control` alone
/// only covers Cc, which misses e.g. U+200D ZERO WIDTH JOINER (Cf).
#[must_use]
pub fn is_control(c: char) -> bool {
    matches!(
        get_general_category(c),
        GeneralCategory::Control
            | GeneralCategory::Format
            | GeneralCategory::PrivateUse
            | GeneralCategory::Surrogate
            | GeneralCategory::Unassigned
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_letters_are_printable() {
        assert!(is_printable('a'));
        assert!(is_printable('Z'));
    }

    #[test]
    fn ascii_control_characters_are_not_printable() {
        assert!(is_control(BS));
        assert!(is_control(DEL));
        assert!(is_control(EOT));
    }

    #[test]
    fn format_category_code_points_are_not_printable() {
        // U+200D ZERO WIDTH JOINER and U+00AD SOFT HYPHEN are category Cf,
        // which char::is_control() alone does not cover.
        assert!(is_control('\u{200d}'));
        assert!(is_control('\u{ad}'));
    }
}
