//! Interactive line editing for POSIX terminals: an indexed buffer, a
//! minimum-diff redraw engine, and a password-masking variant.

mod editor;
mod error;
mod line;
mod password;

pub use editor::{default_redraw, Callback, EditContext, Events, Redraw, RichLine};
pub use error::Error;
pub use line::IndexedLine;
pub use password::RichPassword;

pub use richline_input::KeyEvent;
pub use richline_terminfo::{load_terminfo, Capability, Terminfo};
pub use richline_vterm::VTerm;
