//! Virtual cursor bookkeeping layered over a real terminal.

mod error;
mod vterm;

pub use error::Error;
pub use vterm::{install_resize_handler, query_window_size, VTerm};
