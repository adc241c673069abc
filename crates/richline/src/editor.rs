//! Line editor: binds key events to buffer edits and drives the
//! minimum-diff redraw.

use std::io::{self, Write};
use std::os::unix::io::RawFd;

use tracing::trace;

use richline_input::{
    read_cursor_position_reply, Decoder, KeyEvent, RawModeGuard, StdinSource, BS, DEL, EOT,
};
use richline_terminfo::Terminfo;
use richline_vterm::{query_window_size, VTerm};

use crate::error::Error;
use crate::line::IndexedLine;

/// Everything a [`Callback`] sees for one event: the event itself, the
/// components it may act on, and before/after snapshots of the buffer.
pub struct EditContext<'ctx, W: Write> {
    pub event: &'ctx KeyEvent,
    pub term: &'ctx Terminfo,
    pub vterm: &'ctx mut VTerm<W>,
    pub iline: &'ctx IndexedLine,
    pub prev_text: String,
    pub curr_text: String,
    pub prev_idx: usize,
    pub curr_idx: usize,
}

/// The remainder of the callback chain; the innermost link is always
/// [`default_redraw`].
pub type Redraw<'ctx, W> = dyn FnMut(&mut EditContext<'_, W>) -> io::Result<()> + 'ctx;

/// A decorator around the default redraw: receives the context and the
/// rest of the chain as `next`,
/// and may mutate the context before calling it. Nested callbacks run
/// outer-first, each forwarding to its `next` until the built-in redraw.
pub trait Callback<W: Write> {
    fn call(&mut self, ctx: &mut EditContext<'_, W>, next: &mut Redraw<'_, W>) -> io::Result<()>;
}

impl<W, F> Callback<W> for F
where
    W: Write,
    F: FnMut(&mut EditContext<'_, W>, &mut Redraw<'_, W>) -> io::Result<()>,
{
    fn call(&mut self, ctx: &mut EditContext<'_, W>, next: &mut Redraw<'_, W>) -> io::Result<()> {
        self(ctx, next)
    }
}

fn common_prefix_len(a: &str, b: &str) -> usize {
    a.chars().zip(b.chars()).take_while(|(x, y)| x == y).count()
}

fn move_cursor_relative<W: Write>(vterm: &mut VTerm<W>, from: usize, to: usize) -> io::Result<()> {
    if to > from {
        vterm.move_forward(to - from, false)
    } else if to < from {
        vterm.move_backward(from - to, false)
    } else {
        Ok(())
    }
}

fn lookup_error_to_io(e: richline_terminfo::Error) -> io::Error {
    io::Error::new(io::ErrorKind::Other, e)
}

/// The built-in redraw: longest-common-prefix diff, `clr_eos`, rewrite the
/// suffix, reposition the cursor at the logical insertion point.
///
/// For a pure cursor-motion event (buffer text unchanged) this degenerates
/// to a single move from `prev_idx` to `curr_idx`.
pub fn default_redraw<W: Write>(ctx: &mut EditContext<'_, W>) -> io::Result<()> {
    if ctx.prev_text == ctx.curr_text {
        move_cursor_relative(ctx.vterm, ctx.prev_idx, ctx.curr_idx)?;
        return Ok(());
    }

    let prefix_len = common_prefix_len(&ctx.prev_text, &ctx.curr_text);
    move_cursor_relative(ctx.vterm, ctx.prev_idx, prefix_len)?;

    let clr_eos = ctx
        .term
        .get("clr_eos")
        .map_err(lookup_error_to_io)?
        .value
        .as_bytes()
        .unwrap_or(&[])
        .to_vec();
    ctx.vterm.write_raw(&clr_eos)?;

    let suffix: String = ctx.curr_text.chars().skip(prefix_len).collect();
    ctx.vterm.write(suffix.as_bytes())?;

    let curr_len = ctx.curr_text.chars().count();
    move_cursor_relative(ctx.vterm, curr_len, ctx.curr_idx)?;

    trace!(prefix_len, suffix_len = suffix.chars().count(), "redrew line");
    Ok(())
}

pub(crate) fn apply_event(iline: &mut IndexedLine, event: &KeyEvent) {
    match event {
        KeyEvent::PrintableChar(c) => {
            let mut buf = [0u8; 4];
            iline.insert(c.encode_utf8(&mut buf));
        }
        KeyEvent::ControlKey(c) if *c == BS || *c == DEL => {
            iline.delete_backward();
        }
        KeyEvent::ControlKey(_) => {}
        KeyEvent::EscapeSequence(cap, _) => match cap.capname.as_str() {
            "kdch1" => {
                iline.delete_forward();
            }
            "kcub1" => {
                iline.move_backward(1);
            }
            "kcuf1" => {
                iline.move_forward(1);
            }
            "khome" => {
                iline.move_home();
            }
            "kend" => {
                iline.move_end();
            }
            _ => {}
        },
    }
}

/// A terminfo description and a file descriptor, bound together as the line
/// editor's state. The output sink is supplied fresh to each `read`/`events`
/// call rather than stored, so the raw-mode guard and the virtual cursor it
/// builds stay scoped resources for the duration of a single call.
pub struct RichLine {
    term: Terminfo,
    fd: RawFd,
    initial_text: String,
}

impl RichLine {
    #[must_use]
    pub fn new(term: Terminfo, fd: RawFd) -> Self {
        RichLine {
            term,
            fd,
            initial_text: String::new(),
        }
    }

    /// Like [`RichLine::new`], but seeds the editing buffer with `text`
    /// already present and the insertion index at its end, as if the caller
    /// had typed it before the first event. `read`/`events_with` write
    /// `text` out (advancing the virtual cursor past it) right after the
    /// prompt and the initial cursor-position query.
    #[must_use]
    pub fn with_text(term: Terminfo, fd: RawFd, text: impl Into<String>) -> Self {
        RichLine {
            term,
            fd,
            initial_text: text.into(),
        }
    }

    #[must_use]
    pub fn terminfo(&self) -> &Terminfo {
        &self.term
    }

    #[must_use]
    pub fn fd(&self) -> RawFd {
        self.fd
    }

    /// The event-iterator form: writes `prompt` to `out`, opens
    /// the raw mode guard for the iterator's lifetime, and yields one
    /// `(event, prev_text, curr_text, prev_idx, curr_idx)` tuple per key
    /// event, applying the built-in redraw (or `callback`, if given) as it
    /// goes. Iteration ends at EOT or end-of-stream; the caller is
    /// responsible for recognizing its own terminator characters.
    ///
    /// # Errors
    ///
    /// Returns an error if the raw-mode guard cannot be acquired or the
    /// initial cursor-position query fails.
    pub fn events_with<'a, W: Write>(
        &'a self,
        mut out: W,
        prompt: &str,
        callback: Option<&'a mut dyn Callback<W>>,
    ) -> Result<Events<'a, W>, Error> {
        let guard = RawModeGuard::acquire(self.fd)?;

        out.write_all(prompt.as_bytes())?;
        out.flush()?;

        out.write_all(b"\x1b[6n")?;
        out.flush()?;
        let mut probe = StdinSource::new(self.fd);
        let (x, y) = read_cursor_position_reply(&mut probe)?;

        let (width, height) = query_window_size(self.fd)?;
        let mut vterm = VTerm::new(&self.term, self.fd, out, x, y, width, height)?;
        if !self.initial_text.is_empty() {
            vterm.write(self.initial_text.as_bytes())?;
        }
        let decoder = Decoder::new(StdinSource::new(self.fd), &self.term);

        Ok(Events {
            term: &self.term,
            vterm,
            iline: IndexedLine::with_text(&self.initial_text),
            decoder,
            callback,
            _guard: guard,
            done: false,
        })
    }

    pub fn events<W: Write>(&self, out: W, prompt: &str) -> Result<Events<'_, W>, Error> {
        self.events_with(out, prompt, None)
    }

    /// Read a full line: drives the event loop to completion and returns
    /// the buffer text as it stood at the terminating event.
    ///
    /// # Errors
    ///
    /// Propagates raw-mode, cursor-query, and terminal I/O errors.
    pub fn read<'a, W: Write>(
        &'a self,
        out: W,
        callback: Option<&'a mut dyn Callback<W>>,
        terminators: &[char],
        prompt: &str,
    ) -> Result<String, Error> {
        let mut events = self.events_with(out, prompt, callback)?;
        let mut text = String::new();

        while let Some(item) = events.next() {
            let (event, _prev_text, curr_text, _prev_idx, _curr_idx) = item?;
            text = curr_text;
            if let Some(c) = event.terminator_char() {
                if c == EOT || terminators.contains(&c) {
                    break;
                }
            }
        }

        Ok(text)
    }
}

/// Iterator returned by [`RichLine::events`] / [`RichLine::events_with`].
pub struct Events<'a, W: Write> {
    term: &'a Terminfo,
    vterm: VTerm<W>,
    iline: IndexedLine,
    decoder: Decoder<'a, StdinSource>,
    callback: Option<&'a mut dyn Callback<W>>,
    _guard: RawModeGuard,
    done: bool,
}

impl<W: Write> Events<'_, W> {
    #[must_use]
    pub fn iline(&self) -> &IndexedLine {
        &self.iline
    }
}


impl<W: Write> Iterator for Events<'_, W> {
    type Item = io::Result<(KeyEvent, String, String, usize, usize)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let event = match self.decoder.next() {
            Some(Ok(e)) => e,
            Some(Err(e)) => {
                self.done = true;
                return Some(Err(e));
            }
            None => {
                self.done = true;
                return None;
            }
        };

        let prev_text = self.iline.text();
        let prev_idx = self.iline.index();
        apply_event(&mut self.iline, &event);
        let curr_text = self.iline.text();
        let curr_idx = self.iline.index();

        let is_eot = matches!(event.terminator_char(), Some(c) if c == EOT);

        let outcome = {
            let mut ctx = EditContext {
                event: &event,
                term: self.term,
                vterm: &mut self.vterm,
                iline: &self.iline,
                prev_text: prev_text.clone(),
                curr_text: curr_text.clone(),
                prev_idx,
                curr_idx,
            };
            match &mut self.callback {
                Some(cb) => cb.call(&mut ctx, &mut default_redraw),
                None => default_redraw(&mut ctx),
            }
        };

        if is_eot {
            self.done = true;
        }

        match outcome {
            Ok(()) => Some(Ok((event, prev_text, curr_text, prev_idx, curr_idx))),
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
