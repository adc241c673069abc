//! Password variant: masks the buffer with asterisks but shows the most
//! recently typed character briefly before a timer replaces it.

use std::io::{self, Write};
use std::os::unix::io::RawFd;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use richline_input::{KeyEvent, BS, DEL};
use richline_terminfo::Terminfo;

use crate::editor::{Callback, EditContext, Redraw, RichLine};
use crate::error::Error;

fn mask_all(s: &str) -> String {
    "*".repeat(s.chars().count())
}

fn mask_except(s: &str, idx: usize) -> String {
    s.chars()
        .enumerate()
        .map(|(i, c)| if i == idx { c } else { '*' })
        .collect()
}

fn write_raw_to_fd(fd: RawFd, bytes: &[u8]) -> io::Result<()> {
    let mut offset = 0;
    while offset < bytes.len() {
        let remaining = &bytes[offset..];
        let n = unsafe { libc::write(fd, remaining.as_ptr().cast(), remaining.len()) };
        if n == 0 {
            break;
        } else if n > 0 {
            offset += n as usize;
        } else {
            let err = io::Error::last_os_error();
            if err.kind() == io::ErrorKind::Interrupted {
                continue;
            }
            return Err(err);
        }
    }
    Ok(())
}

fn cancel_timer(tx: &mut Option<mpsc::Sender<()>>) {
    if let Some(tx) = tx.take() {
        let _ = tx.send(());
    }
}

/// Spawn the single-shot masking timer. Sending on the returned channel, or
/// dropping it, cancels the pending mask before it fires.
fn spawn_mask_timer(fd: RawFd, cub1: Vec<u8>, gate: Arc<Mutex<()>>) -> mpsc::Sender<()> {
    let (tx, rx) = mpsc::channel::<()>();
    thread::spawn(move || match rx.recv_timeout(Duration::from_secs(1)) {
        Ok(()) | Err(mpsc::RecvTimeoutError::Disconnected) => {}
        Err(mpsc::RecvTimeoutError::Timeout) => {
            let _lock = gate.lock().unwrap();
            let _ = write_raw_to_fd(fd, &cub1);
            let _ = write_raw_to_fd(fd, b"*");
        }
    });
    tx
}

/// The callback that intercepts every event on the way to the default
/// redraw and substitutes a masked version of the buffer text. Holds no `W`
/// of its own: the timer and the immediate re-mask on the next keystroke
/// both write straight to the file descriptor, bypassing the generic
/// output sink entirely: the timer thread and the main reader both write
/// to the raw descriptor, and `gate` serializes the two.
struct PasswordMasker<'a> {
    clear_text: &'a mut bool,
    cancel_tx: &'a mut Option<mpsc::Sender<()>>,
    fd: RawFd,
    cub1: &'a [u8],
    gate: &'a Arc<Mutex<()>>,
}

impl<W: Write> Callback<W> for PasswordMasker<'_> {
    fn call(&mut self, ctx: &mut EditContext<'_, W>, next: &mut Redraw<'_, W>) -> io::Result<()> {
        cancel_timer(self.cancel_tx);

        let is_kf1 = matches!(ctx.event, KeyEvent::EscapeSequence(cap, _) if cap.capname == "kf1");
        if is_kf1 {
            *self.clear_text = !*self.clear_text;
            // force a full repaint of the line in the new mode
            ctx.prev_text = String::new();
            if !*self.clear_text {
                ctx.curr_text = mask_all(&ctx.curr_text);
            }
            let _lock = self.gate.lock().unwrap();
            return next(ctx);
        }

        if *self.clear_text {
            return next(ctx);
        }

        let is_backspace = matches!(ctx.event, KeyEvent::ControlKey(c) if *c == BS || *c == DEL);

        // Any non-backspace keystroke immediately masks whatever the
        // previous event left showing; the deletion itself already shrinks
        // the string, so backspace is exempt.
        if !is_backspace && ctx.prev_idx != 0 {
            let _lock = self.gate.lock().unwrap();
            let _ = write_raw_to_fd(self.fd, self.cub1);
            let _ = write_raw_to_fd(self.fd, b"*");
        }

        let prev_len = ctx.prev_text.chars().count();
        let curr_len = ctx.curr_text.chars().count();
        if !ctx.curr_text.is_empty() && ctx.prev_text != ctx.curr_text && curr_len > prev_len {
            ctx.curr_text = mask_except(&ctx.curr_text, ctx.prev_idx);
            *self.cancel_tx = Some(spawn_mask_timer(
                self.fd,
                self.cub1.to_vec(),
                Arc::clone(self.gate),
            ));
        } else {
            ctx.curr_text = mask_all(&ctx.curr_text);
        }
        ctx.prev_text = mask_all(&ctx.prev_text);

        let _lock = self.gate.lock().unwrap();
        next(ctx)
    }
}

/// Wraps [`RichLine`] with masking state: a `clear_text` toggle (F1) and a
/// single-shot re-armed timer that reveals the latest keystroke briefly
/// before replacing it with `*`.
pub struct RichPassword {
    inner: RichLine,
    clear_text: bool,
    cub1: Vec<u8>,
    gate: Arc<Mutex<()>>,
}

impl RichPassword {
    /// # Errors
    ///
    /// Returns an error if `term` has no `cub1` capability.
    pub fn new(term: Terminfo, fd: RawFd) -> Result<Self, Error> {
        let cub1 = term
            .get("cub1")?
            .value
            .as_bytes()
            .unwrap_or(&[])
            .to_vec();
        Ok(RichPassword {
            inner: RichLine::new(term, fd),
            clear_text: false,
            cub1,
            gate: Arc::new(Mutex::new(())),
        })
    }

    #[must_use]
    pub fn clear_text(&self) -> bool {
        self.clear_text
    }

    /// Same contract as [`RichLine::read`], plus F1 toggling clear-text
    /// display and asterisk masking of everything else.
    ///
    /// # Errors
    ///
    /// Propagates raw-mode, cursor-query, and terminal I/O errors.
    pub fn read<W: Write>(
        &mut self,
        out: W,
        terminators: &[char],
        prompt: &str,
    ) -> Result<String, Error> {
        let fd = self.inner.fd();
        let cub1 = self.cub1.clone();
        let gate = Arc::clone(&self.gate);
        let mut cancel_tx: Option<mpsc::Sender<()>> = None;

        let result = {
            let mut masker = PasswordMasker {
                clear_text: &mut self.clear_text,
                cancel_tx: &mut cancel_tx,
                fd,
                cub1: &cub1,
                gate: &gate,
            };
            self.inner.read(out, Some(&mut masker), terminators, prompt)
        };

        cancel_timer(&mut cancel_tx);

        // Mirror the unconditional post-read mask of the last shown
        // character: idempotent even if nothing is currently revealed.
        if let Ok(text) = &result {
            if !self.clear_text && !text.is_empty() {
                let _lock = gate.lock().unwrap();
                let _ = write_raw_to_fd(fd, &cub1);
                let _ = write_raw_to_fd(fd, b"*");
            }
        }

        result
    }
}
