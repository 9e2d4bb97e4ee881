//! Fixed-period application loop
//!
//! A lab application reads the board, updates its own state and draws,
//! once per frame, until it decides to stop or the caller raises the stop
//! flag. Inputs are only touched in [`LabApp::poll_input`]; rendering never
//! talks to the board.

use std::io::{self, BufRead, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, info};

/// One lab application
pub trait LabApp {
    /// Exchange with the board: read inputs, drive outputs
    fn poll_input(&mut self);

    /// Update application state from the latest inputs
    fn advance_state(&mut self);

    /// Draw the current state
    fn render(&mut self, out: &mut dyn Write) -> io::Result<()>;

    /// True once the application wants to stop
    fn should_exit(&self) -> bool;
}

/// Run `app` until it exits or `stop` is set; returns the number of frames
///
/// Each frame runs poll, update and render in that order, then sleeps for
/// whatever is left of `frame_period`. A frame that overruns starts the
/// next one immediately.
pub fn run_app<A, W>(
    app: &mut A,
    out: &mut W,
    frame_period: Duration,
    stop: &AtomicBool,
) -> io::Result<u64>
where
    A: LabApp + ?Sized,
    W: Write,
{
    let mut frames = 0u64;

    while !stop.load(Ordering::Relaxed) && !app.should_exit() {
        let started = Instant::now();

        app.poll_input();
        app.advance_state();
        app.render(out)?;
        out.flush()?;
        frames += 1;

        let spent = started.elapsed();
        if spent < frame_period {
            thread::sleep(frame_period - spent);
        } else if !frame_period.is_zero() {
            debug!(?spent, "frame overran");
        }
    }

    info!(frames, "application loop finished");
    Ok(frames)
}

/// Raise `stop` when a line reading `q` arrives on stdin
pub fn spawn_quit_listener(stop: Arc<AtomicBool>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(line) if line.trim().eq_ignore_ascii_case("q") => break,
                Ok(_) => continue,
                Err(_) => return,
            }
        }
        stop.store(true, Ordering::Relaxed);
    });
}
