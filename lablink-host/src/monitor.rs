//! Text-mode input monitor
//!
//! Each frame reads the configured analog channels as percent, polls one
//! debounced button and optionally the accelerometer, then prints one
//! status line. A read that fails keeps the value from the previous frame.

use std::fmt::Write as _;
use std::io::{self, Write};

use lablink_core::{Acceleration, LabClient, LinkError};
use lablink_hal::{MonotonicClock, Serial};
use tracing::debug;

use crate::app::LabApp;

/// What the monitor samples each frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonitorOptions {
    /// Digital channel counted as a debounced button
    pub button: Option<u16>,
    /// Analog channels shown as percent
    pub analog: Vec<u16>,
    /// Also read the accelerometer
    pub accel: bool,
    /// Stop after this many frames
    pub max_frames: Option<u64>,
}

/// Latest values shown by the monitor
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Readings {
    /// Percent per configured analog channel; `None` until first read
    pub analog: Vec<Option<f64>>,
    /// Debounced presses counted so far
    pub presses: u32,
    pub accel: Option<Acceleration>,
}

/// Monitor application
pub struct MonitorApp<P, C> {
    client: LabClient<P, C>,
    options: MonitorOptions,
    readings: Readings,
    pressed_this_frame: bool,
    frames: u64,
}

impl<P, C> MonitorApp<P, C>
where
    P: Serial,
    C: MonotonicClock,
{
    pub fn new(client: LabClient<P, C>, options: MonitorOptions) -> Self {
        let readings = Readings {
            analog: vec![None; options.analog.len()],
            ..Readings::default()
        };
        Self {
            client,
            options,
            readings,
            pressed_this_frame: false,
            frames: 0,
        }
    }

    pub fn readings(&self) -> &Readings {
        &self.readings
    }

    pub fn client(&self) -> &LabClient<P, C> {
        &self.client
    }

    pub fn client_mut(&mut self) -> &mut LabClient<P, C> {
        &mut self.client
    }

    /// Format the current readings as one line
    pub fn status_line(&self) -> String {
        let mut line = String::new();

        for (channel, value) in self.options.analog.iter().zip(&self.readings.analog) {
            match value {
                Some(pct) => {
                    let _ = write!(line, "A{}={:5.1}%  ", channel, pct);
                }
                None => {
                    let _ = write!(line, "A{}=  --- %  ", channel);
                }
            }
        }

        if let Some(button) = self.options.button {
            let _ = write!(line, "B{} presses={}  ", button, self.readings.presses);
        }

        if self.options.accel {
            match self.readings.accel {
                Some(a) => {
                    let _ = write!(line, "accel x={:+.2} y={:+.2} z={:+.2}", a.x, a.y, a.z);
                }
                None => line.push_str("accel ---"),
            }
        }

        line.trim_end().to_string()
    }
}

fn keep_previous<T>(slot: &mut Option<T>, read: Result<T, LinkError>, what: &str) {
    match read {
        Ok(value) => *slot = Some(value),
        Err(e) => debug!(error = %e, "{} unavailable this frame", what),
    }
}

impl<P, C> LabApp for MonitorApp<P, C>
where
    P: Serial,
    C: MonotonicClock,
{
    fn poll_input(&mut self) {
        for (i, &channel) in self.options.analog.iter().enumerate() {
            let read = self.client.get_analog_percent(channel);
            keep_previous(&mut self.readings.analog[i], read, "analog channel");
        }

        if let Some(button) = self.options.button {
            self.pressed_this_frame = self.client.get_button_debounced(button);
        }

        if self.options.accel {
            let read = self.client.get_accel();
            keep_previous(&mut self.readings.accel, read, "accelerometer");
        }
    }

    fn advance_state(&mut self) {
        if self.pressed_this_frame {
            self.readings.presses = self.readings.presses.saturating_add(1);
            self.pressed_this_frame = false;
        }
        self.frames += 1;
    }

    fn render(&mut self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "{}", self.status_line())
    }

    fn should_exit(&self) -> bool {
        self.options
            .max_frames
            .is_some_and(|max| self.frames >= max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::run_app;
    use lablink_core::LinkConfig;
    use lablink_hal::mock::{MockClock, MockSerial};
    use std::cell::Cell;
    use std::rc::Rc;
    use std::sync::atomic::AtomicBool;
    use std::time::Duration;

    const MS: Duration = Duration::from_millis(1);

    /// Board that answers GETs from a fixed table while `online` is set
    fn board(clock: &MockClock, online: Rc<Cell<bool>>) -> MockSerial {
        MockSerial::new(clock.clone())
            .with_poll_step(MS)
            .with_responder(move |request| {
                if !online.get() {
                    return None;
                }
                let value = match request {
                    "G 1 5" => 4095,
                    "G 1 6" => 0,
                    "G 0 33" => 0,
                    "G 1 23" | "G 1 24" | "G 1 25" => 4095,
                    _ => return None,
                };
                let mut fields = request.split_whitespace().skip(1);
                let io_type = fields.next()?;
                let channel = fields.next()?;
                Some(format!("A {} {} {}\n", io_type, channel, value))
            })
    }

    fn monitor(clock: &MockClock, online: Rc<Cell<bool>>, options: MonitorOptions) -> MonitorApp<MockSerial, MockClock> {
        let config = LinkConfig {
            command_timeout_ms: 100,
            flush_total_ms: 10,
            flush_line_ms: 5,
            ..LinkConfig::default()
        };
        let client = LabClient::connect(board(clock, online), clock.clone(), config).unwrap();
        MonitorApp::new(client, options)
    }

    #[test]
    fn test_reads_analog_and_counts_one_press() {
        let clock = MockClock::new();
        let online = Rc::new(Cell::new(true));
        let mut app = monitor(
            &clock,
            online,
            MonitorOptions {
                button: Some(33),
                analog: vec![5, 6],
                max_frames: Some(20),
                ..MonitorOptions::default()
            },
        );
        let mut out = Vec::new();

        let frames = run_app(&mut app, &mut out, Duration::ZERO, &AtomicBool::new(false)).unwrap();

        assert_eq!(frames, 20);
        assert_eq!(app.readings().analog, vec![Some(100.0), Some(0.0)]);
        assert_eq!(app.readings().presses, 1);

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 20);
        assert_eq!(
            text.lines().last(),
            Some("A5=100.0%  A6=  0.0%  B33 presses=1")
        );
    }

    #[test]
    fn test_failed_reads_keep_previous_values() {
        let clock = MockClock::new();
        let online = Rc::new(Cell::new(true));
        let mut app = monitor(
            &clock,
            online.clone(),
            MonitorOptions {
                analog: vec![5],
                accel: true,
                ..MonitorOptions::default()
            },
        );

        app.poll_input();
        app.advance_state();
        let before = app.readings().clone();
        assert_eq!(before.analog, vec![Some(100.0)]);
        assert_eq!(before.accel, Some(Acceleration::from_percent(100.0, 100.0, 100.0)));

        online.set(false);
        app.poll_input();
        app.advance_state();
        assert_eq!(app.readings(), &before);
        assert!(app.client().stats().timeouts >= 2);
    }

    #[test]
    fn test_status_before_first_read() {
        let clock = MockClock::new();
        let app = monitor(
            &clock,
            Rc::new(Cell::new(false)),
            MonitorOptions {
                button: Some(33),
                analog: vec![2],
                accel: true,
                ..MonitorOptions::default()
            },
        );

        assert_eq!(app.status_line(), "A2=  --- %  B33 presses=0  accel ---");
    }

    #[test]
    fn test_exits_after_max_frames() {
        let clock = MockClock::new();
        let mut app = monitor(
            &clock,
            Rc::new(Cell::new(true)),
            MonitorOptions {
                max_frames: Some(2),
                ..MonitorOptions::default()
            },
        );

        assert!(!app.should_exit());
        app.advance_state();
        app.advance_state();
        assert!(app.should_exit());
    }
}
