use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent};

/// One step of the drill loop: a keystroke, a resize, or a frame tick
/// carrying the elapsed seconds since the previous tick. The same delta
/// feeds stamina depletion/recharge and animation progress.
#[derive(Clone, Debug)]
pub enum DrillEvent {
    Key(KeyEvent),
    Resize,
    Tick(f64),
}

/// Elapsed real time since the previous measurement, in seconds.
pub trait Clock {
    fn delta(&mut self) -> f64;
}

/// Instant-backed production clock.
#[derive(Debug)]
pub struct WallClock {
    last: Instant,
}

impl WallClock {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
        }
    }
}

impl Default for WallClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for WallClock {
    fn delta(&mut self) -> f64 {
        let now = Instant::now();
        let dt = now.duration_since(self.last).as_secs_f64();
        self.last = now;
        dt
    }
}

/// Deterministic clock for tests: every tick advances by the same step.
#[derive(Clone, Copy, Debug)]
pub struct FixedStepClock {
    step: f64,
}

impl FixedStepClock {
    pub fn new(step: f64) -> Self {
        Self { step }
    }
}

impl Clock for FixedStepClock {
    fn delta(&mut self) -> f64 {
        self.step
    }
}

/// Key/resize events delivered over a channel. In production a reader
/// thread pumps crossterm; tests feed the sender directly.
pub struct ChannelEventSource {
    rx: Receiver<DrillEvent>,
}

impl ChannelEventSource {
    /// Sender/source pair for driving the runner without a terminal.
    pub fn pair() -> (Sender<DrillEvent>, Self) {
        let (tx, rx) = mpsc::channel();
        (tx, Self { rx })
    }

    /// Spawn the crossterm reader thread. The thread exits once the
    /// receiving side is dropped.
    pub fn spawn_crossterm() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            match event::read() {
                Ok(CtEvent::Key(key)) => {
                    if tx.send(DrillEvent::Key(key)).is_err() {
                        break;
                    }
                }
                Ok(CtEvent::Resize(_, _)) => {
                    if tx.send(DrillEvent::Resize).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(_) => break,
            }
        });

        Self { rx }
    }
}

/// Merges the raw event stream with the frame tick: keys and resizes pass
/// through as they arrive, and a quiet interval becomes a `Tick` stamped
/// with the clock's delta.
pub struct Runner<C: Clock> {
    events: ChannelEventSource,
    tick_interval: Duration,
    clock: C,
}

impl<C: Clock> Runner<C> {
    pub fn new(events: ChannelEventSource, tick_interval: Duration, clock: C) -> Self {
        Self {
            events,
            tick_interval,
            clock,
        }
    }

    /// Block up to one tick interval for the next event.
    pub fn step(&mut self) -> DrillEvent {
        match self.events.rx.recv_timeout(self.tick_interval) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => {
                DrillEvent::Tick(self.clock.delta())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn quiet_interval_becomes_tick_with_clock_delta() {
        let (_tx, es) = ChannelEventSource::pair();
        let mut runner = Runner::new(es, Duration::from_millis(1), FixedStepClock::new(0.25));

        assert_matches!(runner.step(), DrillEvent::Tick(dt) if dt == 0.25);
        assert_matches!(runner.step(), DrillEvent::Tick(dt) if dt == 0.25);
    }

    #[test]
    fn events_pass_through_before_ticks() {
        let (tx, es) = ChannelEventSource::pair();
        tx.send(DrillEvent::Resize).unwrap();
        let mut runner = Runner::new(es, Duration::from_millis(10), FixedStepClock::new(0.05));

        assert_matches!(runner.step(), DrillEvent::Resize);
        assert_matches!(runner.step(), DrillEvent::Tick(_));
    }

    #[test]
    fn disconnected_sender_still_ticks() {
        let (tx, es) = ChannelEventSource::pair();
        drop(tx);
        let mut runner = Runner::new(es, Duration::from_millis(1), FixedStepClock::new(0.05));

        assert_matches!(runner.step(), DrillEvent::Tick(_));
    }

    #[test]
    fn wall_clock_delta_is_nonnegative_and_advances() {
        let mut clock = WallClock::new();
        std::thread::sleep(Duration::from_millis(5));
        let dt = clock.delta();
        assert!(dt > 0.0);

        // Successive deltas measure from the previous call.
        let dt2 = clock.delta();
        assert!(dt2 >= 0.0);
        assert!(dt2 < dt + 1.0);
    }
}
