use strum_macros::Display;

pub const DEFAULT_MAX_STAMINA: f64 = 7.0;

/// Recharge rate in stamina units per second of real time.
const RECHARGE_RATE: f64 = 1.0;

/// Summing frame-sized f64 deltas leaves sub-nanosecond residue around the
/// clamp points; anything inside this band counts as empty or full.
const RESIDUE: f64 = 1e-9;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum GateMode {
    Idle,
    Typing,
    Recharging,
}

/// Gates typing input behind a depleting/recharging stamina timer.
///
/// Typing depletes stamina each tick; hitting zero forces a full recharge
/// during which the toggle key is inert. The gate accepts input only while
/// in `Typing` mode.
#[derive(Clone, Debug)]
pub struct TimerGate {
    stamina: f64,
    max: f64,
    mode: GateMode,
    forced: bool,
}

impl TimerGate {
    pub fn new(max: f64) -> Self {
        Self {
            stamina: max,
            max,
            mode: GateMode::Idle,
            forced: false,
        }
    }

    pub fn mode(&self) -> GateMode {
        self.mode
    }

    pub fn stamina(&self) -> f64 {
        self.stamina
    }

    pub fn is_forced(&self) -> bool {
        self.forced
    }

    /// True iff keystrokes are accepted right now.
    pub fn accepts_input(&self) -> bool {
        self.mode == GateMode::Typing
    }

    /// Fill level in [0, 1] for the timer indicator. Pure query.
    /// A degenerate max reads as empty rather than dividing by zero.
    pub fn fraction(&self) -> f64 {
        if self.max > 0.0 {
            self.stamina / self.max
        } else {
            0.0
        }
    }

    /// Advance the gate by `dt` seconds of real time.
    pub fn tick(&mut self, dt: f64) {
        match self.mode {
            GateMode::Typing => {
                self.stamina -= dt;
                if self.stamina <= RESIDUE {
                    self.stamina = 0.0;
                    self.mode = GateMode::Recharging;
                    self.forced = true;
                }
            }
            GateMode::Recharging => {
                self.stamina += RECHARGE_RATE * dt;
                if self.stamina >= self.max - RESIDUE {
                    self.stamina = self.max;
                    self.mode = GateMode::Idle;
                    self.forced = false;
                }
            }
            GateMode::Idle => {}
        }
    }

    /// Handle the toggle key. Ignored during a forced recharge; from Idle the
    /// gate opens only when there is stamina left to spend.
    pub fn toggle(&mut self) {
        if self.forced {
            return;
        }
        match self.mode {
            GateMode::Typing => self.mode = GateMode::Recharging,
            GateMode::Recharging => self.mode = GateMode::Typing,
            GateMode::Idle => {
                if self.stamina > 0.0 {
                    self.mode = GateMode::Typing;
                }
            }
        }
    }
}

impl Default for TimerGate {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_STAMINA)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_idle_and_full() {
        let gate = TimerGate::default();
        assert_eq!(gate.mode(), GateMode::Idle);
        assert_eq!(gate.stamina(), DEFAULT_MAX_STAMINA);
        assert!(!gate.is_forced());
        assert!(!gate.accepts_input());
        assert_eq!(gate.fraction(), 1.0);
    }

    #[test]
    fn toggle_from_idle_opens_gate() {
        let mut gate = TimerGate::default();
        gate.toggle();
        assert_eq!(gate.mode(), GateMode::Typing);
        assert!(gate.accepts_input());
    }

    #[test]
    fn depletion_forces_recharge() {
        let mut gate = TimerGate::new(7.0);
        gate.toggle();

        // Deplete in steps; exactly 7.0 units of typing time.
        for _ in 0..70 {
            gate.tick(0.1);
        }

        assert_eq!(gate.stamina(), 0.0);
        assert_eq!(gate.mode(), GateMode::Recharging);
        assert!(gate.is_forced());

        // Toggle is inert while the forced recharge runs.
        gate.toggle();
        assert_eq!(gate.mode(), GateMode::Recharging);
        assert!(gate.is_forced());
    }

    #[test]
    fn forced_recharge_completes_to_idle() {
        let mut gate = TimerGate::new(7.0);
        gate.toggle();
        gate.tick(7.0);
        assert!(gate.is_forced());

        gate.tick(7.0);
        assert_eq!(gate.stamina(), 7.0);
        assert_eq!(gate.mode(), GateMode::Idle);
        assert!(!gate.is_forced());
    }

    #[test]
    fn fractional_recharge_clamps_exactly_to_max() {
        let mut gate = TimerGate::new(7.0);
        gate.toggle();
        gate.tick(7.0);
        assert!(gate.is_forced());

        // 7.0 units of recharge in frame-sized steps must land exactly full
        // despite f64 residue.
        for _ in 0..140 {
            gate.tick(0.05);
        }
        assert_eq!(gate.stamina(), 7.0);
        assert_eq!(gate.mode(), GateMode::Idle);
        assert!(!gate.is_forced());
    }

    #[test]
    fn recharge_clamps_at_max() {
        let mut gate = TimerGate::new(7.0);
        gate.toggle();
        gate.tick(3.0);
        gate.toggle(); // manual recharge
        assert_eq!(gate.mode(), GateMode::Recharging);
        assert!(!gate.is_forced());

        gate.tick(100.0);
        assert_eq!(gate.stamina(), 7.0);
        assert_eq!(gate.mode(), GateMode::Idle);
    }

    #[test]
    fn manual_toggle_cycles_typing_and_recharging() {
        let mut gate = TimerGate::new(7.0);
        gate.toggle();
        assert_eq!(gate.mode(), GateMode::Typing);
        gate.toggle();
        assert_eq!(gate.mode(), GateMode::Recharging);
        gate.toggle();
        assert_eq!(gate.mode(), GateMode::Typing);
    }

    #[test]
    fn depletion_overshoot_clamps_to_zero() {
        let mut gate = TimerGate::new(1.0);
        gate.toggle();
        gate.tick(5.0);
        assert_eq!(gate.stamina(), 0.0);
        assert!(gate.is_forced());
    }

    #[test]
    fn idle_tick_is_a_noop() {
        let mut gate = TimerGate::new(7.0);
        gate.tick(3.0);
        assert_eq!(gate.stamina(), 7.0);
        assert_eq!(gate.mode(), GateMode::Idle);
    }

    #[test]
    fn fraction_stays_finite_for_degenerate_max() {
        assert_eq!(TimerGate::new(0.0).fraction(), 0.0);
        assert_eq!(TimerGate::new(-1.0).fraction(), 0.0);
    }

    #[test]
    fn fraction_tracks_stamina() {
        let mut gate = TimerGate::new(4.0);
        gate.toggle();
        gate.tick(1.0);
        assert!((gate.fraction() - 0.75).abs() < 1e-9);
    }
}
