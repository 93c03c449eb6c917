// Key-to-motion interpretation
//
// Pure mapping from one input token plus the current motion state to the
// next state. Side effects (publishing, logging) stay with the caller.

use std::collections::HashMap;

use crate::messages::MotionState;

/// Help banner printed at startup and after every 15th speed adjustment
pub const HELP: &str = "\
Reading from the keyboard and publishing velocity commands!
---------------------------
Moving around:
   u    i    o
   j    k    l
   m    ,    .

For holonomic mode (strafing), hold down the shift key:
---------------------------
   U    I    O
   J    K    L
   M    <    >

t : up (+z)
b : down (-z)

anything else : stop

q/z : increase/decrease max speeds by 10%
w/x : increase/decrease only linear speed by 10%
e/c : increase/decrease only angular speed by 10%

CTRL-C to quit";

/// Motion keys: (forward, lateral, vertical, rotational) direction components
const MOVE_BINDINGS: &[(char, (i8, i8, i8, i8))] = &[
    ('i', (1, 0, 0, 0)),
    ('o', (1, 0, 0, -1)),
    ('j', (0, 0, 0, 1)),
    ('l', (0, 0, 0, -1)),
    ('u', (1, 0, 0, 1)),
    (',', (-1, 0, 0, 0)),
    ('.', (-1, 0, 0, 1)),
    ('m', (-1, 0, 0, -1)),
    ('O', (1, -1, 0, 0)),
    ('I', (1, 0, 0, 0)),
    ('J', (0, 1, 0, 0)),
    ('L', (0, -1, 0, 0)),
    ('U', (1, 1, 0, 0)),
    ('<', (-1, 0, 0, 0)),
    ('>', (-1, -1, 0, 0)),
    ('M', (-1, 1, 0, 0)),
    ('t', (0, 0, 1, 0)),
    ('b', (0, 0, -1, 0)),
];

/// Speed keys: multipliers applied to (speed, turn)
const SPEED_BINDINGS: &[(char, (f64, f64))] = &[
    ('q', (1.1, 1.1)),
    ('z', (0.9, 0.9)),
    ('w', (1.1, 1.0)),
    ('x', (0.9, 1.0)),
    ('e', (1.0, 1.1)),
    ('c', (1.0, 0.9)),
];

/// Immutable key-binding tables, built once at startup
pub struct KeyBindings {
    moves: HashMap<char, (i8, i8, i8, i8)>,
    scales: HashMap<char, (f64, f64)>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            moves: MOVE_BINDINGS.iter().copied().collect(),
            scales: SPEED_BINDINGS.iter().copied().collect(),
        }
    }
}

impl KeyBindings {
    pub fn motion(&self, key: char) -> Option<(i8, i8, i8, i8)> {
        self.moves.get(&key).copied()
    }

    pub fn scale(&self, key: char) -> Option<(f64, f64)> {
        self.scales.get(&key).copied()
    }
}

/// Upper limits applied when scaling speed/turn
#[derive(Debug, Clone, Copy)]
pub struct SpeedLimits {
    pub speed: f64,
    pub turn: f64,
}

/// One captured input token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyToken {
    /// A printable key press
    Char(char),
    /// Read timeout elapsed with no key
    Timeout,
    /// Ctrl-C
    Interrupt,
    /// Any non-character key (arrows, function keys, ...)
    Other,
}

/// Outcome of interpreting one token
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Interpreted {
    /// Direction changed (or was reset); publish on the next tick
    Update(MotionState),
    /// Speed/turn changed; caller reports limits and republishes
    Rescale(MotionState),
    /// Timeout with the robot already stopped; nothing to do
    Idle,
    /// Interrupt token; begin shutdown
    Quit,
}

/// Interpret a single token against the current state.
///
/// Unrecognized characters and non-character keys reset the direction so
/// the robot decelerates to a stop; this is intentional, not an error.
pub fn interpret(
    bindings: &KeyBindings,
    token: KeyToken,
    current: MotionState,
    limits: &SpeedLimits,
) -> Interpreted {
    match token {
        KeyToken::Interrupt => Interpreted::Quit,
        KeyToken::Char(key) => {
            if let Some((x, y, z, th)) = bindings.motion(key) {
                Interpreted::Update(MotionState {
                    x,
                    y,
                    z,
                    th,
                    ..current
                })
            } else if let Some((linear, angular)) = bindings.scale(key) {
                Interpreted::Rescale(MotionState {
                    speed: limits.speed.min(current.speed * linear),
                    turn: limits.turn.min(current.turn * angular),
                    ..current
                })
            } else {
                Interpreted::Update(current.halted())
            }
        }
        KeyToken::Timeout if current.is_stopped() => Interpreted::Idle,
        KeyToken::Timeout | KeyToken::Other => Interpreted::Update(current.halted()),
    }
}

/// Which limits were newly reached by a speed adjustment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LimitReport {
    pub speed: bool,
    pub turn: bool,
}

/// Deduplicates limit-reached reports to one per crossing.
///
/// Re-arms once the value drops back below its limit, so climbing to the
/// limit a second time is reported again.
#[derive(Debug, Default)]
pub struct LimitNotifier {
    speed_capped: bool,
    turn_capped: bool,
}

impl LimitNotifier {
    pub fn observe(&mut self, state: &MotionState, limits: &SpeedLimits) -> LimitReport {
        let speed_at = state.speed >= limits.speed;
        let turn_at = state.turn >= limits.turn;
        let report = LimitReport {
            speed: speed_at && !self.speed_capped,
            turn: turn_at && !self.turn_capped,
        };
        self.speed_capped = speed_at;
        self.turn_capped = turn_at;
        report
    }
}

/// Status line shown after each speed adjustment
pub fn vels(speed: f64, turn: f64) -> String {
    format!("currently:\tspeed {speed}\tturn {turn}")
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIMITS: SpeedLimits = SpeedLimits {
        speed: 1.0,
        turn: 1.0,
    };

    fn moving() -> MotionState {
        MotionState {
            x: 1,
            y: 0,
            z: 0,
            th: 0,
            speed: 0.5,
            turn: 1.0,
        }
    }

    #[test]
    fn every_motion_key_yields_its_bound_tuple() {
        let bindings = KeyBindings::default();
        for &(key, (x, y, z, th)) in MOVE_BINDINGS {
            let got = interpret(&bindings, KeyToken::Char(key), moving(), &LIMITS);
            let expected = MotionState {
                x,
                y,
                z,
                th,
                speed: 0.5,
                turn: 1.0,
            };
            assert_eq!(got, Interpreted::Update(expected), "key {key:?}");
        }
    }

    #[test]
    fn every_speed_key_scales_and_clamps() {
        let bindings = KeyBindings::default();
        let start = MotionState {
            speed: 0.5,
            turn: 0.5,
            ..Default::default()
        };
        for &(key, (linear, angular)) in SPEED_BINDINGS {
            match interpret(&bindings, KeyToken::Char(key), start, &LIMITS) {
                Interpreted::Rescale(next) => {
                    assert!((next.speed - LIMITS.speed.min(0.5 * linear)).abs() < 1e-12);
                    assert!((next.turn - LIMITS.turn.min(0.5 * angular)).abs() < 1e-12);
                }
                other => panic!("key {key:?} gave {other:?}"),
            }
        }
    }

    #[test]
    fn scaling_clamps_at_limit() {
        let bindings = KeyBindings::default();
        let near = MotionState {
            speed: 0.95,
            turn: 1.0,
            ..Default::default()
        };
        match interpret(&bindings, KeyToken::Char('q'), near, &LIMITS) {
            Interpreted::Rescale(next) => {
                assert_eq!(next.speed, 1.0);
                assert_eq!(next.turn, 1.0);
            }
            other => panic!("got {other:?}"),
        }
    }

    #[test]
    fn unrecognized_key_resets_direction_only() {
        let bindings = KeyBindings::default();
        let got = interpret(&bindings, KeyToken::Char('p'), moving(), &LIMITS);
        assert_eq!(got, Interpreted::Update(moving().halted()));
    }

    #[test]
    fn non_character_key_resets_direction() {
        let bindings = KeyBindings::default();
        let got = interpret(&bindings, KeyToken::Other, moving(), &LIMITS);
        assert_eq!(got, Interpreted::Update(moving().halted()));
    }

    #[test]
    fn timeout_while_stopped_is_a_no_op() {
        let bindings = KeyBindings::default();
        let stopped = moving().halted();
        assert_eq!(
            interpret(&bindings, KeyToken::Timeout, stopped, &LIMITS),
            Interpreted::Idle
        );
    }

    #[test]
    fn timeout_while_moving_stops() {
        let bindings = KeyBindings::default();
        let got = interpret(&bindings, KeyToken::Timeout, moving(), &LIMITS);
        assert_eq!(got, Interpreted::Update(moving().halted()));
    }

    #[test]
    fn interrupt_quits() {
        let bindings = KeyBindings::default();
        assert_eq!(
            interpret(&bindings, KeyToken::Interrupt, moving(), &LIMITS),
            Interpreted::Quit
        );
    }

    #[test]
    fn repeated_increase_reports_turn_limit_once() {
        // speed 0.5 / turn 1.0, limits (1.0, 1.0), 'q' four times:
        // speed climbs 0.55, 0.605, 0.6655, 0.73205 while turn clamps
        // immediately and is reported on the first press only.
        let bindings = KeyBindings::default();
        let mut notifier = LimitNotifier::default();
        let mut state = MotionState {
            speed: 0.5,
            turn: 1.0,
            ..Default::default()
        };
        let expected_speeds = [0.55, 0.605, 0.6655, 0.73205];
        for (press, expected) in expected_speeds.into_iter().enumerate() {
            state = match interpret(&bindings, KeyToken::Char('q'), state, &LIMITS) {
                Interpreted::Rescale(next) => next,
                other => panic!("got {other:?}"),
            };
            assert!((state.speed - expected).abs() < 1e-9, "press {press}");
            assert_eq!(state.turn, 1.0);

            let report = notifier.observe(&state, &LIMITS);
            assert!(!report.speed);
            assert_eq!(report.turn, press == 0, "press {press}");
        }
    }

    #[test]
    fn limit_report_rearms_after_dropping_below() {
        let limits = SpeedLimits {
            speed: 1.0,
            turn: 10.0,
        };
        let mut notifier = LimitNotifier::default();
        let mut state = MotionState {
            speed: 1.0,
            turn: 1.0,
            ..Default::default()
        };
        assert!(notifier.observe(&state, &limits).speed);
        assert!(!notifier.observe(&state, &limits).speed);

        state.speed = 0.9;
        assert!(!notifier.observe(&state, &limits).speed);

        state.speed = 1.0;
        assert!(notifier.observe(&state, &limits).speed);
    }
}
