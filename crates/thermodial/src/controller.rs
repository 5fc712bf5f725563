use log::{debug, trace};

use crate::config::DialConfig;
use crate::mapper::{
    angle_to_value, pointer_to_angle, temperature_to_angle, Point, TemperatureRange,
    FULL_TURN_DEGREES,
};
use crate::Result;

/// Snapshot of the dial: the integer readout and where the handle sits.
///
/// `angle` is in degrees clockwise from 12 o'clock. It stays in `[0, 360)`
/// while tracking the pointer and is exactly `360` when clamped to the
/// range maximum, so a full progress arc can be drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DialState {
    temperature: i32,
    angle: f64,
}

impl DialState {
    pub fn temperature(&self) -> i32 {
        self.temperature
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Share of the circle covered by the progress arc, in `[0, 1]`.
    pub fn fraction(&self) -> f64 {
        self.angle / FULL_TURN_DEGREES
    }
}

/// Whether a drag gesture is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialPhase {
    #[default]
    Idle,
    Dragging,
}

/// What happened during one drag gesture, reported when it ends.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSummary {
    pub start_angle: f64,        // Handle angle when the drag began
    pub end_angle: f64,          // Handle angle when the drag ended
    pub start_temperature: i32,  // Readout when the drag began
    pub end_temperature: i32,    // Readout when the drag ended
    pub moves: u64,              // Pointer moves delivered during the drag
    pub clamped_moves: u64,      // Moves that hit a range bound
}

/// Owns the dial state and turns pointer drags into temperature updates.
///
/// The host rendering layer only ever reads [`DialState`] snapshots; all
/// writes go through the `on_drag_*` methods.
#[derive(Debug, Clone)]
pub struct DialController {
    config: DialConfig,
    range: TemperatureRange,
    state: DialState,
    phase: DialPhase,

    // Current drag session
    drag_start_angle: f64,
    drag_start_temperature: i32,
    moves: u64,
    clamped_moves: u64,
}

impl DialController {
    /// Create a dial controller, failing fast on a bad configuration.
    pub fn new(config: DialConfig) -> Result<Self> {
        let range = config.validate()?;
        let state = Self::initial_state(&config, &range);
        debug!(
            "dial initialized at {} (range {}..={}, angle {:.3})",
            state.temperature,
            range.min(),
            range.max(),
            state.angle
        );

        Ok(DialController {
            config,
            range,
            state,
            phase: DialPhase::Idle,
            drag_start_angle: state.angle,
            drag_start_temperature: state.temperature,
            moves: 0,
            clamped_moves: 0,
        })
    }

    fn initial_state(config: &DialConfig, range: &TemperatureRange) -> DialState {
        DialState {
            temperature: config.initial(),
            angle: temperature_to_angle(config.initial(), range),
        }
    }

    /// Mark the start of a drag gesture.
    pub fn on_drag_start(&mut self) {
        if self.phase == DialPhase::Dragging {
            debug!("drag restarted before the previous one ended");
        }
        self.phase = DialPhase::Dragging;
        self.drag_start_angle = self.state.angle;
        self.drag_start_temperature = self.state.temperature;
        self.moves = 0;
        self.clamped_moves = 0;
        debug!("drag started at {:.3}°", self.drag_start_angle);
    }

    /// Feed a pointer position (relative to the same origin as `center`).
    ///
    /// # Returns
    /// The updated state for the host to redraw.
    pub fn on_drag_move(&mut self, pointer: Point, center: Point) -> DialState {
        if self.phase == DialPhase::Idle {
            debug!("drag move while idle, starting drag implicitly");
            self.on_drag_start();
        }
        self.moves += 1;
        let raw_angle = pointer_to_angle(pointer, center);
        self.update_angle(raw_angle)
    }

    /// End the current drag. The last state stays as it is.
    ///
    /// Returns `None` if no drag was in progress.
    pub fn on_drag_end(&mut self) -> Option<DragSummary> {
        if self.phase == DialPhase::Idle {
            return None;
        }
        self.phase = DialPhase::Idle;

        let summary = DragSummary {
            start_angle: self.drag_start_angle,
            end_angle: self.state.angle,
            start_temperature: self.drag_start_temperature,
            end_temperature: self.state.temperature,
            moves: self.moves,
            clamped_moves: self.clamped_moves,
        };
        debug!(
            "drag ended: {} -> {} after {} moves ({} clamped)",
            summary.start_temperature, summary.end_temperature, summary.moves, summary.clamped_moves
        );
        Some(summary)
    }

    /// Apply a raw handle angle, clamping to the range.
    ///
    /// Inside the range the raw angle is kept so the handle follows the
    /// pointer smoothly. Past either bound the handle snaps to that bound's
    /// angle (0° for min, 360° for max). Non-finite angles are ignored and
    /// the current state is returned unchanged.
    pub fn update_angle(&mut self, raw_angle: f64) -> DialState {
        if !raw_angle.is_finite() {
            debug!("ignoring non-finite dial angle {}", raw_angle);
            return self.state;
        }

        let candidate = angle_to_value(raw_angle, &self.range);

        self.state = if candidate < i64::from(self.range.min()) {
            self.clamped_moves += 1;
            debug!("{:.3}° maps to {}, clamped to min", raw_angle, candidate);
            self.snapped(self.range.min())
        } else if candidate > i64::from(self.range.max()) {
            self.clamped_moves += 1;
            debug!("{:.3}° maps to {}, clamped to max", raw_angle, candidate);
            self.snapped(self.range.max())
        } else {
            DialState {
                // Within [min, max], so it fits in i32.
                temperature: candidate as i32,
                angle: raw_angle,
            }
        };

        trace!(
            "dial at {} ({:.3}°)",
            self.state.temperature,
            self.state.angle
        );
        self.state
    }

    fn snapped(&self, temperature: i32) -> DialState {
        DialState {
            temperature,
            angle: temperature_to_angle(temperature, &self.range),
        }
    }

    /// Return to the configured initial temperature and drop any drag.
    pub fn reset(&mut self) {
        self.state = Self::initial_state(&self.config, &self.range);
        self.phase = DialPhase::Idle;
        self.drag_start_angle = self.state.angle;
        self.drag_start_temperature = self.state.temperature;
        self.moves = 0;
        self.clamped_moves = 0;
    }

    pub fn state(&self) -> DialState {
        self.state
    }

    pub fn temperature(&self) -> i32 {
        self.state.temperature
    }

    pub fn angle(&self) -> f64 {
        self.state.angle
    }

    /// Progress-arc fraction (`angle / 360`).
    pub fn fraction(&self) -> f64 {
        self.state.fraction()
    }

    pub fn range(&self) -> TemperatureRange {
        self.range
    }

    pub fn config(&self) -> &DialConfig {
        &self.config
    }

    pub fn phase(&self) -> DialPhase {
        self.phase
    }

    pub fn is_dragging(&self) -> bool {
        self.phase == DialPhase::Dragging
    }

    /// Handle angle recorded when the current (or last) drag began.
    pub fn drag_start_angle(&self) -> f64 {
        self.drag_start_angle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapper::angle_to_temperature;
    use crate::DialError;

    const EPSILON: f64 = 1e-9;
    const CENTER: Point = Point::new(100.0, 100.0);

    fn controller() -> DialController {
        DialController::new(DialConfig::new().with_range(16, 30).with_initial(27)).unwrap()
    }

    #[test]
    fn test_initialize() {
        let dial = controller();
        assert_eq!(dial.temperature(), 27);
        assert!((dial.angle() - 11.0 / 14.0 * 360.0).abs() < EPSILON);
        assert!((dial.angle() - 282.857).abs() < 1e-3);
        assert!((dial.fraction() - 11.0 / 14.0).abs() < EPSILON);
        assert_eq!(dial.phase(), DialPhase::Idle);
    }

    #[test]
    fn test_initialize_rejects_bad_config() {
        let err = DialController::new(DialConfig::new().with_range(30, 16)).unwrap_err();
        assert_eq!(err, DialError::DegenerateRange { min: 30, max: 16 });

        let err = DialController::new(DialConfig::new().with_initial(12)).unwrap_err();
        assert_eq!(
            err,
            DialError::InitialOutOfRange {
                initial: 12,
                min: 16,
                max: 30
            }
        );
    }

    #[test]
    fn test_pointer_above_center_selects_min() {
        let mut dial = controller();
        dial.on_drag_start();
        let state = dial.on_drag_move(Point::new(100.0, 50.0), CENTER);
        assert_eq!(state.temperature(), 16);
        assert!(state.angle().abs() < EPSILON);
        assert!(state.fraction().abs() < EPSILON);
    }

    #[test]
    fn test_pointer_right_of_center() {
        let mut dial = controller();
        dial.on_drag_start();
        let state = dial.on_drag_move(Point::new(150.0, 100.0), CENTER);
        // round(19.5)
        assert_eq!(state.temperature(), 20);
        assert!((state.angle() - 90.0).abs() < EPSILON);
    }

    #[test]
    fn test_in_range_move_keeps_raw_angle() {
        let mut dial = controller();
        dial.on_drag_start();
        // Slightly past 3 o'clock: the readout rounds but the handle does not.
        let pointer = Point::new(150.0, 103.0);
        let expected = pointer_to_angle(pointer, CENTER);
        let state = dial.on_drag_move(pointer, CENTER);
        assert!((state.angle() - expected).abs() < EPSILON);
        assert_ne!(state.angle(), temperature_to_angle(state.temperature(), &dial.range()));
    }

    #[test]
    fn test_clamps_above_max() {
        let mut dial = controller();
        // 489° would read 35.
        let state = dial.update_angle(489.0);
        assert_eq!(state.temperature(), 30);
        assert!((state.angle() - 360.0).abs() < EPSILON);
        assert!((state.fraction() - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_clamps_below_min() {
        let mut dial = controller();
        let state = dial.update_angle(-60.0);
        assert_eq!(state.temperature(), 16);
        assert!(state.angle().abs() < EPSILON);
    }

    #[test]
    fn test_clamp_is_idempotent() {
        let mut dial = controller();
        let max_angle = temperature_to_angle(30, &dial.range());
        for _ in 0..5 {
            let state = dial.update_angle(500.0);
            assert_eq!(state.temperature(), 30);
            assert_eq!(state.angle(), max_angle);
        }
        for _ in 0..5 {
            let state = dial.update_angle(-100.0);
            assert_eq!(state.temperature(), 16);
            assert_eq!(state.angle(), 0.0);
        }
    }

    #[test]
    fn test_state_invariant_holds_around_the_dial() {
        let mut dial = controller();
        let range = dial.range();
        dial.on_drag_start();
        for step in 0..360 {
            let theta = (step as f64).to_radians();
            let pointer = Point::new(
                CENTER.x + theta.cos() * 60.0,
                CENTER.y + theta.sin() * 60.0,
            );
            let state = dial.on_drag_move(pointer, CENTER);
            assert!(range.contains(state.temperature()));
            assert!((0.0..=360.0).contains(&state.angle()));
            assert_eq!(
                state.temperature(),
                angle_to_temperature(state.angle(), &range)
            );
        }
    }

    #[test]
    fn test_non_finite_angles_are_ignored() {
        let mut dial = controller();
        let before = dial.update_angle(90.0);
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let state = dial.update_angle(bad);
            assert_eq!(state, before);
            assert!(state.angle().is_finite());
        }

        // A NaN pointer coordinate goes through the same path.
        let state = dial.on_drag_move(Point::new(f64::NAN, 20.0), CENTER);
        assert_eq!(state, before);
        assert_eq!(dial.on_drag_end().map(|s| s.clamped_moves), Some(0));
    }

    #[test]
    fn test_widest_range_drags_and_clamps() {
        let config = DialConfig::new()
            .with_range(i32::MIN, i32::MAX)
            .with_initial(0);
        let mut dial = DialController::new(config).unwrap();
        assert!((dial.angle() - 180.0).abs() < 1e-6);

        let state = dial.on_drag_move(Point::new(150.0, 100.0), CENTER);
        assert!((state.angle() - 90.0).abs() < EPSILON);
        assert_eq!(state.temperature(), angle_to_temperature(90.0, &dial.range()));

        let state = dial.update_angle(500.0);
        assert_eq!(state.temperature(), i32::MAX);
        assert!((state.angle() - 360.0).abs() < EPSILON);

        // Below min must clamp, not saturate to i32::MIN with a raw angle.
        let state = dial.update_angle(-10.0);
        assert_eq!(state.temperature(), i32::MIN);
        assert_eq!(state.angle(), 0.0);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_state_json_round_trip() {
        let mut dial = controller();
        let state = dial.update_angle(90.0);
        let json = serde_json::to_string(&state).unwrap();
        assert_eq!(json, r#"{"temperature":20,"angle":90.0}"#);
        let back: DialState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);

        let initial = controller().state();
        let json = serde_json::to_string(&initial).unwrap();
        let back: DialState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, initial);
    }

    #[test]
    fn test_drag_phases_and_summary() {
        let mut dial = controller();
        assert_eq!(dial.on_drag_end(), None);

        dial.on_drag_start();
        assert!(dial.is_dragging());
        assert!((dial.drag_start_angle() - dial.angle()).abs() < EPSILON);

        dial.on_drag_move(Point::new(150.0, 100.0), CENTER);
        dial.update_angle(400.0);
        dial.on_drag_move(Point::new(100.0, 50.0), CENTER);

        let summary = dial.on_drag_end().unwrap();
        assert_eq!(dial.phase(), DialPhase::Idle);
        assert_eq!(summary.start_temperature, 27);
        assert_eq!(summary.end_temperature, 16);
        assert_eq!(summary.moves, 2);
        assert_eq!(summary.clamped_moves, 1);
        assert!(summary.end_angle.abs() < EPSILON);

        // Ending a drag does not snap anything.
        assert_eq!(dial.temperature(), 16);
        assert_eq!(dial.on_drag_end(), None);
    }

    #[test]
    fn test_move_while_idle_starts_drag() {
        let mut dial = controller();
        let start = dial.angle();
        dial.on_drag_move(Point::new(150.0, 100.0), CENTER);
        assert!(dial.is_dragging());
        assert!((dial.drag_start_angle() - start).abs() < EPSILON);
        assert_eq!(dial.on_drag_end().map(|s| s.moves), Some(1));
    }

    #[test]
    fn test_same_input_same_output() {
        let mut dial = controller();
        let pointer = Point::new(37.0, 141.0);
        let first = dial.on_drag_move(pointer, CENTER);
        let second = dial.on_drag_move(pointer, CENTER);
        assert_eq!(first, second);
    }

    #[test]
    fn test_reset() {
        let mut dial = controller();
        dial.on_drag_move(Point::new(100.0, 50.0), CENTER);
        dial.reset();
        assert_eq!(dial.temperature(), 27);
        assert_eq!(dial.phase(), DialPhase::Idle);
        assert_eq!(dial.on_drag_end(), None);
    }
}
