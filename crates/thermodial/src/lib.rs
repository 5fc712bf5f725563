// Thermodial: a drag-controlled thermostat dial core written in Rust
// Copyright 2024

//! Core logic for a circular thermostat dial.
//!
//! The dial maps a bounded integer (the temperature) onto a full circle,
//! with the minimum at 12 o'clock and the maximum after one clockwise turn.
//! A host rendering layer feeds raw pointer coordinates into a
//! [`DialController`] and redraws from the [`DialState`] it returns.
//!
//! ```
//! use thermodial::{DialConfig, DialController, Point};
//!
//! let mut dial = DialController::new(DialConfig::new().with_range(16, 30).with_initial(27))?;
//! let center = Point::new(100.0, 100.0);
//!
//! dial.on_drag_start();
//! let state = dial.on_drag_move(Point::new(150.0, 100.0), center);
//! assert_eq!(state.temperature(), 20);
//! dial.on_drag_end();
//! # Ok::<(), thermodial::DialError>(())
//! ```

mod config;
mod controller;
mod geometry;
mod mapper;

pub use config::DialConfig;
pub use controller::{DialController, DialPhase, DialState, DragSummary};
pub use geometry::DialGeometry;
pub use mapper::{
    angle_to_temperature, pointer_to_angle, temperature_to_angle, Point, TemperatureRange,
    FULL_TURN_DEGREES,
};

/// Configuration problems detected when building a dial.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DialError {
    #[error("Degenerate range {min}..={max} (max must be greater than min)")]
    DegenerateRange { min: i32, max: i32 },

    #[error("Initial temperature {initial} is outside {min}..={max}")]
    InitialOutOfRange { initial: i32, min: i32, max: i32 },
}

pub type Result<T> = std::result::Result<T, DialError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            DialError::DegenerateRange { min: 5, max: 5 }.to_string(),
            "Degenerate range 5..=5 (max must be greater than min)"
        );
        assert_eq!(
            DialError::InitialOutOfRange {
                initial: 40,
                min: 16,
                max: 30
            }
            .to_string(),
            "Initial temperature 40 is outside 16..=30"
        );
    }

    #[test]
    fn test_full_drag_across_the_dial() {
        let geometry = DialGeometry::new();
        let mut dial = DialController::new(DialConfig::new()).unwrap();
        let center = geometry.center();

        dial.on_drag_start();
        let mut last = dial.range().min();
        // Walk the handle clockwise from just past 12 o'clock.
        for step in 1..360 {
            let pointer = geometry.handle_position(step as f64);
            let state = dial.on_drag_move(pointer, center);
            assert!(state.temperature() >= last);
            last = state.temperature();
        }
        let summary = dial.on_drag_end().unwrap();
        assert_eq!(summary.end_temperature, 30);
        assert_eq!(summary.moves, 359);
        assert_eq!(summary.clamped_moves, 0);
    }
}
