use crate::mapper::TemperatureRange;
use crate::{DialError, Result};

/// Configuration for a thermostat dial.
///
/// Uses a builder pattern; nothing is checked until [`DialConfig::validate`]
/// (or [`crate::DialController::new`]) runs.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DialConfig {
    min: i32,     // Lower bound, inclusive
    max: i32,     // Upper bound, inclusive
    initial: i32, // Starting value, must lie in [min, max]
}

impl Default for DialConfig {
    fn default() -> Self {
        DialConfig {
            min: 16,
            max: 30,
            initial: 27,
        }
    }
}

impl DialConfig {
    /// Create a new dial configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the range (min, max), both inclusive.
    pub fn with_range(mut self, min: i32, max: i32) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    /// Set the starting temperature.
    pub fn with_initial(mut self, initial: i32) -> Self {
        self.initial = initial;
        self
    }

    pub fn min(&self) -> i32 {
        self.min
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    pub fn initial(&self) -> i32 {
        self.initial
    }

    /// Check the configuration and return the range it describes.
    pub fn validate(&self) -> Result<TemperatureRange> {
        let range = TemperatureRange::new(self.min, self.max)?;
        if !range.contains(self.initial) {
            return Err(DialError::InitialOutOfRange {
                initial: self.initial,
                min: self.min,
                max: self.max,
            });
        }
        Ok(range)
    }
}
