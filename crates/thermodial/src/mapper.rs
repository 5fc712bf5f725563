use crate::{DialError, Result};

/// Degrees in one full sweep of the dial.
pub const FULL_TURN_DEGREES: f64 = 360.0;

/// The bounded integer range a dial sweeps over.
///
/// `min` sits at 12 o'clock (0°) and `max` at the end of a full clockwise
/// turn (360°). Both bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawRange"))]
pub struct TemperatureRange {
    min: i32,
    max: i32,
}

impl TemperatureRange {
    /// Create a new range, rejecting `max <= min`.
    pub fn new(min: i32, max: i32) -> Result<Self> {
        if max <= min {
            return Err(DialError::DegenerateRange { min, max });
        }
        Ok(TemperatureRange { min, max })
    }

    /// Lower bound (inclusive).
    pub fn min(&self) -> i32 {
        self.min
    }

    /// Upper bound (inclusive).
    pub fn max(&self) -> i32 {
        self.max
    }

    /// Number of units between `min` and `max`. Always positive.
    ///
    /// Widened to `i64` so `i32::MIN..=i32::MAX` does not overflow.
    pub fn span(&self) -> i64 {
        i64::from(self.max) - i64::from(self.min)
    }

    pub fn contains(&self, temperature: i32) -> bool {
        (self.min..=self.max).contains(&temperature)
    }

    pub fn clamp(&self, temperature: i32) -> i32 {
        temperature.clamp(self.min, self.max)
    }

    /// Angular width of a single unit, in degrees.
    pub fn degrees_per_unit(&self) -> f64 {
        FULL_TURN_DEGREES / self.span() as f64
    }
}

/// Unchecked wire form of [`TemperatureRange`]; deserializing goes through
/// [`TemperatureRange::new`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawRange {
    min: i32,
    max: i32,
}

#[cfg(feature = "serde")]
impl TryFrom<RawRange> for TemperatureRange {
    type Error = DialError;

    fn try_from(raw: RawRange) -> Result<Self> {
        TemperatureRange::new(raw.min, raw.max)
    }
}

/// A 2D coordinate in screen space (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

/// Map a temperature onto the dial, in degrees clockwise from 12 o'clock.
///
/// Values outside the range are not clamped, so `min - 1` maps to a
/// negative angle and `max` maps to exactly 360°.
pub fn temperature_to_angle(temperature: i32, range: &TemperatureRange) -> f64 {
    let offset = i64::from(temperature) - i64::from(range.min);
    let ratio = offset as f64 / range.span() as f64;
    ratio * FULL_TURN_DEGREES
}

/// Map an angle back to the nearest whole temperature.
///
/// Rounds half away from zero. The result is not clamped to the range:
/// angles beyond 360° or below 0° produce values outside it. Results beyond
/// the `i32` limits saturate, and a NaN angle gives `0`.
pub fn angle_to_temperature(degrees: f64, range: &TemperatureRange) -> i32 {
    let value = angle_to_value(degrees, range);
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Rounded, unclamped value for `degrees` in `i64`, so the controller can
/// tell an overshoot from a value that merely saturated `i32`.
pub(crate) fn angle_to_value(degrees: f64, range: &TemperatureRange) -> i64 {
    let value = f64::from(range.min) + (degrees / FULL_TURN_DEGREES) * range.span() as f64;
    value.round() as i64
}

/// Angle of `point` around `center`, in `[0, 360)`, with 0° at 12 o'clock
/// and increasing clockwise on screen.
pub fn pointer_to_angle(point: Point, center: Point) -> f64 {
    let raw = (point.y - center.y).atan2(point.x - center.x).to_degrees();
    let mut degrees = raw + 90.0;
    if degrees < 0.0 {
        degrees += FULL_TURN_DEGREES;
    }
    // atan2 tops out at exactly 180°, which lands on 270° here; the only way
    // to reach 360° is float noise just below -90°.
    if degrees >= FULL_TURN_DEGREES {
        degrees -= FULL_TURN_DEGREES;
    }
    degrees
}
