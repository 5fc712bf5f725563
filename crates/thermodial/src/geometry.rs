use crate::mapper::Point;

/// Pixel dimensions of a rendered dial.
///
/// Hosts use this to place the handle consistently; the controller itself
/// never needs it.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DialGeometry {
    dial_size: f64,        // Diameter of the dial's square frame
    stroke_width: f64,     // Width of the track and progress ring
    handle_radius: f64,    // Outer radius of the handle
    inner_dot_radius: f64, // Radius of the dot in the handle's center
}

impl Default for DialGeometry {
    fn default() -> Self {
        DialGeometry {
            dial_size: 190.0,
            stroke_width: 20.0,
            handle_radius: 15.0,
            inner_dot_radius: 5.0,
        }
    }
}

impl DialGeometry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dial_size(mut self, dial_size: f64) -> Self {
        self.dial_size = dial_size;
        self
    }

    pub fn with_stroke_width(mut self, stroke_width: f64) -> Self {
        self.stroke_width = stroke_width;
        self
    }

    pub fn with_handle_radius(mut self, handle_radius: f64) -> Self {
        self.handle_radius = handle_radius;
        self
    }

    pub fn with_inner_dot_radius(mut self, inner_dot_radius: f64) -> Self {
        self.inner_dot_radius = inner_dot_radius;
        self
    }

    pub fn dial_size(&self) -> f64 {
        self.dial_size
    }

    pub fn stroke_width(&self) -> f64 {
        self.stroke_width
    }

    pub fn handle_radius(&self) -> f64 {
        self.handle_radius
    }

    pub fn inner_dot_radius(&self) -> f64 {
        self.inner_dot_radius
    }

    /// Center of the dial's frame, in frame coordinates.
    pub fn center(&self) -> Point {
        Point::new(self.dial_size / 2.0, self.dial_size / 2.0)
    }

    /// Radius of the centerline of the track ring.
    pub fn track_radius(&self) -> f64 {
        (self.dial_size - self.stroke_width) / 2.0
    }

    /// Distance from the center at which the handle is drawn.
    ///
    /// A little further out than [`track_radius`](Self::track_radius).
    pub fn handle_orbit_radius(&self) -> f64 {
        (self.dial_size - self.stroke_width) / 1.8
    }

    /// Where to draw the handle for a given dial angle.
    pub fn handle_position(&self, angle: f64) -> Point {
        // 0° is 12 o'clock, so rotate back by a quarter turn for cos/sin.
        let rad = (angle - 90.0).to_radians();
        let r = self.handle_orbit_radius();
        let center = self.center();
        Point::new(center.x + r * rad.cos(), center.y + r * rad.sin())
    }
}
