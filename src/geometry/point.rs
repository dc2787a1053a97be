//! Plane point and vector arithmetic shared by every geometric routine
//!
//! Points are `glam` double-precision vectors. The drawing uses screen
//! coordinates, so positive `y` points down. [`PlaneExt`] adds the few
//! operations on top of `glam` that strands and the generator need.

use glam::DVec2;

/// Lengths and determinants below this magnitude are treated as zero
pub const LENGTH_EPSILON: f64 = 1e-10;

/// A point or displacement in the drawing plane
pub type Point2D = DVec2;

/// Polar construction, bearings and rounding for plane vectors
pub trait PlaneExt: Sized {
    /// Vector of the given length pointing at `angle_deg` (measured from +x towards +y)
    fn from_polar(length: f64, angle_deg: f64) -> Self;

    /// Direction of the vector in degrees, in `(-180, 180]`
    fn angle_deg(self) -> f64;

    /// Unit vector in the same direction, `None` below [`LENGTH_EPSILON`]
    fn normalized(self) -> Option<Self>;

    /// Round both coordinates to `decimals` places
    fn rounded(self, decimals: i32) -> Self;
}

impl PlaneExt for DVec2 {
    fn from_polar(length: f64, angle_deg: f64) -> Self {
        Self::from_angle(angle_deg.to_radians()) * length
    }

    fn angle_deg(self) -> f64 {
        self.y.atan2(self.x).to_degrees()
    }

    fn normalized(self) -> Option<Self> {
        let length = self.length();
        (length > LENGTH_EPSILON).then(|| self / length)
    }

    fn rounded(self, decimals: i32) -> Self {
        let scale = 10f64.powi(decimals);
        (self * scale).round() / scale
    }
}
