//! Tests for polar construction, bearings, normalization and rounding

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use strandweave::geometry::point::LENGTH_EPSILON;
    use strandweave::geometry::{PlaneExt, Point2D};

    // Tests a zero vector has no direction
    // Verified by removing the epsilon guard in normalized
    #[test]
    fn test_normalized_zero_vector() {
        assert!(Point2D::new(0.0, 0.0).normalized().is_none());
        assert!(Point2D::new(LENGTH_EPSILON / 2.0, 0.0).normalized().is_none());
        let unit = Point2D::new(3.0, 4.0).normalized().expect("unit");
        assert_relative_eq!(unit.length(), 1.0);
        assert_relative_eq!(unit.x, 0.6);
    }

    // Tests polar construction and angle readback
    // Verified by swapping sine and cosine in from_polar
    #[test]
    fn test_polar_round_trip() {
        let p = Point2D::from_polar(2.0, 90.0);
        assert!(p.abs_diff_eq(Point2D::new(0.0, 2.0), 1e-12));
        assert_relative_eq!(p.angle_deg(), 90.0, epsilon = 1e-12);
    }

    // Tests angles point from +x towards +y in screen coordinates
    // Verified by negating the y argument of atan2
    #[test]
    fn test_angle_orientation() {
        assert_relative_eq!(Point2D::new(0.0, -1.0).angle_deg(), -90.0);
        assert_relative_eq!(Point2D::new(-1.0, 0.0).angle_deg(), 180.0);
        assert_relative_eq!(Point2D::from_polar(1.0, -45.0).angle_deg(), -45.0, epsilon = 1e-12);
    }

    // Tests rounding to two decimals
    // Verified by truncating instead of rounding
    #[test]
    fn test_rounded() {
        let p = Point2D::new(1.236, -2.344).rounded(2);
        assert_relative_eq!(p.x, 1.24);
        assert_relative_eq!(p.y, -2.34);
    }
}
