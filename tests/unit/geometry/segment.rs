//! Tests for segment intersection, projection, distance and rotation

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use strandweave::geometry::Point2D;
    use strandweave::geometry::segment::{
        normalize_angle_deg, point_to_line_distance, point_to_segment_distance, project_onto_segment,
        projection_parameter, rotate_point, segment_intersection,
    };

    fn p(x: f64, y: f64) -> Point2D {
        Point2D::new(x, y)
    }

    // Tests a plain crossing is found at the right point
    // Verified by returning the point at u instead of t
    #[test]
    fn test_crossing_segments() {
        let hit = segment_intersection(p(0.0, 0.0), p(10.0, 0.0), p(5.0, -5.0), p(5.0, 5.0));
        assert_eq!(hit, Some(p(5.0, 0.0)));
    }

    // Tests parallel segments never intersect
    // Verified by removing the determinant guard
    #[test]
    fn test_parallel_segments() {
        let hit = segment_intersection(p(0.0, 0.0), p(10.0, 0.0), p(0.0, 1.0), p(10.0, 1.0));
        assert_eq!(hit, None);
    }

    // Tests collinear disjoint segments give no intersection
    // Verified by accepting parameters outside [0, 1]
    #[test]
    fn test_collinear_disjoint_segments() {
        let hit = segment_intersection(p(0.0, 0.0), p(1.0, 1.0), p(5.0, 5.0), p(6.0, 6.0));
        assert_eq!(hit, None);
    }

    // Tests lines that cross outside one segment are rejected
    // Verified by only checking the first parameter
    #[test]
    fn test_crossing_outside_segment() {
        let hit = segment_intersection(p(0.0, 0.0), p(10.0, 0.0), p(5.0, 1.0), p(5.0, 5.0));
        assert_eq!(hit, None);
    }

    // Tests zero-length segments are handled as degenerate
    // Verified by dividing by the determinant unconditionally
    #[test]
    fn test_zero_length_segment() {
        let hit = segment_intersection(p(1.0, 1.0), p(1.0, 1.0), p(0.0, 0.0), p(2.0, 2.0));
        assert_eq!(hit, None);
    }

    // Tests projection is clamped to the segment
    // Verified by removing the clamp
    #[test]
    fn test_projection_clamped() {
        assert_relative_eq!(projection_parameter(p(-5.0, 3.0), p(0.0, 0.0), p(10.0, 0.0)), 0.0);
        assert_relative_eq!(projection_parameter(p(15.0, 3.0), p(0.0, 0.0), p(10.0, 0.0)), 1.0);
        assert_eq!(project_onto_segment(p(4.0, 3.0), p(0.0, 0.0), p(10.0, 0.0)), p(4.0, 0.0));
    }

    // Tests distance to a degenerate segment falls back to its start point
    // Verified by returning zero for degenerate segments
    #[test]
    fn test_distance_to_degenerate_segment() {
        assert_relative_eq!(point_to_segment_distance(p(3.0, 4.0), p(0.0, 0.0), p(0.0, 0.0)), 5.0);
        assert_relative_eq!(point_to_segment_distance(p(4.0, 3.0), p(0.0, 0.0), p(10.0, 0.0)), 3.0);
    }

    // Tests line distance ignores where the segment ends
    // Verified by clamping the projection to the segment
    #[test]
    fn test_distance_to_line() {
        assert_relative_eq!(point_to_line_distance(p(25.0, -3.0), p(0.0, 0.0), p(10.0, 0.0)), 3.0);
        assert_relative_eq!(point_to_segment_distance(p(25.0, -3.0), p(0.0, 0.0), p(10.0, 0.0)), 234.0f64.sqrt());
        assert_relative_eq!(point_to_line_distance(p(3.0, 4.0), p(0.0, 0.0), p(0.0, 0.0)), 5.0);
    }

    // Tests rotating forward then back restores the point
    // Verified by using degrees without conversion to radians
    #[test]
    fn test_rotation_inverse() {
        let pivot = p(2.0, 3.0);
        let original = p(7.0, -1.0);
        let there = rotate_point(original, pivot, 37.0);
        let back = rotate_point(there, pivot, -37.0);
        assert!(back.abs_diff_eq(original, 1e-9));
        assert_relative_eq!(there.distance(pivot), original.distance(pivot), epsilon = 1e-9);
    }

    // Tests a quarter turn maps +x onto +y
    // Verified by negating the sine term
    #[test]
    fn test_quarter_turn() {
        let turned = rotate_point(p(1.0, 0.0), p(0.0, 0.0), 90.0);
        assert!(turned.abs_diff_eq(p(0.0, 1.0), 1e-12));
    }

    // Tests angle normalization wraps into (-180, 180]
    // Verified by using the remainder operator instead of rem_euclid
    #[test]
    fn test_normalize_angle() {
        assert_relative_eq!(normalize_angle_deg(190.0), -170.0);
        assert_relative_eq!(normalize_angle_deg(-190.0), 170.0);
        assert_relative_eq!(normalize_angle_deg(180.0), 180.0);
        assert_relative_eq!(normalize_angle_deg(720.0), 0.0);
    }
}
