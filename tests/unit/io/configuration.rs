//! Tests for default constants and their relationships

#[cfg(test)]
mod tests {
    use strandweave::io::configuration::{
        DEFAULT_ATTACHED_LENGTH, DEFAULT_CLEARANCE_WIDTH, DEFAULT_MIN_ALIGNMENT, DEFAULT_SEED,
        DEFAULT_STRAND_WIDTH, DEFAULT_STROKE_WIDTH, MAX_RESCALE_FACTOR, MIN_ATTACHED_LENGTH,
        OUTPUT_EXTENSION, SEARCH_ANGLE_MAX, SEARCH_ANGLE_MIN, SEARCH_OFFSET_STEP,
    };

    // Tests strand defaults
    // Verified by changing default widths
    #[test]
    fn test_strand_defaults() {
        assert!((DEFAULT_STRAND_WIDTH - 46.0).abs() < f64::EPSILON);
        assert!((DEFAULT_STROKE_WIDTH - 4.0).abs() < f64::EPSILON);
        assert!((DEFAULT_ATTACHED_LENGTH - 140.0).abs() < f64::EPSILON);
    }

    // Tests the interactive length clamp leaves room above the minimum
    // Verified by raising the minimum above the default length
    #[test]
    fn test_length_limits_relationship() {
        assert!(MIN_ATTACHED_LENGTH < DEFAULT_ATTACHED_LENGTH);
        assert!(MAX_RESCALE_FACTOR > 1.0);
    }

    // Tests the search range is non-empty and steps are positive
    // Verified by swapping the angle bounds
    #[test]
    fn test_search_constants() {
        assert_eq!((SEARCH_ANGLE_MIN, SEARCH_ANGLE_MAX), (12, 77));
        assert!(SEARCH_OFFSET_STEP > 0.0);
    }

    // Tests validation defaults
    // Verified by setting the alignment threshold above one
    #[test]
    fn test_validation_defaults() {
        assert!((DEFAULT_CLEARANCE_WIDTH - 26.0).abs() < f64::EPSILON);
        assert!(DEFAULT_MIN_ALIGNMENT > 0.0 && DEFAULT_MIN_ALIGNMENT < 1.0);
    }

    // Tests output naming constants
    // Verified by changing the extension
    #[test]
    fn test_output_constants() {
        assert_eq!(OUTPUT_EXTENSION, "json");
        assert_eq!(DEFAULT_SEED, 42);
    }
}
