//! Tests for stroke decomposition memoization

#[cfg(test)]
mod tests {
    use strandweave::geometry::Point2D;
    use strandweave::strand::curve::{Endpoint, Strand};
    use strandweave::strand::memo::{ShapeKey, ShapeMemo};

    fn strand() -> Strand {
        Strand::new("1_1", 1, Point2D::new(0.0, 0.0), Point2D::new(100.0, 0.0))
    }

    // Tests a new memo starts with no hits and no misses
    // Verified by initializing the miss counter to one
    #[test]
    fn test_memo_new() {
        let memo = ShapeMemo::new();
        assert_eq!(memo.stats.hits, 0);
        assert_eq!(memo.stats.misses, 0);
    }

    // Tests repeated lookups with unchanged geometry hit the memo
    // Verified by recomputing on every lookup
    #[test]
    fn test_memo_hit() {
        let mut memo = ShapeMemo::new();
        let strand = strand();
        let first = memo.stroke_pieces(&strand, 8.0).to_vec();
        let second = memo.stroke_pieces(&strand, 8.0).to_vec();
        assert_eq!(first, second);
        assert_eq!(memo.stats.misses, 1);
        assert_eq!(memo.stats.hits, 1);
    }

    // Tests moving an endpoint invalidates the memo
    // Verified by leaving endpoints out of the key
    #[test]
    fn test_memo_miss_after_edit() {
        let mut memo = ShapeMemo::new();
        let mut strand = strand();
        memo.stroke_pieces(&strand, 8.0);
        strand.set_endpoint(Endpoint::End, Point2D::new(0.0, 100.0));
        let pieces = memo.stroke_pieces(&strand, 8.0).to_vec();
        assert_eq!(memo.stats.misses, 2);
        assert_eq!(pieces, strand.stroke_pieces(8.0));
    }

    // Tests a different widening is a different key
    // Verified by leaving the extra width out of the key
    #[test]
    fn test_key_includes_extra() {
        let strand = strand();
        assert_eq!(ShapeKey::of(&strand, 8.0), ShapeKey::of(&strand, 8.0));
        assert_ne!(ShapeKey::of(&strand, 8.0), ShapeKey::of(&strand, 0.0));
    }

    // Tests clearing forces the next lookup to recompute
    // Verified by making clear a no-op
    #[test]
    fn test_clear() {
        let mut memo = ShapeMemo::new();
        let strand = strand();
        memo.stroke_pieces(&strand, 0.0);
        memo.clear();
        memo.stroke_pieces(&strand, 0.0);
        assert_eq!(memo.stats.misses, 2);
        assert_eq!(memo.stats.hits, 0);
    }
}
