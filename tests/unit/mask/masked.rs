//! Tests for mask creation, rejection and memoized regions

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use strandweave::geometry::Point2D;
    use strandweave::graph::arena::{StrandGraph, StrandId};
    use strandweave::mask::masked::{MaskMemo, MaskRejected};
    use strandweave::strand::curve::Strand;

    fn crossing() -> (StrandGraph, StrandId, StrandId) {
        let mut graph = StrandGraph::new();
        let across = graph
            .add_strand(Strand::new("1_2", 1, Point2D::new(0.0, 50.0), Point2D::new(100.0, 50.0)))
            .expect("add");
        let down = graph
            .add_strand(Strand::new("2_3", 2, Point2D::new(50.0, 0.0), Point2D::new(50.0, 100.0)))
            .expect("add");
        (graph, across, down)
    }

    // Tests a mask is named after both sources and centered on the overlap
    // Verified by naming the mask after the second source first
    #[test]
    fn test_create_mask() {
        let (mut graph, across, down) = crossing();
        let id = graph.create_mask(across, down).expect("mask");
        let mask = graph.mask(id).expect("mask");

        assert_eq!(mask.layer_name, "1_2_2_3");
        assert_eq!(mask.set_number, 12);
        assert_eq!((mask.first, mask.second), (across, down));
        let center = mask.center_point.expect("center");
        assert_relative_eq!(center.x, 50.0, epsilon = 1e-6);
        assert_relative_eq!(center.y, 50.0, epsilon = 1e-6);
        assert_eq!(graph.render_index(id), Some(2));
    }

    // Tests a pair can be masked only once, in either order
    // Verified by checking only the requested order for duplicates
    #[test]
    fn test_duplicate_mask_rejected() {
        let (mut graph, across, down) = crossing();
        graph.create_mask(across, down).expect("mask");

        let again = graph.create_mask(across, down);
        assert_eq!(
            again,
            Err(MaskRejected::AlreadyExists {
                layer_name: "1_2_2_3".to_string()
            })
        );
        let reversed = graph.create_mask(down, across);
        assert!(matches!(reversed, Err(MaskRejected::AlreadyExists { .. })));
        assert_eq!(graph.masks().count(), 1);
    }

    // Tests invalid sources are refused
    // Verified by accepting a mask as a source
    #[test]
    fn test_invalid_sources() {
        let (mut graph, across, down) = crossing();
        assert_eq!(graph.create_mask(across, across), Err(MaskRejected::SameStrand));

        let mask = graph.create_mask(across, down).expect("mask");
        assert!(matches!(
            graph.create_mask(mask, down),
            Err(MaskRejected::NotAStrand { .. })
        ));

        graph.delete(down).expect("delete");
        assert_eq!(graph.create_mask(across, down), Err(MaskRejected::UnknownStrand));
    }

    // Tests lookup by ordered pair
    // Verified by ignoring source order in the lookup
    #[test]
    fn test_mask_between() {
        let (mut graph, across, down) = crossing();
        let id = graph.create_mask(across, down).expect("mask");
        assert_eq!(graph.mask_between(across, down), Some(id));
        assert_eq!(graph.mask_between(down, across), None);
    }

    // Tests deletion rectangles are cut from the visible region
    // Verified by ignoring stored rectangles when computing the region
    #[test]
    fn test_deletion_rectangles() {
        let (mut graph, across, down) = crossing();
        let hole = [
            Point2D::new(0.0, 0.0),
            Point2D::new(50.0, 0.0),
            Point2D::new(50.0, 100.0),
            Point2D::new(0.0, 100.0),
        ];
        let id = graph
            .create_mask_with(across, down, vec![hole])
            .expect("mask");

        let region = graph.mask_region(id).expect("region");
        assert_relative_eq!(region.area(), 27.0 * 54.0, epsilon = 1e-6);
        let center = graph.mask(id).expect("mask").center_point.expect("center");
        assert!(center.x > 50.0);
    }

    // Tests a shared memo skips recomputing unchanged strands
    // Verified by clearing the memo on every lookup
    #[test]
    fn test_memo_reuse() {
        let (mut graph, across, down) = crossing();
        let id = graph.create_mask(across, down).expect("mask");
        let mut memo = MaskMemo::new();

        let first = graph.mask_region_memoized(id, &mut memo).expect("region");
        let second = graph.mask_region_memoized(id, &mut memo).expect("region");
        assert_eq!(first, second);
        assert_eq!(memo.hit_counts(), (2, 2));
        assert_eq!(graph.mask_region(id).expect("region"), first);
    }

    // Tests regions cannot be requested for strands
    // Verified by returning an empty region for non-masks
    #[test]
    fn test_region_of_strand_fails() {
        let (graph, across, _) = crossing();
        assert!(graph.mask_region(across).is_err());
    }
}
