//! Tests for the uniform view over strands and masks

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use strandweave::geometry::Point2D;
    use strandweave::graph::arena::StrandGraph;
    use strandweave::graph::strand_like::{StrandKind, StrandLike};
    use strandweave::strand::curve::{Endpoint, Strand};

    // Tests each node reports its own kind
    // Verified by reporting attached strands as plain strands
    #[test]
    fn test_view_kinds() {
        let mut graph = StrandGraph::new();
        let root = graph
            .add_strand(Strand::new("1_1", 1, Point2D::new(0.0, 0.0), Point2D::new(0.0, 100.0)))
            .expect("add");
        let child = graph.attach(root, Endpoint::End).expect("attach");
        let across = graph
            .add_strand(
                Strand::new("2_1", 2, Point2D::new(-50.0, 50.0), Point2D::new(50.0, 50.0))
                    .with_width(30.0),
            )
            .expect("add");
        let mask = graph.create_mask(root, across).expect("mask");

        assert_eq!(graph.view(root).expect("root").kind(), StrandKind::Strand);
        assert_eq!(graph.view(child).expect("child").kind(), StrandKind::Attached);

        let view = graph.view(mask).expect("mask");
        assert_eq!(view.kind(), StrandKind::Masked);
        assert_eq!(view.layer_name(), "1_1_2_1");
        assert_eq!(view.set_number(), 12);
        assert_relative_eq!(view.width(), 30.0);
        assert_eq!(view.has_circles(), [false, false]);
    }

    // Tests a plain strand exposes its own fields
    // Verified by returning the default width
    #[test]
    fn test_strand_view() {
        let strand = Strand::new("4_2", 4, Point2D::new(0.0, 0.0), Point2D::new(9.0, 0.0)).with_width(12.0);
        let view: &dyn StrandLike = &strand;
        assert_eq!(view.layer_name(), "4_2");
        assert_eq!(view.set_number(), 4);
        assert_relative_eq!(view.width(), 12.0);
    }

    // Tests views of deleted nodes fail
    // Verified by returning a default view for stale handles
    #[test]
    fn test_view_stale() {
        let mut graph = StrandGraph::new();
        let root = graph
            .add_strand(Strand::new("1_1", 1, Point2D::new(0.0, 0.0), Point2D::new(0.0, 100.0)))
            .expect("add");
        graph.delete(root).expect("delete");
        assert!(graph.view(root).is_err());
    }
}
