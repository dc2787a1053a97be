//! Tests for cascading deletion

#[cfg(test)]
mod tests {
    use strandweave::geometry::Point2D;
    use strandweave::graph::arena::{StrandGraph, StrandId};
    use strandweave::strand::curve::{Endpoint, Strand};

    struct Scene {
        graph: StrandGraph,
        root: StrandId,
        child: StrandId,
        grandchild: StrandId,
        across: StrandId,
        mask: StrandId,
    }

    fn scene() -> Scene {
        let mut graph = StrandGraph::new();
        let root = graph
            .add_strand(Strand::new("1_1", 1, Point2D::new(0.0, 0.0), Point2D::new(0.0, 100.0)))
            .expect("add root");
        let child = graph.attach(root, Endpoint::End).expect("attach");
        let grandchild = graph.attach(child, Endpoint::End).expect("attach");
        let across = graph
            .add_strand(Strand::new("2_1", 2, Point2D::new(-50.0, 170.0), Point2D::new(50.0, 170.0)))
            .expect("add across");
        let mask = graph.create_mask(child, across).expect("mask");
        Scene {
            graph,
            root,
            child,
            grandchild,
            across,
            mask,
        }
    }

    // Tests deleting a root removes its descendants and dependent masks
    // Verified by deleting only the named strand
    #[test]
    fn test_delete_root_cascades() {
        let mut scene = scene();
        let removed = scene.graph.delete(scene.root).expect("delete");

        assert_eq!(removed, vec!["1_2_2_1", "1_1", "1_2", "1_3"]);
        assert_eq!(scene.graph.len(), 1);
        for gone in [scene.root, scene.child, scene.grandchild, scene.mask] {
            assert!(!scene.graph.contains(gone));
        }
        assert!(scene.graph.contains(scene.across));
    }

    // Tests deleting a child detaches it and frees the parent endpoint
    // Verified by leaving the handle in the parent's children
    #[test]
    fn test_delete_child_detaches() {
        let mut scene = scene();
        scene.graph.delete(scene.child).expect("delete");

        assert!(scene.graph.children(scene.root).expect("root").is_empty());
        assert!(!scene.graph.contains(scene.mask));
        assert!(scene.graph.check_attachable(scene.root, Endpoint::End).is_ok());
    }

    // Tests deleting a mask leaves both sources alone
    // Verified by routing masks through the strand cascade
    #[test]
    fn test_delete_mask_only() {
        let mut scene = scene();
        let removed = scene.graph.delete(scene.mask).expect("delete");
        assert_eq!(removed, vec!["1_2_2_1"]);
        assert_eq!(scene.graph.len(), 4);
        assert!(scene.graph.contains(scene.child));
        assert!(scene.graph.contains(scene.across));
    }

    // Tests a deleted mask's pair can be masked again
    // Verified by keeping the layer name registered after removal
    #[test]
    fn test_remask_after_delete() {
        let mut scene = scene();
        scene.graph.delete(scene.mask).expect("delete");
        assert!(scene.graph.create_mask(scene.child, scene.across).is_ok());
    }

    // Tests deleting twice reports the stale handle
    // Verified by returning an empty list for unknown handles
    #[test]
    fn test_delete_stale() {
        let mut scene = scene();
        scene.graph.delete(scene.across).expect("delete");
        assert!(scene.graph.delete(scene.across).is_err());
    }
}
