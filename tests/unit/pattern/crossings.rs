//! Tests for crossing mask selection

#[cfg(test)]
mod tests {
    use strandweave::geometry::Point2D;
    use strandweave::graph::arena::{StrandGraph, StrandId};
    use strandweave::pattern::builder::{Emission, GridSet};
    use strandweave::pattern::crossings::crossing_masks;
    use strandweave::strand::curve::Strand;

    fn add(graph: &mut StrandGraph, name: &str, start: (f64, f64), end: (f64, f64)) -> StrandId {
        let set = name
            .split('_')
            .next()
            .and_then(|set| set.parse().ok())
            .unwrap_or(0);
        graph
            .add_strand(Strand::new(
                name,
                set,
                Point2D::new(start.0, start.1),
                Point2D::new(end.0, end.1),
            ))
            .expect("add")
    }

    fn grid(set_number: u32, roles: &[(u32, StrandId)]) -> GridSet {
        let mut grid = GridSet::new(set_number);
        grid.roles.extend(roles.iter().copied());
        grid
    }

    fn mask_pairs(emissions: &[Emission]) -> Vec<(StrandId, StrandId, usize)> {
        emissions
            .iter()
            .filter_map(|emission| match emission {
                Emission::Mask {
                    first,
                    second,
                    deletion_rectangles,
                } => Some((*first, *second, deletion_rectangles.len())),
                _ => None,
            })
            .collect()
    }

    // Tests only paired roles whose chords cross get a mask, vertical under horizontal
    // Verified by masking every pair regardless of intersection
    #[test]
    fn test_paired_crossings() {
        let mut graph = StrandGraph::new();
        let v2 = add(&mut graph, "1_2", (100.0, 0.0), (100.0, 200.0));
        let v3 = add(&mut graph, "1_3", (300.0, 0.0), (300.0, 200.0));
        let h2 = add(&mut graph, "2_2", (0.0, 50.0), (200.0, 50.0));
        let h3 = add(&mut graph, "2_3", (0.0, 150.0), (400.0, 150.0));

        let vertical = [grid(1, &[(2, v2), (3, v3)])];
        let horizontal = [grid(2, &[(2, h2), (3, h3)])];
        let masks = crossing_masks(&graph, &vertical, &horizontal, &[(2, 3), (3, 2)], false)
            .expect("masks");

        // h2 stops short of v3
        assert_eq!(mask_pairs(&masks), vec![(v2, h3, 0)]);
    }

    // Tests missing roles are skipped
    // Verified by failing on a set without the paired role
    #[test]
    fn test_missing_role_skipped() {
        let mut graph = StrandGraph::new();
        let v2 = add(&mut graph, "1_2", (100.0, 0.0), (100.0, 200.0));
        let vertical = [grid(1, &[(2, v2)])];
        let horizontal = [grid(2, &[])];
        let masks = crossing_masks(&graph, &vertical, &horizontal, &[(2, 3)], false).expect("masks");
        assert!(masks.is_empty());
    }

    // Tests deletion rectangles cover tier strands running through the crossing
    // Verified by cutting out the mask's own sources
    #[test]
    fn test_deletion_rectangles() {
        let mut graph = StrandGraph::new();
        let v2 = add(&mut graph, "1_2", (100.0, 0.0), (100.0, 200.0));
        let h3 = add(&mut graph, "2_3", (0.0, 100.0), (200.0, 100.0));
        // Another vertical tail running right next to the crossing
        let neighbor = add(&mut graph, "3_2", (110.0, 0.0), (110.0, 200.0));
        let far = add(&mut graph, "4_2", (900.0, 0.0), (900.0, 200.0));

        let vertical = [grid(1, &[(2, v2)]), grid(3, &[(2, neighbor)]), grid(4, &[(2, far)])];
        let horizontal = [grid(2, &[(3, h3)])];
        let masks = crossing_masks(&graph, &vertical, &horizontal, &[(2, 3)], true).expect("masks");
        let pairs = mask_pairs(&masks);

        let own = pairs
            .iter()
            .find(|(first, _, _)| *first == v2)
            .expect("mask of 1_2");
        assert_eq!(own.2, 1);
        let without = crossing_masks(&graph, &vertical, &horizontal, &[(2, 3)], false).expect("masks");
        assert!(mask_pairs(&without).iter().all(|(_, _, cut)| *cut == 0));
    }
}
