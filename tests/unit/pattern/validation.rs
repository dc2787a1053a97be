//! Tests for link measurement and acceptance rules

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use strandweave::geometry::Point2D;
    use strandweave::pattern::config::Axis;
    use strandweave::pattern::validation::{
        AxisReport, OuterStrands, SetLinks, ValidationConfig, Violation, ViolationKind, check_axis,
        check_span, extension_span, measure_axis, validate,
    };

    fn chord(x: f64) -> (Point2D, Point2D) {
        (Point2D::new(x, 0.0), Point2D::new(x, 100.0))
    }

    fn across(y: f64) -> (Point2D, Point2D) {
        (Point2D::new(0.0, y), Point2D::new(100.0, y))
    }

    /// Sets whose `_3` strands sit at `xs` and `_2` strands `gap` to the right
    fn sets(xs: &[f64], gap: f64) -> Vec<SetLinks> {
        xs.iter()
            .zip(1..)
            .map(|(x, set_number)| SetLinks {
                set_number,
                outer_a: chord(x + gap),
                outer_b: chord(*x),
            })
            .collect()
    }

    fn kinds(violations: &[Violation]) -> Vec<ViolationKind> {
        violations.iter().map(|v| v.kind).collect()
    }

    // Tests an evenly spaced chain measures equal aligned links
    // Verified by linking to the start of the next strand instead of its nearest point
    #[test]
    fn test_isometric_chain() {
        let report = measure_axis(Axis::Vertical, &sets(&[0.0, 156.0, 312.0], 78.0));
        assert_eq!(report.links.len(), 5);
        for link in &report.links {
            assert!(link.abs_diff_eq(Point2D::new(78.0, 0.0), 1e-9));
        }
        assert_relative_eq!(report.spread(), 0.0);
        assert_relative_eq!(report.min_alignment, 1.0);
        assert!(check_axis(&report, &ValidationConfig::default()).is_empty());
    }

    // Tests each set's chords are chained in the order they sit across the axis
    // Verified by always linking `_3` to `_2` within a set
    #[test]
    fn test_chords_ordered_across_axis() {
        let staggered: Vec<SetLinks> = [392.0, 504.0]
            .iter()
            .zip(1..)
            .map(|(x, set_number)| SetLinks {
                set_number,
                outer_a: chord(x - 28.0),
                outer_b: chord(x + 28.0),
            })
            .collect();
        let report = measure_axis(Axis::Vertical, &staggered);
        assert_eq!(report.links.len(), 3);
        for link in &report.links {
            assert!(link.abs_diff_eq(Point2D::new(56.0, 0.0), 1e-9));
        }
        assert!(check_axis(&report, &ValidationConfig::default()).is_empty());

        let mut reversed = staggered;
        for set in &mut reversed {
            set.outer_a.0.x = 1000.0 - set.outer_a.0.x;
            set.outer_a.1.x = 1000.0 - set.outer_a.1.x;
            set.outer_b.0.x = 1000.0 - set.outer_b.0.x;
            set.outer_b.1.x = 1000.0 - set.outer_b.1.x;
        }
        let mirrored = measure_axis(Axis::Vertical, &reversed);
        for link in &mirrored.links {
            assert!(link.abs_diff_eq(Point2D::new(-56.0, 0.0), 1e-9));
        }
    }

    // Tests sets are chained in set-number order
    // Verified by chaining in input order
    #[test]
    fn test_sorted_by_set_number() {
        let mut shuffled = sets(&[0.0, 156.0, 312.0], 78.0);
        shuffled.reverse();
        let report = measure_axis(Axis::Horizontal, &shuffled);
        assert!(report.links.iter().all(|link| link.x > 0.0));
    }

    // Tests uneven spacing is flagged as spread
    // Verified by comparing only the first two links
    #[test]
    fn test_uneven_spread() {
        let report = measure_axis(Axis::Vertical, &sets(&[0.0, 186.0], 78.0));
        assert_relative_eq!(report.min_length, 78.0, epsilon = 1e-9);
        assert_relative_eq!(report.max_length, 108.0, epsilon = 1e-9);
        let violations = check_axis(&report, &ValidationConfig::default());
        assert_eq!(kinds(&violations), vec![ViolationKind::Spread]);
    }

    // Tests links shorter than two widths are too tight
    // Verified by comparing against one width
    #[test]
    fn test_too_tight() {
        let report = measure_axis(Axis::Vertical, &sets(&[0.0, 80.0], 40.0));
        let config = ValidationConfig::default();
        let violations = check_axis(&report, &config);
        assert_eq!(kinds(&violations), vec![ViolationKind::TooTight]);
        assert_relative_eq!(violations[0].limit, 52.0);
        assert_relative_eq!(violations[0].severity(&config), 12.0 / 26.0, epsilon = 1e-9);
    }

    // Tests links longer than four widths are too loose
    // Verified by dropping the upper bound
    #[test]
    fn test_too_loose() {
        let report = measure_axis(Axis::Vertical, &sets(&[0.0, 240.0], 120.0));
        let violations = check_axis(&report, &ValidationConfig::default());
        assert_eq!(kinds(&violations), vec![ViolationKind::TooLoose]);
    }

    // Tests turning links are misaligned at or below the threshold
    // Verified by using a strict comparison
    #[test]
    fn test_misaligned() {
        let config = ValidationConfig::default();
        let report = AxisReport {
            axis: Axis::Horizontal,
            links: vec![Point2D::new(78.0, 0.0), Point2D::new(0.0, 78.0)],
            min_length: 78.0,
            max_length: 78.0,
            min_alignment: config.min_alignment,
            span: None,
        };
        let violations = check_axis(&report, &config);
        assert_eq!(kinds(&violations), vec![ViolationKind::Misaligned]);
        assert_eq!(violations[0].axis, Axis::Horizontal);
    }

    // Tests single-link axes are not judged
    // Verified by judging every axis
    #[test]
    fn test_single_set_unmeasurable() {
        let report = measure_axis(Axis::Vertical, &sets(&[0.0], 10.0));
        assert_eq!(report.links.len(), 1);
        assert!(!report.is_measurable());
        assert!(check_axis(&report, &ValidationConfig::default()).is_empty());

        let empty = measure_axis(Axis::Horizontal, &[]);
        assert!(empty.links.is_empty());
        assert_relative_eq!(empty.min_length, 0.0);
    }

    // Tests validation accepts isometric axes and sums severities otherwise
    // Verified by reporting only the first violation
    #[test]
    fn test_validate() {
        let config = ValidationConfig::default();
        let good = sets(&[0.0, 156.0], 78.0);
        let reports = validate(&good, &good, OuterStrands::Tails, &config).expect("accepted");
        assert_eq!(reports[1].axis, Axis::Horizontal);
        assert_eq!(reports[0].span, None);

        let tight = sets(&[0.0, 80.0], 40.0);
        let rejection = validate(&tight, &tight, OuterStrands::Tails, &config).expect_err("rejected");
        assert_eq!(rejection.violations.len(), 2);
        assert_relative_eq!(rejection.severity, 2.0 * 12.0 / 26.0, epsilon = 1e-9);
        assert!(rejection.to_string().contains("severity"));
    }

    // Tests clearance bounds scale with the width
    // Verified by hard-coding the default width
    #[test]
    fn test_clearance_bounds() {
        let config = ValidationConfig {
            clearance_width: 10.0,
            ..ValidationConfig::default()
        };
        assert_relative_eq!(config.min_clearance(), 20.0);
        assert_relative_eq!(config.max_clearance(), 40.0);
    }

    // Tests the span runs from the first set's `_4` to the line of the last set's `_5`
    // Verified by measuring to the first set's `_5`
    #[test]
    fn test_extension_span() {
        assert_relative_eq!(
            extension_span(&sets(&[0.0, 156.0], 78.0)).expect("span"),
            78.0,
            epsilon = 1e-9
        );
        let single = SetLinks {
            set_number: 1,
            outer_a: chord(0.0),
            outer_b: (Point2D::new(56.0, 500.0), Point2D::new(56.0, 600.0)),
        };
        assert_relative_eq!(extension_span(&[single]).expect("span"), 56.0, epsilon = 1e-9);
        assert_eq!(extension_span(&[]), None);
    }

    // Tests the span must lie between one and about eight widths per crossing set
    // Verified by scaling the bounds with the sets on the measured axis
    #[test]
    fn test_span_bounds() {
        let config = ValidationConfig::default();
        assert_eq!(config.span_bounds(1), (26.0, 216.0));
        assert_eq!(config.span_bounds(2), (52.0, 432.0));

        assert_eq!(check_span(Axis::Vertical, 56.0, 1, &config), None);
        let short = check_span(Axis::Vertical, 10.0, 1, &config).expect("too short");
        assert_eq!(short.kind, ViolationKind::ExtensionSpan);
        assert_relative_eq!(short.limit, 26.0);
        let long = check_span(Axis::Horizontal, 300.0, 1, &config).expect("too long");
        assert_relative_eq!(long.limit, 216.0);
        assert_relative_eq!(long.severity(&config), 84.0 / 26.0, epsilon = 1e-9);
    }

    // Tests only extended patterns are held to the span rule
    // Verified by checking spans for tail-closed patterns too
    #[test]
    fn test_validate_extension_span() {
        let config = ValidationConfig::default();
        let vertical = [SetLinks {
            set_number: 1,
            outer_a: chord(0.0),
            outer_b: chord(10.0),
        }];
        let horizontal = [SetLinks {
            set_number: 2,
            outer_a: across(0.0),
            outer_b: across(56.0),
        }];

        assert!(validate(&vertical, &horizontal, OuterStrands::Tails, &config).is_ok());

        let rejection = validate(&vertical, &horizontal, OuterStrands::Extensions, &config)
            .expect_err("rejected");
        assert_eq!(rejection.violations.len(), 1);
        let violation = rejection.violations[0];
        assert_eq!((violation.axis, violation.kind), (Axis::Vertical, ViolationKind::ExtensionSpan));
        assert_relative_eq!(violation.measured, 10.0, epsilon = 1e-9);

        let wide = [SetLinks {
            outer_b: chord(56.0),
            ..vertical[0]
        }];
        let reports = validate(&wide, &horizontal, OuterStrands::Extensions, &config).expect("accepted");
        assert_relative_eq!(reports[0].span.expect("span"), 56.0, epsilon = 1e-9);
        assert_relative_eq!(reports[1].span.expect("span"), 56.0, epsilon = 1e-9);
    }

    // Tests the outer roles follow the closing strands
    // Verified by closing extended sets with the tails
    #[test]
    fn test_outer_roles() {
        assert_eq!(OuterStrands::Tails.roles(), (2, 3));
        assert_eq!(OuterStrands::Extensions.roles(), (4, 5));
    }
}
