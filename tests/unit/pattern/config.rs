//! Tests for generator configuration, pairing tables and extension angles

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use strandweave::StrandError;
    use strandweave::pattern::config::{
        Axis, Chirality, ExtensionAngles, GeneratorConfig, LayoutVariant, PairingTable,
    };

    // Tests right-handed weaves cross the tail roles and left-handed ones match them
    // Verified by using the right-handed table for both hands
    #[test]
    fn test_default_pairing() {
        let right = PairingTable::for_chirality(Chirality::RightHanded);
        assert_eq!(right.tails, vec![(2, 3), (3, 2)]);
        let left = PairingTable::for_chirality(Chirality::LeftHanded);
        assert_eq!(left.tails, vec![(2, 2), (3, 3)]);

        let stretch = GeneratorConfig::new(1, 1)
            .with_variant(LayoutVariant::Stretch)
            .with_chirality(Chirality::LeftHanded);
        assert_eq!(stretch.pairing(), left);
    }

    // Tests extension pairs mirror the tail pairs two roles up
    // Verified by lifting only the vertical role
    #[test]
    fn test_extension_pairing() {
        let pairing = PairingTable {
            tails: vec![(2, 3), (3, 2)],
        };
        assert_eq!(pairing.extensions(), vec![(4, 5), (5, 4)]);
    }

    // Tests a pairing override replaces the handedness default
    // Verified by ignoring the override
    #[test]
    fn test_pairing_override() {
        let custom = PairingTable {
            tails: vec![(2, 2)],
        };
        let config = GeneratorConfig::new(1, 1).with_pairing(custom.clone());
        assert_eq!(config.pairing(), custom);
        assert_eq!(GeneratorConfig::new(1, 1).pairing().tails.len(), 2);
    }

    // Tests the four bearings derived from two search angles
    // Verified by swapping the horizontal quarter turns
    #[test]
    fn test_angles_from_search() {
        let angles = ExtensionAngles::from_search_angles(30.0, 40.0);
        assert_relative_eq!(angles.vertical_a, 30.0);
        assert_relative_eq!(angles.vertical_b, 210.0);
        assert_relative_eq!(angles.horizontal_a, 310.0);
        assert_relative_eq!(angles.horizontal_b, 130.0);

        assert_relative_eq!(angles.bearing(Axis::Vertical, 4), 30.0);
        assert_relative_eq!(angles.bearing(Axis::Vertical, 5), 210.0);
        assert_relative_eq!(angles.bearing(Axis::Horizontal, 4), 310.0);
        assert_relative_eq!(angles.bearing(Axis::Horizontal, 5), 130.0);
    }

    // Tests bearings wrap into [0, 360)
    // Verified by removing the euclidean remainder
    #[test]
    fn test_angles_wrap() {
        let angles = ExtensionAngles::from_search_angles(350.0, 300.0);
        assert_relative_eq!(angles.vertical_b, 170.0);
        assert_relative_eq!(angles.horizontal_a, 210.0);
        assert_relative_eq!(angles.horizontal_b, 30.0);
    }

    // Tests uniform offsets give one entry per set
    // Verified by sizing offsets by the other axis
    #[test]
    fn test_uniform_offsets() {
        let config = GeneratorConfig::new(3, 2).with_uniform_offsets(4.0, 8.0);
        assert_eq!(config.vertical_offsets, vec![4.0; 3]);
        assert_eq!(config.horizontal_offsets, vec![8.0; 2]);
        assert!(config.validate().is_ok());
    }

    // Tests invalid configurations are refused
    // Verified by accepting an empty grid
    #[test]
    fn test_validate_rejects() {
        let empty = GeneratorConfig::new(0, 2);
        assert!(matches!(empty.validate(), Err(StrandError::InvalidParameter { .. })));

        let mut short = GeneratorConfig::new(2, 2);
        short.vertical_offsets.pop();
        assert!(short.validate().is_err());

        let mut thin = GeneratorConfig::new(1, 1);
        thin.strand_width = 0.0;
        assert!(thin.validate().is_err());

        let mut negative = GeneratorConfig::new(1, 1);
        negative.stroke_width = -1.0;
        assert!(negative.validate().is_err());

        let mut borderless = GeneratorConfig::new(1, 1);
        borderless.stroke_width = 0.0;
        assert!(borderless.validate().is_ok());
    }
}
