//! Generator parameters: layout variant, handedness, pairing and angles

use crate::io::configuration::{
    DEFAULT_BASE_SPACING, DEFAULT_EXTENSION_LENGTH, DEFAULT_GAP, DEFAULT_SEED,
    DEFAULT_STRAND_WIDTH, DEFAULT_STROKE_WIDTH,
};
use crate::io::error::{Result, invalid_parameter};
use crate::pattern::validation::ValidationConfig;

/// Role of the tail attached at one end of a main strand
pub const ROLE_TAIL_A: u32 = 2;
/// Role of the tail attached at the other end
pub const ROLE_TAIL_B: u32 = 3;
/// Role of the extension continuing the `_2` tail
pub const ROLE_EXTENSION_A: u32 = 4;
/// Role of the extension continuing the `_3` tail
pub const ROLE_EXTENSION_B: u32 = 5;

/// Grid direction of a set
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Axis {
    /// Sets whose main strands run top to bottom
    Vertical,
    /// Sets whose main strands run left to right
    Horizontal,
}

/// Handedness of the weave
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Chirality {
    /// Main strands slant so the weave turns clockwise
    #[default]
    RightHanded,
    /// Mirror image of the right-handed weave
    LeftHanded,
}

/// Formula family used to place main strands and tails
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LayoutVariant {
    /// Pitch-based grid with per-set tail offsets; vertical sets are numbered first
    #[default]
    Systematic,
    /// Canvas-centered grid with a fixed tail overrun; horizontal sets are numbered first
    Stretch,
}

/// Which vertical tail role is masked under which horizontal tail role
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PairingTable {
    /// `(vertical role, horizontal role)` pairs for tails
    pub tails: Vec<(u32, u32)>,
}

impl PairingTable {
    /// Default pairing of a handedness
    ///
    /// Right-handed weaves mask `_2` under `_3` and `_3` under `_2`.
    /// Left-handed weaves mask each tail under the same role on the other axis.
    pub fn for_chirality(chirality: Chirality) -> Self {
        let tails = match chirality {
            Chirality::RightHanded => vec![(ROLE_TAIL_A, ROLE_TAIL_B), (ROLE_TAIL_B, ROLE_TAIL_A)],
            Chirality::LeftHanded => vec![(ROLE_TAIL_A, ROLE_TAIL_A), (ROLE_TAIL_B, ROLE_TAIL_B)],
        };
        Self { tails }
    }

    /// The same pairing lifted from tails to the extensions continuing them
    pub fn extensions(&self) -> Vec<(u32, u32)> {
        let lift = |role: u32| role + (ROLE_EXTENSION_A - ROLE_TAIL_A);
        self.tails
            .iter()
            .map(|(vertical, horizontal)| (lift(*vertical), lift(*horizontal)))
            .collect()
    }
}

/// Bearings of the four extension strands, in degrees clockwise from +y
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExtensionAngles {
    /// Bearing of vertical `_4`
    pub vertical_a: f64,
    /// Bearing of vertical `_5`
    pub vertical_b: f64,
    /// Bearing of horizontal `_4`
    pub horizontal_a: f64,
    /// Bearing of horizontal `_5`
    pub horizontal_b: f64,
}

impl ExtensionAngles {
    /// Angles derived from one vertical and one horizontal search angle
    ///
    /// Vertical extensions leave at `v` and `v + 180`, horizontal ones at
    /// `h + 270` and `h + 90`.
    pub fn from_search_angles(vertical: f64, horizontal: f64) -> Self {
        Self {
            vertical_a: vertical.rem_euclid(360.0),
            vertical_b: (vertical + 180.0).rem_euclid(360.0),
            horizontal_a: (horizontal + 270.0).rem_euclid(360.0),
            horizontal_b: (horizontal + 90.0).rem_euclid(360.0),
        }
    }

    /// Bearing of the extension with `role` on `axis`
    pub const fn bearing(&self, axis: Axis, role: u32) -> f64 {
        match (axis, role) {
            (Axis::Vertical, ROLE_EXTENSION_A) => self.vertical_a,
            (Axis::Vertical, _) => self.vertical_b,
            (Axis::Horizontal, ROLE_EXTENSION_A) => self.horizontal_a,
            (Axis::Horizontal, _) => self.horizontal_b,
        }
    }
}

/// Everything the generator needs to build one pattern
#[derive(Clone, Debug, PartialEq)]
pub struct GeneratorConfig {
    /// Number of vertical sets
    pub m: usize,
    /// Number of horizontal sets
    pub n: usize,
    /// Placement formulas
    pub variant: LayoutVariant,
    /// Handedness
    pub chirality: Chirality,
    /// Distance between neighboring grid lines
    pub base_spacing: f64,
    /// Signed slant of vertical main strands
    pub vertical_gap: f64,
    /// Signed slant of horizontal main strands
    pub horizontal_gap: f64,
    /// Per-set tail offsets along the vertical axis
    pub vertical_offsets: Vec<f64>,
    /// Per-set tail offsets along the horizontal axis
    pub horizontal_offsets: Vec<f64>,
    /// Extension bearings, `None` to stop after the tails
    pub extensions: Option<ExtensionAngles>,
    /// Extra length of each extension beyond its tail
    pub extension_length: f64,
    /// Ribbon width of every strand
    pub strand_width: f64,
    /// Border thickness of every strand
    pub stroke_width: f64,
    /// Pairing override, `None` for the handedness default
    pub pairing: Option<PairingTable>,
    /// Cut other strands of the same tier out of generated masks
    pub deletion_rectangles: bool,
    /// Seed for set colors
    pub seed: u64,
    /// Acceptance rules
    pub validation: ValidationConfig,
}

impl GeneratorConfig {
    /// Default configuration for an `m`×`n` grid without extensions
    pub fn new(m: usize, n: usize) -> Self {
        Self {
            m,
            n,
            variant: LayoutVariant::default(),
            chirality: Chirality::default(),
            base_spacing: DEFAULT_BASE_SPACING,
            vertical_gap: DEFAULT_GAP,
            horizontal_gap: DEFAULT_GAP,
            vertical_offsets: vec![0.0; m],
            horizontal_offsets: vec![0.0; n],
            extensions: None,
            extension_length: DEFAULT_EXTENSION_LENGTH,
            strand_width: DEFAULT_STRAND_WIDTH,
            stroke_width: DEFAULT_STROKE_WIDTH,
            pairing: None,
            deletion_rectangles: false,
            seed: DEFAULT_SEED,
            validation: ValidationConfig::default(),
        }
    }

    /// Use another layout variant
    #[must_use]
    pub fn with_variant(mut self, variant: LayoutVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Use another handedness
    #[must_use]
    pub fn with_chirality(mut self, chirality: Chirality) -> Self {
        self.chirality = chirality;
        self
    }

    /// Give every set on each axis the same tail offset
    #[must_use]
    pub fn with_uniform_offsets(mut self, vertical: f64, horizontal: f64) -> Self {
        self.vertical_offsets = vec![vertical; self.m];
        self.horizontal_offsets = vec![horizontal; self.n];
        self
    }

    /// Add extension strands at the given bearings
    #[must_use]
    pub fn with_extensions(mut self, angles: ExtensionAngles) -> Self {
        self.extensions = Some(angles);
        self
    }

    /// Use another color seed
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Override the pairing table
    #[must_use]
    pub fn with_pairing(mut self, pairing: PairingTable) -> Self {
        self.pairing = Some(pairing);
        self
    }

    /// Enable or disable deletion rectangles on generated masks
    #[must_use]
    pub fn with_deletion_rectangles(mut self, enabled: bool) -> Self {
        self.deletion_rectangles = enabled;
        self
    }

    /// Pairing in effect
    pub fn pairing(&self) -> PairingTable {
        self.pairing
            .clone()
            .unwrap_or_else(|| PairingTable::for_chirality(self.chirality))
    }

    /// Check the configuration is buildable
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Either grid dimension is zero
    /// - An offset list does not have one entry per set
    /// - A length or width is not positive and finite
    pub fn validate(&self) -> Result<()> {
        if self.m == 0 || self.n == 0 {
            return Err(invalid_parameter(
                "grid size",
                &format!("{}x{}", self.m, self.n),
                &"both dimensions must be at least 1",
            ));
        }
        if self.vertical_offsets.len() != self.m {
            return Err(invalid_parameter(
                "vertical_offsets",
                &self.vertical_offsets.len(),
                &format!("expected one offset per vertical set ({})", self.m),
            ));
        }
        if self.horizontal_offsets.len() != self.n {
            return Err(invalid_parameter(
                "horizontal_offsets",
                &self.horizontal_offsets.len(),
                &format!("expected one offset per horizontal set ({})", self.n),
            ));
        }
        for (parameter, value) in [
            ("base_spacing", self.base_spacing),
            ("strand_width", self.strand_width),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(invalid_parameter(parameter, &value, &"must be positive"));
            }
        }
        if !self.stroke_width.is_finite() || self.stroke_width < 0.0 {
            return Err(invalid_parameter(
                "stroke_width",
                &self.stroke_width,
                &"must not be negative",
            ));
        }
        Ok(())
    }
}
