//! Geometric constants and runtime configuration defaults

// Strand appearance
/// Ribbon width of newly created strands
pub const DEFAULT_STRAND_WIDTH: f64 = 46.0;
/// Border thickness on each side of a ribbon
pub const DEFAULT_STROKE_WIDTH: f64 = 4.0;

// Attachment editing
/// Length of a strand attached without explicit geometry
pub const DEFAULT_ATTACHED_LENGTH: f64 = 140.0;
/// Shortest length the interactive rescale tool allows
pub const MIN_ATTACHED_LENGTH: f64 = 40.0;
/// Factor of the original length the interactive rescale tool allows
pub const MAX_RESCALE_FACTOR: f64 = 2.0;

// Curve shaping for center-bent strands
/// Handle fraction before distance scaling
pub const CURVE_BASE_FRACTION: f64 = 0.4;
/// Scale applied to the center handle's relative offset
pub const CURVE_DISTANCE_MULTIPLIER: f64 = 1.2;
/// Exponent applied to the scaled offset
pub const CURVE_EXPONENT: f64 = 1.5;
/// Bounds of the handle fraction
pub const CURVE_FRACTION_RANGE: (f64, f64) = (0.25, 0.95);
/// Samples per cubic segment when flattening a centerline
pub const CURVE_SAMPLES: usize = 24;

// Mask rendering
/// Grid resolution used to find the visual center of a mask
pub const MASK_CENTER_GRID: usize = 50;
/// Arc steps used for cap outlines
pub const CAP_SEGMENTS: usize = 16;
/// Width reduction of deletion rectangles cut from generated masks
pub const DELETION_RECTANGLE_INSET: f64 = 2.0;

// Systematic layout
/// Grid pitch between neighboring sets
pub const DEFAULT_BASE_SPACING: f64 = 112.0;
/// Signed gap shaping the main strand slant; negative is right-handed
pub const DEFAULT_GAP: f64 = -28.0;
/// Canvas coordinate of the first grid line on both axes
pub const DEFAULT_ORIGIN: f64 = 336.0;
/// Extra length of extension strands beyond their tail
pub const DEFAULT_EXTENSION_LENGTH: f64 = 55.0;

// Stretch layout
/// Canvas center of the stretch layout
pub const STRETCH_CENTER: (f64, f64) = (1232.0, 392.0);
/// How far stretch tails run past the crossing strand
pub const STRETCH_TAIL_OFFSET: f64 = 56.0;

// Validation
/// Strand width the clearance band of a validated pattern is measured in
pub const DEFAULT_CLEARANCE_WIDTH: f64 = 26.0;
/// Largest allowed spread between link lengths on one axis
pub const DEFAULT_SPREAD_TOLERANCE: f64 = 8.0;
/// Dot product consecutive link directions must exceed
pub const DEFAULT_MIN_ALIGNMENT: f64 = 0.9;

// Parameter search
/// First extension bearing tried by the search, in degrees
pub const SEARCH_ANGLE_MIN: i32 = 12;
/// Bearing the search stops before, in degrees
pub const SEARCH_ANGLE_MAX: i32 = 77;
/// Step between searched offsets
pub const SEARCH_OFFSET_STEP: f64 = 4.0;

// Randomness
/// Fixed seed for reproducible colors
pub const DEFAULT_SEED: u64 = 42;

// Output settings
/// Suffix of files written by the generator
pub const OUTPUT_EXTENSION: &str = "json";
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;
