//! Procedural MxN pattern generation
//!
//! Builds a complete network of main strands, tails, crossing masks and
//! optional extensions from two grid dimensions, then checks that the
//! result repeats cleanly. [`search`] explores many configurations in
//! parallel.

/// Sequential emission into a graph
pub mod builder;
/// Generator parameters
pub mod config;
/// Crossing detection and mask emission
pub mod crossings;
/// Extension strands
pub mod extensions;
/// Full generation pipeline
pub mod generator;
/// Main strand and tail placement
pub mod layout;
/// Set colors
pub mod palette;
/// Parallel parameter search
pub mod search;
/// Acceptance rules
pub mod validation;

pub use config::{Axis, Chirality, ExtensionAngles, GeneratorConfig, LayoutVariant, PairingTable};
pub use generator::{EmissionCounts, GenerationOutcome, Pattern, generate};
pub use search::{Candidate, SearchSpace, SearchSummary, search};
pub use validation::{Rejection, ValidationConfig, Violation, ViolationKind};
