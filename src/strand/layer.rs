//! Layer names: the `"{set}_{role}"` identifiers that key every strand

use std::fmt;

/// Role of a main strand, the root of each set
pub const ROLE_MAIN: u32 = 1;

/// Parsed strand layer name such as `"3_2"`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerName {
    /// Set the strand belongs to
    pub set_number: u32,
    /// Position of the strand within its set (`1` main, `2`/`3` tails, ...)
    pub role: u32,
}

impl LayerName {
    /// Create a layer name from its parts
    pub const fn new(set_number: u32, role: u32) -> Self {
        Self { set_number, role }
    }

    /// Parse `"{set}_{role}"`; anything else, including mask names, gives `None`
    pub fn parse(name: &str) -> Option<Self> {
        let (set, role) = name.split_once('_')?;
        Some(Self {
            set_number: set.parse().ok()?,
            role: role.parse().ok()?,
        })
    }

    /// Whether this names the main strand of its set
    pub const fn is_main(&self) -> bool {
        self.role == ROLE_MAIN
    }
}

impl fmt::Display for LayerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.set_number, self.role)
    }
}

/// Layer name of the mask of `first` under `second`
pub fn mask_layer_name(first: &str, second: &str) -> String {
    format!("{first}_{second}")
}

/// Set number shown for a mask: the decimal concatenation of both sets
///
/// Falls back to the first set if the concatenation does not fit.
pub fn mask_set_number(first: u32, second: u32) -> u32 {
    format!("{first}{second}").parse().unwrap_or(first)
}
