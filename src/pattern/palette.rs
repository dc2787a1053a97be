//! Deterministic set colors

use crate::strand::style::Rgba;
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::collections::BTreeMap;

/// Colors of the first two sets, kept stable across patterns
const FIXED_COLORS: [(u32, Rgba); 2] = [(1, Rgba::WHITE), (2, Rgba::opaque(85, 170, 0))];

/// Saturation range of generated colors
const SATURATION_RANGE: (f64, f64) = (0.2, 0.9);
/// Lightness range of generated colors
const LIGHTNESS_RANGE: (f64, f64) = (0.1, 0.9);

/// Color per set number, reproducible from a seed
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    colors: BTreeMap<u32, Rgba>,
}

impl Palette {
    /// Assign colors to `set_numbers`
    ///
    /// Sets 1 and 2 get fixed colors; the rest draw a random hue with
    /// moderate saturation and lightness. Sets are visited in ascending
    /// order, so the result only depends on the seed and the set numbers.
    pub fn generate(seed: u64, set_numbers: impl IntoIterator<Item = u32>) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut ordered: Vec<u32> = set_numbers.into_iter().collect();
        ordered.sort_unstable();
        ordered.dedup();

        let colors = ordered
            .into_iter()
            .map(|set| {
                let fixed = FIXED_COLORS
                    .iter()
                    .find(|(number, _)| *number == set)
                    .map(|(_, color)| *color);
                let color = fixed.unwrap_or_else(|| {
                    let hue = rng.random::<f64>();
                    let saturation = rng.random_range(SATURATION_RANGE.0..SATURATION_RANGE.1);
                    let lightness = rng.random_range(LIGHTNESS_RANGE.0..LIGHTNESS_RANGE.1);
                    Rgba::from_hls(hue, lightness, saturation)
                });
                (set, color)
            })
            .collect();

        Self { colors }
    }

    /// Color of a set, white for sets the palette was not built with
    pub fn color(&self, set_number: u32) -> Rgba {
        self.colors.get(&set_number).copied().unwrap_or(Rgba::WHITE)
    }
}
