//! MxN pattern generation
//!
//! A pattern is emitted in layers, each drawn over the previous one:
//! main strands, their tails, tail crossing masks, extensions and finally
//! extension crossing masks. The finished graph is then checked against
//! the acceptance rules.

use crate::geometry::Point2D;
use crate::graph::arena::{StrandGraph, StrandId};
use crate::io::error::{Result, generation_error};
use crate::pattern::builder::{Emission, GridSet, PatternBuilder};
use crate::pattern::config::{Axis, GeneratorConfig};
use crate::pattern::crossings::crossing_masks;
use crate::pattern::extensions::extension_emissions;
use crate::pattern::layout::{SetPlacement, place_sets};
use crate::pattern::palette::Palette;
use crate::pattern::validation::{AxisReport, OuterStrands, Rejection, SetLinks, validate};
use crate::strand::curve::Strand;
use crate::strand::layer::{LayerName, ROLE_MAIN};
use crate::strand::style::{Rgba, StrandStyle};

/// How many items each emission stage produced
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EmissionCounts {
    /// Main strands
    pub mains: usize,
    /// Tails attached to main strands
    pub tails: usize,
    /// Masks where tails cross
    pub masks: usize,
    /// Extensions attached to tails
    pub extensions: usize,
    /// Masks where extensions cross
    pub extension_masks: usize,
}

impl EmissionCounts {
    /// Items emitted over all stages
    pub const fn total(&self) -> usize {
        self.mains + self.tails + self.masks + self.extensions + self.extension_masks
    }
}

/// An accepted pattern
#[derive(Clone, Debug)]
pub struct Pattern {
    /// The strands, attachments and masks in render order
    pub graph: StrandGraph,
    /// Items per stage
    pub counts: EmissionCounts,
    /// Link measurements of the vertical and horizontal axes
    pub reports: [AxisReport; 2],
}

/// Result of one generation run
#[derive(Clone, Debug)]
pub enum GenerationOutcome {
    /// The pattern passed every rule
    Accepted(Pattern),
    /// The pattern was built but broke at least one rule
    Rejected(Rejection),
}

impl GenerationOutcome {
    /// The pattern, if accepted
    pub fn accepted(self) -> Option<Pattern> {
        match self {
            Self::Accepted(pattern) => Some(pattern),
            Self::Rejected(_) => None,
        }
    }

    /// Whether the pattern passed
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }
}

/// Build and judge the pattern described by `config`
///
/// Identical configurations produce identical graphs, down to colors and
/// render order.
///
/// # Errors
///
/// Returns an error if:
/// - The configuration is invalid
/// - An emission is refused by the graph
pub fn generate(config: &GeneratorConfig) -> Result<GenerationOutcome> {
    config.validate()?;
    let placements = place_sets(config);
    let palette = Palette::generate(config.seed, placements.iter().map(|set| set.set_number));
    let pairing = config.pairing();

    let mut builder = PatternBuilder::new();
    let mut counts = EmissionCounts::default();

    let mut sets = Vec::with_capacity(placements.len());
    for placement in &placements {
        let style = StrandStyle {
            color: palette.color(placement.set_number),
            stroke_color: Rgba::BLACK,
            stroke_width: config.stroke_width,
        };
        let mut strand = set_strand(
            placement.set_number,
            ROLE_MAIN,
            (placement.start, placement.end),
            config,
            style,
        );
        strand.has_circles = [true, true];
        let main = builder.emit(Emission::Root(strand))?;
        counts.mains += 1;

        let mut grid = GridSet::new(placement.set_number);
        grid.roles.insert(ROLE_MAIN, main.id);
        sets.push((placement, grid, style));
    }

    for (placement, grid, style) in &mut sets {
        let parent = main_of(grid)?;
        for tail in &placement.tails {
            let strand = set_strand(
                placement.set_number,
                tail.role,
                (placement.endpoint(tail.side), tail.end),
                config,
                *style,
            );
            let emitted = builder.emit(Emission::Attached {
                parent,
                side: tail.side,
                strand,
            })?;
            grid.roles.insert(tail.role, emitted.id);
            counts.tails += 1;
        }
    }

    let (vertical, horizontal) = split_axes(sets);

    for mask in crossing_masks(
        builder.graph(),
        &vertical,
        &horizontal,
        &pairing.tails,
        config.deletion_rectangles,
    )? {
        builder.emit(mask)?;
        counts.masks += 1;
    }

    let (vertical, horizontal, outer) = if let Some(angles) = config.extensions {
        let mut vertical = vertical;
        let mut horizontal = horizontal;
        for (axis, grids) in [(Axis::Vertical, &mut vertical), (Axis::Horizontal, &mut horizontal)] {
            for grid in grids.iter_mut() {
                let emissions =
                    extension_emissions(builder.graph(), grid, axis, &angles, config.extension_length)?;
                for (role, emission) in emissions {
                    let emitted = builder.emit(emission)?;
                    grid.roles.insert(role, emitted.id);
                    counts.extensions += 1;
                }
            }
        }

        for mask in crossing_masks(
            builder.graph(),
            &vertical,
            &horizontal,
            &pairing.extensions(),
            config.deletion_rectangles,
        )? {
            builder.emit(mask)?;
            counts.extension_masks += 1;
        }
        (vertical, horizontal, OuterStrands::Extensions)
    } else {
        (vertical, horizontal, OuterStrands::Tails)
    };

    let graph = builder.finish();
    let vertical_links = set_links(&graph, &vertical, outer)?;
    let horizontal_links = set_links(&graph, &horizontal, outer)?;

    log::debug!(
        "generated {}x{} pattern with {} items",
        config.m,
        config.n,
        counts.total()
    );

    Ok(
        match validate(&vertical_links, &horizontal_links, outer, &config.validation) {
            Ok(reports) => GenerationOutcome::Accepted(Pattern {
                graph,
                counts,
                reports,
            }),
            Err(rejection) => GenerationOutcome::Rejected(rejection),
        },
    )
}

/// Straight strand of `role` in `set_number` with the configured width
fn set_strand(
    set_number: u32,
    role: u32,
    (start, end): (Point2D, Point2D),
    config: &GeneratorConfig,
    style: StrandStyle,
) -> Strand {
    Strand::new(LayerName::new(set_number, role).to_string(), set_number, start, end)
    .with_width(config.strand_width)
    .with_style(style)
}

fn main_of(grid: &GridSet) -> Result<StrandId> {
    grid.get(ROLE_MAIN).ok_or_else(|| {
        generation_error("tails", &format!("set {} has no main strand", grid.set_number))
    })
}

fn split_axes(sets: Vec<(&SetPlacement, GridSet, StrandStyle)>) -> (Vec<GridSet>, Vec<GridSet>) {
    let mut vertical = Vec::new();
    let mut horizontal = Vec::new();
    for (placement, grid, _) in sets {
        match placement.axis {
            Axis::Vertical => vertical.push(grid),
            Axis::Horizontal => horizontal.push(grid),
        }
    }
    (vertical, horizontal)
}

/// Chords of the outermost strands of every set on one axis
fn set_links(graph: &StrandGraph, sets: &[GridSet], outer: OuterStrands) -> Result<Vec<SetLinks>> {
    let (role_a, role_b) = outer.roles();
    sets.iter()
        .map(|set| {
            let chord = |role: u32| -> Result<_> {
                let id = set.get(role).ok_or_else(|| {
                    generation_error(
                        "validation",
                        &format!("set {} has no strand with role {role}", set.set_number),
                    )
                })?;
                let strand = graph.strand(id)?;
                Ok((strand.start(), strand.end()))
            };
            Ok(SetLinks {
                set_number: set.set_number,
                outer_a: chord(role_a)?,
                outer_b: chord(role_b)?,
            })
        })
        .collect()
}
