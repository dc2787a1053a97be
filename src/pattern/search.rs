//! Parallel search over grid sizes, extension angles and tail offsets
//!
//! Every candidate is generated and judged independently on the rayon pool.
//! Accepted patterns go to a caller-supplied sink, one call per candidate,
//! so each worker writes its own output. The only aggregate is the summary,
//! combined with an order-independent reduction.

use crate::io::configuration::{SEARCH_ANGLE_MAX, SEARCH_ANGLE_MIN, SEARCH_OFFSET_STEP};
use crate::io::error::Result;
use crate::io::progress::SearchProgress;
use crate::pattern::config::{ExtensionAngles, GeneratorConfig};
use crate::pattern::generator::{GenerationOutcome, Pattern, generate};
use crate::pattern::validation::Rejection;
use rayon::prelude::*;
use std::cmp::Ordering;

/// Parameter ranges to explore
#[derive(Clone, Debug, PartialEq)]
pub struct SearchSpace {
    /// `(m, n)` grid sizes
    pub sizes: Vec<(usize, usize)>,
    /// Vertical search angles in degrees
    pub vertical_angles: Vec<f64>,
    /// Horizontal search angles in degrees
    pub horizontal_angles: Vec<f64>,
    /// `(vertical, horizontal)` tail offsets applied uniformly to every set
    pub offsets: Vec<(f64, f64)>,
}

impl SearchSpace {
    /// Whole-degree angles over the default range, no tail offsets
    pub fn new(sizes: Vec<(usize, usize)>) -> Self {
        let angles: Vec<f64> = (SEARCH_ANGLE_MIN..SEARCH_ANGLE_MAX).map(f64::from).collect();
        Self {
            sizes,
            vertical_angles: angles.clone(),
            horizontal_angles: angles,
            offsets: vec![(0.0, 0.0)],
        }
    }

    /// Restrict the angles explored
    #[must_use]
    pub fn with_angles(mut self, vertical: Vec<f64>, horizontal: Vec<f64>) -> Self {
        self.vertical_angles = vertical;
        self.horizontal_angles = horizontal;
        self
    }

    /// Explore `steps` offset multiples on each axis, starting at zero
    #[must_use]
    pub fn with_offset_steps(mut self, steps: u32) -> Self {
        let values: Vec<f64> = (0..steps.max(1))
            .map(|step| f64::from(step) * SEARCH_OFFSET_STEP)
            .collect();
        self.offsets = values
            .iter()
            .flat_map(|v| values.iter().map(move |h| (*v, *h)))
            .collect();
        self
    }

    /// Number of candidates in the space
    pub fn len(&self) -> usize {
        self.sizes.len()
            * self.vertical_angles.len()
            * self.horizontal_angles.len()
            * self.offsets.len()
    }

    /// Whether the space has no candidates
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every candidate, numbered in a fixed order
    pub fn candidates(&self) -> Vec<Candidate> {
        let mut candidates = Vec::with_capacity(self.len());
        for &(m, n) in &self.sizes {
            for &vertical_angle in &self.vertical_angles {
                for &horizontal_angle in &self.horizontal_angles {
                    for &offsets in &self.offsets {
                        candidates.push(Candidate {
                            index: candidates.len(),
                            m,
                            n,
                            vertical_angle,
                            horizontal_angle,
                            offsets,
                        });
                    }
                }
            }
        }
        candidates
    }
}

/// One point of the search space
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Candidate {
    /// Position in [`SearchSpace::candidates`]
    pub index: usize,
    /// Vertical sets
    pub m: usize,
    /// Horizontal sets
    pub n: usize,
    /// Vertical extension angle
    pub vertical_angle: f64,
    /// Horizontal extension angle
    pub horizontal_angle: f64,
    /// Uniform `(vertical, horizontal)` tail offsets
    pub offsets: (f64, f64),
}

impl Candidate {
    /// `base` resized to this candidate, with its offsets and extension angles
    pub fn config(&self, base: &GeneratorConfig) -> GeneratorConfig {
        let mut config = base.clone();
        config.m = self.m;
        config.n = self.n;
        config
            .with_uniform_offsets(self.offsets.0, self.offsets.1)
            .with_extensions(ExtensionAngles::from_search_angles(
                self.vertical_angle,
                self.horizontal_angle,
            ))
    }

    /// File name stem identifying the candidate
    pub fn file_stem(&self) -> String {
        format!(
            "m{}_n{}_v{}_h{}_va{}_ha{}",
            self.m, self.n, self.offsets.0, self.offsets.1, self.vertical_angle, self.horizontal_angle
        )
    }
}

/// Rejected candidate closest to passing
#[derive(Clone, Debug, PartialEq)]
pub struct ClosestMiss {
    /// The candidate
    pub candidate: Candidate,
    /// Why it was rejected
    pub rejection: Rejection,
}

impl ClosestMiss {
    /// Lower severity wins; ties go to the earlier candidate
    fn closer(self, other: Self) -> Self {
        let ordering = self
            .rejection
            .severity
            .total_cmp(&other.rejection.severity)
            .then(self.candidate.index.cmp(&other.candidate.index));
        if ordering == Ordering::Greater { other } else { self }
    }
}

/// Tally of a search run
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchSummary {
    /// Candidates evaluated
    pub evaluated: usize,
    /// Candidates accepted and delivered to the sink
    pub accepted: usize,
    /// Candidates that broke a rule
    pub rejected: usize,
    /// Candidates that failed with an error, with their messages
    pub failed: Vec<(usize, String)>,
    /// Best rejected candidate
    pub closest_miss: Option<ClosestMiss>,
}

impl SearchSummary {
    fn record(mut self, candidate: &Candidate, outcome: Result<Option<Rejection>>) -> Self {
        self.evaluated += 1;
        match outcome {
            Ok(None) => self.accepted += 1,
            Ok(Some(rejection)) => {
                self.rejected += 1;
                let miss = ClosestMiss {
                    candidate: *candidate,
                    rejection,
                };
                self.closest_miss = Some(match self.closest_miss.take() {
                    Some(current) => current.closer(miss),
                    None => miss,
                });
            }
            Err(error) => self.failed.push((candidate.index, error.to_string())),
        }
        self
    }

    fn merge(mut self, other: Self) -> Self {
        self.evaluated += other.evaluated;
        self.accepted += other.accepted;
        self.rejected += other.rejected;
        self.failed.extend(other.failed);
        self.failed.sort_by_key(|(index, _)| *index);
        self.closest_miss = match (self.closest_miss, other.closest_miss) {
            (Some(a), Some(b)) => Some(a.closer(b)),
            (a, b) => a.or(b),
        };
        self
    }
}

/// Evaluate every candidate of `space` against `base`
///
/// The sink receives each accepted pattern; a sink error counts the
/// candidate as failed without stopping the search.
pub fn search<S>(
    base: &GeneratorConfig,
    space: &SearchSpace,
    sink: S,
    progress: Option<&SearchProgress>,
) -> SearchSummary
where
    S: Fn(&Candidate, &Pattern) -> Result<()> + Sync,
{
    let candidates = space.candidates();
    log::info!("searching {} candidates", candidates.len());

    let summary = candidates
        .par_iter()
        .map(|candidate| {
            let outcome = evaluate(base, candidate, &sink);
            if let Some(progress) = progress {
                progress.advance(outcome.as_ref().is_ok_and(Option::is_none));
            }
            (candidate, outcome)
        })
        .fold(SearchSummary::default, |summary, (candidate, outcome)| {
            summary.record(candidate, outcome)
        })
        .reduce(SearchSummary::default, SearchSummary::merge);

    log::info!(
        "search finished: {} accepted, {} rejected, {} failed",
        summary.accepted,
        summary.rejected,
        summary.failed.len()
    );
    summary
}

/// Generate one candidate; `Ok(None)` when accepted and delivered
fn evaluate<S>(base: &GeneratorConfig, candidate: &Candidate, sink: &S) -> Result<Option<Rejection>>
where
    S: Fn(&Candidate, &Pattern) -> Result<()>,
{
    match generate(&candidate.config(base))? {
        GenerationOutcome::Accepted(pattern) => {
            sink(candidate, &pattern)?;
            Ok(None)
        }
        GenerationOutcome::Rejected(rejection) => Ok(Some(rejection)),
    }
}
