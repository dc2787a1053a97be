//! Command-line interface for generating patterns and sweeping parameters

use crate::io::configuration::{
    DEFAULT_SEED, OUTPUT_EXTENSION, SEARCH_ANGLE_MAX, SEARCH_ANGLE_MIN,
};
use crate::io::document::Document;
use crate::io::error::{Result, WithContext, generation_error, invalid_parameter};
use crate::io::progress::SearchProgress;
use crate::pattern::config::{Chirality, ExtensionAngles, GeneratorConfig, LayoutVariant};
use crate::pattern::generator::{GenerationOutcome, Pattern, generate};
use crate::pattern::search::{Candidate, SearchSpace, SearchSummary, search};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::{Path, PathBuf};

/// Command-line arguments
#[derive(Debug, Parser)]
#[command(name = "strandweave")]
#[command(
    author,
    version,
    about = "Generate woven strand patterns and search their parameter space"
)]
pub struct Cli {
    /// What to do
    #[command(subcommand)]
    pub command: Command,

    /// Suppress progress output
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Build one pattern and write it as a JSON document
    Generate(GenerateArgs),
    /// Sweep sizes, angles and offsets, writing every accepted pattern
    Search(SearchArgs),
}

/// Placement formulas selectable on the command line
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum VariantArg {
    /// Pitch-based grid
    Systematic,
    /// Canvas-centered grid
    Stretch,
}

/// Handedness selectable on the command line
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum HandArg {
    /// Right-handed weave
    Rh,
    /// Left-handed weave
    Lh,
}

/// Options shared by both subcommands
#[derive(Clone, Debug, Args)]
pub struct PatternArgs {
    /// Placement formulas
    #[arg(long, value_enum, default_value_t = VariantArg::Systematic)]
    pub variant: VariantArg,

    /// Handedness
    #[arg(long, value_enum, default_value_t = HandArg::Rh)]
    pub hand: HandArg,

    /// Seed for set colors
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Cut neighboring strands out of crossing masks
    #[arg(long)]
    pub deletion_rectangles: bool,
}

impl PatternArgs {
    /// Base configuration for an `m`×`n` grid
    pub fn config(&self, m: usize, n: usize) -> GeneratorConfig {
        let variant = match self.variant {
            VariantArg::Systematic => LayoutVariant::Systematic,
            VariantArg::Stretch => LayoutVariant::Stretch,
        };
        let chirality = match self.hand {
            HandArg::Rh => Chirality::RightHanded,
            HandArg::Lh => Chirality::LeftHanded,
        };
        GeneratorConfig::new(m, n)
            .with_variant(variant)
            .with_chirality(chirality)
            .with_seed(self.seed)
            .with_deletion_rectangles(self.deletion_rectangles)
    }
}

/// Arguments of `generate`
#[derive(Clone, Debug, Args)]
pub struct GenerateArgs {
    /// Number of vertical sets
    #[arg(short, default_value_t = 1)]
    pub m: usize,

    /// Number of horizontal sets
    #[arg(short, default_value_t = 1)]
    pub n: usize,

    /// Shared pattern options
    #[command(flatten)]
    pub pattern: PatternArgs,

    /// Vertical extension angle; extensions are added when both angles are given
    #[arg(long, requires = "horizontal_angle")]
    pub vertical_angle: Option<f64>,

    /// Horizontal extension angle
    #[arg(long, requires = "vertical_angle")]
    pub horizontal_angle: Option<f64>,

    /// Tail offset applied to every vertical set
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub vertical_offset: f64,

    /// Tail offset applied to every horizontal set
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub horizontal_offset: f64,

    /// Output document
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,
}

impl GenerateArgs {
    /// Configuration described by the arguments
    pub fn config(&self) -> GeneratorConfig {
        let config = self
            .pattern
            .config(self.m, self.n)
            .with_uniform_offsets(self.vertical_offset, self.horizontal_offset);
        match (self.vertical_angle, self.horizontal_angle) {
            (Some(vertical), Some(horizontal)) => {
                config.with_extensions(ExtensionAngles::from_search_angles(vertical, horizontal))
            }
            _ => config,
        }
    }
}

/// Arguments of `search`
#[derive(Clone, Debug, Args)]
pub struct SearchArgs {
    /// Grid sizes to explore, as `MxN`
    #[arg(long, value_parser = parse_grid_size, value_delimiter = ',', default_value = "1x1")]
    pub sizes: Vec<(usize, usize)>,

    /// Shared pattern options
    #[command(flatten)]
    pub pattern: PatternArgs,

    /// Smallest extension angle
    #[arg(long, default_value_t = SEARCH_ANGLE_MIN)]
    pub angle_min: i32,

    /// Angle the sweep stops before
    #[arg(long, default_value_t = SEARCH_ANGLE_MAX)]
    pub angle_max: i32,

    /// Offset multiples explored per axis
    #[arg(long, default_value_t = 1)]
    pub offset_steps: u32,

    /// Worker threads, all cores when absent
    #[arg(short, long)]
    pub threads: Option<usize>,

    /// Directory receiving one document per accepted pattern
    #[arg(short, long, value_name = "DIR")]
    pub output: PathBuf,
}

impl SearchArgs {
    /// Space described by the arguments
    pub fn space(&self) -> SearchSpace {
        let angles: Vec<f64> = (self.angle_min..self.angle_max).map(f64::from).collect();
        SearchSpace::new(self.sizes.clone())
            .with_angles(angles.clone(), angles)
            .with_offset_steps(self.offset_steps)
    }
}

/// Parse an `MxN` grid size
///
/// # Errors
///
/// Returns a message if the text is not two positive integers joined by `x`
pub fn parse_grid_size(text: &str) -> std::result::Result<(usize, usize), String> {
    let (m, n) = text
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected MxN, got '{text}'"))?;
    let parse = |part: &str| {
        part.trim()
            .parse::<usize>()
            .ok()
            .filter(|value| *value > 0)
            .ok_or_else(|| format!("'{part}' is not a positive integer"))
    };
    Ok((parse(m)?, parse(n)?))
}

/// Path of the document written for a search candidate
pub fn candidate_path(directory: &Path, candidate: &Candidate) -> PathBuf {
    directory.join(format!("{}.{OUTPUT_EXTENSION}", candidate.file_stem()))
}

/// Write an accepted pattern as a document
///
/// # Errors
///
/// Returns an error if the document cannot be built or written
pub fn write_pattern(pattern: &Pattern, path: &Path) -> Result<()> {
    Document::from_graph(&pattern.graph)?.write(path)
}

/// Executes a parsed command line
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Wrap parsed arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the selected subcommand
    ///
    /// # Errors
    ///
    /// Returns an error if generation fails, the pattern is rejected, or
    /// output cannot be written
    pub fn run(&self) -> Result<()> {
        match &self.cli.command {
            Command::Generate(args) => Self::run_generate(args),
            Command::Search(args) => self.run_search(args).map(|_| ()),
        }
    }

    fn run_generate(args: &GenerateArgs) -> Result<()> {
        match generate(&args.config())? {
            GenerationOutcome::Accepted(pattern) => {
                write_pattern(&pattern, &args.output)?;
                log::info!(
                    "wrote {} items to {}",
                    pattern.counts.total(),
                    args.output.display()
                );
                Ok(())
            }
            GenerationOutcome::Rejected(rejection) => {
                Err(generation_error("validation", &rejection))
            }
        }
    }

    /// Sweep the space and write accepted patterns
    ///
    /// # Errors
    ///
    /// Returns an error if the output directory or worker pool cannot be set up
    pub fn run_search(&self, args: &SearchArgs) -> Result<SearchSummary> {
        fs::create_dir_all(&args.output).with_path(&args.output, "create output directory")?;

        let mut pool = rayon::ThreadPoolBuilder::new();
        if let Some(threads) = args.threads {
            pool = pool.num_threads(threads);
        }
        let pool = pool
            .build()
            .map_err(|error| invalid_parameter("threads", &format!("{:?}", args.threads), &error))?;

        let base = args.pattern.config(1, 1);
        let space = args.space();
        let progress = if self.cli.quiet {
            SearchProgress::hidden(space.len())
        } else {
            SearchProgress::new(space.len())
        };

        let directory = args.output.as_path();
        let summary = pool.install(|| {
            search(
                &base,
                &space,
                |candidate, pattern| write_pattern(pattern, &candidate_path(directory, candidate)),
                Some(&progress),
            )
        });
        progress.finish();

        report(&summary);
        if let Some((_, message)) = summary.failed.first()
            && summary.accepted == 0
        {
            return Err(generation_error("search", message));
        }
        Ok(summary)
    }
}

fn report(summary: &SearchSummary) {
    log::info!(
        "evaluated {}: {} accepted, {} rejected, {} failed",
        summary.evaluated,
        summary.accepted,
        summary.rejected,
        summary.failed.len()
    );
    for (index, message) in &summary.failed {
        log::warn!("candidate {index} failed: {message}");
    }
    if let Some(miss) = &summary.closest_miss {
        log::info!(
            "closest miss: {} ({})",
            miss.candidate.file_stem(),
            miss.rejection
        );
    }
}
