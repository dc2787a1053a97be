//! Tests for command-line parsing and the generate and search commands

#[cfg(test)]
mod tests {
    use clap::Parser;
    use std::path::PathBuf;
    use strandweave::io::cli::{
        Cli, Command, HandArg, Runner, VariantArg, candidate_path, parse_grid_size,
    };
    use strandweave::io::configuration::DEFAULT_SEED;
    use strandweave::io::document::Document;
    use strandweave::io::loader::load_graph;
    use strandweave::pattern::config::{Chirality, LayoutVariant};
    use strandweave::pattern::search::SearchSpace;
    use tempfile::TempDir;

    // Tests grid sizes parse in either case and reject zero
    // Verified by accepting zero-sized grids
    #[test]
    fn test_parse_grid_size() {
        assert_eq!(parse_grid_size("3x2"), Ok((3, 2)));
        assert_eq!(parse_grid_size("4X1"), Ok((4, 1)));
        assert!(parse_grid_size("0x1").is_err());
        assert!(parse_grid_size("3").is_err());
        assert!(parse_grid_size("ax2").is_err());
    }

    // Tests generate parsing with only the output given
    // Verified by changing default values to ensure defaults are used
    #[test]
    fn test_generate_defaults() {
        let cli = Cli::parse_from(["strandweave", "generate", "-o", "out.json"]);
        assert!(!cli.quiet);
        let Command::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!((args.m, args.n), (1, 1));
        assert_eq!(args.output, PathBuf::from("out.json"));
        assert_eq!(args.pattern.variant, VariantArg::Systematic);
        assert_eq!(args.pattern.hand, HandArg::Rh);
        assert_eq!(args.pattern.seed, DEFAULT_SEED);

        let config = args.config();
        assert!(config.extensions.is_none());
        assert_eq!(config.variant, LayoutVariant::Systematic);
    }

    // Tests every generate option reaches the configuration
    // Verified by ignoring the handedness flag
    #[test]
    fn test_generate_all_args() {
        let cli = Cli::parse_from([
            "strandweave",
            "generate",
            "-m",
            "3",
            "-n",
            "2",
            "--variant",
            "stretch",
            "--hand",
            "lh",
            "--seed",
            "7",
            "--deletion-rectangles",
            "--vertical-angle",
            "30",
            "--horizontal-angle",
            "40",
            "--vertical-offset",
            "-4",
            "-o",
            "out.json",
            "--quiet",
        ]);
        assert!(cli.quiet);
        let Command::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        let config = args.config();
        assert_eq!((config.m, config.n), (3, 2));
        assert_eq!(config.variant, LayoutVariant::Stretch);
        assert_eq!(config.chirality, Chirality::LeftHanded);
        assert_eq!(config.seed, 7);
        assert!(config.deletion_rectangles);
        assert_eq!(config.vertical_offsets, vec![-4.0; 3]);
        let angles = config.extensions.expect("extensions");
        assert!((angles.vertical_a - 30.0).abs() < f64::EPSILON);
        assert!((angles.horizontal_b - 130.0).abs() < f64::EPSILON);
    }

    // Tests extension angles must be given together
    // Verified by dropping the requires relation
    #[test]
    fn test_angles_required_together() {
        let result = Cli::try_parse_from([
            "strandweave",
            "generate",
            "--vertical-angle",
            "30",
            "-o",
            "out.json",
        ]);
        assert!(result.is_err());
    }

    // Tests search parsing builds the requested space
    // Verified by making the angle range inclusive
    #[test]
    fn test_search_space_args() {
        let cli = Cli::parse_from([
            "strandweave",
            "search",
            "--sizes",
            "1x1,2x3",
            "--angle-min",
            "20",
            "--angle-max",
            "23",
            "--offset-steps",
            "2",
            "-o",
            "out",
        ]);
        let Command::Search(args) = cli.command else {
            panic!("expected search");
        };
        assert_eq!(args.sizes, vec![(1, 1), (2, 3)]);
        let space = args.space();
        assert_eq!(space.vertical_angles, vec![20.0, 21.0, 22.0]);
        assert_eq!(space.len(), 2 * 3 * 3 * 4);
    }

    // Tests malformed sizes are refused at parse time
    // Verified by skipping the custom value parser
    #[test]
    fn test_search_bad_size() {
        let result = Cli::try_parse_from(["strandweave", "search", "--sizes", "2by2", "-o", "out"]);
        assert!(result.is_err());
    }

    // Tests candidate documents are named after their parameters
    // Verified by dropping the extension
    #[test]
    fn test_candidate_path() {
        let space = SearchSpace::new(vec![(2, 1)]).with_angles(vec![15.0], vec![25.0]);
        let candidate = space.candidates()[0];
        let path = candidate_path(&PathBuf::from("out"), &candidate);
        assert_eq!(path, PathBuf::from("out/m2_n1_v0_h0_va15_ha25.json"));
    }

    // Tests generate writes a loadable document
    // Verified by writing the document before the tails are emitted
    #[test]
    fn test_run_generate() {
        let directory = TempDir::new().expect("temp dir");
        let output = directory.path().join("pattern.json");
        let output_text = output.to_string_lossy().to_string();
        let cli = Cli::parse_from(["strandweave", "generate", "-q", "-o", output_text.as_str()]);

        Runner::new(cli).run().expect("generate");
        let document = Document::read(&output).expect("read");
        assert_eq!(document.strands.len(), 8);
        let graph = load_graph(&document).expect("load");
        assert_eq!(graph.masks().count(), 2);
    }

    // Tests search writes one document per accepted candidate
    // Verified by writing every candidate to the same file
    #[test]
    fn test_run_search() {
        let directory = TempDir::new().expect("temp dir");
        let output = directory.path().join("results");
        let output_text = output.to_string_lossy().to_string();
        let cli = Cli::parse_from([
            "strandweave",
            "search",
            "-q",
            "--angle-min",
            "40",
            "--angle-max",
            "42",
            "--threads",
            "2",
            "-o",
            output_text.as_str(),
        ]);
        let Command::Search(args) = &cli.command else {
            panic!("expected search");
        };
        let args = args.clone();

        let summary = Runner::new(cli).run_search(&args).expect("search");
        assert_eq!(summary.evaluated, 4);
        assert_eq!(summary.accepted, 4);

        let written = std::fs::read_dir(&output).expect("results").count();
        assert_eq!(written, 4);
        assert!(output.join("m1_n1_v0_h0_va40_ha41.json").exists());
    }
}
