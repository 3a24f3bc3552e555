//! Tests for command-line parsing and the per-size output runner

#[cfg(test)]
mod tests {
    use clap::Parser;
    use innovation_grid::GridError;
    use innovation_grid::io::cli::{Cli, ExplorerRunner};
    use innovation_grid::io::configuration::DEFAULT_SEED;
    use innovation_grid::io::region::InputCrs;
    use innovation_grid::pipeline::selection::GridSize;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const SQUARE_300KM: &str = r#"{
        "type": "Polygon",
        "coordinates": [[[0, 0], [300000, 0], [300000, 300000], [0, 300000], [0, 0]]]
    }"#;

    // Tests CLI parsing with only the required boundary argument
    // Verified by changing default values to ensure defaults are used
    #[test]
    fn test_cli_parse_minimal_args() {
        let cli = Cli::parse_from(["program", "us.geojson"]);

        assert_eq!(cli.boundary, PathBuf::from("us.geojson"));
        assert_eq!(cli.grid_sizes, vec![GridSize::Km20]);
        assert_eq!(cli.seed, DEFAULT_SEED);
        assert_eq!(cli.input_crs, InputCrs::Geographic);
        assert_eq!(cli.output_dir, None);
        assert!(!cli.no_density);
        assert!(!cli.geojson);
        assert!(!cli.quiet);
        assert_eq!(cli.verbose, 0);
    }

    // Tests CLI parsing with all available arguments
    // Verified by renaming the grid size values
    #[test]
    fn test_cli_parse_all_args() {
        let cli = Cli::parse_from([
            "program",
            "boundary.geojson",
            "--grid-size",
            "50",
            "-g",
            "100",
            "--seed",
            "7",
            "--input-crs",
            "projected",
            "--output-dir",
            "figures",
            "--no-density",
            "--geojson",
            "--quiet",
            "-vv",
        ]);

        assert_eq!(cli.grid_sizes, vec![GridSize::Km50, GridSize::Km100]);
        assert_eq!(cli.seed, 7);
        assert_eq!(cli.input_crs, InputCrs::Projected);
        assert_eq!(cli.output_dir, Some(PathBuf::from("figures")));
        assert!(cli.no_density);
        assert!(cli.geojson);
        assert!(!cli.should_show_progress());
        assert_eq!(cli.log_level(), tracing::Level::DEBUG);
    }

    // Tests sizes outside the enumerated choices are rejected
    // Verified by accepting any integer edge length
    #[test]
    fn test_cli_rejects_unknown_size() {
        assert!(Cli::try_parse_from(["program", "us.geojson", "-g", "30"]).is_err());
        assert!(Cli::try_parse_from(["program"]).is_err());
    }

    // Tests repeated sizes are run once, keeping the first occurrence order
    // Verified by sorting instead of deduplicating in order
    #[test]
    fn test_selected_sizes_dedup() {
        let cli = Cli::parse_from(["program", "us.geojson", "-g", "100", "-g", "20", "-g", "100"]);

        assert_eq!(cli.selected_sizes(), vec![GridSize::Km100, GridSize::Km20]);
    }

    // Tests the verbosity count maps onto log levels
    // Verified by starting at INFO
    #[test]
    fn test_log_levels() {
        let level = |args: &[&str]| {
            let mut full = vec!["program", "us.geojson"];
            full.extend_from_slice(args);
            Cli::parse_from(full).log_level()
        };

        assert_eq!(level(&[]), tracing::Level::WARN);
        assert_eq!(level(&["-v"]), tracing::Level::INFO);
        assert_eq!(level(&["-vvv"]), tracing::Level::TRACE);
        assert_eq!(level(&["-vvvvv"]), tracing::Level::TRACE);
    }

    // Tests a second subscriber install surfaces as an error instead of being dropped
    // Verified by ignoring the set_global_default result
    #[test]
    fn test_init_logging_reports_existing_subscriber() {
        let cli = Cli::parse_from(["program", "us.geojson", "-q"]);

        // The first install may already have happened elsewhere in this binary
        let _ = cli.init_logging();
        let second = cli.init_logging();

        assert!(matches!(
            second,
            Err(GridError::Computation {
                operation: "install log subscriber",
                ..
            })
        ));
    }

    // Tests output names combine the boundary stem, the size and the figure kind
    // Verified by dropping the size from the file name
    #[test]
    fn test_output_paths() {
        let beside = ExplorerRunner::new(Cli::parse_from(["program", "data/us.geojson", "-q"]));
        let paths = beside.output_paths(GridSize::Km50);

        assert_eq!(paths.grid, PathBuf::from("data/us_50km_grid.png"));
        assert_eq!(paths.density, PathBuf::from("data/us_50km_density.png"));
        assert_eq!(paths.cells, PathBuf::from("data/us_50km_cells.geojson"));

        let redirected = ExplorerRunner::new(Cli::parse_from([
            "program",
            "data/us.geojson",
            "-q",
            "-o",
            "out",
        ]));
        assert_eq!(
            redirected.output_paths(GridSize::Km20).grid,
            PathBuf::from("out/us_20km_grid.png")
        );
    }

    // Tests a run writes every figure for every selected size
    // Verified by skipping the density figure
    #[test]
    fn test_runner_writes_outputs() {
        let temp_dir = TempDir::new().unwrap_or_else(|e| unreachable!("tempdir: {e}"));
        let boundary = temp_dir.path().join("square.geojson");
        std::fs::write(&boundary, SQUARE_300KM).unwrap_or_else(|e| unreachable!("write: {e}"));
        let output_dir = temp_dir.path().join("figures");

        let cli = Cli::parse_from([
            "program".into(),
            boundary.into_os_string(),
            "--input-crs".into(),
            "projected".into(),
            "-g".into(),
            "100".into(),
            "-g".into(),
            "50".into(),
            "--geojson".into(),
            "-q".into(),
            "-o".into(),
            output_dir.clone().into_os_string(),
        ]);
        let written = ExplorerRunner::new(cli)
            .run()
            .unwrap_or_else(|e| unreachable!("run failed: {e}"));

        assert_eq!(written.len(), 2);
        for paths in &written {
            assert!(paths.grid.starts_with(&output_dir));
            assert!(paths.grid.exists());
            assert!(paths.density.exists());
            assert!(paths.cells.exists());
        }
    }

    // Tests skipping density leaves out the choropleth
    // Verified by rendering the choropleth regardless of the flag
    #[test]
    fn test_runner_without_density() {
        let temp_dir = TempDir::new().unwrap_or_else(|e| unreachable!("tempdir: {e}"));
        let boundary = temp_dir.path().join("square.geojson");
        std::fs::write(&boundary, SQUARE_300KM).unwrap_or_else(|e| unreachable!("write: {e}"));

        let cli = Cli::parse_from([
            "program".into(),
            boundary.into_os_string(),
            "--input-crs".into(),
            "projected".into(),
            "-g".into(),
            "100".into(),
            "--no-density".into(),
            "-q".into(),
        ]);
        let written = ExplorerRunner::new(cli)
            .run()
            .unwrap_or_else(|e| unreachable!("run failed: {e}"));

        assert_eq!(written.len(), 1);
        assert!(written.iter().all(|p| p.grid.exists()));
        assert!(written.iter().all(|p| !p.density.exists()));
        assert!(written.iter().all(|p| !p.cells.exists()));
    }

    // Tests a missing boundary fails the run
    // Verified by returning an empty result for missing files
    #[test]
    fn test_runner_missing_boundary() {
        let temp_dir = TempDir::new().unwrap_or_else(|e| unreachable!("tempdir: {e}"));
        let missing = temp_dir.path().join("absent.geojson");
        let cli = Cli::parse_from(["program".into(), missing.into_os_string(), "-q".into()]);

        assert!(ExplorerRunner::new(cli).run().is_err());
    }
}
