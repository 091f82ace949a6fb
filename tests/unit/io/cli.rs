//! Tests for CLI argument parsing and candidate collection

#[cfg(test)]
mod tests {
    use clap::Parser;
    use mosaictile::io::cli::{Cli, collect_candidates};
    use mosaictile::io::settings::{ParquetRatio, PatternKind};
    use std::fs;
    use tempfile::TempDir;

    fn parse(extra: &[&str]) -> Cli {
        let mut args = vec!["mosaictile", "target.jpg", "cells"];
        args.extend_from_slice(extra);
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&[]);

        assert!((cli.print_width - 10.0).abs() < f64::EPSILON);
        assert!((cli.print_height - 15.0).abs() < f64::EPSILON);
        assert!(!cli.use_all);
        assert!(!cli.mirror);
        assert!(!cli.quiet);
        assert!(cli.should_show_progress());

        let settings = cli.settings().unwrap();
        assert_eq!(settings.pattern, PatternKind::Square);
    }

    // Tests the L:P ratio flag parse into the parquet pattern
    #[test]
    fn test_parquet_ratio_flag() {
        let cli = parse(&["--pattern", "parquet", "--ratio", "3:2"]);

        let settings = cli.settings().unwrap();
        assert_eq!(
            settings.pattern,
            PatternKind::Parquet(ParquetRatio {
                landscape: 3,
                portrait: 2,
            })
        );
    }

    #[test]
    fn test_malformed_ratio_is_rejected() {
        for ratio in ["abc", "3", "0:1", "2:0", "1:x"] {
            let cli = parse(&["--pattern", "parquet", "--ratio", ratio]);
            assert!(cli.settings().is_err(), "ratio '{ratio}' should be rejected");
        }

        // The ratio flag is only consulted for the parquet pattern
        assert!(parse(&["--ratio", "abc"]).settings().is_ok());
    }

    // Tests percent clamping at the flag level
    #[test]
    fn test_percent_flag_is_clamped() {
        let high = parse(&["--percent", "250"]).settings().unwrap();
        assert!((high.color_change_percent - 100.0).abs() < f64::EPSILON);

        let low = parse(&["--percent", "-10"]).settings().unwrap();
        assert!(low.color_change_percent.abs() < f64::EPSILON);
    }

    // Tests extension filtering and deterministic ordering of the scan
    #[test]
    fn test_collect_candidates_filters_and_sorts() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("b.JPG"), "x").unwrap();
        fs::write(temp_dir.path().join("a.png"), "x").unwrap();
        fs::write(temp_dir.path().join("notes.txt"), "x").unwrap();
        fs::write(temp_dir.path().join("c.webp"), "x").unwrap();
        fs::create_dir(temp_dir.path().join("nested.png")).unwrap();

        let candidates = collect_candidates(temp_dir.path()).unwrap();
        let names: Vec<_> = candidates
            .iter()
            .filter_map(|path| path.file_name().and_then(|name| name.to_str()))
            .collect();

        assert_eq!(names, vec!["a.png", "b.JPG", "c.webp"]);
    }

    #[test]
    fn test_collect_candidates_missing_directory_errors() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("does-not-exist");
        assert!(collect_candidates(&missing).is_err());
    }
}
