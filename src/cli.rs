use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "carescore")]
#[command(about = "Childcare facility quality rating pipeline", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rate a facility population and publish the results
    Rate {
        /// Facility snapshot to rate (JSON array)
        input: PathBuf,

        /// Rating store to upsert into
        #[arg(short, long, default_value = "ratings.json")]
        output: PathBuf,

        /// Configuration file (defaults to carescore.toml found in the
        /// current directory or an ancestor)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Rating date for tenure and violation recency, YYYY-MM-DD
        /// (defaults to today)
        #[arg(long = "as-of")]
        as_of: Option<NaiveDate>,

        /// Disable parallel processing
        #[arg(long = "no-parallel")]
        no_parallel: bool,

        /// Number of worker threads (0 = all available cores)
        #[arg(short, long, default_value = "0")]
        jobs: usize,

        /// Suppress progress bars
        #[arg(short, long)]
        quiet: bool,
    },

    /// Initialize configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

pub fn parse_args() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing_rate_command() {
        let args = vec![
            "carescore",
            "rate",
            "facilities.json",
            "--output",
            "store.json",
            "--as-of",
            "2025-06-30",
            "--jobs",
            "4",
        ];

        let cli = Cli::parse_from(args);

        match cli.command {
            Commands::Rate {
                input,
                output,
                as_of,
                jobs,
                no_parallel,
                quiet,
                ..
            } => {
                assert_eq!(input, PathBuf::from("facilities.json"));
                assert_eq!(output, PathBuf::from("store.json"));
                assert_eq!(as_of, NaiveDate::from_ymd_opt(2025, 6, 30));
                assert_eq!(jobs, 4);
                assert!(!no_parallel);
                assert!(!quiet);
            }
            _ => panic!("Expected Rate command"),
        }
    }

    #[test]
    fn test_cli_rate_defaults() {
        let cli = Cli::parse_from(vec!["carescore", "rate", "facilities.json"]);

        match cli.command {
            Commands::Rate {
                output,
                config,
                as_of,
                jobs,
                ..
            } => {
                assert_eq!(output, PathBuf::from("ratings.json"));
                assert_eq!(config, None);
                assert_eq!(as_of, None);
                assert_eq!(jobs, 0);
            }
            _ => panic!("Expected Rate command"),
        }
    }

    #[test]
    fn test_cli_parsing_init_command() {
        let cli = Cli::parse_from(vec!["carescore", "init", "--force"]);

        match cli.command {
            Commands::Init { force } => assert!(force),
            _ => panic!("Expected Init command"),
        }
    }

    #[test]
    fn test_cli_rejects_bad_as_of() {
        let result = Cli::try_parse_from(vec![
            "carescore",
            "rate",
            "facilities.json",
            "--as-of",
            "June 30th",
        ]);
        assert!(result.is_err());
    }
}
