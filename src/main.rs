use anyhow::Result;
use carescore::cli::{Cli, Commands};
use clap::Parser;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Rate {
            input,
            output,
            config,
            as_of,
            no_parallel,
            jobs,
            quiet,
        } => {
            let rate_config = carescore::commands::rate::RateConfig {
                input,
                output,
                config,
                as_of,
                no_parallel,
                jobs,
                quiet,
            };
            carescore::commands::rate::rate_facilities(rate_config)
        }
        Commands::Init { force } => carescore::commands::init::init_config(force),
    }
}
