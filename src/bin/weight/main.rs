//! Command line entry point: `weight add`, `weight cat`, and `weight plot`.

use clap::Parser;
use log::debug;
use std::{io, process::ExitCode};
use weight::{
    args::{
        CommandTask::{Add, Cat, Plot},
        usage_error, WeightArgs, EXAMPLE_USAGE,
    },
    commands,
    config::WeightConfig,
    error::WeightError,
    store::WeightLog,
};

// Example:
// cargo run --bin weight -- add 75.2
// cargo run --bin weight -- cat -n 10 --dates
// cargo run --bin weight -- plot --snapshot --width 120 --height 40

fn main() -> ExitCode {
    env_logger::init();
    let args = match WeightArgs::try_parse() {
        Ok(args) => args,
        Err(e) if e.use_stderr() => {
            eprintln!("{}", usage_error(&e));
            return ExitCode::FAILURE;
        }
        // --help and --version
        Err(e) => e.exit(),
    };
    debug!("{:?}", args);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}\n\n{}", e, EXAMPLE_USAGE);
            ExitCode::FAILURE
        }
    }
}

fn run(args: WeightArgs) -> Result<(), WeightError> {
    let config = WeightConfig::load(args.config.as_deref())?;
    let log = WeightLog::open(config.data_path(args.data.as_deref())?);
    debug!("Using data file {}", log.path().display());

    match args.command {
        Add(add) => {
            let entry = commands::add_today(&log, &add.weight)?;
            println!("Added {} to the series successfully", entry.text());
        }
        Cat(cat) => {
            let count = cat.count.unwrap_or(config.cat_count);
            commands::cat(&log, count, cat.dates, &mut io::stdout().lock())?;
        }
        Plot(plot) if plot.snapshot => {
            let width = plot.width.unwrap_or(config.snapshot.width);
            let height = plot.height.unwrap_or(config.snapshot.height);
            commands::plot_snapshot(
                &log,
                &config.smoothing,
                width,
                height,
                &mut io::stdout().lock(),
            )?;
        }
        Plot(_) => commands::plot(&log, &config.smoothing)?,
    }

    Ok(())
}
