//! Commandline argument parser using clap for weight

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Shown after the help text and after every error.
pub const EXAMPLE_USAGE: &str = "Example usage:
weight cat
weight plot
weight add 75.2";

#[allow(missing_docs)]
#[derive(Debug, Parser, Clone)]
#[clap(version, about, after_help = EXAMPLE_USAGE)]
pub struct WeightArgs {
    #[command(subcommand)]
    /// What to do with the weight log
    pub command: CommandTask,

    /// Data file to use instead of the configured one
    #[arg(short, long, global = true)]
    pub data: Option<PathBuf>,

    /// RON config file, defaults to weight.ron beside the executable
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// The commands understood by `weight`.
#[derive(Debug, Subcommand, Clone)]
pub enum CommandTask {
    /// Record today's weight
    Add(AddCommand),

    /// Print the most recent weights
    Cat(CatCommand),

    /// Chart the smoothed weight trend
    Plot(PlotCommand),
}

/// Arguments to `weight add`.
#[derive(Debug, Args, Clone)]
pub struct AddCommand {
    /// Weight in kilograms, e.g. 75.2
    #[arg(allow_negative_numbers = true)]
    pub weight: String,
}

/// Arguments to `weight cat`.
#[derive(Debug, Args, Clone)]
pub struct CatCommand {
    /// How many entries to print, defaults to the configured count (30)
    #[arg(short = 'n', long = "count")]
    pub count: Option<usize>,

    /// Print the date of each entry as well
    #[arg(long)]
    pub dates: bool,
}

/// Arguments to `weight plot`.
#[derive(Debug, Args, Clone)]
pub struct PlotCommand {
    /// Print a single frame to stdout instead of opening the viewer
    #[arg(short, long)]
    pub snapshot: bool,

    /// Snapshot width in columns
    #[arg(long, requires = "snapshot")]
    pub width: Option<u16>,

    /// Snapshot height in rows
    #[arg(long, requires = "snapshot")]
    pub height: Option<u16>,
}

/// The message printed when the command line cannot be parsed: clap's own
/// error followed by the example usage.
pub fn usage_error(err: &clap::Error) -> String {
    format!("{}\n{}", err.to_string().trim_end(), EXAMPLE_USAGE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_add() {
        let args = WeightArgs::try_parse_from(["weight", "add", "75.2"]).unwrap();
        match args.command {
            CommandTask::Add(AddCommand { weight }) => assert_eq!(weight, "75.2"),
            other => panic!("unexpected {:?}", other),
        }
        assert!(args.data.is_none());
    }

    #[test]
    fn add_needs_exactly_one() {
        assert!(WeightArgs::try_parse_from(["weight", "add"]).is_err());
        assert!(WeightArgs::try_parse_from(["weight", "add", "75", "76"]).is_err());
    }

    #[test]
    fn plot_takes_no_arguments() {
        assert!(WeightArgs::try_parse_from(["weight", "plot", "extra"]).is_err());
        assert!(WeightArgs::try_parse_from(["weight", "plot", "--width", "80"]).is_err());

        let args =
            WeightArgs::try_parse_from(["weight", "plot", "--snapshot", "--width", "80"]).unwrap();
        match args.command {
            CommandTask::Plot(p) => {
                assert!(p.snapshot);
                assert_eq!(p.width, Some(80));
                assert_eq!(p.height, None);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn unknown_or_missing_command() {
        assert!(WeightArgs::try_parse_from(["weight"]).is_err());
        assert!(WeightArgs::try_parse_from(["weight", "eat", "cake"]).is_err());
    }

    #[test]
    fn usage_errors_show_examples() {
        for argv in [
            vec!["weight", "eat", "cake"],
            vec!["weight", "add"],
            vec!["weight", "add", "75", "76"],
            vec!["weight", "plot", "extra"],
        ] {
            let err = WeightArgs::try_parse_from(argv.iter().copied()).unwrap_err();
            assert!(err.use_stderr());
            let msg = usage_error(&err);
            assert!(msg.contains("Usage:"), "{}", msg);
            assert!(msg.ends_with(EXAMPLE_USAGE), "{}", msg);
            assert!(msg.contains("weight add 75.2"));
        }

        let err = WeightArgs::try_parse_from(["weight", "eat", "cake"]).unwrap_err();
        assert!(usage_error(&err).contains("eat"));
    }

    #[test]
    fn global_data_flag() {
        let args =
            WeightArgs::try_parse_from(["weight", "cat", "-n", "5", "--data", "w.dat"]).unwrap();
        assert_eq!(args.data, Some(PathBuf::from("w.dat")));
        match args.command {
            CommandTask::Cat(c) => {
                assert_eq!(c.count, Some(5));
                assert!(!c.dates);
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
