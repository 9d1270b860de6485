mod component;

use std::{
    borrow::Cow,
    fs,
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use simplex_engine::{
    command::{self, ProblemSpec},
    simplex::{PivotRule, SolverConfig},
};

use crate::component::{Solution, Table};

#[derive(Parser)]
#[command(name = "simplex")]
#[command(about = "Exact two-phase simplex over a tableau in standard form", long_about = None)]
struct Cli {
    /// Raise the log level (-v info, -vv debug); RUST_LOG overrides it
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a problem file and print every tableau and the outcome
    Solve {
        /// JSON problem file
        file: PathBuf,
        #[arg(long, value_enum, default_value_t = Rule::Dantzig)]
        rule: Rule,
        /// Pivots allowed over both phases
        #[arg(long, default_value_t = 1000)]
        max_iterations: usize,
        /// Print only the outcome
        #[arg(long)]
        no_trace: bool,
    },
    /// Validate a problem file without solving it
    Check {
        /// JSON problem file
        file: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Rule {
    Dantzig,
    Bland,
}

impl From<Rule> for PivotRule {
    fn from(rule: Rule) -> Self {
        match rule {
            Rule::Dantzig => PivotRule::Dantzig,
            Rule::Bland => PivotRule::Bland,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(match cli.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        })
        .parse_default_env()
        .init();

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> Result<(), Cow<'static, str>> {
    match command {
        Commands::Solve {
            file,
            rule,
            max_iterations,
            no_trace,
        } => {
            let config = SolverConfig::default()
                .with_pivot_rule(rule.into())
                .with_max_iterations(max_iterations)
                .with_trace(!no_trace);
            let report =
                command::solve(read_spec(&file)?, config).map_err(|err| err.to_string())?;

            for snapshot in report.trace() {
                println!("{}", Table::new(snapshot));
            }
            print!("{}", Solution::new(&report));
        }
        Commands::Check { file } => {
            let problem = command::build(read_spec(&file)?).map_err(|err| err.to_string())?;
            println!("{problem}");
            println!("{}: OK", file.display());
        }
    }
    Ok(())
}

fn read_spec(file: &Path) -> Result<ProblemSpec, Cow<'static, str>> {
    let json = fs::read_to_string(file)
        .map_err(|err| format!("cannot read {}: {err}", file.display()))?;
    ProblemSpec::from_json(&json).map_err(|err| format!("{}: {err}", file.display()).into())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn solve_flags() {
        let cli = Cli::try_parse_from([
            "simplex",
            "-vv",
            "solve",
            "demos/diet.json",
            "--rule",
            "bland",
            "--max-iterations",
            "20",
            "--no-trace",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Solve {
                file,
                rule,
                max_iterations,
                no_trace,
            } => {
                assert_eq!(file, PathBuf::from("demos/diet.json"));
                assert_eq!(PivotRule::from(rule), PivotRule::Bland);
                assert_eq!(max_iterations, 20);
                assert!(no_trace);
            }
            Commands::Check { .. } => panic!("expected the solve subcommand"),
        }
    }

    #[test]
    fn solve_defaults() {
        let cli = Cli::try_parse_from(["simplex", "solve", "p.json"]).unwrap();

        assert_eq!(cli.verbose, 0);
        assert!(matches!(
            cli.command,
            Commands::Solve {
                rule: Rule::Dantzig,
                max_iterations: 1000,
                no_trace: false,
                ..
            }
        ));
    }

    #[test]
    fn demo_files_parse_and_validate() {
        for entry in fs::read_dir(concat!(env!("CARGO_MANIFEST_DIR"), "/demos")).unwrap() {
            let path = entry.unwrap().path();
            let spec = read_spec(&path).unwrap();
            assert!(command::build(spec).is_ok(), "{}", path.display());
        }
    }
}
