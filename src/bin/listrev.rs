// listrev: render lists tail-to-head under every reversal strategy.
//
//   listrev                       run the built-in scenario
//   listrev --file cases.toml     run a scenario file
//   listrev -- delak bolek        render the given words
//   listrev -s stack -s recursive -- a b c
//
// Log output is controlled with LISTREV_LOG (default: warn).

use std::env;
use std::path::PathBuf;
use std::process;

use cell_list::reverse::{Strategy, UnknownStrategy};
use cell_list::scenario::{render_all, Outcome, Scenario, ScenarioError};
use colored::Colorize;
use itertools::Itertools;
use log::info;
use thiserror::Error;

const USAGE: &str = "usage: listrev [--file SCENARIO.toml] [--strategy NAME]... [-- WORD...]";

#[derive(Error, Debug)]
enum CliError {
    #[error("option {0} needs a value")]
    MissingValue(String),

    #[error("unrecognised option {0}")]
    UnknownOption(String),

    #[error(transparent)]
    Strategy(#[from] UnknownStrategy),

    #[error(transparent)]
    Scenario(#[from] ScenarioError),
}

#[derive(Debug, Default)]
struct Options {
    file: Option<PathBuf>,
    strategies: Vec<Strategy>,
    words: Option<Vec<String>>,
    help: bool,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Options, CliError> {
    let mut options = Options::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => options.help = true,
            "-f" | "--file" => {
                let path = args.next().ok_or_else(|| CliError::MissingValue(arg.clone()))?;
                options.file = Some(PathBuf::from(path));
            }
            "-s" | "--strategy" => {
                let name = args.next().ok_or_else(|| CliError::MissingValue(arg.clone()))?;
                options.strategies.push(name.parse()?);
            }
            "--" => {
                options.words = Some(args.by_ref().collect());
            }
            other if other.starts_with('-') => {
                return Err(CliError::UnknownOption(other.to_string()));
            }
            _ => options.words.get_or_insert_with(Vec::new).push(arg),
        }
    }
    Ok(options)
}

fn render_words(words: &[String], strategies: &[Strategy]) -> bool {
    let rendered = render_all(words, strategies);
    let width = strategies.iter().map(|s| s.name().len()).max().unwrap_or(0);

    for (strategy, output) in &rendered {
        println!("{:>width$}  {}", strategy.name().cyan(), output, width = width);
    }

    let agree = rendered.iter().map(|(_, output)| output).all_equal();
    if agree {
        println!("{}", format!("all {} strategies agree", rendered.len()).green());
    } else {
        println!("{}", "strategies disagree".red().bold());
    }
    agree
}

fn report(outcomes: &[Outcome]) -> bool {
    for (case, group) in &outcomes.iter().chunk_by(|outcome| outcome.case.clone()) {
        let group: Vec<&Outcome> = group.collect();
        let failed: Vec<&&Outcome> = group.iter().filter(|o| !o.passed()).collect();

        if failed.is_empty() {
            println!("{} {}", "PASS".green().bold(), case);
            continue;
        }

        println!("{} {}", "FAIL".red().bold(), case);
        for outcome in failed {
            println!(
                "     {:<15} expected {:?}, got {:?}",
                outcome.strategy.name(),
                outcome.expected,
                outcome.output
            );
        }
    }

    let passed = outcomes.iter().filter(|o| o.passed()).count();
    let summary = format!("{}/{} strategy runs passed", passed, outcomes.len());
    if passed == outcomes.len() {
        println!("{}", summary.green());
        true
    } else {
        println!("{}", summary.red());
        false
    }
}

fn run() -> Result<bool, CliError> {
    let options = parse_args(env::args().skip(1))?;
    if options.help {
        println!("{}", USAGE);
        return Ok(true);
    }

    let strategies = if options.strategies.is_empty() {
        Strategy::ALL.to_vec()
    } else {
        options.strategies.clone()
    };

    if let Some(words) = &options.words {
        info!("rendering {} words", words.len());
        return Ok(render_words(words, &strategies));
    }

    let mut scenario = match &options.file {
        Some(path) => Scenario::load(path)?,
        None => Scenario::builtin(),
    };
    if !options.strategies.is_empty() {
        scenario.strategies = strategies;
    }
    info!(
        "running {} cases with {}",
        scenario.cases.len(),
        scenario.strategies.iter().join(", ")
    );

    Ok(report(&scenario.run()))
}

fn main() {
    env_logger::init_from_env(env_logger::Env::new().filter_or("LISTREV_LOG", "warn"));

    match run() {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(err) => {
            eprintln!("{} {}", "error:".red().bold(), err);
            eprintln!("{}", USAGE);
            process::exit(2);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter().map(|s| s.to_string()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn test_parse_words_after_separator() {
        let options = parse_args(args(&["-s", "stack", "--", "-x", "y"])).unwrap();
        assert_eq!(options.strategies, vec![Strategy::Stack]);
        assert_eq!(options.words, Some(vec!["-x".to_string(), "y".to_string()]));
    }

    #[test]
    fn test_parse_bare_words_and_file() {
        let options = parse_args(args(&["--file", "cases.toml", "a"])).unwrap();
        assert_eq!(options.file, Some(PathBuf::from("cases.toml")));
        assert_eq!(options.words, Some(vec!["a".to_string()]));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            parse_args(args(&["--strategy"])),
            Err(CliError::MissingValue(_))
        ));
        assert!(matches!(
            parse_args(args(&["--strategy", "upside-down"])),
            Err(CliError::Strategy(_))
        ));
        assert!(matches!(
            parse_args(args(&["--verbose"])),
            Err(CliError::UnknownOption(_))
        ));
    }

    #[test]
    fn test_empty_words_agree() {
        assert!(render_words(&[], &Strategy::ALL));
    }
}
