//! Scenario files for the `listrev` driver.
//!
//! A scenario is a TOML document listing input sequences with their expected
//! reversed rendering, plus the strategies to run them under:
//!
//! ```toml
//! strategies = ["stack", "recursive"]
//!
//! [[case]]
//! name = "pair"
//! input = ["delak", "bolek"]
//! expected = "bolek.delak"
//! ```
//!
//! `strategies` may be omitted, in which case every strategy runs.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::debug;
use serde::Deserialize;
use thiserror::Error;

use crate::list::{List, ListHolder};
use crate::node::NodeArena;
use crate::reverse::{Strategy, UnknownStrategy};

#[derive(Error, Debug)]
pub enum ScenarioError {
    #[error("failed to read scenario file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse scenario: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    UnknownStrategy(#[from] UnknownStrategy),

    #[error("scenario contains no cases")]
    EmptyScenario,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Case {
    #[serde(default)]
    pub name: Option<String>,
    pub input: Vec<String>,
    pub expected: String,
}

impl Case {
    pub fn new<I, S>(input: I, expected: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Case {
            name: None,
            input: input.into_iter().map(Into::into).collect(),
            expected: expected.into(),
        }
    }

    pub fn label(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None if self.input.is_empty() => "<empty>".to_string(),
            None => self.input.join(" "),
        }
    }
}

fn all_strategies() -> Vec<Strategy> {
    Strategy::ALL.to_vec()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    #[serde(default = "all_strategies")]
    pub strategies: Vec<Strategy>,
    #[serde(rename = "case", default)]
    pub cases: Vec<Case>,
}

impl Scenario {
    /// The reference table: empty input, a single empty name, one, two and
    /// five names.
    pub fn builtin() -> Self {
        Scenario {
            strategies: all_strategies(),
            cases: vec![
                Case::new(Vec::<String>::new(), ""),
                Case::new([""], ""),
                Case::new(["delak"], "delak"),
                Case::new(["delak", "bolek"], "bolek.delak"),
                Case::new(
                    ["delak", "bolek", "patryk", "monika", "milosz"],
                    "milosz.monika.patryk.bolek.delak",
                ),
            ],
        }
    }

    pub fn parse(text: &str) -> Result<Self, ScenarioError> {
        let mut scenario: Scenario = toml::from_str(text)?;
        if scenario.cases.is_empty() {
            return Err(ScenarioError::EmptyScenario);
        }
        if scenario.strategies.is_empty() {
            scenario.strategies = all_strategies();
        }
        Ok(scenario)
    }

    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        let text = fs::read_to_string(path).map_err(|source| ScenarioError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("loaded scenario from {}", path.display());
        Self::parse(&text)
    }

    pub fn run(&self) -> Vec<Outcome> {
        self.cases
            .iter()
            .flat_map(|case| run_case(case, &self.strategies))
            .collect()
    }
}

/// Result of one case under one strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub case: String,
    pub strategy: Strategy,
    pub output: String,
    pub expected: String,
}

impl Outcome {
    pub fn passed(&self) -> bool {
        self.output == self.expected
    }
}

/// Builds an identifier list from `words` and renders it under each strategy.
///
/// Every strategy gets its own copy of the list, so the in-place strategy
/// cannot disturb the ones that run after it.
pub fn render_all(words: &[String], strategies: &[Strategy]) -> Vec<(Strategy, String)> {
    let arena = NodeArena::new();
    let mut source = List::new();
    let mut holder = ListHolder::new(&mut source);
    for word in words {
        holder.push_back(arena.make_ident(word.as_str()));
    }

    strategies
        .iter()
        .map(|&strategy| {
            let mut working = holder.copy(|cell| cell.payload());
            let mut guard = ListHolder::new(&mut working);
            let output = strategy.render(guard.list());
            debug!("{} rendered {} cells as {:?}", strategy, words.len(), output);
            (strategy, output)
        })
        .collect()
}

pub fn run_case(case: &Case, strategies: &[Strategy]) -> Vec<Outcome> {
    let label = case.label();
    debug!("running case {:?} under {} strategies", label, strategies.len());
    render_all(&case.input, strategies)
        .into_iter()
        .map(|(strategy, output)| Outcome {
            case: label.clone(),
            strategy,
            output,
            expected: case.expected.clone(),
        })
        .collect()
}
