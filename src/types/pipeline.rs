use std::fmt;

use clap::ValueEnum;
use serde::Deserialize;

/// A board column.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Pipeline {
    pub id: String,
    pub name: String,
}

/// A repository board; pipelines are kept in board order.
#[derive(Deserialize, Debug, Default)]
pub struct Board {
    #[serde(default)]
    pub pipelines: Vec<Pipeline>,
}

/// Where cards should go: a known pipeline id, or a name to look up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineTarget {
    Id(String),
    Name(String),
}

impl PipelineTarget {
    /// An id, when present, takes precedence over a name.
    pub fn from_inputs(id: Option<String>, name: Option<String>) -> Option<Self> {
        id.map(Self::Id).or_else(|| name.map(Self::Name))
    }
}

/// How a pipeline name input is compared against board pipeline names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum MatchMode {
    /// Board name contains the input (case-sensitive)
    #[default]
    Substring,
    /// Board name equals the input
    Exact,
}

impl MatchMode {
    pub fn matches(self, candidate: &str, wanted: &str) -> bool {
        match self {
            Self::Substring => candidate.contains(wanted),
            Self::Exact => candidate == wanted,
        }
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Substring => write!(f, "substring"),
            Self::Exact => write!(f, "exact"),
        }
    }
}

impl Board {
    /// First pipeline, in board order, whose name matches `name`.
    pub fn find(&self, name: &str, mode: MatchMode) -> Option<&Pipeline> {
        self.pipelines.iter().find(|p| mode.matches(&p.name, name))
    }
}
