mod issue;
mod moves;
mod pipeline;

pub use issue::LinkedIssue;
pub use moves::{MoveOutcome, MoveRequest, Position};
pub use pipeline::{Board, MatchMode, PipelineTarget};
