use serde::Serialize;

use crate::error::MoverError;

/// Placement of a moved card within its new pipeline.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Top,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRequest {
    pub repository_id: String,
    pub workspace_id: String,
    pub issue_number: u64,
    pub pipeline_id: String,
    pub position: Position,
}

#[derive(Serialize)]
pub struct MoveBody<'a> {
    pub pipeline_id: &'a str,
    pub position: Position,
}

impl MoveRequest {
    pub fn body(&self) -> MoveBody<'_> {
        MoveBody {
            pipeline_id: &self.pipeline_id,
            position: self.position,
        }
    }
}

/// Result of one card move.
#[derive(Debug)]
pub struct MoveOutcome {
    pub issue_number: u64,
    pub repository_id: Option<String>,
    pub pipeline_id: String,
    pub result: Result<u16, MoverError>,
}

impl MoveOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}
