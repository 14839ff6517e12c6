pub mod issues;
pub mod moves;
pub mod pipelines;
pub mod run;
