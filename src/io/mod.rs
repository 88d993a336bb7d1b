pub mod atomic;
pub mod input;
pub mod output;

pub use atomic::{commit_all, stage, write_atomic, StagedArtifact};
pub use input::*;
pub use output::*;
