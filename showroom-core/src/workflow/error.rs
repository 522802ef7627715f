use std::fmt;

use thiserror::Error;

/// The three step-changing operations a caller can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Advance,
    Retreat,
    Complete,
}

impl fmt::Display for Transition {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(match self {
            Self::Advance => "advance",
            Self::Retreat => "go back",
            Self::Complete => "complete",
        })
    }
}

/// Rejected workflow operations. Every variant leaves the workflow exactly
/// as it was before the call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WorkflowError {
    #[error("cannot {transition} from step {step}: {reason}")]
    InvalidTransition {
        transition: Transition,
        step: usize,
        reason: &'static str,
    },

    #[error("workflow has already been completed")]
    WorkflowTerminated,

    #[error("step {step} does not exist (steps are 1..={total})")]
    UnknownStep { step: usize, total: usize },
}
