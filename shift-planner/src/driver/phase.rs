use std::fmt::Display;
use std::fmt::Formatter;

use log::debug;

use super::SolveStatus;
use crate::error::SchedulerError;
use crate::error::SchedulerResult;

/// The lifecycle of one solve.
///
/// `Built -> Solving -> Finished(Optimal | Feasible) -> Formatted`, or
/// `Built -> Solving -> Finished(Infeasible | Timeout) -> InsightsOnly`. No other transitions
/// exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolvePhase {
    Built,
    Solving,
    Finished(SolveStatus),
    Formatted,
    InsightsOnly,
}

impl SolvePhase {
    pub fn can_advance_to(self, next: SolvePhase) -> bool {
        match (self, next) {
            (SolvePhase::Built, SolvePhase::Solving) => true,
            (SolvePhase::Solving, SolvePhase::Finished(_)) => true,
            (SolvePhase::Finished(status), SolvePhase::Formatted) => status.has_solution(),
            (SolvePhase::Finished(status), SolvePhase::InsightsOnly) => !status.has_solution(),
            _ => false,
        }
    }

    pub(crate) fn advance(&mut self, next: SolvePhase) -> SchedulerResult<()> {
        if !self.can_advance_to(next) {
            return Err(SchedulerError::InvalidTransition {
                from: *self,
                to: next,
            });
        }

        debug!("Solve phase {self} -> {next}");
        *self = next;
        Ok(())
    }

    /// The phase after the result has been handed to the formatter or the insights generator.
    pub(crate) fn concluded(status: SolveStatus) -> SolvePhase {
        if status.has_solution() {
            SolvePhase::Formatted
        } else {
            SolvePhase::InsightsOnly
        }
    }
}

impl Display for SolvePhase {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SolvePhase::Built => write!(f, "BUILT"),
            SolvePhase::Solving => write!(f, "SOLVING"),
            SolvePhase::Finished(status) => write!(f, "{status}"),
            SolvePhase::Formatted => write!(f, "FORMATTED"),
            SolvePhase::InsightsOnly => write!(f, "INSIGHTS-ONLY"),
        }
    }
}
