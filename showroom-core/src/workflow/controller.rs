//! Step-gated workflow controller.
//!
//! A [`Workflow`] walks through steps `1..=N` one at a time. Which steps
//! exist, when each one may be left, and what the finished flow produces
//! are decided by its [`StepPolicy`]; the controller only enforces order.
//!
//! Every mutating call either applies completely or returns an error and
//! leaves the state untouched.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, info, warn};

use super::error::{Transition, WorkflowError};
use crate::notify::Notification;

/// Field values entered so far, keyed by step and then by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StepFields {
    values: BTreeMap<usize, BTreeMap<String, String>>,
}

impl StepFields {
    /// Raw stored value, exactly as entered.
    pub fn get(
        &self,
        step: usize,
        name: &str,
    ) -> Option<&str> {
        self.values
            .get(&step)
            .and_then(|fields| fields.get(name))
            .map(String::as_str)
    }

    /// Trimmed value, or `None` when the field is missing or blank.
    pub fn present(
        &self,
        step: usize,
        name: &str,
    ) -> Option<&str> {
        self.get(step, name)
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }

    /// Every stored value as `(step, name, value)`, ordered by step then name.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str, &str)> {
        self.values.iter().flat_map(|(step, fields)| {
            fields
                .iter()
                .map(move |(name, value)| (*step, name.as_str(), value.as_str()))
        })
    }

    pub fn is_empty(&self) -> bool {
        self.values.values().all(BTreeMap::is_empty)
    }

    fn set(
        &mut self,
        step: usize,
        name: String,
        value: String,
    ) {
        self.values.entry(step).or_default().insert(name, value);
    }
}

/// Step table for one kind of flow.
pub trait StepPolicy {
    /// Snapshot produced by a completed flow.
    type Summary;

    /// Number of steps `N`. Steps are numbered from 1.
    fn total_steps(&self) -> usize;

    /// Whether `step` may be left given the values entered so far.
    fn is_ready(
        &self,
        step: usize,
        fields: &StepFields,
    ) -> bool;

    /// Builds the final snapshot. Called only once every step is ready;
    /// `None` means the fields cannot describe a finished flow.
    fn summarize(
        &self,
        fields: &StepFields,
    ) -> Option<Self::Summary>;

    /// Success message shown after completion.
    fn completion_notice(
        &self,
        summary: &Self::Summary,
    ) -> Notification;
}

/// Progress record for one in-progress flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkflowState {
    current_step: usize,
    fields: StepFields,
    terminal: bool,
}

impl WorkflowState {
    fn new() -> Self {
        Self {
            current_step: 1,
            fields: StepFields::default(),
            terminal: false,
        }
    }

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    pub fn fields(&self) -> &StepFields {
        &self.fields
    }

    pub fn is_terminal(&self) -> bool {
        self.terminal
    }
}

/// Result of a successful [`Workflow::complete`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Completed<S> {
    pub summary: S,
    /// Every field recorded during the flow.
    pub fields: StepFields,
    pub notification: Notification,
}

/// A bounded-step wizard driven by a [`StepPolicy`].
#[derive(Debug, Clone)]
pub struct Workflow<P: StepPolicy> {
    policy: P,
    state: WorkflowState,
}

impl<P: StepPolicy> Workflow<P> {
    /// Starts a fresh flow on step 1 with no fields recorded.
    pub fn new(policy: P) -> Self {
        Self {
            policy,
            state: WorkflowState::new(),
        }
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    pub fn current_step(&self) -> usize {
        self.state.current_step
    }

    pub fn total_steps(&self) -> usize {
        self.policy.total_steps().max(1)
    }

    pub fn is_final_step(&self) -> bool {
        self.state.current_step == self.total_steps()
    }

    pub fn is_terminal(&self) -> bool {
        self.state.terminal
    }

    pub fn field(
        &self,
        step: usize,
        name: &str,
    ) -> Option<&str> {
        self.state.fields.get(step, name)
    }

    pub fn fields(&self) -> &StepFields {
        &self.state.fields
    }

    /// Records `value` for a field of `step`. Values are not validated here;
    /// readiness is only judged when the user tries to move on.
    pub fn set_field(
        &mut self,
        step: usize,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), WorkflowError> {
        self.ensure_active()?;
        if !(1..=self.total_steps()).contains(&step) {
            return Err(WorkflowError::UnknownStep {
                step,
                total: self.total_steps(),
            });
        }

        self.state.fields.set(step, name.into(), value.into());
        Ok(())
    }

    /// Readiness of the current step. Always false once completed.
    pub fn can_advance(&self) -> bool {
        !self.state.terminal && self.step_ready(self.state.current_step)
    }

    /// Moves to the next step. Returns the new step number.
    pub fn advance(&mut self) -> Result<usize, WorkflowError> {
        self.ensure_active()?;
        let step = self.state.current_step;

        if self.is_final_step() {
            return Err(self.reject(Transition::Advance, "already at the final step"));
        }
        if !self.step_ready(step) {
            return Err(self.reject(Transition::Advance, "this step is not complete"));
        }

        self.state.current_step = step + 1;
        debug!(from = step, to = step + 1, "workflow advanced");
        Ok(self.state.current_step)
    }

    /// Moves back one step, keeping every value entered so far.
    pub fn retreat(&mut self) -> Result<usize, WorkflowError> {
        self.ensure_active()?;
        let step = self.state.current_step;

        if step == 1 {
            return Err(self.reject(Transition::Retreat, "already at the first step"));
        }

        self.state.current_step = step - 1;
        debug!(from = step, to = step - 1, "workflow retreated");
        Ok(self.state.current_step)
    }

    /// Finishes the flow from its final step and returns the summary.
    ///
    /// Every step's readiness is checked again so that edits made to
    /// earlier steps after leaving them cannot slip through.
    pub fn complete(&mut self) -> Result<Completed<P::Summary>, WorkflowError> {
        self.ensure_active()?;

        if !self.is_final_step() {
            return Err(self.reject(Transition::Complete, "only the final step can complete"));
        }
        if !(1..=self.total_steps()).all(|step| self.step_ready(step)) {
            return Err(self.reject(Transition::Complete, "an earlier step is no longer complete"));
        }

        let summary = self
            .policy
            .summarize(&self.state.fields)
            .ok_or_else(|| self.reject(Transition::Complete, "the entered details are incomplete"))?;
        let notification = self.policy.completion_notice(&summary);

        self.state.terminal = true;
        info!(
            steps = self.total_steps(),
            title = %notification.title,
            "workflow completed"
        );

        Ok(Completed {
            summary,
            fields: self.state.fields.clone(),
            notification,
        })
    }

    fn step_ready(
        &self,
        step: usize,
    ) -> bool {
        self.policy.is_ready(step, &self.state.fields)
    }

    fn ensure_active(&self) -> Result<(), WorkflowError> {
        if self.state.terminal {
            warn!("operation rejected on completed workflow");
            return Err(WorkflowError::WorkflowTerminated);
        }
        Ok(())
    }

    fn reject(
        &self,
        transition: Transition,
        reason: &'static str,
    ) -> WorkflowError {
        warn!(step = self.state.current_step, %transition, reason, "transition rejected");
        WorkflowError::InvalidTransition {
            transition,
            step: self.state.current_step,
            reason,
        }
    }
}
