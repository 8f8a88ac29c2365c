//! Transition representation

use crate::state_machine::StateId;
use serde::{Deserialize, Serialize};

/// A changeState transition between two named states
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transition {
    pub from_state: StateId,
    pub to_state: StateId,
}

impl Transition {
    pub fn new(from_state: impl Into<StateId>, to_state: impl Into<StateId>) -> Self {
        Self {
            from_state: from_state.into(),
            to_state: to_state.into(),
        }
    }
}
