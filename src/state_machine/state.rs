//! State representation

use serde::{Deserialize, Serialize};

pub type StateId = String;

/// A named state in the state model graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct State {
    pub name: StateId,
    pub class: StateClass,
}

/// State classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum StateClass {
    /// The state named by the model's initialState attribute
    Initial,
    /// A state declared with its own State element
    #[default]
    Declared,
    /// A transition target with no matching State element
    Referenced,
}

impl StateClass {
    pub fn color(&self) -> &'static str {
        match self {
            StateClass::Initial => "lightblue",
            StateClass::Declared => "lightgreen",
            StateClass::Referenced => "orange",
        }
    }
}

impl State {
    pub fn new(name: impl Into<StateId>) -> Self {
        Self {
            name: name.into(),
            class: StateClass::default(),
        }
    }

    pub fn with_class(mut self, class: StateClass) -> Self {
        self.class = class;
        self
    }
}
