//! State machine module - Extract and build state transition graphs

use crate::loader::Document;
use crate::{Error, Result};

pub mod graph;
pub mod model;
pub mod state;
pub mod transition;

// Re-export key types
pub use graph::{GraphStats, StateGraph};
pub use state::{State, StateClass, StateId};
pub use transition::Transition;

/// Build the state graph from a parsed pit document.
///
/// Fails with [`Error::NoStateModel`] when no StateModel element with an
/// initialState attribute exists under the given namespace.
pub fn build_state_graph(document: &Document, namespace: &str) -> Result<StateGraph> {
    let state_model = model::find_state_model(&document.root, namespace)
        .ok_or_else(|| Error::no_state_model(namespace))?;
    StateGraph::build_from_model(state_model, namespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_state_model_is_an_explicit_error() {
        let doc = Document::parse_str(
            r#"<Peach xmlns="http://peachfuzzer.com/2012/Peach"><DataModel/></Peach>"#,
        )
        .unwrap();
        let err = build_state_graph(&doc, crate::PEACH_NAMESPACE).unwrap_err();
        assert!(matches!(err, Error::NoStateModel { .. }));
    }
}
