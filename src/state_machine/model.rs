//! State-model extraction queries
//!
//! All lookups are qualified by the pit namespace URI and guarded on attribute
//! presence: an element missing an expected attribute is skipped, never an
//! error. Only the complete absence of a usable StateModel is fatal, and that
//! decision belongs to the caller.

use crate::loader::Element;

/// Find the first StateModel element (in document order) that carries an
/// `initialState` attribute. Returns `None` when no element qualifies.
pub fn find_state_model<'a>(root: &'a Element, namespace: &str) -> Option<&'a Element> {
    root.descendants()
        .find(|e| e.is(namespace, "StateModel") && e.attr("initialState").is_some())
}

/// The declared initial state name, or the empty string if absent
pub fn initial_state_name(element: &Element) -> &str {
    element.attr("initialState").unwrap_or("")
}

/// Find a direct State child by its `name` attribute
pub fn find_state_by_name<'a>(
    element: &'a Element,
    namespace: &str,
    state_name: &str,
) -> Option<&'a Element> {
    element
        .children_named(namespace, "State")
        .find(|s| s.attr("name") == Some(state_name))
}

/// Destination names of this state's changeState actions, in document order
pub fn find_transitions<'a>(element: &'a Element, namespace: &str) -> Vec<&'a str> {
    element
        .children_named(namespace, "Action")
        .filter(|a| a.attr("type") == Some("changeState"))
        .filter_map(|a| a.attr("ref"))
        .collect()
}
