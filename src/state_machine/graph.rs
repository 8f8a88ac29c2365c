//! Directed graph of state names and changeState transitions

use crate::Result;
use crate::loader::Element;
use crate::state_machine::{State, StateClass, StateId, Transition, model};
use petgraph::Direction;
use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableGraph};
use std::collections::HashMap;

/// A directed graph built from a pit StateModel.
///
/// Nodes are state names; edges are changeState transitions. A transition
/// target with no declared State element still becomes a node, so dangling
/// references stay visible in the output. Duplicate transitions between the
/// same pair of states collapse to a single edge.
#[derive(Debug)]
pub struct StateGraph {
    /// The underlying graph structure
    pub graph: StableGraph<State, Transition>,

    /// Lookup table mapping state names to their graph indices.
    /// Keeps node insertion idempotent: a name seen as both a declared state
    /// and a transition target maps to exactly one node.
    pub node_index: HashMap<StateId, NodeIndex>,

    /// The model's declared initial state name, when non-empty
    pub initial_state: Option<String>,
}

impl StateGraph {
    pub fn new(initial_state: Option<String>) -> Self {
        Self {
            graph: StableGraph::new(),
            node_index: HashMap::new(),
            initial_state,
        }
    }

    /// Adds a state node if the name is not yet present; returns its index.
    ///
    /// A node first seen as a transition target is classified `Referenced`;
    /// a later State declaration for the same name upgrades it to `Declared`.
    pub fn ensure_state(&mut self, name: &str, declared: bool) -> NodeIndex {
        if let Some(&idx) = self.node_index.get(name) {
            if declared
                && let Some(state) = self.graph.node_weight_mut(idx)
                && state.class == StateClass::Referenced
            {
                state.class = StateClass::Declared;
            }
            return idx;
        }

        let class = if declared {
            StateClass::Declared
        } else {
            StateClass::Referenced
        };
        let idx = self.graph.add_node(State::new(name).with_class(class));
        self.node_index.insert(name.to_string(), idx);
        idx
    }

    /// Adds a transition edge, collapsing duplicates between the same pair
    pub fn add_transition(&mut self, from: &str, to: &str) -> Option<EdgeIndex> {
        let (&from_idx, &to_idx) = (self.node_index.get(from)?, self.node_index.get(to)?);
        if let Some(existing) = self.graph.find_edge(from_idx, to_idx) {
            tracing::debug!("Collapsing duplicate transition {}->{}", from, to);
            return Some(existing);
        }
        Some(self.graph.add_edge(from_idx, to_idx, Transition::new(from, to)))
    }

    /// Build the graph from a StateModel element.
    ///
    /// For every direct State child, a node keyed by its name; for every
    /// changeState action, a node for the destination plus a directed edge.
    /// Each discovered edge is echoed to stdout as `<source>-><destination>`,
    /// matching the trace this tool has always emitted.
    pub fn build_from_model(state_model: &Element, namespace: &str) -> Result<Self> {
        let initial = model::initial_state_name(state_model);
        let mut graph = Self::new((!initial.is_empty()).then(|| initial.to_string()));

        for state in state_model.children_named(namespace, "State") {
            let Some(name) = state.attr("name") else {
                tracing::warn!("Skipping State element without a name attribute");
                continue;
            };
            graph.ensure_state(name, true);
            for target in model::find_transitions(state, namespace) {
                println!("{}->{}", name, target);
                graph.ensure_state(target, false);
                graph.add_transition(name, target);
            }
        }

        graph.classify_initial_state();
        Ok(graph)
    }

    /// Mark the declared initial state's node, if one exists for the name
    fn classify_initial_state(&mut self) {
        if let Some(initial) = self.initial_state.clone()
            && let Some(&idx) = self.node_index.get(&initial)
            && let Some(state) = self.graph.node_weight_mut(idx)
        {
            state.class = StateClass::Initial;
        }
    }

    /// Get a state by name
    pub fn get_state(&self, name: &str) -> Option<&State> {
        self.node_index
            .get(name)
            .and_then(|&idx| self.graph.node_weight(idx))
    }

    /// All state names in the graph
    pub fn state_names(&self) -> Vec<&str> {
        self.graph
            .node_weights()
            .map(|s| s.name.as_str())
            .collect()
    }

    /// Total in+out edge count of a node
    pub fn degree(&self, idx: NodeIndex) -> usize {
        self.graph.edges_directed(idx, Direction::Incoming).count()
            + self.graph.edges_directed(idx, Direction::Outgoing).count()
    }

    /// Find all terminal states (no outgoing edges)
    pub fn find_terminal_states(&self) -> Vec<&State> {
        self.graph
            .node_indices()
            .filter(|&idx| self.graph.edges_directed(idx, Direction::Outgoing).count() == 0)
            .filter_map(|idx| self.graph.node_weight(idx))
            .collect()
    }

    /// Export the graph as Graphviz dot text
    pub fn to_dot(&self) -> String {
        let mut dot = "digraph StateModel {\n".to_string();
        dot.push_str("  rankdir=LR;\n");
        dot.push_str("  node [shape=box, style=filled];\n\n");

        let mut nodes: Vec<&State> = self.graph.node_weights().collect();
        nodes.sort_by(|a, b| a.name.cmp(&b.name));
        for state in nodes {
            let shape = if state.class == StateClass::Initial {
                ", shape=doublecircle"
            } else {
                ""
            };
            dot.push_str(&format!(
                "  \"{}\" [fillcolor=\"{}\"{}];\n",
                escape(&state.name),
                state.class.color(),
                shape
            ));
        }

        dot.push('\n');

        for edge_idx in self.graph.edge_indices() {
            if let Some(transition) = self.graph.edge_weight(edge_idx) {
                dot.push_str(&format!(
                    "  \"{}\" -> \"{}\";\n",
                    escape(&transition.from_state),
                    escape(&transition.to_state)
                ));
            }
        }

        dot.push_str("}\n");
        dot
    }

    /// Get graph statistics
    pub fn stats(&self) -> GraphStats {
        GraphStats {
            total_states: self.graph.node_count(),
            total_transitions: self.graph.edge_count(),
            dangling_states: self
                .graph
                .node_weights()
                .filter(|s| s.class == StateClass::Referenced)
                .count(),
            terminal_states: self.find_terminal_states().len(),
        }
    }
}

fn escape(name: &str) -> String {
    name.replace('\\', "\\\\").replace('"', "\\\"")
}

#[derive(Debug, Clone)]
pub struct GraphStats {
    pub total_states: usize,
    pub total_transitions: usize,
    pub dangling_states: usize,
    pub terminal_states: usize,
}
