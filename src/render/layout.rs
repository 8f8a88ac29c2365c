//! Force-directed (spring) node placement
//!
//! A Fruchterman-Reingold pass over the state graph. Positions live in the
//! unit square; the raster backend scales them to pixels. Seeded explicitly so
//! the same model renders the same image on every run.

use crate::state_machine::{State, Transition};
use petgraph::stable_graph::{NodeIndex, StableGraph};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;

/// Compute spring layout positions for every node, in `[0, 1] x [0, 1]`
pub fn spring_layout(
    graph: &StableGraph<State, Transition>,
    iterations: u32,
    seed: u64,
) -> HashMap<NodeIndex, (f64, f64)> {
    let nodes: Vec<NodeIndex> = graph.node_indices().collect();
    let n = nodes.len();
    let mut positions: HashMap<NodeIndex, (f64, f64)> = HashMap::with_capacity(n);

    if n == 0 {
        return positions;
    }
    if n == 1 {
        positions.insert(nodes[0], (0.5, 0.5));
        return positions;
    }

    let mut rng = StdRng::seed_from_u64(seed);
    for &idx in &nodes {
        positions.insert(idx, (rng.gen_range(0.0..1.0), rng.gen_range(0.0..1.0)));
    }

    // Optimal pairwise distance for n nodes in the unit square
    let k = (1.0 / n as f64).sqrt();
    let mut temperature = 0.1;
    let cooling = temperature / (iterations as f64 + 1.0);

    for _ in 0..iterations {
        let mut displacement: HashMap<NodeIndex, (f64, f64)> =
            nodes.iter().map(|&idx| (idx, (0.0, 0.0))).collect();

        // Repulsion between every pair
        for (i, &a) in nodes.iter().enumerate() {
            for &b in &nodes[i + 1..] {
                let (dx, dy) = delta(positions[&a], positions[&b]);
                let dist = (dx * dx + dy * dy).sqrt().max(1e-9);
                let force = k * k / dist;
                let (fx, fy) = (dx / dist * force, dy / dist * force);
                let da = displacement.get_mut(&a).unwrap();
                da.0 += fx;
                da.1 += fy;
                let db = displacement.get_mut(&b).unwrap();
                db.0 -= fx;
                db.1 -= fy;
            }
        }

        // Attraction along edges
        for edge in graph.edge_indices() {
            let Some((a, b)) = graph.edge_endpoints(edge) else {
                continue;
            };
            if a == b {
                continue;
            }
            let (dx, dy) = delta(positions[&a], positions[&b]);
            let dist = (dx * dx + dy * dy).sqrt().max(1e-9);
            let force = dist * dist / k;
            let (fx, fy) = (dx / dist * force, dy / dist * force);
            let da = displacement.get_mut(&a).unwrap();
            da.0 -= fx;
            da.1 -= fy;
            let db = displacement.get_mut(&b).unwrap();
            db.0 += fx;
            db.1 += fy;
        }

        // Move, capped by the current temperature, clamped to the unit square
        for &idx in &nodes {
            let (dx, dy) = displacement[&idx];
            let len = (dx * dx + dy * dy).sqrt().max(1e-9);
            let step = len.min(temperature);
            let pos = positions.get_mut(&idx).unwrap();
            pos.0 = (pos.0 + dx / len * step).clamp(0.0, 1.0);
            pos.1 = (pos.1 + dy / len * step).clamp(0.0, 1.0);
        }

        temperature -= cooling;
    }

    positions
}

fn delta(a: (f64, f64), b: (f64, f64)) -> (f64, f64) {
    (a.0 - b.0, a.1 - b.1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state_machine::State;

    fn two_node_graph() -> StableGraph<State, Transition> {
        let mut graph = StableGraph::new();
        let a = graph.add_node(State::new("A"));
        let b = graph.add_node(State::new("B"));
        graph.add_edge(a, b, Transition::new("A", "B"));
        graph
    }

    #[test]
    fn test_empty_graph_has_no_positions() {
        let graph: StableGraph<State, Transition> = StableGraph::new();
        assert!(spring_layout(&graph, 50, 0).is_empty());
    }

    #[test]
    fn test_single_node_is_centered() {
        let mut graph = StableGraph::new();
        let idx = graph.add_node(State::new("A"));
        let positions = spring_layout(&graph, 50, 0);
        assert_eq!(positions[&idx], (0.5, 0.5));
    }

    #[test]
    fn test_positions_stay_in_unit_square() {
        let graph = two_node_graph();
        for (_, (x, y)) in spring_layout(&graph, 100, 7) {
            assert!((0.0..=1.0).contains(&x));
            assert!((0.0..=1.0).contains(&y));
        }
    }

    #[test]
    fn test_same_seed_same_layout() {
        let graph = two_node_graph();
        let first = spring_layout(&graph, 100, 42);
        let second = spring_layout(&graph, 100, 42);
        assert_eq!(first, second);
    }

    #[test]
    fn test_nodes_do_not_collapse() {
        let graph = two_node_graph();
        let positions = spring_layout(&graph, 100, 3);
        let values: Vec<(f64, f64)> = positions.values().copied().collect();
        let (dx, dy) = (values[0].0 - values[1].0, values[0].1 - values[1].1);
        assert!((dx * dx + dy * dy).sqrt() > 1e-3);
    }
}
