//! Graph rendering backends
//!
//! Two output paths: a PNG raster drawn with a spring layout, and Graphviz
//! dot text. The dot file encodes the graph structure, not the rendered
//! picture, so standard layout tools can re-process it.

use crate::config::RenderConfig;
use crate::error::{Error, Result};
use crate::state_machine::{StateClass, StateGraph};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;

pub mod layout;

/// Fixed layout seed so a given model always renders the same image
const LAYOUT_SEED: u64 = 0x9e3779b97f4a7c15;

/// Pixel margin kept clear around the drawing
const MARGIN: f64 = 60.0;

/// Serialize the graph as a Graphviz dot file
pub fn write_dot(graph: &StateGraph, path: &Path) -> Result<()> {
    std::fs::write(path, graph.to_dot())?;
    tracing::debug!("Wrote dot output to {:?}", path);
    Ok(())
}

/// Rasterize the graph to a PNG image.
///
/// Nodes are circles whose area scales with `(degree + 1) * node_size_scale`,
/// filled by state class, labeled below; edges are arrowed line segments.
pub fn render_png(graph: &StateGraph, path: &Path, config: &RenderConfig) -> Result<()> {
    let (width, height) = (config.width, config.height);
    let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
    root.fill(&WHITE).map_err(|e| Error::render(e.to_string()))?;

    let positions = layout::spring_layout(&graph.graph, config.layout_iterations, LAYOUT_SEED);

    let to_pixels = |(x, y): (f64, f64)| -> (f64, f64) {
        (
            MARGIN + x * (width as f64 - 2.0 * MARGIN),
            MARGIN + y * (height as f64 - 2.0 * MARGIN),
        )
    };
    let radius = |idx| -> f64 {
        let area = (graph.degree(idx) + 1) as f64 * config.node_size_scale;
        (area / std::f64::consts::PI).sqrt()
    };

    // Edges first so node circles sit on top of the line ends
    for edge_idx in graph.graph.edge_indices() {
        let Some((from_idx, to_idx)) = graph.graph.edge_endpoints(edge_idx) else {
            continue;
        };
        let from = to_pixels(positions[&from_idx]);
        let to = to_pixels(positions[&to_idx]);

        if from_idx == to_idx {
            // Self loop: a small circle perched on top of the node
            let r = radius(from_idx);
            let center = (from.0 as i32, (from.1 - r - 10.0) as i32);
            root.draw(&Circle::new(center, 10, BLACK.stroke_width(1)))
                .map_err(|e| Error::render(e.to_string()))?;
            continue;
        }

        let (dx, dy) = (to.0 - from.0, to.1 - from.1);
        let len = (dx * dx + dy * dy).sqrt().max(1e-9);
        let (ux, uy) = (dx / len, dy / len);

        // Trim the segment to the circle boundaries
        let start = (from.0 + ux * radius(from_idx), from.1 + uy * radius(from_idx));
        let end = (to.0 - ux * radius(to_idx), to.1 - uy * radius(to_idx));

        root.draw(&PathElement::new(
            vec![
                (start.0 as i32, start.1 as i32),
                (end.0 as i32, end.1 as i32),
            ],
            BLACK.stroke_width(1),
        ))
        .map_err(|e| Error::render(e.to_string()))?;

        // Arrowhead at the destination
        let (px, py) = (-uy, ux);
        let tip = (end.0 as i32, end.1 as i32);
        let left = (
            (end.0 - ux * 10.0 + px * 5.0) as i32,
            (end.1 - uy * 10.0 + py * 5.0) as i32,
        );
        let right = (
            (end.0 - ux * 10.0 - px * 5.0) as i32,
            (end.1 - uy * 10.0 - py * 5.0) as i32,
        );
        root.draw(&Polygon::new(vec![tip, left, right], BLACK.filled()))
            .map_err(|e| Error::render(e.to_string()))?;
    }

    let label_style = TextStyle::from(("sans-serif", 16).into_font())
        .pos(Pos::new(HPos::Center, VPos::Top))
        .color(&BLACK);

    for idx in graph.graph.node_indices() {
        let Some(state) = graph.graph.node_weight(idx) else {
            continue;
        };
        let (x, y) = to_pixels(positions[&idx]);
        let r = radius(idx);
        let center = (x as i32, y as i32);

        root.draw(&Circle::new(center, r as i32, fill_color(state.class).filled()))
            .map_err(|e| Error::render(e.to_string()))?;
        root.draw(&Circle::new(center, r as i32, BLACK.stroke_width(1)))
            .map_err(|e| Error::render(e.to_string()))?;
        root.draw(&Text::new(
            state.name.clone(),
            (x as i32, (y + r + 4.0) as i32),
            label_style.clone(),
        ))
        .map_err(|e| Error::render(e.to_string()))?;
    }

    root.present().map_err(|e| Error::render(e.to_string()))?;
    tracing::debug!("Wrote PNG output to {:?}", path);
    Ok(())
}

fn fill_color(class: StateClass) -> RGBColor {
    match class {
        StateClass::Initial => RGBColor(135, 206, 250),
        StateClass::Declared => RGBColor(144, 238, 144),
        StateClass::Referenced => RGBColor(255, 165, 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::Document;
    use crate::state_machine;

    fn sample_graph() -> StateGraph {
        let doc = Document::parse_str(
            r#"<Peach xmlns="http://peachfuzzer.com/2012/Peach">
                 <StateModel initialState="Start">
                   <State name="Start">
                     <Action type="changeState" ref="Mid"/>
                   </State>
                   <State name="Mid"/>
                 </StateModel>
               </Peach>"#,
        )
        .unwrap();
        state_machine::build_state_graph(&doc, crate::PEACH_NAMESPACE).unwrap()
    }

    #[test]
    fn test_write_dot_round_trips_nodes_and_edges() {
        let graph = sample_graph();
        let path = std::env::temp_dir().join("pit2graph-test-out.dot");
        write_dot(&graph, &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert!(contents.contains("\"Start\""));
        assert!(contents.contains("\"Mid\""));
        assert!(contents.contains("\"Start\" -> \"Mid\";"));
    }

    #[test]
    fn test_write_dot_unwritable_path_is_an_error() {
        let graph = sample_graph();
        let err = write_dot(&graph, Path::new("/no/such/dir/out.dot")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
