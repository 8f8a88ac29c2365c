//! Peach Pit StateModel Visualizer
//!
//! Renders the state machine declared in a Peach pit file as a directed graph.
//!
//! This library provides functionality for:
//! - Loading a pit file into a navigable XML element tree
//! - Extracting the StateModel, its initial state, and its changeState transitions
//! - Building a directed graph of state names and transitions
//! - Rendering the graph as a PNG image (spring layout) or a Graphviz dot file

pub mod cli;
pub mod config;
pub mod error;
pub mod loader;
pub mod render;
pub mod state_machine;

pub use config::Config;
pub use error::{Error, Result};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// The namespace URI of the standard Peach pit schema
pub const PEACH_NAMESPACE: &str = "http://peachfuzzer.com/2012/Peach";

/// Initialize logging with the given log level
pub fn init_logging(level: &str) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
