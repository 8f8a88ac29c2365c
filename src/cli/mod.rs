//! CLI module
//!
//! This module defines the command-line interface using clap and implements
//! the processing pipeline: load the pit file, extract the state model, build
//! the graph, render the output.

use crate::{Config, Result, loader::Document, render, state_machine};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Peach Pit StateModel Visualizer CLI
#[derive(Parser, Debug)]
#[command(name = "pit2graph")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Pit file containing the StateModel
    pub pitfile: PathBuf,

    /// Destination file format
    #[arg(short = 'f', long, value_enum, default_value = "png")]
    pub outformat: OutFormat,

    /// Destination filename (defaults to the pit file stem plus the format extension)
    #[arg(short, long)]
    pub outfile: Option<PathBuf>,

    /// Pit file namespace URI (overrides the configured default)
    #[arg(short, long)]
    pub namespace: Option<String>,

    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Output format types
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutFormat {
    /// Raster image with spring layout
    Png,
    /// Graphviz dot text
    Dot,
}

impl OutFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutFormat::Png => "png",
            OutFormat::Dot => "dot",
        }
    }
}

/// Execute the pipeline for the parsed arguments
pub fn execute(args: Cli, config: Config) -> Result<()> {
    crate::ensure!(
        config.render.width > 0 && config.render.height > 0,
        "render dimensions must be positive, got {}x{}",
        config.render.width,
        config.render.height
    );

    let namespace = args
        .namespace
        .unwrap_or_else(|| config.default.namespace.clone());
    tracing::debug!("Using namespace {:?}", namespace);

    tracing::info!("Loading pit file {:?}", args.pitfile);
    let document = Document::from_file(&args.pitfile)?;

    let graph = state_machine::build_state_graph(&document, &namespace)?;
    let stats = graph.stats();
    tracing::info!(
        "Built graph: {} states, {} transitions ({} dangling, {} terminal)",
        stats.total_states,
        stats.total_transitions,
        stats.dangling_states,
        stats.terminal_states
    );

    let outfile = args
        .outfile
        .unwrap_or_else(|| args.pitfile.with_extension(args.outformat.extension()));

    match args.outformat {
        OutFormat::Png => render::render_png(&graph, &outfile, &config.render)?,
        OutFormat::Dot => render::write_dot(&graph, &outfile)?,
    }

    println!("File saved: {}", outfile.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parsing_defaults() {
        let cli = Cli::try_parse_from(["pit2graph", "model.xml"]).unwrap();
        assert_eq!(cli.pitfile, PathBuf::from("model.xml"));
        assert_eq!(cli.outformat, OutFormat::Png);
        assert_eq!(cli.outfile, None);
        assert_eq!(cli.namespace, None);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_cli_parsing_all_flags() {
        let cli = Cli::try_parse_from([
            "pit2graph",
            "model.xml",
            "-f",
            "dot",
            "-o",
            "out.dot",
            "-n",
            "http://example.com/ns",
            "-v",
        ])
        .unwrap();
        assert_eq!(cli.outformat, OutFormat::Dot);
        assert_eq!(cli.outfile, Some(PathBuf::from("out.dot")));
        assert_eq!(cli.namespace.as_deref(), Some("http://example.com/ns"));
        assert!(cli.verbose);
    }

    #[test]
    fn test_unknown_outformat_rejected_at_parse_time() {
        let result = Cli::try_parse_from(["pit2graph", "model.xml", "--outformat", "xyz"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_pitfile_is_required() {
        let result = Cli::try_parse_from(["pit2graph"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_outfile_defaults_to_pit_stem() {
        let pitfile = PathBuf::from("models/http.xml");
        assert_eq!(
            pitfile.with_extension(OutFormat::Dot.extension()),
            PathBuf::from("models/http.dot")
        );
    }

    #[test]
    fn test_execute_writes_dot_file() {
        let dir = std::env::temp_dir();
        let pitfile = dir.join("pit2graph-execute-test.xml");
        let outfile = dir.join("pit2graph-execute-test.dot");
        std::fs::write(
            &pitfile,
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

        let args = Cli::try_parse_from([
            "pit2graph",
            pitfile.to_str().unwrap(),
            "-f",
            "dot",
            "-o",
            outfile.to_str().unwrap(),
        ])
        .unwrap();
        execute(args, Config::default()).unwrap();

        let contents = std::fs::read_to_string(&outfile).unwrap();
        std::fs::remove_file(&pitfile).ok();
        std::fs::remove_file(&outfile).ok();
        assert!(contents.contains("\"Start\" -> \"Mid\";"));
    }

    #[test]
    fn test_execute_without_state_model_writes_nothing() {
        let dir = std::env::temp_dir();
        let pitfile = dir.join("pit2graph-no-model-test.xml");
        let outfile = dir.join("pit2graph-no-model-test.dot");
        std::fs::write(
            &pitfile,
            r#"<Peach xmlns="http://peachfuzzer.com/2012/Peach"><DataModel/></Peach>"#,
        )
        .unwrap();

        let args = Cli::try_parse_from([
            "pit2graph",
            pitfile.to_str().unwrap(),
            "-f",
            "dot",
            "-o",
            outfile.to_str().unwrap(),
        ])
        .unwrap();
        let err = execute(args, Config::default()).unwrap_err();

        assert!(matches!(err, crate::Error::NoStateModel { .. }));
        assert!(!outfile.exists());
        std::fs::remove_file(&pitfile).ok();
    }
}
