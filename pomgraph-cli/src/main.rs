//! pomgraph CLI - build a module graph from Maven descriptors.
//!
//! Scans one or more directories for `pom.xml` files, links the modules
//! they describe by parent, sub-module and dependency relations, and
//! writes the result as GraphML (or JSON / DOT).

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use pomgraph_core::{
    build_module_graph, exporter, BuildOptions, BuildReport, ExportFormat, RelationKind,
    ScanOptions,
};

mod config;

use config::{PomgraphConfig, CONFIG_FILE_NAME};

/// Build a module graph from Maven descriptors.
///
/// Every `pom.xml` under the given directories becomes a node; parent,
/// sub-module and dependency declarations become labeled edges.
#[derive(Parser)]
#[command(name = "pomgraph")]
#[command(author, version)]
#[command(about = "Build a module graph from Maven pom.xml descriptors")]
#[command(after_help = "Examples:
  pomgraph modules.graphml ./my-project
  pomgraph --relations dependency deps.graphml ./services ./libs
  pomgraph -F dot modules.dot .")]
pub struct Cli {
    /// File to write the graph to
    #[arg(value_name = "GRAPH_OUTPUT_FILE")]
    output: PathBuf,

    /// Directories to scan for pom.xml files
    #[arg(value_name = "MAVEN_MODULE_DIR", required = true)]
    roots: Vec<PathBuf>,

    /// Relation kinds to include (comma-separated: parent,module,dependency)
    #[arg(long, value_delimiter = ',')]
    relations: Option<Vec<RelationKind>>,

    /// Parent edges are always included; kept for compatibility
    #[arg(long, hide = true)]
    include_parent_edges: bool,

    /// Output format: graphml, json, dot (overrides config default)
    #[arg(short = 'F', long)]
    format: Option<ExportFormat>,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Configuration file (defaults to .pomgraph.toml in the working directory)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Enable verbose output (debug logging)
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

/// Setup logging based on verbosity
fn setup_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();
}

/// Settings after merging CLI flags over the config file.
struct Settings {
    build: BuildOptions,
    format: ExportFormat,
    pretty: bool,
}

impl Settings {
    /// CLI flag > config > built-in default.
    fn resolve(cli: &Cli, config: &PomgraphConfig) -> Self {
        let scan = ScanOptions {
            ignore_patterns: config.ignore_patterns(),
            respect_gitignore: config.scanner.respect_gitignore,
            include_hidden: config.scanner.include_hidden,
            follow_symlinks: config.scanner.follow_symlinks,
        };

        let relations = cli
            .relations
            .clone()
            .or_else(|| config.relations())
            .unwrap_or_else(|| RelationKind::ALL.to_vec());

        Self {
            build: BuildOptions {
                scan,
                relations,
                parallel_reads: config.graph.parallel_reads,
            },
            format: cli
                .format
                .or_else(|| config.default_format())
                .unwrap_or_default(),
            pretty: cli.pretty || config.output.pretty,
        }
    }
}

fn load_config(explicit: Option<&Path>) -> Result<PomgraphConfig> {
    match explicit {
        Some(path) => PomgraphConfig::load_from(path),
        None => Ok(PomgraphConfig::load(Path::new("."))),
    }
}

fn print_summary(output: &Path, format: ExportFormat, report: &BuildReport) {
    println!(
        "{} Wrote {} ({})",
        "SUCCESS:".green().bold(),
        output.display(),
        format
    );
    println!(
        "  Nodes: {}  Edges: {}  Descriptors: {}  Duration: {}ms",
        report.graph.node_count().to_string().green(),
        report.graph.edge_count().to_string().green(),
        report.descriptor_count,
        report.duration.as_millis().to_string().yellow()
    );
    if report.scan_errors > 0 {
        println!(
            "  {} {} unreadable entries skipped",
            "WARNING:".yellow().bold(),
            report.scan_errors
        );
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    if cli.include_parent_edges {
        tracing::debug!("--include-parent-edges has no effect; parent edges are always built");
    }

    let config = load_config(cli.config.as_deref())
        .with_context(|| format!("Failed to load configuration (default: {})", CONFIG_FILE_NAME))?;
    let settings = Settings::resolve(&cli, &config);

    let report = build_module_graph(&cli.roots, &settings.build)?;
    let rendered = exporter::export(&report.graph, settings.format, settings.pretty)?;

    std::fs::write(&cli.output, rendered)
        .with_context(|| format!("Failed to write graph to {}", cli.output.display()))?;

    if !cli.quiet {
        print_summary(&cli.output, settings.format, &report);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("pomgraph").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_requires_output_and_root() {
        assert!(Cli::try_parse_from(["pomgraph", "out.graphml"]).is_err());
        let cli = parse(&["out.graphml", "a", "b"]);
        assert_eq!(cli.roots, vec![PathBuf::from("a"), PathBuf::from("b")]);
    }

    #[test]
    fn test_relations_flag() {
        let cli = parse(&["--relations", "dependency,module", "out.graphml", "."]);
        assert_eq!(
            cli.relations,
            Some(vec![RelationKind::Dependency, RelationKind::Module])
        );
        assert!(Cli::try_parse_from(["pomgraph", "--relations", "imports", "o", "."]).is_err());
    }

    #[test]
    fn test_legacy_flag_is_accepted() {
        let cli = parse(&["--include-parent-edges", "out.graphml", "."]);
        assert!(cli.include_parent_edges);
    }

    #[test]
    fn test_cli_overrides_config() {
        let config: PomgraphConfig = toml::from_str(
            r#"
[graph]
relations = ["parent"]
parallel_reads = false

[output]
format = "json"
"#,
        )
        .unwrap();

        let settings = Settings::resolve(&parse(&["out", "."]), &config);
        assert_eq!(settings.format, ExportFormat::Json);
        assert_eq!(settings.build.relations, vec![RelationKind::Parent]);
        assert!(!settings.build.parallel_reads);

        let cli = parse(&["-F", "dot", "--relations", "module", "out", "."]);
        let settings = Settings::resolve(&cli, &config);
        assert_eq!(settings.format, ExportFormat::Dot);
        assert_eq!(settings.build.relations, vec![RelationKind::Module]);
    }

    #[test]
    fn test_defaults_without_config() {
        let settings = Settings::resolve(&parse(&["out", "."]), &PomgraphConfig::default());
        assert_eq!(settings.format, ExportFormat::Graphml);
        assert_eq!(settings.build.relations, RelationKind::ALL.to_vec());
        assert!(settings
            .build
            .scan
            .ignore_patterns
            .contains(&"target/".to_string()));
    }
}
