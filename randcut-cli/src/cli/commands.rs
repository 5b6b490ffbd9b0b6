//! Command implementations and argument parsing for the randcut CLI.

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use randcut_core::{CutError, Graph, NodeId, Side, TrialConfig, TrialSummary, run_trials};
use randcut_providers_text::{EdgeListError, EdgeListGraph, GridError, GridGraph, StoredWeight};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "randcut",
    about = "Approximate source/sink minimum cuts by repeated random contraction."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Cut a graph repeatedly and report the cheapest result.
    Run(RunCommand),
}

/// Options accepted by the `run` command.
#[derive(Debug, Args, Clone)]
pub struct RunCommand {
    /// Source terminal; defaults to node 0.
    #[arg(long)]
    pub source: Option<NodeId>,

    /// Sink terminal; defaults to the last node for edge lists and to the
    /// cell one step in from the bottom-right corner for grids.
    #[arg(long)]
    pub sink: Option<NodeId>,

    /// Number of independently seeded trials.
    #[arg(
        long,
        default_value_t = TrialConfig::default().trials(),
        value_parser = clap::value_parser!(usize),
    )]
    pub trials: usize,

    /// Base seed mixed into every trial's generator.
    #[arg(long, default_value_t = TrialConfig::default().seed())]
    pub seed: u64,

    /// Graph input configuration.
    #[command(subcommand)]
    pub input: RunInput,
}

/// Graph formats accepted by `run`.
#[derive(Debug, Subcommand, Clone)]
pub enum RunInput {
    /// Read `from to [weight]` lines.
    Edges(InputArgs),
    /// Read an ASCII mask of `.` open cells and `#` walls.
    Grid(InputArgs),
}

/// Graph file arguments.
#[derive(Debug, Args, Clone)]
pub struct InputArgs {
    /// Path to the UTF-8 graph file.
    pub path: PathBuf,

    /// Override name for the graph (defaults to the file name).
    #[arg(long)]
    pub name: Option<String>,
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// File I/O failed while opening a graph file.
    #[error("failed to open `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// Edge list parsing failed.
    #[error(transparent)]
    EdgeList(#[from] EdgeListError),
    /// Grid parsing failed.
    #[error(transparent)]
    Grid(#[from] GridError),
    /// The grid has no cell to use as the default sink.
    #[error("grid is {width}x{height}; pass --sink explicitly for grids smaller than 2x2")]
    NoDefaultSink {
        /// Grid width in cells.
        width: usize,
        /// Grid height in cells.
        height: usize,
    },
    /// The cut engine rejected its inputs.
    #[error(transparent)]
    Core(#[from] CutError),
}

/// How per-node sides are rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Layout {
    /// One `node\tside` line per node.
    Nodes,
    /// A character map, one row per grid row.
    Grid {
        /// Cells per row.
        width: usize,
        /// Open flag per cell, row-major.
        open: Vec<bool>,
    },
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone)]
pub struct ExecutionSummary {
    /// Display name of the graph.
    pub graph: String,
    /// Node count of the graph.
    pub nodes: usize,
    /// Edge count of the graph.
    pub edges: usize,
    /// Source terminal used for every trial.
    pub source: NodeId,
    /// Sink terminal used for every trial.
    pub sink: NodeId,
    /// Trial outcomes, including the cheapest cut.
    pub trials: TrialSummary,
    /// Rendering used for the per-node sides.
    pub layout: Layout,
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when the graph cannot be loaded or cut.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use randcut_cli::cli::{Cli, Command, InputArgs, RunCommand, RunInput, render_summary, run_cli};
/// # use tempfile::NamedTempFile;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let file = NamedTempFile::new()?;
/// std::fs::write(file.path(), "0 1 2\n1 2 5\n")?;
/// let cli = Cli {
///     command: Command::Run(RunCommand {
///         source: None,
///         sink: None,
///         trials: 8,
///         seed: 1,
///         input: RunInput::Edges(InputArgs {
///             path: file.path().to_path_buf(),
///             name: Some("path".into()),
///         }),
///     }),
/// };
/// let summary = run_cli(cli)?;
/// assert_eq!(summary.trials.best().cost(), 2.0);
///
/// let mut buffer = Vec::new();
/// render_summary(&summary, &mut buffer)?;
/// assert!(String::from_utf8(buffer)?.starts_with("graph: path\n"));
/// # Ok(())
/// # }
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli),
    fields(command = field::Empty),
)]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    match cli.command {
        Command::Run(run) => {
            Span::current().record("command", field::display("run"));
            run_command(run)
        }
    }
}

#[instrument(
    name = "cli.execute",
    err,
    skip(command),
    fields(trials = command.trials, seed = command.seed, input = field::Empty),
)]
pub(super) fn run_command(command: RunCommand) -> Result<ExecutionSummary, CliError> {
    let RunCommand {
        source,
        sink,
        trials,
        seed,
        input,
    } = command;
    let config = TrialConfig::new(trials, seed)?;
    let terminals = Terminals { source, sink };

    let span = Span::current();
    let summary = match input {
        RunInput::Edges(args) => {
            span.record("input", field::display("edges"));
            run_edges(args, terminals, &config)?
        }
        RunInput::Grid(args) => {
            span.record("input", field::display("grid"));
            run_grid(args, terminals, &config)?
        }
    };

    info!(
        graph = summary.graph.as_str(),
        best_cost = summary.trials.best().cost(),
        best_trial = summary.trials.best_trial(),
        "command completed"
    );
    Ok(summary)
}

#[derive(Clone, Copy, Debug)]
struct Terminals {
    source: Option<NodeId>,
    sink: Option<NodeId>,
}

#[instrument(
    name = "cli.run_edges",
    err,
    skip(args, config),
    fields(path = field::Empty, override_name = field::Empty),
)]
fn run_edges(
    args: InputArgs,
    terminals: Terminals,
    config: &TrialConfig,
) -> Result<ExecutionSummary, CliError> {
    let InputArgs { path, name } = args;
    record_input(&path, name.as_deref());
    let chosen_name = derive_graph_name(&path, name.as_deref());
    let reader = open_reader(&path)?;
    let graph = EdgeListGraph::try_from_reader(chosen_name, reader)?;

    let source = terminals.source.unwrap_or(0);
    let sink = terminals
        .sink
        .unwrap_or_else(|| graph.node_count().saturating_sub(1));
    let trials = run_trials(&graph, &StoredWeight, source, sink, config)?;
    Ok(ExecutionSummary {
        graph: graph.name().to_owned(),
        nodes: graph.node_count(),
        edges: graph.edge_count(),
        source,
        sink,
        trials,
        layout: Layout::Nodes,
    })
}

#[instrument(
    name = "cli.run_grid",
    err,
    skip(args, config),
    fields(path = field::Empty, override_name = field::Empty),
)]
fn run_grid(
    args: InputArgs,
    terminals: Terminals,
    config: &TrialConfig,
) -> Result<ExecutionSummary, CliError> {
    let InputArgs { path, name } = args;
    record_input(&path, name.as_deref());
    let chosen_name = derive_graph_name(&path, name.as_deref());
    let reader = open_reader(&path)?;
    let grid = GridGraph::try_from_reader(chosen_name, reader)?;

    let source = terminals.source.unwrap_or(0);
    let sink = match terminals.sink {
        Some(sink) => sink,
        None => default_grid_sink(&grid).ok_or(CliError::NoDefaultSink {
            width: grid.width(),
            height: grid.height(),
        })?,
    };
    let trials = run_trials(&grid, &StoredWeight, source, sink, config)?;
    let open = (0..grid.node_count()).map(|node| grid.is_open(node)).collect();
    Ok(ExecutionSummary {
        graph: grid.name().to_owned(),
        nodes: grid.node_count(),
        edges: grid.edge_count(),
        source,
        sink,
        trials,
        layout: Layout::Grid {
            width: grid.width(),
            open,
        },
    })
}

fn record_input(path: &Path, override_name: Option<&str>) {
    let span = Span::current();
    span.record("path", field::display(path.display()));
    span.record(
        "override_name",
        field::display(override_name.unwrap_or("<derived>")),
    );
}

/// The cell one step in from the bottom-right corner.
pub(super) fn default_grid_sink(grid: &GridGraph) -> Option<NodeId> {
    let x = grid.width().checked_sub(2)?;
    let y = grid.height().checked_sub(2)?;
    Some(grid.node_at(x, y))
}

#[instrument(name = "cli.open_reader", err, fields(path = field::Empty))]
pub(super) fn open_reader(path: &Path) -> Result<BufReader<File>, CliError> {
    Span::current().record("path", field::display(path.display()));
    let file = File::open(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufReader::new(file))
}

pub(super) fn derive_graph_name(path: &Path, override_name: Option<&str>) -> String {
    if let Some(name) = override_name {
        return name.to_owned();
    }

    path.file_stem()
        .and_then(|value| value.to_str())
        .map(ToOwned::to_owned)
        .unwrap_or_else(|| "graph".to_owned())
}

/// Renders `summary` to `writer` in a human-readable text format.
///
/// The header lists the graph, terminals and trial outcome, followed by a
/// histogram of floored trial costs and the sides of the cheapest cut.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    let trials = &summary.trials;
    let best = trials.best();
    writeln!(writer, "graph: {}", summary.graph)?;
    writeln!(writer, "nodes: {}", summary.nodes)?;
    writeln!(writer, "edges: {}", summary.edges)?;
    writeln!(writer, "source: {}", summary.source)?;
    writeln!(writer, "sink: {}", summary.sink)?;
    writeln!(writer, "trials: {}", trials.trials())?;
    writeln!(writer, "best cost: {}", best.cost())?;
    writeln!(writer, "best trial: {}", trials.best_trial())?;
    writeln!(writer, "rebuilds: {}", trials.rebuilds())?;
    writeln!(writer, "histogram:")?;
    for (cost, count) in trials.histogram() {
        writeln!(writer, "  {cost}\t{count}")?;
    }

    match &summary.layout {
        Layout::Nodes => {
            for (node, side) in best.sides().iter().enumerate() {
                writeln!(writer, "{node}\t{}", side.as_str())?;
            }
        }
        Layout::Grid { width, open } => {
            render_grid(best.sides(), open, *width, &mut writer)?;
        }
    }
    Ok(())
}

fn render_grid(
    sides: &[Side],
    open: &[bool],
    width: usize,
    writer: &mut impl Write,
) -> io::Result<()> {
    if width == 0 {
        return Ok(());
    }
    for (row_sides, row_open) in sides.chunks(width).zip(open.chunks(width)) {
        let row: String = row_sides
            .iter()
            .zip(row_open)
            .map(|(&side, &open)| cell_glyph(side, open))
            .collect();
        writeln!(writer, "{row}")?;
    }
    Ok(())
}

const fn cell_glyph(side: Side, open: bool) -> char {
    match (side, open) {
        (Side::Source, _) => 's',
        (Side::Sink, _) => 't',
        (Side::Disconnected, true) => '.',
        (Side::Disconnected, false) => '#',
    }
}
