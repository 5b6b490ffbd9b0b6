//! Command-line interface orchestration for randcut.
//!
//! The `run` command loads an edge list or an ASCII grid, cuts it between two
//! terminals over a batch of seeded trials, and reports the cheapest cut.

mod commands;

pub use commands::{
    Cli, CliError, Command, ExecutionSummary, InputArgs, Layout, RunCommand, RunInput,
    render_summary, run_cli,
};

#[cfg(test)]
mod test_helpers;
