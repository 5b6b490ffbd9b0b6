//! Small helpers shared across CLI tests.
//!
//! The CLI unit tests build temporary graph files and assert error handling
//! behaviour. These helpers keep the test cases concise and consistent.

use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use tempfile::TempDir;

use super::commands::run_command;
use super::{CliError, InputArgs, RunCommand, RunInput};

/// Maze whose open halves meet at a single cell in the middle row.
pub(super) const CHOKEPOINT_MAZE: &str = "..#..\n.....\n..#..\n";

pub(super) fn temp_dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create temp dir: {err}"),
    }
}

pub(super) fn create_graph_file(dir: &TempDir, name: &str, contents: &str) -> io::Result<PathBuf> {
    let path = dir.path().join(name);
    let mut file = File::create(&path)?;
    file.write_all(contents.as_bytes())?;
    Ok(path)
}

pub(super) fn edges_command(path: PathBuf, trials: usize) -> RunCommand {
    RunCommand {
        source: None,
        sink: None,
        trials,
        seed: 0,
        input: RunInput::Edges(InputArgs { path, name: None }),
    }
}

pub(super) fn grid_command(path: PathBuf, trials: usize) -> RunCommand {
    RunCommand {
        source: None,
        sink: None,
        trials,
        seed: 0,
        input: RunInput::Grid(InputArgs { path, name: None }),
    }
}

pub(super) fn run_command_expecting_error(cmd: RunCommand, panic_msg: &str) -> CliError {
    match run_command(cmd) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}
