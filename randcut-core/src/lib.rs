//! Randomized source/sink graph cuts.
//!
//! Contracts randomly drawn edges, weighted by a caller-supplied cost, until
//! only edges spanning the source and sink classes remain. Those edges form
//! the cut. Repeating the process with independent seeds and keeping the
//! cheapest outcome approximates the minimum cut.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
mod cut;
mod error;
mod graph;
mod observer;
mod result;
mod trials;

#[cfg(test)]
mod test_utils;

pub use crate::{
    builder::{RandomCutBuilder, RebuildPolicy},
    cut::{RandomCut, RebuildReport, RebuildTrigger, RunStats},
    error::{CutError, CutErrorCode, Result, TerminalRole},
    graph::{EdgeCost, EdgeId, Graph, NodeId, UnitCost},
    observer::{CutObserver, NoopObserver, TracingObserver},
    result::{CutResult, Side},
    trials::{TrialConfig, TrialSummary, mix_seed, run_trials},
};
