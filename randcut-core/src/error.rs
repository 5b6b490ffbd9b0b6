//! Error types for the randomized cut engine.
//!
//! Every precondition the engine checks at its API boundary maps onto a
//! [`CutError`] variant with a stable machine-readable [`CutErrorCode`].

use std::fmt;

use thiserror::Error;

use crate::graph::{EdgeId, NodeId};

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Which terminal a [`CutError::InvalidTerminal`] refers to.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TerminalRole {
    /// The source terminal.
    Source,
    /// The sink terminal.
    Sink,
}

impl fmt::Display for TerminalRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Source => "source",
            Self::Sink => "sink",
        })
    }
}

/// Error type produced when configuring or running a cut.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum CutError {
    /// A terminal id was outside the graph's node range.
    #[error("{role} node {node} is out of range for a graph with {node_count} nodes")]
    InvalidTerminal {
        /// Which terminal was invalid.
        role: TerminalRole,
        /// The offending node id.
        node: NodeId,
        /// Number of nodes in the graph.
        node_count: usize,
    },
    /// Source and sink named the same node.
    #[error("source and sink must differ (both are node {node})")]
    SourceEqualsSink {
        /// The node supplied for both terminals.
        node: NodeId,
    },
    /// The graph reported an edge endpoint outside its node range.
    #[error("edge {edge} references node {node}, but node_count is {node_count}")]
    InvalidEdgeEndpoint {
        /// The edge with the invalid endpoint.
        edge: EdgeId,
        /// The invalid endpoint.
        node: NodeId,
        /// Number of nodes in the graph.
        node_count: usize,
    },
    /// The cost evaluator returned a negative or non-finite weight.
    #[error("edge {edge} has invalid cost {cost}; costs must be finite and non-negative")]
    InvalidEdgeCost {
        /// The edge whose cost was rejected.
        edge: EdgeId,
        /// The rejected cost.
        cost: f64,
    },
    /// Individually valid costs summed past the largest finite `f64`.
    #[error("total edge weight overflows at edge {edge}")]
    TotalWeightOverflow {
        /// The first edge whose cost pushed the total to infinity.
        edge: EdgeId,
    },
    /// The rebuild policy carried an unusable threshold.
    #[error("invalid rebuild policy: {reason}")]
    InvalidRebuildPolicy {
        /// Human-readable reason for the rejection.
        reason: &'static str,
    },
    /// The trial runner was asked to run no trials.
    #[error("at least one trial is required")]
    ZeroTrials,
}

define_error_codes! {
    /// Stable codes describing [`CutError`] variants.
    enum CutErrorCode for CutError {
        /// A terminal id was outside the graph's node range.
        InvalidTerminal => InvalidTerminal { .. } => "CUT_INVALID_TERMINAL",
        /// Source and sink named the same node.
        SourceEqualsSink => SourceEqualsSink { .. } => "CUT_SOURCE_EQUALS_SINK",
        /// The graph reported an edge endpoint outside its node range.
        InvalidEdgeEndpoint => InvalidEdgeEndpoint { .. } => "CUT_INVALID_EDGE_ENDPOINT",
        /// The cost evaluator returned a negative or non-finite weight.
        InvalidEdgeCost => InvalidEdgeCost { .. } => "CUT_INVALID_EDGE_COST",
        /// Individually valid costs summed past the largest finite `f64`.
        TotalWeightOverflow => TotalWeightOverflow { .. } => "CUT_TOTAL_WEIGHT_OVERFLOW",
        /// The rebuild policy carried an unusable threshold.
        InvalidRebuildPolicy => InvalidRebuildPolicy { .. } => "CUT_INVALID_REBUILD_POLICY",
        /// The trial runner was asked to run no trials.
        ZeroTrials => ZeroTrials => "CUT_ZERO_TRIALS",
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, CutError>;
