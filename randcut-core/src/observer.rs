//! Injectable diagnostics for cut runs.
//!
//! The driver never logs directly; it reports rebuilds and completed runs to a
//! [`CutObserver`]. [`TracingObserver`] forwards them to `tracing` (and to
//! `metrics` when that feature is enabled), while [`NoopObserver`] keeps runs
//! silent.

use tracing::{debug, info, warn};

use crate::cut::{RebuildReport, RebuildTrigger, RunStats};

/// Receives progress notifications from a running cut.
///
/// Both hooks default to doing nothing.
///
/// # Examples
/// ```
/// use randcut_core::{CutObserver, RebuildReport};
///
/// #[derive(Default)]
/// struct CountRebuilds(usize);
///
/// impl CutObserver for CountRebuilds {
///     fn on_rebuild(&mut self, _report: &RebuildReport) {
///         self.0 += 1;
///     }
/// }
///
/// let mut observer = CountRebuilds::default();
/// assert_eq!(observer.0, 0);
/// ```
pub trait CutObserver {
    /// Called after every sampler rebuild.
    fn on_rebuild(&mut self, _report: &RebuildReport) {}

    /// Called once the driver reaches its terminated state.
    fn on_complete(&mut self, _stats: &RunStats) {}
}

/// Observer that discards every notification.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NoopObserver;

impl CutObserver for NoopObserver {}

/// Observer that emits structured `tracing` events.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TracingObserver;

impl CutObserver for TracingObserver {
    fn on_rebuild(&mut self, report: &RebuildReport) {
        if report.trigger() == RebuildTrigger::Saturated {
            warn!(
                entries_before = report.entries_before(),
                entries_after = report.entries_after(),
                "sampler saturated with rejected edges; rebuilding"
            );
        }
        debug!(
            trigger = report.trigger().as_str(),
            entries_before = report.entries_before(),
            entries_after = report.entries_after(),
            weight_after = report.weight_after(),
            weight_reclaimed_percent = report.weight_reclaimed_percent(),
            entries_reclaimed_percent = report.entries_reclaimed_percent(),
            cut_weight = report.cut_weight(),
            "sampler rebuilt"
        );
        #[cfg(feature = "metrics")]
        metrics::counter!("randcut_sampler_rebuilds", "trigger" => report.trigger().as_str())
            .increment(1);
    }

    fn on_complete(&mut self, stats: &RunStats) {
        info!(
            rebuilds = stats.rebuilds(),
            edges = stats.edge_count(),
            contractions = stats.contractions(),
            cut_cost = stats.cut_weight(),
            "cut completed"
        );
        #[cfg(feature = "metrics")]
        metrics::histogram!("randcut_cut_cost").record(stats.cut_weight());
    }
}

impl<O: CutObserver + ?Sized> CutObserver for &mut O {
    fn on_rebuild(&mut self, report: &RebuildReport) {
        (**self).on_rebuild(report);
    }

    fn on_complete(&mut self, stats: &RunStats) {
        (**self).on_complete(stats);
    }
}
