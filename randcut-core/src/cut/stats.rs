//! Run-scoped counters and rebuild reports.

/// Counters describing one completed cut.
///
/// A fresh value is created at the start of every run, so concurrent
/// independent runs never share counters. Weights satisfy
/// `contracted + discarded + cut + residual == total` up to floating-point
/// rounding.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunStats {
    pub(crate) edge_count: usize,
    pub(crate) calls: u64,
    pub(crate) rejected_draws: u64,
    pub(crate) rebuilds: u64,
    pub(crate) contractions: u64,
    pub(crate) total_weight: f64,
    pub(crate) contracted_weight: f64,
    pub(crate) discarded_weight: f64,
    pub(crate) cut_weight: f64,
    pub(crate) residual_weight: f64,
}

impl RunStats {
    /// Number of edges in the graph the run was computed on.
    #[must_use]
    #[rustfmt::skip]
    pub fn edge_count(&self) -> usize { self.edge_count }

    /// Number of edge requests the driver made to the sampler.
    #[must_use]
    #[rustfmt::skip]
    pub fn calls(&self) -> u64 { self.calls }

    /// Number of draws rejected as self-loops or terminal-crossing edges.
    #[must_use]
    #[rustfmt::skip]
    pub fn rejected_draws(&self) -> u64 { self.rejected_draws }

    /// Number of sampler rebuilds, excluding the initial build.
    #[must_use]
    #[rustfmt::skip]
    pub fn rebuilds(&self) -> u64 { self.rebuilds }

    /// Number of edges contracted.
    #[must_use]
    #[rustfmt::skip]
    pub fn contractions(&self) -> u64 { self.contractions }

    /// Summed cost of every edge in the graph.
    #[must_use]
    #[rustfmt::skip]
    pub fn total_weight(&self) -> f64 { self.total_weight }

    /// Summed cost of the contracted edges.
    #[must_use]
    #[rustfmt::skip]
    pub fn contracted_weight(&self) -> f64 { self.contracted_weight }

    /// Summed cost of edges discarded as self-loops.
    #[must_use]
    #[rustfmt::skip]
    pub fn discarded_weight(&self) -> f64 { self.discarded_weight }

    /// Summed cost of edges left spanning the source and sink classes.
    #[must_use]
    #[rustfmt::skip]
    pub fn cut_weight(&self) -> f64 { self.cut_weight }

    /// Weight still held by the sampler when it stopped yielding edges.
    ///
    /// Only zero-cost edges can remain, so this is zero unless rounding
    /// intervenes.
    #[must_use]
    #[rustfmt::skip]
    pub fn residual_weight(&self) -> f64 { self.residual_weight }
}

/// Why the driver rebuilt its sampler.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum RebuildTrigger {
    /// Rejected draws per call exceeded the configured ratio.
    RejectionRatio,
    /// Consecutive rejections within one request reached the sampler size.
    Saturated,
}

impl RebuildTrigger {
    /// Returns a stable label for logs and metrics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RejectionRatio => "rejection_ratio",
            Self::Saturated => "saturated",
        }
    }
}

/// Snapshot of a single sampler rebuild.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RebuildReport {
    pub(crate) trigger: RebuildTrigger,
    pub(crate) entries_before: usize,
    pub(crate) entries_after: usize,
    pub(crate) weight_before: f64,
    pub(crate) weight_after: f64,
    pub(crate) cut_weight: f64,
}

impl RebuildReport {
    /// What caused the rebuild.
    #[must_use]
    #[rustfmt::skip]
    pub fn trigger(&self) -> RebuildTrigger { self.trigger }

    /// Sampler entries before the rebuild.
    #[must_use]
    #[rustfmt::skip]
    pub fn entries_before(&self) -> usize { self.entries_before }

    /// Sampler entries that survived the rebuild.
    #[must_use]
    #[rustfmt::skip]
    pub fn entries_after(&self) -> usize { self.entries_after }

    /// Total sampler weight before the rebuild.
    #[must_use]
    #[rustfmt::skip]
    pub fn weight_before(&self) -> f64 { self.weight_before }

    /// Total sampler weight after the rebuild.
    #[must_use]
    #[rustfmt::skip]
    pub fn weight_after(&self) -> f64 { self.weight_after }

    /// Cut cost accumulated so far, including this rebuild.
    #[must_use]
    #[rustfmt::skip]
    pub fn cut_weight(&self) -> f64 { self.cut_weight }

    /// Percentage of the sampler's weight that was reclaimed.
    #[must_use]
    pub fn weight_reclaimed_percent(&self) -> f64 {
        percent(self.weight_before - self.weight_after, self.weight_before)
    }

    /// Percentage of the sampler's slots that were reclaimed.
    #[must_use]
    pub fn entries_reclaimed_percent(&self) -> f64 {
        let removed = self.entries_before.saturating_sub(self.entries_after);
        percent(removed as f64, self.entries_before as f64)
    }
}

fn percent(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        part * 100.0 / whole
    } else {
        0.0
    }
}
