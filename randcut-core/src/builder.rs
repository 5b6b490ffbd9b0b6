//! Builder utilities for configuring [`RandomCut`] instances.
//!
//! Exposes the sampler rebuild policy and the builder that validates it before
//! a cutter is constructed.

use crate::{
    Result,
    cut::{RandomCut, RebuildTrigger},
    error::CutError,
    observer::{CutObserver, TracingObserver},
};

const DEFAULT_MIN_CALLS: u64 = 128;
const DEFAULT_MAX_REJECTION_RATIO: f64 = 1.0;

/// Thresholds deciding when the driver rebuilds its edge sampler.
///
/// A rebuild happens when more than `min_calls` edge requests have been made
/// since the previous rebuild and the rejected draws per request exceed
/// `max_rejection_ratio`. Independently, a rebuild is forced when the
/// consecutive rejections inside one request reach the sampler's size. Neither
/// threshold affects correctness, only how much time is spent on rejected
/// draws versus linear rebuild passes.
///
/// # Examples
/// ```
/// use randcut_core::RebuildPolicy;
///
/// let policy = RebuildPolicy::default();
/// assert_eq!(policy.min_calls(), 128);
/// assert_eq!(policy.max_rejection_ratio(), 1.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RebuildPolicy {
    min_calls: u64,
    max_rejection_ratio: f64,
}

impl Default for RebuildPolicy {
    fn default() -> Self {
        Self {
            min_calls: DEFAULT_MIN_CALLS,
            max_rejection_ratio: DEFAULT_MAX_REJECTION_RATIO,
        }
    }
}

impl RebuildPolicy {
    /// Creates a validated policy.
    ///
    /// # Errors
    /// Returns [`CutError::InvalidRebuildPolicy`] when `max_rejection_ratio`
    /// is negative or not finite.
    ///
    /// # Examples
    /// ```
    /// use randcut_core::RebuildPolicy;
    ///
    /// let policy = RebuildPolicy::new(16, 0.5).expect("policy is valid");
    /// assert_eq!(policy.min_calls(), 16);
    /// assert!(RebuildPolicy::new(16, f64::NAN).is_err());
    /// ```
    pub fn new(min_calls: u64, max_rejection_ratio: f64) -> Result<Self> {
        if !max_rejection_ratio.is_finite() {
            return Err(CutError::InvalidRebuildPolicy {
                reason: "max_rejection_ratio must be finite",
            });
        }
        if max_rejection_ratio < 0.0 {
            return Err(CutError::InvalidRebuildPolicy {
                reason: "max_rejection_ratio must not be negative",
            });
        }
        Ok(Self {
            min_calls,
            max_rejection_ratio,
        })
    }

    /// Requests that must accumulate before the ratio rule applies.
    #[must_use]
    #[rustfmt::skip]
    pub fn min_calls(&self) -> u64 { self.min_calls }

    /// Rejected draws tolerated per request before rebuilding.
    #[must_use]
    #[rustfmt::skip]
    pub fn max_rejection_ratio(&self) -> f64 { self.max_rejection_ratio }

    /// Decides whether the current counters warrant a rebuild.
    pub(crate) fn trigger(
        &self,
        calls: u64,
        rejected: u64,
        attempt_rejections: usize,
        sampler_len: usize,
    ) -> Option<RebuildTrigger> {
        if attempt_rejections >= sampler_len {
            return Some(RebuildTrigger::Saturated);
        }
        let ratio_exceeded = rejected as f64 > self.max_rejection_ratio * calls as f64;
        (calls > self.min_calls && ratio_exceeded).then_some(RebuildTrigger::RejectionRatio)
    }
}

/// Configures and constructs [`RandomCut`] instances.
///
/// # Examples
/// ```
/// use randcut_core::{NoopObserver, RandomCutBuilder};
///
/// let cutter = RandomCutBuilder::new()
///     .with_min_calls(64)
///     .with_max_rejection_ratio(2.0)
///     .with_observer(NoopObserver)
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(cutter.policy().min_calls(), 64);
/// assert_eq!(cutter.policy().max_rejection_ratio(), 2.0);
/// ```
#[derive(Debug, Clone)]
pub struct RandomCutBuilder<O = TracingObserver> {
    min_calls: u64,
    max_rejection_ratio: f64,
    observer: O,
}

impl Default for RandomCutBuilder {
    fn default() -> Self {
        let policy = RebuildPolicy::default();
        Self {
            min_calls: policy.min_calls,
            max_rejection_ratio: policy.max_rejection_ratio,
            observer: TracingObserver,
        }
    }
}

impl RandomCutBuilder {
    /// Creates a builder with the default policy and a [`TracingObserver`].
    ///
    /// # Examples
    /// ```
    /// use randcut_core::RandomCutBuilder;
    ///
    /// let builder = RandomCutBuilder::new();
    /// assert_eq!(builder.min_calls(), 128);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<O> RandomCutBuilder<O> {
    /// Overrides the number of requests required before the ratio rule applies.
    #[must_use]
    pub fn with_min_calls(mut self, min_calls: u64) -> Self {
        self.min_calls = min_calls;
        self
    }

    /// Returns the configured minimum request count.
    #[must_use]
    pub fn min_calls(&self) -> u64 {
        self.min_calls
    }

    /// Overrides the tolerated rejected draws per request.
    #[must_use]
    pub fn with_max_rejection_ratio(mut self, ratio: f64) -> Self {
        self.max_rejection_ratio = ratio;
        self
    }

    /// Returns the configured rejection ratio.
    #[must_use]
    pub fn max_rejection_ratio(&self) -> f64 {
        self.max_rejection_ratio
    }

    /// Copies both thresholds from an existing policy.
    #[must_use]
    pub fn with_policy(mut self, policy: RebuildPolicy) -> Self {
        self.min_calls = policy.min_calls;
        self.max_rejection_ratio = policy.max_rejection_ratio;
        self
    }

    /// Replaces the diagnostics observer.
    #[must_use]
    pub fn with_observer<P>(self, observer: P) -> RandomCutBuilder<P> {
        RandomCutBuilder {
            min_calls: self.min_calls,
            max_rejection_ratio: self.max_rejection_ratio,
            observer,
        }
    }
}

impl<O: CutObserver> RandomCutBuilder<O> {
    /// Validates the configuration and constructs a [`RandomCut`].
    ///
    /// # Errors
    /// Returns [`CutError::InvalidRebuildPolicy`] when the rejection ratio is
    /// negative or not finite.
    ///
    /// # Examples
    /// ```
    /// use randcut_core::{CutError, RandomCutBuilder};
    ///
    /// let err = RandomCutBuilder::new()
    ///     .with_max_rejection_ratio(-1.0)
    ///     .build()
    ///     .expect_err("negative ratios are rejected");
    /// assert!(matches!(err, CutError::InvalidRebuildPolicy { .. }));
    /// ```
    pub fn build(self) -> Result<RandomCut<O>> {
        let policy = RebuildPolicy::new(self.min_calls, self.max_rejection_ratio)?;
        Ok(RandomCut::with_parts(policy, self.observer))
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{RebuildPolicy, RebuildTrigger};

    #[rstest]
    #[case::saturated_beats_ratio(1_000, 5_000, 4, 4, Some(RebuildTrigger::Saturated))]
    #[case::too_early(128, 1_000, 0, 10, None)]
    #[case::ratio_exceeded(129, 130, 0, 10, Some(RebuildTrigger::RejectionRatio))]
    #[case::ratio_met_exactly(200, 200, 0, 10, None)]
    #[case::quiet(500, 3, 1, 10, None)]
    fn default_policy_triggers(
        #[case] calls: u64,
        #[case] rejected: u64,
        #[case] attempt_rejections: usize,
        #[case] sampler_len: usize,
        #[case] expected: Option<RebuildTrigger>,
    ) {
        let policy = RebuildPolicy::default();
        assert_eq!(
            policy.trigger(calls, rejected, attempt_rejections, sampler_len),
            expected
        );
    }

    #[rstest]
    #[case::infinite(f64::INFINITY)]
    #[case::nan(f64::NAN)]
    #[case::negative(-0.5)]
    fn rejects_unusable_ratios(#[case] ratio: f64) {
        assert!(RebuildPolicy::new(1, ratio).is_err());
    }

    #[test]
    fn zero_ratio_is_allowed() {
        let policy = RebuildPolicy::new(0, 0.0).expect("zero ratio is valid");
        assert_eq!(
            policy.trigger(1, 1, 0, 5),
            Some(RebuildTrigger::RejectionRatio)
        );
    }
}
