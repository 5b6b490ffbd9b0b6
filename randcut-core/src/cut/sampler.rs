//! Weighted edge sampling over a cumulative-weight (CDF) array.
//!
//! Entries are `(edge, cumulative weight)` pairs kept in their original
//! relative order. Drawing is a single uniform variate in `[0, total)` followed
//! by a binary search, so a draw costs `O(log k)`. The array lags behind the
//! forest between rebuilds; every drawn edge must be re-validated by the
//! caller.

use rand::{Rng, distributions::Standard};

use crate::graph::EdgeId;

/// Classification of a sampler entry against the current forest state.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum EdgeState {
    /// Endpoints lie in distinct classes that may still be merged.
    Live,
    /// The edge itself was contracted; its weight is already accounted for.
    Contracted,
    /// Endpoints were merged by other contractions (a self-loop).
    Collapsed,
    /// Endpoints lie in the source class and the sink class.
    Crossing,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct SampleEntry {
    edge: EdgeId,
    cumulative: f64,
}

/// Weight reclaimed by one [`EdgeSampler::rebuild`] pass.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct Reclaimed {
    /// Weight of edges newly found spanning the terminal classes.
    pub(crate) crossing: f64,
    /// Weight of self-loops discarded without cost.
    pub(crate) collapsed: f64,
    /// Weight of contracted edges dropped from the array.
    pub(crate) contracted: f64,
}

impl Reclaimed {
    #[cfg(test)]
    pub(crate) fn total(&self) -> f64 {
        self.crossing + self.collapsed + self.contracted
    }
}

#[derive(Clone, Debug, Default)]
pub(crate) struct EdgeSampler {
    entries: Vec<SampleEntry>,
    total: f64,
}

impl EdgeSampler {
    /// Builds the cumulative array from `(edge, weight)` pairs in iteration
    /// order. Weights must already be validated as finite and non-negative.
    pub(crate) fn build(weights: impl IntoIterator<Item = (EdgeId, f64)>) -> Self {
        let mut total = 0.0;
        let entries = weights
            .into_iter()
            .map(|(edge, weight)| {
                total += weight;
                SampleEntry {
                    edge,
                    cumulative: total,
                }
            })
            .collect();
        Self { entries, total }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn total(&self) -> f64 {
        self.total
    }

    /// Draws an edge with probability proportional to its weight.
    ///
    /// Returns `None` when the array is empty or carries no weight.
    pub(crate) fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<EdgeId> {
        let last = self.entries.len().checked_sub(1)?;
        if self.total <= 0.0 {
            return None;
        }
        let draw: f64 = rng.sample(Standard);
        let threshold = draw * self.total;
        // Rounding can push the threshold onto the last boundary.
        let index = self
            .entries
            .partition_point(|entry| entry.cumulative <= threshold)
            .min(last);
        self.entries.get(index).map(|entry| entry.edge)
    }

    /// Drops every entry `classify` does not report as [`EdgeState::Live`]
    /// and recomputes the cumulative weights of the survivors in place.
    pub(crate) fn rebuild(
        &mut self,
        weight: impl Fn(EdgeId) -> f64,
        mut classify: impl FnMut(EdgeId) -> EdgeState,
    ) -> Reclaimed {
        let mut reclaimed = Reclaimed::default();
        let mut total = 0.0;
        self.entries.retain_mut(|entry| {
            let edge_weight = weight(entry.edge);
            match classify(entry.edge) {
                EdgeState::Live => {
                    total += edge_weight;
                    entry.cumulative = total;
                    true
                }
                EdgeState::Contracted => {
                    reclaimed.contracted += edge_weight;
                    false
                }
                EdgeState::Collapsed => {
                    reclaimed.collapsed += edge_weight;
                    false
                }
                EdgeState::Crossing => {
                    reclaimed.crossing += edge_weight;
                    false
                }
            }
        });
        self.total = total;
        reclaimed
    }

    /// Iterates the live edge ids in array order.
    #[cfg(test)]
    pub(crate) fn edges(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.entries.iter().map(|entry| entry.edge)
    }

    #[cfg(test)]
    pub(crate) fn cumulative(&self) -> Vec<f64> {
        self.entries.iter().map(|entry| entry.cumulative).collect()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rand::{SeedableRng, rngs::SmallRng};
    use rstest::rstest;

    use super::{EdgeSampler, EdgeState};

    fn assert_monotone(sampler: &EdgeSampler) {
        let cumulative = sampler.cumulative();
        assert!(cumulative.windows(2).all(|pair| pair[0] <= pair[1]));
        let last = cumulative.last().copied().unwrap_or(0.0);
        assert!((last - sampler.total()).abs() <= f64::EPSILON * 8.0 * last.max(1.0));
    }

    #[test]
    fn build_accumulates_in_order() {
        let sampler = EdgeSampler::build([(0, 1.0), (1, 0.5), (2, 2.5)]);
        assert_eq!(sampler.len(), 3);
        assert_eq!(sampler.cumulative(), vec![1.0, 1.5, 4.0]);
        assert_eq!(sampler.total(), 4.0);
        assert_monotone(&sampler);
    }

    #[rstest]
    #[case::no_entries(Vec::new())]
    #[case::zero_weight(vec![(0, 0.0), (1, 0.0)])]
    fn sample_reports_exhaustion(#[case] weights: Vec<(usize, f64)>) {
        let sampler = EdgeSampler::build(weights);
        let mut rng = SmallRng::seed_from_u64(3);
        assert_eq!(sampler.sample(&mut rng), None);
    }

    #[test]
    fn sample_never_returns_zero_weight_entries() {
        let sampler = EdgeSampler::build([(0, 0.0), (1, 3.0), (2, 0.0), (3, 1.0), (4, 0.0)]);
        let mut rng = SmallRng::seed_from_u64(11);
        for _ in 0..2_000 {
            let edge = sampler.sample(&mut rng);
            assert!(matches!(edge, Some(1 | 3)), "drew {edge:?}");
        }
    }

    #[test]
    fn sample_is_proportional_to_weight() {
        let sampler = EdgeSampler::build([(0, 1.0), (1, 3.0)]);
        let mut rng = SmallRng::seed_from_u64(42);
        let draws = 20_000;
        let heavy = (0..draws)
            .filter(|_| sampler.sample(&mut rng) == Some(1))
            .count();
        let share = heavy as f64 / f64::from(draws);
        assert!((0.72..0.78).contains(&share), "heavy share {share}");
    }

    #[test]
    fn rebuild_compacts_and_reports_reclaimed_weight() {
        let mut sampler =
            EdgeSampler::build([(0, 1.0), (1, 2.0), (2, 3.0), (3, 4.0), (4, 5.0)]);
        let reclaimed = sampler.rebuild(
            |edge| [1.0, 2.0, 3.0, 4.0, 5.0][edge],
            |edge| match edge {
                0 => EdgeState::Contracted,
                1 => EdgeState::Crossing,
                3 => EdgeState::Collapsed,
                _ => EdgeState::Live,
            },
        );

        assert_eq!(sampler.edges().collect::<Vec<_>>(), vec![2, 4]);
        assert_eq!(sampler.cumulative(), vec![3.0, 8.0]);
        assert_eq!(sampler.total(), 8.0);
        assert_eq!(reclaimed.contracted, 1.0);
        assert_eq!(reclaimed.crossing, 2.0);
        assert_eq!(reclaimed.collapsed, 4.0);
        assert_eq!(reclaimed.total(), 7.0);
    }

    #[test]
    fn rebuild_can_empty_the_sampler() {
        let mut sampler = EdgeSampler::build([(0, 1.0), (1, 1.0)]);
        sampler.rebuild(|_| 1.0, |_| EdgeState::Collapsed);
        assert!(sampler.is_empty());
        assert_eq!(sampler.total(), 0.0);
        let mut rng = SmallRng::seed_from_u64(0);
        assert_eq!(sampler.sample(&mut rng), None);
    }

    proptest! {
        #[test]
        fn cumulative_weights_stay_monotone(
            weights in proptest::collection::vec(0.0_f64..50.0, 0..64),
            keep in proptest::collection::vec(any::<bool>(), 64),
        ) {
            let mut sampler =
                EdgeSampler::build(weights.iter().copied().enumerate());
            assert_monotone(&sampler);

            let before: Vec<usize> = sampler.edges().collect();
            sampler.rebuild(
                |edge| weights[edge],
                |edge| if keep[edge] { EdgeState::Live } else { EdgeState::Collapsed },
            );
            assert_monotone(&sampler);

            let expected: Vec<usize> =
                before.into_iter().filter(|edge| keep[*edge]).collect();
            prop_assert_eq!(sampler.edges().collect::<Vec<_>>(), expected);
        }
    }
}
