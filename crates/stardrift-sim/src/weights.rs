//! Weighted random index selection.
//!
//! A table of normalized weights is built once per session; each draw
//! walks the cumulative sum until it passes a uniform sample.

use rand::Rng;

/// Normalized spawn probabilities, in template order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeightTable {
    normalized: Vec<f64>,
}

impl WeightTable {
    /// Two passes: sum the raw weights, then divide each by the sum.
    /// A zero sum yields an all-zero table, whose draws always pick 0.
    pub fn build(weights: &[u32]) -> Self {
        let mut normalized = Vec::with_capacity(weights.len());
        let mut sum: u64 = 0;
        for &weight in weights {
            sum += u64::from(weight);
            normalized.push(f64::from(weight));
        }

        if sum == 0 {
            if !weights.is_empty() {
                log::warn!("weight table of {} entries sums to zero", weights.len());
            }
            normalized.iter_mut().for_each(|w| *w = 0.0);
            return Self { normalized };
        }

        let sum = sum as f64;
        for weight in &mut normalized {
            *weight /= sum;
        }
        Self { normalized }
    }

    pub fn weights(&self) -> &[f64] {
        &self.normalized
    }

    pub fn len(&self) -> usize {
        self.normalized.len()
    }

    pub fn is_empty(&self) -> bool {
        self.normalized.is_empty()
    }

    /// Index whose cumulative range contains `t`: the first `i` with
    /// `t <= w[0] + .. + w[i]`. Falls back to 0 when rounding leaves the
    /// total just under `t`.
    pub fn index_for(&self, t: f64) -> usize {
        let mut q = 0.0;
        for (i, weight) in self.normalized.iter().enumerate() {
            q += weight;
            if t <= q {
                return i;
            }
        }
        0
    }

    /// Draw an index using `rng` for the uniform sample in `[0, 1)`.
    pub fn select<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        let t: f64 = rng.gen();
        self.index_for(t)
    }
}
