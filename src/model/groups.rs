use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DistributionError {
    #[error("invalid group distribution entry {0:?} (expected id:weight)")]
    Parse(String),
    #[error("group {group:?} has non-positive weight {weight}")]
    Weight { group: String, weight: f64 },
    #[error("duplicate group id {0:?} in distribution")]
    Duplicate(String),
    #[error("group weights sum to {0}, expected 1.0")]
    Sum(f64),
}

const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// Categorical distribution over protected-group ids, stored as ordered
/// `(group_id, cumulative_probability)` cuts ending at 1.0.
#[derive(Debug, Clone)]
pub struct GroupDistribution {
    cuts: Vec<(String, f64)>,
}

impl GroupDistribution {
    /// Builds a distribution from per-group weights, validating that weights
    /// are positive, ids are distinct, and the total is 1.0.
    pub fn from_weights(pairs: &[(String, f64)]) -> Result<GroupDistribution, DistributionError> {
        if pairs.is_empty() {
            return Err(DistributionError::Sum(0.0));
        }
        let mut cuts = Vec::with_capacity(pairs.len());
        let mut total = 0.0f64;
        for (id, weight) in pairs {
            if !weight.is_finite() || *weight <= 0.0 {
                return Err(DistributionError::Weight {
                    group: id.clone(),
                    weight: *weight,
                });
            }
            if cuts.iter().any(|(existing, _)| existing == id) {
                return Err(DistributionError::Duplicate(id.clone()));
            }
            total += weight;
            cuts.push((id.clone(), total));
        }
        if (total - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(DistributionError::Sum(total));
        }
        Ok(GroupDistribution { cuts })
    }

    /// Parses a `id:weight,id:weight,...` spec as passed on the command line.
    pub fn parse(spec: &str) -> Result<GroupDistribution, DistributionError> {
        let mut pairs = Vec::new();
        for entry in spec.split(',') {
            let entry = entry.trim();
            if entry.is_empty() {
                continue;
            }
            let (id, weight) = entry
                .split_once(':')
                .ok_or_else(|| DistributionError::Parse(entry.to_string()))?;
            let weight: f64 = weight
                .trim()
                .parse()
                .map_err(|_| DistributionError::Parse(entry.to_string()))?;
            pairs.push((id.trim().to_string(), weight));
        }
        GroupDistribution::from_weights(&pairs)
    }

    pub fn group_ids(&self) -> impl Iterator<Item = &str> {
        self.cuts.iter().map(|(id, _)| id.as_str())
    }

    /// Draws `n` independent group assignments from a single seeded
    /// generator. Identical seed and distribution reproduce identical
    /// assignments, which reproducible audits rely on.
    pub fn sample(&self, n: usize, seed: u64) -> Vec<String> {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut out = Vec::with_capacity(n);
        for _ in 0..n {
            let draw: f64 = rng.gen_range(0.0..1.0);
            out.push(self.pick(draw).to_string());
        }
        out
    }

    /// First group whose cumulative probability exceeds the draw.
    fn pick(&self, draw: f64) -> &str {
        for (id, cumulative) in &self.cuts {
            if draw < *cumulative {
                return id;
            }
        }
        // draw == last cumulative can only happen through float rounding
        &self.cuts[self.cuts.len() - 1].0
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/groups.rs"]
mod tests;
