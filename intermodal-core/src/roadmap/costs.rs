use std::ops::AddAssign;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

/// Criteria a route can be evaluated on.
///
/// Units are chosen by whoever fills the costs and must stay consistent
/// within a roadmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum CostId {
    Distance = 1,
    Duration,
    Price,
    Carbon,
    Calories,
    NumberOfChanges,
    Variability,
    PathComplexity,
    Elevation,
    Security,
    Landmark,
}

impl CostId {
    pub const ALL: [CostId; 11] = [
        CostId::Distance,
        CostId::Duration,
        CostId::Price,
        CostId::Carbon,
        CostId::Calories,
        CostId::NumberOfChanges,
        CostId::Variability,
        CostId::PathComplexity,
        CostId::Elevation,
        CostId::Security,
        CostId::Landmark,
    ];

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.code() == code)
    }
}

/// Value of each cost criterion.
///
/// A criterion that was never set reads as `0.0`; aggregation over steps
/// relies on this.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Costs(HashMap<CostId, f64>);

impl Costs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of `id`, `0.0` if unset
    pub fn get(&self, id: CostId) -> f64 {
        self.0.get(&id).copied().unwrap_or(0.0)
    }

    pub fn set(&mut self, id: CostId, value: f64) {
        self.0.insert(id, value);
    }

    /// Adds `value` to the current value of `id`
    pub fn add(&mut self, id: CostId, value: f64) {
        *self.0.entry(id).or_insert(0.0) += value;
    }

    pub fn contains(&self, id: CostId) -> bool {
        self.0.contains_key(&id)
    }

    pub fn remove(&mut self, id: CostId) -> Option<f64> {
        self.0.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (CostId, f64)> + '_ {
        self.0.iter().map(|(&id, &value)| (id, value))
    }
}

impl AddAssign<&Costs> for Costs {
    fn add_assign(&mut self, rhs: &Costs) {
        for (id, value) in rhs.iter() {
            self.add(id, value);
        }
    }
}

impl FromIterator<(CostId, f64)> for Costs {
    fn from_iter<I: IntoIterator<Item = (CostId, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<const N: usize> From<[(CostId, f64); N]> for Costs {
    fn from(values: [(CostId, f64); N]) -> Self {
        values.into_iter().collect()
    }
}
