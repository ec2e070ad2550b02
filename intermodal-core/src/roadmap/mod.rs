//! Route results.
//!
//! A [`Roadmap`] describes one candidate route as an ordered list of
//! [`Step`]s. Route search algorithms build roadmaps from origin to
//! destination; a [`RouteResult`] lists the candidates they return, in
//! their own order of relevance.
//!
//! Some step fields such as names and geometries are not needed during the
//! search and may be filled afterwards from the persistence layer.

mod costs;
mod step;
mod to_geojson;

use chrono::NaiveDateTime;
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

pub use costs::{CostId, Costs};
pub use step::{
    EndMovement, Kilometers, PublicTransportStep, RoadStep, Step, StepKind, StepType,
    TransferStep, TraversedDistance,
};

use crate::Error;
use crate::model::MultimodalEdge;

/// Edge examined during a search, with algorithm specific values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceEdge {
    pub edge: MultimodalEdge,
    pub attributes: Map<String, JsonValue>,
}

/// Debugging trace of a path search
pub type PathTrace = Vec<TraceEdge>;

/// Candidate routes for one request, most relevant first
pub type RouteResult = Vec<Roadmap>;

/// Looks up display geometries of steps in the persistence layer
pub trait StepGeometrySource {
    /// WKB geometry of `step`, `None` if the store has none
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup itself fails
    fn step_geometry(&self, step: &Step) -> Result<Option<Vec<u8>>, Error>;
}

impl<F> StepGeometrySource for F
where
    F: Fn(&Step) -> Result<Option<Vec<u8>>, Error>,
{
    fn step_geometry(&self, step: &Step) -> Result<Option<Vec<u8>>, Error> {
        self(step)
    }
}

/// Ordered steps of one route
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Roadmap {
    steps: Vec<Step>,
    pub starting_date_time: NaiveDateTime,
    pub trace: Option<PathTrace>,
}

impl Roadmap {
    pub fn new(starting_date_time: NaiveDateTime) -> Self {
        Self {
            steps: Vec::new(),
            starting_date_time,
            trace: None,
        }
    }

    /// Appends a step at the end of the route
    pub fn add_step(&mut self, step: Step) {
        self.steps.push(step);
    }

    /// Step at `index`
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] if `index` is past the last step
    pub fn step(&self, index: usize) -> Result<&Step, Error> {
        self.steps.get(index).ok_or(Error::OutOfRange {
            index,
            len: self.steps.len(),
        })
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Step> {
        self.steps.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Step> {
        self.steps.iter_mut()
    }

    /// Sum of the costs of all steps
    pub fn total_costs(&self) -> Costs {
        get_total_costs(self)
    }

    /// Fills the geometry of every step that has none.
    ///
    /// All lookups happen before any step is modified, so a failing lookup
    /// leaves the roadmap unchanged. Returns the number of steps filled.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by `source`
    pub fn fill_geometries<G>(&mut self, source: &G) -> Result<usize, Error>
    where
        G: StepGeometrySource + ?Sized,
    {
        let mut found = Vec::new();
        for (idx, step) in self.steps.iter().enumerate() {
            if step.geometry_wkb.is_none() {
                if let Some(wkb) = source.step_geometry(step)? {
                    found.push((idx, wkb));
                }
            }
        }

        let filled = found.len();
        for (idx, wkb) in found {
            self.steps[idx].geometry_wkb = Some(wkb);
        }
        Ok(filled)
    }

    /// # Errors
    ///
    /// Returns an error if serialization fails
    pub fn to_json_string(&self) -> Result<String, Error> {
        Ok(serde_json::to_string(self)?)
    }
}

impl<'a> IntoIterator for &'a Roadmap {
    type Item = &'a Step;
    type IntoIter = std::slice::Iter<'a, Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

impl IntoIterator for Roadmap {
    type Item = Step;
    type IntoIter = std::vec::IntoIter<Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.into_iter()
    }
}

/// Sum of each cost over all the steps of `roadmap`; a cost missing from a
/// step counts as zero.
///
/// The values of each cost are added in ascending order, so the result does
/// not depend on the order of the steps.
pub fn get_total_costs(roadmap: &Roadmap) -> Costs {
    let mut values: HashMap<CostId, Vec<f64>> = HashMap::new();
    for step in roadmap {
        for (id, value) in step.costs.iter() {
            values.entry(id).or_default().push(value);
        }
    }

    values
        .into_iter()
        .map(|(id, mut values)| {
            values.sort_by(f64::total_cmp);
            (id, values.into_iter().sum())
        })
        .collect()
}
