//! Route steps: portions of a route travelled with a single transport mode

use serde::{Deserialize, Serialize};

use super::costs::{CostId, Costs};
use crate::model::MultimodalEdge;
use crate::{DbId, Error};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepType {
    Road,
    PublicTransport,
    Transfer,
}

/// Non-negative, finite distance in kilometers
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Kilometers(f64);

impl Kilometers {
    /// # Errors
    ///
    /// [`Error::InvalidData`] if `value` is negative or not finite
    pub fn new(value: f64) -> Result<Self, Error> {
        if value.is_finite() && value >= 0.0 {
            Ok(Self(value))
        } else {
            Err(Error::InvalidData(format!("invalid step distance {value}")))
        }
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Kilometers {
    type Error = Error;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Kilometers> for f64 {
    fn from(value: Kilometers) -> Self {
        value.0
    }
}

/// How much of a road section a road step covers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraversedDistance {
    /// Distance from the start of the step
    Km(Kilometers),
    /// Up to the end of the section
    UntilSectionEnd,
}

impl TraversedDistance {
    /// # Errors
    ///
    /// [`Error::InvalidData`] if `value` is negative or not finite
    pub fn km(value: f64) -> Result<Self, Error> {
        Kilometers::new(value).map(TraversedDistance::Km)
    }

    pub fn as_km(self) -> Option<f64> {
        match self {
            TraversedDistance::Km(value) => Some(value.get()),
            TraversedDistance::UntilSectionEnd => None,
        }
    }
}

/// Movement to make at the end of a road step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndMovement {
    GoAhead = 0,
    TurnLeft = 1,
    TurnRight = 2,
    UTurn = 3,
    RoundaboutEnter = 4,
    FirstExit = 5,
    SecondExit = 6,
    ThirdExit = 7,
    FourthExit = 8,
    FifthExit = 9,
    SixthExit = 10,
    YouAreArrived = 999,
}

impl EndMovement {
    /// Roundabout exit number `n`, for `n` in `1..=6`
    pub fn roundabout_exit(n: u8) -> Option<Self> {
        match n {
            1 => Some(EndMovement::FirstExit),
            2 => Some(EndMovement::SecondExit),
            3 => Some(EndMovement::ThirdExit),
            4 => Some(EndMovement::FourthExit),
            5 => Some(EndMovement::FifthExit),
            6 => Some(EndMovement::SixthExit),
            _ => None,
        }
    }

    /// Exit number when the movement leaves a roundabout
    pub fn exit_number(self) -> Option<u8> {
        let code = self.code();
        (5..=10)
            .contains(&code)
            .then(|| u8::try_from(code - 4).ok())
            .flatten()
    }

    pub fn code(self) -> u16 {
        self as u16
    }

    pub fn from_code(code: u16) -> Option<Self> {
        match code {
            0 => Some(EndMovement::GoAhead),
            1 => Some(EndMovement::TurnLeft),
            2 => Some(EndMovement::TurnRight),
            3 => Some(EndMovement::UTurn),
            4 => Some(EndMovement::RoundaboutEnter),
            5..=10 => u8::try_from(code - 4).ok().and_then(Self::roundabout_exit),
            999 => Some(EndMovement::YouAreArrived),
            _ => None,
        }
    }
}

/// Travel on the road network, on foot or with a private vehicle.
///
/// Consecutive sections with the same name and direction may be merged
/// into a single step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadStep {
    /// Persisted id of the road section the step starts on
    pub road_section: DbId,
    pub road_name: String,
    pub distance: TraversedDistance,
    pub end_movement: EndMovement,
}

/// Ride on a public transport trip between two stops.
///
/// Intermediate stops of the same trip do not produce extra steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicTransportStep {
    pub network_id: DbId,
    /// Waiting time before departure
    pub wait: f64,
    pub departure_time: f64,
    pub arrival_time: f64,
    pub trip_id: DbId,
    pub departure_stop: DbId,
    pub departure_name: String,
    pub arrival_stop: DbId,
    pub arrival_name: String,
    /// Route display name
    pub route: String,
}

/// Change of mode between two locations, possibly in different graphs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferStep {
    pub edge: MultimodalEdge,
    /// Transport mode used after the transfer
    pub final_mode: DbId,
    pub initial_name: String,
    pub final_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StepKind {
    Road(RoadStep),
    PublicTransport(PublicTransportStep),
    Transfer(TransferStep),
}

impl From<RoadStep> for StepKind {
    fn from(step: RoadStep) -> Self {
        StepKind::Road(step)
    }
}

impl From<PublicTransportStep> for StepKind {
    fn from(step: PublicTransportStep) -> Self {
        StepKind::PublicTransport(step)
    }
}

impl From<TransferStep> for StepKind {
    fn from(step: TransferStep) -> Self {
        StepKind::Transfer(step)
    }
}

/// One step of a [`super::Roadmap`].
///
/// Steps own all their data, so a clone is independent of the original.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub kind: StepKind,
    pub costs: Costs,
    /// Transport mode used at the start of the step
    pub transport_mode: DbId,
    /// WKB geometry for display, filled on demand
    pub geometry_wkb: Option<Vec<u8>>,
}

impl Step {
    pub fn new(kind: impl Into<StepKind>, transport_mode: DbId) -> Self {
        Self {
            kind: kind.into(),
            costs: Costs::new(),
            transport_mode,
            geometry_wkb: None,
        }
    }

    #[must_use]
    pub fn with_cost(mut self, id: CostId, value: f64) -> Self {
        self.costs.set(id, value);
        self
    }

    pub fn step_type(&self) -> StepType {
        match self.kind {
            StepKind::Road(_) => StepType::Road,
            StepKind::PublicTransport(_) => StepType::PublicTransport,
            StepKind::Transfer(_) => StepType::Transfer,
        }
    }

    /// Value of a cost, `0.0` if unset
    pub fn cost(&self, id: CostId) -> f64 {
        self.costs.get(id)
    }

    pub fn set_cost(&mut self, id: CostId, value: f64) {
        self.costs.set(id, value);
    }

    pub fn as_road(&self) -> Option<&RoadStep> {
        match &self.kind {
            StepKind::Road(step) => Some(step),
            _ => None,
        }
    }

    pub fn as_public_transport(&self) -> Option<&PublicTransportStep> {
        match &self.kind {
            StepKind::PublicTransport(step) => Some(step),
            _ => None,
        }
    }

    pub fn as_transfer(&self) -> Option<&TransferStep> {
        match &self.kind {
            StepKind::Transfer(step) => Some(step),
            _ => None,
        }
    }
}
