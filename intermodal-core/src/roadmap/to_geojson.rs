use geojson::{Feature, FeatureCollection, Geometry};
use geozero::{ToGeo, wkb::Wkb};
use serde_json::{Map, Value as JsonValue, json};

use super::{Roadmap, Step, StepKind};
use crate::Error;

impl Roadmap {
    /// Converts the roadmap to a `GeoJSON` `FeatureCollection`, one feature
    /// per step. Steps without a geometry produce features with a null
    /// geometry.
    ///
    /// # Errors
    ///
    /// [`Error::Geometry`] if a step geometry is not valid WKB
    pub fn to_geojson(&self) -> Result<FeatureCollection, Error> {
        let features = self
            .iter()
            .enumerate()
            .map(|(idx, step)| step_to_feature(idx, step))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(FeatureCollection {
            features,
            bbox: None,
            foreign_members: None,
        })
    }

    /// # Errors
    ///
    /// Same as [`Roadmap::to_geojson`]
    pub fn to_geojson_string(&self) -> Result<String, Error> {
        Ok(serde_json::to_string(&self.to_geojson()?)?)
    }
}

fn decode_geometry(wkb: &[u8]) -> Result<geo::Geometry<f64>, Error> {
    Wkb(wkb.to_vec())
        .to_geo()
        .map_err(|e| Error::Geometry(format!("could not decode wkb: {e}")))
}

fn step_to_feature(idx: usize, step: &Step) -> Result<Feature, Error> {
    let geometry = step
        .geometry_wkb
        .as_deref()
        .map(decode_geometry)
        .transpose()?
        .map(|geom| Geometry::new((&geom).into()));

    let mut properties = Map::new();
    properties.insert("step_index".to_string(), json!(idx));
    properties.insert("transport_mode".to_string(), json!(step.transport_mode));
    properties.insert("costs".to_string(), serde_json::to_value(&step.costs)?);

    let details = match &step.kind {
        StepKind::Road(road) => json!({
            "leg_type": "road",
            "road_section": road.road_section,
            "road_name": road.road_name,
            "distance_km": road.distance.as_km(),
            "end_movement": road.end_movement,
        }),
        StepKind::PublicTransport(pt) => json!({
            "leg_type": "public_transport",
            "network_id": pt.network_id,
            "route": pt.route,
            "trip_id": pt.trip_id,
            "from_name": pt.departure_name,
            "to_name": pt.arrival_name,
            "wait": pt.wait,
            "departure_time": pt.departure_time,
            "arrival_time": pt.arrival_time,
        }),
        StepKind::Transfer(transfer) => json!({
            "leg_type": "transfer",
            "from_name": transfer.initial_name,
            "to_name": transfer.final_name,
            "final_mode": transfer.final_mode,
        }),
    };
    if let JsonValue::Object(details) = details {
        properties.extend(details);
    }

    Ok(Feature {
        bbox: None,
        geometry,
        id: None,
        properties: Some(properties),
        foreign_members: None,
    })
}
