use log::{debug, info, trace, warn};
use petgraph::graph::{EdgeIndex, NodeIndex};

use super::config::{ImportOptions, NetworkConfig, ParentStationResolution, RowErrorPolicy};
use super::csv_source::CsvSource;
use super::progress::{NoProgress, PhaseProgress, ProgressCallback};
use super::records::{
    NetworkRecords, PtSectionRecord, RecordSource, RoadNodeRecord, RoadSectionRecord, StopRecord,
};
use crate::model::{
    IdRegistry, ImportStats, MultimodalGraph, PtGraph, RoadGraph, RoadNode, RoadSection,
    RoadType, Stop, TransportTypes,
};
use crate::{DbId, Error, RecordKind};

/// Road nodes, road sections, stops, public transport sections
const PHASE_COUNT: usize = 4;

/// Creates a multimodal graph from the CSV exports described by `config`
///
/// # Errors
///
/// [`Error::SourceUnavailable`] if a configured directory is missing, or any
/// error of [`import_graph`].
pub fn create_multimodal_graph(
    config: &NetworkConfig,
    progress: Option<&mut dyn ProgressCallback>,
) -> Result<MultimodalGraph, Error> {
    validate_config(config)?;

    info!(
        "Importing road network from {} and {} public transport networks",
        config.road_dir.display(),
        config.public_transport.len()
    );
    let source = CsvSource::from_config(config);
    import_graph(&source, &config.import, progress)
}

/// Runs the four import phases over `source` and returns the populated graph.
///
/// Phases run in a fixed order: road nodes, road sections, stops, public
/// transport sections. Each phase owns a quarter of the progress range, and
/// the callback receives `(1.0, true)` exactly once after the last row.
///
/// Nothing is returned on failure: a partially built graph is dropped.
///
/// # Errors
///
/// Returns the first row error (duplicate id, unknown reference, malformed
/// row) unless `options` asks for rows to be skipped, and any error raised
/// by the record source.
pub fn import_graph<S>(
    source: &S,
    options: &ImportOptions,
    progress: Option<&mut dyn ProgressCallback>,
) -> Result<MultimodalGraph, Error>
where
    S: RecordSource + ?Sized,
{
    let mut no_progress = NoProgress;
    let callback: &mut dyn ProgressCallback = match progress {
        Some(callback) => callback,
        None => &mut no_progress,
    };
    let mut progress = PhaseProgress::new(callback, PHASE_COUNT);

    let mut importer = Importer::new(*options);

    let road_nodes = source.road_nodes()?;
    info!("Importing {} road nodes", road_nodes.len());
    importer.import_road_nodes(&road_nodes, &mut progress)?;
    drop(road_nodes);

    let road_sections = source.road_sections()?;
    info!("Importing {} road sections", road_sections.len());
    importer.import_road_sections(&road_sections, &mut progress)?;
    drop(road_sections);

    let networks = source.public_transport_networks()?;
    let mut pt_graphs: Vec<PtGraph> = networks
        .iter()
        .map(|network| PtGraph::new(network.network_id, network.name.clone()))
        .collect();

    info!(
        "Importing {} stops in {} public transport networks",
        networks.iter().map(|n| n.stops.len()).sum::<usize>(),
        networks.len()
    );
    importer.import_stops(&networks, &mut pt_graphs, &mut progress)?;

    info!(
        "Importing {} public transport sections",
        networks.iter().map(|n| n.sections.len()).sum::<usize>()
    );
    importer.import_pt_sections(&networks, &mut pt_graphs, &mut progress)?;

    let graph = importer.finish(pt_graphs);
    progress.finish();

    if graph.meta().total_skipped() > 0 {
        warn!("Skipped {} invalid rows", graph.meta().total_skipped());
    }
    info!("Imported {graph}");
    Ok(graph)
}

/// Checks that every configured directory exists before importing anything
fn validate_config(config: &NetworkConfig) -> Result<(), Error> {
    if !config.road_dir.is_dir() {
        return Err(Error::SourceUnavailable {
            kind: RecordKind::RoadNode,
            reason: format!("road directory not found: {}", config.road_dir.display()),
        });
    }

    for (idx, network) in config.public_transport.iter().enumerate() {
        if !network.dir.is_dir() {
            return Err(Error::SourceUnavailable {
                kind: RecordKind::Stop,
                reason: format!(
                    "directory of public transport network {} not found: {}",
                    network.id,
                    network.dir.display()
                ),
            });
        }
        if config.public_transport[..idx]
            .iter()
            .any(|other| other.id == network.id)
        {
            return Err(Error::InvalidData(format!(
                "Public transport network id {} is configured twice",
                network.id
            )));
        }
    }

    Ok(())
}

/// Resolves a reference held by a row, naming the row on failure
fn resolve_reference<H: Copy>(
    registry: &IdRegistry<H>,
    missing_id: DbId,
    kind: RecordKind,
    row: usize,
    record_id: Option<DbId>,
    field: &'static str,
) -> Result<H, Error> {
    registry
        .get(missing_id)
        .ok_or_else(|| Error::ReferentialIntegrity {
            kind,
            row,
            record_id,
            field,
            target: registry.kind(),
            missing_id,
        })
}

/// Mutable state of one import pass
struct Importer {
    options: ImportOptions,
    stats: ImportStats,
    road: RoadGraph,
    road_nodes: IdRegistry<NodeIndex>,
    road_sections: IdRegistry<EdgeIndex>,
}

impl Importer {
    fn new(options: ImportOptions) -> Self {
        Self {
            options,
            stats: ImportStats::default(),
            road: RoadGraph::new(),
            road_nodes: IdRegistry::new(RecordKind::RoadNode),
            road_sections: IdRegistry::new(RecordKind::RoadSection),
        }
    }

    fn finish(self, pt_graphs: Vec<PtGraph>) -> MultimodalGraph {
        let mut graph = MultimodalGraph::with_road(self.road, self.road_nodes, self.road_sections);
        for pt in pt_graphs {
            graph.push_public_transport(pt);
        }
        *graph.meta_mut() = self.stats;
        graph
    }

    /// Applies the row error policy: either propagates `err` or records a skip
    fn reject_row(&mut self, kind: RecordKind, err: Error) -> Result<(), Error> {
        match self.options.on_row_error {
            RowErrorPolicy::Fail => Err(err),
            RowErrorPolicy::Skip => {
                warn!("Skipping {kind} row: {err}");
                self.stats.record_skip(kind);
                Ok(())
            }
        }
    }

    fn import_road_nodes(
        &mut self,
        rows: &[RoadNodeRecord],
        progress: &mut PhaseProgress<'_>,
    ) -> Result<(), Error> {
        self.road = RoadGraph::with_capacity(rows.len(), 0);
        self.road_nodes = IdRegistry::with_capacity(RecordKind::RoadNode, rows.len());

        for (row, record) in rows.iter().enumerate() {
            if let Err(err) = self.add_road_node(record) {
                self.reject_row(RecordKind::RoadNode, err)?;
            }
            progress.row(0, row, rows.len());
        }
        Ok(())
    }

    fn add_road_node(&mut self, record: &RoadNodeRecord) -> Result<(), Error> {
        if self.road_nodes.contains(record.id) {
            return Err(Error::DuplicateId {
                kind: RecordKind::RoadNode,
                id: record.id,
            });
        }
        let idx = self.road.add_node(RoadNode {
            db_id: record.id,
            is_junction: record.is_junction,
            is_bifurcation: record.is_bifurcation,
        });
        self.road_nodes.register(record.id, idx)
    }

    fn import_road_sections(
        &mut self,
        rows: &[RoadSectionRecord],
        progress: &mut PhaseProgress<'_>,
    ) -> Result<(), Error> {
        self.road_sections = IdRegistry::with_capacity(RecordKind::RoadSection, rows.len());

        for (row, record) in rows.iter().enumerate() {
            if let Err(err) = self.add_road_section(row, record) {
                self.reject_row(RecordKind::RoadSection, err)?;
            }
            progress.row(1, row, rows.len());
        }
        Ok(())
    }

    fn add_road_section(&mut self, row: usize, record: &RoadSectionRecord) -> Result<(), Error> {
        let kind = RecordKind::RoadSection;
        let from = resolve_reference(
            &self.road_nodes,
            record.node_from,
            kind,
            row,
            Some(record.id),
            "node_from",
        )?;
        let to = resolve_reference(
            &self.road_nodes,
            record.node_to,
            kind,
            row,
            Some(record.id),
            "node_to",
        )?;

        if self.road_sections.contains(record.id) {
            return Err(Error::DuplicateId {
                kind,
                id: record.id,
            });
        }

        let road_type = match record.road_type {
            None => None,
            Some(code) => Some(RoadType::from_code(code).ok_or_else(|| {
                Error::MalformedRecord {
                    kind,
                    row,
                    reason: format!("section {}: unknown road type {code}", record.id),
                }
            })?),
        };
        if !record.length.is_finite() || record.length < 0.0 {
            return Err(Error::MalformedRecord {
                kind,
                row,
                reason: format!("section {}: invalid length {}", record.id, record.length),
            });
        }

        let section = RoadSection {
            db_id: record.id,
            road_type,
            transport_type_ft: TransportTypes::from_bits(record.transport_type_forward),
            transport_type_tf: TransportTypes::from_bits(record.transport_type_backward),
            length: record.length,
            car_speed_limit: record.car_speed_limit,
            car_average_speed: record.car_average_speed,
            transit_average_speed: record.transit_average_speed,
            road_name: record.road_name.clone(),
            address_left_side: record.address_left.clone(),
            address_right_side: record.address_right.clone(),
            lane: record.lane_count,
            is_roundabout: record.is_roundabout,
            is_bridge: record.is_bridge,
            is_tunnel: record.is_tunnel,
            is_ramp: record.is_ramp,
            is_tollway: record.is_tollway,
        };
        let idx = self.road.add_section(from, to, section)?;
        trace!(
            "Road section {} added between nodes {} and {}",
            record.id, record.node_from, record.node_to
        );
        self.road_sections.register(record.id, idx)
    }

    fn import_stops(
        &mut self,
        networks: &[NetworkRecords],
        pt_graphs: &mut [PtGraph],
        progress: &mut PhaseProgress<'_>,
    ) -> Result<(), Error> {
        let total = networks.iter().map(|n| n.stops.len()).sum();
        let mut done = 0;

        for (network, pt) in networks.iter().zip(pt_graphs.iter_mut()) {
            let mut pending_parents = Vec::new();

            for (row, record) in network.stops.iter().enumerate() {
                match self.add_stop(row, record, pt) {
                    Ok(idx) => {
                        if let Some(parent_id) = record.parent_id() {
                            match self.options.parent_station {
                                ParentStationResolution::SinglePass => {
                                    self.link_parent(pt, idx, record.id, parent_id);
                                }
                                ParentStationResolution::TwoPass => {
                                    pending_parents.push((idx, record.id, parent_id));
                                }
                            }
                        }
                    }
                    Err(err) => self.reject_row(RecordKind::Stop, err)?,
                }
                progress.row(2, done, total);
                done += 1;
            }

            for (idx, stop_id, parent_id) in pending_parents {
                self.link_parent(pt, idx, stop_id, parent_id);
            }
        }
        Ok(())
    }

    fn add_stop(
        &self,
        row: usize,
        record: &StopRecord,
        pt: &mut PtGraph,
    ) -> Result<NodeIndex, Error> {
        let kind = RecordKind::Stop;
        if pt.stop_by_db_id(record.id).is_some() {
            return Err(Error::DuplicateId {
                kind,
                id: record.id,
            });
        }
        if !(0.0..=1.0).contains(&record.abscissa) {
            return Err(Error::MalformedRecord {
                kind,
                row,
                reason: format!(
                    "stop {}: abscissa {} is outside [0, 1]",
                    record.id, record.abscissa
                ),
            });
        }
        let road_section = resolve_reference(
            &self.road_sections,
            record.road_section_id,
            kind,
            row,
            Some(record.id),
            "road_section_id",
        )?;

        pt.add_stop(Stop {
            db_id: record.id,
            name: record.name.clone(),
            is_station: record.is_station,
            parent_station: None,
            road_section,
            zone_id: record.zone_id.clone(),
            abscissa_road_section: record.abscissa,
        })
    }

    /// Links a stop to its parent if the parent is already known; a
    /// missing parent leaves the stop without one
    fn link_parent(&mut self, pt: &mut PtGraph, stop: NodeIndex, stop_id: DbId, parent_id: DbId) {
        let linked = pt
            .stop_by_db_id(parent_id)
            .is_some_and(|parent| pt.set_parent_station(stop, parent).is_ok());
        if !linked {
            debug!(
                "Stop {stop_id} of network {}: parent station {parent_id} not resolved",
                pt.name
            );
            self.stats.unresolved_parent_stations += 1;
        }
    }

    fn import_pt_sections(
        &mut self,
        networks: &[NetworkRecords],
        pt_graphs: &mut [PtGraph],
        progress: &mut PhaseProgress<'_>,
    ) -> Result<(), Error> {
        let total = networks.iter().map(|n| n.sections.len()).sum();
        let mut done = 0;

        for (network, pt) in networks.iter().zip(pt_graphs.iter_mut()) {
            for (row, record) in network.sections.iter().enumerate() {
                if let Err(err) = Self::add_pt_section(row, record, pt) {
                    self.reject_row(RecordKind::PtSection, err)?;
                }
                progress.row(3, done, total);
                done += 1;
            }
        }
        Ok(())
    }

    fn add_pt_section(row: usize, record: &PtSectionRecord, pt: &mut PtGraph) -> Result<(), Error> {
        let kind = RecordKind::PtSection;
        let from = resolve_reference(
            pt.stop_registry(),
            record.stop_from,
            kind,
            row,
            None,
            "stop_from",
        )?;
        let to = resolve_reference(
            pt.stop_registry(),
            record.stop_to,
            kind,
            row,
            None,
            "stop_to",
        )?;
        pt.add_section(from, to)?;
        Ok(())
    }
}
