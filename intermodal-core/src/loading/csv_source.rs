//! Record streams read from CSV exports of the persistence layer

use std::fs::File;
use std::path::{Path, PathBuf};

use log::debug;
use rayon::prelude::*;

use super::config::{NetworkConfig, PtNetworkConfig};
use super::records::{
    NetworkRecords, PtSectionRecord, RecordSource, RoadNodeRecord, RoadSectionRecord, StopRecord,
};
use crate::{Error, RecordKind};

pub const ROAD_NODE_FILE: &str = "road_node.csv";
pub const ROAD_SECTION_FILE: &str = "road_section.csv";
pub const STOP_FILE: &str = "pt_stop.csv";
pub const PT_SECTION_FILE: &str = "pt_section.csv";

/// Reads every row of a CSV file with a header line.
///
/// # Errors
///
/// [`Error::SourceUnavailable`] if the file cannot be opened,
/// [`Error::MalformedRecord`] for the first row that cannot be decoded.
pub fn deserialize_records<T>(path: &Path, kind: RecordKind) -> Result<Vec<T>, Error>
where
    T: for<'de> serde::Deserialize<'de>,
{
    let file = File::open(path).map_err(|e| Error::SourceUnavailable {
        kind,
        reason: format!("failed to open '{}': {}", path.display(), e),
    })?;

    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(file);
    let mut rows = Vec::new();
    for (row, result) in reader.deserialize().enumerate() {
        let record = result.map_err(|e| Error::MalformedRecord {
            kind,
            row,
            reason: format!("{}: {}", path.display(), e),
        })?;
        rows.push(record);
    }
    debug!("Read {} {kind} rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// [`RecordSource`] over a road directory and one directory per public
/// transport network
#[derive(Debug, Clone)]
pub struct CsvSource {
    road_dir: PathBuf,
    networks: Vec<PtNetworkConfig>,
}

impl CsvSource {
    pub fn new(road_dir: impl Into<PathBuf>, networks: Vec<PtNetworkConfig>) -> Self {
        Self {
            road_dir: road_dir.into(),
            networks,
        }
    }

    pub fn from_config(config: &NetworkConfig) -> Self {
        Self::new(config.road_dir.clone(), config.public_transport.clone())
    }

    fn load_network(network: &PtNetworkConfig) -> Result<NetworkRecords, Error> {
        let mut stops: Vec<StopRecord> =
            deserialize_records(&network.dir.join(STOP_FILE), RecordKind::Stop)?;
        let mut sections: Vec<PtSectionRecord> =
            deserialize_records(&network.dir.join(PT_SECTION_FILE), RecordKind::PtSection)?;
        stops.shrink_to_fit();
        sections.shrink_to_fit();
        Ok(NetworkRecords {
            network_id: network.id,
            name: network.name.clone(),
            stops,
            sections,
        })
    }
}

impl RecordSource for CsvSource {
    fn road_nodes(&self) -> Result<Vec<RoadNodeRecord>, Error> {
        deserialize_records(&self.road_dir.join(ROAD_NODE_FILE), RecordKind::RoadNode)
    }

    fn road_sections(&self) -> Result<Vec<RoadSectionRecord>, Error> {
        deserialize_records(
            &self.road_dir.join(ROAD_SECTION_FILE),
            RecordKind::RoadSection,
        )
    }

    fn public_transport_networks(&self) -> Result<Vec<NetworkRecords>, Error> {
        // Collecting into a Result keeps network order and reports the first failure
        self.networks
            .par_iter()
            .map(Self::load_network)
            .collect::<Result<Vec<_>, _>>()
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn reads_rows_with_database_flags() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(ROAD_NODE_FILE),
            "id,is_junction,is_bifurcation\n1,f,f\n2,t,false\n3,1,0\n",
        )
        .unwrap();

        let source = CsvSource::new(dir.path(), Vec::new());
        let nodes = source.road_nodes().unwrap();
        assert_eq!(nodes.len(), 3);
        assert!(!nodes[0].is_junction);
        assert!(nodes[1].is_junction);
        assert!(nodes[2].is_junction);
        assert!(!nodes[2].is_bifurcation);
    }

    #[test]
    fn missing_columns_take_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(ROAD_SECTION_FILE),
            "id,node_from,node_to,length,road_type\n10,1,2,0.5,\n11,2,1,1.5,4\n",
        )
        .unwrap();

        let source = CsvSource::new(dir.path(), Vec::new());
        let sections = source.road_sections().unwrap();
        assert_eq!(sections[0].id, 10);
        assert_eq!(sections[0].road_type, None);
        assert!((sections[0].length - 0.5).abs() < f64::EPSILON);
        assert_eq!(sections[1].road_type, Some(4));
        assert!(sections[1].road_name.is_empty());
        assert!(!sections[1].is_tollway);
    }

    #[test]
    fn empty_parent_station_is_none() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(STOP_FILE),
            "id,name,is_station,parent_station,road_section_id,zone_id,abscissa\n\
             100,Capitole,t,,10,A,0.3\n\
             101,Capitole quai 1,f,100,10,A,0.6\n\
             102,Jaures,f,0,10,B,0.9\n",
        )
        .unwrap();
        fs::write(
            dir.path().join(PT_SECTION_FILE),
            "stop_from,stop_to\n100,101\n",
        )
        .unwrap();

        let network = PtNetworkConfig {
            id: 3,
            name: "metro".to_string(),
            dir: dir.path().to_path_buf(),
        };
        let source = CsvSource::new(dir.path(), vec![network]);
        let networks = source.public_transport_networks().unwrap();

        assert_eq!(networks.len(), 1);
        let stops = &networks[0].stops;
        assert_eq!(stops[0].parent_id(), None);
        assert_eq!(stops[1].parent_id(), Some(100));
        assert_eq!(stops[2].parent_station, Some(0));
        assert_eq!(stops[2].parent_id(), None);
        assert_eq!(networks[0].sections, vec![PtSectionRecord {
            stop_from: 100,
            stop_to: 101
        }]);
    }

    #[test]
    fn missing_file_is_source_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let source = CsvSource::new(dir.path(), Vec::new());
        assert!(matches!(
            source.road_nodes(),
            Err(Error::SourceUnavailable {
                kind: RecordKind::RoadNode,
                ..
            })
        ));
    }

    #[test]
    fn undecodable_row_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(ROAD_NODE_FILE),
            "id,is_junction,is_bifurcation\n1,f,f\nabc,t,f\n",
        )
        .unwrap();
        let source = CsvSource::new(dir.path(), Vec::new());
        assert!(matches!(
            source.road_nodes(),
            Err(Error::MalformedRecord {
                kind: RecordKind::RoadNode,
                row: 1,
                ..
            })
        ));
    }
}
