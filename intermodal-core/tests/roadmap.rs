use chrono::NaiveDate;
use itertools::Itertools;
use intermodal_core::prelude::*;

fn start() -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2013, 4, 2)
        .unwrap()
        .and_hms_opt(8, 0, 0)
        .unwrap()
}

fn walk(section: DbId, km: f64) -> Step {
    Step::new(
        RoadStep {
            road_section: section,
            road_name: format!("Section {section}"),
            distance: TraversedDistance::km(km).unwrap(),
            end_movement: EndMovement::TurnRight,
        },
        2,
    )
    .with_cost(CostId::Distance, km)
    .with_cost(CostId::Duration, km * 12.0)
}

fn ride() -> Step {
    Step::new(
        PublicTransportStep {
            network_id: 1,
            wait: 3.0,
            departure_time: 483.0,
            arrival_time: 495.0,
            trip_id: 4242,
            departure_stop: 100,
            departure_name: "Capitole".to_string(),
            arrival_stop: 101,
            arrival_name: "Marengo".to_string(),
            route: "A".to_string(),
        },
        8,
    )
    .with_cost(CostId::Duration, 15.0)
    .with_cost(CostId::Price, 1.75)
    .with_cost(CostId::NumberOfChanges, 1.0)
}

fn transfer() -> Step {
    let edge = MultimodalEdge::new(
        MultimodalVertex::Road(petgraph::graph::NodeIndex::new(1)),
        MultimodalVertex::PublicTransport {
            network: 0,
            stop: petgraph::graph::NodeIndex::new(0),
        },
    );
    Step::new(
        TransferStep {
            edge,
            final_mode: 8,
            initial_name: String::new(),
            final_name: "Capitole".to_string(),
        },
        2,
    )
    .with_cost(CostId::Duration, 2.0)
}

#[test]
fn total_costs_do_not_depend_on_step_order() {
    let steps = vec![walk(10, 0.5), transfer(), ride(), walk(11, 0.25)];

    let mut reference = Roadmap::new(start());
    for step in steps.iter().cloned() {
        reference.add_step(step);
    }
    let expected = get_total_costs(&reference);
    assert_eq!(expected.get(CostId::Distance), 0.75);
    assert_eq!(expected.get(CostId::Duration), 6.0 + 2.0 + 15.0 + 3.0);
    assert_eq!(expected.get(CostId::Price), 1.75);
    assert_eq!(expected.get(CostId::NumberOfChanges), 1.0);
    assert_eq!(expected.get(CostId::Carbon), 0.0);

    for permutation in steps.iter().cloned().permutations(steps.len()) {
        let mut roadmap = Roadmap::new(start());
        for step in permutation {
            roadmap.add_step(step);
        }
        assert_eq!(get_total_costs(&roadmap), expected);
    }
}

#[test]
fn total_costs_are_exactly_equal_for_every_order_of_inexact_values() {
    let steps: Vec<Step> = [0.1, 0.2, 0.3, 0.7]
        .into_iter()
        .enumerate()
        .map(|(i, value)| {
            walk(i as DbId, value)
                .with_cost(CostId::Duration, value)
                .with_cost(CostId::Carbon, value * 3.0)
        })
        .collect();

    let mut reference = Roadmap::new(start());
    for step in steps.iter().cloned() {
        reference.add_step(step);
    }
    let expected = get_total_costs(&reference);
    assert!((expected.get(CostId::Duration) - 1.3).abs() < 1e-12);

    for permutation in steps.iter().cloned().permutations(steps.len()) {
        let mut roadmap = Roadmap::new(start());
        for step in permutation {
            roadmap.add_step(step);
        }
        assert_eq!(get_total_costs(&roadmap), expected);
    }
}

#[test]
fn cloned_steps_never_share_state() {
    for original in [walk(10, 0.5), ride(), transfer()] {
        let mut copy = original.clone();
        copy.set_cost(CostId::Duration, 99.0);
        copy.transport_mode = 42;
        copy.geometry_wkb = Some(vec![0xde, 0xad]);
        match &mut copy.kind {
            StepKind::Road(road) => road.road_name.clear(),
            StepKind::PublicTransport(pt) => pt.arrival_name.push('!'),
            StepKind::Transfer(transfer) => transfer.final_name.clear(),
        }

        assert_ne!(original.cost(CostId::Duration), 99.0);
        assert_ne!(original.transport_mode, 42);
        assert!(original.geometry_wkb.is_none());
        assert_ne!(copy.kind, original.kind);
        assert_eq!(copy.step_type(), original.step_type());
    }

    // and the other way round
    let mut original = ride();
    let copy = original.clone();
    original.set_cost(CostId::Price, 0.0);
    assert_eq!(copy.cost(CostId::Price), 1.75);
}

#[test]
fn cloned_roadmap_owns_its_steps() {
    let mut roadmap = Roadmap::new(start());
    roadmap.add_step(walk(10, 0.5));
    roadmap.add_step(ride());

    let mut copy = roadmap.clone();
    for step in copy.iter_mut() {
        step.set_cost(CostId::Duration, 0.0);
    }
    copy.add_step(transfer());

    assert_eq!(roadmap.len(), 2);
    assert_eq!(roadmap.step(1).unwrap().cost(CostId::Duration), 15.0);
    assert_eq!(copy.total_costs().get(CostId::Duration), 2.0);
}

#[test]
fn route_result_keeps_candidate_order() {
    let mut fast = Roadmap::new(start());
    fast.add_step(ride());
    let mut slow = Roadmap::new(start());
    slow.add_step(walk(10, 3.0));
    slow.trace = Some(vec![TraceEdge {
        edge: MultimodalEdge::new(
            MultimodalVertex::Road(petgraph::graph::NodeIndex::new(0)),
            MultimodalVertex::Road(petgraph::graph::NodeIndex::new(1)),
        ),
        attributes: serde_json::Map::new(),
    }]);

    let result: RouteResult = vec![fast, slow];
    let durations: Vec<f64> = result
        .iter()
        .map(|roadmap| roadmap.total_costs().get(CostId::Duration))
        .collect();
    assert_eq!(durations, vec![15.0, 36.0]);
    assert!(result[1].trace.as_ref().is_some_and(|trace| trace.len() == 1));
}

#[test]
fn transfer_endpoints_resolve_in_imported_graph() {
    let source = MemorySource {
        road_nodes: vec![
            RoadNodeRecord {
                id: 1,
                ..Default::default()
            },
            RoadNodeRecord {
                id: 2,
                ..Default::default()
            },
        ],
        road_sections: vec![RoadSectionRecord {
            id: 10,
            node_from: 1,
            node_to: 2,
            length: 0.5,
            ..Default::default()
        }],
        networks: vec![NetworkRecords {
            network_id: 1,
            name: "metro".to_string(),
            stops: vec![StopRecord {
                id: 100,
                name: "Capitole".to_string(),
                road_section_id: 10,
                abscissa: 0.3,
                ..Default::default()
            }],
            sections: Vec::new(),
        }],
    };
    let graph = import_graph(&source, &ImportOptions::default(), None).unwrap();

    let step = transfer();
    let edge = step.as_transfer().unwrap().edge;
    assert_eq!(graph.vertex_db_id(edge.source), Some(2));
    assert_eq!(graph.vertex_db_id(edge.target), Some(100));
    assert_eq!(graph.vertex_name(edge.target), Some("Capitole"));
}
