use std::hint::black_box;

use chrono::NaiveDateTime;
use criterion::{Criterion, criterion_group, criterion_main};
use intermodal_core::prelude::*;

const GRID_SIDE: i64 = 60;

/// Square street grid with one bus line running along the diagonal
fn synthetic_source() -> MemorySource {
    let node_id = |x: i64, y: i64| y * GRID_SIDE + x + 1;

    let road_nodes = (0..GRID_SIDE)
        .flat_map(|y| (0..GRID_SIDE).map(move |x| (x, y)))
        .map(|(x, y)| RoadNodeRecord {
            id: node_id(x, y),
            is_junction: true,
            ..Default::default()
        })
        .collect();

    let mut road_sections = Vec::new();
    let mut next_section = 1;
    for y in 0..GRID_SIDE {
        for x in 0..GRID_SIDE {
            let from = node_id(x, y);
            let neighbours = [(x + 1, y), (x, y + 1)];
            for (nx, ny) in neighbours {
                if nx < GRID_SIDE && ny < GRID_SIDE {
                    road_sections.push(RoadSectionRecord {
                        id: next_section,
                        node_from: from,
                        node_to: node_id(nx, ny),
                        length: 0.1,
                        road_type: Some(4),
                        ..Default::default()
                    });
                    next_section += 1;
                }
            }
        }
    }

    let stops: Vec<StopRecord> = (1..GRID_SIDE)
        .map(|i| StopRecord {
            id: 10_000 + i,
            name: format!("Stop {i}"),
            road_section_id: i,
            abscissa: 0.5,
            ..Default::default()
        })
        .collect();
    let sections = stops
        .windows(2)
        .map(|pair| PtSectionRecord {
            stop_from: pair[0].id,
            stop_to: pair[1].id,
        })
        .collect();

    MemorySource {
        road_nodes,
        road_sections,
        networks: vec![NetworkRecords {
            network_id: 1,
            name: "bus".to_string(),
            stops,
            sections,
        }],
    }
}

fn long_roadmap(steps: i64) -> Roadmap {
    let mut roadmap = Roadmap::new(NaiveDateTime::default());
    for section in 0..steps {
        roadmap.add_step(
            Step::new(
                RoadStep {
                    road_section: section,
                    road_name: String::new(),
                    distance: TraversedDistance::UntilSectionEnd,
                    end_movement: EndMovement::GoAhead,
                },
                1,
            )
            .with_cost(CostId::Distance, 0.1)
            .with_cost(CostId::Duration, 1.2),
        );
    }
    roadmap
}

fn bench_import(c: &mut Criterion) {
    let source = synthetic_source();
    let options = ImportOptions::default();

    c.bench_function("import_grid_60x60", |b| {
        b.iter(|| black_box(import_graph(black_box(&source), &options, None)));
    });
}

fn bench_total_costs(c: &mut Criterion) {
    let roadmap = long_roadmap(1_000);

    c.bench_function("total_costs_1000_steps", |b| {
        b.iter(|| black_box(get_total_costs(black_box(&roadmap))));
    });
}

criterion_group!(benches, bench_import, bench_total_costs);
criterion_main!(benches);
