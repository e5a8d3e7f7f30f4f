//! Coordinator tick benchmark

use criterion::{criterion_group, criterion_main, Criterion};

use hearthvale::coordinator::VillageCoordinator;
use hearthvale::core::config::SimulationConfig;
use hearthvale::core::types::{ResourceKind, Vec2};
use hearthvale::story::event::EventLog;
use hearthvale::village::diplomacy::AgreementKind;

fn build_world(villages: u32) -> VillageCoordinator {
    let mut sim = VillageCoordinator::new(SimulationConfig::default());

    let ids: Vec<_> = (0..villages)
        .map(|i| {
            let angle = i as f32 / villages as f32 * std::f32::consts::TAU;
            sim.add_village(
                format!("Village {}", i),
                Vec2::new(angle.cos() * 400.0, angle.sin() * 400.0),
            )
        })
        .collect();

    for pair in ids.windows(2) {
        sim.create_trade_route(pair[0], pair[1], vec![ResourceKind::Food, ResourceKind::Wood]);
        sim.create_diplomatic_agreement(pair[0], pair[1], AgreementKind::Trade, vec![]);
    }

    // Seed a few technologies so diffusion scans have work to do
    for &id in ids.iter().step_by(3) {
        if let Some(village) = sim.village_mut(id) {
            village.learn_technology("Three-Field Rotation");
            village.learn_technology("Water Mill");
        }
    }

    sim
}

fn bench_tick(c: &mut Criterion) {
    c.bench_function("tick_20_villages", |b| {
        let mut sim = build_world(20);
        let mut log = EventLog::new();
        b.iter(|| {
            sim.update(1.0, &mut log);
        });
    });

    c.bench_function("tick_100_villages", |b| {
        let mut sim = build_world(100);
        let mut log = EventLog::new();
        b.iter(|| {
            sim.update(1.0, &mut log);
        });
    });
}

criterion_group!(benches, bench_tick);
criterion_main!(benches);
