//! Technology diffusion between villages
//!
//! Knowledge leaks along relationships: the spread chance grows with the
//! source's trust in and trade with the target, and shrinks with
//! distance. Candidate scanning is pure and may run on the rayon pool;
//! the random rolls and mutations stay on the coordinator thread.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use crate::core::types::VillageId;
use crate::story::event::{StoryEvent, StoryKind, StorySink};
use crate::village::registry::VillageRegistry;
use crate::village::village::Village;

struct SpreadCandidate {
    source: VillageId,
    target: VillageId,
    technology: String,
    chance: f32,
}

/// Attempt technology spread between every village pair for one tick
pub(crate) fn diffuse_technologies(
    registry: &mut VillageRegistry,
    rng: &mut ChaCha8Rng,
    base_chance: f32,
    parallel_threshold: usize,
    dt: f32,
    sink: &mut dyn StorySink,
) {
    let candidates = scan_candidates(registry, base_chance, parallel_threshold);

    for candidate in candidates {
        let roll: f32 = rng.gen();
        if roll >= candidate.chance * dt {
            continue;
        }

        let source_name = match registry.get(candidate.source) {
            Some(village) => village.name.clone(),
            None => continue,
        };
        let Some(target) = registry.get_mut(candidate.target) else {
            continue;
        };
        // Another source may have delivered the same technology this tick
        if target.knows_technology(&candidate.technology) {
            continue;
        }

        target.learn_technology(candidate.technology.clone());
        let target_name = target.name.clone();
        tracing::info!(
            technology = %candidate.technology,
            from = %source_name,
            to = %target_name,
            "technology spread"
        );

        sink.add_event(StoryEvent {
            kind: StoryKind::Technological,
            title: "Technology Spreads".into(),
            description: format!(
                "{} learns {} from {}",
                target_name, candidate.technology, source_name
            ),
            importance: 0.6,
            tension: 0.2,
            involved: vec![candidate.source.to_string(), candidate.target.to_string()],
            consequences: vec!["Improved relations".into(), "Economic growth".into()],
            requires_resolution: false,
        });
    }
}

fn scan_candidates(
    registry: &VillageRegistry,
    base_chance: f32,
    parallel_threshold: usize,
) -> Vec<SpreadCandidate> {
    let villages = registry.villages();

    let scan = |source: &Village| {
        let mut found = Vec::new();
        for technology in &source.technologies {
            for target in villages {
                if target.id == source.id || target.knows_technology(technology) {
                    continue;
                }
                let chance = spread_chance(source, target) * base_chance;
                if chance > 0.0 {
                    found.push(SpreadCandidate {
                        source: source.id,
                        target: target.id,
                        technology: technology.clone(),
                        chance,
                    });
                }
            }
        }
        found
    };

    if villages.len() >= parallel_threshold {
        // Joined before any roll below reads the results
        villages.par_iter().flat_map_iter(scan).collect()
    } else {
        villages.iter().flat_map(scan).collect()
    }
}

/// Probability per day that knowledge jumps from source to target,
/// before the base-chance scaling.
///
/// Reads only the source's view of the relationship; a pair with no
/// recorded contact contributes zero without creating an entry.
fn spread_chance(source: &Village, target: &Village) -> f32 {
    let (trust, trade) = source
        .relation(target.id)
        .map(|r| (r.trust, r.trade))
        .unwrap_or((0.0, 0.0));
    let distance = source.position.distance(&target.position);

    ((trust + trade / 1000.0) * (1.0 - distance / 1000.0)).clamp(0.0, 1.0)
}
