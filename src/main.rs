//! Hearthvale - Entry Point
//!
//! Headless demo runner: founds a handful of villages, wires trade
//! routes and a starter alliance between them, then advances the
//! simulation day by day and prints a summary of what emerged.

use std::path::PathBuf;

use clap::Parser;

use hearthvale::coordinator::VillageCoordinator;
use hearthvale::core::config::SimulationConfig;
use hearthvale::core::error::Result;
use hearthvale::core::types::{ResourceKind, Vec2};
use hearthvale::save::WorldSnapshot;
use hearthvale::story::tracker::StoryTracker;
use hearthvale::village::diplomacy::AgreementKind;

/// Headless village simulation runner
#[derive(Parser, Debug)]
#[command(name = "hearthvale")]
#[command(about = "Run the village simulation and report what emerged")]
struct Args {
    /// Simulated days to run
    #[arg(long, default_value_t = 365.0)]
    days: f32,

    /// Days advanced per tick
    #[arg(long, default_value_t = 1.0)]
    dt: f32,

    /// Random seed for repeatable runs
    #[arg(long)]
    seed: Option<u64>,

    /// Agents in the home settlement's economy
    #[arg(long, default_value_t = 30)]
    agents: usize,

    /// Write a world snapshot here when the run ends
    #[arg(long)]
    snapshot: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("hearthvale=info")
        .init();

    let args = Args::parse();

    let mut config = SimulationConfig::default();
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    config.validate()?;

    tracing::info!(days = args.days, seed = config.seed, "Hearthvale starting");

    let mut sim = VillageCoordinator::new(config).with_home_economy(args.agents);

    // The founding three, as every run begins
    let rivertown = sim.add_village("Rivertown", Vec2::new(0.0, 0.0));
    let hillcrest = sim.add_village("Hillcrest", Vec2::new(500.0, -300.0));
    let forestkeep = sim.add_village("Forestkeep", Vec2::new(-400.0, 200.0));

    sim.create_trade_route(rivertown, hillcrest, vec![ResourceKind::Food, ResourceKind::Tools]);
    sim.create_trade_route(hillcrest, forestkeep, vec![ResourceKind::Wood]);
    sim.create_trade_route(forestkeep, rivertown, vec![ResourceKind::Wood, ResourceKind::Stone]);

    sim.create_diplomatic_agreement(
        rivertown,
        hillcrest,
        AgreementKind::Alliance,
        vec!["mutual defense".into(), "shared granaries".into()],
    );

    // Seed early knowledge so diffusion has something to spread
    if let Some(village) = sim.village_mut(rivertown) {
        village.learn_technology("Three-Field Rotation");
    }
    sim.technology_mut().start_research("Basic Metallurgy");

    let mut tracker = StoryTracker::new();
    let mut day = 0.0;
    while day < args.days {
        sim.update(args.dt, &mut tracker);
        tracker.update(args.dt);
        day += args.dt;
    }

    print_summary(&sim, &tracker);

    if let Some(path) = args.snapshot {
        let snapshot = WorldSnapshot::capture(&sim, tracker.arcs());
        snapshot.write_to(&path)?;
        tracing::info!(path = %path.display(), "snapshot written");
    }

    Ok(())
}

fn print_summary(sim: &VillageCoordinator, tracker: &StoryTracker) {
    println!("\n=== HEARTHVALE ===");

    let climate = sim.environment().current_climate();
    println!(
        "Season: {:?}, weather {:?}, {:.1} degrees",
        climate.season, climate.weather, climate.temperature
    );

    println!("\nVillages:");
    for village in sim.registry().iter() {
        println!(
            "  {:<12} pop {:>5}  prosperity {:.2}  influence {:.2}  food {:>8.1}  techs {}",
            village.name,
            village.population_count(),
            village.prosperity,
            village.influence,
            village.resource(ResourceKind::Food),
            village.technologies.len(),
        );
    }

    println!("\nMarket prices:");
    for kind in ResourceKind::ALL {
        println!(
            "  {:<6} {:>6.1}",
            format!("{:?}", kind),
            sim.market().current_price(kind, sim.environment())
        );
    }

    if let Some(economy) = sim.economy() {
        println!(
            "\nHome economy: {} agents, wealth per capita {:.1}",
            economy.agents().len(),
            economy.average_wealth_per_capita()
        );
    }

    println!(
        "\nStory: {} active arcs, global tension {:.2}",
        tracker.arcs().len(),
        tracker.global_tension()
    );
    for arc in tracker.arcs() {
        println!(
            "  {:<14} progression {:.2}  tension {:.2}  events {}",
            arc.name,
            arc.progression,
            arc.tension,
            arc.events.len()
        );
    }
}
