//! Sweeps a glider through a grid of Mach numbers and angles of attack,
//! evaluating each point on its own pooled snapshot.

#[path = "../tests/common/mod.rs"]
mod common;

use aerobind::core::execution::evaluate_batch;
use aerobind::core::vehicle::FlightConditions;
use aerobind::{global_hook, initialize_global, loaded_modules, ConcurrencyMode, EvaluationConfig, SnapshotPool};
use common::{glider, AeroTypes};
use log::info;
use nalgebra::Vector3;

const MACH_STEPS: [f64; 4] = [0.2, 0.4, 0.6, 0.8];
const ALPHA_STEPS: [f64; 5] = [-4.0, 0.0, 4.0, 8.0, 12.0];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .format_timestamp(None)
        .init();

    let types = AeroTypes::new();
    loaded_modules().load(types.module());
    if !initialize_global().is_available() {
        return Err(format!("AeroCore unavailable: {:?}", global_hook().failure()).into());
    }

    let config = EvaluationConfig::new()
        .with_concurrency(ConcurrencyMode::Rayon)
        .with_initial_pool_capacity(8);
    let pool = SnapshotPool::from_hook(global_hook(), config.clone())?;
    let vehicle = glider(&types)?;
    let base = pool.borrow_fresh(&vehicle)?;
    info!(
        "Glider: area {:.2} m², MAC {:.2} m, mass {:.2} t",
        base.area, base.mac, base.total_mass
    );

    let conditions: Vec<FlightConditions> = MACH_STEPS
        .iter()
        .flat_map(|&mach| {
            ALPHA_STEPS.iter().map(move |&alpha| {
                let speed = mach * common::SPEED_OF_SOUND;
                let radians = alpha.to_radians();
                FlightConditions::new("Kerbin")
                    .with_mach(mach)
                    .with_alpha(alpha)
                    .with_altitude(2_000.0)
                    .with_density(1.0)
                    .with_velocity(Vector3::new(speed * radians.cos(), 0.0, -speed * radians.sin()))
            })
        })
        .collect();

    let forces = evaluate_batch(&pool, &base, &conditions, &config)?;
    for (point, result) in conditions.iter().zip(&forces) {
        info!(
            "mach {:.2} alpha {:>5.1}: lift {:>10.1} N, drag {:>9.1} N, net {:?}",
            point.mach,
            point.alpha,
            result.wing_force.z,
            -(result.wing_force.x + result.body_force.x),
            result.total()
        );
    }

    pool.release(base);
    let stats = pool.stats();
    info!(
        "Pool: {} created, {} borrowed, {} released, {} idle",
        stats.created, stats.borrowed, stats.released, stats.idle
    );
    Ok(())
}
