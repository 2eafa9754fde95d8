//! CLI command implementations.

use elastica_contact::HalfSpace;
use elastica_solver::XpbdSolver;
use elastica_telemetry::sinks::TracingSink;
use elastica_types::{ElasticaError, ElasticaResult};

use crate::scenario::ScenarioConfig;

fn load_config(path: &str) -> ElasticaResult<ScenarioConfig> {
    let text = std::fs::read_to_string(path)?;
    if path.ends_with(".json") {
        serde_json::from_str(&text).map_err(|e| ElasticaError::Serialization(e.to_string()))
    } else {
        toml::from_str(&text).map_err(|e| ElasticaError::Serialization(e.to_string()))
    }
}

/// Run a scenario from a config file.
pub fn simulate(config_path: &str) -> ElasticaResult<()> {
    let config = load_config(config_path)?;
    config.solver.validate()?;
    let params = config.scenario.parameters();
    params.validate()?;

    let mut solver = XpbdSolver::new(config.solver)?;
    solver
        .bus_mut()
        .add_sink(Box::new(TracingSink::new(tracing::Level::INFO)));
    solver.add_body(config.scenario.build_body()?);
    if let Some(height) = config.scenario.floor {
        solver.set_detector(Box::new(HalfSpace::floor(height)));
    }
    solver.setup(&[params])?;

    println!("Elastica Simulation");
    println!("───────────────────");
    println!("Config:      {config_path}");
    println!(
        "Particles:   {}",
        solver.bodies()[0].particles().len()
    );
    println!("Constraints: {}", solver.constraint_count());
    println!(
        "Steps:       {} ({} substeps, {} iterations)",
        config.scenario.steps, solver.config().substeps, solver.config().iterations
    );
    println!();

    for _ in 0..config.scenario.steps {
        solver.step()?;
    }

    let (min_y, max_y) = solver.bodies()[0]
        .particles()
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
            (lo.min(p.x.y), hi.max(p.x.y))
        });
    println!("Done after {:.3}s simulated.", solver.sim_time());
    println!("Final Y range: [{min_y:.4}, {max_y:.4}]");
    Ok(())
}

/// Validate a scenario config file.
pub fn validate(path: &str) -> ElasticaResult<()> {
    let config = load_config(path)?;
    config.solver.validate()?;
    config.scenario.parameters().validate()?;
    config.scenario.build_body()?;
    println!("Config is valid: {path}");
    Ok(())
}
