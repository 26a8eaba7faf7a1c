//! Cylinder Insulation Sizing
//!
//! Minimizes the insulation thickness around a 0.5 m pipe while keeping the
//! conducted heat flow under 120 W. Genes are `[k, t]`.
//!
//! The default box caps the thickness at 80 mm, which cannot reach the heat
//! flow limit; pass `--wide` to search up to 400 mm instead. A second argument
//! names a file to write the full run (history included) as JSON.
//!
//! ```text
//! cargo run --example cylinder_insulation -- --wide history.json
//! ```

use insulation_evo::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1).peekable();
    let wide = args.next_if(|a| a == "--wide").is_some();
    let output = args.next();

    let model = CylinderInsulation::new();
    let mut config = model.config();
    if wide {
        config = config.with_bounds(vec![(0.02, 0.084), (0.005, 0.4)].into_iter().collect());
    }

    println!("=== Cylinder Insulation Sizing ===\n");
    println!("{}\n", config.to_json()?);

    let result = run(config, model.clone())?;

    for record in result.history.iter().step_by(10) {
        println!(
            "gen {:>4}  best {:>14.6e}  mean {:>14.6e}  Q {:>9.3} W",
            record.generation,
            record.best_fitness,
            record.mean_fitness,
            record.observables.get(HEAT_FLOW).copied().unwrap_or(f64::NAN),
        );
    }

    let design = model.decode(&result.best_genome);
    let heat_flow = model.heat_flow(&design).unwrap_or(f64::NAN);
    println!("\nBest design:");
    println!("  k = {:.5} W/m.K", design.conductivity);
    println!("  t = {:.5} m", design.thickness);
    println!("  Q = {:.3} W (limit {:.1} W)", heat_flow, model.max_heat_flow);
    if heat_flow > model.max_heat_flow {
        println!("  heat flow limit not met inside the search box");
    }
    println!("\n{}", result.summary());

    if let Some(path) = output {
        std::fs::write(&path, result.to_json()?)?;
        println!("\nHistory written to {}", path);
    }

    Ok(())
}
