//! Convective Insulation Sizing
//!
//! Sizes a layer around a 30 mm pipe at 500 °C losing heat to 75 °C air by
//! conduction and outer-surface convection. Thickness and conductivity are
//! both normalized into the cost, so the optimum trades one against the other
//! along the 120 W boundary. Genes are `[t, k]`.
//!
//! Pass `--soft` to penalize out-of-domain genes quadratically instead of
//! rejecting them, and a file name to write the run as JSON.

use insulation_evo::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1).peekable();
    let soft = args.next_if(|a| a == "--soft").is_some();
    let output = args.next();

    let mut model = ConvectiveInsulation::new();
    if soft {
        model = model.with_domain_policy(DomainPolicy::Quadratic);
    }
    let config = model.config();

    println!("=== Convective Insulation Sizing ===\n");
    println!(
        "population {}, generations {}, seed {}\n",
        config.population_size, config.generations, config.seed
    );

    let result = SimpleGA::new(config, model.clone())?.run()?;

    for record in result.history.iter().step_by(10) {
        println!(
            "gen {:>4}  best {:>10.6}  t {:>8.5} m  k {:>8.5}  Q {:>8.3} W",
            record.generation,
            record.best_fitness,
            record.best_genome[ConvectiveInsulation::THICKNESS],
            record.best_genome[ConvectiveInsulation::CONDUCTIVITY],
            record.observables.get(HEAT_FLOW).copied().unwrap_or(f64::NAN),
        );
    }

    let design = model.decode(&result.best_genome);
    println!("\nBest design:");
    println!("  t = {:.5} m", design.thickness);
    println!("  k = {:.5} W/m.K", design.conductivity);
    println!(
        "  Q = {:.3} W (limit {:.1} W)",
        model.heat_flow(&design).unwrap_or(f64::NAN),
        model.max_heat_flow
    );
    println!("\n{}", result.summary());

    if let Some(path) = output {
        std::fs::write(&path, result.to_json()?)?;
        println!("\nHistory written to {}", path);
    }

    Ok(())
}
