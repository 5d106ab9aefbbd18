//! Sinusoid Optimization
//!
//! This example maximizes f(x) = sin(x) over [-10, 10] with 20-bit
//! chromosomes, printing progress every few generations.
//!
//! Set `RUST_LOG=bitevo=debug` to see per-generation tracing output.

use bitevo::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Sinusoid Optimization ===\n");

    let config = GAConfig::new()
        .with_population_size(60)
        .with_chromosome_length(20)
        .with_max_generations(150)
        .with_selection(SelectionType::Tournament)
        .with_crossover(CrossoverType::TwoPoint)
        .with_domain(-10.0, 10.0)
        .with_seed(42);

    println!("Configuration:\n{}\n", config.to_json()?);
    if let Some(resolution) = config.resolution() {
        println!("Decoding resolution: {:.3e}\n", resolution);
    }

    let mut ga = GeneticAlgorithm::builder()
        .config(config)
        .evaluator(Sinusoidal::default())
        .build()?;

    let report_every = 10;
    let result = ga.run_with_progress(|generation, stats| {
        if generation % report_every == 0 {
            println!("{}", stats);
        }
    })?;

    println!("\nOptimization complete!");
    println!("  Best fitness: {:.6}", result.best_fitness);
    println!("  Best x:       {:.6}", result.best_x);
    println!("  Diversity:    {:.4}", result.diversity);

    // sin(x) peaks at 1.0; the nearest optima in range are pi/2 + 2k*pi
    let best = ga.best_individual()?;
    println!("\nBest chromosome: {}", best);

    println!("\n{}", ga.statistics().summary());

    Ok(())
}
