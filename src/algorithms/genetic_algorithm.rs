//! Binary genetic algorithm
//!
//! This module implements the generational engine: random initialization,
//! elitist replacement, the two-pass evaluation and the run loop.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, instrument, warn};

use crate::config::{CrossoverType, GAConfig, SelectionType};
use crate::diagnostics::{EvolutionStats, GenerationStats};
use crate::error::{ConfigError, EvoResult, OperatorError, StateError};
use crate::fitness::traits::{Evaluator, Objective};
use crate::genome::chromosome::Chromosome;
use crate::operators::crossover::{SinglePointCrossover, TwoPointCrossover, UniformCrossover};
use crate::operators::mutation::BitFlipMutation;
use crate::operators::selection::{
    ElitistPoolSelection, RouletteWheelSelection, TournamentSelection,
};
use crate::operators::traits::{CrossoverOperator, MutationOperator, SelectionOperator};
use crate::population::individual::Individual;
use crate::population::population::Population;
use crate::termination::{
    DiversityConvergence, EvolutionState, MaxGenerations, TerminationCriterion,
};

/// Lifecycle of an engine
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EngineState {
    /// No population exists yet
    Uninitialized,
    /// Generation 0 is evaluated
    PopulationReady,
    /// At least one generation has been bred
    Evolving,
    /// A run finished
    Terminated,
}

/// Selection scheme chosen by the configuration
#[derive(Clone, Debug)]
enum Selector {
    Tournament(TournamentSelection),
    RouletteWheel(RouletteWheelSelection),
    ElitistPool(ElitistPoolSelection),
}

impl Selector {
    fn from_config(config: &GAConfig) -> Self {
        match config.selection_type {
            SelectionType::Tournament => {
                Self::Tournament(TournamentSelection::new(config.tournament_size))
            }
            SelectionType::RouletteWheel => Self::RouletteWheel(RouletteWheelSelection::new()),
            SelectionType::Elitism => {
                Self::ElitistPool(ElitistPoolSelection::new(config.elite_count()))
            }
        }
    }
}

impl SelectionOperator for Selector {
    fn select_index<R: Rng + ?Sized>(
        &self,
        population: &Population,
        objective: Objective,
        rng: &mut R,
    ) -> Result<usize, StateError> {
        match self {
            Self::Tournament(s) => s.select_index(population, objective, rng),
            Self::RouletteWheel(s) => s.select_index(population, objective, rng),
            Self::ElitistPool(s) => s.select_index(population, objective, rng),
        }
    }
}

/// Crossover scheme chosen by the configuration
#[derive(Clone, Debug)]
enum Recombinator {
    SinglePoint(SinglePointCrossover),
    TwoPoint(TwoPointCrossover),
    Uniform(UniformCrossover),
}

impl Recombinator {
    fn from_config(config: &GAConfig) -> Self {
        match config.crossover_type {
            CrossoverType::SinglePoint => Self::SinglePoint(SinglePointCrossover::new()),
            CrossoverType::TwoPoint => Self::TwoPoint(TwoPointCrossover::new()),
            CrossoverType::Uniform => Self::Uniform(UniformCrossover::new()),
        }
    }
}

impl CrossoverOperator for Recombinator {
    fn crossover<R: Rng + ?Sized>(
        &self,
        parent1: &Chromosome,
        parent2: &Chromosome,
        rng: &mut R,
    ) -> Result<(Chromosome, Chromosome), OperatorError> {
        match self {
            Self::SinglePoint(c) => c.crossover(parent1, parent2, rng),
            Self::TwoPoint(c) => c.crossover(parent1, parent2, rng),
            Self::Uniform(c) => c.crossover(parent1, parent2, rng),
        }
    }
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Builder for GeneticAlgorithm
#[derive(Debug, Default)]
pub struct GeneticAlgorithmBuilder {
    config: GAConfig,
    evaluator: Option<Box<dyn Evaluator>>,
}

impl GeneticAlgorithmBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole configuration
    pub fn config(mut self, config: GAConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the function to optimize
    pub fn evaluator<E: Evaluator + 'static>(mut self, evaluator: E) -> Self {
        self.evaluator = Some(Box::new(evaluator));
        self
    }

    /// Set an already boxed function to optimize
    pub fn boxed_evaluator(mut self, evaluator: Box<dyn Evaluator>) -> Self {
        self.evaluator = Some(evaluator);
        self
    }

    /// Set the population size
    pub fn population_size(mut self, size: usize) -> Self {
        self.config.population_size = size;
        self
    }

    /// Set the generation budget
    pub fn max_generations(mut self, generations: usize) -> Self {
        self.config.max_generations = generations;
        self
    }

    /// Set the decoded domain
    pub fn domain(mut self, min_value: f64, max_value: f64) -> Self {
        self.config.min_value = min_value;
        self.config.max_value = max_value;
        self
    }

    /// Fix the random seed
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Build the engine
    pub fn build(self) -> EvoResult<GeneticAlgorithm> {
        let evaluator = self.evaluator.ok_or(ConfigError::MissingEvaluator)?;
        GeneticAlgorithm::new(self.config, evaluator)
    }
}

/// Generational genetic algorithm over binary chromosomes
///
/// Each generation keeps the configured elites verbatim and fills the rest
/// with selected, recombined and mutated offspring. A run stops at
/// `max_generations` or as soon as diversity drops below
/// `convergence_threshold`.
#[derive(Debug)]
pub struct GeneticAlgorithm {
    config: GAConfig,
    evaluator: Box<dyn Evaluator>,
    population: Population,
    statistics: EvolutionStats,
    rng: StdRng,
    current_generation: usize,
    state: EngineState,
}

impl GeneticAlgorithm {
    /// Create an engine after validating the configuration
    pub fn new(config: GAConfig, evaluator: Box<dyn Evaluator>) -> EvoResult<Self> {
        config.validate()?;
        warn_on_direction_mismatch(&config, evaluator.as_ref());

        Ok(Self {
            rng: make_rng(config.seed),
            config,
            evaluator,
            population: Population::new(),
            statistics: EvolutionStats::new(),
            current_generation: 0,
            state: EngineState::Uninitialized,
        })
    }

    /// Create a builder for GeneticAlgorithm
    pub fn builder() -> GeneticAlgorithmBuilder {
        GeneticAlgorithmBuilder::new()
    }

    /// Run a fresh evolution and return the final generation's statistics
    pub fn run(&mut self) -> EvoResult<GenerationStats> {
        self.run_with_progress(|_, _| {})
    }

    /// Run a fresh evolution, reporting every generation to `callback`
    ///
    /// The callback sees generation 0 first, then each bred generation in
    /// order.
    #[instrument(
        level = "info",
        skip(self, callback),
        fields(
            evaluator = %self.evaluator.name(),
            population_size = self.config.population_size,
            max_generations = self.config.max_generations
        )
    )]
    pub fn run_with_progress<F>(&mut self, mut callback: F) -> EvoResult<GenerationStats>
    where
        F: FnMut(usize, &GenerationStats),
    {
        let start_time = Instant::now();
        info!(
            expression = %self.evaluator.expression(),
            selection = ?self.config.selection_type,
            crossover = ?self.config.crossover_type,
            "Starting evolution"
        );

        if self.config.selection_type == SelectionType::Tournament {
            let effective = TournamentSelection::new(self.config.tournament_size)
                .effective_size(self.config.population_size);
            if effective != self.config.tournament_size {
                warn!(
                    configured = self.config.tournament_size,
                    effective, "Tournament size does not fit the population, falling back"
                );
            }
        }

        self.initialize_population()?;
        let initial = self.calculate_generation_stats()?;
        self.statistics.record(initial.clone());
        callback(0, &initial);

        let max_generations = MaxGenerations::new(self.config.max_generations);
        let convergence = DiversityConvergence::new(self.config.convergence_threshold);
        let criteria: [&dyn TerminationCriterion; 2] = [&convergence, &max_generations];

        let (last, reason) = loop {
            let stats = self.evolve_generation()?;
            callback(stats.generation, &stats);

            let state = EvolutionState {
                generation: stats.generation,
                diversity: stats.diversity,
                best_fitness: stats.best_fitness,
            };
            if let Some(criterion) = criteria.iter().find(|c| c.should_terminate(&state)) {
                break (stats, criterion.reason());
            }
        };

        self.statistics.set_termination_reason(reason);
        self.statistics.set_runtime(start_time.elapsed());
        self.state = EngineState::Terminated;

        info!(
            generations = last.generation,
            best_fitness = last.best_fitness,
            best_x = last.best_x,
            %reason,
            runtime_ms = self.statistics.total_runtime_ms,
            "Evolution finished"
        );
        Ok(last)
    }

    /// Replace the population with random individuals and evaluate them
    ///
    /// Clears the run history and resets the generation counter.
    pub fn initialize_population(&mut self) -> EvoResult<()> {
        self.population = Population::random(
            self.config.population_size,
            self.config.chromosome_length,
            &mut self.rng,
        );
        self.current_generation = 0;
        self.statistics.clear();
        self.state = EngineState::PopulationReady;
        self.evaluate_population()?;

        debug!(
            population_size = self.population.len(),
            diversity = self.population.diversity(),
            "Initialized population"
        );
        Ok(())
    }

    /// Evaluate every unevaluated individual and refresh all percentages
    pub fn evaluate_population(&mut self) -> EvoResult<()> {
        self.ensure_initialized()?;
        self.population.evaluate(
            self.evaluator.as_ref(),
            self.config.min_value,
            self.config.max_value,
            self.config.objective(),
        )
    }

    /// Breed the next generation, evaluate it and record its statistics
    #[instrument(
        level = "debug",
        skip(self),
        fields(generation = self.current_generation + 1)
    )]
    pub fn evolve_generation(&mut self) -> EvoResult<GenerationStats> {
        self.ensure_initialized()?;
        if !self.population.all_evaluated() {
            self.evaluate_population()?;
        }

        let objective = self.config.objective();
        let size = self.config.population_size;
        self.population.sort_by_fitness(objective)?;

        let selector = Selector::from_config(&self.config);
        let recombinator = Recombinator::from_config(&self.config);
        let mutation = BitFlipMutation::new(self.config.mutation_rate);

        let elite_count = self.config.elite_count().min(self.population.len());
        let mut next: Population = self
            .population
            .iter()
            .take(elite_count)
            .cloned()
            .collect();

        while next.len() < size {
            let parent1 = selector.select(&self.population, objective, &mut self.rng)?;
            let parent2 = selector.select(&self.population, objective, &mut self.rng)?;

            let (child1, child2) = if self.rng.gen::<f64>() < self.config.crossover_rate {
                recombinator.crossover(
                    parent1.chromosome(),
                    parent2.chromosome(),
                    &mut self.rng,
                )?
            } else {
                (parent1.into_chromosome(), parent2.into_chromosome())
            };

            for chromosome in [child1, child2] {
                if next.len() == size {
                    break;
                }
                let mut offspring = Individual::new(chromosome);
                mutation.mutate_individual(&mut offspring, &mut self.rng);
                next.push(offspring);
            }
        }

        self.population = next;
        self.current_generation += 1;
        self.state = EngineState::Evolving;
        self.evaluate_population()?;

        let stats = self.calculate_generation_stats()?;
        self.statistics.record(stats.clone());
        debug!(
            best_fitness = stats.best_fitness,
            average_fitness = stats.average_fitness,
            best_x = stats.best_x,
            diversity = stats.diversity,
            elite_count,
            "Generation complete"
        );
        Ok(stats)
    }

    /// Snapshot of the current population
    pub fn calculate_generation_stats(&self) -> EvoResult<GenerationStats> {
        self.ensure_initialized()?;
        GenerationStats::from_population(
            &self.population,
            self.current_generation,
            self.config.min_value,
            self.config.max_value,
            self.config.objective(),
        )
    }

    /// Get the current population
    pub fn population(&self) -> &Population {
        &self.population
    }

    /// Get the run history
    pub fn statistics(&self) -> &EvolutionStats {
        &self.statistics
    }

    /// Get the best individual of the current population
    pub fn best_individual(&self) -> EvoResult<&Individual> {
        self.ensure_initialized()?;
        Ok(self.population.best(self.config.objective())?)
    }

    /// Get the worst individual of the current population
    pub fn worst_individual(&self) -> EvoResult<&Individual> {
        self.ensure_initialized()?;
        Ok(self.population.worst(self.config.objective())?)
    }

    /// Diversity of the current population
    pub fn diversity(&self) -> f64 {
        self.population.diversity()
    }

    /// Check the current population against the convergence threshold
    pub fn has_converged(&self) -> bool {
        self.state != EngineState::Uninitialized
            && DiversityConvergence::new(self.config.convergence_threshold)
                .is_converged(self.diversity())
    }

    /// Get the current generation number
    pub fn current_generation(&self) -> usize {
        self.current_generation
    }

    /// Get the lifecycle state
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Get the configuration
    pub fn config(&self) -> &GAConfig {
        &self.config
    }

    /// Get the function being optimized
    pub fn evaluator(&self) -> &dyn Evaluator {
        self.evaluator.as_ref()
    }

    /// Swap the function to optimize
    ///
    /// Every cached fitness is cleared; call
    /// [`evaluate_population`](Self::evaluate_population) to score the
    /// current population against the new function.
    pub fn set_fitness_function(&mut self, evaluator: Box<dyn Evaluator>) {
        warn_on_direction_mismatch(&self.config, evaluator.as_ref());
        info!(evaluator = %evaluator.name(), "Fitness function replaced");
        self.evaluator = evaluator;
        self.population.invalidate_fitness();
    }

    /// Replace the configuration
    ///
    /// A change of population size or chromosome length resets the run. A
    /// change of domain or direction invalidates the cached fitness.
    pub fn update_config(&mut self, config: GAConfig) -> EvoResult<()> {
        config.validate()?;
        warn_on_direction_mismatch(&config, self.evaluator.as_ref());

        let reshaped = config.population_size != self.config.population_size
            || config.chromosome_length != self.config.chromosome_length;
        let rescored = config.min_value != self.config.min_value
            || config.max_value != self.config.max_value
            || config.is_maximization != self.config.is_maximization;
        let reseeded = config.seed != self.config.seed;
        self.config = config;

        if reshaped {
            self.reset();
        } else {
            if reseeded {
                self.rng = make_rng(self.config.seed);
            }
            if rescored {
                self.population.invalidate_fitness();
            }
        }
        Ok(())
    }

    /// Discard the population and history and reseed the random generator
    pub fn reset(&mut self) {
        self.population = Population::new();
        self.statistics.clear();
        self.current_generation = 0;
        self.state = EngineState::Uninitialized;
        self.rng = make_rng(self.config.seed);
    }

    fn ensure_initialized(&self) -> Result<(), StateError> {
        if self.state == EngineState::Uninitialized {
            return Err(StateError::NotInitialized);
        }
        Ok(())
    }
}

fn warn_on_direction_mismatch(config: &GAConfig, evaluator: &dyn Evaluator) {
    if evaluator.is_maximization() != config.is_maximization {
        warn!(
            evaluator = %evaluator.name(),
            config_maximization = config.is_maximization,
            "Evaluator direction differs from configuration; using configuration"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EvolutionError;
    use crate::fitness::benchmarks::{FnEvaluator, Linear, Quadratic};

    fn small_config() -> GAConfig {
        GAConfig::new()
            .with_population_size(20)
            .with_chromosome_length(16)
            .with_max_generations(15)
            .with_seed(1234)
    }

    fn engine(config: GAConfig) -> GeneticAlgorithm {
        GeneticAlgorithm::new(config, Box::new(Linear::default())).unwrap()
    }

    #[test]
    fn test_new_validates_config() {
        let err = GeneticAlgorithm::new(
            GAConfig::new().with_population_size(0),
            Box::new(Linear::default()),
        )
        .unwrap_err();
        assert_eq!(
            err,
            EvolutionError::Config(ConfigError::NonPositive {
                field: "population_size"
            })
        );
    }

    #[test]
    fn test_builder_requires_evaluator() {
        let err = GeneticAlgorithm::builder().build().unwrap_err();
        assert_eq!(err, EvolutionError::Config(ConfigError::MissingEvaluator));

        let ga = GeneticAlgorithm::builder()
            .evaluator(Linear::default())
            .population_size(10)
            .seed(3)
            .build()
            .unwrap();
        assert_eq!(ga.config().population_size, 10);
        assert_eq!(ga.state(), EngineState::Uninitialized);
    }

    #[test]
    fn test_operations_before_initialization() {
        let mut ga = engine(small_config());
        let not_initialized = EvolutionError::State(StateError::NotInitialized);
        assert_eq!(ga.best_individual().unwrap_err(), not_initialized);
        assert_eq!(ga.worst_individual().unwrap_err(), not_initialized);
        assert_eq!(ga.calculate_generation_stats().unwrap_err(), not_initialized);
        assert_eq!(ga.evolve_generation().unwrap_err(), not_initialized);
        assert!(!ga.has_converged());
    }

    #[test]
    fn test_initialize_population() {
        let mut ga = engine(small_config());
        ga.initialize_population().unwrap();

        assert_eq!(ga.state(), EngineState::PopulationReady);
        assert_eq!(ga.population().len(), 20);
        assert!(ga.population().all_evaluated());
        assert_eq!(ga.current_generation(), 0);
        assert!(ga.statistics().generations.is_empty());
    }

    #[test]
    fn test_evolve_generation_keeps_size_and_elite() {
        let mut ga = engine(small_config().with_elitism_rate(0.1));
        ga.initialize_population().unwrap();
        let best_before = ga.best_individual().unwrap().fitness().unwrap();

        let stats = ga.evolve_generation().unwrap();
        assert_eq!(stats.generation, 1);
        assert_eq!(ga.current_generation(), 1);
        assert_eq!(ga.state(), EngineState::Evolving);
        assert_eq!(ga.population().len(), 20);
        assert!(stats.best_fitness >= best_before);
        assert_eq!(ga.statistics().num_generations(), 1);
    }

    #[test]
    fn test_odd_population_size() {
        let mut ga = engine(small_config().with_population_size(7).with_elitism_rate(0.0));
        ga.initialize_population().unwrap();
        ga.evolve_generation().unwrap();
        assert_eq!(ga.population().len(), 7);
    }

    #[test]
    fn test_run_records_history_and_reason() {
        let mut ga = engine(small_config().with_convergence_threshold(0.0));
        let last = ga.run().unwrap();

        assert_eq!(last.generation, 15);
        assert_eq!(ga.state(), EngineState::Terminated);
        assert_eq!(ga.statistics().num_generations(), 16);
        assert_eq!(
            ga.statistics().termination_reason,
            Some(crate::termination::TerminationReason::MaxGenerations)
        );
    }

    #[test]
    fn test_set_fitness_function_invalidates() {
        let mut ga = engine(small_config());
        ga.initialize_population().unwrap();
        ga.set_fitness_function(Box::new(Quadratic::new(-1.0, 0.0, 0.0, true)));

        assert!(!ga.population().all_evaluated());
        assert_eq!(
            ga.best_individual().unwrap_err(),
            EvolutionError::State(StateError::FitnessNotEvaluated)
        );
        ga.evaluate_population().unwrap();
        assert!(ga.best_individual().unwrap().fitness().unwrap() <= 0.0);
        assert_eq!(ga.evaluator().name(), "Quadratic Function");
    }

    #[test]
    fn test_update_config_resets_on_size_change() {
        let mut ga = engine(small_config());
        ga.initialize_population().unwrap();
        ga.evolve_generation().unwrap();

        ga.update_config(small_config().with_mutation_rate(0.05)).unwrap();
        assert_eq!(ga.state(), EngineState::Evolving);
        assert_eq!(ga.current_generation(), 1);

        ga.update_config(small_config().with_population_size(30)).unwrap();
        assert_eq!(ga.state(), EngineState::Uninitialized);
        assert!(ga.population().is_empty());
        assert_eq!(ga.current_generation(), 0);
    }

    #[test]
    fn test_update_config_rejects_invalid() {
        let mut ga = engine(small_config());
        assert!(ga
            .update_config(small_config().with_domain(5.0, -5.0))
            .is_err());
        assert_eq!(ga.config().min_value, -10.0);
    }

    #[test]
    fn test_update_config_domain_change_invalidates() {
        let mut ga = engine(small_config());
        ga.initialize_population().unwrap();
        ga.update_config(small_config().with_domain(0.0, 1.0)).unwrap();
        assert!(!ga.population().all_evaluated());
    }

    #[test]
    fn test_reset() {
        let mut ga = engine(small_config());
        ga.run().unwrap();
        ga.reset();
        assert_eq!(ga.state(), EngineState::Uninitialized);
        assert!(ga.statistics().generations.is_empty());
        assert!(ga.population().is_empty());
    }

    #[test]
    fn test_config_direction_wins() {
        // Evaluator says maximize, configuration says minimize
        let evaluator = FnEvaluator::new("identity", true, |x| x);
        let mut ga = GeneticAlgorithm::new(
            small_config().with_maximization(false),
            Box::new(evaluator),
        )
        .unwrap();
        ga.initialize_population().unwrap();

        let best = ga.best_individual().unwrap().fitness().unwrap();
        let worst = ga.worst_individual().unwrap().fitness().unwrap();
        assert!(best <= worst);
    }
}
