//! Property-based tests for insulation-evo
//!
//! Uses proptest to verify invariants of the operators, the objectives and
//! whole evolution runs.

use std::sync::atomic::{AtomicUsize, Ordering};

use insulation_evo::prelude::*;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn cylinder_genome(k: f64, t: f64) -> RealVector {
    let mut genome = RealVector::new(vec![0.0; 2]);
    genome[CylinderInsulation::CONDUCTIVITY] = k;
    genome[CylinderInsulation::THICKNESS] = t;
    genome
}

/// Scores with `inner` and counts every genome it is handed outside `bounds`
struct BoundsWatch<O> {
    inner: O,
    bounds: MultiBounds,
    escaped: AtomicUsize,
    evaluated: AtomicUsize,
}

impl<O: Objective> BoundsWatch<O> {
    fn new(inner: O, bounds: MultiBounds) -> Self {
        Self {
            inner,
            bounds,
            escaped: AtomicUsize::new(0),
            evaluated: AtomicUsize::new(0),
        }
    }
}

impl<O: Objective> Objective for BoundsWatch<O> {
    fn evaluate(&self, genome: &RealVector, penalty_factor: f64) -> f64 {
        self.evaluated.fetch_add(1, Ordering::Relaxed);
        if !self.bounds.contains_vec(genome.genes()) {
            self.escaped.fetch_add(1, Ordering::Relaxed);
        }
        self.inner.evaluate(genome, penalty_factor)
    }
}

proptest! {
    // ==================== Bounds Properties ====================

    #[test]
    fn bounds_clamp_within_range(
        min in -100.0f64..0.0,
        width in 0.0f64..100.0,
        value in -1000.0f64..1000.0
    ) {
        let bounds = Bounds::new(min, min + width);
        let clamped = bounds.clamp(value);
        prop_assert!(bounds.contains(clamped));
        if bounds.contains(value) {
            prop_assert_eq!(clamped, value);
        }
    }

    #[test]
    fn bounds_violation_zero_inside(
        min in -100.0f64..0.0,
        width in 0.0f64..100.0,
        value in -1000.0f64..1000.0
    ) {
        let bounds = Bounds::new(min, min + width);
        let violation = bounds.violation(value);
        prop_assert!(violation >= 0.0);
        prop_assert_eq!(violation == 0.0, bounds.contains(value));
    }

    // ==================== Population Properties ====================

    #[test]
    fn random_population_within_bounds(
        seed in any::<u64>(),
        size in 1usize..40,
        dim in 1usize..10
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let bounds: MultiBounds = (0..dim).map(|i| (i as f64, i as f64 + 0.5)).collect();
        let population = Population::random(size, &bounds, &mut rng);
        prop_assert_eq!(population.len(), size);
        for individual in population.iter() {
            prop_assert_eq!(individual.genome.dimension(), dim);
            prop_assert!(bounds.contains_vec(individual.genome.genes()));
        }
    }

    // ==================== RealVector Properties ====================

    #[test]
    fn blend_of_identical_parents_is_exact(
        gene in -1e3f64..1e3,
        weight in 0.0f64..=1.0
    ) {
        let parent = RealVector::new(vec![gene, gene * 0.5]);
        prop_assert_eq!(parent.blend(&parent, weight).unwrap(), parent);
    }

    // ==================== Operator Properties ====================

    #[test]
    fn arithmetic_crossover_stays_between_parents(
        seed in any::<u64>(),
        rate in 0.0f64..=1.0,
        genes1 in prop::collection::vec(-10.0..10.0f64, 4),
        genes2 in prop::collection::vec(-10.0..10.0f64, 4)
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let p1 = RealVector::new(genes1);
        let p2 = RealVector::new(genes2);
        let (c1, c2) = ArithmeticCrossover::new(rate).crossover(&p1, &p2, &mut rng).unwrap();

        for i in 0..4 {
            let lo = p1[i].min(p2[i]);
            let hi = p1[i].max(p2[i]);
            prop_assert!(c1[i] >= lo && c1[i] <= hi);
            prop_assert!(c2[i] >= lo && c2[i] <= hi);
            // Children are mirrored around the parents' midpoint
            prop_assert!((c1[i] + c2[i] - p1[i] - p2[i]).abs() < 1e-9);
        }
    }

    #[test]
    fn gaussian_mutation_respects_bounds(
        seed in any::<u64>(),
        rate in 0.0f64..=1.0,
        scale in 0.01f64..5.0
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let bounds = CylinderInsulation::new().bounds();
        let mutation = GaussianMutation::new(rate, MutationStep::Relative(scale));
        let mut genome = Population::random(1, &bounds, &mut rng)[0].genome.clone();
        for _ in 0..20 {
            mutation.mutate(&mut genome, &bounds, &mut rng);
            prop_assert!(bounds.contains_vec(genome.genes()));
        }
    }

    #[test]
    fn tournament_selection_returns_valid_index(
        seed in any::<u64>(),
        size in 2usize..6,
        fitness in prop::collection::vec(0.0f64..100.0, 1..50)
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let selection = TournamentSelection::new(size);
        let index = selection.select(&fitness, &mut rng).unwrap();
        prop_assert!(index < fitness.len());
    }

    // ==================== Objective Properties ====================

    #[test]
    fn quadratic_penalty_monotone(
        a in -10.0f64..10.0,
        b in -10.0f64..10.0,
        factor in 1.0f64..1e6
    ) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(quadratic_penalty(lo, factor) <= quadratic_penalty(hi, factor));
        prop_assert!(quadratic_penalty(lo.min(0.0), factor) == 0.0);
    }

    #[test]
    fn cylinder_cost_never_below_thickness(
        k in 0.02f64..0.084,
        t in 0.005f64..0.08,
        factor in 1.0f64..1e6
    ) {
        let model = CylinderInsulation::new();
        let fitness = model.evaluate(&cylinder_genome(k, t), factor);
        prop_assert!(fitness.is_finite());
        prop_assert!(fitness >= t);
    }

    #[test]
    fn cylinder_heat_flow_falls_with_thickness(
        k in 0.02f64..0.084,
        t in 0.005f64..0.07,
        dt in 0.001f64..0.01
    ) {
        let model = CylinderInsulation::new();
        let thin = model.decode(&cylinder_genome(k, t));
        let thick = model.decode(&cylinder_genome(k, t + dt));
        prop_assert!(model.heat_flow(&thick).unwrap() < model.heat_flow(&thin).unwrap());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(12))]

    // ==================== Evolution Properties ====================

    #[test]
    fn elitism_keeps_best_fitness_monotone(seed in any::<u64>(), size in 2usize..20) {
        let model = CylinderInsulation::new();
        let config = model
            .config()
            .with_seed(seed)
            .with_population_size(size)
            .with_generations(15);
        let result = run(config, model).unwrap();

        let best = result.history.best_fitness_history();
        prop_assert_eq!(best.len(), 15);
        for pair in best.windows(2) {
            prop_assert!(pair[1] <= pair[0]);
        }
        prop_assert!(result.best_fitness <= best[14]);
        prop_assert_eq!(result.evaluations, size * 16);
    }

    #[test]
    fn runs_are_reproducible(seed in any::<u64>()) {
        let model = ConvectiveInsulation::new();
        let config = model.config().with_seed(seed).with_generations(10);
        let first = run(config.clone(), model.clone()).unwrap();
        let second = run(config, model).unwrap();
        prop_assert_eq!(first.to_json().unwrap(), second.to_json().unwrap());
    }

    #[test]
    fn every_evaluated_genome_is_in_bounds(seed in any::<u64>()) {
        let model = CylinderInsulation::new();
        let bounds = model.bounds();
        let watch = BoundsWatch::new(model.clone(), bounds.clone());
        let config = model.config().with_seed(seed).with_generations(30);
        let result = SimpleGA::new(config, &watch).unwrap().run().unwrap();

        prop_assert_eq!(watch.evaluated.load(Ordering::Relaxed), result.evaluations);
        prop_assert_eq!(watch.escaped.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn convective_run_never_rejects_a_boundary_genome(seed in any::<u64>()) {
        let model = ConvectiveInsulation::new();
        let watch = BoundsWatch::new(model.clone(), model.bounds());
        let config = model.config().with_seed(seed).with_generations(30);
        let result = run(config, &watch).unwrap();

        prop_assert_eq!(watch.escaped.load(Ordering::Relaxed), 0);
        for record in &result.history {
            prop_assert!(record.best_fitness < SENTINEL_FITNESS);
        }
    }

    #[test]
    fn every_recorded_genome_is_in_bounds(seed in any::<u64>()) {
        let model = CylinderInsulation::new();
        let bounds = model.bounds();
        let result = run(model.config().with_seed(seed).with_generations(10), model).unwrap();
        for record in &result.history {
            prop_assert!(bounds.contains_vec(record.best_genome.genes()));
        }
        prop_assert!(bounds.contains_vec(result.best_genome.genes()));
    }
}
