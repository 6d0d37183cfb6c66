//! Tabu Search execution engine.
//!
//! # Algorithm
//!
//! 1. Start from the identity placement and score it.
//! 2. At each iteration:
//!    a. Sample admissible (non-tabu) swaps and rank them by exact delta cost
//!    b. Commit the lowest-delta swap, even when it worsens the score
//!    c. Decay every tenure by one, then set the applied move's tenure
//!    d. Update the best-so-far record if the current score improved
//! 3. Stop when the score reaches the target, the iteration cap is hit, or
//!    no admissible move remains.
//!
//! The current score moves non-monotonically; only the best-so-far record is
//! guaranteed never to regress.

use log::{debug, trace};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::config::TabuConfig;
use super::delta::{global_score, swap_delta};
use super::moves::{CandidateHeap, MoveUniverse, Swap};
use crate::assignment::Assignment;
use crate::instance::QapInstance;

/// Why a run stopped.
///
/// All three are normal terminations: a run that exhausts its candidate heap
/// still returns the best solution found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TerminationReason {
    /// The current score reached the configured target threshold.
    OptimalReached,
    /// The iteration cap was hit.
    IterationCapReached,
    /// No admissible candidate remained (e.g. `sample_size` 0, or every
    /// sampled move tabu).
    NoMovesAvailable,
}

/// Result of a Tabu Search run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TabuResult {
    /// Best assignment found.
    pub best: Assignment,
    /// Score of the best assignment.
    pub best_score: i64,
    /// Iteration at which the best assignment was found (0 = the initial
    /// placement was never improved on).
    pub best_iteration: usize,
    /// Total iterations executed.
    pub iterations: usize,
    /// Why the run stopped.
    pub termination: TerminationReason,
    /// Best score at the end of each iteration.
    pub score_history: Vec<i64>,
}

/// Tabu Search runner.
pub struct TabuRunner;

impl TabuRunner {
    /// Executes Tabu Search on the given instance.
    ///
    /// Deterministic for a fixed [`TabuConfig::seed`]. The instance is never
    /// mutated; the only per-run state is the assignment, the tenure table,
    /// and the running score.
    ///
    /// # Panics
    ///
    /// Panics if the configuration is invalid (call [`TabuConfig::validate`]
    /// first to get a descriptive error).
    pub fn run(instance: &QapInstance, config: &TabuConfig) -> TabuResult {
        config.validate().expect("invalid TabuConfig");

        let mut rng = ChaCha8Rng::seed_from_u64(config.seed.unwrap_or_else(rand::random));
        let n = instance.size();
        let mut universe = MoveUniverse::new(n).expect("instance guarantees n >= 2");
        let tenure_value = (n as f64 * config.tenure_factor).round() as u32;

        let mut assignment = Assignment::identity(n);
        let mut score = global_score(instance, &assignment);

        let mut best = assignment.clone();
        let mut best_score = score;
        let mut best_iteration = 0;

        let mut score_history = Vec::new();
        let mut iteration = 0;

        let termination = loop {
            if config.target_score.is_some_and(|target| score <= target) {
                break TerminationReason::OptimalReached;
            }
            if config.max_iterations > 0 && iteration >= config.max_iterations {
                break TerminationReason::IterationCapReached;
            }

            let sampled = universe.sample(&mut rng, config.sample_size);
            let mut heap = CandidateHeap::new();
            for (swap, delta) in evaluate(instance, &assignment, &sampled, config.parallel) {
                heap.push(swap, delta);
            }

            let Some((swap, delta)) = heap.pop() else {
                break TerminationReason::NoMovesAvailable;
            };

            assignment.swap_locations(swap.i, swap.j);
            score += delta;
            debug_assert_eq!(score, global_score(instance, &assignment));

            universe.decay_all();
            universe.mark_tabu(swap, tenure_value);

            iteration += 1;
            trace!(
                "iteration {iteration}: swapped locations {} and {} (delta {delta}, score {score})",
                swap.i,
                swap.j
            );

            if score < best_score {
                best = assignment.clone();
                best_score = score;
                best_iteration = iteration;
                debug!("new best {best_score} at iteration {iteration}");
            }
            score_history.push(best_score);
        };

        debug!(
            "terminated after {iteration} iterations ({termination:?}), \
             best {best_score} found at iteration {best_iteration}"
        );

        TabuResult {
            best,
            best_score,
            best_iteration,
            iterations: iteration,
            termination,
            score_history,
        }
    }

    /// Runs `trials` independent sequential searches, deriving a distinct
    /// seed per trial from the configured one.
    ///
    /// Useful for averaging over the sampling noise of a single trajectory.
    /// Safe to repeat on one instance because a run never mutates it.
    pub fn run_trials(
        instance: &QapInstance,
        config: &TabuConfig,
        trials: usize,
    ) -> Vec<TabuResult> {
        let base = config.seed.unwrap_or_else(rand::random);
        (0..trials)
            .map(|trial| {
                let config = config.clone().with_seed(base.wrapping_add(trial as u64));
                Self::run(instance, &config)
            })
            .collect()
    }
}

/// Evaluates delta costs for the sampled candidates. Candidate order is
/// preserved in both paths, so tie-breaking (and the trajectory) does not
/// depend on the `parallel` setting.
fn evaluate(
    instance: &QapInstance,
    assignment: &Assignment,
    sampled: &[Swap],
    parallel: bool,
) -> Vec<(Swap, i64)> {
    #[cfg(feature = "parallel")]
    if parallel {
        use rayon::prelude::*;
        return sampled
            .par_iter()
            .map(|&swap| (swap, swap_delta(instance, assignment, swap.i, swap.j)))
            .collect();
    }
    let _ = parallel;
    sampled
        .iter()
        .map(|&swap| (swap, swap_delta(instance, assignment, swap.i, swap.j)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::SquareMatrix;
    use proptest::prelude::*;
    use rand::Rng;

    /// 4-location instance with brute-force-verified optimum 1285, reachable
    /// from the identity placement (score 2035) in a single swap.
    fn fixed_instance() -> QapInstance {
        let distance = SquareMatrix::from_rows(vec![
            vec![0, 35, 20, 10],
            vec![35, 0, 10, 20],
            vec![20, 10, 0, 35],
            vec![10, 20, 35, 0],
        ])
        .expect("valid");
        let flow = SquareMatrix::from_rows(vec![
            vec![0, 21, 8, 6],
            vec![21, 0, 7, 12],
            vec![8, 7, 0, 22],
            vec![6, 12, 22, 0],
        ])
        .expect("valid");
        QapInstance::new(distance, flow).expect("valid")
    }

    fn two_facility_instance() -> QapInstance {
        QapInstance::parse_delimited("0 1\n1 0", "0 5\n5 0").expect("valid")
    }

    fn random_instance(n: usize, seed: u64) -> QapInstance {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut distance = SquareMatrix::new(n);
        let mut flow = SquareMatrix::new(n);
        for i in 0..n {
            for j in (i + 1)..n {
                let d = rng.random_range(1..100);
                let f = rng.random_range(0..50);
                distance.set(i, j, d);
                distance.set(j, i, d);
                flow.set(i, j, f);
                flow.set(j, i, f);
            }
        }
        QapInstance::new(distance, flow).expect("generated instance is valid")
    }

    fn permutation_score(instance: &QapInstance, perm: &[usize]) -> i64 {
        let n = perm.len();
        let mut sum = 0;
        for a in 0..n {
            for b in (a + 1)..n {
                sum += instance.distance().get(a, b) * instance.flow().get(perm[a], perm[b]);
            }
        }
        sum
    }

    fn brute_force_optimum(instance: &QapInstance) -> i64 {
        fn visit(
            instance: &QapInstance,
            prefix: &mut Vec<usize>,
            rest: &mut Vec<usize>,
            best: &mut i64,
        ) {
            if rest.is_empty() {
                *best = (*best).min(permutation_score(instance, prefix));
                return;
            }
            for index in 0..rest.len() {
                let facility = rest.remove(index);
                prefix.push(facility);
                visit(instance, prefix, rest, best);
                prefix.pop();
                rest.insert(index, facility);
            }
        }

        let n = instance.size();
        let mut best = i64::MAX;
        visit(
            instance,
            &mut Vec::with_capacity(n),
            &mut (0..n).collect(),
            &mut best,
        );
        best
    }

    #[test]
    fn test_fixed_instance_optimum_is_1285() {
        let instance = fixed_instance();
        assert_eq!(brute_force_optimum(&instance), 1285);
        assert_eq!(
            global_score(&instance, &Assignment::identity(4)),
            2035
        );
    }

    #[test]
    fn test_finds_known_optimum_with_target() {
        let instance = fixed_instance();
        let config = TabuConfig::default()
            .with_max_iterations(50)
            .with_tenure_factor(1.2)
            .with_target_score(1285)
            .with_seed(7);

        let result = TabuRunner::run(&instance, &config);

        assert_eq!(result.best_score, 1285);
        assert_eq!(result.termination, TerminationReason::OptimalReached);
        // The optimum is one swap away from the identity placement.
        assert_eq!(result.best_iteration, 1);
        assert_eq!(global_score(&instance, &result.best), 1285);
    }

    #[test]
    fn test_finds_known_optimum_without_target() {
        let instance = fixed_instance();
        let config = TabuConfig::default()
            .with_max_iterations(50)
            .with_tenure_factor(1.2)
            .with_seed(7);

        let result = TabuRunner::run(&instance, &config);

        assert_eq!(result.best_score, 1285);
        assert_eq!(result.termination, TerminationReason::IterationCapReached);
        assert_eq!(result.iterations, 50);
        assert!(result.best_score <= 2035);
    }

    #[test]
    fn test_two_facility_instance() {
        let instance = two_facility_instance();
        let result = TabuRunner::run(&instance, &TabuConfig::default().with_seed(1));

        // The single move is applied on the first iteration; the score is
        // swap-invariant for n = 2, and the move then sits tabu until the
        // heap runs dry.
        assert_eq!(result.iterations, 1);
        assert_eq!(result.best_score, 5);
        assert_eq!(result.termination, TerminationReason::NoMovesAvailable);
    }

    #[test]
    fn test_zero_flow_terminates_at_iteration_zero() {
        let distance = SquareMatrix::from_rows(vec![
            vec![0, 4, 2],
            vec![4, 0, 9],
            vec![2, 9, 0],
        ])
        .expect("valid");
        let flow = SquareMatrix::new(3);
        let instance = QapInstance::new(distance, flow).expect("valid");

        let config = TabuConfig::default().with_target_score(0).with_seed(1);
        let result = TabuRunner::run(&instance, &config);

        assert_eq!(result.best_score, 0);
        assert_eq!(result.iterations, 0);
        assert_eq!(result.best_iteration, 0);
        assert_eq!(result.termination, TerminationReason::OptimalReached);
        assert_eq!(result.best, Assignment::identity(3));
    }

    #[test]
    fn test_sample_size_zero_yields_no_moves() {
        let instance = fixed_instance();
        let config = TabuConfig::default().with_sample_size(0).with_seed(1);
        let result = TabuRunner::run(&instance, &config);

        assert_eq!(result.iterations, 0);
        assert_eq!(result.termination, TerminationReason::NoMovesAvailable);
        // The best-so-far record is still returned.
        assert_eq!(result.best, Assignment::identity(4));
        assert_eq!(result.best_score, 2035);
    }

    #[test]
    fn test_best_score_never_regresses() {
        let instance = random_instance(8, 11);
        let config = TabuConfig::default().with_max_iterations(100).with_seed(5);
        let result = TabuRunner::run(&instance, &config);

        assert_eq!(result.score_history.len(), result.iterations);
        for window in result.score_history.windows(2) {
            assert!(
                window[1] <= window[0],
                "best score history should be non-increasing: {} > {}",
                window[1],
                window[0]
            );
        }
    }

    #[test]
    fn test_best_matches_reported_score() {
        let instance = random_instance(7, 23);
        let config = TabuConfig::default().with_max_iterations(60).with_seed(3);
        let result = TabuRunner::run(&instance, &config);

        assert!(result.best.is_consistent());
        assert_eq!(global_score(&instance, &result.best), result.best_score);
        assert!(result.best_iteration <= result.iterations);
    }

    #[test]
    fn test_reproducible_given_seed() {
        let instance = random_instance(6, 17);
        let config = TabuConfig::default()
            .with_max_iterations(40)
            .with_sample_size(5)
            .with_seed(42);

        let a = TabuRunner::run(&instance, &config);
        let b = TabuRunner::run(&instance, &config);

        assert_eq!(a.best_score, b.best_score);
        assert_eq!(a.best_iteration, b.best_iteration);
        assert_eq!(a.best, b.best);
        assert_eq!(a.score_history, b.score_history);
    }

    #[test]
    fn test_run_trials() {
        let instance = fixed_instance();
        let config = TabuConfig::default()
            .with_max_iterations(30)
            .with_tenure_factor(1.2)
            .with_seed(100);

        let results = TabuRunner::run_trials(&instance, &config, 3);

        assert_eq!(results.len(), 3);
        for result in &results {
            assert!(result.best_score <= 2035);
            assert_eq!(global_score(&instance, &result.best), result.best_score);
        }
        // Seeded trials are reproducible as a batch.
        let again = TabuRunner::run_trials(&instance, &config, 3);
        for (a, b) in results.iter().zip(&again) {
            assert_eq!(a.best_score, b.best_score);
            assert_eq!(a.best, b.best);
        }
    }

    #[test]
    #[should_panic(expected = "invalid TabuConfig")]
    fn test_invalid_config_panics() {
        let instance = two_facility_instance();
        let config = TabuConfig::default().with_tenure_factor(-1.0);
        let _ = TabuRunner::run(&instance, &config);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_sequential() {
        let instance = random_instance(10, 31);
        let sequential = TabuConfig::default().with_max_iterations(50).with_seed(9);
        let parallel = sequential.clone().with_parallel(true);

        let a = TabuRunner::run(&instance, &sequential);
        let b = TabuRunner::run(&instance, &parallel);

        assert_eq!(a.best_score, b.best_score);
        assert_eq!(a.best, b.best);
        assert_eq!(a.score_history, b.score_history);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        // With a cap of K the driver performs at most K iterations, and the
        // best result always scores no worse than the identity placement.
        #[test]
        fn test_terminates_within_cap(n in 2usize..7, seed in 0u64..1000) {
            let instance = random_instance(n, seed);
            let config = TabuConfig::default().with_max_iterations(25).with_seed(seed);
            let result = TabuRunner::run(&instance, &config);

            prop_assert!(result.iterations <= 25);
            prop_assert!(
                result.best_score <= global_score(&instance, &Assignment::identity(n))
            );
            prop_assert_eq!(global_score(&instance, &result.best), result.best_score);
        }
    }
}
