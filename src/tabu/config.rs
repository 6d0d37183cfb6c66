//! Tabu Search configuration.

/// Configuration parameters for the QAP Tabu Search.
///
/// # Examples
///
/// ```
/// use u_qap::tabu::TabuConfig;
///
/// let config = TabuConfig::default()
///     .with_max_iterations(500)
///     .with_tenure_factor(1.2)
///     .with_sample_size(200)
///     .with_seed(42);
/// assert_eq!(config.max_iterations, 500);
/// assert_eq!(config.sample_size, Some(200));
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TabuConfig {
    /// Maximum number of iterations. 0 = no cap (not recommended: with no
    /// target score the search then only stops if the candidate heap runs
    /// dry).
    pub max_iterations: usize,

    /// Stop as soon as the current score is ≤ this threshold.
    ///
    /// `None` disables the check. The threshold is problem-specific, e.g.
    /// a known optimum or an acceptable bound.
    pub target_score: Option<i64>,

    /// Multiplier on the base tenure.
    ///
    /// An applied move stays tabu for `round(tenure_factor * n)` iterations,
    /// where `n` is the instance size. Must be finite and non-negative;
    /// 0 disables tabu memory entirely.
    pub tenure_factor: f64,

    /// Number of moves sampled from the admissible pool each iteration.
    ///
    /// `None` (the default) ranks the entire admissible pool. A sampled
    /// shortlist trades solution quality for iteration speed on large
    /// instances.
    pub sample_size: Option<usize>,

    /// Random seed for reproducibility.
    ///
    /// `None` draws a random seed; a fixed seed makes the whole trajectory
    /// deterministic.
    pub seed: Option<u64>,

    /// Whether to evaluate sampled candidates in parallel using rayon.
    ///
    /// Only effective with the `parallel` crate feature; candidate order is
    /// preserved, so the trajectory is identical either way.
    pub parallel: bool,
}

impl Default for TabuConfig {
    fn default() -> Self {
        Self {
            max_iterations: 200,
            target_score: None,
            tenure_factor: 1.0,
            sample_size: None,
            seed: None,
            parallel: false,
        }
    }
}

impl TabuConfig {
    /// Sets the iteration cap (0 = no cap).
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Sets the target score threshold.
    pub fn with_target_score(mut self, score: i64) -> Self {
        self.target_score = Some(score);
        self
    }

    /// Sets the tenure factor.
    pub fn with_tenure_factor(mut self, factor: f64) -> Self {
        self.tenure_factor = factor;
        self
    }

    /// Sets the per-iteration candidate sample size.
    pub fn with_sample_size(mut self, n: usize) -> Self {
        self.sample_size = Some(n);
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enables or disables parallel candidate evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validates the configuration.
    ///
    /// Returns `Err` with a description if any parameter is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if !self.tenure_factor.is_finite() {
            return Err("tenure_factor must be finite".into());
        }
        if self.tenure_factor < 0.0 {
            return Err("tenure_factor must be non-negative".into());
        }
        Ok(())
    }
}
