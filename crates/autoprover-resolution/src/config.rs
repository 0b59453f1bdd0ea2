//! Configuration and result types for resolution-based proof search.
//!
//! Defaults carried over from `ResolutionConfig` in
//! `examples/original_source/src/resolution/resolution_prover.hpp`.

use autoprover_clausal::Clause;
use autoprover_completion::KBConfig;

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionStrategy {
    Fifo,
    SmallestFirst,
    UnitPreference,
    /// Currently falls back to FIFO, matching the C++ original's
    /// documented placeholder for this strategy.
    NegativeSelection,
}

#[derive(Debug, Clone)]
pub struct ResolutionConfig {
    pub max_iterations: usize,
    pub max_time_ms: f64,
    pub max_clauses: usize,
    pub use_subsumption: bool,
    pub use_tautology_deletion: bool,
    pub use_factoring: bool,
    pub use_paramodulation: bool,
    pub use_kb_preprocessing: bool,
    pub kb_preprocessing_timeout: f64,
    pub kb_max_rules: usize,
    pub kb_max_equations: usize,
    pub kb_config: KBConfig,
    pub selection_strategy: SelectionStrategy,
}

impl Default for ResolutionConfig {
    fn default() -> Self {
        ResolutionConfig {
            max_iterations: 10_000,
            max_time_ms: 30_000.0,
            max_clauses: 100_000,
            use_subsumption: true,
            use_tautology_deletion: true,
            use_factoring: true,
            use_paramodulation: false,
            use_kb_preprocessing: false,
            kb_preprocessing_timeout: 5.0,
            kb_max_rules: 50,
            kb_max_equations: 20,
            kb_config: KBConfig::default(),
            selection_strategy: SelectionStrategy::UnitPreference,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Status {
    Proved,
    Disproved,
    Timeout,
    Saturated,
    Unknown,
}

/// The outcome of a resolution proof attempt.
pub struct ResolutionProofResult {
    pub status: Status,
    pub final_clauses: Vec<Clause>,
    pub explanation: String,
    pub iterations: usize,
    pub time_elapsed_ms: f64,
}

impl ResolutionProofResult {
    pub fn new(status: Status, explanation: impl Into<String>) -> Self {
        ResolutionProofResult {
            status,
            final_clauses: Vec::new(),
            explanation: explanation.into(),
            iterations: 0,
            time_elapsed_ms: 0.0,
        }
    }

    pub fn is_proved(&self) -> bool {
        self.status == Status::Proved
    }

    pub fn is_disproved(&self) -> bool {
        self.status == Status::Disproved
    }

    pub fn is_timeout(&self) -> bool {
        self.status == Status::Timeout
    }

    pub fn is_conclusive(&self) -> bool {
        self.is_proved() || self.is_disproved()
    }
}
