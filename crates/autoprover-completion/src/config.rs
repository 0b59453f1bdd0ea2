//! Configuration and result types for Knuth-Bendix completion.
//!
//! Default values are carried over unchanged from
//! `examples/original_source/src/completion/knuth_bendix.hpp`'s
//! `KBConfig`, so a caller ported from the C++ gets the same
//! out-of-the-box behavior.

use autoprover_base::EngineError;
use autoprover_term::RewriteRule;

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct KBConfig {
    pub max_iterations: usize,
    pub max_rules: usize,
    pub max_equations: usize,
    pub max_time_seconds: f64,
    pub enable_simplification: bool,
    pub enable_subsumption: bool,
    pub fair_processing: bool,
    pub verbose: bool,
}

impl Default for KBConfig {
    fn default() -> Self {
        KBConfig {
            max_iterations: 10_000,
            max_rules: 1_000,
            max_equations: 5_000,
            max_time_seconds: 300.0,
            enable_simplification: true,
            enable_subsumption: true,
            fair_processing: true,
            verbose: false,
        }
    }
}

impl KBConfig {
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.max_iterations == 0 {
            return Err(EngineError::InvalidConfig {
                field: "max_iterations",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.max_rules == 0 {
            return Err(EngineError::InvalidConfig {
                field: "max_rules",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.max_time_seconds <= 0.0 {
            return Err(EngineError::InvalidConfig {
                field: "max_time_seconds",
                reason: "must be positive".to_string(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Status {
    Success,
    Failure,
    Timeout,
    ResourceLimit,
    Unknown,
}

/// The outcome of a completion run.
pub struct KBResult {
    pub status: Status,
    pub message: String,
    pub final_rules: Vec<RewriteRule>,
    pub iterations: usize,
    pub total_equations_processed: usize,
    pub total_critical_pairs_computed: usize,
    pub elapsed_time_seconds: f64,
}

impl KBResult {
    fn new(status: Status, message: impl Into<String>) -> Self {
        KBResult {
            status,
            message: message.into(),
            final_rules: Vec::new(),
            iterations: 0,
            total_equations_processed: 0,
            total_critical_pairs_computed: 0,
            elapsed_time_seconds: 0.0,
        }
    }

    pub fn make_success(rules: Vec<RewriteRule>, message: impl Into<String>) -> Self {
        let mut result = KBResult::new(Status::Success, message);
        result.final_rules = rules;
        result
    }

    pub fn make_failure(message: impl Into<String>) -> Self {
        KBResult::new(Status::Failure, message)
    }

    pub fn make_timeout(message: impl Into<String>) -> Self {
        KBResult::new(Status::Timeout, message)
    }

    pub fn make_resource_limit(message: impl Into<String>) -> Self {
        KBResult::new(Status::ResourceLimit, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_documented_constants() {
        let c = KBConfig::default();
        assert_eq!(c.max_iterations, 10_000);
        assert_eq!(c.max_rules, 1_000);
        assert_eq!(c.max_equations, 5_000);
        assert_eq!(c.max_time_seconds, 300.0);
        assert!(c.enable_simplification);
        assert!(c.enable_subsumption);
        assert!(c.fair_processing);
        assert!(!c.verbose);
    }

    #[test]
    fn rejects_zero_iterations() {
        let mut c = KBConfig::default();
        c.max_iterations = 0;
        assert!(c.validate().is_err());
    }
}
