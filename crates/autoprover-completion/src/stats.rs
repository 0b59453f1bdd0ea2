//! Completion statistics, grounded on `KBStats` in `knuth_bendix.hpp`.

#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KBStats {
    pub equations_processed: usize,
    pub critical_pairs_computed: usize,
    pub rules_added: usize,
    pub rules_removed: usize,
    pub equations_simplified: usize,
    pub equations_subsumed: usize,
    pub orientation_failures: usize,
}

impl KBStats {
    pub fn reset(&mut self) {
        *self = KBStats::default();
    }
}

impl std::fmt::Display for KBStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "equations_processed={} critical_pairs_computed={} rules_added={} rules_removed={} \
             equations_simplified={} equations_subsumed={} orientation_failures={}",
            self.equations_processed,
            self.critical_pairs_computed,
            self.rules_added,
            self.rules_removed,
            self.equations_simplified,
            self.equations_subsumed,
            self.orientation_failures,
        )
    }
}
