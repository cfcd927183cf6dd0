//! Foreign-key constraint names, unique within one script.

use std::collections::HashSet;

use tracing::debug;

/// Longest constraint name emitted, in characters.
pub const MAX_CONSTRAINT_NAME_LEN: usize = 63;

const FALLBACK_BASE_LEN: usize = 60;
const MAX_FALLBACK_SUFFIX: usize = 999;

/// Hands out constraint names, remembering every name already used.
///
/// Names are compared case-insensitively so they stay distinct in dialects
/// that fold identifier case.
#[derive(Debug, Default)]
pub struct ConstraintNamer {
    used: HashSet<String>,
}

impl ConstraintNamer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name for a constraint on `fk_table.fk_column` referencing
    /// `ref_table.ref_column`.
    ///
    /// Tries four patterns from most to least specific, then the shortest
    /// one with a numeric suffix. `None` once all suffixes are taken.
    pub fn next_name(
        &mut self,
        fk_table: &str,
        fk_column: &str,
        ref_table: &str,
        ref_column: &str,
    ) -> Option<String> {
        let (fk_table, fk_column) = (sanitize(fk_table), sanitize(fk_column));
        let (ref_table, ref_column) = (sanitize(ref_table), sanitize(ref_column));

        let candidates = [
            format!("FK_{}_{}_{}_{}", fk_table, fk_column, ref_table, ref_column),
            format!("FK_{}_{}_{}", fk_table, fk_column, ref_table),
            format!("FK_{}_{}_{}", fk_table, ref_table, fk_column),
            format!("FK_{}_{}", fk_table, ref_table),
        ];
        for candidate in &candidates {
            let name = truncate(candidate, MAX_CONSTRAINT_NAME_LEN);
            if self.claim(&name) {
                return Some(name);
            }
        }

        let base = truncate(&candidates[3], FALLBACK_BASE_LEN);
        for suffix in 1..=MAX_FALLBACK_SUFFIX {
            let name = format!("{}{}", base, suffix);
            if self.claim(&name) {
                debug!(name = %name, "Constraint name needed a numeric suffix");
                return Some(name);
            }
        }
        None
    }

    fn claim(&mut self, name: &str) -> bool {
        self.used.insert(name.to_lowercase())
    }
}

/// Strip everything that is not alphanumeric.
fn sanitize(part: &str) -> String {
    part.chars().filter(|c| c.is_alphanumeric()).collect()
}

fn truncate(name: &str, max: usize) -> String {
    name.chars().take(max).collect()
}
