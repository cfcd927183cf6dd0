//! ER diagram detector implementation
//!
//! Detects `erDiagram` notation by its header keyword or crow's-foot symbols.

use super::chumsky_parser::CrowsFoot;
use crate::core::Detector;
use tracing::{debug, trace};

/// ER diagram detector implementation
pub struct ErDetector;

impl ErDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ErDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for ErDetector {
    fn detect(&self, input: &str) -> bool {
        let detected = self.confidence(input) > 0.5;
        trace!(input_len = input.len(), detected, "ErDetector::detect called");
        detected
    }

    fn confidence(&self, input: &str) -> f64 {
        let input = input.trim();
        if input.is_empty() {
            return 0.0;
        }

        if input.to_lowercase().starts_with("erdiagram") {
            debug!("Detected ER diagram via erDiagram keyword");
            return 1.0;
        }

        if CrowsFoot::ALL.iter().any(|s| input.contains(s.symbol())) {
            debug!("Detected ER diagram via crow's-foot symbol");
            return 0.8;
        }

        0.0
    }

    fn diagram_type(&self) -> &'static str {
        "er"
    }

    fn patterns(&self) -> Vec<&'static str> {
        let mut patterns = vec!["erDiagram"];
        patterns.extend(CrowsFoot::ALL.iter().map(|s| s.symbol()));
        patterns
    }
}
