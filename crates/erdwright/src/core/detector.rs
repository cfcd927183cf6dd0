//! Core detector trait for diagram type identification

/// Core trait for diagram type detectors
///
/// Each diagram type provides a detector that can recognize its
/// specific syntax patterns.
///
/// # Example
/// ```
/// use erdwright::core::Detector;
/// use erdwright::plugins::er::ErDetector;
///
/// let detector = ErDetector::new();
/// assert!(detector.detect("erDiagram\n    User ||--o{ Post : writes"));
/// ```
pub trait Detector: Send + Sync {
    /// Detect if the input matches this diagram type
    fn detect(&self, input: &str) -> bool;

    /// Get the confidence level of the detection (0.0 to 1.0)
    fn confidence(&self, input: &str) -> f64;

    /// Get the diagram type name
    fn diagram_type(&self) -> &'static str;

    /// Get key patterns that this detector looks for
    fn patterns(&self) -> Vec<&'static str>;
}
