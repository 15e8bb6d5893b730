/// Common trait for sample-by-sample filters
///
/// Implemented by FirFilter and IirCascade.
pub trait Filter {
    /// Process a single sample through the filter
    fn process(&mut self, sample: f32) -> f32;

    /// Clear all filter state, keeping the configuration
    fn flush(&mut self);
}
