/// Observer notified as an extraction run advances.
///
/// The extractor never writes to the console itself; callers that want
/// feedback plug in an implementation of this trait.
pub trait Progress: Send + Sync {
    /// Set the phase label for the current operation (e.g., "Retrieving", "Extracting").
    fn set_phase(&self, phase: &str);

    /// Report that one more entity has been normalized.
    fn entity_processed(&self, processed: usize, total: usize, logical_name: &str);

    /// Finish and clear the progress indicator.
    fn done(&self);
}
