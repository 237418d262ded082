/*!
 * Progress reporting for clone operations
 */

/// Trait for reporting clone progress
pub trait ProgressReporter {
    /// Called with progress information while objects are transferred
    fn report(&self, progress: &CloneProgress);
}

/// Transfer progress for a clone in flight
#[derive(Debug, Clone)]
pub struct CloneProgress {
    /// Total number of objects to download
    pub total_objects: usize,
    /// Number of received objects
    pub received_objects: usize,
    /// Number of bytes received
    pub received_bytes: usize,
}

impl CloneProgress {
    /// Get the progress percentage
    pub fn percentage(&self) -> u8 {
        if self.total_objects == 0 {
            return 0;
        }

        ((self.received_objects * 100) / self.total_objects) as u8
    }
}

// Implement ProgressReporter for closures
impl<F> ProgressReporter for F
where
    F: Fn(&CloneProgress),
{
    fn report(&self, progress: &CloneProgress) {
        self(progress)
    }
}
