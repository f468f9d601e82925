/// Actions an observer can take during a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop the sweep before its next step.
    ///
    /// Runs that already finished sampling are kept in the returned
    /// [`Summary`](super::Summary).
    StopEarly,
}
