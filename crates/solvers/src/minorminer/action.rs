/// Actions an observer can take during an embedding search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop the search after the current round.
    ///
    /// During chain-length refinement the best embedding found so far is
    /// returned. Before any overlap-free embedding exists, the search fails
    /// with [`Error::Stopped`](super::Error::Stopped).
    StopEarly,
}
