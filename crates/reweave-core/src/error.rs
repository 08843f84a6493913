/// Core error type for the reweave framework.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A structural precondition of the IR was violated. Transforms surface
    /// this instead of rewriting on top of a broken graph; recovery is the
    /// caller's problem.
    #[error("inconsistent graph in {graph}: {message} (at {op})")]
    Inconsistent {
        graph: String,
        op: String,
        message: String,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
