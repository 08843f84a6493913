pub mod dce;
pub mod reconcile_casts;
pub mod util;

#[cfg(test)]
mod stress_tests;

pub use dce::DeadOpElimination;
pub use reconcile_casts::ReconcileCasts;

use crate::pipeline::{PassConfig, TransformPipeline};

/// Build a transform pipeline based on the given pass configuration.
///
/// Reconciliation runs first so that dead op elimination sees the graph
/// after cast chains have collapsed.
pub fn default_pipeline(config: &PassConfig) -> TransformPipeline {
    let mut pipeline = TransformPipeline::new();
    if config.reconcile_casts {
        pipeline.add(Box::new(ReconcileCasts));
    }
    if config.dead_op_elimination {
        pipeline.add(Box::new(DeadOpElimination));
    }
    pipeline.set_fixpoint(config.fixpoint);
    pipeline
}
