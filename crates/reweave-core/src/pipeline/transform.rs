use crate::error::CoreError;
use crate::ir::Module;

/// Result of applying a transform: the rewritten module and whether anything
/// actually changed (drives pipeline fixpoint iteration).
pub struct TransformResult {
    pub module: Module,
    pub changed: bool,
}

/// Transform trait — a pass that rewrites IR modules.
///
/// Examples: cast reconciliation, dead op elimination.
pub trait Transform {
    /// Name of this transform pass.
    fn name(&self) -> &str;

    /// Apply this transform to a module.
    fn apply(&self, module: Module) -> Result<TransformResult, CoreError>;
}

/// An ordered sequence of transforms to apply.
pub struct TransformPipeline {
    transforms: Vec<Box<dyn Transform>>,
    fixpoint: bool,
}

impl TransformPipeline {
    pub fn new() -> Self {
        Self {
            transforms: Vec::new(),
            fixpoint: false,
        }
    }

    pub fn add(&mut self, transform: Box<dyn Transform>) {
        self.transforms.push(transform);
    }

    /// When enabled, `run` repeats the whole pass list until no transform
    /// reports changes.
    pub fn set_fixpoint(&mut self, fixpoint: bool) {
        self.fixpoint = fixpoint;
    }

    /// Run all transforms in order on the given module.
    pub fn run(&self, mut module: Module) -> Result<Module, CoreError> {
        loop {
            let mut changed = false;
            for transform in &self.transforms {
                let result = transform.apply(module)?;
                module = result.module;
                changed |= result.changed;
            }
            if !changed || !self.fixpoint {
                return Ok(module);
            }
        }
    }
}

impl Default for TransformPipeline {
    fn default() -> Self {
        Self::new()
    }
}
