use serde::{Deserialize, Serialize};

use crate::define_entity;
use crate::entity::PrimaryMap;
use crate::error::CoreError;

use super::graph::Graph;

define_entity!(GraphId);

/// A module — the top-level unit handed between pipeline stages.
///
/// JSON is the interchange format: stages that run as separate processes
/// read and write modules with [`Module::from_json`] / [`Module::to_json`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Module {
    pub name: String,
    pub graphs: PrimaryMap<GraphId, Graph>,
}

impl Module {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            graphs: PrimaryMap::new(),
        }
    }

    pub fn add_graph(&mut self, graph: Graph) -> GraphId {
        self.graphs.push(graph)
    }

    pub fn to_json(&self) -> Result<String, CoreError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(json)?)
    }
}
