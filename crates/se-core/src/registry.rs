//! Render pipeline registry
//!
//! The renderer owns the actual pipelines. The core only hands out opaque
//! handles so drawables can say which pipeline they want; the registry is
//! created by the application and passed around explicitly.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Name registered under [`PipelineHandle::DEFAULT`]
pub const DEFAULT_PIPELINE: &str = "default";

/// Opaque pipeline identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PipelineHandle(u32);

impl PipelineHandle {
    pub const DEFAULT: PipelineHandle = PipelineHandle(0);

    pub fn index(&self) -> u32 {
        self.0
    }
}

#[derive(Debug, Clone)]
pub struct PipelineRegistry {
    names: Vec<String>,
    lookup: HashMap<String, PipelineHandle>,
}

impl PipelineRegistry {
    /// Create a registry holding only the default pipeline
    pub fn new() -> Self {
        let mut registry = Self {
            names: Vec::new(),
            lookup: HashMap::new(),
        };
        registry.register(DEFAULT_PIPELINE);
        registry
    }

    /// Register a pipeline name. Registering a known name returns its handle.
    pub fn register(&mut self, name: &str) -> PipelineHandle {
        if let Some(handle) = self.lookup.get(name) {
            return *handle;
        }
        let handle = PipelineHandle(self.names.len() as u32);
        self.names.push(name.to_string());
        self.lookup.insert(name.to_string(), handle);
        handle
    }

    pub fn get(&self, name: &str) -> Option<PipelineHandle> {
        self.lookup.get(name).copied()
    }

    pub fn name(&self, handle: PipelineHandle) -> Option<&str> {
        self.names.get(handle.0 as usize).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for PipelineRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pipeline_is_registered() {
        let registry = PipelineRegistry::new();
        assert_eq!(registry.get(DEFAULT_PIPELINE), Some(PipelineHandle::DEFAULT));
        assert_eq!(registry.name(PipelineHandle::default()), Some(DEFAULT_PIPELINE));
    }

    #[test]
    fn test_register_is_idempotent() {
        let mut registry = PipelineRegistry::new();
        let gizmo = registry.register("gizmo");
        assert_ne!(gizmo, PipelineHandle::DEFAULT);
        assert_eq!(registry.register("gizmo"), gizmo);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.name(gizmo), Some("gizmo"));
        assert!(registry.get("missing").is_none());
    }
}
