//! Handlers for the structured non-command interaction kinds: message
//! components (buttons, selects) and modal submissions, keyed by custom id.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use crate::invocation_context::InvocationContext;

/// One submitted modal input field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalField {
    pub custom_id: String,
    pub value: String,
}

/// Executes a message-component (button/select) interaction.
#[async_trait]
pub trait ComponentHandler: Send + Sync {
    async fn handle(&self, ctx: InvocationContext) -> Result<()>;
}

/// Executes a modal submission. Always awaited to completion; the platform
/// offers no defer branch for modals.
#[async_trait]
pub trait ModalHandler: Send + Sync {
    async fn handle(&self, ctx: InvocationContext, fields: Vec<ModalField>) -> Result<()>;
}

/// Immutable custom-id lookup tables for component and modal handlers,
/// built once at process start alongside the command registry.
#[derive(Default)]
pub struct ComponentRegistry {
    components: HashMap<String, Arc<dyn ComponentHandler>>,
    modals: HashMap<String, Arc<dyn ModalHandler>>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_component(
        mut self,
        custom_id: impl Into<String>,
        handler: Arc<dyn ComponentHandler>,
    ) -> Self {
        self.components.insert(custom_id.into(), handler);
        self
    }

    pub fn register_modal(
        mut self,
        custom_id: impl Into<String>,
        handler: Arc<dyn ModalHandler>,
    ) -> Self {
        self.modals.insert(custom_id.into(), handler);
        self
    }

    pub fn component(&self, custom_id: &str) -> Option<&Arc<dyn ComponentHandler>> {
        self.components.get(custom_id)
    }

    pub fn modal(&self, custom_id: &str) -> Option<&Arc<dyn ModalHandler>> {
        self.modals.get(custom_id)
    }
}
