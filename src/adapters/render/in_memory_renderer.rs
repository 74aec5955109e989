//! In-Memory Renderer Adapter
//!
//! Keeps the current marking of every card. A host can read the markings
//! back to draw them; tests use it to observe what the engine emitted.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::cycle_time::RenderInstruction;
use crate::domain::foundation::CardId;
use crate::ports::{RenderError, Renderer};

/// Renderer that records markings in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryRenderer {
    markings: Arc<RwLock<HashMap<CardId, RenderInstruction>>>,
}

impl InMemoryRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current marking of a card
    pub async fn marking(&self, card_id: &CardId) -> Option<RenderInstruction> {
        self.markings.read().await.get(card_id).cloned()
    }

    /// Every current marking
    pub async fn markings(&self) -> HashMap<CardId, RenderInstruction> {
        self.markings.read().await.clone()
    }
}

#[async_trait]
impl Renderer for InMemoryRenderer {
    async fn render(&self, instructions: &[RenderInstruction]) -> Result<(), RenderError> {
        let mut markings = self.markings.write().await;
        for instruction in instructions {
            markings.insert(instruction.card_id.clone(), instruction.clone());
        }
        Ok(())
    }

    async fn clear(&self, card_id: &CardId) -> Result<(), RenderError> {
        self.markings.write().await.remove(card_id);
        Ok(())
    }
}
