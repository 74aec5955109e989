//! Renderer that writes markings to the log. Used by the headless binary.

use async_trait::async_trait;

use crate::domain::cycle_time::RenderInstruction;
use crate::domain::foundation::CardId;
use crate::ports::{RenderError, Renderer};

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingRenderer;

#[async_trait]
impl Renderer for TracingRenderer {
    async fn render(&self, instructions: &[RenderInstruction]) -> Result<(), RenderError> {
        for instruction in instructions {
            tracing::info!(
                card_id = %instruction.card_id,
                severity = %instruction.severity,
                label = %instruction.label,
                "Card marking"
            );
        }
        Ok(())
    }

    async fn clear(&self, card_id: &CardId) -> Result<(), RenderError> {
        tracing::debug!(card_id = %card_id, "Card marking cleared");
        Ok(())
    }
}
