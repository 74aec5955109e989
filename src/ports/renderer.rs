//! Renderer Port - Where card markings are shown.
//!
//! The engine only decides what each card's marking says; how it is
//! displayed is entirely up to the implementation.

use async_trait::async_trait;

use crate::domain::cycle_time::RenderInstruction;
use crate::domain::foundation::CardId;

/// Errors that can occur while displaying markings.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Renderer unavailable: {0}")]
    Unavailable(String),
}

/// Port for displaying and removing card markings.
#[async_trait]
pub trait Renderer: Send + Sync {
    /// Show or update the marking of every card in `instructions`.
    async fn render(&self, instructions: &[RenderInstruction]) -> Result<(), RenderError>;

    /// Remove the marking of a card, if it has one.
    async fn clear(&self, card_id: &CardId) -> Result<(), RenderError>;
}
