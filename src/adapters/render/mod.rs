//! Renderer adapters.
//!
//! - `InMemoryRenderer` - Keeps current markings in memory
//! - `TracingRenderer` - Logs markings

mod in_memory_renderer;
mod tracing_renderer;

pub use in_memory_renderer::InMemoryRenderer;
pub use tracing_renderer::TracingRenderer;
