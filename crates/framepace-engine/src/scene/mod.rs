//! Engine-facing contracts.
//!
//! The frame loop never looks inside a scene. It advances it and renders it, once each
//! per frame and in that order. Everything else (geometry, pipelines, GPU resources)
//! stays behind these traits.

mod payload;

pub use payload::Payload;

use anyhow::Result;

/// Opaque renderable state owned by an external engine.
pub trait Scene {
    /// Advances engine state by one tick.
    fn advance(&mut self) -> Result<()>;

    /// Draws the state produced by the most recent `advance`.
    fn render(&mut self) -> Result<()>;
}

/// External rendering engine.
///
/// The runtime must be brought online with `init` exactly once before any scene is
/// constructed. `create_scene` is expected to be called once per engine.
#[allow(async_fn_in_trait)]
pub trait Engine {
    type Scene: Scene;

    /// Loads the engine's computational backend from `payload`.
    async fn init(&mut self, payload: &Payload) -> Result<()>;

    /// Constructs the scene. Only valid after a successful `init`.
    fn create_scene(&mut self) -> Result<Self::Scene>;
}
