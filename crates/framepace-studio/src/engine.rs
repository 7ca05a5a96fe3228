use std::sync::Arc;

use anyhow::{Context, Result};
use framepace_engine::scene::{Engine, Payload};
use winit::window::Window;

use crate::device::{Gpu, GpuInit};
use crate::scene::TriangleScene;

/// Demo engine: a wgpu backend whose payload is the scene's WGSL module.
pub struct GpuEngine {
    window: Arc<Window>,
    init: GpuInit,
    runtime: Option<Runtime>,
}

struct Runtime {
    gpu: Gpu,
    shader: String,
}

impl GpuEngine {
    pub fn new(window: Arc<Window>, init: GpuInit) -> Self {
        Self {
            window,
            init,
            runtime: None,
        }
    }
}

impl Engine for GpuEngine {
    type Scene = TriangleScene;

    async fn init(&mut self, payload: &Payload) -> Result<()> {
        let shader = String::from_utf8(payload.read()?)
            .with_context(|| format!("engine payload {payload} is not UTF-8 WGSL"))?;

        let gpu = Gpu::new(Arc::clone(&self.window), self.init.clone())
            .await
            .context("GPU backend failed to come online")?;

        self.runtime = Some(Runtime { gpu, shader });
        Ok(())
    }

    fn create_scene(&mut self) -> Result<TriangleScene> {
        let Runtime { gpu, shader } = self
            .runtime
            .take()
            .context("engine runtime is not initialized or its scene was already created")?;

        TriangleScene::new(gpu, &shader, Arc::clone(&self.window))
    }
}
