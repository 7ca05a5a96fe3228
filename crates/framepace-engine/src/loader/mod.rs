//! Engine loader.
//!
//! One-shot startup sequence: attach the display surface, bring the engine runtime
//! online, construct the scene and advance it once so the first frame never draws
//! uninitialized state. `load` consumes the loader, so the sequence runs at most once.

use std::time::Instant;

use crate::display::DisplaySurface;
use crate::error::{InitError, InitPhase};
use crate::scene::{Engine, Payload, Scene};

/// A seeded scene and its attached display surface.
///
/// Only the loader produces one, which is what makes `FrameDriver::start` impossible
/// to reach before initialization completes.
pub struct Ready<S, D> {
    pub(crate) scene: S,
    pub(crate) surface: D,
}

impl<S, D> Ready<S, D> {
    pub(crate) fn new(scene: S, surface: D) -> Self {
        Self { scene, surface }
    }

    pub fn surface(&self) -> &D {
        &self.surface
    }
}

pub struct EngineLoader<E> {
    engine: E,
    payload: Payload,
}

impl<E> EngineLoader<E>
where
    E: Engine,
{
    pub fn new(engine: E, payload: Payload) -> Self {
        Self { engine, payload }
    }

    /// Runs the startup sequence.
    ///
    /// The surface is attached before the engine init is awaited; if init fails or
    /// never resolves, the surface stays attached with its initial empty text.
    pub async fn load<D>(mut self, mut surface: D) -> Result<Ready<E::Scene, D>, InitError>
    where
        D: DisplaySurface,
    {
        surface
            .attach()
            .map_err(|e| InitError::new(InitPhase::Attach, e))?;

        log::info!("loading engine payload {}", self.payload);
        let started = Instant::now();

        self.engine
            .init(&self.payload)
            .await
            .map_err(|e| InitError::new(InitPhase::Runtime, e))?;

        log::info!("engine runtime online in {:.1?}", started.elapsed());

        let mut scene = self
            .engine
            .create_scene()
            .map_err(|e| InitError::new(InitPhase::Scene, e))?;

        scene
            .advance()
            .map_err(|e| InitError::new(InitPhase::Seed, e))?;

        log::debug!("scene seeded");
        Ok(Ready::new(scene, surface))
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use anyhow::{anyhow, bail, Result};

    use super::*;
    use crate::display::MemorySurface;

    type Log = Rc<RefCell<Vec<&'static str>>>;

    #[derive(Clone, Copy, PartialEq)]
    enum Fail {
        Nothing,
        Init,
        Construct,
        Seed,
    }

    struct FakeEngine {
        log: Log,
        surface: MemorySurface,
        fail: Fail,
        online: bool,
    }

    struct FakeScene {
        log: Log,
        fail_advance: bool,
    }

    impl Scene for FakeScene {
        fn advance(&mut self) -> Result<()> {
            self.log.borrow_mut().push("advance");
            if self.fail_advance {
                bail!("bad initial state");
            }
            Ok(())
        }

        fn render(&mut self) -> Result<()> {
            self.log.borrow_mut().push("render");
            Ok(())
        }
    }

    impl Engine for FakeEngine {
        type Scene = FakeScene;

        async fn init(&mut self, payload: &Payload) -> Result<()> {
            assert!(self.surface.is_attached(), "surface must be attached before init");
            self.log.borrow_mut().push("init");
            if self.fail == Fail::Init {
                return Err(anyhow!("cannot load {payload}"));
            }
            self.online = true;
            Ok(())
        }

        fn create_scene(&mut self) -> Result<FakeScene> {
            anyhow::ensure!(self.online, "runtime not initialized");
            self.log.borrow_mut().push("create");
            if self.fail == Fail::Construct {
                bail!("no context");
            }
            Ok(FakeScene {
                log: self.log.clone(),
                fail_advance: self.fail == Fail::Seed,
            })
        }
    }

    fn run(fail: Fail) -> (Result<Ready<FakeScene, MemorySurface>, InitError>, Log, MemorySurface) {
        let log = Log::default();
        let surface = MemorySurface::new();
        let engine = FakeEngine {
            log: log.clone(),
            surface: surface.clone(),
            fail,
            online: false,
        };
        let loader = EngineLoader::new(engine, Payload::new("pkg/engine_bg.wasm"));
        let result = pollster::block_on(loader.load(surface.clone()));
        (result, log, surface)
    }

    #[test]
    fn load_inits_constructs_and_seeds_once() {
        let (result, log, surface) = run(Fail::Nothing);

        let ready = result.unwrap();
        assert_eq!(*log.borrow(), ["init", "create", "advance"]);
        assert!(ready.surface().is_attached());
        assert_eq!(surface.writes(), 0, "no frame has been drawn yet");
    }

    #[test]
    fn runtime_failure_is_fatal_and_leaves_surface_empty() {
        let (result, log, surface) = run(Fail::Init);

        let err = result.err().unwrap();
        assert_eq!(err.phase, InitPhase::Runtime);
        assert_eq!(*log.borrow(), ["init"]);
        assert!(surface.is_attached());
        assert_eq!(surface.text(), "");
        assert_eq!(surface.writes(), 0);
    }

    #[test]
    fn construction_failure_reports_scene_phase() {
        let (result, log, _) = run(Fail::Construct);
        assert_eq!(result.err().unwrap().phase, InitPhase::Scene);
        assert_eq!(*log.borrow(), ["init", "create"]);
    }

    #[test]
    fn seeding_failure_reports_seed_phase() {
        let (result, _, _) = run(Fail::Seed);
        assert_eq!(result.err().unwrap().phase, InitPhase::Seed);
    }

    #[test]
    fn attach_failure_stops_before_init() {
        let log = Log::default();
        let mut surface = MemorySurface::new();
        surface.attach().unwrap();

        let engine = FakeEngine {
            log: log.clone(),
            surface: surface.clone(),
            fail: Fail::Nothing,
            online: false,
        };
        let result = pollster::block_on(EngineLoader::new(engine, Payload::default()).load(surface));

        assert_eq!(result.err().unwrap().phase, InitPhase::Attach);
        assert!(log.borrow().is_empty());
    }
}
