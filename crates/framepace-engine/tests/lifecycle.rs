//! End-to-end lifecycle under a virtual clock: loader, frame loop, sample timer.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use anyhow::{bail, Result};
use framepace_engine::config::DriverConfig;
use framepace_engine::display::MemorySurface;
use framepace_engine::driver::{DriverState, FrameOutcome};
use framepace_engine::error::InitPhase;
use framepace_engine::host::VirtualHost;
use framepace_engine::loader::EngineLoader;
use framepace_engine::scene::{Engine, Payload, Scene};

#[derive(Debug, Default)]
struct Tally {
    advances: u32,
    renders: u32,
    // Advance count each render observed; equal values mean render saw its own tick.
    rendered_ticks: Vec<u32>,
}

struct CountingScene {
    tally: Rc<RefCell<Tally>>,
    tick: u32,
}

impl Scene for CountingScene {
    fn advance(&mut self) -> Result<()> {
        self.tick += 1;
        self.tally.borrow_mut().advances += 1;
        Ok(())
    }

    fn render(&mut self) -> Result<()> {
        let mut tally = self.tally.borrow_mut();
        tally.renders += 1;
        tally.rendered_ticks.push(self.tick);
        Ok(())
    }
}

struct CountingEngine {
    tally: Rc<RefCell<Tally>>,
    reachable: bool,
}

impl Engine for CountingEngine {
    type Scene = CountingScene;

    async fn init(&mut self, payload: &Payload) -> Result<()> {
        if !self.reachable {
            bail!("payload {payload} unreachable");
        }
        Ok(())
    }

    fn create_scene(&mut self) -> Result<CountingScene> {
        Ok(CountingScene {
            tally: self.tally.clone(),
            tick: 0,
        })
    }
}

type Host = VirtualHost<CountingScene, MemorySurface>;

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn booted() -> (Host, MemorySurface, Rc<RefCell<Tally>>) {
    let tally = Rc::new(RefCell::new(Tally::default()));
    let surface = MemorySurface::new();
    let config = DriverConfig::default();

    let mut host = VirtualHost::new(&config);
    let engine = CountingEngine {
        tally: tally.clone(),
        reachable: true,
    };
    let ready = pollster::block_on(EngineLoader::new(engine, config.payload.clone()).load(surface.clone()))
        .expect("engine loads");
    host.start(ready).unwrap();

    (host, surface, tally)
}

#[test]
fn at_start_counter_is_zero_and_display_is_empty() {
    let (host, surface, tally) = booted();

    assert_eq!(host.elapsed(), Duration::ZERO);
    assert_eq!(host.driver().counter().in_window(), 0);
    assert_eq!(host.driver().state(), DriverState::Running);
    assert!(surface.is_attached());
    assert_eq!(surface.text(), "");
    // The loader's seeding advance, no frame yet.
    assert_eq!(tally.borrow().advances, 1);
    assert_eq!(tally.borrow().renders, 0);
}

#[test]
fn sixty_two_frames_in_first_second() {
    let (mut host, surface, _) = booted();

    // Refreshes at 0, 16, ..., 976 ms.
    host.run_refreshes(62, ms(16));
    assert_eq!(host.driver().counter().in_window(), 62);
    assert_eq!(surface.text(), "fps is 0", "partial window never shown");

    host.advance_to(ms(1_000));
    assert_eq!(host.samples(), [(ms(1_000), 62)]);
    assert_eq!(host.driver().counter().last_sample(), 62);
    assert_eq!(host.driver().counter().in_window(), 0);

    host.refresh();
    assert_eq!(surface.text(), "fps is 62");
}

#[test]
fn every_window_reports_its_own_frames() {
    let (mut host, _, _) = booted();

    host.run_refreshes(50, ms(20)); // window 1: 0..1000 ms
    host.run_refreshes(30, ms(33)); // window 2: last refresh at 1957 ms
    host.advance_to(ms(3_000)); // window 3: idle

    let fps: Vec<u32> = host.samples().iter().map(|(_, n)| *n).collect();
    assert_eq!(fps, [50, 30, 0]);
    assert_eq!(fps.iter().map(|&n| n as u64).sum::<u64>(), host.frames_delivered());
}

#[test]
fn throttled_window_reports_zero() {
    let (mut host, surface, _) = booted();

    host.run_refreshes(10, ms(16));
    host.advance_to(ms(1_000));
    // Backgrounded: no refreshes for a whole window.
    host.advance_to(ms(2_000));

    assert_eq!(host.driver().counter().last_sample(), 0);
    host.refresh();
    assert_eq!(surface.text(), "fps is 0");
}

#[test]
fn render_always_follows_its_own_advance() {
    let (mut host, _, tally) = booted();

    host.run_refreshes(120, ms(16));

    let tally = tally.borrow();
    assert_eq!(tally.renders, 120);
    assert_eq!(tally.advances, 121, "120 frames plus the seeding advance");
    let expected: Vec<u32> = (2..=121).collect();
    assert_eq!(tally.rendered_ticks, expected);
}

#[test]
fn counter_only_grows_within_a_window() {
    let (mut host, _, _) = booted();

    let mut previous = 0;
    for _ in 0..60 {
        host.refresh();
        let now = host.driver().counter().in_window();
        assert!(now > previous);
        previous = now;
        host.advance_by(ms(16));
    }
}

#[test]
fn slow_init_samples_zero_then_counts_from_start() {
    let tally = Rc::new(RefCell::new(Tally::default()));
    let config = DriverConfig::default();
    let mut host: Host = VirtualHost::new(&config);

    // The loader is still working when the first deadline passes.
    host.advance_to(ms(1_500));
    let engine = CountingEngine {
        tally: tally.clone(),
        reachable: true,
    };
    let ready = pollster::block_on(EngineLoader::new(engine, config.payload.clone()).load(MemorySurface::new()))
        .expect("engine loads");
    host.start(ready).unwrap();

    // Refreshes at 1500, 1520, ..., 1980 ms; each re-arms the next.
    for _ in 0..25 {
        assert_eq!(host.refresh(), FrameOutcome::Rendered);
        assert!(host.refresh_armed());
        host.advance_by(ms(20));
    }
    host.advance_to(ms(2_000));

    assert_eq!(host.samples(), [(ms(1_000), 0), (ms(2_000), 25)]);
}

#[test]
fn unreachable_payload_never_starts_the_loop() {
    let tally = Rc::new(RefCell::new(Tally::default()));
    let surface = MemorySurface::new();
    let config = DriverConfig {
        payload: Payload::new("pkg/missing_bg.wasm"),
        ..DriverConfig::default()
    };

    let mut host: Host = VirtualHost::new(&config);
    let engine = CountingEngine {
        tally: tally.clone(),
        reachable: false,
    };
    let err = pollster::block_on(EngineLoader::new(engine, config.payload.clone()).load(surface.clone()))
        .err()
        .expect("init must fail");
    assert_eq!(err.phase, InitPhase::Runtime);

    // The host keeps ticking, but nothing was handed to the driver.
    for _ in 0..5 {
        assert_eq!(host.refresh(), FrameOutcome::NotStarted);
        assert!(!host.refresh_armed());
        host.advance_by(ms(400));
    }

    assert_eq!(host.driver().state(), DriverState::Uninitialized);
    assert_eq!(surface.writes(), 0);
    assert_eq!(surface.text(), "");
    assert_eq!(tally.borrow().renders, 0);
    assert_eq!(host.samples().len(), 2);
}
