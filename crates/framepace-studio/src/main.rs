mod device;
mod engine;
mod scene;

use anyhow::Result;
use framepace_engine::config::{DriverConfig, RuntimeConfig};
use framepace_engine::logging::{init_logging, LoggingConfig};
use framepace_engine::scene::Payload;
use framepace_engine::window::Runtime;

use crate::device::GpuInit;
use crate::engine::GpuEngine;

const PAYLOAD_ENV: &str = "FRAMEPACE_PAYLOAD";

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let driver = DriverConfig {
        payload: payload_location(std::env::args().skip(1), std::env::var(PAYLOAD_ENV).ok()),
        ..DriverConfig::default()
    };

    log::info!("framepace studio starting (payload {})", driver.payload);

    Runtime::run(
        RuntimeConfig {
            title: "framepace studio".to_string(),
            ..RuntimeConfig::default()
        },
        driver,
        |window| GpuEngine::new(window, GpuInit::default()),
    )
}

/// First CLI argument, then `FRAMEPACE_PAYLOAD`, then the shader shipped with this
/// crate.
fn payload_location(mut args: impl Iterator<Item = String>, env: Option<String>) -> Payload {
    args.next()
        .or(env)
        .map(Payload::new)
        .unwrap_or_else(|| Payload::new(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/scene.wgsl")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(v: &[&str]) -> impl Iterator<Item = String> {
        v.iter().map(|s| s.to_string()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn cli_argument_wins() {
        let p = payload_location(args(&["cli.wgsl"]), Some("env.wgsl".into()));
        assert_eq!(p, Payload::new("cli.wgsl"));
    }

    #[test]
    fn env_used_without_argument() {
        let p = payload_location(args(&[]), Some("env.wgsl".into()));
        assert_eq!(p, Payload::new("env.wgsl"));
    }

    #[test]
    fn bundled_shader_is_the_default_and_readable() {
        let p = payload_location(args(&[]), None);
        assert!(p.path().ends_with("assets/scene.wgsl"));

        let src = String::from_utf8(p.read().unwrap()).unwrap();
        assert!(src.contains("fn vs_main"));
        assert!(src.contains("fn fs_main"));
    }
}
