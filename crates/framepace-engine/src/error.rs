use std::fmt;

/// Startup step that failed.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum InitPhase {
    /// Attaching the display surface.
    Attach,
    /// Loading the engine runtime and its payload.
    Runtime,
    /// Constructing the scene.
    Scene,
    /// The seeding `advance` call made before the first frame.
    Seed,
}

impl InitPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            InitPhase::Attach => "surface attach",
            InitPhase::Runtime => "runtime init",
            InitPhase::Scene => "scene construction",
            InitPhase::Seed => "scene seeding",
        }
    }
}

/// Engine initialization failure.
///
/// Fatal: the frame loop never starts once the loader returns this.
#[derive(Debug)]
pub struct InitError {
    pub phase: InitPhase,
    source: anyhow::Error,
}

impl InitError {
    pub(crate) fn new(phase: InitPhase, source: anyhow::Error) -> Self {
        Self { phase, source }
    }
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "engine initialization failed during {}", self.phase.as_str())
    }
}

impl std::error::Error for InitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&*self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_phase_and_chain_keeps_the_cause() {
        let err = InitError::new(InitPhase::Runtime, anyhow::anyhow!("payload unreachable"));
        assert_eq!(err.to_string(), "engine initialization failed during runtime init");

        let chained = format!("{:#}", anyhow::Error::new(err));
        assert!(chained.contains("payload unreachable"), "{chained}");
    }
}
