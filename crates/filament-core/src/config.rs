use crate::profiling::{self, ProfilingBackend};

/// Process-level configuration for applications built on Filament.
#[derive(Debug, Clone, Copy)]
pub struct Config {
    pub profiling: ProfilingMode,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            profiling: ProfilingMode::Off,
        }
    }
}

impl Config {
    /// Apply the configuration: installs logging and, if requested, profiling.
    pub fn apply(&self) {
        crate::logging::init();

        match self.profiling {
            ProfilingMode::Off => {}
            ProfilingMode::On => profiling::init_profiling(ProfilingBackend::InProcess),
            #[cfg(feature = "profiling")]
            ProfilingMode::WithWebserver => {
                profiling::init_profiling(ProfilingBackend::PuffinHttp)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfilingMode {
    /// Profiling scopes are not recorded
    Off,
    /// Scopes are recorded in-process
    On,
    /// Scopes are recorded and served to 'puffin_viewer'
    #[cfg(feature = "profiling")]
    WithWebserver,
}
