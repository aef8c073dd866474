use std::sync::Arc;

use launchpad_core::{Config, LaunchAborter, LaunchScheduler, LaunchStore, PlanetStore};

/// Shared application state
pub struct AppState {
    config: Config,
    launches: Arc<dyn LaunchStore>,
    planets: Arc<dyn PlanetStore>,
    scheduler: LaunchScheduler,
    aborter: LaunchAborter,
}

impl AppState {
    pub fn new(
        config: Config,
        launches: Arc<dyn LaunchStore>,
        planets: Arc<dyn PlanetStore>,
    ) -> Self {
        let scheduler = LaunchScheduler::new(
            Arc::clone(&launches),
            Arc::clone(&planets),
            config.scheduling.clone(),
        );
        let aborter = LaunchAborter::new(Arc::clone(&launches));

        Self {
            config,
            launches,
            planets,
            scheduler,
            aborter,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn launches(&self) -> &dyn LaunchStore {
        self.launches.as_ref()
    }

    pub fn planets(&self) -> &dyn PlanetStore {
        self.planets.as_ref()
    }

    pub fn scheduler(&self) -> &LaunchScheduler {
        &self.scheduler
    }

    pub fn aborter(&self) -> &LaunchAborter {
        &self.aborter
    }
}
