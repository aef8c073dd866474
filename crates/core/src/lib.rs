pub mod config;
pub mod engine;
pub mod launch;
pub mod metrics;
pub mod pagination;
pub mod planet;
pub mod provider;
pub mod sync;
pub mod testing;

pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, DatabaseConfig,
    PlanetSeed, ProviderConfig, SchedulingConfig, ServerConfig, DEFAULT_FLIGHT_NUMBER,
};
pub use engine::{LaunchAborter, LaunchScheduler, ScheduleError, ScheduleLaunchRequest};
pub use launch::{
    LaunchError, LaunchFilter, LaunchRecord, LaunchStore, LaunchUpdate, NewLaunch,
    SqliteLaunchStore,
};
pub use pagination::{get_pagination, PageParams, Pagination};
pub use planet::{Planet, PlanetError, PlanetStore, SqlitePlanetStore};
pub use provider::{LaunchProvider, ProviderError, RawLaunch, SpaceXClient};
pub use sync::{BootstrapOutcome, BootstrapSentinel, CatalogSynchronizer, SyncError};
