pub mod capability;
pub mod command;
pub mod config;
pub mod context;
pub mod driver_config;
pub mod stats;
pub mod stream;

pub use capability::{Capability, CapabilitySet};
pub use command::{RawCommand, Reply};
pub use config::{Config, LoggingConfig, SourceConfig};
pub use context::OpContext;
pub use driver_config::{DriverConfig, PROVIDER_FIELD};
pub use stats::CacheStats;
pub use stream::{ReadOptions, StreamBatch, StreamEntry};
