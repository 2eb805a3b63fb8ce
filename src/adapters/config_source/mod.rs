//! Configuration source adapters.

pub mod figment_source;
pub mod static_source;

pub use figment_source::FigmentConfigSource;
pub use static_source::StaticConfigSource;
