//! Infrastructure configuration modules.

pub mod alerts;
pub mod logging;
pub mod settings;
pub mod upstream;

pub use alerts::AlertsConfig;
pub use logging::LoggingConfig;
pub use settings::Config;
pub use upstream::UpstreamConfig;
