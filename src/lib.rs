pub mod clean;
pub mod config;
pub mod error;
pub mod fetch;
pub mod hierarchy;
pub mod normalize;
pub mod overrides;
pub mod pipeline;
pub mod store;
pub mod table;

pub use clean::{GroundRow, MatchFormat};
pub use config::ScrapeConfig;
pub use error::{GroundsError, Result};
pub use hierarchy::Node;
pub use overrides::OverrideMap;
pub use pipeline::{Pipeline, Source};
