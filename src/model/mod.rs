mod address;
mod geo;
mod metrics;

pub use address::classify;
pub use geo::{GeoRecord, GeoResult};
pub use metrics::SessionMetrics;
