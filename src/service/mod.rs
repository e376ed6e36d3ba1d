mod echo;
mod geo_service;
mod throttle;

pub use echo::ExternalIpResolver;
pub use geo_service::GeoService;
pub use throttle::Throttle;
