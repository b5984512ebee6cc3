pub mod config;
pub mod error;
pub mod registry;
pub mod route;
pub mod types;

pub use config::parse_site_toml;
pub use error::{Error, Result};
pub use registry::RouteRegistry;
pub use route::RoutePath;
pub use types::*;
