//! Support for library configuration options

use std::env;
use std::sync::{Arc, Mutex};

use once_cell::sync::Lazy;
use url::Url;

use crate::error::Result;
use crate::filter::Role;
use crate::resource::Resource;

/// Product name sent in the `User-Agent` header.
/// Feel free to override it when initing this library.
pub static PRODUCT_NAME: Lazy<Arc<Mutex<String>>> = Lazy::new(|| Arc::new(Mutex::new("TimelineBoard".to_string())));

/// The `User-Agent` header value, e.g. `TimelineBoard/0.1.0`
pub fn user_agent() -> String {
    let product = match PRODUCT_NAME.lock() {
        Ok(name) => name.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    };
    format!("{}/{}", product, env!("CARGO_PKG_VERSION"))
}

/// Where the server is, and who we are
#[derive(Clone, Debug)]
pub struct Settings {
    pub resource: Resource,
    pub role: Role,
}

impl Settings {
    pub fn new(resource: Resource, role: Role) -> Self {
        Self { resource, role }
    }

    /// Read the settings from the environment:
    ///
    /// * `TIMELINE_URL` (required)
    /// * `TIMELINE_USERNAME` and `TIMELINE_PASSWORD` (optional, for HTTP basic auth)
    /// * `TIMELINE_ADMIN` (optional, `1`/`true` to act as an administrator)
    ///
    /// Returns `Ok(None)` if `TIMELINE_URL` is not set.
    pub fn from_env() -> Result<Option<Self>> {
        let url = match env::var("TIMELINE_URL") {
            Ok(url) => url,
            Err(_) => return Ok(None),
        };
        let mut resource = Resource::new(Url::parse(&url)?);
        if let Ok(username) = env::var("TIMELINE_USERNAME") {
            let password = env::var("TIMELINE_PASSWORD").unwrap_or_default();
            resource = resource.with_credentials(username, password);
        }

        let role = match env::var("TIMELINE_ADMIN") {
            Ok(flag) if parse_flag(&flag) => Role::Admin,
            _ => Role::Member,
        };
        Ok(Some(Self::new(resource, role)))
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags() {
        assert!(parse_flag("1"));
        assert!(parse_flag(" TRUE "));
        assert!(!parse_flag("0"));
        assert!(!parse_flag(""));
    }

    #[test]
    fn default_user_agent() {
        assert!(user_agent().ends_with(env!("CARGO_PKG_VERSION")));
    }
}
