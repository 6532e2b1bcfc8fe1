use url::Url;

use crate::error::Result;

/// Just a wrapper around the server URL and (optional) credentials
#[derive(Clone, Debug)]
pub struct Resource {
    url: Url,
    credentials: Option<(String, String)>,
}

impl Resource {
    pub fn new(url: Url) -> Self {
        Self { url, credentials: None }
    }

    pub fn with_credentials<T: ToString, U: ToString>(mut self, username: T, password: U) -> Self {
        self.credentials = Some((username.to_string(), password.to_string()));
        self
    }

    pub fn url(&self) -> &Url { &self.url }
    pub fn username(&self) -> Option<&str> { self.credentials.as_ref().map(|(u, _)| u.as_str()) }
    pub fn password(&self) -> Option<&str> { self.credentials.as_ref().map(|(_, p)| p.as_str()) }

    /// Build the URL of an API endpoint, by keeping the scheme and server of `self` but changing the path part
    pub fn endpoint(&self, path: &str) -> Url {
        let mut built = self.url.clone();
        built.set_path(path);
        built.set_query(None);
        built
    }

    /// Same as [`Self::endpoint`], with query parameters
    pub fn endpoint_with_query<'a, I>(&self, path: &str, pairs: I) -> Result<Url>
    where
        I: IntoIterator<Item = (&'a str, String)>,
    {
        let base = self.endpoint(path);
        let pairs: Vec<(&str, String)> = pairs.into_iter().collect();
        Ok(Url::parse_with_params(base.as_str(), pairs.iter().map(|(k, v)| (*k, v.as_str())))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_replace_the_path() {
        let resource = Resource::new("https://timeline.example.com/dashboard?tab=1".parse().unwrap())
            .with_credentials("admin", "secret");
        assert_eq!(resource.endpoint("/api/tasks/4").as_str(), "https://timeline.example.com/api/tasks/4");
        assert_eq!(resource.username(), Some("admin"));

        let url = resource
            .endpoint_with_query("/api/tasks", vec![("status", "all".to_string()), ("q", "a&b c".to_string())])
            .unwrap();
        assert_eq!(url.as_str(), "https://timeline.example.com/api/tasks?status=all&q=a%26b+c");
    }
}
