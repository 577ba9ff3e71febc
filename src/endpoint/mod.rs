//! Endpoint module: URL templates plus the parameters their responses provide
//!
//! An [`Endpoint`] pairs a [`UrlTemplate`] with one [`ValueExtractor`] per
//! produced parameter. The crawler asks it for its dependencies, renders it
//! once per binding, and feeds each response back through [`Endpoint::produce`].

mod extractor;
mod template;

pub use extractor::{Extract, PathSpec, ValueExtractor};
pub use template::{Segment, UrlTemplate};

use crate::config::EndpointConfig;
use crate::ExtractionError;
use std::collections::BTreeMap;
use std::fmt;

/// A crawlable endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    template: UrlTemplate,
    /// Owned per endpoint; an endpoint without `provides` gets its own empty map
    provides: BTreeMap<String, ValueExtractor>,
}

impl Endpoint {
    pub fn new(template: UrlTemplate, provides: BTreeMap<String, ValueExtractor>) -> Self {
        Self { template, provides }
    }

    /// Builds an endpoint from its configuration entry
    ///
    /// # Example
    ///
    /// ```
    /// use api_mirror::config::{EndpointConfig, UrlParts};
    /// use api_mirror::Endpoint;
    ///
    /// let config = EndpointConfig {
    ///     url: UrlParts::Parts(vec!["applications/".into(), "{app-id}".into()]),
    ///     provides: Default::default(),
    /// };
    /// let endpoint = Endpoint::from_config("http://localhost/api/", &config);
    /// assert_eq!(endpoint.dependencies(), vec!["app-id"]);
    /// ```
    pub fn from_config(base: &str, config: &EndpointConfig) -> Self {
        let template = UrlTemplate::parse(base, config.url.segments());
        let provides = config
            .provides
            .iter()
            .map(|(name, path)| (name.clone(), ValueExtractor::new(PathSpec::from(path))))
            .collect();
        Self::new(template, provides)
    }

    pub fn template(&self) -> &UrlTemplate {
        &self.template
    }

    /// Parameter names this endpoint needs, in template order
    pub fn dependencies(&self) -> Vec<&str> {
        self.template.dependencies()
    }

    /// Names of the parameters this endpoint's responses provide
    pub fn provides(&self) -> impl Iterator<Item = &str> {
        self.provides.keys().map(String::as_str)
    }

    /// Extracts every provided parameter from a response body
    ///
    /// # Errors
    ///
    /// Returns `ExtractionError::InvalidJson` if `body` does not parse.
    pub fn produce(&self, body: &str) -> Result<BTreeMap<String, Vec<String>>, ExtractionError> {
        let document: serde_json::Value = serde_json::from_str(body)?;

        Ok(self
            .provides
            .iter()
            .map(|(name, extractor)| (name.clone(), extractor.extract(&document).collect()))
            .collect())
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.template)
    }
}
