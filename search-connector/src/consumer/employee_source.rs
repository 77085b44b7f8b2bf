//! Employee directory source.
//!
//! Employees are objects of the object type named "Medewerker". The type is
//! looked up in the object type registry first; its objects are then streamed
//! from the objects API.

use std::sync::Arc;

use async_trait::async_trait;
use futures::{stream, StreamExt, TryStreamExt};
use search_connector_shared::SourceSlug;
use serde_json::Value;
use tracing::{info, instrument};

use crate::consumer::messages::CursorLocation;
use crate::consumer::object_source::objects_url;
use crate::consumer::page_client::PageClient;
use crate::consumer::paginated_fetcher::PaginatedFetcher;
use crate::consumer::{EnvelopeStream, SourceClient};
use crate::errors::IngestError;
use crate::processor::{EmployeeNormalizer, Normalizer};

/// Slug of the employee directory.
pub const EMPLOYEE_SLUG: &str = "smoelenboek";

/// Name of the object type holding employees, compared case-insensitively.
pub const EMPLOYEE_TYPE_NAME: &str = "Medewerker";

/// Employees from every object type named "Medewerker".
pub struct EmployeeSource {
    types_fetcher: PaginatedFetcher,
    objects_fetcher: PaginatedFetcher,
    objecttypes_base: String,
    objects_base: String,
    slug: SourceSlug,
}

impl EmployeeSource {
    /// # Arguments
    ///
    /// * `types_client` - Page client carrying the object type registry token
    /// * `objecttypes_base` - Base URL of the object type registry
    /// * `objects_client` - Page client carrying the objects API token
    /// * `objects_base` - Base URL of the objects API
    pub fn new(
        types_client: Arc<dyn PageClient>,
        objecttypes_base: &str,
        objects_client: Arc<dyn PageClient>,
        objects_base: &str,
    ) -> Result<Self, IngestError> {
        let slug = SourceSlug::new(EMPLOYEE_SLUG).map_err(|e| IngestError::parse(e.to_string()))?;
        Ok(Self {
            types_fetcher: PaginatedFetcher::new(types_client, CursorLocation::Next),
            objects_fetcher: PaginatedFetcher::new(objects_client, CursorLocation::Next),
            objecttypes_base: objecttypes_base.trim_end_matches('/').to_string(),
            objects_base: objects_base.to_string(),
            slug,
        })
    }

    /// URLs of all object types named "Medewerker", in listing order.
    ///
    /// # Returns
    ///
    /// * `Err(IngestError::ConfigurationMissing)` - If no such type exists
    #[instrument(skip(self))]
    pub async fn discover_types(&self) -> Result<Vec<String>, IngestError> {
        let listing = format!("{}/api/v2/objecttypes", self.objecttypes_base);
        let type_urls: Vec<String> = self
            .types_fetcher
            .fetch(listing, employee_type_url)
            .try_collect()
            .await?;

        if type_urls.is_empty() {
            return Err(IngestError::configuration_missing(format!(
                "no object type named {EMPLOYEE_TYPE_NAME:?} in {}",
                self.objecttypes_base
            )));
        }

        info!(count = type_urls.len(), "Discovered employee object types");
        Ok(type_urls)
    }
}

/// URL of an object type listing entry if it is an employee type.
fn employee_type_url(raw: &Value) -> Option<String> {
    let name = raw.get("name").and_then(Value::as_str)?;
    if !name.trim().eq_ignore_ascii_case(EMPLOYEE_TYPE_NAME) {
        return None;
    }
    raw.get("url")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .map(str::to_string)
}

#[async_trait]
impl SourceClient for EmployeeSource {
    fn slug(&self) -> &SourceSlug {
        &self.slug
    }

    fn suggestion_fields(&self) -> Vec<String> {
        vec!["title".to_string(), "object_meta".to_string()]
    }

    async fn envelopes(&self) -> Result<EnvelopeStream, IngestError> {
        let type_urls = self.discover_types().await?;

        let fetcher = self.objects_fetcher.clone();
        let objects_base = self.objects_base.clone();
        let normalizer = EmployeeNormalizer::new(self.slug.clone());

        let envelopes = stream::iter(type_urls).flat_map(move |type_url| {
            let normalizer = normalizer.clone();
            fetcher.fetch(objects_url(&objects_base, &type_url), move |raw| {
                normalizer.normalize(raw)
            })
        });
        Ok(envelopes.boxed())
    }
}
