//! Dependency initialization and wiring for the search connector.

use std::sync::Arc;

use reqwest::Client;
use tracing::info;

use crate::config::cli::Command;
use crate::config::settings::{EmployeeSettings, ObjectsSettings, PagesSettings, Settings};
use crate::consumer::{
    Credential, EmployeeSource, HttpPageClient, ObjectSource, PageClient, PageSource,
    SourceClient, PAGE_REQUEST_TIMEOUT,
};
use crate::loader::{IndexOutcome, LoaderConfig, SearchLoader};
use crate::orchestrator::Orchestrator;
use crate::IndexingError;
use search_connector_repository::EnterpriseSearchProvider;

/// What a run does once its dependencies are in place.
pub enum Job {
    /// Sync a source into the engine.
    Sync(Box<dyn SourceClient>),
    /// Register a website with the engine crawler.
    Crawl(String),
}

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// The configured orchestrator ready to run.
    pub orchestrator: Orchestrator,
    /// The job selected on the command line.
    pub job: Job,
}

impl Dependencies {
    /// Initialize all dependencies for `command` from `settings`.
    ///
    /// Only the variables the selected command needs are required; see
    /// [`Settings`] and the per-source settings types for the list.
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(IndexingError::ConfigError)` - If a required variable is missing or invalid
    pub fn new(command: Option<&Command>, settings: &Settings) -> Result<Self, IndexingError> {
        let search_config = settings.enterprise_search()?;
        let batch_size = settings.batch_size()?;

        info!(
            url = %search_config.base_url,
            engine = %search_config.engine,
            batch_size,
            command = ?command,
            "Initializing dependencies"
        );

        let provider = EnterpriseSearchProvider::new(search_config).map_err(|e| {
            IndexingError::config(format!("Failed to create search provider: {e}"))
        })?;
        let provider = Arc::new(provider);
        let loader = SearchLoader::with_config(provider.clone(), LoaderConfig { batch_size });
        let orchestrator = Orchestrator::new(loader, provider);

        let job = match command {
            None => {
                let objects = ObjectsSettings::default_source(settings)?;
                Job::Sync(Box::new(Self::object_source(objects)?))
            }
            Some(Command::Vac) => {
                let vac = ObjectsSettings::vac(settings)?;
                Job::Sync(Box::new(Self::object_source(vac)?))
            }
            Some(Command::Smoelenboek) => {
                let employees = EmployeeSettings::from_settings(settings)?;
                Job::Sync(Box::new(Self::employee_source(employees)?))
            }
            Some(Command::Pages) => {
                let pages = PagesSettings::from_settings(settings)?;
                Job::Sync(Box::new(Self::page_source(pages)?))
            }
            Some(Command::Domain { url }) => Job::Crawl(url.clone()),
        };

        Ok(Self { orchestrator, job })
    }

    /// Run the selected job to completion.
    pub async fn run(self) -> Result<(), IndexingError> {
        match self.job {
            Job::Sync(source) => match self.orchestrator.sync(source.as_ref()).await? {
                IndexOutcome::Completed { .. } => Ok(()),
                IndexOutcome::Cancelled { discarded } => {
                    info!(discarded, "Run cancelled, exiting cleanly");
                    Ok(())
                }
            },
            Job::Crawl(url) => {
                self.orchestrator.crawl_domain(&url).await?;
                Ok(())
            }
        }
    }

    fn http_client() -> Result<Client, IndexingError> {
        Client::builder()
            .timeout(PAGE_REQUEST_TIMEOUT)
            .build()
            .map_err(|e| IndexingError::config(format!("Failed to create HTTP client: {e}")))
    }

    fn page_client(client: &Client, credential: Credential) -> Arc<dyn PageClient> {
        Arc::new(HttpPageClient::with_client(client.clone(), Some(credential)))
    }

    fn object_source(settings: ObjectsSettings) -> Result<ObjectSource, IndexingError> {
        let client = Self::http_client()?;
        Ok(ObjectSource::new(
            Self::page_client(&client, Credential::Token(settings.token)),
            &settings.base_url,
            &settings.object_type,
            settings.slug,
        )
        .with_suggestion_fields(settings.suggestion_fields))
    }

    fn employee_source(settings: EmployeeSettings) -> Result<EmployeeSource, IndexingError> {
        let client = Self::http_client()?;
        EmployeeSource::new(
            Self::page_client(&client, Credential::Token(settings.objecttypes_token)),
            &settings.objecttypes_url,
            Self::page_client(&client, Credential::Token(settings.objects_token)),
            &settings.objects_url,
        )
        .map_err(IndexingError::from)
    }

    fn page_source(settings: PagesSettings) -> Result<PageSource, IndexingError> {
        let client = Self::http_client()?;
        Ok(PageSource::new(
            Self::page_client(&client, Credential::Bearer(settings.token)),
            &settings.base_url,
            settings.slug,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(pairs: &[(&str, &str)]) -> Settings {
        Settings::from_pairs(pairs.iter().copied())
    }

    #[test]
    fn test_domain_job_needs_only_search_settings() {
        let deps = Dependencies::new(
            Some(&Command::Domain {
                url: "https://www.example.nl".to_string(),
            }),
            &settings(&[("ENTERPRISE_SEARCH_API_KEY", "key")]),
        )
        .unwrap();

        assert!(matches!(deps.job, Job::Crawl(ref url) if url == "https://www.example.nl"));
    }

    #[test]
    fn test_source_jobs() {
        let deps = Dependencies::new(
            Some(&Command::Pages),
            &settings(&[
                ("ENTERPRISE_SEARCH_API_KEY", "key"),
                ("PAGES_API_URL", "http://pages.test"),
                ("PAGES_API_TOKEN", "jwt"),
                ("PAGES_SOURCE_SLUG", "wiki"),
            ]),
        )
        .unwrap();
        match deps.job {
            Job::Sync(source) => assert_eq!(source.slug().as_str(), "wiki"),
            Job::Crawl(_) => panic!("expected a sync job"),
        }

        let deps = Dependencies::new(
            Some(&Command::Smoelenboek),
            &settings(&[
                ("ENTERPRISE_SEARCH_API_KEY", "key"),
                ("OBJECTTYPES_API_URL", "http://types.test"),
                ("OBJECTTYPES_API_TOKEN", "t1"),
                ("OBJECTS_API_URL", "http://objects.test"),
                ("OBJECTS_API_TOKEN", "t2"),
            ]),
        )
        .unwrap();
        match deps.job {
            Job::Sync(source) => assert_eq!(source.slug().as_str(), "smoelenboek"),
            Job::Crawl(_) => panic!("expected a sync job"),
        }
    }

    #[test]
    fn test_missing_source_settings() {
        let result = Dependencies::new(None, &settings(&[("ENTERPRISE_SEARCH_API_KEY", "key")]));
        match result {
            Err(IndexingError::ConfigError(msg)) => assert!(msg.contains("OBJECTS_API_URL")),
            _ => panic!("expected a configuration error"),
        }
    }
}
