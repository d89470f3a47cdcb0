use mrinspect_component::SupportInfo;
use reqwest::StatusCode;
use reqwest::blocking::Client;
use serde_json::Value;
use url::Url;

pub mod models;

/// Anything that can tell how a project behaves on clients and servers.
pub trait SupportCatalog {
    /// Look up the client- and server-side support of `project_id`.
    fn fetch_support(&self, project_id: &str) -> Result<SupportInfo, ClientError>;
}

/// A struct that represents the remote [modrinth](https://modrinth.com) repository.
#[derive(Debug)]
#[must_use]
pub struct ModrinthRepository {
    client: Client,
    api_base: Url,
}

impl ModrinthRepository {
    pub const DEFAULT_API_BASE: &str = "https://api.modrinth.com/v2";
    pub const USER_AGENT: &str = concat!(
        env!("CARGO_PKG_REPOSITORY"),
        '/',
        env!("CARGO_PKG_VERSION"),
        ' ',
        '(',
        env!("CARGO_PKG_AUTHORS"),
        ')',
    );

    /// Build a repository talking to `api_base`, identifying itself with
    /// [`Self::USER_AGENT`].
    pub fn new(api_base: Url) -> Result<Self, SetupError> {
        let client = Client::builder().user_agent(Self::USER_AGENT).build()?;
        Self::with_client(client, api_base)
    }

    /// Build a repository around an already configured [`Client`].
    pub fn with_client(client: Client, api_base: Url) -> Result<Self, SetupError> {
        if api_base.cannot_be_a_base() {
            return Err(SetupError::UnusableBase(api_base));
        }
        Ok(Self { client, api_base })
    }

    #[expect(clippy::missing_panics_doc)]
    #[must_use]
    pub fn default_api_base() -> Url {
        Url::parse(Self::DEFAULT_API_BASE).expect("The default API base is a valid URL")
    }

    /// `{api_base}/project/{project_id}`, with `project_id` as a single,
    /// percent-encoded path segment.
    #[must_use]
    pub fn project_url(&self, project_id: &str) -> Url {
        let mut url = self.api_base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(["project", project_id]);
        }
        url
    }
}

impl SupportCatalog for ModrinthRepository {
    /// A single `GET`, no retries.
    fn fetch_support(&self, project_id: &str) -> Result<SupportInfo, ClientError> {
        let url = self.project_url(project_id);
        tracing::debug!(%url, "Querying the catalog");

        let response = self
            .client
            .get(url.clone())
            .send()
            .map_err(|source| ClientError::Network {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            let project_id = project_id.to_owned();
            return Err(ClientError::NotFound { project_id });
        }
        if !status.is_success() {
            return Err(ClientError::Status { url, status });
        }

        let body = response.text().map_err(|source| ClientError::Network {
            url: url.clone(),
            source,
        })?;
        let project =
            parse_project(&body).map_err(|source| ClientError::Malformed { url, source })?;
        Ok(project.into())
    }
}

/// A project body has to be a JSON object. A derived [`Deserialize`] would
/// also take an array of the fields in order.
///
/// [`Deserialize`]: serde::Deserialize
fn parse_project(body: &str) -> Result<models::Project, serde_json::Error> {
    match serde_json::from_str(body)? {
        object @ Value::Object(_) => serde_json::from_value(object),
        _ => Err(serde::de::Error::custom("expected a JSON object")),
    }
}

/// Errors that may occur when querying the catalog.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Failed to reach the catalog at {url}")]
    Network { url: Url, source: reqwest::Error },

    #[error("The catalog answered {url} with {status}")]
    Status { url: Url, status: StatusCode },

    #[error("Project {project_id:?} does not exist in the catalog")]
    NotFound { project_id: String },

    #[error("The catalog's response to {url} is not a project with client/server support")]
    Malformed {
        url: Url,
        source: serde_json::Error,
    },
}

impl ClientError {
    /// Whether trying again later might give a different result.
    ///
    /// Nothing in here retries, this is for callers that want to.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Network { .. } => true,
            Self::Status { status, .. } => status.is_server_error(),
            Self::NotFound { .. } | Self::Malformed { .. } => false,
        }
    }
}

/// Errors that may occur when building a [`ModrinthRepository`].
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error("Failed to build an HTTP client")]
    Client(#[from] reqwest::Error),

    #[error("{0} can't be used as an API base URL")]
    UnusableBase(Url),
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::parse_project;

    #[rstest]
    #[case::array(r#"["required", "unsupported"]"#)]
    #[case::string(r#""required""#)]
    #[case::null("null")]
    fn only_objects_are_projects(#[case] body: &str) {
        let error = parse_project(body).unwrap_err();
        assert_eq!(error.to_string(), "expected a JSON object");
    }

    #[test]
    fn object_with_extra_fields() {
        let body = r#"{"slug": "sodium", "client_side": "required", "server_side": "unsupported"}"#;
        let project = parse_project(body).unwrap();
        assert_eq!(project.client_side.to_string(), "required");
        assert_eq!(project.server_side.to_string(), "unsupported");
    }
}
