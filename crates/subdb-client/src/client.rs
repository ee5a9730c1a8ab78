// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::Path;
use std::time::Duration;

use bytes::Bytes;
use reqwest::header::{CONNECTION, USER_AGENT};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use subdb_fingerprint::{fingerprint_file, FileHash};
use tracing::{debug, instrument, trace};
use url::Url;

use crate::error::{Result, SubDbError};
use crate::models::{normalize_language, split_languages, UserAgent};

const SUBDB_API_BASE: &str = "http://api.thesubdb.com";
const SUBDB_SANDBOX_BASE: &str = "http://sandbox.thesubdb.com";
const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(5);

/// SubDB API client.
///
/// Lookups (`languages`, `search`, `download`) go to the read endpoint and
/// uploads to the upload endpoint. By default reads hit the sandbox and
/// uploads hit production; both can be overridden on the builder.
///
/// The identity is set through `&mut self`, so it has to be in place before
/// the client is shared.
#[derive(Debug, Clone)]
pub struct SubDbClient {
    client: Client,
    read_base_url: Url,
    upload_base_url: Url,
    read_timeout: Duration,
    upload_timeout: Option<Duration>,
    user_agent: Option<UserAgent>,
}

impl SubDbClient {
    /// Create a new SubDB client with default endpoints and timeouts.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Create a client builder for custom configuration.
    pub fn builder() -> SubDbClientBuilder {
        SubDbClientBuilder::default()
    }

    /// Set the identity sent with every request. Can be called again to
    /// replace it.
    pub fn set_user_agent(&mut self, client_name: &str, client_version: &str, client_url: &str) {
        self.user_agent = Some(UserAgent::new(client_name, client_version, client_url));
    }

    pub fn user_agent(&self) -> Option<&UserAgent> {
        self.user_agent.as_ref()
    }

    /// List the languages of all subtitles stored in the SubDB database.
    ///
    /// # Example
    /// ```no_run
    /// # use subdb_client::SubDbClient;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut client = SubDbClient::new()?;
    /// client.set_user_agent("MyPlayer", "1.0", "https://example.org");
    /// let languages = client.languages().await?;
    /// # Ok(())
    /// # }
    /// ```
    #[instrument(skip_all)]
    pub async fn languages(&self) -> Result<Vec<String>> {
        let user_agent = self.identity()?;

        let mut url = self.read_base_url.clone();
        url.query_pairs_mut().append_pair("action", "languages");

        let body = self.get_text(url, user_agent).await?;
        Ok(split_languages(&body))
    }

    /// List the subtitle languages available for a media file.
    #[instrument(skip_all, fields(file = %media.as_ref().display()))]
    pub async fn search<P: AsRef<Path>>(&self, media: P) -> Result<Vec<String>> {
        let user_agent = self.identity()?;
        let hash = fingerprint_file(media)?;

        let mut url = self.read_base_url.clone();
        url.query_pairs_mut()
            .append_pair("action", "search")
            .append_pair("hash", hash.as_str())
            .append_key_only("versions");

        let body = self.get_text(url, user_agent).await?;
        Ok(split_languages(&body))
    }

    /// Download the subtitle for a media file in the given language.
    ///
    /// The language code is case-insensitive. Query values are URL-encoded,
    /// so a code such as `"pt br"` is sent as `pt+br`. The subtitle is
    /// returned as the raw response bytes, whatever their encoding; writing
    /// it anywhere is up to the caller.
    #[instrument(skip_all, fields(file = %media.as_ref().display(), language = language))]
    pub async fn download<P: AsRef<Path>>(&self, media: P, language: &str) -> Result<Bytes> {
        let user_agent = self.identity()?;
        let hash = fingerprint_file(media)?;

        let mut url = self.read_base_url.clone();
        url.query_pairs_mut()
            .append_pair("action", "download")
            .append_pair("hash", hash.as_str())
            .append_pair("language", &normalize_language(language));

        let body = self.get(url, user_agent).await?.bytes().await?;
        trace!(target: "subdb", "subtitle size: {} bytes", body.len());
        Ok(body)
    }

    /// Upload a subtitle file for a media file.
    ///
    /// # Errors
    /// Returns:
    /// - `Duplicate` if the service already has this subtitle.
    /// - `InvalidMediaType` if the service rejects the subtitle format.
    #[instrument(
        skip_all,
        fields(file = %media.as_ref().display(), subtitle = %subtitle.as_ref().display())
    )]
    pub async fn upload<P: AsRef<Path>, S: AsRef<Path>>(&self, media: P, subtitle: S) -> Result<()> {
        let user_agent = self.identity()?;
        let hash = fingerprint_file(media)?;
        let form = subtitle_form(subtitle.as_ref(), &hash).await?;

        let mut url = self.upload_base_url.clone();
        url.query_pairs_mut().append_pair("action", "upload");

        trace!(target: "subdb", "POST {}", url);

        let mut request = self.client.post(url.as_str()).multipart(form);
        if let Some(timeout) = self.upload_timeout {
            request = request.timeout(timeout);
        }

        let response = with_identity(request, user_agent).send().await?;
        let status = response.status();
        debug!(target: "subdb", "upload response status: {}", status);

        upload_outcome(status)
    }

    fn identity(&self) -> Result<&UserAgent> {
        self.user_agent.as_ref().ok_or(SubDbError::MissingIdentity)
    }

    /// Perform a lookup request, failing unless the service answers `200 OK`.
    async fn get(&self, url: Url, user_agent: &UserAgent) -> Result<Response> {
        trace!(target: "subdb", "GET {}", url);

        let request = self.client.get(url.as_str()).timeout(self.read_timeout);
        let response = with_identity(request, user_agent).send().await?;

        let status = response.status();
        debug!(target: "subdb", "response status: {}", status);

        read_outcome(status)?;
        Ok(response)
    }

    async fn get_text(&self, url: Url, user_agent: &UserAgent) -> Result<String> {
        let body = self.get(url, user_agent).await?.text().await?;
        trace!(target: "subdb", "response body: {}", body);
        Ok(body)
    }
}

fn with_identity(request: RequestBuilder, user_agent: &UserAgent) -> RequestBuilder {
    request
        .header(USER_AGENT, user_agent.as_str())
        .header(CONNECTION, "close")
}

async fn subtitle_form(subtitle: &Path, hash: &FileHash) -> Result<Form> {
    let contents = tokio::fs::read(subtitle).await?;
    let file_name = subtitle
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let part = Part::bytes(contents)
        .file_name(file_name)
        .mime_str("application/octet-stream")?;

    Ok(Form::new()
        .part("file", part)
        .text("hash", hash.to_string()))
}

fn read_outcome(status: StatusCode) -> Result<()> {
    match status {
        StatusCode::OK => Ok(()),
        StatusCode::NOT_FOUND => Err(SubDbError::NoSubtitle),
        status => Err(SubDbError::UnexpectedStatus { status }),
    }
}

fn upload_outcome(status: StatusCode) -> Result<()> {
    match status {
        StatusCode::CREATED => Ok(()),
        StatusCode::FORBIDDEN => Err(SubDbError::Duplicate),
        StatusCode::UNSUPPORTED_MEDIA_TYPE => Err(SubDbError::InvalidMediaType),
        status if status.is_success() => Ok(()),
        status => Err(SubDbError::UnexpectedStatus { status }),
    }
}

/// Builder for configuring a SubDB client.
#[derive(Debug)]
pub struct SubDbClientBuilder {
    read_base_url: String,
    upload_base_url: String,
    read_timeout: Duration,
    upload_timeout: Option<Duration>,
    user_agent: Option<UserAgent>,
}

impl Default for SubDbClientBuilder {
    fn default() -> Self {
        Self {
            read_base_url: SUBDB_SANDBOX_BASE.to_string(),
            upload_base_url: SUBDB_API_BASE.to_string(),
            read_timeout: DEFAULT_READ_TIMEOUT,
            upload_timeout: None,
            user_agent: None,
        }
    }
}

impl SubDbClientBuilder {
    /// Set the base URL used for lookups (useful for testing with mock servers).
    pub fn read_base_url(mut self, url: impl Into<String>) -> Self {
        self.read_base_url = url.into();
        self
    }

    /// Set the base URL used for uploads.
    pub fn upload_base_url(mut self, url: impl Into<String>) -> Self {
        self.upload_base_url = url.into();
        self
    }

    /// Set the timeout applied to each lookup request.
    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    /// Set a timeout for uploads. Uploads have none by default.
    pub fn upload_timeout(mut self, timeout: Duration) -> Self {
        self.upload_timeout = Some(timeout);
        self
    }

    /// Set the client identity up front.
    pub fn user_agent(mut self, client_name: &str, client_version: &str, client_url: &str) -> Self {
        self.user_agent = Some(UserAgent::new(client_name, client_version, client_url));
        self
    }

    /// Build the SubDB client.
    ///
    /// # Errors
    /// Returns an error if:
    /// - Either base URL is not a valid URL
    /// - The HTTP client cannot be created
    pub fn build(self) -> Result<SubDbClient> {
        let read_base_url = parse_base_url(&self.read_base_url)?;
        let upload_base_url = parse_base_url(&self.upload_base_url)?;

        // Every call opens a fresh connection.
        let client = Client::builder().pool_max_idle_per_host(0).build()?;

        Ok(SubDbClient {
            client,
            read_base_url,
            upload_base_url,
            read_timeout: self.read_timeout,
            upload_timeout: self.upload_timeout,
            user_agent: self.user_agent,
        })
    }
}

/// Parse a base URL, making sure its path ends with `/` so requests go to
/// `<base>/?action=...`.
fn parse_base_url(raw: &str) -> Result<Url> {
    let mut url =
        Url::parse(raw).map_err(|e| SubDbError::InvalidBaseUrl(format!("{}: {}", raw, e)))?;

    if url.cannot_be_a_base() {
        return Err(SubDbError::InvalidBaseUrl(raw.to_string()));
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url.set_query(None);

    Ok(url)
}
