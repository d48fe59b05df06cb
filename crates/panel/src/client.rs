use crate::backend::{PanelApi, ServerPage};
use crate::errors::PanelError;
use crate::models::{FileAttributes, ListResponse, ServerAttributes, SignedUrl};
use panelsync_filesystem::LocalFile;
use panelsync_models::{DirectoryOutcome, ServerRecord};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

type Result<T> = std::result::Result<T, PanelError>;

/// Accept header for the panel's client API
pub const API_ACCEPT: &str = "application/vnd.pterodactyl.v1+json";

/// Client for the panel's `/api/client` endpoints.
///
/// The underlying `reqwest::Client` pools connections and is shared by
/// every concurrent request of a run.
#[derive(Clone)]
pub struct PanelClient {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct CreateFolderRequest<'a> {
    root: &'a str,
    name: &'a str,
}

impl PanelClient {
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(PanelError::ConfigError("panel URL is empty".to_string()));
        }
        reqwest::Url::parse(&base_url)
            .map_err(|e| PanelError::ConfigError(format!("invalid panel URL '{}': {}", base_url, e)))?;

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("panelsync/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            base_url,
            api_key: api_key.to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn server_files_url(&self, server: &ServerRecord, action: &str) -> String {
        format!(
            "{}/api/client/servers/{}/files/{}",
            self.base_url, server.identifier, action
        )
    }

    /// Request to the panel itself, carrying the API key
    fn panel_request(&self, method: Method, url: &str) -> RequestBuilder {
        self.client
            .request(method, url)
            .bearer_auth(&self.api_key)
            .header(reqwest::header::ACCEPT, API_ACCEPT)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, query: &[(&str, &str)]) -> Result<T> {
        let response = self.panel_request(Method::GET, url).query(query).send().await?;
        let response = ensure_success(response).await?;
        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| PanelError::MalformedResponse {
            url: url.to_string(),
            reason: e.to_string(),
        })
    }

    async fn signed_upload_url(&self, server: &ServerRecord, directory: &str) -> Result<String> {
        let url = self.server_files_url(server, "upload");
        let signed: SignedUrl = self.get_json(&url, &[("directory", directory)]).await?;
        Ok(signed.attributes.url)
    }
}

#[async_trait::async_trait]
impl PanelApi for PanelClient {
    async fn list_servers(&self, page: u32) -> Result<ServerPage> {
        let url = format!("{}/api/client", self.base_url);
        let page_param = page.to_string();
        let list: ListResponse<ServerAttributes> = self
            .get_json(&url, &[("page", page_param.as_str()), ("include", "egg")])
            .await?;

        // A response without pagination metadata is a single page
        let (current_page, total_pages) = list
            .meta
            .and_then(|m| m.pagination)
            .map(|p| (p.current_page, p.total_pages))
            .unwrap_or((page, page));

        let servers = list
            .data
            .into_iter()
            .map(|resource| ServerRecord::from(resource.attributes))
            .collect();

        Ok(ServerPage {
            servers,
            current_page,
            total_pages,
        })
    }

    async fn create_directory(
        &self,
        server: &ServerRecord,
        root: &str,
        name: &str,
    ) -> Result<DirectoryOutcome> {
        let url = self.server_files_url(server, "create-folder");
        let response = self
            .panel_request(Method::POST, &url)
            .json(&CreateFolderRequest { root, name })
            .send()
            .await?;

        let status = response.status();
        if let Some(outcome) = classify_create_status(status) {
            tracing::debug!(server = %server.identifier, "create-folder {}/{} -> {}", root.trim_end_matches('/'), name, status);
            return Ok(outcome);
        }

        Err(status_error(response, &url).await)
    }

    async fn directory_exists(
        &self,
        server: &ServerRecord,
        root: &str,
        name: &str,
    ) -> Result<bool> {
        let url = self.server_files_url(server, "list");
        let list: ListResponse<FileAttributes> = self.get_json(&url, &[("directory", root)]).await?;

        Ok(list
            .data
            .iter()
            .any(|entry| entry.attributes.name == name && !entry.attributes.is_file))
    }

    async fn upload_file(
        &self,
        server: &ServerRecord,
        directory: &str,
        file: &LocalFile,
    ) -> Result<()> {
        let signed_url = self.signed_upload_url(server, directory).await?;

        let part = reqwest::multipart::Part::stream_with_length(file.content.clone(), file.len() as u64)
            .file_name(file.file_name.clone())
            .mime_str(&file.mime_type)?;
        let form = reqwest::multipart::Form::new().part("files", part);

        // The signed URL carries its own token; the API key stays with the panel
        let response = self
            .client
            .post(&signed_url)
            .query(&[("directory", directory)])
            .multipart(form)
            .send()
            .await?;

        ensure_success(response).await.map(|_| ())
    }
}

/// Create-folder statuses that count as success
pub(crate) fn classify_create_status(status: StatusCode) -> Option<DirectoryOutcome> {
    if status.is_success() {
        Some(DirectoryOutcome::Created)
    } else if status == StatusCode::BAD_REQUEST || status == StatusCode::CONFLICT {
        // The daemon rejects creating a directory that is already there
        Some(DirectoryOutcome::AlreadyExists)
    } else {
        None
    }
}

async fn ensure_success(response: Response) -> Result<Response> {
    if response.status().is_success() {
        Ok(response)
    } else {
        let url = strip_query(response.url().as_str()).to_string();
        Err(status_error(response, &url).await)
    }
}

async fn status_error(response: Response, url: &str) -> PanelError {
    const MAX_BODY: usize = 512;

    let status = response.status().as_u16();
    let mut body = response.text().await.unwrap_or_default();
    if body.len() > MAX_BODY {
        let mut cut = MAX_BODY;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        body.truncate(cut);
        body.push('…');
    }

    PanelError::StatusError {
        status,
        url: url.to_string(),
        body,
    }
}

/// Signed URLs embed a token in the query; keep it out of error messages
fn strip_query(url: &str) -> &str {
    url.split_once('?').map_or(url, |(path, _)| path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server() -> ServerRecord {
        ServerRecord {
            id: Some(1),
            identifier: "1a7ce997".into(),
            uuid: "1a7ce997-uuid".into(),
            name: "Retakes".into(),
            egg: None,
            egg_uuid: None,
            docker_image: None,
        }
    }

    #[test]
    fn create_status_classification() {
        assert_eq!(classify_create_status(StatusCode::NO_CONTENT), Some(DirectoryOutcome::Created));
        assert_eq!(classify_create_status(StatusCode::OK), Some(DirectoryOutcome::Created));
        assert_eq!(
            classify_create_status(StatusCode::BAD_REQUEST),
            Some(DirectoryOutcome::AlreadyExists)
        );
        assert_eq!(
            classify_create_status(StatusCode::CONFLICT),
            Some(DirectoryOutcome::AlreadyExists)
        );
        assert_eq!(classify_create_status(StatusCode::FORBIDDEN), None);
        assert_eq!(classify_create_status(StatusCode::INTERNAL_SERVER_ERROR), None);
    }

    #[test]
    fn urls_are_built_from_trimmed_base() {
        let client = PanelClient::new("https://panel.example.com/ ", "key", Duration::from_secs(5)).unwrap();
        assert_eq!(client.base_url(), "https://panel.example.com");
        assert_eq!(
            client.server_files_url(&server(), "create-folder"),
            "https://panel.example.com/api/client/servers/1a7ce997/files/create-folder"
        );
    }

    #[test]
    fn empty_or_malformed_base_url_is_rejected() {
        assert!(matches!(
            PanelClient::new(" / ", "key", Duration::from_secs(5)),
            Err(PanelError::ConfigError(_))
        ));
        assert!(matches!(
            PanelClient::new("https://panel.example.com:notaport", "key", Duration::from_secs(5)),
            Err(PanelError::ConfigError(_))
        ));
    }

    #[test]
    fn query_is_stripped_from_urls() {
        assert_eq!(
            strip_query("https://node.example.com/upload/file?token=secret&directory=/"),
            "https://node.example.com/upload/file"
        );
        assert_eq!(strip_query("https://panel.example.com/api/client"), "https://panel.example.com/api/client");
    }

    #[test]
    fn create_folder_body_shape() {
        let body = serde_json::to_value(CreateFolderRequest { root: "/cfg", name: "plugins" }).unwrap();
        assert_eq!(body, serde_json::json!({ "root": "/cfg", "name": "plugins" }));
    }
}
