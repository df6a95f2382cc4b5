use async_trait::async_trait;
use phonebook_protocol::{
    endpoints, entry_path, CreateEntryRequest, ErrorBody, ErrorKind, UpdateEntryRequest,
};
use phonebook_types::{Entry, EntryId};
use reqwest::{Response, StatusCode};
use tracing::debug;

use crate::error::{ClientError, ClientResult};
use crate::transport::DirectoryTransport;

/// [`DirectoryTransport`] over the REST API.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    /// `base_url` is the server root, e.g. `http://127.0.0.1:3001`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the server's HTML info page.
    pub async fn info(&self) -> ClientResult<String> {
        let response = self.client.get(self.url(endpoints::INFO)).send().await?;
        Ok(check(response).await?.text().await?)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

#[async_trait]
impl DirectoryTransport for HttpTransport {
    async fn list(&self) -> ClientResult<Vec<Entry>> {
        let response = self.client.get(self.url(endpoints::ENTRIES)).send().await?;
        Ok(check(response).await?.json().await?)
    }

    async fn create(&self, name: &str, number: &str) -> ClientResult<Entry> {
        let body = CreateEntryRequest {
            name: Some(name.to_string()),
            number: Some(number.to_string()),
        };
        let response = self
            .client
            .post(self.url(endpoints::ENTRIES))
            .json(&body)
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    async fn update_number(&self, id: &EntryId, name: &str, number: &str) -> ClientResult<Entry> {
        let body = UpdateEntryRequest {
            name: Some(name.to_string()),
            number: Some(number.to_string()),
        };
        let response = self
            .client
            .put(self.url(&entry_path(&id.to_string())))
            .json(&body)
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    async fn delete(&self, id: &EntryId) -> ClientResult<()> {
        let response = self
            .client
            .delete(self.url(&entry_path(&id.to_string())))
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }
}

/// Pass successful responses through; turn everything else into a
/// [`ClientError`] using the body's `kind`.
async fn check(response: Response) -> ClientResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let url = response.url().to_string();
    let text = response.text().await.unwrap_or_default();
    debug!(%status, %url, body = %text, "request failed");
    Err(classify(status, &text))
}

fn classify(status: StatusCode, text: &str) -> ClientError {
    let Ok(body) = serde_json::from_str::<ErrorBody>(text) else {
        return if status == StatusCode::NOT_FOUND {
            ClientError::NotFound(text.to_string())
        } else {
            ClientError::Server { status: status.as_u16(), message: text.to_string() }
        };
    };

    match body.kind {
        ErrorKind::Validation => ClientError::Validation(body.error),
        ErrorKind::DuplicateName => ClientError::DuplicateName(body.error),
        ErrorKind::MalformedId => ClientError::MalformedId(body.error),
        ErrorKind::NotFound => ClientError::NotFound(body.error),
        ErrorKind::UnknownEndpoint | ErrorKind::BadRequest | ErrorKind::Internal => {
            ClientError::Server { status: status.as_u16(), message: body.error }
        }
    }
}
