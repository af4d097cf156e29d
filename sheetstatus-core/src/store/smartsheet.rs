//! Blocking HTTP client for the Smartsheet REST API (v2)

use super::model::{RowDraft, Sheet, User, Workspace, WorkspaceRef};
use super::{SheetStore, StoreError};
use reqwest::blocking::{Client, RequestBuilder};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::fmt;
use std::time::Duration;
use tracing::trace;

pub const DEFAULT_BASE_URL: &str = "https://api.smartsheet.com/2.0";

/// Sheet fetches always ask for full hydration in one call
const SHEET_INCLUDE: &str = "ownerInfo,source,rowIds,rowNumbers,columnIds";
const SHEET_PAGE_SIZE: &str = "1000";

/// Paginated listing envelope
#[derive(Debug, Deserialize)]
struct IndexResult<T> {
    #[serde(default = "Vec::new")]
    data: Vec<T>,
}

/// Error body returned with non-2xx responses
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiErrorBody {
    #[serde(default)]
    error_code: Option<i64>,
    #[serde(default)]
    message: Option<String>,
}

/// Smartsheet API client
pub struct SmartsheetClient {
    client: Client,
    base_url: String,
    token: String,
}

impl SmartsheetClient {
    /// Create a client against the default API endpoint
    pub fn new(token: impl Into<String>) -> Result<Self, StoreError> {
        Self::with_options(token, DEFAULT_BASE_URL, Duration::from_secs(60))
    }

    /// Create a client with a custom base URL and per-request timeout
    pub fn with_options(
        token: impl Into<String>,
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, StoreError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.into(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn get(&self, path: &str) -> RequestBuilder {
        trace!(method = "GET", path, "sheet store request");
        self.client.get(self.url(path)).bearer_auth(&self.token)
    }

    fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, StoreError> {
        let response = request.send()?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(api_error(status.as_u16(), &body));
        }
        Ok(response.json::<T>()?)
    }
}

impl fmt::Debug for SmartsheetClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmartsheetClient")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Decode a non-2xx response body into a [`StoreError::Api`]
fn api_error(status: u16, body: &str) -> StoreError {
    let parsed: ApiErrorBody = serde_json::from_str(body).unwrap_or_default();
    let message = parsed.message.unwrap_or_else(|| {
        if body.trim().is_empty() {
            "no response body".to_string()
        } else {
            body.trim().to_string()
        }
    });
    StoreError::Api {
        status,
        code: parsed.error_code,
        message,
    }
}

impl SheetStore for SmartsheetClient {
    fn list_workspaces(&self) -> Result<Vec<WorkspaceRef>, StoreError> {
        let listing: IndexResult<WorkspaceRef> =
            self.send_json(self.get("workspaces").query(&[("includeAll", "true")]))?;
        Ok(listing.data)
    }

    fn get_workspace(&self, workspace_id: u64) -> Result<Workspace, StoreError> {
        self.send_json(
            self.get(&format!("workspaces/{}", workspace_id))
                .query(&[("loadAll", "true"), ("include", "ownerInfo,source")]),
        )
    }

    fn get_sheet(&self, sheet_id: u64) -> Result<Sheet, StoreError> {
        self.send_json(
            self.get(&format!("sheets/{}", sheet_id))
                .query(&[("pageSize", SHEET_PAGE_SIZE), ("include", SHEET_INCLUDE)]),
        )
    }

    fn get_user(&self, user_id: u64) -> Result<User, StoreError> {
        self.send_json(self.get(&format!("users/{}", user_id)))
    }

    fn add_rows(&self, sheet_id: u64, rows: &[RowDraft]) -> Result<(), StoreError> {
        let path = format!("sheets/{}/rows", sheet_id);
        trace!(method = "POST", path = %path, rows = rows.len(), "sheet store request");
        let request = self
            .client
            .post(self.url(&path))
            .bearer_auth(&self.token)
            .json(rows);
        let _: serde_json::Value = self.send_json(request)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joining() {
        let client =
            SmartsheetClient::with_options("t", "https://example.test/2.0/", Duration::from_secs(5))
                .unwrap();
        assert_eq!(client.url("sheets/1"), "https://example.test/2.0/sheets/1");
        assert_eq!(client.url("/users/2"), "https://example.test/2.0/users/2");
    }

    #[test]
    fn test_debug_redacts_token() {
        let client = SmartsheetClient::new("super-secret").unwrap();
        let debug = format!("{:?}", client);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_api_error_decoding() {
        let err = api_error(
            404,
            r#"{"errorCode": 1006, "message": "Not Found", "refId": "abc"}"#,
        );
        match err {
            StoreError::Api {
                status,
                code,
                message,
            } => {
                assert_eq!(status, 404);
                assert_eq!(code, Some(1006));
                assert_eq!(message, "Not Found");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let err = api_error(502, "Bad Gateway");
        assert!(matches!(err, StoreError::Api { code: None, ref message, .. } if message == "Bad Gateway"));
    }

    #[test]
    fn test_workspace_listing_envelope() {
        let json = r#"{"pageNumber": 1, "totalPages": 1, "data": [{"id": 3517256463345540, "name": "IoT Project Status", "accessLevel": "OWNER"}]}"#;
        let listing: IndexResult<WorkspaceRef> = serde_json::from_str(json).unwrap();
        assert_eq!(listing.data.len(), 1);
        assert_eq!(listing.data[0].id, 3517256463345540);
    }
}
