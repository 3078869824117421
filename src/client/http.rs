//! Data access against the schedule REST API.

use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;

use super::ClientError;
use crate::api::ApiResponse;
use crate::errors::ErrorResponse;
use crate::models::{BulkUpdateRequest, Page, ScheduleDetail, Shift, UpdateDetailRequest};

/// Request/response operations on the schedule backend. No side effects
/// beyond the HTTP call itself.
#[async_trait]
pub trait ScheduleApi: Send + Sync {
    async fn fetch_details_by_staff(&self, staff_id: &str)
        -> Result<Vec<ScheduleDetail>, ClientError>;

    async fn bulk_update(
        &self,
        staff_id: &str,
        request: &BulkUpdateRequest,
    ) -> Result<(), ClientError>;

    async fn delete_detail(&self, id: &str) -> Result<(), ClientError>;

    async fn update_detail(
        &self,
        id: &str,
        request: &UpdateDetailRequest,
    ) -> Result<(), ClientError>;

    async fn list_shifts(&self, page: u32, size: u32) -> Result<Page<Shift>, ClientError>;
}

/// [`ScheduleApi`] over HTTP with `reqwest`.
#[derive(Clone)]
pub struct HttpScheduleApi {
    client: Client,
    base_url: String,
}

impl HttpScheduleApi {
    /// `base_url` is the API root, e.g. `http://127.0.0.1:8080/api`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// `base_url` followed by `segments`, each percent-escaped as one path segment.
    fn url(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = Url::parse(&self.base_url).map_err(|err| {
            ClientError::Transport(format!("Invalid base URL {}: {}", self.base_url, err))
        })?;
        url.path_segments_mut()
            .map_err(|_| {
                ClientError::Transport(format!("Base URL cannot carry a path: {}", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

#[async_trait]
impl ScheduleApi for HttpScheduleApi {
    async fn fetch_details_by_staff(
        &self,
        staff_id: &str,
    ) -> Result<Vec<ScheduleDetail>, ClientError> {
        let resp = self
            .client
            .get(self.url(&["work-schedule", "staff", staff_id])?)
            .send()
            .await?;
        read_data(resp).await
    }

    async fn bulk_update(
        &self,
        staff_id: &str,
        request: &BulkUpdateRequest,
    ) -> Result<(), ClientError> {
        let resp = self
            .client
            .put(self.url(&["work-schedules", "bulk-update", staff_id])?)
            .json(request)
            .send()
            .await?;
        read_ok(resp).await
    }

    async fn delete_detail(&self, id: &str) -> Result<(), ClientError> {
        let resp = self
            .client
            .delete(self.url(&["work-schedule", id])?)
            .send()
            .await?;
        read_ok(resp).await
    }

    async fn update_detail(
        &self,
        id: &str,
        request: &UpdateDetailRequest,
    ) -> Result<(), ClientError> {
        let resp = self
            .client
            .put(self.url(&["work-schedule", "update-detail", id])?)
            .json(request)
            .send()
            .await?;
        read_ok(resp).await
    }

    async fn list_shifts(&self, page: u32, size: u32) -> Result<Page<Shift>, ClientError> {
        let resp = self
            .client
            .get(self.url(&["shifts"])?)
            .query(&[("page", page), ("size", size)])
            .send()
            .await?;
        read_data(resp).await
    }
}

/// Unwrap the `data` field of a success envelope.
async fn read_data<T: DeserializeOwned>(resp: Response) -> Result<T, ClientError> {
    let status = resp.status();
    let body = resp.bytes().await?;

    if !status.is_success() {
        return Err(api_error(status.as_u16(), &body));
    }

    let envelope: ApiResponse<T> = serde_json::from_slice(&body)?;
    Ok(envelope.data)
}

/// Check the status and discard the body of a mutation response.
async fn read_ok(resp: Response) -> Result<(), ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(());
    }
    let body = resp.bytes().await?;
    Err(api_error(status.as_u16(), &body))
}

/// Best-effort extraction of the backend's error code and message.
fn api_error(status: u16, body: &[u8]) -> ClientError {
    match serde_json::from_slice::<ErrorResponse>(body) {
        Ok(envelope) => ClientError::Api {
            status,
            code: Some(envelope.error.code),
            message: Some(envelope.error.message),
        },
        Err(_) => ClientError::Api {
            status,
            code: None,
            message: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_reads_envelope() {
        let body = br#"{"success":false,"error":{"code":"NOT_FOUND","message":"Schedule detail 9 not found"}}"#;
        let err = api_error(404, body);
        assert_eq!(
            err,
            ClientError::Api {
                status: 404,
                code: Some("NOT_FOUND".to_string()),
                message: Some("Schedule detail 9 not found".to_string()),
            }
        );
    }

    #[test]
    fn test_api_error_tolerates_foreign_body() {
        let err = api_error(502, b"<html>Bad Gateway</html>");
        assert_eq!(err.user_message(), None);
        assert!(matches!(err, ClientError::Api { status: 502, .. }));
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let api = HttpScheduleApi::new("http://localhost:8080/api/");
        assert_eq!(
            api.url(&["shifts"]).unwrap().as_str(),
            "http://localhost:8080/api/shifts"
        );
    }

    #[test]
    fn test_ids_are_escaped_as_single_segments() {
        let api = HttpScheduleApi::new("http://localhost:8080/api");
        let url = api
            .url(&["work-schedules", "bulk-update", "ward#3/b?x"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/api/work-schedules/bulk-update/ward%233%2Fb%3Fx"
        );
        assert_eq!(url.query(), None);
        assert_eq!(url.fragment(), None);
    }

    #[test]
    fn test_invalid_base_url_is_a_transport_error() {
        let api = HttpScheduleApi::new("not a url");
        assert!(matches!(api.url(&["shifts"]), Err(ClientError::Transport(_))));
    }
}
