//! HTTP Ticket Service
//!
//! REST bindings to the kitchen ticket backend. Bodies are read as text and
//! decoded against the schemas in `models`; anything that does not fit is a
//! `Malformed` error.

use async_trait::async_trait;
use reqwest::{header, Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;

use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult};
use crate::models::{AuditEvent, SyncRunResult, TicketDetail, TicketFilter, TicketSummary};
use crate::service::{
    ItemCancel, ItemRef, ItemReplace, ItemStatusUpdate, SyncRunRequest, TicketService,
};

pub struct HttpTicketService {
    client: Client,
    config: ApiConfig,
}

impl HttpTicketService {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Send and return the raw body of a 2xx response
    async fn send(&self, request: RequestBuilder) -> ApiResult<String> {
        let response = self
            .authorized(request)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        if status.is_success() {
            Ok(body)
        } else {
            log::warn!("[API] {} -> {}", status, body);
            Err(ApiError::from_status(status.as_u16(), &body))
        }
    }

    async fn send_json<R: DeserializeOwned>(&self, request: RequestBuilder) -> ApiResult<R> {
        let body = self.send(request).await?;
        decode(&body)
    }

    /// Base URL plus path segments, each one percent-encoded so ids
    /// containing `/`, `?` or spaces stay inside their segment.
    fn url(&self, segments: &[&str]) -> ApiResult<Url> {
        let mut url = Url::parse(&self.config.base_url)
            .map_err(|e| ApiError::Transport(format!("URL base inválida: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| ApiError::Transport(format!("URL base inválida: {}", self.config.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn item_url(&self, item: &ItemRef, action: &str) -> ApiResult<Url> {
        self.url(&["tickets", &item.ticket_id, "items", &item.item_id, action])
    }
}

pub(crate) fn decode<R: DeserializeOwned>(body: &str) -> ApiResult<R> {
    serde_json::from_str(body).map_err(|e| ApiError::Malformed(e.to_string()))
}

#[async_trait(?Send)]
impl TicketService for HttpTicketService {
    async fn list_tickets(&self, filter: &TicketFilter) -> ApiResult<Vec<TicketSummary>> {
        let request = self
            .client
            .get(self.url(&["tickets"])?)
            .query(&filter.query_pairs());
        self.send_json(request).await
    }

    async fn get_ticket_detail(&self, ticket_id: &str) -> ApiResult<TicketDetail> {
        let request = self
            .client
            .get(self.url(&["tickets", ticket_id])?);
        self.send_json(request).await
    }

    async fn run_sync(&self) -> ApiResult<SyncRunResult> {
        let request = self
            .client
            .post(self.url(&["sync", "run"])?)
            .json(&SyncRunRequest::MANUAL);
        self.send_json(request).await
    }

    async fn update_item_status(&self, item: &ItemRef, body: &ItemStatusUpdate) -> ApiResult<()> {
        let request = self.client.patch(self.item_url(item, "status")?).json(body);
        self.send(request).await.map(|_| ())
    }

    async fn cancel_item(&self, item: &ItemRef, body: &ItemCancel) -> ApiResult<()> {
        let request = self.client.post(self.item_url(item, "cancel")?).json(body);
        self.send(request).await.map(|_| ())
    }

    async fn replace_item(&self, item: &ItemRef, body: &ItemReplace) -> ApiResult<()> {
        let request = self.client.post(self.item_url(item, "replace")?).json(body);
        self.send(request).await.map(|_| ())
    }

    async fn print_ticket(&self, ticket_id: &str, width_mm: Option<u32>) -> ApiResult<String> {
        let mut request = self
            .client
            .post(self.url(&["tickets", ticket_id, "print"])?)
            .header(header::ACCEPT, "text/html");
        if let Some(width) = width_mm {
            request = request.query(&[("width", width)]);
        }
        self.send(request).await
    }

    async fn get_ticket_events(&self, ticket_id: &str) -> ApiResult<Vec<AuditEvent>> {
        let request = self
            .client
            .get(self.url(&["tickets", ticket_id, "events"])?);
        self.send_json(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_rejects_wrong_shape() {
        let err = decode::<Vec<TicketSummary>>(r#"{"tickets": []}"#).unwrap_err();
        assert!(matches!(err, ApiError::Malformed(_)));
    }

    #[test]
    fn test_decode_sync_result() {
        let body = r#"{"run_id": "r1", "mode": "MANUAL", "new_tickets": 2, "updated_tickets": 5, "errors": 0,
                       "started_at": "2026-10-16T12:00:00Z", "ended_at": "2026-10-16T12:00:02Z"}"#;
        let result: SyncRunResult = decode(body).unwrap();
        assert_eq!(result.summary_message(), "Sync OK · nuevos: 2 · actualizados: 5");
    }

    #[test]
    fn test_item_url() {
        let service = HttpTicketService::new(ApiConfig::from_values(Some("http://api/"), None, None));
        let url = service.item_url(&ItemRef::new("t-1", "i-9"), "cancel").unwrap();
        assert_eq!(url.as_str(), "http://api/tickets/t-1/items/i-9/cancel");
    }

    #[test]
    fn test_ids_are_encoded_as_single_segments() {
        let service = HttpTicketService::new(ApiConfig::from_values(Some("http://api/v1"), None, None));
        let url = service.url(&["tickets", "a/b c?x", "events"]).unwrap();
        assert_eq!(url.as_str(), "http://api/v1/tickets/a%2Fb%20c%3Fx/events");
        assert_eq!(url.path_segments().map(|s| s.count()), Some(4));

        let url = service.item_url(&ItemRef::new("t#1", "50%"), "status").unwrap();
        assert_eq!(url.as_str(), "http://api/v1/tickets/t%231/items/50%25/status");
    }

    #[test]
    fn test_unusable_base_url_is_an_error() {
        let service = HttpTicketService::new(ApiConfig::from_values(Some("not a url"), None, None));
        let err = service.url(&["tickets"]).unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }
}
