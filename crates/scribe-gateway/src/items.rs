//! HTTP implementation of the item-collection gateway.
//!
//! One request per call, no client-side caching. List query parameters
//! mirror what the backend expects: unset selectors and empty query text
//! are omitted entirely rather than sent as "all" or "".

use async_trait::async_trait;
use reqwest::Method;
use scribe_core::item::{Item, ItemDraft, ItemGateway, ItemPatch, LibraryFilter};
use scribe_core::{Result, ScribeError};
use serde::Deserialize;

use crate::connection::{ApiConnection, read_json};

/// Item-collection endpoints over the shared connection.
#[derive(Debug, Clone)]
pub struct HttpItemGateway {
    connection: ApiConnection,
}

#[derive(Debug, Deserialize)]
struct ListItemsResponse {
    items: Vec<Item>,
}

impl HttpItemGateway {
    pub fn new(connection: ApiConnection) -> Self {
        Self { connection }
    }

    /// Builds the list query, omitting inactive parts.
    ///
    /// The user id rides along when a session exists so the backend can
    /// scope the listing; anonymous listings send no user id at all.
    async fn list_query(
        &self,
        filter: &LibraryFilter,
        page: u32,
        page_size: u32,
    ) -> Vec<(&'static str, String)> {
        let mut query: Vec<(&'static str, String)> = Vec::new();
        let text = filter.query.trim();
        if !text.is_empty() {
            query.push(("q", text.to_string()));
        }
        if let Some(platform) = filter.platform {
            query.push(("platform", platform.to_string()));
        }
        if let Some(tone) = filter.tone {
            query.push(("tone", tone.to_string()));
        }
        query.push(("page", page.to_string()));
        query.push(("pageSize", page_size.to_string()));
        if let Some(session) = self.connection.session().current().await {
            query.push(("user_id", session.user_id));
        }
        query
    }
}

#[async_trait]
impl ItemGateway for HttpItemGateway {
    async fn list(&self, filter: &LibraryFilter, page: u32, page_size: u32) -> Result<Vec<Item>> {
        let query = self.list_query(filter, page, page_size).await;
        let request = self
            .connection
            .request(Method::GET, "/items")
            .await
            .query(&query);
        let response = self.connection.send(request).await?;
        let body: ListItemsResponse = read_json(response).await?;
        tracing::debug!(
            target: "scribe::gateway",
            page,
            count = body.items.len(),
            "listed items"
        );
        Ok(body.items)
    }

    async fn create(&self, draft: &ItemDraft) -> Result<Item> {
        let request = self
            .connection
            .request(Method::POST, "/items")
            .await
            .json(draft);
        let response = self.connection.send(request).await?;
        read_json(response).await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let request = self
            .connection
            .request(Method::DELETE, &format!("/items/{id}"))
            .await;
        self.connection.send(request).await?;
        Ok(())
    }

    async fn duplicate(&self, id: &str) -> Result<Item> {
        let request = self
            .connection
            .request(Method::POST, &format!("/items/{id}/duplicate"))
            .await;
        let response = self.connection.send(request).await?;
        read_json(response).await
    }

    async fn update(&self, id: &str, patch: &ItemPatch) -> Result<Item> {
        // The backend answers 400 for an empty patch; catch it locally.
        if patch.is_empty() {
            return Err(ScribeError::validation("Nothing to update."));
        }
        let request = self
            .connection
            .request(Method::PATCH, &format!("/items/{id}"))
            .await
            .json(patch);
        let response = self.connection.send(request).await?;
        read_json(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scribe_core::auth::{AuthSession, SessionHandle};
    use scribe_core::config::ClientConfig;
    use scribe_core::item::{Platform, Tone};
    use wiremock::matchers::{body_json, method, path, query_param, query_param_is_missing};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn connection(base_url: &str) -> ApiConnection {
        let config = ClientConfig {
            base_url: base_url.to_string(),
            request_timeout_secs: 5,
        };
        ApiConnection::new(&config, SessionHandle::new()).unwrap()
    }

    fn item_json(id: &str) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "title": "Launch post",
            "content": "We shipped.",
            "platform": "linkedin",
            "tone": "professional",
            "mode": "social",
            "words": 120,
            "model": "llama-3.1-8b",
            "tags": ["linkedin", "professional"],
            "pinned": false,
            "created_at": "2025-06-01T12:00:00Z"
        })
    }

    #[tokio::test]
    async fn test_list_unfiltered_omits_selectors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/items"))
            .and(query_param("page", "1"))
            .and(query_param("pageSize", "20"))
            .and(query_param_is_missing("q"))
            .and(query_param_is_missing("platform"))
            .and(query_param_is_missing("tone"))
            .and(query_param_is_missing("user_id"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "items": [item_json("itm-1"), item_json("itm-2")]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let gateway = HttpItemGateway::new(connection(&server.uri()));
        let items = gateway.list(&LibraryFilter::default(), 1, 20).await.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, "itm-1");
    }

    #[tokio::test]
    async fn test_list_sends_active_filter() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/items"))
            .and(query_param("q", "launch"))
            .and(query_param("platform", "blog"))
            .and(query_param("tone", "witty"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "items": []
            })))
            .expect(1)
            .mount(&server)
            .await;

        let filter = LibraryFilter {
            query: "launch".to_string(),
            platform: Some(Platform::Blog),
            tone: Some(Tone::Witty),
        };
        let gateway = HttpItemGateway::new(connection(&server.uri()));
        let items = gateway.list(&filter, 2, 20).await.unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_list_scopes_to_session_user() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/items"))
            .and(query_param("user_id", "user-9"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "items": []
            })))
            .expect(1)
            .mount(&server)
            .await;

        let session = SessionHandle::new();
        session
            .replace(AuthSession {
                access_token: "tok".to_string(),
                user_id: "user-9".to_string(),
            })
            .await;
        let config = ClientConfig {
            base_url: server.uri(),
            request_timeout_secs: 5,
        };
        let gateway = HttpItemGateway::new(ApiConnection::new(&config, session).unwrap());
        gateway.list(&LibraryFilter::default(), 1, 20).await.unwrap();
    }

    #[tokio::test]
    async fn test_create_returns_stored_record() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/items"))
            .respond_with(ResponseTemplate::new(200).set_body_json(item_json("itm-new")))
            .expect(1)
            .mount(&server)
            .await;

        let draft = ItemDraft {
            title: Some("Launch post".to_string()),
            content: "We shipped.".to_string(),
            platform: Platform::Linkedin,
            tone: Tone::Professional,
            mode: scribe_core::item::Mode::Social,
            words: 120,
            model: Some("llama-3.1-8b".to_string()),
            tags: vec!["linkedin".to_string()],
            pinned: false,
        };
        let gateway = HttpItemGateway::new(connection(&server.uri()));
        let item = gateway.create(&draft).await.unwrap();
        assert_eq!(item.id, "itm-new");
    }

    #[tokio::test]
    async fn test_delete_missing_item_is_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/items/itm-404"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "detail": "Not found"
            })))
            .mount(&server)
            .await;

        let gateway = HttpItemGateway::new(connection(&server.uri()));
        let err = gateway.delete("itm-404").await.unwrap_err();
        assert!(matches!(
            err,
            ScribeError::Api { status: 404, ref message } if message == "Not found"
        ));
    }

    #[tokio::test]
    async fn test_duplicate_posts_to_clone_route() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/items/itm-1/duplicate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(item_json("itm-1-copy")))
            .expect(1)
            .mount(&server)
            .await;

        let gateway = HttpItemGateway::new(connection(&server.uri()));
        let clone = gateway.duplicate("itm-1").await.unwrap();
        assert_eq!(clone.id, "itm-1-copy");
    }

    #[tokio::test]
    async fn test_update_sends_only_set_fields() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/items/itm-1"))
            .and(body_json(serde_json::json!({ "pinned": true })))
            .respond_with(ResponseTemplate::new(200).set_body_json(item_json("itm-1")))
            .expect(1)
            .mount(&server)
            .await;

        let gateway = HttpItemGateway::new(connection(&server.uri()));
        gateway
            .update("itm-1", &ItemPatch::pinned(true))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_update_rejects_empty_patch_locally() {
        // No mock server mounted on this port; a request would fail loudly.
        let gateway = HttpItemGateway::new(connection("http://127.0.0.1:9"));
        let err = gateway.update("itm-1", &ItemPatch::default()).await.unwrap_err();
        assert!(err.is_validation());
    }
}
