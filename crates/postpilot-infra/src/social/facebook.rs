//! Facebook Graph publish client.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use postpilot_core::domain::{Platform, PlatformCredentials};
use postpilot_core::error::PublishError;
use postpilot_core::ports::{PlatformClient, PublishContent, PublishedPost};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct FacebookConfig {
    pub base_url: String,
}

impl Default for FacebookConfig {
    fn default() -> Self {
        Self {
            base_url: "https://graph.facebook.com/v18.0".to_string(),
        }
    }
}

/// Publishes to a Facebook page feed. Credentials are the page id and a page
/// access token.
pub struct FacebookClient {
    client: reqwest::Client,
    config: FacebookConfig,
}

impl FacebookClient {
    pub fn new(config: FacebookConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

fn build_payload(credentials: &PlatformCredentials, content: &PublishContent) -> serde_json::Value {
    let mut payload = serde_json::json!({
        "message": content.caption,
        "access_token": credentials.access_token,
    });
    if let Some(image_url) = &content.image_url {
        payload["picture"] = serde_json::Value::String(image_url.clone());
        payload["link"] = serde_json::Value::String(image_url.clone());
    }
    payload
}

#[derive(Debug, Deserialize)]
struct FeedResponse {
    id: String,
}

#[async_trait]
impl PlatformClient for FacebookClient {
    fn platform(&self) -> Platform {
        Platform::Facebook
    }

    async fn publish(
        &self,
        credentials: &PlatformCredentials,
        content: &PublishContent,
    ) -> Result<PublishedPost, PublishError> {
        let url = format!("{}/{}/feed", self.config.base_url, credentials.account_id);
        let payload = build_payload(credentials, content);

        let response = self
            .client
            .post(&url)
            .timeout(REQUEST_TIMEOUT)
            .json(&payload)
            .send()
            .await
            .map_err(|e| PublishError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PublishError::Api(format!(
                "facebook returned {status}: {body}"
            )));
        }

        let feed: FeedResponse = response
            .json()
            .await
            .map_err(|e| PublishError::Api(format!("unexpected facebook response: {e}")))?;

        Ok(PublishedPost {
            url: format!("https://facebook.com/{}", feed.id),
            post_id: feed.id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials() -> PlatformCredentials {
        PlatformCredentials {
            account_id: "page-42".to_string(),
            access_token: "page-token".to_string(),
        }
    }

    #[test]
    fn payload_carries_message_and_token() {
        let payload = build_payload(
            &credentials(),
            &PublishContent {
                caption: "hello\n\n#rust".to_string(),
                image_url: None,
            },
        );

        assert_eq!(payload["message"], "hello\n\n#rust");
        assert_eq!(payload["access_token"], "page-token");
        assert!(payload.get("picture").is_none());
    }

    #[test]
    fn payload_links_the_image_when_present() {
        let payload = build_payload(
            &credentials(),
            &PublishContent {
                caption: "hello".to_string(),
                image_url: Some("https://cdn.example.com/a.png".to_string()),
            },
        );

        assert_eq!(payload["picture"], "https://cdn.example.com/a.png");
        assert_eq!(payload["link"], "https://cdn.example.com/a.png");
    }
}
