//! LinkedIn UGC publish client.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use postpilot_core::domain::{Platform, PlatformCredentials};
use postpilot_core::error::PublishError;
use postpilot_core::ports::{PlatformClient, PublishContent, PublishedPost};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct LinkedinConfig {
    pub base_url: String,
}

impl Default for LinkedinConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.linkedin.com/v2".to_string(),
        }
    }
}

/// Publishes UGC posts to a member profile. Credentials are the profile id
/// and a member access token.
pub struct LinkedinClient {
    client: reqwest::Client,
    config: LinkedinConfig,
}

impl LinkedinClient {
    pub fn new(config: LinkedinConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

fn build_payload(credentials: &PlatformCredentials, content: &PublishContent) -> serde_json::Value {
    let media = match &content.image_url {
        Some(image_url) => serde_json::json!([{
            "status": "READY",
            "description": { "text": "Image" },
            "media": image_url,
            "title": { "text": "Post Image" },
        }]),
        None => serde_json::json!([]),
    };

    serde_json::json!({
        "author": format!("urn:li:person:{}", credentials.account_id),
        "lifecycleState": "PUBLISHED",
        "specificContent": {
            "com.linkedin.ugc.PublishOpen": {
                "commentaryV2": { "text": content.caption },
                "media": media,
            },
        },
        "visibility": {
            "com.linkedin.ugc.MemberNetworkVisibility": "PUBLIC",
        },
    })
}

#[derive(Debug, Deserialize)]
struct UgcResponse {
    id: String,
}

#[async_trait]
impl PlatformClient for LinkedinClient {
    fn platform(&self) -> Platform {
        Platform::Linkedin
    }

    async fn publish(
        &self,
        credentials: &PlatformCredentials,
        content: &PublishContent,
    ) -> Result<PublishedPost, PublishError> {
        let url = format!("{}/ugcPosts", self.config.base_url);
        let payload = build_payload(credentials, content);

        let response = self
            .client
            .post(&url)
            .timeout(REQUEST_TIMEOUT)
            .bearer_auth(&credentials.access_token)
            .header("X-Restli-Protocol-Version", "2.0.0")
            .json(&payload)
            .send()
            .await
            .map_err(|e| PublishError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PublishError::Api(format!(
                "linkedin returned {status}: {body}"
            )));
        }

        let ugc: UgcResponse = response
            .json()
            .await
            .map_err(|e| PublishError::Api(format!("unexpected linkedin response: {e}")))?;

        Ok(PublishedPost {
            url: format!("https://linkedin.com/feed/update/{}", ugc.id),
            post_id: ugc.id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials() -> PlatformCredentials {
        PlatformCredentials {
            account_id: "profile-7".to_string(),
            access_token: "member-token".to_string(),
        }
    }

    #[test]
    fn payload_addresses_the_member_urn() {
        let payload = build_payload(
            &credentials(),
            &PublishContent {
                caption: "hello".to_string(),
                image_url: None,
            },
        );

        assert_eq!(payload["author"], "urn:li:person:profile-7");
        assert_eq!(payload["lifecycleState"], "PUBLISHED");
        let media = &payload["specificContent"]["com.linkedin.ugc.PublishOpen"]["media"];
        assert_eq!(media.as_array().map(Vec::len), Some(0));
    }

    #[test]
    fn payload_attaches_media_when_image_present() {
        let payload = build_payload(
            &credentials(),
            &PublishContent {
                caption: "hello".to_string(),
                image_url: Some("https://cdn.example.com/a.png".to_string()),
            },
        );

        let media = &payload["specificContent"]["com.linkedin.ugc.PublishOpen"]["media"];
        assert_eq!(media[0]["media"], "https://cdn.example.com/a.png");
        assert_eq!(media[0]["status"], "READY");
    }
}
