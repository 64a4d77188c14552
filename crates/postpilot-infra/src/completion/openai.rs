//! OpenAI-backed caption generator.
//!
//! Sends a structured prompt to the chat-completions endpoint and parses the
//! strict JSON contract {caption, hashtags, trendingTopics, confidenceScore}
//! out of the model's reply. Any transport error or contract violation is a
//! `GenerationError` - no retry, no partial result.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use postpilot_core::domain::average_engagement;
use postpilot_core::error::GenerationError;
use postpilot_core::ports::{CaptionGenerator, CaptionRequest, GeneratedCaption};

const SYSTEM_PROMPT: &str = "You are an expert social media content creator. \
    Generate engaging captions with relevant hashtags and trending topics. \
    Always respond in valid JSON format.";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// OpenAI client configuration. Passed in explicitly so tests can point the
/// client at a stub server without touching the environment.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: "gpt-3.5-turbo".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
        }
    }
}

impl OpenAiConfig {
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var("OPENAI_API_KEY").unwrap_or_default(),
            model: std::env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-3.5-turbo".to_string()),
            base_url: std::env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
        }
    }
}

/// Caption generator backed by the OpenAI chat-completions API.
pub struct OpenAiCaptionGenerator {
    client: reqwest::Client,
    config: OpenAiConfig,
}

impl OpenAiCaptionGenerator {
    pub fn new(config: OpenAiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait]
impl CaptionGenerator for OpenAiCaptionGenerator {
    fn model_name(&self) -> &str {
        &self.config.model
    }

    async fn generate(
        &self,
        request: &CaptionRequest,
    ) -> Result<GeneratedCaption, GenerationError> {
        let prompt = build_prompt(request);

        let body = serde_json::json!({
            "model": self.config.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": prompt },
            ],
            "temperature": 0.7,
            "max_tokens": 500,
        });

        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.base_url))
            .bearer_auth(&self.config.api_key)
            .timeout(REQUEST_TIMEOUT)
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerationError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Request(format!(
                "completion endpoint returned {status}: {body}"
            )));
        }

        let completion: ChatResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::InvalidResponse(e.to_string()))?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| GenerationError::InvalidResponse("no choices in response".into()))?;

        parse_caption_json(&content)
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

/// The JSON contract the model is instructed to produce.
#[derive(Debug, Deserialize)]
struct RawCaption {
    caption: Option<String>,
    hashtags: Option<Vec<String>>,
    #[serde(rename = "trendingTopics")]
    trending_topics: Option<Vec<String>>,
    #[serde(rename = "confidenceScore")]
    confidence_score: Option<f64>,
}

/// Validate the model output against the contract. hashtags/trendingTopics
/// default to empty, confidenceScore defaults to 0.8; a missing caption is a
/// contract violation.
fn parse_caption_json(content: &str) -> Result<GeneratedCaption, GenerationError> {
    let raw: RawCaption = serde_json::from_str(content)
        .map_err(|e| GenerationError::InvalidResponse(format!("not valid JSON: {e}")))?;

    let caption = match raw.caption {
        Some(caption) if !caption.is_empty() => caption,
        _ => {
            return Err(GenerationError::InvalidResponse(
                "missing required key: caption".into(),
            ));
        }
    };

    Ok(GeneratedCaption {
        caption,
        hashtags: raw.hashtags.unwrap_or_default(),
        trending_topics: raw.trending_topics.unwrap_or_default(),
        confidence_score: raw.confidence_score.unwrap_or(0.8),
    })
}

fn build_prompt(request: &CaptionRequest) -> String {
    let mut prompt = String::from("Generate a social media caption for the following context:\n\n");
    prompt.push_str(&format!("Niche: {}\n", request.niche));
    prompt.push_str(&format!("Posting Style: {}\n", request.style));
    prompt.push_str(&format!("Target Audience: {}\n", request.target_audience));

    if let Some(description) = &request.image_description {
        prompt.push_str(&format!("Image Description: {description}\n"));
    }

    if !request.trending_topics.is_empty() {
        prompt.push_str(&format!(
            "Trending Topics to Consider: {}\n",
            request.trending_topics.join(", ")
        ));
    }

    if let Some(averages) = average_engagement(&request.past_engagement) {
        let json = serde_json::to_string(&averages).unwrap_or_default();
        prompt.push_str(&format!("Past High-Engagement Patterns: {json}\n"));
    }

    prompt.push_str(
        "\nRespond with a JSON object containing:\n\
        {\n\
          \"caption\": \"engaging caption text\",\n\
          \"hashtags\": [\"hashtag1\", \"hashtag2\", ...],\n\
          \"trendingTopics\": [\"topic1\", \"topic2\", ...],\n\
          \"confidenceScore\": 0.0-1.0\n\
        }",
    );

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use postpilot_core::domain::{PastPost, PostingStyle};

    fn request() -> CaptionRequest {
        CaptionRequest {
            niche: "tech".to_string(),
            style: PostingStyle::Casual,
            target_audience: "developers".to_string(),
            trending_topics: vec!["AI and Machine Learning".to_string()],
            image_description: None,
            past_engagement: vec![PastPost {
                likes: 10,
                comments: 2,
                shares: 1,
                ..Default::default()
            }],
        }
    }

    #[test]
    fn prompt_embeds_profile_topics_and_averages() {
        let prompt = build_prompt(&request());

        assert!(prompt.contains("Niche: tech"));
        assert!(prompt.contains("Posting Style: casual"));
        assert!(prompt.contains("Target Audience: developers"));
        assert!(prompt.contains("Trending Topics to Consider: AI and Machine Learning"));
        assert!(prompt.contains(r#"{"avgLikes":10,"avgComments":2,"avgShares":1}"#));
    }

    #[test]
    fn prompt_omits_empty_sections() {
        let mut req = request();
        req.trending_topics.clear();
        req.past_engagement.clear();

        let prompt = build_prompt(&req);
        assert!(!prompt.contains("Trending Topics to Consider"));
        assert!(!prompt.contains("Past High-Engagement Patterns"));
    }

    #[test]
    fn parses_complete_contract() {
        let content = r##"{
            "caption": "Rust all the things",
            "hashtags": ["#rust"],
            "trendingTopics": ["AI and Machine Learning"],
            "confidenceScore": 0.92
        }"##;

        let generated = parse_caption_json(content).unwrap();
        assert_eq!(generated.caption, "Rust all the things");
        assert_eq!(generated.hashtags, vec!["#rust"]);
        assert_eq!(generated.confidence_score, 0.92);
    }

    #[test]
    fn missing_optional_keys_get_defaults() {
        let generated = parse_caption_json(r#"{"caption": "hi"}"#).unwrap();
        assert!(generated.hashtags.is_empty());
        assert!(generated.trending_topics.is_empty());
        assert_eq!(generated.confidence_score, 0.8);
    }

    #[test]
    fn missing_caption_is_a_contract_violation() {
        let err = parse_caption_json(r##"{"hashtags": ["#x"]}"##).unwrap_err();
        assert!(matches!(err, GenerationError::InvalidResponse(_)));
    }

    #[test]
    fn non_json_reply_is_a_contract_violation() {
        let err = parse_caption_json("Sure! Here's a caption: ...").unwrap_err();
        assert!(matches!(err, GenerationError::InvalidResponse(_)));
    }
}
