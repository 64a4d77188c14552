use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::post::Platform;

/// User entity - an account that owns posts and social-media connections.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    /// Primary content category driving topic and caption generation.
    pub niche: Option<String>,
    /// Additional niches contributing keywords to the trend lookup.
    pub niches: Vec<NicheProfile>,
    pub target_audience: Option<String>,
    pub posting_style: PostingStyle,
    pub social_accounts: SocialAccounts,
    pub preferences: Preferences,
    /// Denormalized engagement history feeding caption generation.
    pub past_posts: Vec<PastPost>,
    pub profile_completeness: u8,
    pub is_onboarded: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user at registration. The password must already be hashed.
    pub fn new(email: String, password_hash: String, name: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email: email.trim().to_lowercase(),
            password_hash,
            name,
            niche: None,
            niches: Vec::new(),
            target_audience: None,
            posting_style: PostingStyle::default(),
            social_accounts: SocialAccounts::default(),
            preferences: Preferences::default(),
            past_posts: Vec::new(),
            profile_completeness: 0,
            is_onboarded: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// All keywords across the configured niches, in declaration order.
    pub fn aggregated_keywords(&self) -> Vec<String> {
        self.niches
            .iter()
            .flat_map(|n| n.keywords.iter().cloned())
            .collect()
    }

    /// Percentage of the six profile fields that are filled in.
    pub fn profile_completeness(&self) -> u8 {
        let filled = [
            !self.name.is_empty(),
            self.niche.is_some(),
            self.target_audience.is_some(),
            true, // posting style always has a value
            self.social_accounts.facebook.connected,
            self.social_accounts.linkedin.connected,
        ]
        .iter()
        .filter(|f| **f)
        .count();

        ((filled as f64 / 6.0) * 100.0).round() as u8
    }

    pub fn recompute_completeness(&mut self) {
        self.profile_completeness = self.profile_completeness();
    }
}

/// A user-defined niche with keywords feeding the trend source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NicheProfile {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// Tone applied to generated captions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostingStyle {
    #[default]
    Professional,
    Casual,
    Humorous,
    Inspirational,
    Educational,
}

impl PostingStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Professional => "professional",
            Self::Casual => "casual",
            Self::Humorous => "humorous",
            Self::Inspirational => "inspirational",
            Self::Educational => "educational",
        }
    }
}

impl std::fmt::Display for PostingStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PostingStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "professional" => Ok(Self::Professional),
            "casual" => Ok(Self::Casual),
            "humorous" => Ok(Self::Humorous),
            "inspirational" => Ok(Self::Inspirational),
            "educational" => Ok(Self::Educational),
            other => Err(format!("unknown posting style: {other}")),
        }
    }
}

/// Per-platform connection state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialAccounts {
    #[serde(default)]
    pub facebook: SocialAccount,
    #[serde(default)]
    pub linkedin: SocialAccount,
}

impl SocialAccounts {
    /// Complete credentials for a platform, or None when the account id or
    /// token is missing (the platform is then skipped, not failed).
    pub fn credentials_for(&self, platform: Platform) -> Option<PlatformCredentials> {
        let account = match platform {
            Platform::Facebook => &self.facebook,
            Platform::Linkedin => &self.linkedin,
        };
        match (&account.account_id, &account.access_token) {
            (Some(id), Some(token)) => Some(PlatformCredentials {
                account_id: id.clone(),
                access_token: token.clone(),
            }),
            _ => None,
        }
    }
}

/// Stored connection for one platform. `account_id` is the Facebook page id
/// or LinkedIn profile id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialAccount {
    #[serde(default)]
    pub account_id: Option<String>,
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub connected: bool,
}

/// Complete credentials handed to a platform client.
#[derive(Debug, Clone)]
pub struct PlatformCredentials {
    pub account_id: String,
    pub access_token: String,
}

/// Auto-posting preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub auto_posting_enabled: bool,
    pub posting_frequency: PostingFrequency,
    /// "HH:MM" wall-clock time for the daily scheduled generation.
    pub best_time_to_post: String,
    pub include_hashtags: bool,
    pub include_trending_topics: bool,
    pub max_hashtags: u32,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            auto_posting_enabled: false,
            posting_frequency: PostingFrequency::Daily,
            best_time_to_post: "09:00".to_string(),
            include_hashtags: true,
            include_trending_topics: true,
            max_hashtags: 10,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostingFrequency {
    #[default]
    Daily,
    Weekly,
    Custom,
}

impl PostingFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Custom => "custom",
        }
    }
}

impl std::str::FromStr for PostingFrequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "custom" => Ok(Self::Custom),
            other => Err(format!("unknown posting frequency: {other}")),
        }
    }
}

/// One historical post's engagement numbers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PastPost {
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub likes: u32,
    #[serde(default)]
    pub comments: u32,
    #[serde(default)]
    pub shares: u32,
    #[serde(default)]
    pub posted_at: Option<DateTime<Utc>>,
}

/// Rounded per-post averages over an engagement history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EngagementAverages {
    #[serde(rename = "avgLikes")]
    pub avg_likes: i64,
    #[serde(rename = "avgComments")]
    pub avg_comments: i64,
    #[serde(rename = "avgShares")]
    pub avg_shares: i64,
}

/// Average likes/comments/shares across past posts; None for an empty history.
pub fn average_engagement(posts: &[PastPost]) -> Option<EngagementAverages> {
    if posts.is_empty() {
        return None;
    }

    let len = posts.len() as f64;
    let (likes, comments, shares) = posts.iter().fold((0u64, 0u64, 0u64), |acc, p| {
        (
            acc.0 + u64::from(p.likes),
            acc.1 + u64::from(p.comments),
            acc.2 + u64::from(p.shares),
        )
    });

    Some(EngagementAverages {
        avg_likes: (likes as f64 / len).round() as i64,
        avg_comments: (comments as f64 / len).round() as i64,
        avg_shares: (shares as f64 / len).round() as i64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn past(likes: u32, comments: u32, shares: u32) -> PastPost {
        PastPost {
            likes,
            comments,
            shares,
            ..Default::default()
        }
    }

    #[test]
    fn average_engagement_empty_history_is_none() {
        assert!(average_engagement(&[]).is_none());
    }

    #[test]
    fn average_engagement_rounds_per_metric() {
        let avg = average_engagement(&[past(10, 2, 1), past(11, 3, 2)]).unwrap();
        assert_eq!(avg.avg_likes, 11); // 10.5 rounds up
        assert_eq!(avg.avg_comments, 3); // 2.5 rounds up
        assert_eq!(avg.avg_shares, 2); // 1.5 rounds up
    }

    #[test]
    fn aggregated_keywords_spans_all_niches() {
        let mut user = User::new(
            "a@b.com".into(),
            "hash".into(),
            "A".into(),
        );
        user.niches = vec![
            NicheProfile {
                name: "tech".into(),
                keywords: vec!["rust".into(), "ai".into()],
                ..Default::default()
            },
            NicheProfile {
                name: "business".into(),
                keywords: vec!["startups".into()],
                ..Default::default()
            },
        ];

        assert_eq!(user.aggregated_keywords(), vec!["rust", "ai", "startups"]);
    }

    #[test]
    fn completeness_counts_filled_fields() {
        let mut user = User::new("a@b.com".into(), "hash".into(), "A".into());
        // name + posting style
        assert_eq!(user.profile_completeness(), 33);

        user.niche = Some("tech".into());
        user.target_audience = Some("developers".into());
        user.social_accounts.facebook.connected = true;
        user.social_accounts.linkedin.connected = true;
        assert_eq!(user.profile_completeness(), 100);
    }

    #[test]
    fn credentials_require_both_id_and_token() {
        let mut accounts = SocialAccounts::default();
        accounts.facebook.account_id = Some("page-1".into());
        assert!(accounts.credentials_for(Platform::Facebook).is_none());

        accounts.facebook.access_token = Some("tok".into());
        let creds = accounts.credentials_for(Platform::Facebook).unwrap();
        assert_eq!(creds.account_id, "page-1");
        assert!(accounts.credentials_for(Platform::Linkedin).is_none());
    }

    #[test]
    fn registration_normalizes_email() {
        let user = User::new("  Jane@Example.COM ".into(), "hash".into(), "Jane".into());
        assert_eq!(user.email, "jane@example.com");
    }
}
