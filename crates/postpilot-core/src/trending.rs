//! Trend source - maps a niche plus user keywords to an ordered topic list.
//!
//! Pure lookup over static tables; no external calls and no failure modes.

const TECH: &[&str] = &[
    "AI and Machine Learning",
    "Web3 and Blockchain",
    "Cloud Computing",
    "Cybersecurity",
    "DevOps",
    "Artificial Intelligence",
    "Software Development",
];

const BUSINESS: &[&str] = &[
    "Entrepreneurship",
    "Business Growth",
    "Leadership",
    "Marketing Strategy",
    "Sales Techniques",
    "Business Analytics",
    "Corporate Culture",
];

const LIFESTYLE: &[&str] = &[
    "Wellness",
    "Fitness Trends",
    "Mental Health",
    "Self-improvement",
    "Work-life Balance",
    "Productivity",
    "Personal Development",
];

const MARKETING: &[&str] = &[
    "Digital Marketing",
    "Social Media Marketing",
    "Content Marketing",
    "SEO",
    "Email Marketing",
    "Influencer Marketing",
    "Marketing Automation",
];

const GENERAL: &[&str] = &[
    "Trending Now",
    "Viral Content",
    "Current Events",
    "Popular Culture",
    "Entertainment",
    "News",
    "Social Trends",
];

/// Maximum topics returned per lookup.
const MAX_TOPICS: usize = 10;

/// Maximum keyword-derived pseudo-topics appended.
const MAX_KEYWORD_TOPICS: usize = 5;

fn niche_topics(niche: &str) -> &'static [&'static str] {
    match niche.to_lowercase().as_str() {
        "tech" => TECH,
        "business" => BUSINESS,
        "lifestyle" => LIFESTYLE,
        "marketing" => MARKETING,
        _ => GENERAL,
    }
}

/// Topics for a niche (case-insensitive, unknown niches fall back to the
/// general list) followed by up to five `"<keyword> trends"` pseudo-topics,
/// deduplicated in first-seen order and capped at ten entries.
pub fn trending_topics(niche: &str, keywords: &[String]) -> Vec<String> {
    let mut topics: Vec<String> = Vec::new();

    for topic in niche_topics(niche) {
        push_unique(&mut topics, (*topic).to_string());
    }

    for keyword in keywords.iter().take(MAX_KEYWORD_TOPICS) {
        push_unique(&mut topics, format!("{keyword} trends"));
    }

    topics.truncate(MAX_TOPICS);
    topics
}

fn push_unique(topics: &mut Vec<String>, topic: String) {
    if !topics.contains(&topic) {
        topics.push(topic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_niche_falls_back_to_general() {
        let topics = trending_topics("underwater-basket-weaving", &[]);
        let expected: Vec<String> = GENERAL.iter().map(|t| t.to_string()).collect();
        assert_eq!(topics, expected);
    }

    #[test]
    fn niche_lookup_is_case_insensitive() {
        assert_eq!(trending_topics("TECH", &[]), trending_topics("tech", &[]));
    }

    #[test]
    fn keywords_become_pseudo_topics() {
        let topics = trending_topics("tech", &["rust".to_string()]);
        assert_eq!(topics.len(), 8);
        assert_eq!(topics.last().map(String::as_str), Some("rust trends"));
    }

    #[test]
    fn at_most_five_keywords_are_used_and_result_is_capped_at_ten() {
        let keywords: Vec<String> = (0..8).map(|i| format!("kw{i}")).collect();
        let topics = trending_topics("tech", &keywords);

        // 7 niche topics + 5 keyword topics, capped at 10
        assert_eq!(topics.len(), 10);
        assert!(topics.contains(&"kw0 trends".to_string()));
        assert!(topics.contains(&"kw2 trends".to_string()));
        assert!(!topics.contains(&"kw3 trends".to_string()));
        assert!(!topics.contains(&"kw5 trends".to_string()));
    }

    #[test]
    fn duplicates_are_removed_preserving_first_seen_order() {
        let keywords = vec!["rust".to_string(), "rust".to_string()];
        let topics = trending_topics("tech", &keywords);
        let rust_count = topics.iter().filter(|t| *t == "rust trends").count();
        assert_eq!(rust_count, 1);
        assert_eq!(topics[0], "AI and Machine Learning");
    }
}
