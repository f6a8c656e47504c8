use serde::{Deserialize, Serialize};

/// A skill tag attached to a badge, in provider order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub id: String,
    pub name: String,
}

/// One badge as persisted in the fixture. `image_url` starts as the remote
/// URL and is rewritten to a local path by the media stage; on download
/// failure it keeps the remote URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeRecord {
    pub id: String,
    pub name: String,
    pub skills: Vec<Skill>,
    pub template_url: String,
    pub image_url: String,
    pub issuer_name: String,
}

/// The badge fixture document: `{ "data": [...] }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BadgeFixture {
    pub data: Vec<BadgeRecord>,
}

/// One article as persisted in the fixture. `image` is the resolved remote
/// URL after filtering (empty when none could be resolved) and a local path
/// after the media stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleRecord {
    pub title: String,
    pub pub_date: String,
    pub link: String,
    pub guid: String,
    pub categories: Vec<String>,
    pub image: String,
}

// Raw provider shapes. Only the retained fields are declared; the rest of
// the provider payload is ignored at deserialization.

#[derive(Debug, Clone, Deserialize)]
pub struct CredlyResponse {
    pub data: Vec<CredlyBadge>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CredlyBadge {
    pub id: String,
    pub badge_template: CredlyBadgeTemplate,
    pub image_url: String,
    #[serde(default)]
    pub issuer_linked_in_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CredlyBadgeTemplate {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub skill_ids: Option<Vec<Skill>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeedResponse {
    pub status: String,
    pub items: Vec<FeedItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeedItem {
    pub title: String,
    #[serde(rename = "pubDate")]
    pub pub_date: String,
    pub link: String,
    pub guid: String,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub categories: Option<Vec<String>>,
}
