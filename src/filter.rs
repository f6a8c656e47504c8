use std::sync::LazyLock;

use regex::Regex;

use crate::formats::{ArticleRecord, BadgeRecord, CredlyResponse, FeedItem, FeedResponse};

static IMG_SRC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)<img[^>]+src="([^"]+)""#).expect("img src regex"));

/// Project the raw badge payload down to the fixture shape. Pure; no network
/// or filesystem access.
pub fn filter_badges(raw: &CredlyResponse) -> Vec<BadgeRecord> {
    raw.data
        .iter()
        .map(|badge| BadgeRecord {
            id: badge.id.clone(),
            name: badge.badge_template.name.clone(),
            skills: badge.badge_template.skill_ids.clone().unwrap_or_default(),
            template_url: badge.badge_template.url.clone(),
            image_url: badge.image_url.clone(),
            issuer_name: badge.issuer_linked_in_name.clone(),
        })
        .collect()
}

/// Project the raw feed payload down to the fixture shape. `image` holds the
/// resolved remote URL, or an empty string when none could be resolved.
pub fn filter_articles(raw: &FeedResponse) -> Vec<ArticleRecord> {
    raw.items
        .iter()
        .map(|item| ArticleRecord {
            title: item.title.clone(),
            pub_date: item.pub_date.clone(),
            link: item.link.clone(),
            guid: item.guid.clone(),
            categories: item.categories.clone().unwrap_or_default(),
            image: extract_image_url(item).unwrap_or_default(),
        })
        .collect()
}

/// Resolve an article's cover image URL. The order is significant: the first
/// `<img>` in `content` (or `description` when content is empty) wins over
/// the thumbnail.
pub fn extract_image_url(item: &FeedItem) -> Option<String> {
    let html = if item.content.is_empty() {
        item.description.as_str()
    } else {
        item.content.as_str()
    };

    if let Some(captures) = IMG_SRC.captures(html)
        && let Some(src) = captures.get(1)
    {
        return Some(src.as_str().to_owned());
    }

    if !item.thumbnail.trim().is_empty() {
        return Some(item.thumbnail.clone());
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::{CredlyBadge, CredlyBadgeTemplate, Skill};

    fn badge(skill_ids: Option<Vec<Skill>>) -> CredlyBadge {
        CredlyBadge {
            id: "b-1".to_owned(),
            badge_template: CredlyBadgeTemplate {
                name: "Rusty Badge".to_owned(),
                url: "https://www.credly.com/org/acme/badge/rusty".to_owned(),
                skill_ids,
            },
            image_url: "https://images.credly.com/uuid-1/rusty.png".to_owned(),
            issuer_linked_in_name: "Acme".to_owned(),
        }
    }

    fn item() -> FeedItem {
        FeedItem {
            title: "Post".to_owned(),
            pub_date: "2025-01-02 03:04:05".to_owned(),
            link: "https://example.com/post".to_owned(),
            guid: "https://medium.com/p/ed7faec2a8b6".to_owned(),
            thumbnail: String::new(),
            description: String::new(),
            content: String::new(),
            categories: None,
        }
    }

    #[test]
    fn missing_skill_ids_become_an_empty_list() {
        let raw = CredlyResponse {
            data: vec![badge(None)],
        };
        let records = filter_badges(&raw);
        assert!(records[0].skills.is_empty());
    }

    #[test]
    fn skills_keep_provider_order() {
        let skills = vec![
            Skill {
                id: "s-2".to_owned(),
                name: "Ownership".to_owned(),
            },
            Skill {
                id: "s-1".to_owned(),
                name: "Borrowing".to_owned(),
            },
        ];
        let raw = CredlyResponse {
            data: vec![badge(Some(skills.clone()))],
        };
        let records = filter_badges(&raw);
        assert_eq!(records[0].skills, skills);
    }

    #[test]
    fn img_tag_in_content_wins_over_thumbnail() {
        let mut item = item();
        item.content = r#"<p>Intro</p><img alt="cover" src="https://cdn.example.com/cover.png">"#
            .to_owned();
        item.thumbnail = "https://cdn.example.com/thumb.png".to_owned();

        assert_eq!(
            extract_image_url(&item).as_deref(),
            Some("https://cdn.example.com/cover.png")
        );
    }

    #[test]
    fn description_is_consulted_only_when_content_is_empty() {
        let mut item = item();
        item.description = r#"<img src="https://cdn.example.com/desc.png">"#.to_owned();
        assert_eq!(
            extract_image_url(&item).as_deref(),
            Some("https://cdn.example.com/desc.png")
        );

        item.content = "<p>no images here</p>".to_owned();
        item.thumbnail = "https://cdn.example.com/thumb.png".to_owned();
        assert_eq!(
            extract_image_url(&item).as_deref(),
            Some("https://cdn.example.com/thumb.png")
        );
    }

    #[test]
    fn blank_thumbnail_resolves_to_no_image() {
        let mut item = item();
        item.thumbnail = "   ".to_owned();
        assert_eq!(extract_image_url(&item), None);

        let records = filter_articles(&FeedResponse {
            status: "ok".to_owned(),
            items: vec![item],
        });
        assert_eq!(records[0].image, "");
    }

    #[test]
    fn missing_categories_become_an_empty_list() {
        let records = filter_articles(&FeedResponse {
            status: "ok".to_owned(),
            items: vec![item()],
        });
        assert!(records[0].categories.is_empty());
    }
}
