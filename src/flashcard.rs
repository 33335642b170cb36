/// Data structures for Web Clipper
use serde::{Deserialize, Serialize};

/// A question/answer pair
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Flashcard {
    pub front: String,
    pub back: String,
}

impl Flashcard {
    pub fn new(front: impl Into<String>, back: impl Into<String>) -> Flashcard {
        Flashcard {
            front: front.into(),
            back: back.into(),
        }
    }
}

/// Metadata returned with every successful extraction
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageMetadata {
    pub title: String,
    pub url: String,
    /// ISO-8601 time of extraction
    #[serde(rename = "date")]
    pub timestamp: String,
}

/// Text and metadata read from the visited page; never persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContent {
    pub text: String,
    pub title: String,
    pub url: String,
    pub timestamp: String,
}

impl PageContent {
    pub fn metadata(&self) -> PageMetadata {
        PageMetadata {
            title: self.title.clone(),
            url: self.url.clone(),
            timestamp: self.timestamp.clone(),
        }
    }
}

/// The subset of a browser tab the popup cares about
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TabInfo {
    pub id: Option<i32>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

impl TabInfo {
    pub fn new(id: i32, url: &str, title: &str) -> TabInfo {
        TabInfo {
            id: Some(id),
            url: Some(url.to_string()),
            title: Some(title.to_string()),
        }
    }

    /// Title, or None when the tab has no usable one
    pub fn display_title(&self) -> Option<&str> {
        self.title.as_deref().filter(|t| !t.is_empty())
    }

    /// Content scripts only run on http(s) pages
    pub fn is_scriptable(&self) -> bool {
        self.url
            .as_deref()
            .and_then(|u| url::Url::parse(u).ok())
            .is_some_and(|u| matches!(u.scheme(), "http" | "https"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_info_from_chrome_shape() {
        // chrome.tabs.Tab carries many more fields; unknown ones are ignored
        let json = r#"{"id":7,"url":"https://example.com/a","title":"A","pinned":false,"index":2}"#;
        let tab: TabInfo = serde_json::from_str(json).unwrap();

        assert_eq!(tab, TabInfo::new(7, "https://example.com/a", "A"));
    }

    #[test]
    fn test_tab_info_missing_fields() {
        let tab: TabInfo = serde_json::from_str(r#"{"id":3}"#).unwrap();
        assert_eq!(tab.url, None);
        assert_eq!(tab.display_title(), None);
        assert!(!tab.is_scriptable());
    }

    #[test]
    fn test_is_scriptable() {
        assert!(TabInfo::new(1, "https://example.com", "").is_scriptable());
        assert!(TabInfo::new(1, "http://localhost:3000/x", "").is_scriptable());
        assert!(!TabInfo::new(1, "chrome://extensions", "").is_scriptable());
        assert!(!TabInfo::new(1, "not a url", "").is_scriptable());
    }

    #[test]
    fn test_metadata_serializes_timestamp_as_date() {
        let page = PageContent {
            text: "body".to_string(),
            title: "Title".to_string(),
            url: "https://example.com".to_string(),
            timestamp: "2024-10-28T10:30:00.000Z".to_string(),
        };

        let json = serde_json::to_value(page.metadata()).unwrap();

        assert_eq!(json["date"], "2024-10-28T10:30:00.000Z");
        assert_eq!(json["title"], "Title");
    }
}
