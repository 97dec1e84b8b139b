/// Data structures describing the page being linked
use serde::{Deserialize, Serialize};

/// Information about the browser tab the action button was clicked in
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TabInfo {
    #[serde(default)]
    pub id: Option<i32>,
    pub url: String,
}

impl TabInfo {
    pub fn new(id: Option<i32>, url: String) -> TabInfo {
        TabInfo { id, url }
    }
}

/// Sender details attached to a received cross-context message
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MessageSender {
    #[serde(default)]
    pub tab_id: Option<i32>,
}

/// Title, URL and text selection of a page, gathered once per activation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PageData {
    pub href: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub selection: String,
}

impl PageData {
    pub fn new(href: String, title: String, selection: &str) -> PageData {
        PageData {
            href,
            title,
            selection: selection.trim().to_string(),
        }
    }

    /// Page data for tabs whose document cannot be scripted: only the URL is known
    pub fn from_restricted_tab(tab: &TabInfo) -> PageData {
        PageData {
            href: tab.url.clone(),
            title: String::new(),
            selection: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_data_trims_selection() {
        let data = PageData::new(
            "https://example.com".to_string(),
            "Example".to_string(),
            "  \n selected words\t ",
        );

        assert_eq!(data.selection, "selected words");
        assert_eq!(data.title, "Example");
    }

    #[test]
    fn test_from_restricted_tab() {
        let tab = TabInfo::new(Some(7), "file:///x.html".to_string());

        let data = PageData::from_restricted_tab(&tab);

        assert_eq!(data.href, "file:///x.html");
        assert_eq!(data.title, "");
        assert_eq!(data.selection, "");
    }

    #[test]
    fn test_deserialize_tab_without_id() {
        let tab: TabInfo = serde_json::from_str(r#"{"url":"about:blank","active":true}"#).unwrap();

        assert_eq!(tab.id, None);
        assert_eq!(tab.url, "about:blank");
    }

    #[test]
    fn test_deserialize_sender() {
        let sender: MessageSender = serde_json::from_str(r#"{"tabId":3}"#).unwrap();
        assert_eq!(sender.tab_id, Some(3));

        let sender: MessageSender = serde_json::from_str("{}").unwrap();
        assert_eq!(sender.tab_id, None);
    }
}
