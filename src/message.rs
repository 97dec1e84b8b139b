/// Messages exchanged between the background coordinator, the page
/// extractor and the settings page

use crate::page_data::PageData;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Message {
    /// Extractor → coordinator, sent once per injection
    PageData(PageData),
    /// Settings page → coordinator
    PlatformRequest,
    /// Coordinator → settings page, answering `PlatformRequest`
    PlatformReply { label: String },
}

/// Reply a sender waits for after sending a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyKind {
    None,
    PlatformReply,
}

impl Message {
    pub fn expected_reply(&self) -> ReplyKind {
        match self {
            Message::PageData(_) => ReplyKind::None,
            Message::PlatformRequest => ReplyKind::PlatformReply,
            Message::PlatformReply { .. } => ReplyKind::None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Message::PageData(_) => "pageData",
            Message::PlatformRequest => "platformRequest",
            Message::PlatformReply { .. } => "platformReply",
        }
    }
}

impl ReplyKind {
    pub fn accepts(&self, reply: &Message) -> bool {
        matches!(
            (self, reply),
            (ReplyKind::PlatformReply, Message::PlatformReply { .. })
        )
    }
}
