/*!
 * Localized failure messages written into the containers when the feed
 * cannot be loaded.
 */

use crate::errors::FeedError;
use crate::language_utils::parse_language_tag;

/// Messages for the two containers after a failed load
#[derive(Debug, Clone, PartialEq)]
pub struct FailureMessages {
    pub program: &'static str,
    pub culture: &'static str,
}

/// Pick the messages for an error in the given UI language.
///
/// Chinese tags get Simplified Chinese text; everything else gets English.
pub fn failure_messages(error: &FeedError, ui_language: &str) -> FailureMessages {
    let chinese = parse_language_tag(ui_language)
        .map(|tag| tag.language == "zh" || tag.language == "zho")
        .unwrap_or(false);

    match (error, chinese) {
        (FeedError::Parse(_), false) => FailureMessages {
            program: "Error loading content: XML data is malformed.",
            culture: "Error loading content: XML data is malformed.",
        },
        (FeedError::Parse(_), true) => FailureMessages {
            program: "内容加载出错：XML 数据格式有误。",
            culture: "内容加载出错：XML 数据格式有误。",
        },
        (FeedError::Network { .. }, false) => FailureMessages {
            program: "Failed to load program list. Please check the network connection.",
            culture: "Failed to load culture notes. Please check the network connection.",
        },
        (FeedError::Network { .. }, true) => FailureMessages {
            program: "节目单加载失败，请检查网络连接。",
            culture: "文化小知识加载失败，请检查网络连接。",
        },
    }
}
