/// User options persisted in chrome.storage.sync

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub const DEFAULT_FORMAT: &str = "markdown";
pub const DEFAULT_TIMEOUT_MS: &str = "3000";

/// Markup dialect a link is rendered in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkFormat {
    #[default]
    Markdown,
    Html,
    Latex,
    Xml,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("Unknown format option: {0}")]
    UnknownFormat(String),
}

impl LinkFormat {
    pub const ALL: [LinkFormat; 4] = [
        LinkFormat::Markdown,
        LinkFormat::Html,
        LinkFormat::Latex,
        LinkFormat::Xml,
    ];

    pub fn from_token(token: &str) -> Result<LinkFormat, FormatError> {
        match token {
            "markdown" => Ok(LinkFormat::Markdown),
            "html" => Ok(LinkFormat::Html),
            "latex" => Ok(LinkFormat::Latex),
            "xml" => Ok(LinkFormat::Xml),
            other => Err(FormatError::UnknownFormat(other.to_string())),
        }
    }

    /// Token stored in the options record
    pub fn token(&self) -> &'static str {
        match self {
            LinkFormat::Markdown => "markdown",
            LinkFormat::Html => "html",
            LinkFormat::Latex => "latex",
            LinkFormat::Xml => "xml",
        }
    }

    /// Name shown to the user in the tooltip and notification
    pub fn label(&self) -> &'static str {
        match self {
            LinkFormat::Markdown => "Markdown",
            LinkFormat::Html => "HTML",
            LinkFormat::Latex => "LaTeX",
            LinkFormat::Xml => "XML",
        }
    }
}

impl fmt::Display for LinkFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The single options record. Missing fields take their defaults, so an
/// empty storage area reads as a fresh install.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FormatOptions {
    #[serde(default = "default_format")]
    pub format: String,

    #[serde(default = "default_auto")]
    pub auto: bool,

    /// Interval in milliseconds, kept as the string the form produced
    #[serde(default = "default_msec")]
    pub msec: String,

    /// XML element wrapping the link
    #[serde(default = "default_link")]
    pub link: String,

    /// XML attribute holding the URL
    #[serde(default = "default_href")]
    pub href: String,

    /// XML child element holding the link text
    #[serde(default = "default_name")]
    pub name: String,
}

impl FormatOptions {
    pub fn with_format(format: LinkFormat) -> FormatOptions {
        FormatOptions {
            format: format.token().to_string(),
            ..FormatOptions::default()
        }
    }

    /// Configured dialect; a blank token means the default
    pub fn link_format(&self) -> Result<LinkFormat, FormatError> {
        if self.format.is_empty() {
            return Ok(LinkFormat::default());
        }
        LinkFormat::from_token(&self.format)
    }

    /// Label for the configured dialect; an unrecognized token shows the
    /// default dialect's label
    pub fn format_label(&self) -> &'static str {
        self.link_format().unwrap_or_default().label()
    }
}

impl Default for FormatOptions {
    fn default() -> Self {
        FormatOptions {
            format: default_format(),
            auto: default_auto(),
            msec: default_msec(),
            link: default_link(),
            href: default_href(),
            name: default_name(),
        }
    }
}

fn default_format() -> String {
    DEFAULT_FORMAT.to_string()
}

fn default_auto() -> bool {
    true
}

fn default_msec() -> String {
    DEFAULT_TIMEOUT_MS.to_string()
}

fn default_link() -> String {
    "link".to_string()
}

fn default_href() -> String {
    "href".to_string()
}

fn default_name() -> String {
    "name".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_record_uses_defaults() {
        let options: FormatOptions = serde_json::from_str("{}").unwrap();

        assert_eq!(options, FormatOptions::default());
        assert_eq!(options.format, "markdown");
        assert!(options.auto);
        assert_eq!(options.msec, "3000");
        assert_eq!(options.link, "link");
        assert_eq!(options.href, "href");
        assert_eq!(options.name, "name");
    }

    #[test]
    fn test_partial_record_keeps_saved_fields() {
        let options: FormatOptions =
            serde_json::from_str(r#"{"format":"xml","auto":false,"link":"bookmark"}"#).unwrap();

        assert_eq!(options.link_format(), Ok(LinkFormat::Xml));
        assert!(!options.auto);
        assert_eq!(options.link, "bookmark");
        assert_eq!(options.href, "href");
    }

    #[test]
    fn test_from_token() {
        for format in LinkFormat::ALL {
            assert_eq!(LinkFormat::from_token(format.token()), Ok(format));
        }
        assert_eq!(
            LinkFormat::from_token("Markdown"),
            Err(FormatError::UnknownFormat("Markdown".to_string()))
        );
    }

    #[test]
    fn test_blank_format_is_markdown() {
        let options = FormatOptions {
            format: String::new(),
            ..FormatOptions::default()
        };

        assert_eq!(options.link_format(), Ok(LinkFormat::Markdown));
    }

    #[test]
    fn test_labels() {
        assert_eq!(LinkFormat::Markdown.label(), "Markdown");
        assert_eq!(LinkFormat::Html.label(), "HTML");
        assert_eq!(LinkFormat::Latex.label(), "LaTeX");
        assert_eq!(LinkFormat::Xml.to_string(), "XML");
    }

    #[test]
    fn test_unknown_format_label_falls_back() {
        let options = FormatOptions {
            format: "bogus".to_string(),
            ..FormatOptions::default()
        };

        assert!(options.link_format().is_err());
        assert_eq!(options.format_label(), "Markdown");
    }

    #[test]
    fn test_serialization() {
        let options = FormatOptions::with_format(LinkFormat::Latex);

        let json = serde_json::to_string(&options).unwrap();
        let deserialized: FormatOptions = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.format, "latex");
        assert_eq!(deserialized, options);
    }
}
