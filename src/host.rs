#![allow(async_fn_in_trait)]

/// Contracts for the browser services the extension runs against.
/// Each extension context is single-threaded, so none of these futures need
/// to be `Send`.

use crate::message::Message;
use crate::options::FormatOptions;
use crate::page_data::TabInfo;
use thiserror::Error;

/// A rejected browser API call, carrying the host's error text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct HostError(pub String);

impl HostError {
    pub fn new(message: impl Into<String>) -> HostError {
        HostError(message.into())
    }
}

/// Persisted options (chrome.storage.sync). Writes are atomic per call.
pub trait OptionsStore {
    async fn load(&self) -> Result<FormatOptions, HostError>;
    async fn save(&self, options: &FormatOptions) -> Result<(), HostError>;
}

pub trait Clipboard {
    async fn write_text(&self, text: &str) -> Result<(), HostError>;
}

/// Toast shown to the user. Delivery is not observed.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub title: String,
    pub message: String,
    pub icon: String,
}

pub trait Notifier {
    fn notify(&self, notification: &Notification);
}

pub trait ActionButton {
    fn set_title(&self, title: &str);
}

/// Runs the page extractor in a tab's page context
pub trait ScriptInjector {
    async fn inject_extractor(&self, tab: &TabInfo) -> Result<(), HostError>;
}

/// Sends a message to the other extension contexts and resolves with the
/// receiver's reply, if it made one
pub trait Messenger {
    async fn send(&self, message: &Message) -> Result<Option<Message>, HostError>;
}

pub trait PlatformInfo {
    async fn platform_label(&self) -> Result<String, HostError>;
}

pub trait Timer {
    async fn sleep(&self, ms: u32);

    /// Milliseconds since the epoch
    fn now_ms(&self) -> f64;
}

/// Confirmation text area on the settings page
pub trait StatusLine {
    fn show(&self, text: &str);
}

/// Everything the background coordinator talks to
pub trait BackgroundHost:
    OptionsStore + Clipboard + Notifier + ActionButton + ScriptInjector + PlatformInfo + Timer
{
}

impl<T> BackgroundHost for T where
    T: OptionsStore + Clipboard + Notifier + ActionButton + ScriptInjector + PlatformInfo + Timer
{
}

/// Everything the settings page talks to
pub trait SettingsHost: OptionsStore + Messenger + Timer + StatusLine {}

impl<T> SettingsHost for T where T: OptionsStore + Messenger + Timer + StatusLine {}
