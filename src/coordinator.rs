/// Background coordinator: turns an action-button click into a formatted
/// link on the clipboard.
///
/// Flow:
/// 1. `activate` checks the tab's URL scheme
/// 2. http/https tabs get the extractor injected; its report arrives later
///    through `handle_message`
/// 3. Any other tab is linked from its URL alone, right away
/// 4. `process_link_data` loads options, formats, copies, then notifies

use crate::error::PipelineError;
use crate::formatter::format_link;
use crate::host::{BackgroundHost, Notification};
use crate::message::Message;
use crate::page_data::{MessageSender, PageData, TabInfo};
use log::{debug, error, info, warn};
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::fmt;
use url::Url;
use uuid::Uuid;

pub const EXTENSION_NAME: &str = "Copy Page Link";
pub const NOTIFICATION_ICON: &str = "copy-to-clipboard.png";
pub const EXTRACTION_TIMEOUT_MS: u32 = 10_000;

/// Identifies one activation in logs and in the pending-extraction table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SequenceId(Uuid);

impl SequenceId {
    pub fn new() -> SequenceId {
        SequenceId(Uuid::new_v4())
    }
}

impl Default for SequenceId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SequenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

/// How an activation proceeded
#[derive(Debug, Clone, PartialEq)]
pub enum Activation {
    /// The tab could not be scripted; this link was copied from its URL
    Copied(String),
    /// The extractor was injected and its report is pending
    AwaitingExtraction {
        tab_id: Option<i32>,
        sequence: SequenceId,
    },
}

/// An extraction request and the clock reading when it was made
#[derive(Debug, Clone, Copy)]
struct Pending {
    sequence: SequenceId,
    started_ms: f64,
}

pub struct Coordinator<H> {
    host: H,
    pending: RefCell<HashMap<Option<i32>, VecDeque<Pending>>>,
    /// Start time of the latest timed-out request per tab, kept to report
    /// how late a straggling page was
    expired: RefCell<HashMap<Option<i32>, f64>>,
}

/// Only http and https pages allow script injection
pub fn is_scriptable(url: &str) -> bool {
    Url::parse(url)
        .map(|parsed| matches!(parsed.scheme(), "http" | "https"))
        .unwrap_or(false)
}

pub fn tooltip_text(format_label: &str) -> String {
    format!("{}: {}", EXTENSION_NAME, format_label)
}

pub fn success_notification(format_label: &str) -> Notification {
    Notification {
        title: EXTENSION_NAME.to_string(),
        message: format!("{} formatted link copied to clipboard.", format_label),
        icon: NOTIFICATION_ICON.to_string(),
    }
}

impl<H: BackgroundHost> Coordinator<H> {
    pub fn new(host: H) -> Coordinator<H> {
        Coordinator {
            host,
            pending: RefCell::new(HashMap::new()),
            expired: RefCell::new(HashMap::new()),
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Show the configured format in the tooltip. Called at startup and
    /// whenever the stored options change.
    pub async fn refresh_tooltip(&self) -> Result<(), PipelineError> {
        let options = self.host.load().await.map_err(|e| {
            error!("Failed to read options for tooltip: {}", e);
            PipelineError::Store(e)
        })?;
        self.host.set_title(&tooltip_text(options.format_label()));
        Ok(())
    }

    pub async fn activate(&self, tab: &TabInfo) -> Result<Activation, PipelineError> {
        let sequence = SequenceId::new();

        if !is_scriptable(&tab.url) {
            debug!("[{}] Restricted page, linking URL only: {}", sequence, tab.url);
            let data = PageData::from_restricted_tab(tab);
            let link = self.process_link_data(sequence, &data).await?;
            return Ok(Activation::Copied(link));
        }

        self.pending
            .borrow_mut()
            .entry(tab.id)
            .or_default()
            .push_back(Pending {
                sequence,
                started_ms: self.host.now_ms(),
            });

        debug!("[{}] Injecting extractor into tab {:?}", sequence, tab.id);
        if let Err(e) = self.host.inject_extractor(tab).await {
            self.remove_pending(tab.id, sequence);
            error!("[{}] Failed to inject extractor: {}", sequence, e);
            return Err(PipelineError::Injection(e));
        }

        Ok(Activation::AwaitingExtraction {
            tab_id: tab.id,
            sequence,
        })
    }

    /// Wait out the extraction timeout, then drop the request if the page
    /// never reported. Returns true when the request was dropped.
    pub async fn expire_extraction(&self, tab_id: Option<i32>, sequence: SequenceId) -> bool {
        self.host.sleep(EXTRACTION_TIMEOUT_MS).await;

        match self.remove_pending(tab_id, sequence) {
            Some(pending) => {
                warn!(
                    "[{}] No page data from tab {:?} after {}ms, giving up",
                    sequence, tab_id, EXTRACTION_TIMEOUT_MS
                );
                self.expired.borrow_mut().insert(tab_id, pending.started_ms);
                true
            }
            None => false,
        }
    }

    pub fn pending_count(&self) -> usize {
        self.pending.borrow().values().map(VecDeque::len).sum()
    }

    pub fn expired_count(&self) -> usize {
        self.expired.borrow().len()
    }

    /// Dispatch a message from another extension context, returning the
    /// reply to send back, if any
    pub async fn handle_message(
        &self,
        message: Message,
        sender: &MessageSender,
    ) -> Result<Option<Message>, PipelineError> {
        match message {
            Message::PageData(data) => {
                match self.take_pending(sender.tab_id) {
                    Some(pending) => {
                        self.expired.borrow_mut().remove(&sender.tab_id);
                        self.process_link_data(pending.sequence, &data).await?;
                    }
                    None => self.drop_unsolicited(sender.tab_id),
                }
                Ok(None)
            }
            Message::PlatformRequest => {
                let label = self.host.platform_label().await.map_err(|e| {
                    error!("Failed to read platform info: {}", e);
                    PipelineError::Platform(e)
                })?;
                Ok(Some(Message::PlatformReply { label }))
            }
            other => {
                debug!("Ignoring {} message", other.kind());
                Ok(None)
            }
        }
    }

    /// Load options, format the link, copy it, then tell the user.
    /// Any failure stops the remaining steps.
    pub async fn process_link_data(
        &self,
        sequence: SequenceId,
        data: &PageData,
    ) -> Result<String, PipelineError> {
        let options = self.host.load().await.map_err(|e| {
            error!("[{}] Failed to read options: {}", sequence, e);
            PipelineError::Store(e)
        })?;

        if let Err(e) = options.link_format() {
            warn!("[{}] {}", sequence, e);
        }
        let link = format_link(data, &options);

        self.host.write_text(&link).await.map_err(|e| {
            error!("[{}] Failed to write to clipboard: {}", sequence, e);
            PipelineError::Clipboard(e)
        })?;

        let label = options.format_label();
        self.host.set_title(&tooltip_text(label));
        self.host.notify(&success_notification(label));
        info!("[{}] Copied {} link for {}", sequence, label, data.href);

        Ok(link)
    }

    fn drop_unsolicited(&self, tab_id: Option<i32>) {
        let started_ms = self.expired.borrow_mut().remove(&tab_id);
        match started_ms {
            Some(started_ms) => warn!(
                "Dropping page data from tab {:?}: arrived {:.0}ms after activation, past the {}ms timeout",
                tab_id,
                self.host.now_ms() - started_ms,
                EXTRACTION_TIMEOUT_MS
            ),
            None => warn!(
                "Ignoring page data from tab {:?}: no extraction pending",
                tab_id
            ),
        }
    }

    fn take_pending(&self, tab_id: Option<i32>) -> Option<Pending> {
        let mut pending = self.pending.borrow_mut();
        let queue = pending.get_mut(&tab_id)?;
        let next = queue.pop_front();
        if queue.is_empty() {
            pending.remove(&tab_id);
        }
        next
    }

    fn remove_pending(&self, tab_id: Option<i32>, sequence: SequenceId) -> Option<Pending> {
        let mut pending = self.pending.borrow_mut();
        let queue = pending.get_mut(&tab_id)?;
        let index = queue.iter().position(|p| p.sequence == sequence)?;
        let removed = queue.remove(index);
        if queue.is_empty() {
            pending.remove(&tab_id);
        }
        removed
    }
}
