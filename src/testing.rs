/// In-memory host used by the unit tests
use crate::host::{
    ActionButton, Clipboard, HostError, Messenger, Notification, Notifier, OptionsStore,
    PlatformInfo, ScriptInjector, StatusLine, Timer,
};
use crate::message::Message;
use crate::options::FormatOptions;
use crate::page_data::TabInfo;
use serde_json::Value;
use std::cell::{Cell, RefCell};

pub struct FakeHost {
    /// Raw stored record, as chrome.storage would hand it back
    pub stored: RefCell<Value>,
    pub platform: String,
    pub reply: RefCell<Option<Message>>,

    pub fail_load: Cell<bool>,
    pub fail_save: Cell<bool>,
    pub fail_clipboard: Cell<bool>,
    pub fail_inject: Cell<bool>,
    pub fail_send: Cell<bool>,

    pub loads: Cell<usize>,
    pub clipboard: RefCell<Vec<String>>,
    pub titles: RefCell<Vec<String>>,
    pub notifications: RefCell<Vec<Notification>>,
    pub injected: RefCell<Vec<TabInfo>>,
    pub sent: RefCell<Vec<Message>>,
    pub sleeps: RefCell<Vec<u32>>,
    /// Advanced by every `sleep`
    pub clock_ms: Cell<f64>,
    pub statuses: RefCell<Vec<String>>,
}

impl FakeHost {
    pub fn with_options(stored: Value) -> FakeHost {
        FakeHost {
            stored: RefCell::new(stored),
            ..FakeHost::default()
        }
    }
}

impl Default for FakeHost {
    fn default() -> Self {
        FakeHost {
            stored: RefCell::new(Value::Object(Default::default())),
            platform: "linux".to_string(),
            reply: RefCell::new(None),
            fail_load: Cell::new(false),
            fail_save: Cell::new(false),
            fail_clipboard: Cell::new(false),
            fail_inject: Cell::new(false),
            fail_send: Cell::new(false),
            loads: Cell::new(0),
            clipboard: RefCell::new(Vec::new()),
            titles: RefCell::new(Vec::new()),
            notifications: RefCell::new(Vec::new()),
            injected: RefCell::new(Vec::new()),
            sent: RefCell::new(Vec::new()),
            sleeps: RefCell::new(Vec::new()),
            clock_ms: Cell::new(0.0),
            statuses: RefCell::new(Vec::new()),
        }
    }
}

impl OptionsStore for FakeHost {
    async fn load(&self) -> Result<FormatOptions, HostError> {
        self.loads.set(self.loads.get() + 1);
        if self.fail_load.get() {
            return Err(HostError::new("storage unavailable"));
        }
        serde_json::from_value(self.stored.borrow().clone())
            .map_err(|e| HostError::new(e.to_string()))
    }

    async fn save(&self, options: &FormatOptions) -> Result<(), HostError> {
        if self.fail_save.get() {
            return Err(HostError::new("QUOTA_BYTES_PER_ITEM quota exceeded"));
        }
        let value = serde_json::to_value(options).map_err(|e| HostError::new(e.to_string()))?;
        *self.stored.borrow_mut() = value;
        Ok(())
    }
}

impl Clipboard for FakeHost {
    async fn write_text(&self, text: &str) -> Result<(), HostError> {
        if self.fail_clipboard.get() {
            return Err(HostError::new("Document is not focused."));
        }
        self.clipboard.borrow_mut().push(text.to_string());
        Ok(())
    }
}

impl Notifier for FakeHost {
    fn notify(&self, notification: &Notification) {
        self.notifications.borrow_mut().push(notification.clone());
    }
}

impl ActionButton for FakeHost {
    fn set_title(&self, title: &str) {
        self.titles.borrow_mut().push(title.to_string());
    }
}

impl ScriptInjector for FakeHost {
    async fn inject_extractor(&self, tab: &TabInfo) -> Result<(), HostError> {
        if self.fail_inject.get() {
            return Err(HostError::new("Cannot access contents of the page."));
        }
        self.injected.borrow_mut().push(tab.clone());
        Ok(())
    }
}

impl Messenger for FakeHost {
    async fn send(&self, message: &Message) -> Result<Option<Message>, HostError> {
        if self.fail_send.get() {
            return Err(HostError::new("Receiving end does not exist."));
        }
        self.sent.borrow_mut().push(message.clone());
        Ok(self.reply.borrow().clone())
    }
}

impl PlatformInfo for FakeHost {
    async fn platform_label(&self) -> Result<String, HostError> {
        Ok(self.platform.clone())
    }
}

impl Timer for FakeHost {
    async fn sleep(&self, ms: u32) {
        self.sleeps.borrow_mut().push(ms);
        self.clock_ms.set(self.clock_ms.get() + ms as f64);
    }

    fn now_ms(&self) -> f64 {
        self.clock_ms.get()
    }
}

impl StatusLine for FakeHost {
    fn show(&self, text: &str) {
        self.statuses.borrow_mut().push(text.to_string());
    }
}
