/// Browser-backed host: every extension API call goes through extension.js

use crate::host::{
    ActionButton, Clipboard, HostError, Messenger, Notification, Notifier, OptionsStore,
    PlatformInfo, ScriptInjector, StatusLine, Timer,
};
use crate::message::{Message, ReplyKind};
use crate::options::FormatOptions;
use crate::page_data::TabInfo;
use log::{debug, warn};
use std::future::Future;
use wasm_bindgen::prelude::*;

// Import JS bridge functions
#[wasm_bindgen(module = "/extension.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn getOptions() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn setOptions(options: JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn writeClipboard(text: &str) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    fn copyWithEvent(text: &str) -> Result<bool, JsValue>;

    fn createNotification(title: &str, message: &str, icon: &str);

    fn setActionTitle(title: &str);

    #[wasm_bindgen(catch)]
    async fn injectExtractor(tab_id: Option<i32>) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn sendMessage(message: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn getPlatformOs() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn delay(ms: u32) -> Result<(), JsValue>;
}

const STATUS_ELEMENT_ID: &str = "status";

#[derive(Debug, Clone, Copy, Default)]
pub struct ExtensionHost;

impl OptionsStore for ExtensionHost {
    async fn load(&self) -> Result<FormatOptions, HostError> {
        let options_js = getOptions()
            .await
            .map_err(|e| HostError(format!("Failed to get storage: {:?}", e)))?;

        if options_js.is_null() || options_js.is_undefined() {
            return Ok(FormatOptions::default());
        }

        serde_wasm_bindgen::from_value(options_js)
            .map_err(|e| HostError(format!("Failed to parse options: {:?}", e)))
    }

    async fn save(&self, options: &FormatOptions) -> Result<(), HostError> {
        let options_js = serde_wasm_bindgen::to_value(options)
            .map_err(|e| HostError(format!("Failed to serialize options: {:?}", e)))?;

        setOptions(options_js)
            .await
            .map_err(|e| HostError(format!("Failed to save storage: {:?}", e)))
    }
}

/// Write through the async Clipboard API, falling back to a `copy` event
/// when it is refused. Background pages never have focus, so Chrome rejects
/// the async API there.
async fn write_with_fallback<W, Fut, C>(text: &str, write: W, copy_event: C) -> Result<(), HostError>
where
    W: FnOnce(String) -> Fut,
    Fut: Future<Output = Result<(), HostError>>,
    C: FnOnce(&str) -> Result<bool, HostError>,
{
    let refused = match write(text.to_string()).await {
        Ok(()) => return Ok(()),
        Err(e) => e,
    };
    debug!("Clipboard API refused ({}), using copy event", refused);

    if copy_event(text)? {
        Ok(())
    } else {
        Err(HostError(format!("Copy command failed after: {}", refused)))
    }
}

impl Clipboard for ExtensionHost {
    async fn write_text(&self, text: &str) -> Result<(), HostError> {
        write_with_fallback(
            text,
            |text| async move {
                writeClipboard(&text)
                    .await
                    .map_err(|e| HostError(format!("{:?}", e)))
            },
            |text| copyWithEvent(text).map_err(|e| HostError(format!("{:?}", e))),
        )
        .await
    }
}

impl Notifier for ExtensionHost {
    fn notify(&self, notification: &Notification) {
        createNotification(&notification.title, &notification.message, &notification.icon);
    }
}

impl ActionButton for ExtensionHost {
    fn set_title(&self, title: &str) {
        setActionTitle(title);
    }
}

impl ScriptInjector for ExtensionHost {
    async fn inject_extractor(&self, tab: &TabInfo) -> Result<(), HostError> {
        injectExtractor(tab.id)
            .await
            .map_err(|e| HostError(format!("{:?}", e)))
    }
}

impl Messenger for ExtensionHost {
    async fn send(&self, message: &Message) -> Result<Option<Message>, HostError> {
        let expected = message.expected_reply();
        let message_js = serde_wasm_bindgen::to_value(message)
            .map_err(|e| HostError(format!("Failed to serialize message: {:?}", e)))?;

        let reply_js = sendMessage(message_js)
            .await
            .map_err(|e| HostError(format!("{:?}", e)))?;

        if expected == ReplyKind::None || reply_js.is_null() || reply_js.is_undefined() {
            return Ok(None);
        }

        let reply: Message = serde_wasm_bindgen::from_value(reply_js)
            .map_err(|e| HostError(format!("Failed to parse reply: {:?}", e)))?;
        if !expected.accepts(&reply) {
            warn!("Unexpected {} reply to {}", reply.kind(), message.kind());
        }
        Ok(Some(reply))
    }
}

impl PlatformInfo for ExtensionHost {
    async fn platform_label(&self) -> Result<String, HostError> {
        let os = getPlatformOs()
            .await
            .map_err(|e| HostError(format!("{:?}", e)))?;
        os.as_string()
            .ok_or_else(|| HostError::new("Platform os is not a string"))
    }
}

impl Timer for ExtensionHost {
    async fn sleep(&self, ms: u32) {
        if let Err(e) = delay(ms).await {
            warn!("Timer failed: {:?}", e);
        }
    }

    fn now_ms(&self) -> f64 {
        js_sys::Date::now()
    }
}

impl StatusLine for ExtensionHost {
    fn show(&self, text: &str) {
        let status = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.get_element_by_id(STATUS_ELEMENT_ID));

        match status {
            Some(element) => element.set_text_content(Some(text)),
            None => warn!("No #{} element to show: {}", STATUS_ELEMENT_ID, text),
        }
    }
}
