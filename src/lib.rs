/// Copy Page Link - browser extension that copies the current page as a
/// Markdown, HTML, LaTeX or XML link
/// Built with Rust + WASM

pub mod bridge;
pub mod coordinator;
pub mod error;
pub mod extractor;
pub mod formatter;
pub mod host;
pub mod message;
pub mod options;
pub mod page_data;
pub mod settings;

#[cfg(test)]
mod testing;

use bridge::ExtensionHost;
use coordinator::{Activation, Coordinator};
use error::PipelineError;
use message::Message;
use options::FormatOptions;
use page_data::{MessageSender, PageData, TabInfo};
use settings::SettingsEditor;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

thread_local! {
    static COORDINATOR: Rc<Coordinator<ExtensionHost>> = Rc::new(Coordinator::new(ExtensionHost));
    static SETTINGS: Rc<SettingsEditor<ExtensionHost>> = Rc::new(SettingsEditor::new(ExtensionHost));
}

fn coordinator() -> Rc<Coordinator<ExtensionHost>> {
    COORDINATOR.with(Rc::clone)
}

fn settings_editor() -> Rc<SettingsEditor<ExtensionHost>> {
    SETTINGS.with(Rc::clone)
}

fn to_js(error: PipelineError) -> JsValue {
    JsValue::from_str(&error.to_string())
}

fn parse<T: serde::de::DeserializeOwned>(value: JsValue, what: &str) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("Failed to parse {}: {:?}", what, e)))
}

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

// Re-export the formatter for JavaScript access
#[wasm_bindgen]
pub fn format_link(data: JsValue, options: JsValue) -> Result<String, JsValue> {
    let data: PageData = parse(data, "page data")?;
    let options: FormatOptions = if options.is_null() || options.is_undefined() {
        FormatOptions::default()
    } else {
        parse(options, "options")?
    };
    Ok(formatter::format_link(&data, &options))
}

/// Background page startup: show the configured format in the tooltip
#[wasm_bindgen]
pub async fn start_background() -> Result<(), JsValue> {
    coordinator().refresh_tooltip().await.map_err(to_js)
}

/// Handler for the action button click
#[wasm_bindgen]
pub async fn on_action_clicked(tab: JsValue) -> Result<(), JsValue> {
    let tab: TabInfo = parse(tab, "tab")?;
    let coordinator = coordinator();

    let activation = coordinator.activate(&tab).await.map_err(to_js)?;
    if let Activation::AwaitingExtraction { tab_id, sequence } = activation {
        spawn_local(async move {
            coordinator.expire_extraction(tab_id, sequence).await;
        });
    }
    Ok(())
}

/// Handler for runtime messages; resolves with the reply, if any
#[wasm_bindgen]
pub async fn on_message(message: JsValue, sender: JsValue) -> Result<JsValue, JsValue> {
    let message: Message = parse(message, "message")?;
    let sender: MessageSender = parse(sender, "sender")?;

    let reply = coordinator()
        .handle_message(message, &sender)
        .await
        .map_err(to_js)?;

    match reply {
        Some(reply) => serde_wasm_bindgen::to_value(&reply)
            .map_err(|e| JsValue::from_str(&format!("Failed to serialize reply: {:?}", e))),
        None => Ok(JsValue::UNDEFINED),
    }
}

/// Handler for storage changes
#[wasm_bindgen]
pub async fn on_options_changed() -> Result<(), JsValue> {
    coordinator().refresh_tooltip().await.map_err(to_js)
}

/// Content script entry point
#[wasm_bindgen]
pub async fn run_extractor() -> Result<(), JsValue> {
    extractor::run(&ExtensionHost).await.map_err(to_js)
}

/// Settings page startup; resolves with the options to fill the form with
#[wasm_bindgen]
pub async fn open_settings() -> Result<JsValue, JsValue> {
    let options = settings_editor().open().await.map_err(to_js)?;
    serde_wasm_bindgen::to_value(&options)
        .map_err(|e| JsValue::from_str(&format!("Failed to serialize options: {:?}", e)))
}

/// Settings form submit
#[wasm_bindgen]
pub async fn save_settings(options: JsValue) -> Result<(), JsValue> {
    let options: FormatOptions = parse(options, "options")?;
    settings_editor().save(&options).await.map_err(to_js)
}
