/// Page extractor, injected into http/https pages. Reads the page once,
/// reports it to the coordinator, and is done.
use crate::error::PipelineError;
use crate::host::Messenger;
use crate::message::Message;
use crate::page_data::PageData;
use log::debug;

/// Read URL, title and trimmed selection from the current document
pub fn read_page() -> Result<PageData, PipelineError> {
    let window = web_sys::window().ok_or_else(|| PipelineError::Page("no window".to_string()))?;
    let document = window
        .document()
        .ok_or_else(|| PipelineError::Page("no document".to_string()))?;

    let href = window
        .location()
        .href()
        .map_err(|e| PipelineError::Page(format!("Failed to read location: {:?}", e)))?;

    let selection = window
        .get_selection()
        .ok()
        .flatten()
        .map(|selection| String::from(selection.to_string()))
        .unwrap_or_default();

    Ok(PageData::new(href, document.title(), &selection))
}

/// Send the page data to the coordinator. No reply is expected.
pub async fn report<M: Messenger>(messenger: &M, data: PageData) -> Result<(), PipelineError> {
    debug!("Reporting page data for {}", data.href);
    messenger
        .send(&Message::PageData(data))
        .await
        .map_err(PipelineError::Messaging)?;
    Ok(())
}

pub async fn run<M: Messenger>(messenger: &M) -> Result<(), PipelineError> {
    let data = read_page()?;
    report(messenger, data).await
}
