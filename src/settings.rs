/// Settings page coordination: platform-specific confirmation text and
/// saving the options record
use crate::error::PipelineError;
use crate::host::SettingsHost;
use crate::message::Message;
use crate::options::FormatOptions;
use log::{debug, info, warn};
use std::cell::RefCell;

pub const STATUS_DISPLAY_MS: u32 = 750;

pub fn confirmation_phrase(platform: Option<&str>) -> &'static str {
    match platform {
        Some("mac") => "Preferences saved!",
        _ => "Options saved!",
    }
}

pub struct SettingsEditor<H> {
    host: H,
    platform: RefCell<Option<String>>,
}

impl<H: SettingsHost> SettingsEditor<H> {
    pub fn new(host: H) -> SettingsEditor<H> {
        SettingsEditor {
            host,
            platform: RefCell::new(None),
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Ask the platform label, then load the stored options with defaults
    /// filled in for the form. A missing platform answer only changes the
    /// confirmation wording.
    pub async fn open(&self) -> Result<FormatOptions, PipelineError> {
        if let Err(e) = self.request_platform().await {
            warn!("Platform label unavailable: {}", e);
        }
        self.host.load().await.map_err(PipelineError::Store)
    }

    pub async fn request_platform(&self) -> Result<String, PipelineError> {
        let reply = self
            .host
            .send(&Message::PlatformRequest)
            .await
            .map_err(PipelineError::Messaging)?;

        match reply {
            Some(Message::PlatformReply { label }) => {
                debug!("Platform: {}", label);
                *self.platform.borrow_mut() = Some(label.clone());
                Ok(label)
            }
            other => Err(PipelineError::UnexpectedReply {
                expected: "platformReply",
                got: other.map_or("none", |m| m.kind()).to_string(),
            }),
        }
    }

    pub fn confirmation(&self) -> &'static str {
        confirmation_phrase(self.platform.borrow().as_deref())
    }

    /// Write the whole record in one call; once stored, show the
    /// confirmation for `STATUS_DISPLAY_MS` and clear it
    pub async fn save(&self, options: &FormatOptions) -> Result<(), PipelineError> {
        self.host.save(options).await.map_err(|e| {
            warn!("Failed to save options: {}", e);
            PipelineError::StoreWrite(e)
        })?;

        let message = self.confirmation();
        info!("{}", message);
        self.host.show(message);
        self.host.sleep(STATUS_DISPLAY_MS).await;
        self.host.show("");
        Ok(())
    }
}
