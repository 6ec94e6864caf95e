// Host capabilities the controller delegates to: clipboard writes and
// opening a resolved link. Also the payload handed to a QR renderer.

use crate::error::HostError;
use crossterm::style::Stylize;
use tracing::debug;

/// Side effects provided by the environment the controller runs in.
pub trait Host {
    fn write_clipboard(&mut self, text: &str) -> Result<(), HostError>;

    /// Open a resolved target as a new navigation.
    fn open_target(&mut self, target: &str);
}

/// Host for the interactive terminal: system clipboard through `arboard`,
/// and "navigation" prints the target link.
#[derive(Debug, Default)]
pub struct TerminalHost;

impl Host for TerminalHost {
    fn write_clipboard(&mut self, text: &str) -> Result<(), HostError> {
        let mut clipboard = arboard::Clipboard::new().map_err(|e| HostError(e.to_string()))?;
        clipboard
            .set_text(text)
            .map_err(|e| HostError(e.to_string()))?;
        debug!(len = text.len(), "copied to clipboard");
        Ok(())
    }

    fn open_target(&mut self, target: &str) {
        println!("Redirecting to {}", target.underlined());
    }
}

pub const CODE_SIZE: u32 = 100;

/// What an external QR renderer needs to draw the code for a link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderableCode {
    pub payload: String,
    pub size: u32,
}

pub fn renderable_code(value: &str) -> RenderableCode {
    RenderableCode {
        payload: value.to_string(),
        size: CODE_SIZE,
    }
}
