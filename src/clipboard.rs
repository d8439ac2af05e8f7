use arboard::Clipboard;

/// Destination for copied shortcut keys.
pub trait ClipboardSink {
    fn set_text(&mut self, text: &str) -> anyhow::Result<()>;
}

/// The system clipboard. A fresh handle is opened per copy.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: &str) -> anyhow::Result<()> {
        let mut cb = Clipboard::new()?;
        cb.set_text(text.to_string())?;
        Ok(())
    }
}
