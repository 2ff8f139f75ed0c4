use anyhow::{Context, Result};
use arboard::Clipboard;

use crate::models::Message;

/// Largest payload accepted for the clipboard (1MB)
const MAX_CLIPBOARD_SIZE: usize = 1024 * 1024;

/// Clipboard sink, swapped for a mock in tests
trait ClipboardProvider {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

struct SystemClipboard {
    clipboard: Clipboard,
}

impl SystemClipboard {
    fn new() -> Result<Self> {
        let clipboard = Clipboard::new().context("Failed to initialize clipboard")?;
        Ok(Self { clipboard })
    }
}

impl ClipboardProvider for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        self.clipboard.set_text(text).context("Failed to set clipboard contents")?;
        Ok(())
    }
}

fn validate_clipboard_text(text: &str) -> Result<()> {
    if text.trim().is_empty() {
        anyhow::bail!("Nothing to copy: message has no text or attachments");
    }
    if text.len() > MAX_CLIPBOARD_SIZE {
        anyhow::bail!(
            "Message too large for clipboard ({} bytes, max {})",
            text.len(),
            MAX_CLIPBOARD_SIZE
        );
    }
    Ok(())
}

/// Plain-text rendition of a message as it is copied:
///
/// ```text
/// Alice, 2021-03-08 14:05
/// message text
/// [photo] holiday.jpg
/// ```
pub fn message_clipboard_text(message: &Message) -> String {
    let mut out = format!(
        "{}, {}",
        message.author.name,
        message.datetime.format("%Y-%m-%d %H:%M")
    );
    if message.edited {
        out.push_str(" (edited)");
    }
    if !message.text().is_empty() {
        out.push('\n');
        out.push_str(message.text());
    }
    for attachment in &message.attachments {
        out.push('\n');
        out.push_str(&format!("[{}]", attachment.kind.label()));
        if let Some(label) = attachment.label.as_deref().filter(|l| !l.is_empty()) {
            out.push(' ');
            out.push_str(label);
        }
    }
    out
}

fn copy_with_provider(message: &Message, provider: &mut dyn ClipboardProvider) -> Result<()> {
    let text = message_clipboard_text(message);
    validate_clipboard_text(&text)?;
    provider.set_text(&text)
}

/// Copy one message (header, text and attachment labels) to the system clipboard.
///
/// # Errors
/// Fails when the message is larger than the clipboard limit or the system
/// clipboard is unavailable (headless sessions, denied access).
pub fn copy_message(message: &Message) -> Result<()> {
    validate_clipboard_text(&message_clipboard_text(message))?;
    let mut clipboard = SystemClipboard::new()?;
    copy_with_provider(message, &mut clipboard)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDateTime;

    use super::*;
    use crate::models::{Attachment, AttachmentKind, Author, Role};

    struct MockClipboard {
        text: Option<String>,
        should_fail: bool,
    }

    impl MockClipboard {
        fn new() -> Self {
            Self { text: None, should_fail: false }
        }

        fn with_failure() -> Self {
            Self { text: None, should_fail: true }
        }
    }

    impl ClipboardProvider for MockClipboard {
        fn set_text(&mut self, text: &str) -> Result<()> {
            if self.should_fail {
                anyhow::bail!("Mock clipboard error");
            }
            self.text = Some(text.to_string());
            Ok(())
        }
    }

    fn message(text: Option<&str>) -> Message {
        Message {
            id: Some(7),
            datetime: NaiveDateTime::parse_from_str("2021-03-08T14:05:09", "%Y-%m-%dT%H:%M:%S")
                .unwrap(),
            author: Author { name: "Alice".to_string(), role: Role::Other, vk_id: None },
            text: text.map(str::to_string),
            attachments: vec![],
            edited: false,
        }
    }

    #[test]
    fn test_copy_text_message_with_mock() {
        let mut mock = MockClipboard::new();
        copy_with_provider(&message(Some("Hello 世界")), &mut mock).unwrap();
        assert_eq!(mock.text.as_deref(), Some("Alice, 2021-03-08 14:05\nHello 世界"));
    }

    #[test]
    fn test_attachment_labels_are_included() {
        let mut msg = message(None);
        msg.edited = true;
        msg.attachments.push(Attachment {
            kind: AttachmentKind::Photo,
            local_path: Some("media/1.jpg".to_string()),
            label: Some("holiday.jpg".to_string()),
            source_url: None,
        });
        msg.attachments.push(Attachment {
            kind: AttachmentKind::Sticker,
            local_path: None,
            label: None,
            source_url: None,
        });

        assert_eq!(
            message_clipboard_text(&msg),
            "Alice, 2021-03-08 14:05 (edited)\n[photo] holiday.jpg\n[sticker]"
        );
    }

    #[test]
    fn test_provider_failure_is_reported() {
        let mut mock = MockClipboard::with_failure();
        let err = copy_with_provider(&message(Some("x")), &mut mock).unwrap_err();
        assert!(err.to_string().contains("Mock clipboard error"));
    }

    #[test]
    fn test_oversized_message_is_rejected_before_clipboard_access() {
        let big = "a".repeat(MAX_CLIPBOARD_SIZE + 1);
        let err = copy_message(&message(Some(&big))).unwrap_err();
        assert!(err.to_string().contains("too large"));
    }

    #[test]
    fn test_validate_rejects_blank() {
        assert!(validate_clipboard_text("  \n").is_err());
        assert!(validate_clipboard_text("a").is_ok());
    }
}
