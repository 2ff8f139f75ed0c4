mod common;

use arboard::Clipboard;
use common::{ExportDirBuilder, MessageBuilder};
use lastseen::clipboard::{copy_message, message_clipboard_text};
use lastseen::models::Message;
use lastseen::source::{PageLoader, open_export};

/// Tests that actually access clipboard are disabled in automated testing
/// Set ENABLE_CLIPBOARD_TESTS=1 to run these tests locally.
fn should_test_clipboard() -> bool {
    std::env::var("ENABLE_CLIPBOARD_TESTS").is_ok()
}

fn load_messages(messages: &[MessageBuilder]) -> Vec<Message> {
    let export = ExportDirBuilder::new().chunked(messages, 100);
    let mut loader = PageLoader::new(open_export(&export.path(), 100).unwrap());
    loader.load(0).unwrap().messages.clone()
}

fn assert_clipboard_error(e: &anyhow::Error) {
    // Expected in CI/headless environments
    let err_msg = e.to_string().to_lowercase();
    assert!(
        err_msg.contains("clipboard") || err_msg.contains("display"),
        "Unexpected error type: {}",
        e
    );
}

#[test]
fn test_clipboard_text_from_loaded_message() {
    let messages = load_messages(&[MessageBuilder::new()
        .at("2021-03-08T14:05:00")
        .text("See you at 6")
        .edited()
        .attachment("photo", Some("media/1.jpg"))]);

    assert_eq!(
        message_clipboard_text(&messages[0]),
        "Alice, 2021-03-08 14:05 (edited)\nSee you at 6\n[photo]"
    );
}

#[test]
fn test_clipboard_integration_basic() {
    if !should_test_clipboard() {
        eprintln!("Skipping clipboard access test (set ENABLE_CLIPBOARD_TESTS=1 to run)");
        return;
    }

    let messages =
        load_messages(&[MessageBuilder::new().at("2021-03-08T14:05:00").text("Integration test")]);
    match copy_message(&messages[0]) {
        Ok(()) => {
            // Verify clipboard contents if clipboard is available
            if let Ok(mut clipboard) = Clipboard::new()
                && let Ok(contents) = clipboard.get_text()
            {
                assert_eq!(contents, "Alice, 2021-03-08 14:05\nIntegration test");
            }
        }
        Err(e) => assert_clipboard_error(&e),
    }
}

#[test]
fn test_clipboard_integration_special_characters() {
    if !should_test_clipboard() {
        eprintln!("Skipping clipboard access test (set ENABLE_CLIPBOARD_TESTS=1 to run)");
        return;
    }

    let texts = [
        "Text with\nnewlines\nand\ttabs",
        "Unicode: 世界 🚀 émoji",
        "JSON: {\"key\": \"value\", \"nested\": {\"a\": 1}}",
    ];
    let builders: Vec<MessageBuilder> = texts
        .iter()
        .enumerate()
        .map(|(i, text)| MessageBuilder::new().at(&format!("2021-03-08T14:0{}:00", i)).text(text))
        .collect();

    for (message, text) in load_messages(&builders).iter().zip(texts) {
        match copy_message(message) {
            Ok(()) => {
                if let Ok(mut clipboard) = Clipboard::new()
                    && let Ok(contents) = clipboard.get_text()
                {
                    assert!(contents.ends_with(text), "Clipboard should preserve special characters");
                }
            }
            Err(e) => assert_clipboard_error(&e),
        }
    }
}

// Size and blank-text validation is in unit tests (src/clipboard/mod.rs)
// where they use MockClipboard to avoid system clipboard dependency
