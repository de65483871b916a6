//! Prompt assembly.
//!
//! A prompt is the system instruction, then the transcript of earlier turns
//! (one `role: content` line each, in order), then the new user message.

use crate::models::{ConversationTurn, ImageAttachment};
use crate::provider::CompletionRequest;

/// Instruction for text-only chats.
pub const TEXT_INSTRUCTION: &str =
    "You are a helpful AI assistant. Be concise, accurate, and friendly in your responses.";

/// Instruction used when an image is attached.
pub const IMAGE_INSTRUCTION: &str = "You are a helpful AI assistant. Analyze the image if provided and respond to the user's message. Be concise, accurate, and friendly.";

fn push_transcript(prompt: &mut String, history: &[ConversationTurn]) {
    if history.is_empty() {
        return;
    }
    prompt.push_str("\n\nConversation history:\n");
    for turn in history {
        prompt.push_str(&turn.role);
        prompt.push_str(": ");
        prompt.push_str(&turn.content);
        prompt.push('\n');
    }
}

/// Text-only prompt ending with an `Assistant:` cue.
pub fn text_prompt(message: &str, history: &[ConversationTurn]) -> String {
    let mut prompt = String::from(TEXT_INSTRUCTION);
    push_transcript(&mut prompt, history);
    prompt.push_str("\nUser: ");
    prompt.push_str(message);
    prompt.push_str("\nAssistant:");
    prompt
}

/// Prompt accompanying an image. The message is optional.
pub fn image_prompt(message: Option<&str>, history: &[ConversationTurn]) -> String {
    let mut prompt = String::from(IMAGE_INSTRUCTION);
    push_transcript(&mut prompt, history);
    if let Some(message) = message {
        prompt.push_str("\n\nUser message: ");
        prompt.push_str(message);
    }
    prompt
}

/// Build the outbound request: a single text part, or `[text, image]` when an
/// image is attached.
///
/// Callers guarantee that `message` or `image` is present.
pub fn build_request(
    message: Option<&str>,
    history: &[ConversationTurn],
    image: Option<&ImageAttachment>,
) -> CompletionRequest {
    match image {
        Some(attachment) => {
            CompletionRequest::with_image(image_prompt(message, history), attachment)
        }
        None => CompletionRequest::text(text_prompt(message.unwrap_or_default(), history)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::Part;

    fn history() -> Vec<ConversationTurn> {
        vec![
            ConversationTurn::new("user", "Hi"),
            ConversationTurn::new("assistant", "Hello! How can I help?"),
        ]
    }

    #[test]
    fn text_prompt_without_history() {
        assert_eq!(
            text_prompt("What is AI?", &[]),
            "You are a helpful AI assistant. Be concise, accurate, and friendly in your responses.\nUser: What is AI?\nAssistant:"
        );
    }

    #[test]
    fn text_prompt_renders_transcript_in_order() {
        let prompt = text_prompt("Tell me more", &history());
        let expected = format!(
            "{TEXT_INSTRUCTION}\n\nConversation history:\nuser: Hi\nassistant: Hello! How can I help?\n\nUser: Tell me more\nAssistant:"
        );
        assert_eq!(prompt, expected);
    }

    #[test]
    fn image_prompt_mentions_image_and_appends_message() {
        let prompt = image_prompt(Some("What is this?"), &history());
        assert!(prompt.starts_with(IMAGE_INSTRUCTION));
        assert!(prompt.contains("Analyze the image"));
        assert!(prompt.ends_with("assistant: Hello! How can I help?\n\n\nUser message: What is this?"));
    }

    #[test]
    fn image_prompt_without_message_is_instruction_only() {
        assert_eq!(image_prompt(None, &[]), IMAGE_INSTRUCTION);
    }

    #[test]
    fn build_request_is_multipart_only_with_image() {
        let text = build_request(Some("hello"), &[], None);
        assert_eq!(text.parts.len(), 1);
        assert!(text.prompt().unwrap().starts_with(TEXT_INSTRUCTION));

        let image = ImageAttachment {
            mime_type: "image/png".to_string(),
            data: vec![0xff],
        };
        let multi = build_request(None, &history(), Some(&image));
        assert_eq!(multi.parts.len(), 2);
        assert!(multi.prompt().unwrap().starts_with(IMAGE_INSTRUCTION));
        match &multi.parts[1] {
            Part::InlineData(d) => {
                assert_eq!(d.mime_type, "image/png");
                assert_eq!(d.data, "/w==");
            }
            other => panic!("expected image part, got {other:?}"),
        }
    }

    #[test]
    fn prompt_is_deterministic() {
        assert_eq!(
            build_request(Some("x"), &history(), None),
            build_request(Some("x"), &history(), None)
        );
    }
}
