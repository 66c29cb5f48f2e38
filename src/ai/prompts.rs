use crate::types::{ChatMessage, Role};

/// Transcript entries sent along with each chat turn.
pub const HISTORY_WINDOW: usize = 6;

/// Shown when the service answers with no text at all.
pub const EMPTY_REPLY_FALLBACK: &str =
    "I'm sorry, I couldn't come up with an answer to that. Could you rephrase it?";

pub const DESIGNER_SYSTEM_INSTRUCTION: &str = r#"You are an expert interior design consultant helping a homeowner reimagine a room.
The user may share a photo of their current design. Give specific, practical advice about furniture, color, lighting, layout and materials.
When the user asks about products, use search to find real, currently available items and include shoppable links.
Keep answers concise and friendly, and format with markdown when it helps readability."#;

pub fn regenerate_prompt(style_prompt: &str) -> String {
    format!(
        "Redesign this room. Keep the structural layout exactly the same: walls, windows, doors, \
         floor plan and camera angle must not change. Apply this interior style: {style_prompt}. \
         The result must be a photorealistic, high quality interior photograph."
    )
}

pub fn edit_prompt(instruction: &str) -> String {
    format!(
        "Edit this interior photo. Apply the following instruction: {instruction}. \
         Maintain the rest of the image as it is, including the layout, perspective and lighting. \
         The result must be photorealistic."
    )
}

/// Serializes the recent transcript followed by the new message.
pub fn chat_prompt(history: &[ChatMessage], message: &str) -> String {
    let start = history.len().saturating_sub(HISTORY_WINDOW);
    let transcript = history[start..]
        .iter()
        .map(|msg| {
            let speaker = match msg.role {
                Role::User => "User",
                Role::Model => "Designer",
            };
            format!("{speaker}: {}", msg.text)
        })
        .collect::<Vec<_>>()
        .join("\n");

    if transcript.is_empty() {
        format!("User: {message}")
    } else {
        format!("Conversation so far:\n{transcript}\n\nUser: {message}")
    }
}

pub fn reply_text_or_fallback(text: Option<String>) -> String {
    text.map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| EMPTY_REPLY_FALLBACK.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn style_prompt_is_embedded() {
        let prompt = regenerate_prompt("coastal colors");
        assert!(prompt.contains("Apply this interior style: coastal colors."));
        assert!(prompt.contains("structural layout"));
        assert!(prompt.contains("photorealistic"));
    }

    #[test]
    fn edit_prompt_keeps_rest_of_image() {
        let prompt = edit_prompt("add more plants");
        assert!(prompt.contains("add more plants"));
        assert!(prompt.contains("Maintain the rest of the image"));
    }

    #[test]
    fn chat_prompt_keeps_last_six_entries() {
        let history: Vec<ChatMessage> = (0..8)
            .map(|i| {
                if i % 2 == 0 {
                    ChatMessage::user(format!("q{i}"))
                } else {
                    ChatMessage::model(format!("a{i}"))
                }
            })
            .collect();
        let prompt = chat_prompt(&history, "next");
        assert!(!prompt.contains("q0"));
        assert!(!prompt.contains("a1"));
        assert!(prompt.contains("User: q2\nDesigner: a3"));
        assert!(prompt.ends_with("Designer: a7\n\nUser: next"));
    }

    #[test]
    fn chat_prompt_without_history() {
        assert_eq!(chat_prompt(&[], "hello"), "User: hello");
    }

    #[test]
    fn empty_reply_uses_fallback() {
        assert_eq!(reply_text_or_fallback(None), EMPTY_REPLY_FALLBACK);
        assert_eq!(reply_text_or_fallback(Some("  ".into())), EMPTY_REPLY_FALLBACK);
        assert_eq!(reply_text_or_fallback(Some(" hi ".into())), "hi");
    }
}
