use std::io::Write;

use chrono::{DateTime, Local};
use vida_assistant::{
    DEFAULT_SUGGESTIONS, Message, ReplyOrigin, ReplySource, Responder, Role, Store, Transcript,
    find_suggestion, parse_inline, to_html,
};

use crate::error::VidaError;

pub fn role_label(role: Role) -> &'static str {
    match role {
        Role::User => "Tú",
        Role::Assistant => "Asistente",
        Role::System => "Aviso",
    }
}

/// `HH:MM` in local time.
pub fn clock_time(message: &Message) -> String {
    DateTime::from_timestamp_millis(message.timestamp_ms)
        .map(|t| t.with_timezone(&Local).format("%H:%M").to_string())
        .unwrap_or_default()
}

/// Resolves the text to send from free text or a suggestion id.
pub fn prompt_text(words: &[String], suggestion: Option<&str>) -> Result<String, VidaError> {
    if let Some(id) = suggestion {
        return find_suggestion(id)
            .map(|s| s.prompt.to_string())
            .ok_or_else(|| VidaError::UnknownSuggestion(id.to_string()));
    }

    let text = words.join(" ");
    if text.trim().is_empty() {
        return Err(VidaError::EmptyMessage);
    }
    Ok(text)
}

pub async fn ask<S: Store, R: ReplySource>(
    responder: &mut Responder<S, R>,
    text: &str,
    out: &mut impl Write,
) -> Result<ReplyOrigin, VidaError> {
    let exchange = responder
        .send(text)
        .await
        .ok_or(VidaError::EmptyMessage)?;
    writeln!(out, "{}", exchange.reply.content)?;
    Ok(exchange.origin)
}

pub fn history<S: Store>(
    transcript: &Transcript<S>,
    html: bool,
    out: &mut impl Write,
) -> Result<(), VidaError> {
    for message in transcript {
        if html {
            let role = match message.role {
                Role::User => "user",
                Role::Assistant => "assistant",
                Role::System => "system",
            };
            writeln!(
                out,
                "<div class=\"message {role}\" data-id=\"{}\">{}</div>",
                message.id,
                to_html(&parse_inline(&message.content)).replace('\n', "<br>")
            )?;
        } else {
            writeln!(
                out,
                "[{}] {}: {}",
                clock_time(message),
                role_label(message.role),
                message.content
            )?;
        }
    }
    Ok(())
}

pub fn suggestions(out: &mut impl Write) -> Result<(), VidaError> {
    for suggestion in DEFAULT_SUGGESTIONS {
        writeln!(
            out,
            "{:<14} {:<20} {}",
            suggestion.id, suggestion.label, suggestion.prompt
        )?;
    }
    Ok(())
}
