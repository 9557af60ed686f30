//! Reply formatting - Turns search outcomes into chat-safe replies
//!
//! Display limits count Unicode scalar values, never bytes, so truncation can
//! not split a multi-byte character. Telegram measures its own hard limit in
//! UTF-16 code units, so the final message is also clipped against that.

use serde_json::Value;
use crate::domain::entities::{Reply, SearchOutcome, SearchResultItem};

/// Longest text shown per result item, before the ellipsis
pub const MAX_ITEM_CHARS: usize = 200;

/// Message length ceiling in characters (with headroom below Telegram's limit)
pub const MAX_MESSAGE_CHARS: usize = 4000;

/// Telegram's hard message limit, in UTF-16 code units
pub const TELEGRAM_MAX_UTF16_UNITS: usize = 4096;

/// How much of an upstream error body is echoed to the user
pub const MAX_ERROR_BODY_CHARS: usize = 500;

/// Results shown per search
pub const DEFAULT_MAX_RESULTS: usize = 5;

/// Return the prefix of `text` holding at most `max` characters
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Return the prefix of `text` that encodes to at most `max` UTF-16 code units
pub fn truncate_utf16(text: &str, max: usize) -> &str {
    let mut units = 0;
    for (idx, c) in text.char_indices() {
        units += c.len_utf16();
        if units > max {
            return &text[..idx];
        }
    }
    text
}

/// Clip a finished message so Telegram accepts it
fn fit_message(text: &str) -> &str {
    truncate_utf16(truncate_chars(text, MAX_MESSAGE_CHARS), TELEGRAM_MAX_UTF16_UNITS)
}

pub fn usage() -> Reply {
    Reply::markdown("⚠️ Usage: `/search <keyword>`")
}

pub fn searching(query: &str) -> Reply {
    Reply::markdown(format!("🔎 Searching for `{}`...", query))
}

pub fn no_results() -> Reply {
    Reply::plain("⚠️ No results found or invalid response.")
}

/// Numbered list of the first `max_results` items, capped at the message ceiling
pub fn results(items: &[Value], max_results: usize) -> Reply {
    let mut message = String::from("🔍 Search Results:\n\n");
    for (idx, value) in items.iter().take(max_results).enumerate() {
        let item = SearchResultItem::from_value(value);
        message.push_str(&format!(
            "{}. {}...\n\n",
            idx + 1,
            truncate_chars(&item.text, MAX_ITEM_CHARS)
        ));
    }
    Reply::plain(fit_message(&message))
}

pub fn upstream_error(status: u16, body: &str) -> Reply {
    Reply::plain(format!(
        "❌ API Error ({})\n{}",
        status,
        truncate_chars(body, MAX_ERROR_BODY_CHARS)
    ))
}

pub fn request_failed(description: &str) -> Reply {
    Reply::plain(fit_message(&format!("⚠️ Request failed: {}", description)))
}

/// Final reply for a search call
pub fn search_reply(outcome: &SearchOutcome, max_results: usize) -> Reply {
    match outcome {
        SearchOutcome::Results(items) if items.is_empty() => no_results(),
        SearchOutcome::Results(items) => results(items, max_results),
        SearchOutcome::Upstream { status, body } => upstream_error(*status, body),
        SearchOutcome::Failed(description) => request_failed(description),
    }
}
