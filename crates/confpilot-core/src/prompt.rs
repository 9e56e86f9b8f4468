//! Oracle prompts and reply cleanup.
//!
//! Classification and patch proposal are two separate completions. The patch
//! prompt carries the current configuration but not the schema; schemas are
//! large enough to make completions unreliable, so they are only used to
//! validate the result afterwards.

use serde_json::Value;

use crate::app::KNOWN_APPS;

/// Code fence marker that models like to wrap JSON answers in.
pub const FENCE: &str = "```";

/// Worked example embedded in the patch prompt.
pub const PATCH_EXAMPLE: &str = r#"{"path": "workloads.deployments.chat.containers.chat.resources.memory.limitMiB", "value": 1024}"#;

/// Prompt asking the oracle to name the targeted application.
pub fn classification_prompt(user_input: &str) -> String {
    let options = KNOWN_APPS.join(", ");
    format!(
        "User request: '{user_input}'\n\n\
         Which application is the user referring to?\n\
         Options: {options}\n\
         Reply with ONLY ONE WORD - the application name, nothing else."
    )
}

/// Prompt asking the oracle for a single `{path, value}` change.
pub fn patch_prompt(user_input: &str, current: &Value) -> String {
    let config = serde_json::to_string_pretty(current).unwrap_or_else(|_| current.to_string());
    format!(
        "User request: {user_input}\n\n\
         Current configuration JSON:\n{config}\n\n\
         Based on the user request, determine:\n\
         1. Which field needs to be changed (as a dot-separated path)\n\
         2. What the new value should be (extract from user request)\n\n\
         Return ONLY a JSON object with 'path' and 'value' fields.\n\
         Example: {PATCH_EXAMPLE}\n\
         Output:"
    )
}

/// Trim a reply and drop code fence lines if it was fenced.
pub fn clean_reply(reply: &str) -> String {
    let trimmed = reply.trim();
    if !trimmed.starts_with(FENCE) {
        return trimmed.to_string();
    }
    trimmed
        .lines()
        .filter(|line| !line.starts_with(FENCE))
        .collect::<Vec<_>>()
        .join("\n")
}
