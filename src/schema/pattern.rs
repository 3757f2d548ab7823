//! `match` pattern handling
//!
//! Callers usually write a bare regex body (`[a-z]+@.+`). A delimited literal
//! (`/[a-z]+/i`) is also accepted: the slashes are stripped and the trailing
//! flags become inline flags. Matching is a search, not a full-string match,
//! unless the pattern anchors itself.
//!
//! The dialect is the `regex` crate's, which has no lookaround and no
//! backreferences. Patterns using them, such as `^(?=.*\d)[a-z0-9]+$`, do not
//! compile and so reject every value. Write them as separate checks or as a
//! custom function instead.

use regex::Regex;

/// Inline flags the regex engine understands. `u` is accepted and ignored
/// since matching is always Unicode-aware.
const SUPPORTED_FLAGS: &[char] = &['i', 'm', 's', 'x', 'U', 'u'];

/// Compiles a caller's pattern. `None` means the pattern cannot be used, which
/// the string checker reports as a failed match.
pub(crate) fn compile(pattern: &str) -> Option<Regex> {
    let source = translate(pattern)?;
    Regex::new(&source).ok()
}

/// Turns a bare body or a `/body/flags` literal into regex source.
fn translate(pattern: &str) -> Option<String> {
    let Some(rest) = pattern.strip_prefix('/') else {
        return Some(pattern.to_string());
    };

    let Some(close) = rest.rfind('/') else {
        // Opening delimiter only
        return Some(rest.to_string());
    };

    let body = &rest[..close];
    let flags = &rest[close + 1..];
    if !flags.chars().all(|c| SUPPORTED_FLAGS.contains(&c)) {
        return None;
    }

    let inline: String = flags.chars().filter(|c| *c != 'u').collect();
    if inline.is_empty() {
        Some(body.to_string())
    } else {
        Some(format!("(?{}){}", inline, body))
    }
}

/// True when `value` contains a match for `pattern`. Unusable patterns never match.
pub(crate) fn is_match(pattern: &str, value: &str) -> bool {
    compile(pattern).map_or(false, |re| re.is_match(value))
}
