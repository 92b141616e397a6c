//! Plain-text rendering of flow state for the terminal.

use crate::domain::{CacheReconciliation, MajorOption, Navigation, UserRecord};

/// One line per major: `*` marks the pending selection, `(current)` the
/// major held when the page loaded.
pub fn render_options(options: &[MajorOption<'_>]) -> String {
    if options.is_empty() {
        return "No majors available.".to_owned();
    }
    options
        .iter()
        .map(|option| {
            let marker = if option.selected { '*' } else { ' ' };
            let suffix = if option.current { " (current)" } else { "" };
            format!(
                "{marker} {id}\t{name}{suffix}",
                id = option.major.id(),
                name = option.major.name()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Identifier and major of the session user.
pub fn render_user(user: &UserRecord) -> String {
    let id = user
        .user_id()
        .map_or_else(|| "unknown".to_owned(), |id| id.to_string());
    let major = match (user.current_major_id(), user.major_name()) {
        (Some(major), Some(name)) => format!("{major} ({name})"),
        (Some(major), None) => major.to_string(),
        (None, _) => "none".to_owned(),
    };
    format!("user: {id}\nmajor: {major}")
}

/// Which cache path a confirmed selection took, and where the session goes.
pub fn render_selection(outcome: &CacheReconciliation, navigation: Navigation) -> String {
    let cache = match outcome {
        CacheReconciliation::Refreshed(_) => "cache refreshed from the server",
        CacheReconciliation::PartiallyMerged(_) => "cache patched locally (refresh unavailable)",
        CacheReconciliation::Untouched => "cache left unchanged",
    };
    format!("Major saved; {cache}.\nnext: {}", navigation.path())
}

/// Route the session moves to next.
pub fn render_navigation(navigation: Navigation) -> String {
    format!("next: {}", navigation.path())
}
