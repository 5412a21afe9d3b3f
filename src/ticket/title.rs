//! Pre-flight title check.

/// Titles must be longer than this many characters.
pub const MIN_TITLE_CHARS: usize = 8;

/// Cheap local check that a task title is worth sending to the model.
///
/// Catches empty and near-empty input only. Whether the title makes sense as
/// an engineering task is left to the generation and evaluation passes.
#[must_use]
pub fn is_valid_title(title: &str) -> bool {
    title.chars().count() > MIN_TITLE_CHARS && !title.trim().is_empty()
}
