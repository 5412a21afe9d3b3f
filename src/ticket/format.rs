//! Rendering a scoped task as Jira wiki markup.

use std::fmt::Write as _;

use super::scope::{ScopeValue, ScopedTask, SUB_TASKS};

/// Renders the detailed scope of `task` as the ticket description.
///
/// Fields appear in scope order, each followed by a blank line. Scalars
/// render as `*Label*: value`; lists put one element per line under the
/// label, bulleted with `- ` except `Sub-Tasks`, whose items already carry
/// their own numbering.
#[must_use]
pub fn format_description(task: &ScopedTask) -> String {
    let mut out = String::new();
    for (label, value) in task.scope.iter() {
        match value {
            ScopeValue::Text(text) => {
                let _ = writeln!(out, "*{label}*: {text}");
            }
            ScopeValue::List(items) => {
                let _ = writeln!(out, "*{label}*: ");
                for item in items {
                    if label == SUB_TASKS {
                        let _ = writeln!(out, "{item}");
                    } else {
                        let _ = writeln!(out, "- {item}");
                    }
                }
            }
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ticket::scope::{ScopeDetails, ScopeQuality};

    fn task(fields: Vec<(&str, ScopeValue)>) -> ScopedTask {
        ScopedTask {
            title: "Write evaluation module for MNIST classifier".into(),
            scope: fields.into_iter().collect::<ScopeDetails>(),
            quality: ScopeQuality::WellScoped,
        }
    }

    fn list(items: &[&str]) -> ScopeValue {
        ScopeValue::List(items.iter().map(ToString::to_string).collect())
    }

    #[test]
    fn scalar_field_is_bold_label_and_value() {
        let out = format_description(&task(vec![("Assumptions", ScopeValue::Text("X".into()))]));
        assert_eq!(out, "*Assumptions*: X\n\n");
    }

    #[test]
    fn list_field_is_bulleted() {
        let out = format_description(&task(vec![("Dependencies", list(&["A", "B"]))]));
        assert_eq!(out, "*Dependencies*: \n- A\n- B\n\n");
    }

    #[test]
    fn sub_tasks_are_verbatim() {
        let out = format_description(&task(vec![(
            "Sub-Tasks",
            list(&["1. Load test set", "2. Compute accuracy"]),
        )]));
        assert_eq!(out, "*Sub-Tasks*: \n1. Load test set\n2. Compute accuracy\n\n");
        assert!(!out.contains("- 1."));
    }

    #[test]
    fn fields_follow_canonical_order() {
        let out = format_description(&task(vec![
            ("Dependencies", list(&["PyTorch"])),
            ("Description", ScopeValue::Text("Evaluate the classifier.".into())),
        ]));
        assert!(out.starts_with("*Description*: Evaluate the classifier.\n\n*Dependencies*: \n"));
    }

    #[test]
    fn formatting_is_idempotent() {
        let t = task(vec![
            ("Description", ScopeValue::Text("Evaluate the classifier.".into())),
            ("Sub-Tasks", list(&["1. Load", "2. Score"])),
            ("Potential Risks/Challenges", list(&["Class imbalance"])),
        ]);
        assert_eq!(format_description(&t), format_description(&t));
    }

    #[test]
    fn empty_scope_renders_nothing() {
        assert_eq!(format_description(&task(vec![])), "");
    }
}
