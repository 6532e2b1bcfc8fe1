//! Utilities to compare tasks
//!
//! These are the building blocks of [`crate::sort::sort_tasks`]

use std::cmp::Ordering;

use crate::task::Task;

/// Compare chronologically by due date
pub fn compare_due_date(left: &Task, right: &Task) -> Ordering {
    Ord::cmp(&left.due_date(), &right.due_date())
}

/// Compare by priority, `low < medium < high`
pub fn compare_priority(left: &Task, right: &Task) -> Ordering {
    Ord::cmp(&left.priority(), &right.priority())
}

/// Compare two optional texts alphabetically, ignoring case. Missing texts sort as empty strings
pub fn compare_text_alpha(left: Option<&str>, right: Option<&str>) -> Ordering {
    Ord::cmp(
        &left.unwrap_or("").to_lowercase(),
        &right.unwrap_or("").to_lowercase(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_ignores_case_and_missing_values() {
        assert_eq!(compare_text_alpha(Some("apple"), Some("Banana")), Ordering::Less);
        assert_eq!(compare_text_alpha(Some("ZETA"), Some("zeta")), Ordering::Equal);
        assert_eq!(compare_text_alpha(None, Some("a")), Ordering::Less);
        assert_eq!(compare_text_alpha(None, Some("")), Ordering::Equal);
    }
}
