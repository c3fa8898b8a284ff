/// Foreign-key join from a goal row to the items that reference it.
///
/// Yields every item whose back-reference equals `row`, in source order,
/// without deduplication. Items without a back-reference never match.
pub fn join_by_row<'a, T, F>(row: i64, items: &'a [T], back_ref: F) -> impl Iterator<Item = &'a T> + 'a
where
    F: Fn(&T) -> Option<i64> + 'a,
{
    items.iter().filter(move |item| back_ref(*item) == Some(row))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Task {
        goal_row: Option<i64>,
        text: &'static str,
    }

    fn task(goal_row: Option<i64>, text: &'static str) -> Task {
        Task { goal_row, text }
    }

    #[test]
    fn test_all_matches_in_source_order() {
        let tasks = vec![
            task(Some(2), "b1"),
            task(Some(1), "a1"),
            task(Some(2), "b2"),
            task(None, "orphan"),
            task(Some(2), "b1"),
        ];
        let joined: Vec<_> = join_by_row(2, &tasks, |t| t.goal_row).map(|t| t.text).collect();
        assert_eq!(joined, vec!["b1", "b2", "b1"]);
    }

    #[test]
    fn test_no_matches() {
        let tasks = vec![task(Some(1), "a"), task(None, "orphan")];
        assert_eq!(join_by_row(0, &tasks, |t| t.goal_row).count(), 0);
        assert_eq!(join_by_row(3, &[] as &[Task], |t| t.goal_row).count(), 0);
    }
}
