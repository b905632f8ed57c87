#[cfg(test)]
mod tests {
    use crate::selection::Selection;
    use proptest::prelude::*;

    proptest! {
        // Toggling the same id twice restores the previous selection
        #[test]
        fn test_toggle_is_involutive(
            start in proptest::collection::vec(0..20i64, 0..10),
            id in 0..20i64,
        ) {
            let before: Selection = start.into_iter().collect();
            let mut after = before.clone();

            after.toggle(id);
            after.toggle(id);

            prop_assert_eq!(after, before);
        }

        // Any toggle sequence leaves each id present at most once, and present
        // exactly when it was toggled an odd number of times
        #[test]
        fn test_membership_follows_toggle_parity(
            toggles in proptest::collection::vec(0..10i64, 0..40),
        ) {
            let mut selection = Selection::new();
            for &id in &toggles {
                selection.toggle(id);
            }

            for id in 0..10i64 {
                let count = toggles.iter().filter(|&&t| t == id).count();
                prop_assert_eq!(selection.contains(id), count % 2 == 1);
                prop_assert!(selection.ids().iter().filter(|&&s| s == id).count() <= 1);
            }
        }
    }
}
