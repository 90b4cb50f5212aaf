//! Article sourcing tests
//!
//! Tests for article-supplier associations including:
//! - At most one preferred supplier per article
//! - Preferred selection as a reset-then-set operation

use proptest::prelude::*;
use uuid::Uuid;

/// In-memory stand-in for the association table, applying the same
/// reset-then-set rule the service runs transactionally
struct AssociationTable {
    rows: Vec<(Uuid, Uuid, bool)>, // (id, article_id, is_preferred)
}

impl AssociationTable {
    fn new() -> Self {
        Self { rows: Vec::new() }
    }

    fn insert(&mut self, article_id: Uuid, is_preferred: bool) -> Uuid {
        if is_preferred {
            self.clear_preferred(article_id);
        }
        let id = Uuid::new_v4();
        self.rows.push((id, article_id, is_preferred));
        id
    }

    fn set_preferred(&mut self, association_id: Uuid) -> bool {
        let Some(article_id) = self
            .rows
            .iter()
            .find(|(id, _, _)| *id == association_id)
            .map(|(_, article_id, _)| *article_id)
        else {
            return false;
        };

        self.clear_preferred(article_id);
        for row in &mut self.rows {
            if row.0 == association_id {
                row.2 = true;
            }
        }
        true
    }

    fn clear_preferred(&mut self, article_id: Uuid) {
        for row in &mut self.rows {
            if row.1 == article_id {
                row.2 = false;
            }
        }
    }

    fn preferred_count(&self, article_id: Uuid) -> usize {
        self.rows
            .iter()
            .filter(|(_, a, preferred)| *a == article_id && *preferred)
            .count()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Setting preferred moves the flag, never duplicates it
    #[test]
    fn test_set_preferred_moves_flag() {
        let mut table = AssociationTable::new();
        let article = Uuid::new_v4();

        let first = table.insert(article, true);
        let second = table.insert(article, false);

        assert_eq!(table.preferred_count(article), 1);

        assert!(table.set_preferred(second));
        assert_eq!(table.preferred_count(article), 1);

        assert!(table.set_preferred(first));
        assert_eq!(table.preferred_count(article), 1);
    }

    /// Creating a preferred association demotes the previous one
    #[test]
    fn test_preferred_on_create_demotes_existing() {
        let mut table = AssociationTable::new();
        let article = Uuid::new_v4();

        table.insert(article, true);
        table.insert(article, true);
        table.insert(article, true);

        assert_eq!(table.preferred_count(article), 1);
    }

    /// Preferred flags on one article never touch another
    #[test]
    fn test_articles_are_independent() {
        let mut table = AssociationTable::new();
        let article_a = Uuid::new_v4();
        let article_b = Uuid::new_v4();

        table.insert(article_a, true);
        let b = table.insert(article_b, true);
        table.set_preferred(b);

        assert_eq!(table.preferred_count(article_a), 1);
        assert_eq!(table.preferred_count(article_b), 1);
    }

    /// Setting preferred on a missing association is a no-op
    #[test]
    fn test_missing_association() {
        let mut table = AssociationTable::new();
        let article = Uuid::new_v4();
        table.insert(article, true);

        assert!(!table.set_preferred(Uuid::new_v4()));
        assert_eq!(table.preferred_count(article), 1);
    }

    /// An article may have no preferred supplier at all
    #[test]
    fn test_zero_preferred_is_valid() {
        let mut table = AssociationTable::new();
        let article = Uuid::new_v4();

        table.insert(article, false);
        table.insert(article, false);

        assert_eq!(table.preferred_count(article), 0);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// However associations are created and re-pointed, no article ever
        /// holds more than one preferred supplier
        #[test]
        fn prop_at_most_one_preferred_per_article(
            operations in prop::collection::vec((0usize..3, 0usize..5, any::<bool>()), 1..50)
        ) {
            let articles: Vec<Uuid> = (0..3).map(|_| Uuid::new_v4()).collect();
            let mut table = AssociationTable::new();
            let mut ids: Vec<Uuid> = Vec::new();

            for (article_idx, id_idx, preferred) in operations {
                if preferred && !ids.is_empty() {
                    let target = ids[id_idx % ids.len()];
                    table.set_preferred(target);
                } else {
                    let id = table.insert(articles[article_idx], preferred);
                    ids.push(id);
                }

                for article in &articles {
                    prop_assert!(table.preferred_count(*article) <= 1);
                }
            }
        }
    }
}
