//! The immutable item pool a draft is played from.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use draftroom_protocol::{Category, DraftItem};

use crate::DraftError;

/// A validated, rank-ordered set of [`DraftItem`]s.
///
/// Cheap to clone: the items live behind an `Arc` and are shared by the
/// session and every connect-time snapshot. Picks refer to items by their
/// index here rather than copying them.
#[derive(Debug, Clone)]
pub struct Catalog {
    items: Arc<[DraftItem]>,
    by_id: Arc<HashMap<String, usize>>,
}

impl Catalog {
    /// Builds a catalog, sorting by rank.
    ///
    /// # Errors
    /// [`DraftError::InvalidCatalog`] on an empty list, a duplicate id, a
    /// zero rank, or two items sharing a rank.
    pub fn new(mut items: Vec<DraftItem>) -> Result<Self, DraftError> {
        if items.is_empty() {
            return Err(DraftError::InvalidCatalog("no items".into()));
        }

        let mut ranks = HashSet::with_capacity(items.len());
        for item in &items {
            if item.rank == 0 {
                return Err(DraftError::InvalidCatalog(format!(
                    "item {} has rank 0",
                    item.id
                )));
            }
            if !ranks.insert(item.rank) {
                return Err(DraftError::InvalidCatalog(format!(
                    "rank {} is used more than once",
                    item.rank
                )));
            }
        }

        items.sort_by_key(|item| item.rank);

        let mut by_id = HashMap::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            if by_id.insert(item.id.clone(), index).is_some() {
                return Err(DraftError::InvalidCatalog(format!(
                    "duplicate item id {}",
                    item.id
                )));
            }
        }

        Ok(Self {
            items: items.into(),
            by_id: Arc::new(by_id),
        })
    }

    /// Parses a JSON array of items (the same shape as `players_loaded`).
    pub fn from_json(data: &str) -> Result<Self, DraftError> {
        let items: Vec<DraftItem> = serde_json::from_str(data)
            .map_err(|e| DraftError::InvalidCatalog(e.to_string()))?;
        Self::new(items)
    }

    /// The built-in catalog: the top 30 fantasy football players.
    pub fn fantasy_top30() -> Self {
        use Category::*;
        const PLAYERS: [(&str, Category, &str); 30] = [
            ("Ja'Marr Chase", WideReceiver, "CIN"),
            ("Bijan Robinson", RunningBack, "ATL"),
            ("Saquon Barkley", RunningBack, "PHI"),
            ("Justin Jefferson", WideReceiver, "MIN"),
            ("Jahmyr Gibbs", RunningBack, "DET"),
            ("CeeDee Lamb", WideReceiver, "DAL"),
            ("Derrick Henry", RunningBack, "BAL"),
            ("Nico Collins", WideReceiver, "HOU"),
            ("Brian Thomas Jr.", WideReceiver, "JAC"),
            ("Puka Nacua", WideReceiver, "LAR"),
            ("A.J. Brown", WideReceiver, "PHI"),
            ("Kyren Williams", RunningBack, "LAR"),
            ("Tyreek Hill", WideReceiver, "MIA"),
            ("De'Von Achane", RunningBack, "MIA"),
            ("Josh Jacobs", RunningBack, "GB"),
            ("Amon-Ra St. Brown", WideReceiver, "DET"),
            ("Kenneth Walker III", RunningBack, "SEA"),
            ("Garrett Wilson", WideReceiver, "NYJ"),
            ("Drake London", WideReceiver, "ATL"),
            ("Joe Mixon", RunningBack, "HOU"),
            ("Davante Adams", WideReceiver, "NYJ"),
            ("Travis Kelce", TightEnd, "KC"),
            ("Lamar Jackson", Quarterback, "BAL"),
            ("Josh Allen", Quarterback, "BUF"),
            ("Patrick Mahomes", Quarterback, "KC"),
            ("Tee Higgins", WideReceiver, "CIN"),
            ("Mike Evans", WideReceiver, "TB"),
            ("George Kittle", TightEnd, "SF"),
            ("Mark Andrews", TightEnd, "BAL"),
            ("Alvin Kamara", RunningBack, "NO"),
        ];

        // Ranks and ids are the table position, already unique and sorted.
        let items: Vec<DraftItem> = PLAYERS
            .iter()
            .zip(1u32..)
            .map(|(&(name, category, group), rank)| DraftItem {
                id: rank.to_string(),
                name: name.to_string(),
                category,
                group: group.to_string(),
                rank,
            })
            .collect();
        let by_id = items
            .iter()
            .enumerate()
            .map(|(index, item)| (item.id.clone(), index))
            .collect();

        Self {
            items: items.into(),
            by_id: Arc::new(by_id),
        }
    }

    /// All items in rank order.
    pub fn items(&self) -> &[DraftItem] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&DraftItem> {
        self.items.get(index)
    }

    /// Position of the item with this id, if it exists.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.by_id.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, rank: u32) -> DraftItem {
        DraftItem {
            id: id.into(),
            name: format!("Player {id}"),
            category: Category::RunningBack,
            group: "FA".into(),
            rank,
        }
    }

    #[test]
    fn test_builtin_catalog_has_thirty_ranked_players() {
        let catalog = Catalog::fantasy_top30();
        assert_eq!(catalog.len(), 30);
        assert_eq!(catalog.items()[0].name, "Ja'Marr Chase");
        assert_eq!(catalog.items()[29].name, "Alvin Kamara");
        assert!(catalog.items().windows(2).all(|w| w[0].rank < w[1].rank));
        assert_eq!(catalog.index_of("22"), Some(21));
        assert_eq!(catalog.get(21).unwrap().category, Category::TightEnd);
    }

    #[test]
    fn test_builtin_catalog_passes_its_own_validation() {
        let rebuilt = Catalog::new(Catalog::fantasy_top30().items().to_vec()).unwrap();
        assert_eq!(rebuilt.len(), 30);
    }

    #[test]
    fn test_new_sorts_by_rank() {
        let catalog = Catalog::new(vec![item("b", 2), item("c", 3), item("a", 1)]).unwrap();
        let ids: Vec<&str> = catalog.items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
        assert_eq!(catalog.index_of("c"), Some(2));
    }

    #[test]
    fn test_new_rejects_duplicate_ids() {
        let err = Catalog::new(vec![item("a", 1), item("a", 2)]).unwrap_err();
        assert!(err.to_string().contains("duplicate item id a"));
    }

    #[test]
    fn test_new_rejects_zero_and_shared_ranks() {
        assert!(Catalog::new(vec![item("a", 0)]).is_err());
        assert!(Catalog::new(vec![item("a", 1), item("b", 1)]).is_err());
    }

    #[test]
    fn test_new_rejects_empty() {
        assert!(Catalog::new(Vec::new()).is_err());
    }

    #[test]
    fn test_from_json_reads_board_shape() {
        let json = r#"[
            { "id": "qb1", "name": "Josh Allen", "position": "QB", "team": "BUF", "rank": 2 },
            { "id": "te1", "name": "Travis Kelce", "position": "TE", "team": "KC", "rank": 1 }
        ]"#;
        let catalog = Catalog::from_json(json).unwrap();
        assert_eq!(catalog.items()[0].id, "te1");
        assert_eq!(catalog.items()[1].category, Category::Quarterback);
    }

    #[test]
    fn test_from_json_rejects_malformed_input() {
        let err = Catalog::from_json(r#"[{ "id": "x" }]"#).unwrap_err();
        assert!(matches!(err, DraftError::InvalidCatalog(_)));
    }
}
