use std::collections::HashSet;

use crate::catalog::{Room, RoomCatalog};
use crate::grid::PlacementGrid;

/// Category value that disables category filtering.
pub const ALL_CATEGORIES: &str = "all";

/// User-controlled inputs to the room list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilterState {
    pub search: String,
    pub category: String,
    pub chess_only: bool,
    pub hide_placed_chess: bool,
}

impl Default for FilterState {
    fn default() -> Self {
        FilterState {
            search: String::new(),
            category: ALL_CATEGORIES.to_string(),
            chess_only: false,
            hide_placed_chess: false,
        }
    }
}

/// Lower-cased chess attributes of every room currently on the grid.
pub fn placed_chess_kinds(grid: &PlacementGrid) -> HashSet<String> {
    grid.occupied().filter_map(|(_, r)| r.chess_key()).collect()
}

/// Rooms matching `filters`, in catalog order.
///
/// Category, chess-only, hide-placed-chess and search are applied in that
/// order. The whole list is recomputed on every call.
pub fn derive_view<'a>(
    catalog: &'a RoomCatalog,
    filters: &FilterState,
    grid: &PlacementGrid,
) -> Vec<&'a Room> {
    let placed = if filters.hide_placed_chess {
        placed_chess_kinds(grid)
    } else {
        HashSet::new()
    };
    let query = filters.search.trim().to_lowercase();
    catalog
        .rooms()
        .iter()
        .filter(|r| filters.category == ALL_CATEGORIES || r.category == filters.category)
        .filter(|r| !filters.chess_only || r.has_chess())
        .filter(|r| {
            !filters.hide_placed_chess || r.chess_key().is_none_or(|k| !placed.contains(&k))
        })
        .filter(|r| query.is_empty() || r.name.to_lowercase().contains(&query))
        .collect()
}
