use crate::catalog::{Room, RoomCatalog};
use crate::chess::{ChessAvailability, ChessPiece, chess_availability};
use crate::error::{CatalogError, PayloadError};
use crate::filter::{FilterState, derive_view};
use crate::grid::{FixedCell, GRID_CELLS, GRID_COLUMNS, PlacementGrid, RotateDirection};

pub const NO_ROOMS_MESSAGE: &str = "No rooms found matching your criteria.";
pub const LOADING_MESSAGE: &str = "Loading rooms...";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Loading,
    Ready,
    Failed(String),
}

/// Application state of the floorplan builder.
///
/// Every mutation runs to completion synchronously; callers re-render from
/// [`Planner::view`] afterwards.
#[derive(Clone, Debug, Default)]
pub struct Planner {
    catalog: RoomCatalog,
    grid: PlacementGrid,
    filters: FilterState,
    selected: Option<String>,
    drag_over: Option<usize>,
    load_state: LoadState,
}

impl Planner {
    pub fn new(fixed: Vec<FixedCell>) -> Self {
        Planner {
            grid: PlacementGrid::new(fixed),
            ..Default::default()
        }
    }

    pub fn catalog(&self) -> &RoomCatalog {
        &self.catalog
    }

    pub fn grid(&self) -> &PlacementGrid {
        &self.grid
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    /// Id of the room pending placement.
    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn selected(&self) -> Option<&Room> {
        self.catalog.find_by_id(self.selected_id()?)
    }

    pub fn drag_over_index(&self) -> Option<usize> {
        self.drag_over
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    /// Install the room catalog from a data document and seed the fixed
    /// cells. Returns the fixed-cell names with no matching room.
    pub fn load(&mut self, text: &str) -> Result<Vec<String>, CatalogError> {
        match RoomCatalog::parse(text) {
            Ok(catalog) => {
                self.catalog = catalog;
                self.load_state = LoadState::Ready;
                Ok(self.grid.seed_fixed_cells(&self.catalog))
            }
            Err(e) => {
                self.fail_load(e.to_string());
                Err(e)
            }
        }
    }

    pub fn fail_load(&mut self, message: impl Into<String>) {
        self.catalog = RoomCatalog::default();
        self.load_state = LoadState::Failed(message.into());
    }

    /// Mark a catalog room as pending placement. Placed or unknown rooms
    /// leave the selection unchanged.
    pub fn select_room(&mut self, id: &str) -> bool {
        if self.grid.contains_room(id) {
            return false;
        }
        if self.catalog.find_by_id(id).is_none() {
            return false;
        }
        self.selected = Some(id.to_string());
        true
    }

    /// Place the selected room into `index`, if a room is selected.
    pub fn click_cell(&mut self, index: usize) -> bool {
        match self.selected().cloned() {
            Some(room) => self.place(index, room),
            None => false,
        }
    }

    /// Place `room` at `index`; a successful placement clears the selection.
    pub fn place(&mut self, index: usize, room: Room) -> bool {
        let placed = self.grid.place(index, room);
        if placed {
            self.selected = None;
        }
        placed
    }

    pub fn remove(&mut self, index: usize) -> bool {
        self.grid.remove(index)
    }

    pub fn rotate(&mut self, index: usize, direction: RotateDirection) -> bool {
        self.grid.rotate(index, direction)
    }

    pub fn reset_layout(&mut self) {
        self.grid.clear();
        self.drag_over = None;
    }

    /// Payload for dragging a catalog room, or `None` when it is already on
    /// the grid (or unknown) and the drag should be cancelled.
    pub fn drag_start(&self, id: &str) -> Option<String> {
        if self.grid.contains_room(id) {
            return None;
        }
        self.catalog.find_by_id(id).map(Room::to_drag_payload)
    }

    /// Track the hovered drop target. Fixed cells are not drop targets.
    pub fn drag_over(&mut self, index: usize) -> bool {
        if index >= GRID_CELLS || self.grid.is_fixed(index) {
            return false;
        }
        self.drag_over = Some(index);
        true
    }

    pub fn drag_leave(&mut self) {
        self.drag_over = None;
    }

    /// Handle a drop on `index`. A fixed target is ignored before the payload
    /// is read; a payload that does not decode leaves the grid untouched.
    pub fn drop_payload(&mut self, index: usize, payload: &str) -> Result<bool, PayloadError> {
        self.drag_over = None;
        if self.grid.is_fixed(index) {
            return Ok(false);
        }
        let room = Room::from_drag_payload(payload)?;
        Ok(self.place(index, room))
    }

    pub fn set_search(&mut self, text: &str) {
        self.filters.search = text.to_string();
    }

    /// Select a category; values outside [`RoomCatalog::categories`] are ignored.
    pub fn set_category(&mut self, category: &str) -> bool {
        if !self.catalog.categories().iter().any(|c| c == category) {
            return false;
        }
        self.filters.category = category.to_string();
        true
    }

    pub fn toggle_chess_only(&mut self) {
        self.filters.chess_only = !self.filters.chess_only;
    }

    pub fn toggle_hide_placed_chess(&mut self) {
        self.filters.hide_placed_chess = !self.filters.hide_placed_chess;
    }

    pub fn visible_rooms(&self) -> Vec<&Room> {
        derive_view(&self.catalog, &self.filters, &self.grid)
    }

    pub fn chess_availability(&self) -> [ChessAvailability; 6] {
        chess_availability(&self.grid)
    }

    /// Snapshot of everything the page displays.
    pub fn view(&self) -> PlannerView {
        let cells = (0..GRID_CELLS)
            .map(|index| CellView {
                index,
                row: index / GRID_COLUMNS,
                column: index % GRID_COLUMNS,
                room: self.grid.occupant(index).map(CellRoomView::from_room),
                rotation: self.grid.rotation(index).degrees(),
                fixed: self.grid.is_fixed(index),
                drag_over: self.drag_over == Some(index),
            })
            .collect();

        let selected_id = self.selected_id();
        let rooms: Vec<RoomCardView> = self
            .visible_rooms()
            .into_iter()
            .map(|room| RoomCardView {
                id: room.id.clone(),
                name: room.name.clone(),
                category: room.category.clone(),
                chess: room.chess.clone().filter(|c| !c.is_empty()),
                image_url: room.image_url.clone(),
                selected: selected_id == Some(room.id.as_str()),
                placed: self.grid.contains_room(&room.id),
            })
            .collect();

        let categories = self
            .catalog
            .categories()
            .into_iter()
            .map(|value| CategoryView {
                label: capitalize(&value),
                selected: value == self.filters.category,
                value,
            })
            .collect();

        let empty_message =
            (self.load_state == LoadState::Ready && rooms.is_empty()).then_some(NO_ROOMS_MESSAGE);

        PlannerView {
            cells,
            rooms,
            categories,
            search: self.filters.search.clone(),
            chess_only: self.filters.chess_only,
            hide_placed_chess: self.filters.hide_placed_chess,
            chess: self.chess_availability(),
            load_state: self.load_state.clone(),
            empty_message,
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Render-ready description of the page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlannerView {
    pub cells: Vec<CellView>,
    pub rooms: Vec<RoomCardView>,
    pub categories: Vec<CategoryView>,
    pub search: String,
    pub chess_only: bool,
    pub hide_placed_chess: bool,
    pub chess: [ChessAvailability; 6],
    pub load_state: LoadState,
    pub empty_message: Option<&'static str>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellView {
    pub index: usize,
    pub row: usize,
    pub column: usize,
    pub room: Option<CellRoomView>,
    pub rotation: u16,
    pub fixed: bool,
    pub drag_over: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellRoomView {
    pub id: String,
    pub name: String,
    pub image_url: Option<String>,
    /// Glyph and raw chess attribute, e.g. "♜ Rook".
    pub chess_label: Option<String>,
}

impl CellRoomView {
    fn from_room(room: &Room) -> Self {
        CellRoomView {
            id: room.id.clone(),
            name: room.name.clone(),
            image_url: room.image_url.clone(),
            chess_label: room
                .chess
                .as_deref()
                .filter(|c| !c.is_empty())
                .map(|c| format!("{} {}", ChessPiece::glyph_for(c), c)),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoomCardView {
    pub id: String,
    pub name: String,
    pub category: String,
    pub chess: Option<String>,
    pub image_url: Option<String>,
    pub selected: bool,
    /// Already on the grid: shown disabled and not draggable.
    pub placed: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryView {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATA: &str = r#"{ "rooms": [
        { "id": "a", "name": "Entrance Hall", "category": "hall" },
        { "id": "b", "name": "Library", "category": "study", "chess": "Rook" },
        { "id": "c", "name": "Antechamber", "category": "hall" }
    ] }"#;

    fn loaded() -> Planner {
        let mut planner = Planner::default();
        let missing = planner.load(DATA).unwrap();
        assert!(missing.is_empty());
        planner
    }

    #[test]
    fn starts_loading_with_default_filters() {
        let planner = Planner::default();
        assert_eq!(planner.load_state(), &LoadState::Loading);
        assert_eq!(planner.filters(), &FilterState::default());
        let view = planner.view();
        assert_eq!(view.cells.len(), GRID_CELLS);
        assert_eq!(view.empty_message, None);
    }

    #[test]
    fn load_failure_keeps_catalog_empty() {
        let mut planner = Planner::default();
        assert!(planner.load(r#"{ "rooms": 3 }"#).is_err());
        assert!(planner.catalog().is_empty());
        assert!(matches!(planner.load_state(), LoadState::Failed(_)));
        assert_eq!(planner.grid().placed_count(), 0);
    }

    #[test]
    fn load_reports_missing_fixed_rooms() {
        let mut planner = Planner::default();
        let missing = planner
            .load(r#"{ "rooms": [ { "id": "x", "name": "Entrance Hall" } ] }"#)
            .unwrap();
        assert_eq!(missing, ["Antechamber"]);
        assert_eq!(planner.load_state(), &LoadState::Ready);
    }

    #[test]
    fn selecting_a_placed_room_keeps_previous_selection() {
        let mut planner = loaded();
        assert!(planner.select_room("b"));
        assert!(!planner.select_room("a"));
        assert_eq!(planner.selected_id(), Some("b"));
        assert_eq!(planner.selected().map(|r| r.name.as_str()), Some("Library"));
        assert!(!planner.select_room("nope"));
        assert_eq!(planner.selected_id(), Some("b"));
    }

    #[test]
    fn click_places_selection_then_clears_it() {
        let mut planner = loaded();
        assert!(!planner.click_cell(5));
        planner.select_room("b");
        assert!(!planner.click_cell(37));
        assert!(planner.selected().is_some());
        assert!(planner.click_cell(5));
        assert!(planner.selected().is_none());
        assert_eq!(planner.grid().occupant(5).map(|r| r.id.as_str()), Some("b"));
    }

    #[test]
    fn drag_start_refuses_placed_rooms() {
        let planner = loaded();
        assert_eq!(planner.drag_start("a"), None);
        let payload = planner.drag_start("b").unwrap();
        assert!(payload.contains("Library"));
    }

    #[test]
    fn drag_over_skips_fixed_cells() {
        let mut planner = loaded();
        assert!(!planner.drag_over(37));
        assert_eq!(planner.drag_over_index(), None);
        assert!(planner.drag_over(8));
        assert!(planner.view().cells[8].drag_over);
        planner.drag_leave();
        assert_eq!(planner.drag_over_index(), None);
    }

    #[test]
    fn drop_places_decoded_room() {
        let mut planner = loaded();
        let payload = planner.drag_start("b").unwrap();
        planner.drag_over(9);
        assert!(planner.drop_payload(9, &payload).unwrap());
        assert_eq!(planner.drag_over_index(), None);
        assert!(planner.grid().contains_room("b"));
        // Second drop of the same room elsewhere is refused.
        assert!(!planner.drop_payload(10, &payload).unwrap());
    }

    #[test]
    fn bad_drop_leaves_grid_alone() {
        let mut planner = loaded();
        let before = planner.grid().clone();
        assert!(planner.drop_payload(9, "{ nope").is_err());
        assert_eq!(planner.grid(), &before);
        // Fixed targets are ignored without even reading the payload.
        assert!(!planner.drop_payload(37, "{ nope").unwrap());
    }

    #[test]
    fn unknown_category_is_ignored() {
        let mut planner = loaded();
        assert!(planner.set_category("study"));
        assert!(!planner.set_category("garden"));
        assert_eq!(planner.filters().category, "study");
        let labels: Vec<_> = planner
            .view()
            .categories
            .iter()
            .map(|c| (c.label.clone(), c.selected))
            .collect();
        assert_eq!(
            labels,
            [
                ("All".to_string(), false),
                ("Hall".to_string(), false),
                ("Study".to_string(), true)
            ]
        );
    }

    #[test]
    fn view_marks_selected_and_placed_cards() {
        let mut planner = loaded();
        planner.select_room("b");
        let view = planner.view();
        let a = view.rooms.iter().find(|r| r.id == "a").unwrap();
        let b = view.rooms.iter().find(|r| r.id == "b").unwrap();
        assert!(a.placed && !a.selected);
        assert!(b.selected && !b.placed);
        assert!(view.cells[37].fixed);
        assert_eq!(view.cells[37].row, 7);
        assert_eq!(view.cells[37].column, 2);
    }

    #[test]
    fn empty_message_only_after_load() {
        let mut planner = loaded();
        planner.set_search("zzz");
        assert_eq!(planner.view().empty_message, Some(NO_ROOMS_MESSAGE));
        planner.set_search("");
        assert_eq!(planner.view().empty_message, None);
    }

    #[test]
    fn cell_view_shows_chess_glyph() {
        let mut planner = loaded();
        planner.select_room("b");
        planner.click_cell(0);
        let cell = &planner.view().cells[0];
        assert_eq!(
            cell.room.as_ref().and_then(|r| r.chess_label.as_deref()),
            Some("♜ Rook")
        );
    }

    #[test]
    fn reset_layout_keeps_fixed_rooms() {
        let mut planner = loaded();
        planner.select_room("b");
        planner.click_cell(0);
        planner.reset_layout();
        assert_eq!(planner.grid().placed_count(), 2);
        assert!(!planner.grid().contains_room("b"));
    }
}
