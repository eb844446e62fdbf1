//! Room catalog, placement grid and filtering rules for the floorplan builder.
//!
//! Everything here is plain data and synchronous functions; the browser crate
//! owns one [`Planner`] and re-renders from [`Planner::view`] after every
//! mutation.

pub mod catalog;
pub mod chess;
pub mod error;
pub mod filter;
pub mod grid;
pub mod planner;
pub mod theme;

pub use catalog::{Room, RoomCatalog};
pub use chess::{ChessAvailability, ChessPiece, chess_availability};
pub use error::{CatalogError, PayloadError};
pub use filter::{ALL_CATEGORIES, FilterState, derive_view, placed_chess_kinds};
pub use grid::{
    DEFAULT_FIXED_CELLS, FixedCell, GRID_CELLS, GRID_COLUMNS, GRID_ROWS, PlacementGrid,
    RotateDirection, Rotation,
};
pub use planner::{
    CategoryView, CellRoomView, CellView, LoadState, Planner, PlannerView, RoomCardView,
};
pub use theme::Theme;
