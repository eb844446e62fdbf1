/// Element ids the host page provides.
pub const GRID_ID: &str = "grid";
pub const ROOM_CARDS_ID: &str = "roomCards";
pub const CATEGORIES_ID: &str = "categories";
pub const SEARCH_ID: &str = "search";
pub const CHESS_ONLY_ID: &str = "chessFilter";
pub const HIDE_PLACED_CHESS_ID: &str = "duplicateChessPieceFilter";
pub const CHESS_PIECES_ID: &str = "chessPieces";
pub const THEME_TOGGLE_ID: &str = "themeToggle";
pub const RESET_LAYOUT_ID: &str = "resetLayout";

/// Room data path relative to the base URL; `?rooms=` overrides it.
pub const DEFAULT_CATALOG_PATH: &str = "roomdata.json";
pub const CATALOG_QUERY_PARAM: &str = "rooms";

/// Transfer format carrying a serialized room during drag-and-drop.
pub const DRAG_FORMAT: &str = "application/json";

/// localStorage key of the explicit theme choice.
pub const THEME_KEY: &str = "theme";
pub const DARK_SCHEME_QUERY: &str = "(prefers-color-scheme: dark)";
