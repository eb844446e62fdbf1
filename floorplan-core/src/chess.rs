use crate::grid::PlacementGrid;

/// The six chess-piece kinds a room can carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChessPiece {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
}

impl ChessPiece {
    /// Display order of the availability strip.
    pub const ALL: [ChessPiece; 6] = [
        ChessPiece::King,
        ChessPiece::Queen,
        ChessPiece::Rook,
        ChessPiece::Bishop,
        ChessPiece::Knight,
        ChessPiece::Pawn,
    ];

    /// Case-insensitive lookup; anything else, padded text included, is not
    /// a piece.
    pub fn parse_kind(raw: &str) -> Option<Self> {
        let key = raw.to_lowercase();
        Self::ALL.into_iter().find(|p| p.key() == key)
    }

    pub fn key(self) -> &'static str {
        match self {
            ChessPiece::King => "king",
            ChessPiece::Queen => "queen",
            ChessPiece::Rook => "rook",
            ChessPiece::Bishop => "bishop",
            ChessPiece::Knight => "knight",
            ChessPiece::Pawn => "pawn",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ChessPiece::King => "King",
            ChessPiece::Queen => "Queen",
            ChessPiece::Rook => "Rook",
            ChessPiece::Bishop => "Bishop",
            ChessPiece::Knight => "Knight",
            ChessPiece::Pawn => "Pawn",
        }
    }

    pub fn symbol(self) -> char {
        const SYMBOLS: [char; 6] = [
            '♚', // king
            '♛', // queen
            '♜', // rook
            '♝', // bishop
            '♞', // knight
            '♟', // pawn
        ];
        SYMBOLS[self as usize]
    }

    /// Glyph shown on a grid cell. Unrecognized kinds still get the pawn.
    pub fn glyph_for(raw: &str) -> char {
        Self::parse_kind(raw).unwrap_or(ChessPiece::Pawn).symbol()
    }
}

/// Whether at least one room carrying `piece` is on the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChessAvailability {
    pub piece: ChessPiece,
    pub symbol: char,
    pub available: bool,
}

/// Scan the grid and report each of the six kinds in fixed order.
pub fn chess_availability(grid: &PlacementGrid) -> [ChessAvailability; 6] {
    let mut counts = [0usize; 6];
    for (_, room) in grid.occupied() {
        if let Some(piece) = room.chess_piece() {
            counts[piece as usize] += 1;
        }
    }
    ChessPiece::ALL.map(|piece| ChessAvailability {
        piece,
        symbol: piece.symbol(),
        available: counts[piece as usize] > 0,
    })
}
