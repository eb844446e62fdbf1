use std::str::FromStr;

use crate::catalog::{Room, RoomCatalog};

pub const GRID_COLUMNS: usize = 5;
pub const GRID_ROWS: usize = 8;
pub const GRID_CELLS: usize = GRID_COLUMNS * GRID_ROWS;

/// Cells seeded at load time and locked afterwards: (cell index, room name).
/// 37 is the bottom-middle cell, 2 the top-middle one.
pub const DEFAULT_FIXED_CELLS: [(usize, &str); 2] = [(37, "Entrance Hall"), (2, "Antechamber")];

/// A grid position reserved for a named room.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FixedCell {
    pub index: usize,
    pub name: String,
}

impl FixedCell {
    pub fn new(index: usize, name: impl Into<String>) -> Self {
        FixedCell {
            index,
            name: name.into(),
        }
    }

    pub fn defaults() -> Vec<FixedCell> {
        DEFAULT_FIXED_CELLS
            .iter()
            .map(|&(index, name)| FixedCell::new(index, name))
            .collect()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RotateDirection {
    Left,
    Right,
}

impl FromStr for RotateDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(RotateDirection::Left),
            "right" => Ok(RotateDirection::Right),
            other => Err(format!("unknown rotation direction '{other}'")),
        }
    }
}

/// Quarter-turn rotation of a placed room, always one of 0/90/180/270.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rotation(u16);

impl Rotation {
    pub const ZERO: Rotation = Rotation(0);

    pub fn from_degrees(deg: u16) -> Option<Self> {
        matches!(deg, 0 | 90 | 180 | 270).then_some(Rotation(deg))
    }

    pub fn degrees(self) -> u16 {
        self.0
    }

    pub fn rotated(self, direction: RotateDirection) -> Self {
        let step: i32 = match direction {
            RotateDirection::Left => -90,
            RotateDirection::Right => 90,
        };
        // -90 lands on 270.
        Rotation((i32::from(self.0) + step).rem_euclid(360) as u16)
    }
}

/// The 5×8 board: one optional room and one rotation per cell.
///
/// A room id occupies at most one cell, and fixed cells only ever change
/// through [`PlacementGrid::seed_fixed_cells`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlacementGrid {
    cells: [Option<Room>; GRID_CELLS],
    rotations: [Rotation; GRID_CELLS],
    fixed: Vec<FixedCell>,
}

impl Default for PlacementGrid {
    fn default() -> Self {
        PlacementGrid::new(FixedCell::defaults())
    }
}

impl PlacementGrid {
    pub fn new(fixed: Vec<FixedCell>) -> Self {
        PlacementGrid {
            cells: std::array::from_fn(|_| None),
            rotations: [Rotation::ZERO; GRID_CELLS],
            fixed,
        }
    }

    pub fn fixed_cells(&self) -> &[FixedCell] {
        &self.fixed
    }

    pub fn is_fixed(&self, index: usize) -> bool {
        self.fixed.iter().any(|f| f.index == index)
    }

    fn is_editable(&self, index: usize) -> bool {
        index < GRID_CELLS && !self.is_fixed(index)
    }

    pub fn occupant(&self, index: usize) -> Option<&Room> {
        self.cells.get(index).and_then(Option::as_ref)
    }

    pub fn rotation(&self, index: usize) -> Rotation {
        self.rotations.get(index).copied().unwrap_or_default()
    }

    pub fn contains_room(&self, id: &str) -> bool {
        self.cells.iter().flatten().any(|r| r.id == id)
    }

    /// Occupied cells with their index, in grid order.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, &Room)> {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(i, c)| c.as_ref().map(|r| (i, r)))
    }

    pub fn placed_count(&self) -> usize {
        self.cells.iter().flatten().count()
    }

    /// Put `room` at `index`, replacing any previous occupant.
    /// Returns false (and changes nothing) for fixed or out-of-range cells
    /// and for rooms already on the grid.
    pub fn place(&mut self, index: usize, room: Room) -> bool {
        if !self.is_editable(index) || self.contains_room(&room.id) {
            return false;
        }
        self.cells[index] = Some(room);
        true
    }

    /// Empty a cell and reset its rotation.
    pub fn remove(&mut self, index: usize) -> bool {
        if !self.is_editable(index) {
            return false;
        }
        self.cells[index] = None;
        self.rotations[index] = Rotation::ZERO;
        true
    }

    pub fn rotate(&mut self, index: usize, direction: RotateDirection) -> bool {
        if !self.is_editable(index) {
            return false;
        }
        self.rotations[index] = self.rotations[index].rotated(direction);
        true
    }

    /// Empty every editable cell; fixed cells keep their rooms.
    pub fn clear(&mut self) {
        for index in 0..GRID_CELLS {
            self.remove(index);
        }
    }

    /// Assign the fixed cells from the catalog by exact name.
    /// Returns the names that had no matching room.
    pub fn seed_fixed_cells(&mut self, catalog: &RoomCatalog) -> Vec<String> {
        let mut missing = Vec::new();
        for fixed in &self.fixed {
            match catalog.find_by_name(&fixed.name) {
                Some(room) if fixed.index < GRID_CELLS => {
                    self.cells[fixed.index] = Some(room.clone());
                }
                _ => missing.push(fixed.name.clone()),
            }
        }
        missing
    }
}
