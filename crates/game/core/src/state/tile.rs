/// Immutable terrain under a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TerrainKind {
    /// Unexplored space outside the level's walls; also pads ragged rows.
    #[default]
    Blank,
    StoneWall,
    DirtFloor,
    /// Placeholder for tiles whose terrain is hidden under a door, stair or
    /// start glyph. Resolved at load time and never present afterwards.
    Pending,
}

impl TerrainKind {
    /// Map-file glyph for this terrain.
    pub const fn glyph(self) -> char {
        match self {
            TerrainKind::Blank => ' ',
            TerrainKind::StoneWall => '#',
            TerrainKind::DirtFloor => '.',
            TerrainKind::Pending => '?',
        }
    }

    pub const fn is_solid(self) -> bool {
        matches!(self, TerrainKind::StoneWall | TerrainKind::Blank)
    }
}

/// Mutable furniture layered over terrain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Overlay {
    #[default]
    None,
    ClosedDoor,
    OpenDoor,
    UpStair,
    DownStair,
}

impl Overlay {
    pub const fn glyph(self) -> Option<char> {
        match self {
            Overlay::None => None,
            Overlay::ClosedDoor => Some('|'),
            Overlay::OpenDoor => Some('/'),
            Overlay::UpStair => Some('u'),
            Overlay::DownStair => Some('d'),
        }
    }
}

/// A single grid cell: terrain, furniture, and line-of-sight flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tile {
    pub terrain: TerrainKind,
    pub overlay: Overlay,
    /// Inside the player's line of sight this turn.
    pub visible: bool,
    /// Observed at least once. Never cleared.
    pub seen: bool,
}

impl Tile {
    pub const BLANK: Self = Self::new(TerrainKind::Blank, Overlay::None);

    pub const fn new(terrain: TerrainKind, overlay: Overlay) -> Self {
        Self {
            terrain,
            overlay,
            visible: false,
            seen: false,
        }
    }

    /// Glyph a renderer would draw: the overlay if any, else the terrain.
    pub fn glyph(&self) -> char {
        self.overlay.glyph().unwrap_or(self.terrain.glyph())
    }

    /// Marks the tile as lit this turn. Sets `seen` as a side effect.
    pub fn reveal(&mut self) {
        self.visible = true;
        self.seen = true;
    }
}
