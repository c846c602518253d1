//! Maze model: wall segments and collectibles compiled from a symbolic layout
//!
//! Each character of the layout is one 30x30 tile. Wall characters become
//! [`WallSegment`]s (the character only picks the sprite variant), `.` becomes
//! a pellet and `P` a power-up centered on the tile.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::MazeError;
use crate::{tile_center, tile_origin};

/// The fixed classic layout
#[rustfmt::skip]
pub const CLASSIC_LAYOUT: [&str; MAZE_ROWS] = [
    "5========c========6",
    "|P.......|........|",
    "|.12.1-2.|.1-2.12.|",
    "|.43.4_3.U.4_3.43.|",
    "|.................|",
    "|.[].^.[=c=].^.[].|",
    "|....|...|...|...P|",
    "{--2.b=] U [=d.1--}",
    "{  }.|       |.{  }",
    "4__3.U ##### U.4__3",
    ".....  <   >  .....",
    "1--2.^ ##### ^.1--2",
    "{  }.|       |.{  }",
    "{__3.U [=c=] U.4__}",
    "|.......P|........|",
    "|.[6.[=].U.[=].5].|",
    "|..|..... .....|..|",
    "b].U.^.[=c=].^.U.[d",
    "|....|...|...|....|",
    "|.[==a=].U.[=a==].|",
    "|................P|",
    "8=================7",
];

/// Sprite variant of a wall tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WallShape {
    EdgeTop,
    EdgeBottom,
    EdgeLeft,
    EdgeRight,
    GateTop,
    GateLeft,
    GateRight,
    PipeHorizontal,
    PipeVertical,
    /// Inner corners 1-4 (clockwise from top-left)
    Corner(u8),
    /// Outer pipe corners 1-4 (clockwise from top-left)
    PipeCorner(u8),
    Block,
    BlockFill,
    CapLeft,
    CapRight,
    CapTop,
    CapBottom,
    PipeCross,
    ConnectorTop,
    ConnectorRight,
    ConnectorBottom,
    ConnectorLeft,
}

/// What a layout character compiles to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Wall(WallShape),
    Pellet,
    PowerUp,
    Empty,
}

impl Tile {
    /// Map a layout character to its tile
    pub fn from_code(code: char) -> Option<Tile> {
        use WallShape::*;
        let shape = match code {
            '.' => return Some(Tile::Pellet),
            'P' => return Some(Tile::PowerUp),
            ' ' => return Some(Tile::Empty),
            '-' => EdgeTop,
            '_' => EdgeBottom,
            '{' => EdgeLeft,
            '}' => EdgeRight,
            '/' => GateTop,
            '<' => GateLeft,
            '>' => GateRight,
            '=' => PipeHorizontal,
            '|' => PipeVertical,
            '1'..='4' => Corner(code as u8 - b'0'),
            '5'..='8' => PipeCorner(code as u8 - b'4'),
            'o' => Block,
            '#' => BlockFill,
            '[' => CapLeft,
            ']' => CapRight,
            '^' => CapTop,
            'U' => CapBottom,
            '+' => PipeCross,
            'a' => ConnectorTop,
            'b' => ConnectorRight,
            'c' => ConnectorBottom,
            'd' => ConnectorLeft,
            _ => return None,
        };
        Some(Tile::Wall(shape))
    }

    /// Layout character for a tile (inverse of [`Tile::from_code`])
    pub fn code(self) -> char {
        use WallShape::*;
        match self {
            Tile::Pellet => '.',
            Tile::PowerUp => 'P',
            Tile::Empty => ' ',
            Tile::Wall(shape) => match shape {
                EdgeTop => '-',
                EdgeBottom => '_',
                EdgeLeft => '{',
                EdgeRight => '}',
                GateTop => '/',
                GateLeft => '<',
                GateRight => '>',
                PipeHorizontal => '=',
                PipeVertical => '|',
                Corner(n) => (b'0' + n) as char,
                PipeCorner(n) => (b'4' + n) as char,
                Block => 'o',
                BlockFill => '#',
                CapLeft => '[',
                CapRight => ']',
                CapTop => '^',
                CapBottom => 'U',
                PipeCross => '+',
                ConnectorTop => 'a',
                ConnectorRight => 'b',
                ConnectorBottom => 'c',
                ConnectorLeft => 'd',
            },
        }
    }
}

/// An axis-aligned wall rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallSegment {
    /// Top-left corner
    pub position: Vec2,
    pub width: f32,
    pub height: f32,
    pub shape: WallShape,
}

impl WallSegment {
    pub fn at_tile(col: usize, row: usize, shape: WallShape) -> Self {
        Self {
            position: tile_origin(col, row),
            width: TILE_SIZE,
            height: TILE_SIZE,
            shape,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.position + Vec2::new(self.width, self.height) / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectibleKind {
    Pellet,
    PowerUp,
}

/// A pellet or power-up lying on the maze floor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Collectible {
    pub position: Vec2,
    pub radius: f32,
    pub kind: CollectibleKind,
}

impl Collectible {
    pub fn pellet(position: Vec2) -> Self {
        Self {
            position,
            radius: PELLET_RADIUS,
            kind: CollectibleKind::Pellet,
        }
    }

    pub fn power_up(position: Vec2) -> Self {
        Self {
            position,
            radius: POWER_UP_RADIUS,
            kind: CollectibleKind::PowerUp,
        }
    }
}

/// Compiled maze: static walls plus the collectibles still on the floor
#[derive(Debug, Clone, Default)]
pub struct Maze {
    pub cols: usize,
    pub rows: usize,
    pub walls: Vec<WallSegment>,
    pub pellets: Vec<Collectible>,
    pub power_ups: Vec<Collectible>,
    /// Row-major wall mask
    solid: Vec<bool>,
}

impl Maze {
    /// Compile a symbolic layout
    pub fn parse(layout: &[&str]) -> Result<Maze, MazeError> {
        let first = layout.first().ok_or(MazeError::Empty)?;
        let cols = first.chars().count();
        let mut maze = Maze {
            cols,
            rows: layout.len(),
            ..Default::default()
        };
        maze.solid.reserve(cols * layout.len());

        for (row, line) in layout.iter().enumerate() {
            let found = line.chars().count();
            if found != cols {
                return Err(MazeError::RaggedRow {
                    row,
                    expected: cols,
                    found,
                });
            }

            for (col, code) in line.chars().enumerate() {
                let tile =
                    Tile::from_code(code).ok_or(MazeError::UnknownTile { code, row, col })?;
                maze.solid.push(matches!(tile, Tile::Wall(_)));
                match tile {
                    Tile::Wall(shape) => maze.walls.push(WallSegment::at_tile(col, row, shape)),
                    Tile::Pellet => maze.pellets.push(Collectible::pellet(tile_center(col, row))),
                    Tile::PowerUp => maze
                        .power_ups
                        .push(Collectible::power_up(tile_center(col, row))),
                    Tile::Empty => {}
                }
            }
        }

        Ok(maze)
    }

    /// The fixed classic maze
    pub fn classic() -> Maze {
        match Self::parse(&CLASSIC_LAYOUT) {
            Ok(maze) => maze,
            Err(e) => {
                log::error!("Built-in layout failed to compile: {}", e);
                Maze::default()
            }
        }
    }

    /// Playfield size in pixels
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.cols as f32 * TILE_SIZE, self.rows as f32 * TILE_SIZE)
    }

    /// Tile (column, row) containing a point, if inside the field
    pub fn tile_at(&self, point: Vec2) -> Option<(usize, usize)> {
        if point.x < 0.0 || point.y < 0.0 {
            return None;
        }
        let col = (point.x / TILE_SIZE) as usize;
        let row = (point.y / TILE_SIZE) as usize;
        (col < self.cols && row < self.rows).then_some((col, row))
    }

    /// Whether (column, row) is inside the field and not a wall
    pub fn is_open(&self, col: usize, row: usize) -> bool {
        col < self.cols && row < self.rows && !self.solid[row * self.cols + col]
    }

    /// True once every pellet has been eaten
    pub fn is_cleared(&self) -> bool {
        self.pellets.is_empty()
    }
}
