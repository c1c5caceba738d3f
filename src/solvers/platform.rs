//! A tilting platform of rolling rocks.
//!
//! The grid holds round rocks (`O`) that roll when the platform is tilted,
//! cube rocks (`#`) that stay put, and empty space (`.`). A spin cycle tilts
//! north, west, south, then east. After enough spins the arrangement settles
//! into a loop, which [`Platform::spin_load`] exploits to answer for a
//! billion spins.
//!
//! ```text
//!   O....#....        OOOO.#.O..
//!   O.OO#....#        OO..#....#
//!   .....##...  tilt  OO..O##..O
//!   OO.#O....O  ───▶  O..#.OO...
//!   .O.....O#.  north ........#.
//!   ...                ...
//! ```

use std::fmt;
use std::str::FromStr;

use crate::cycle::{Acceleration, CycleAccelerator, RoundRobin};
use crate::error::ParseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tile {
    Empty,
    Round,
    Cube,
}

impl Tile {
    fn from_char(c: char) -> Option<Self> {
        match c {
            '.' => Some(Tile::Empty),
            'O' => Some(Tile::Round),
            '#' => Some(Tile::Cube),
            _ => None,
        }
    }

    fn as_char(self) -> char {
        match self {
            Tile::Empty => '.',
            Tile::Round => 'O',
            Tile::Cube => '#',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    West,
    South,
    East,
}

impl Direction {
    /// Tilt order of one spin cycle.
    pub const SPIN: [Direction; 4] = [
        Direction::North,
        Direction::West,
        Direction::South,
        Direction::East,
    ];
}

/// Row-major grid of tiles.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Platform {
    tiles: Vec<Tile>,
    width: usize,
    height: usize,
}

impl Platform {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn tile(&self, x: usize, y: usize) -> Option<Tile> {
        if x < self.width && y < self.height {
            Some(self.tiles[y * self.width + x])
        } else {
            None
        }
    }

    /// Returns a copy tilted towards `direction`.
    pub fn tilted(&self, direction: Direction) -> Self {
        let mut next = self.clone();
        next.tilt(direction);
        next
    }

    /// Rolls every round rock as far towards `direction` as it goes.
    pub fn tilt(&mut self, direction: Direction) {
        let (lanes, lane_len) = match direction {
            Direction::North | Direction::South => (self.width, self.height),
            Direction::West | Direction::East => (self.height, self.width),
        };
        for lane in 0..lanes {
            // Position along the lane, counted from the edge being tilted
            // towards, where the next round rock comes to rest.
            let mut rest = 0;
            for pos in 0..lane_len {
                let idx = self.index(direction, lane, pos);
                match self.tiles[idx] {
                    Tile::Cube => rest = pos + 1,
                    Tile::Round => {
                        if rest != pos {
                            let target = self.index(direction, lane, rest);
                            self.tiles[target] = Tile::Round;
                            self.tiles[idx] = Tile::Empty;
                        }
                        rest += 1;
                    },
                    Tile::Empty => {},
                }
            }
        }
    }

    /// Applies one full spin cycle.
    pub fn spin(&mut self) {
        for direction in Direction::SPIN {
            self.tilt(direction);
        }
    }

    /// Sum over round rocks of their distance from the south edge, counting
    /// the southmost row as 1.
    pub fn north_load(&self) -> u64 {
        self.tiles
            .iter()
            .enumerate()
            .filter(|(_, tile)| **tile == Tile::Round)
            .map(|(idx, _)| (self.height - idx / self.width) as u64)
            .sum()
    }

    /// Indices of round rocks. Cube rocks never move, so this identifies a
    /// platform among the states reachable from it by tilting.
    pub fn round_rocks(&self) -> Vec<usize> {
        self.tiles
            .iter()
            .enumerate()
            .filter(|(_, tile)| **tile == Tile::Round)
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Resolves the platform after `tilts` single tilts in spin order,
    /// starting with north.
    pub fn after_tilts(&self, tilts: u64) -> Acceleration<Platform> {
        let rotation = RoundRobin::new(|p: &Platform| p.tilted(Direction::North))
            .then(|p: &Platform| p.tilted(Direction::West))
            .then(|p: &Platform| p.tilted(Direction::South))
            .then(|p: &Platform| p.tilted(Direction::East));
        let outcome =
            CycleAccelerator::new(rotation, Platform::round_rocks).run(self.clone(), tilts);
        if let Some(cycle) = outcome.cycle() {
            tracing::debug!(
                first_occurrence = cycle.first_occurrence(),
                period = cycle.period(),
                tilts,
                "platform settled into a loop"
            );
        }
        outcome
    }

    /// North load after `cycles` full spin cycles.
    pub fn spin_load(&self, cycles: u32) -> u64 {
        self.after_tilts(u64::from(cycles) * 4).state().north_load()
    }

    #[inline]
    fn index(&self, direction: Direction, lane: usize, pos: usize) -> usize {
        match direction {
            Direction::North => pos * self.width + lane,
            Direction::South => (self.height - 1 - pos) * self.width + lane,
            Direction::West => lane * self.width + pos,
            Direction::East => lane * self.width + (self.width - 1 - pos),
        }
    }
}

impl FromStr for Platform {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tiles = Vec::new();
        let mut width = 0;
        let mut height = 0;
        for (index, line) in s.trim_end().lines().enumerate() {
            let line_no = index + 1;
            let line = line.trim_end();
            if line.is_empty() {
                return Err(ParseError::new(line_no, "blank line inside platform"));
            }
            let before = tiles.len();
            for c in line.chars() {
                let tile = Tile::from_char(c)
                    .ok_or_else(|| ParseError::new(line_no, format!("invalid tile {c:?}")))?;
                tiles.push(tile);
            }
            let row_width = tiles.len() - before;
            if height == 0 {
                width = row_width;
            } else if row_width != width {
                return Err(ParseError::new(
                    line_no,
                    format!("row has {row_width} tiles, expected {width}"),
                ));
            }
            height += 1;
        }
        if height == 0 {
            return Err(ParseError::new(0, "empty platform"));
        }
        Ok(Self {
            tiles,
            width,
            height,
        })
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.tiles.chunks(self.width).enumerate() {
            if y > 0 {
                f.write_str("\n")?;
            }
            for tile in row {
                write!(f, "{}", tile.as_char())?;
            }
        }
        Ok(())
    }
}
