//! Module containing newtypes representing checked board [`Pos`]itions,
//! [`Row`]s, [`Col`]umns and orthagonal directions, plus the premium-square
//! table.

use crate::game::{
    board::{CELLS, COLS, ROWS},
    tile::Letter,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A multiplier applied to a tile or word when a tile is first placed
/// on a premium square.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Premium {
    /// The square doubles the value of the tile placed on it.
    DoubleLetter,
    /// The square triples the value of the tile placed on it.
    TripleLetter,
    /// The square doubles the total value of a word placed through it.
    DoubleWord,
    /// The square triples the total value of a word placed through it.
    TripleWord,
}
impl Premium {
    /// Gets the multiplier applied to the main word when it passes through
    /// a square with this bonus.
    pub fn word_multiplier(&self) -> usize {
        match self {
            Premium::DoubleLetter | Premium::TripleLetter => 1,
            Premium::DoubleWord => 2,
            Premium::TripleWord => 3,
        }
    }
    /// Gets the multiplier applied to a tile placed on a square with
    /// this bonus.
    pub fn tile_multiplier(&self) -> usize {
        match self {
            Premium::DoubleLetter => 2,
            Premium::TripleLetter => 3,
            Premium::DoubleWord | Premium::TripleWord => 1,
        }
    }
}

/// A position on the board. Ranges from `0..`[`CELLS`].
#[repr(transparent)]
#[derive(Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Serialize, Deserialize)]
pub struct Pos(usize);
impl From<usize> for Pos {
    fn from(pos: usize) -> Self {
        Self(pos % (ROWS * COLS))
    }
}
impl From<Pos> for usize {
    fn from(p: Pos) -> Self {
        p.0
    }
}
impl<R: Into<Row>, C: Into<Col>> From<(R, C)> for Pos {
    fn from((r, c): (R, C)) -> Self {
        let row = usize::from(r.into());
        let col = usize::from(c.into());

        Self(row * COLS + col)
    }
}
impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.col(), self.row())
    }
}
impl fmt::Debug for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pos({self})")
    }
}
impl Pos {
    /// Swaps the row and column of a [`Pos`]. Used to reduce a down-direction
    /// move to an across move on the transposed board.
    pub fn swap_rc(&self) -> Pos {
        let row = Row::from(usize::from(self.col()));
        let col = Col::from(usize::from(self.row()));

        Pos::from((row, col))
    }
    /// Gets the `Pos` for the start (center) square.
    pub fn start() -> Self {
        Self::from((7, 7))
    }
    /// Checks whether the `Pos` is the start square: the obligatory anchor
    /// on an empty board.
    pub fn is_start(&self) -> bool {
        *self == Self::start()
    }
    /// Gets the premium bonus of the square, if any. Pure function of the
    /// coordinates: symmetric under `(x,y) -> (14-x,14-y)` and `(x,y) ->
    /// (y,x)`, matching the canonical octant layout. The center square
    /// reports [`Premium::DoubleWord`]; callers that need to know whether
    /// a square is the obligatory first move anchor should use
    /// [`Pos::is_start`] in addition.
    pub fn premium(&self) -> Option<Premium> {
        let (row, col) = self.row_col();

        let abs_diff = |a: usize, b: usize| a.max(b) - a.min(b);

        let delta_row = abs_diff(usize::from(row), 7);
        let delta_col = abs_diff(usize::from(col), 7);

        match (delta_row, delta_col) {
            (2, 2) | (2, 6) | (6, 2) => Some(Premium::TripleLetter),
            (0, 4) | (4, 0) | (1, 1) | (1, 5) | (5, 1) | (7, 4) | (4, 7) => {
                Some(Premium::DoubleLetter)
            }
            (7, 7) | (0, 7) | (7, 0) => Some(Premium::TripleWord),
            (a, b) if a == b => Some(Premium::DoubleWord),
            _ => None,
        }
    }
    /// Gets the tuple `(tile_multiplier, word_multiplier)` for the position.
    /// Defaults to `(1, 1)` off any premium square.
    pub fn premium_multipliers(&self) -> (usize, usize) {
        match self.premium() {
            Some(bonus) => (bonus.tile_multiplier(), bonus.word_multiplier()),
            None => (1, 1),
        }
    }
    /// Gets the row number.
    pub fn row(&self) -> Row {
        Row::from((self.0 / COLS) % ROWS)
    }
    /// Gets the column number.
    pub fn col(&self) -> Col {
        Col::from(self.0 % COLS)
    }
    /// Gets the pair (row, col) for the coordinate.
    pub fn row_col(&self) -> (Row, Col) {
        (self.row(), self.col())
    }
    /// Finds the pos in the grid offset by 1 in the given direction.
    pub fn dir(&self, dir: Direction) -> Option<Self> {
        self.offset(dir, 1)
    }
    /// Finds the pos in the grid, offset by `count` in direction `dir`.
    pub fn offset(&self, dir: Direction, count: usize) -> Option<Self> {
        let (drow, dcol) = dir.vector(count);

        let (row, col) = self.row_col();

        let row = usize::from(row) as i32 + drow;
        let col = usize::from(col) as i32 + dcol;

        if (0..COLS as i32).contains(&col) && (0..ROWS as i32).contains(&row) {
            Some(Pos::from((row as usize, col as usize)))
        } else {
            None
        }
    }
    /// Returns an iterator over all board positions.
    pub fn iter() -> impl Iterator<Item = Self> {
        (0..CELLS).map(Pos::from)
    }
    /// Gets an iterator containing all positions from the current one
    /// in the given direction (inclusive of `self`).
    pub fn project(self, dir: Direction) -> impl Iterator<Item = Pos> {
        std::iter::successors(Some(self), move |pos| pos.dir(dir))
    }
}

/// A vertical coordinate from `0..=14`.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Row(usize);
impl From<usize> for Row {
    fn from(row: usize) -> Self {
        Row(row % ROWS)
    }
}
impl From<Row> for usize {
    #[inline]
    fn from(row: Row) -> Self {
        row.0
    }
}
impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl Row {
    /// The first row.
    pub fn first() -> Self {
        Row(0)
    }
    /// The last row.
    pub fn last() -> Self {
        Row(ROWS - 1)
    }
    /// Returns an iterator over all rows.
    pub fn iter() -> impl Iterator<Item = Self> {
        (0..ROWS).map(Row::from)
    }
}

/// A horizontal coordinate from `A..=O`.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Col(usize);
impl From<usize> for Col {
    fn from(col: usize) -> Self {
        Col(col % COLS)
    }
}
impl From<Col> for usize {
    #[inline]
    fn from(col: Col) -> Self {
        col.0
    }
}
impl fmt::Display for Col {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Letter::from(self.0))
    }
}
impl Col {
    /// The first column.
    pub fn first() -> Self {
        Col(0)
    }
    /// The last column.
    pub fn last() -> Self {
        Col(COLS - 1)
    }
    /// Returns an iterator over all columns.
    pub fn iter() -> impl Iterator<Item = Self> {
        (0..COLS).map(Col::from)
    }
}

/// The four orthagonal directions from a [`Pos`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Up.
    North,
    /// Right.
    East,
    /// Down.
    South,
    /// Left.
    West,
}
impl Direction {
    /// Gets a `scale`d vector in the `Direction` represented by `self`.
    pub fn vector(&self, scale: usize) -> (i32, i32) {
        let scale = scale as i32;
        match self {
            Direction::North => (-scale, 0),
            Direction::South => (scale, 0),
            Direction::West => (0, -scale),
            Direction::East => (0, scale),
        }
    }
    /// Gets the opposite direction.
    pub fn opposite(&self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }
    /// Gets the perpendicular direction.
    pub fn perpendicular(&self) -> Self {
        match self {
            Direction::East => Direction::South,
            Direction::South => Direction::East,
            Direction::North => Direction::West,
            Direction::West => Direction::North,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn premium_symmetry() {
        for x in 0..15 {
            for y in 0..15 {
                let p = Pos::from((y, x));
                let reflected = Pos::from((14 - y, 14 - x));
                let swapped = Pos::from((x, y));

                assert_eq!(p.premium(), reflected.premium());
                assert_eq!(p.premium(), swapped.premium());
            }
        }
    }

    #[test]
    fn center_is_double_word_and_start() {
        let center = Pos::start();
        assert_eq!(center.premium(), Some(Premium::DoubleWord));
        assert!(center.is_start());
    }

    #[test]
    fn corners_are_triple_word() {
        assert_eq!(Pos::from((0, 0)).premium(), Some(Premium::TripleWord));
        assert_eq!(Pos::from((0, 14)).premium(), Some(Premium::TripleWord));
        assert_eq!(Pos::from((14, 0)).premium(), Some(Premium::TripleWord));
        assert_eq!(Pos::from((14, 14)).premium(), Some(Premium::TripleWord));
    }

    #[test]
    fn quant_anchor_square_is_double_letter() {
        // (3, 7): used by the literal "QUANT" scoring scenario.
        assert_eq!(Pos::from((7, 3)).premium(), Some(Premium::DoubleLetter));
    }
}
