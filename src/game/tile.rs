//! Module modelling the alphabet and the tiles drawn from the bag.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::{self, Display, Formatter};

/// A letter `A..=Z`. Represented as a newtype containing an unsigned
/// integer from `0..=25` to make game operations easier.
#[derive(Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Letter(#[serde(deserialize_with = "deserialize_letter")] u8);

/// Custom deserializer that ensures that deserialized letter values
/// are valid.
fn deserialize_letter<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    match u8::deserialize(deserializer)? {
        byte @ 0..=25 => Ok(byte),
        _ => Err(serde::de::Error::custom("byte out of letter range")),
    }
}

impl Letter {
    /// Creates a new letter from a `char`, returns [`None`] if `ch` is
    /// not in the latin alphabet.
    pub fn new(ch: char) -> Option<Self> {
        match ch {
            'a'..='z' => Some(Letter(ch as u8 - b'a')),
            'A'..='Z' => Some(Letter(ch as u8 - b'A')),
            _ => None,
        }
    }
    /// Returns an iterator over all 26 letters.
    pub fn iter() -> impl Iterator<Item = Letter> {
        (0..26).map(Letter::from)
    }
    /// The base point value of the letter, ignoring any multipliers.
    pub fn points(&self) -> usize {
        const LETTER_POINTS: [usize; 26] = [
            1, 3, 3, 2, 1, 4, 2, 4, 1, 8, 5, 1, 3, 1, 1, 3, 10, 1, 1, 1, 1, 4, 4, 8, 4, 10,
        ];

        LETTER_POINTS[usize::from(*self)]
    }
}
impl From<usize> for Letter {
    fn from(v: usize) -> Self {
        Self((v as u8) % 26)
    }
}
impl From<Letter> for usize {
    fn from(letter: Letter) -> Self {
        letter.0 as usize
    }
}
impl From<Letter> for char {
    fn from(letter: Letter) -> Self {
        (letter.0 + b'A') as char
    }
}
impl Display for Letter {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", char::from(*self))
    }
}
impl fmt::Debug for Letter {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "'{}'", char::from(*self))
    }
}

/// A scrabble tile: one of the 26 letters, or a blank that may stand
/// in for any letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tile {
    /// The tile is a letter (A..=Z).
    Letter(Letter),
    /// The tile is a blank. Once played it designates a letter for
    /// lexicon purposes but always scores zero points.
    Blank(Option<Letter>),
}
impl From<Letter> for Tile {
    fn from(letter: Letter) -> Self {
        Self::Letter(letter)
    }
}
impl From<Option<Letter>> for Tile {
    fn from(op: Option<Letter>) -> Self {
        Self::Blank(op)
    }
}
impl From<Tile> for usize {
    fn from(tile: Tile) -> Self {
        match tile {
            Tile::Letter(Letter(num)) => num as usize,
            Tile::Blank(_) => 26,
        }
    }
}
impl From<usize> for Tile {
    fn from(tile: usize) -> Self {
        match tile {
            0..=25 => Tile::Letter(Letter::from(tile)),
            _ => Tile::Blank(None),
        }
    }
}
impl From<char> for Tile {
    fn from(ch: char) -> Tile {
        match Letter::new(ch) {
            Some(letter) => Tile::Letter(letter),
            None => Tile::Blank(None),
        }
    }
}
impl Display for Tile {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Tile::Letter(l) => write!(f, " {} ", l),
            Tile::Blank(Some(l)) => write!(f, "({})", l),
            Tile::Blank(None) => write!(f, "( )"),
        }
    }
}
impl Tile {
    /// Checks whether `self` is a blank tile.
    pub fn is_blank(&self) -> bool {
        matches!(self, Tile::Blank(_))
    }
    /// A fresh, undesignated blank tile.
    pub fn blank() -> Tile {
        Tile::Blank(None)
    }
    /// Gets the letter this tile stands for on the board. A blank that
    /// has not been assigned a letter has none.
    pub fn letter(&self) -> Option<Letter> {
        match self {
            Tile::Letter(l) => Some(*l),
            Tile::Blank(opt) => *opt,
        }
    }
    /// Returns an iterator over all 27 tiles (26 letters + the blank).
    pub fn iter() -> impl Iterator<Item = Tile> {
        (0..27).map(Tile::from)
    }
    /// The point value of the tile. Blanks are always worth zero,
    /// regardless of the letter they have been designated as.
    pub fn score(&self) -> usize {
        match self {
            Tile::Letter(l) => l.points(),
            Tile::Blank(_) => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letter_roundtrip() {
        for letter in Letter::iter() {
            let ch = char::from(letter);
            assert_eq!(Letter::new(ch), Some(letter));
        }
    }

    #[test]
    fn blank_scores_zero() {
        assert_eq!(Tile::Blank(Some(Letter::new('Q').unwrap())).score(), 0);
        assert_eq!(Tile::Letter(Letter::new('Q').unwrap()).score(), 10);
    }

    #[test]
    fn tile_points_match_official_distribution() {
        let expected = [
            ('A', 1),
            ('B', 3),
            ('C', 3),
            ('D', 2),
            ('E', 1),
            ('F', 4),
            ('G', 2),
            ('H', 4),
            ('I', 1),
            ('J', 8),
            ('K', 5),
            ('L', 1),
            ('M', 3),
            ('N', 1),
            ('O', 1),
            ('P', 3),
            ('Q', 10),
            ('R', 1),
            ('S', 1),
            ('T', 1),
            ('U', 1),
            ('V', 4),
            ('W', 4),
            ('X', 8),
            ('Y', 4),
            ('Z', 10),
        ];

        for (ch, points) in expected {
            assert_eq!(Letter::new(ch).unwrap().points(), points);
        }
    }
}
