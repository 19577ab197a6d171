//! Models the bag of undrawn tiles.

use crate::{
    error::{GameError, GameResult},
    game::tile::Tile,
    util::tile_counts::TileCounts,
};
use rand::Rng;
use std::iter::once;

/// The initial multiset of 100 tiles, drawn from in an unspecified order
/// for production play; [`Bag::from_sequence`] offers a deterministic
/// alternative for tests that must reproduce historical draws.
#[derive(Debug)]
pub struct Bag {
    counts: TileCounts,
    /// When set, draws come off the front of this queue instead of being
    /// chosen at random. Used to replay recorded games tile-for-tile.
    fixed_sequence: Option<Vec<Tile>>,
}
impl Default for Bag {
    fn default() -> Self {
        let mut counts = [0; 27];
        for (idx, tile) in Tile::iter().enumerate() {
            counts[idx] = Self::initial_count(tile);
        }

        Self {
            counts: TileCounts::from(counts),
            fixed_sequence: None,
        }
    }
}
impl Bag {
    /// Creates a bag that draws tiles from `sequence` in order rather
    /// than at random, for deterministic test-mode draws.
    pub fn from_sequence(sequence: Vec<Tile>) -> Self {
        let counts = TileCounts::from_iter(sequence.iter().copied());

        Self {
            counts,
            fixed_sequence: Some(sequence),
        }
    }
    /// Checks whether the bag is empty.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
    /// Returns the number of tiles remaining in the bag.
    pub fn remaining(&self) -> usize {
        self.counts.len()
    }
    /// Gets the initial count for `tile` in the standard distribution.
    pub fn initial_count(tile: Tile) -> usize {
        const INIT_COUNTS: [usize; 27] = [
            9,  // A
            2,  // B
            2,  // C
            4,  // D
            12, // E
            2,  // F
            3,  // G
            2,  // H
            9,  // I
            1,  // J
            1,  // K
            4,  // L
            2,  // M
            6,  // N
            8,  // O
            2,  // P
            1,  // Q
            6,  // R
            4,  // S
            6,  // T
            4,  // U
            2,  // V
            2,  // W
            1,  // X
            2,  // Y
            1,  // Z
            2,  // Blank
        ];

        INIT_COUNTS[usize::from(tile)]
    }
    /// Draws a single tile from the bag. Fails if the bag is empty.
    pub fn draw(&mut self) -> GameResult<Tile> {
        if let Some(sequence) = &mut self.fixed_sequence {
            return match sequence.is_empty() {
                true => Err(GameError::NotEnoughLetters),
                false => {
                    let tile = sequence.remove(0);
                    self.counts.remove(once(tile));
                    Ok(tile)
                }
            };
        }

        match self.remaining() {
            0 => Err(GameError::NotEnoughLetters),
            len => {
                let idx = rand::thread_rng().gen_range(0..len);

                let mut tile_idx = 0;
                let mut count = self.counts.count(tile_idx);

                while count <= idx {
                    tile_idx += 1;
                    count += self.counts.count(tile_idx);
                }

                let tile = Tile::from(tile_idx);
                self.counts.remove(once(tile));

                Ok(tile)
            }
        }
    }
    /// Draws up to `count` tiles, stopping early if the bag empties.
    pub fn draw_many(&mut self, count: usize) -> Vec<Tile> {
        (0..count).map_while(|_| self.draw().ok()).collect()
    }
    /// Returns tiles to the bag, for example after an exchange.
    pub fn add_tiles(&mut self, tiles: impl Iterator<Item = Tile>) {
        let tiles: Vec<_> = tiles.collect();
        self.counts.insert(tiles.iter().copied());

        if let Some(sequence) = &mut self.fixed_sequence {
            sequence.splice(0..0, tiles);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::tile::Letter;

    #[test]
    fn draws_all_hundred_tiles() {
        let mut bag = Bag::default();
        let mut drawn = 0;

        while !bag.is_empty() {
            bag.draw().unwrap();
            drawn += 1;
        }

        assert_eq!(drawn, 100);
        assert!(bag.draw().is_err());
    }

    #[test]
    fn fixed_sequence_is_deterministic() {
        let q = Tile::Letter(Letter::new('Q').unwrap());
        let z = Tile::Letter(Letter::new('Z').unwrap());
        let mut bag = Bag::from_sequence(vec![q, z]);

        assert_eq!(bag.draw().unwrap(), q);
        assert_eq!(bag.draw().unwrap(), z);
        assert!(bag.draw().is_err());
    }
}
