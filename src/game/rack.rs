//! Models a player's rack of tiles.

use crate::{
    error::{GameError, GameResult},
    game::{bag::Bag, tile::Tile},
    util::tile_counts::TileCounts,
};
use std::fmt;

/// The maximum number of tiles that can be stored on a rack.
pub const RACK_SIZE: usize = 7;

/// A multiset of up to [`RACK_SIZE`] tiles held by one player. The move
/// generator threads a single rack through its recursion, taking and
/// putting back tiles on each stack frame as it explores and backtracks.
#[derive(Debug, Clone)]
pub struct Rack {
    counts: TileCounts,
}
impl fmt::Display for Rack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for tile in self.iter() {
            write!(f, "{}", tile)?;
        }
        write!(f, "]")
    }
}
impl Rack {
    /// Creates a new rack, drawing up to [`RACK_SIZE`] tiles from `bag`.
    pub fn new(bag: &mut Bag) -> Self {
        let counts = TileCounts::from_iter(bag.draw_many(RACK_SIZE));

        Self { counts }
    }
    /// Creates a rack holding exactly the provided tiles, truncated to
    /// at most [`RACK_SIZE`] entries.
    pub fn from_tiles(tiles: &[Tile]) -> Self {
        Self {
            counts: TileCounts::from_iter(tiles.iter().take(RACK_SIZE).copied()),
        }
    }
    /// The number of tiles currently on the rack.
    pub fn count(&self) -> usize {
        self.counts.len()
    }
    /// Checks whether the rack is empty.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
    /// Checks whether the rack holds at least one of `tile`. A blank is
    /// only found in its own slot: this does not consider a blank
    /// substitutable for a requested letter. Callers that want
    /// letter-or-blank semantics should also check [`Rack::has_blank`].
    pub fn contains(&self, tile: Tile) -> bool {
        self.counts.count(tile) > 0
    }
    /// Checks whether the rack holds at least one blank tile.
    pub fn has_blank(&self) -> bool {
        self.counts.count(Tile::blank()) > 0
    }
    /// Removes one instance of `tile` from the rack. Fails if the rack
    /// does not hold `tile`.
    pub fn take(&mut self, tile: Tile) -> GameResult<()> {
        if !self.contains(tile) {
            return Err(GameError::NotInRack);
        }

        self.counts.remove(std::iter::once(tile));

        Ok(())
    }
    /// Returns `tile` to the rack. Fails if the rack is already full.
    pub fn put_back(&mut self, tile: Tile) -> GameResult<()> {
        if self.count() >= RACK_SIZE {
            return Err(GameError::RedrawCount);
        }

        self.counts.insert(std::iter::once(tile));

        Ok(())
    }
    /// Draws tiles from `bag` to bring the rack back up to
    /// [`RACK_SIZE`], if the bag has enough.
    pub fn refill(&mut self, bag: &mut Bag) {
        let missing = RACK_SIZE - self.count();
        self.counts.insert(bag.draw_many(missing).into_iter());
    }
    /// Exchanges `tiles` for fresh ones drawn from `bag`. Fails if the
    /// tiles requested are not all on the rack, or the bag lacks enough
    /// replacements.
    pub fn exchange(&mut self, tiles: &[Tile], bag: &mut Bag) -> GameResult<()> {
        if !(1..=RACK_SIZE).contains(&tiles.len()) {
            return Err(GameError::RedrawCount);
        }
        if bag.remaining() < tiles.len() {
            return Err(GameError::NotEnoughLetters);
        }
        if !self.counts.contains(tiles.iter().copied()) {
            return Err(GameError::NotInRack);
        }

        self.counts.remove(tiles.iter().copied());
        self.counts.insert(bag.draw_many(tiles.len()).into_iter());
        bag.add_tiles(tiles.iter().copied());

        Ok(())
    }
    /// Gets an iterator over the tiles on the rack.
    pub fn iter(&self) -> impl Iterator<Item = Tile> + '_ {
        self.counts.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::tile::Letter;

    #[test]
    fn take_and_put_back() {
        let a = Tile::Letter(Letter::new('A').unwrap());
        let mut rack = Rack::from_tiles(&[a, a]);

        assert!(rack.contains(a));
        rack.take(a).unwrap();
        assert_eq!(rack.count(), 1);
        rack.put_back(a).unwrap();
        assert_eq!(rack.count(), 2);
    }

    #[test]
    fn take_missing_tile_fails() {
        let a = Tile::Letter(Letter::new('A').unwrap());
        let b = Tile::Letter(Letter::new('B').unwrap());
        let mut rack = Rack::from_tiles(&[a]);

        assert!(rack.take(b).is_err());
    }

    #[test]
    fn put_back_over_capacity_fails() {
        let a = Tile::Letter(Letter::new('A').unwrap());
        let mut rack = Rack::from_tiles(&[a; 7]);

        assert!(rack.put_back(a).is_err());
    }

    #[test]
    fn blank_is_not_a_substitute_under_contains() {
        let blank = Tile::blank();
        let a = Tile::Letter(Letter::new('A').unwrap());
        let rack = Rack::from_tiles(&[blank]);

        assert!(rack.contains(blank));
        assert!(!rack.contains(a));
        assert!(rack.has_blank());
    }
}
