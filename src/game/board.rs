//! Models the 15 by 15 crossword board.

use crate::{
    error::{GameError, GameResult},
    game::{rack::RACK_SIZE, tile::Tile},
    lexicon::WordJudge,
    util::{self, bitboard::BitBoard, pos::Pos},
};
use std::fmt;

/// The number of rows on the board.
pub const ROWS: usize = 15;
/// The number of columns on the board.
pub const COLS: usize = 15;
/// The number of squares on the board.
pub const CELLS: usize = ROWS * COLS;

/// Represents the 15 x 15 board, storing the location of tiles and
/// the bitboard occupancy used by the anchor search and scoring engine.
#[derive(Clone, Debug)]
pub struct Board {
    grid: [Option<Tile>; CELLS],
    /// Occupancy in the natural, row-major orientation. Used to find
    /// horizontal anchors and words.
    occ: BitBoard,
}
impl Default for Board {
    fn default() -> Self {
        Self {
            grid: [None; CELLS],
            occ: BitBoard::default(),
        }
    }
}
impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }
    /// Gets the tile at `pos`, if any.
    pub fn get(&self, pos: impl Into<Pos>) -> Option<Tile> {
        self.grid[usize::from(pos.into())]
    }
    /// Checks whether `pos` holds no tile.
    pub fn is_empty(&self, pos: impl Into<Pos>) -> bool {
        self.get(pos).is_none()
    }
    /// Checks whether the board has no tiles placed at all: the state
    /// before the obligatory first move.
    pub fn is_blank(&self) -> bool {
        self.occ.is_zero()
    }
    /// Places a tile on the board, recording it in the grid and the
    /// occupancy bitboard. Does not validate premium squares, lexicon
    /// membership or connectivity: callers (the move generator, or the
    /// GCG replayer) are responsible for only placing tiles that form a
    /// legal play.
    pub fn place(&mut self, pos: impl Into<Pos>, tile: Tile) {
        let pos = pos.into();

        self.grid[usize::from(pos)] = Some(tile);
        self.occ.set(pos);
    }
    /// Removes the tile at `pos`, if any.
    pub fn remove(&mut self, pos: impl Into<Pos>) {
        let pos = pos.into();

        self.grid[usize::from(pos)] = None;
        self.occ.clear(pos);
    }
    /// Gets the occupancy bitboard.
    pub fn occupancy(&self) -> &BitBoard {
        &self.occ
    }
    /// Gets the positions of the anchor squares: empty squares with a
    /// played tile immediately to the right in the same row. On a blank
    /// board the only anchor is the start square.
    ///
    /// This matches the historical reference implementation's row-anchor
    /// rule exactly: only the right neighbour is consulted, never the
    /// left. Leftward extension past an existing run is handled by the
    /// left-part search rather than by seeding additional anchors.
    pub fn anchors(&self) -> Vec<Pos> {
        if self.is_blank() {
            return vec![Pos::start()];
        }

        let mut anchors = Vec::new();

        for pos in Pos::iter() {
            if self.is_empty(pos) {
                if let Some(right) = pos.dir(crate::util::pos::Direction::East) {
                    if !self.is_empty(right) {
                        anchors.push(pos);
                    }
                }
            }
        }

        anchors
    }
    /// Validates and commits `new_tiles` to the board, returning the
    /// score of the play. Checks, in order: no two new tiles share a
    /// square, no new tile overlays an already-played square, the
    /// first move of the game touches the start square (later moves
    /// must instead connect to the existing tiles), and every word
    /// the placement forms is a legal word under `judge`. On any
    /// failure the board is left exactly as it was; tiles are only
    /// placed once every check has passed.
    pub fn make_placement<J: WordJudge>(
        &mut self,
        new_tiles: &[(Pos, Tile)],
        judge: &J,
    ) -> GameResult<usize> {
        if new_tiles.is_empty() || new_tiles.len() > RACK_SIZE {
            return Err(GameError::PlacementCount);
        }

        let mut new_mask = BitBoard::default();
        for &(pos, _) in new_tiles {
            if new_mask.is_set(pos) {
                return Err(GameError::DuplicatePosition);
            }
            new_mask.set(pos);
            if self.get(pos).is_some() {
                return Err(GameError::CoincedentTiles);
            }
        }

        if self.is_blank() {
            if !new_mask.is_set(Pos::start()) {
                return Err(GameError::MustIntersectStart);
            }
        } else if !connects(self.occ, new_mask) {
            return Err(GameError::NotConnected);
        }

        for &(pos, tile) in new_tiles {
            self.place(pos, tile);
        }

        match crate::scoring::score(self, new_tiles, judge) {
            Ok(points) => Ok(points),
            Err(err) => {
                for &(pos, _) in new_tiles {
                    self.remove(pos);
                }
                Err(err)
            }
        }
    }
    /// Returns a copy of the board with rows and columns swapped, so
    /// that vertical plays on `self` become horizontal plays on the
    /// transposed board. Used by the move generator to run a single
    /// horizontal search routine in both directions.
    pub fn transpose(&self) -> Board {
        let mut out = Board::new();

        for pos in Pos::iter() {
            if let Some(tile) = self.get(pos) {
                out.place(pos.swap_rc(), tile);
            }
        }

        out
    }
}
/// Checks whether every bit of `new_mask` is reachable from `occ_before`
/// by repeatedly growing `occ_before` into its neighbours and masking
/// against the combined occupancy, the same flood fill the historical
/// reference implementation uses to reject a play that is not attached
/// to any existing word.
fn connects(occ_before: BitBoard, new_mask: BitBoard) -> bool {
    let combined = occ_before | new_mask;
    let mut reached = occ_before;

    loop {
        let grown = (reached | reached.neighbours()) & combined;
        if grown == reached {
            break;
        }
        reached = grown;
    }

    (new_mask & !reached).is_zero()
}
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        util::write_grid(f, |pos| match self.get(pos) {
            Some(tile) => format!("{}", tile),
            None => " . ".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::tile::Letter;

    #[test]
    fn blank_board_anchor_is_start() {
        let board = Board::new();
        assert_eq!(board.anchors(), vec![Pos::start()]);
    }

    #[test]
    fn anchor_sequence_matches_the_literal_walkthrough() {
        let mut board = Board::new();
        let row0_anchors = |board: &Board| -> Vec<usize> {
            board
                .anchors()
                .into_iter()
                .filter(|pos| usize::from(pos.row()) == 0)
                .map(|pos| usize::from(pos.col()))
                .collect()
        };

        board.place(Pos::from((0usize, 4usize)), Tile::Letter(Letter::new('Q').unwrap()));
        assert_eq!(row0_anchors(&board), vec![3]);

        board.place(Pos::from((0usize, 5usize)), Tile::Letter(Letter::new('I').unwrap()));
        assert_eq!(row0_anchors(&board), vec![3]);

        board.place(Pos::from((0usize, 7usize)), Tile::Letter(Letter::new('K').unwrap()));
        let mut anchors = row0_anchors(&board);
        anchors.sort_unstable();
        assert_eq!(anchors, vec![3, 6]);
    }

    #[test]
    fn anchor_only_to_the_left_of_a_run() {
        let mut board = Board::new();
        // place "CAT" at row 7, cols 7..=9
        board.place(Pos::from((7usize, 7usize)), Tile::Letter(Letter::new('C').unwrap()));
        board.place(Pos::from((7usize, 8usize)), Tile::Letter(Letter::new('A').unwrap()));
        board.place(Pos::from((7usize, 9usize)), Tile::Letter(Letter::new('T').unwrap()));

        let anchors = board.anchors();

        // (7,6) is empty with a played square to its right: an anchor.
        assert!(anchors.contains(&Pos::from((7usize, 6usize))));
        // (7,10) is empty but has nothing to its right among played tiles,
        // and its left neighbour is occupied, not empty: not an anchor
        // under the right-neighbour-only rule.
        assert!(!anchors.contains(&Pos::from((7usize, 10usize))));
    }

    #[test]
    fn transpose_swaps_rows_and_cols() {
        let mut board = Board::new();
        board.place(Pos::from((3usize, 5usize)), Tile::Letter(Letter::new('Q').unwrap()));

        let t = board.transpose();
        assert_eq!(t.get(Pos::from((5usize, 3usize))), Some(Tile::Letter(Letter::new('Q').unwrap())));
    }

    fn letter(ch: char) -> Tile {
        Tile::Letter(Letter::new(ch).unwrap())
    }

    #[test]
    fn first_move_must_cover_the_start_square() {
        let (lexicon, _) = crate::lexicon::Lexicon::build(["OH"]);
        let mut board = Board::new();
        let tiles = vec![
            (Pos::from((0usize, 0usize)), letter('O')),
            (Pos::from((0usize, 1usize)), letter('H')),
        ];

        assert!(matches!(
            board.make_placement(&tiles, &lexicon),
            Err(GameError::MustIntersectStart)
        ));
        assert!(board.is_blank());
    }

    #[test]
    fn first_move_through_start_is_committed_and_scored() {
        let (lexicon, _) = crate::lexicon::Lexicon::build(["OH"]);
        let mut board = Board::new();
        let tiles = vec![
            (Pos::start(), letter('O')),
            (Pos::from((7usize, 8usize)), letter('H')),
        ];

        let score = board.make_placement(&tiles, &lexicon).unwrap();
        assert_eq!(score, 10);
        assert_eq!(board.get(Pos::start()), Some(letter('O')));
    }

    #[test]
    fn later_move_must_connect_to_existing_tiles() {
        let (lexicon, _) = crate::lexicon::Lexicon::build(["OH", "AT"]);
        let mut board = Board::new();
        board
            .make_placement(
                &[(Pos::start(), letter('O')), (Pos::from((7usize, 8usize)), letter('H'))],
                &lexicon,
            )
            .unwrap();

        let isolated = vec![
            (Pos::from((0usize, 0usize)), letter('A')),
            (Pos::from((0usize, 1usize)), letter('T')),
        ];
        assert!(matches!(
            board.make_placement(&isolated, &lexicon),
            Err(GameError::NotConnected)
        ));
    }

    #[test]
    fn overlapping_a_played_square_is_rejected() {
        let (lexicon, _) = crate::lexicon::Lexicon::build(["OH"]);
        let mut board = Board::new();
        board
            .make_placement(
                &[(Pos::start(), letter('O')), (Pos::from((7usize, 8usize)), letter('H'))],
                &lexicon,
            )
            .unwrap();

        let overlap = vec![(Pos::start(), letter('A'))];
        assert!(matches!(
            board.make_placement(&overlap, &lexicon),
            Err(GameError::CoincedentTiles)
        ));
    }

    #[test]
    fn invalid_word_is_rolled_back() {
        let (lexicon, _) = crate::lexicon::Lexicon::build(["OH"]);
        let mut board = Board::new();
        let tiles = vec![
            (Pos::start(), letter('Z')),
            (Pos::from((7usize, 8usize)), letter('X')),
        ];

        assert!(board.make_placement(&tiles, &lexicon).is_err());
        assert!(board.is_blank());
    }

    #[test]
    fn duplicate_positions_are_rejected() {
        let (lexicon, _) = crate::lexicon::Lexicon::build(["OH"]);
        let mut board = Board::new();
        let tiles = vec![(Pos::start(), letter('O')), (Pos::start(), letter('H'))];

        assert!(matches!(
            board.make_placement(&tiles, &lexicon),
            Err(GameError::DuplicatePosition)
        ));
    }
}
