//! Scores a set of newly placed tiles against a board.
//!
//! Premium squares only ever apply to a tile the very turn it is
//! placed: a square's bonus is consumed once and never again. Every
//! maximal run of occupied squares (horizontal or vertical) that
//! contains at least one of the new tiles is scored independently
//! the same way, whether it is the "main" word of the play or a
//! perpendicular word incidentally completed by one new letter; the
//! results are summed, and the 50 point bonus is added once at the
//! end if all 7 rack tiles were used.
//!
//! This also doubles as legality validation: a run that is not in the
//! lexicon, a play placing the wrong number of tiles, or a play that
//! forms no word at all, are all rejected here with a [`GameError`]
//! rather than silently under-scored.

use crate::{
    error::{GameError, GameResult},
    game::{board::Board, rack::RACK_SIZE, tile::Tile},
    lexicon::WordJudge,
    util::pos::{Direction, Pos},
};
use std::collections::HashSet;

/// Scores `new_tiles` against `board`, which must not yet contain them
/// (the caller applies them to a scratch/overlay view via the closures
/// this function builds internally). Returns the total score for the
/// play, including the bingo bonus, or an error if the play does not
/// form a legal set of words.
pub fn score<J: WordJudge>(board: &Board, new_tiles: &[(Pos, Tile)], judge: &J) -> GameResult<usize> {
    if new_tiles.is_empty() || new_tiles.len() > RACK_SIZE {
        return Err(GameError::PlacementCount);
    }

    let get = |pos: Pos| -> Option<Tile> {
        new_tiles
            .iter()
            .find(|&&(p, _)| p == pos)
            .map(|&(_, t)| t)
            .or_else(|| board.get(pos))
    };
    let is_new = |pos: Pos| new_tiles.iter().any(|&(p, _)| p == pos);

    let mut runs: HashSet<(Pos, Pos)> = HashSet::new();
    for &(pos, _) in new_tiles {
        if let Some(run) = maximal_run(pos, Direction::East, &get) {
            runs.insert(run);
        }
        if let Some(run) = maximal_run(pos, Direction::South, &get) {
            runs.insert(run);
        }
    }

    if runs.is_empty() {
        return Err(GameError::WordsNeedTwoLetters);
    }

    let mut total = 0usize;
    for (start, end) in runs {
        total += score_run(start, end, &get, &is_new, judge)?;
    }

    if new_tiles.len() == RACK_SIZE {
        total += 50;
    }

    Ok(total)
}

/// Finds the maximal contiguous run of occupied squares through `pos`
/// along the axis of `dir` (`East` for horizontal, `South` for
/// vertical), returning `None` if the run is a single square (not a
/// word).
fn maximal_run(
    pos: Pos,
    dir: Direction,
    get: &impl Fn(Pos) -> Option<Tile>,
) -> Option<(Pos, Pos)> {
    let mut start = pos;
    while let Some(prev) = start.dir(dir.opposite()) {
        if get(prev).is_none() {
            break;
        }
        start = prev;
    }

    let mut end = pos;
    while let Some(next) = end.dir(dir) {
        if get(next).is_none() {
            break;
        }
        end = next;
    }

    if start == end {
        None
    } else {
        Some((start, end))
    }
}

fn score_run<J: WordJudge>(
    start: Pos,
    end: Pos,
    get: &impl Fn(Pos) -> Option<Tile>,
    is_new: &impl Fn(Pos) -> bool,
    judge: &J,
) -> GameResult<usize> {
    let dir = if start.row() == end.row() {
        Direction::East
    } else {
        Direction::South
    };

    let mut word = String::new();
    let mut base_total = 0usize;
    let mut word_multiplier = 1usize;

    let mut pos = start;
    loop {
        let tile = get(pos).expect("run squares are occupied by construction");
        let letter = tile.letter().ok_or(GameError::MissingLetter)?;
        word.push(char::from(letter));

        let (tile_mult, word_mult) = if is_new(pos) {
            pos.premium_multipliers()
        } else {
            (1, 1)
        };

        base_total += tile.score() * tile_mult;
        word_multiplier *= word_mult;

        if pos == end {
            break;
        }
        pos = pos.dir(dir).expect("run does not run off the board");
    }

    if !judge.contains(&word) {
        return Err(GameError::InvalidWord);
    }

    Ok(base_total * word_multiplier)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::tile::Letter;
    use crate::lexicon::Lexicon;

    fn letter(ch: char) -> Tile {
        Tile::Letter(Letter::new(ch).unwrap())
    }

    #[test]
    fn scores_first_move_through_center_with_double_word() {
        let (lexicon, _) = Lexicon::build(["OH"]);
        let board = Board::new();
        let new_tiles = vec![
            (Pos::from((7usize, 7usize)), letter('O')),
            (Pos::from((7usize, 8usize)), letter('H')),
        ];

        // O=1, H=4 -> base 5, center square doubles the word -> 10.
        let score = score(&board, &new_tiles, &lexicon).unwrap();
        assert_eq!(score, 10);
    }

    #[test]
    fn rejects_word_not_in_lexicon() {
        let (lexicon, _) = Lexicon::build(["OH"]);
        let board = Board::new();
        let new_tiles = vec![
            (Pos::from((7usize, 7usize)), letter('Z')),
            (Pos::from((7usize, 8usize)), letter('X')),
        ];

        assert!(matches!(
            score(&board, &new_tiles, &lexicon),
            Err(GameError::InvalidWord)
        ));
    }

    #[test]
    fn cross_word_gets_only_its_own_square_multiplier() {
        let (lexicon, _) = Lexicon::build(["CAT", "AS"]);
        let mut board = Board::new();
        board.place(Pos::from((7usize, 7usize)), letter('C'));
        board.place(Pos::from((7usize, 8usize)), letter('A'));
        board.place(Pos::from((7usize, 9usize)), letter('T'));

        // Place a single new tile 'S' below the 'A' at (8,8), forming "AS"
        // vertically. (8,8) is not a premium square.
        let new_tiles = vec![(Pos::from((8usize, 8usize)), letter('S'))];

        let score = score(&board, &new_tiles, &lexicon).unwrap();
        assert_eq!(score, 2); // A=1 + S=1, no multiplier at (8,8)
    }

    #[test]
    fn bingo_bonus_applies_once_for_seven_tiles() {
        let (lexicon, _) = Lexicon::build(["ABCDEFG"]);
        let board = Board::new();
        let new_tiles: Vec<_> = "ABCDEFG"
            .chars()
            .enumerate()
            .map(|(i, c)| (Pos::from((7usize, 7 + i)), letter(c)))
            .collect();

        let score = score(&board, &new_tiles, &lexicon).unwrap();
        // A=1,B=3,C=3,D=2,E=1,F=4,G=2 = 16, center square doubles word -> 32, +50 bingo.
        assert_eq!(score, 32 + 50);
    }

    #[test]
    fn rejects_empty_placement() {
        let board = Board::new();
        let (lexicon, _) = Lexicon::build(["A"]);
        assert!(matches!(
            score(&board, &[], &lexicon),
            Err(GameError::PlacementCount)
        ));
    }

    #[test]
    fn rejects_isolated_single_tile() {
        let board = Board::new();
        let (lexicon, _) = Lexicon::build(["A"]);
        let new_tiles = vec![(Pos::from((0usize, 0usize)), letter('A'))];
        assert!(matches!(
            score(&board, &new_tiles, &lexicon),
            Err(GameError::WordsNeedTwoLetters)
        ));
    }

    #[test]
    fn scores_quant_across_a_double_letter_and_the_center() {
        // (x=3, y=7) is a double-letter square; the word also crosses
        // the center double-word square at (x=7, y=7).
        let (lexicon, _) = Lexicon::build(["QUANT"]);
        let board = Board::new();
        let new_tiles: Vec<_> = "QUANT"
            .chars()
            .enumerate()
            .map(|(i, c)| (Pos::from((7usize, 3 + i)), letter(c)))
            .collect();

        // Q=10 (doubled to 20) + U=1 + A=1 + N=1 + T=1 = 24, doubled by
        // the center square's DW -> 48.
        let score = score(&board, &new_tiles, &lexicon).unwrap();
        assert_eq!(score, 48);
    }
}
