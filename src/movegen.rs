//! Enumerates every legal placement of rack tiles onto a board, in the
//! style of Appel & Jacobson (1988): for each row, compute the
//! anchors (empty squares with a played neighbour to the right), then
//! for each anchor build the part of the word to its left
//! (`left_part`) before extending rightward across and past the
//! anchor (`extend_right`), consulting the lexicon and a
//! precomputed per-column cross-check at every step.
//!
//! Down-direction plays are generated by transposing the board,
//! running the same row-based search, and transposing the resulting
//! positions back; [`Board::transpose`] makes a vertical play look
//! exactly like a horizontal one.
//!
//! The generator never scores its own output: it only proves that a
//! play's words are lexicon members and that its perpendicular words
//! (via the cross-check mask) are too. Callers run [`crate::scoring::score`]
//! separately to get a point value.

use crate::{
    game::{
        board::Board,
        play::Play,
        rack::Rack,
        tile::Tile,
    },
    crosscheck::{self, CrossCheck},
    lexicon::{Lexicon, NodeId},
    util::pos::{Direction, Pos, Row},
};

/// Generates every legal [`Play::Place`] that `rack` can make on
/// `board` according to `lexicon`. The order of the results is
/// unspecified.
pub fn generate(board: &Board, rack: &Rack, lexicon: &Lexicon) -> Vec<Play> {
    let mut out = Vec::new();

    for row in Row::iter() {
        generate_row(board, rack, lexicon, row, Direction::East, &mut out);
    }

    let transposed = board.transpose();
    let mut down_plays = Vec::new();
    for row in Row::iter() {
        generate_row(&transposed, rack, lexicon, row, Direction::South, &mut down_plays);
    }
    out.extend(down_plays);

    out
}

/// Runs the anchor search over a single row of `board`. `emit_dir` is
/// only used to tag the emitted tile positions: when generating for a
/// transposed board (a "down" search), positions are swapped back via
/// [`Pos::swap_rc`] before being pushed onto `out`.
fn generate_row(
    board: &Board,
    rack: &Rack,
    lexicon: &Lexicon,
    row: Row,
    emit_dir: Direction,
    out: &mut Vec<Play>,
) {
    let anchors = row_anchors(board, row);
    if anchors.is_empty() {
        return;
    }

    let cross = crosscheck::row_cross_checks(board, lexicon, row);
    let mut rack = rack.clone();

    for anchor in anchors {
        let mut new_tiles = Vec::new();

        let left = anchor.dir(Direction::West);
        match left {
            Some(left_pos) if board.get(left_pos).is_some() => {
                // The square to the left is already played: the left part
                // of the word is fixed, not searched.
                let start = run_start(board, left_pos);
                if let Some(node) = trace_existing_run(board, lexicon, start, left_pos) {
                    extend_right(
                        board, lexicon, &cross, Some(anchor), node, &mut rack,
                        &mut new_tiles, emit_dir, out,
                    );
                }
            }
            _ => {
                let limit = left_limit(board, anchor);
                left_part(
                    board, lexicon, &cross, anchor, left, lexicon.root(), limit,
                    &mut rack, &mut new_tiles, emit_dir, out,
                );
            }
        }
    }
}

/// The empty squares in `row` with a played neighbour immediately to
/// the right; on a blank board this is just the start square (if it
/// lies in this row).
fn row_anchors(board: &Board, row: Row) -> Vec<Pos> {
    board
        .anchors()
        .into_iter()
        .filter(|pos| pos.row() == row)
        .collect()
}

/// The number of consecutive empty squares strictly left of `anchor`,
/// stopping at the board edge or the first occupied square.
fn left_limit(board: &Board, anchor: Pos) -> usize {
    let mut limit = 0;
    let mut cur = anchor;

    while let Some(prev) = cur.dir(Direction::West) {
        if board.get(prev).is_some() {
            break;
        }
        limit += 1;
        cur = prev;
    }

    limit
}

/// Walks left from `pos` while squares are occupied, returning the
/// leftmost square of the run.
fn run_start(board: &Board, pos: Pos) -> Pos {
    let mut start = pos;
    while let Some(prev) = start.dir(Direction::West) {
        if board.get(prev).is_none() {
            break;
        }
        start = prev;
    }
    start
}

/// Traces the lexicon from the root through the pre-existing run
/// `start..=end`, returning the node reached, or `None` if the run
/// (which must already be a legal word on the board) somehow has no
/// matching path.
fn trace_existing_run(board: &Board, lexicon: &Lexicon, start: Pos, end: Pos) -> Option<NodeId> {
    let mut node = lexicon.root();
    let mut pos = start;

    loop {
        let letter = board.get(pos)?.letter()?;
        node = lexicon.step(node, letter)?;

        if pos == end {
            return Some(node);
        }
        pos = pos.dir(Direction::East)?;
    }
}

/// Enumerates every prefix (of length `0..=limit`) walkable in the
/// lexicon from `node` using rack tiles, placing each letter at
/// `next_left` (and then one square further left on each recursive
/// call). For every prefix, including the empty one, calls
/// [`extend_right`] starting back at `anchor`.
#[allow(clippy::too_many_arguments)]
fn left_part(
    board: &Board,
    lexicon: &Lexicon,
    cross: &[CrossCheck],
    anchor: Pos,
    next_left: Option<Pos>,
    node: NodeId,
    limit: usize,
    rack: &mut Rack,
    new_tiles: &mut Vec<(Pos, Tile)>,
    emit_dir: Direction,
    out: &mut Vec<Play>,
) {
    extend_right(
        board, lexicon, cross, Some(anchor), node, rack, new_tiles, emit_dir, out,
    );

    if limit == 0 {
        return;
    }
    let Some(pos) = next_left else { return };
    let col = usize::from(pos.col());

    for (letter, child) in lexicon.children(node) {
        if !cross[col].admits(letter) {
            continue;
        }

        if rack.contains(Tile::Letter(letter)) {
            rack.take(Tile::Letter(letter)).unwrap();
            new_tiles.push((pos, Tile::Letter(letter)));
            left_part(
                board, lexicon, cross, anchor, pos.dir(Direction::West), child,
                limit - 1, rack, new_tiles, emit_dir, out,
            );
            new_tiles.pop();
            rack.put_back(Tile::Letter(letter)).unwrap();
        }

        if rack.has_blank() {
            rack.take(Tile::blank()).unwrap();
            new_tiles.push((pos, Tile::Blank(Some(letter))));
            left_part(
                board, lexicon, cross, anchor, pos.dir(Direction::West), child,
                limit - 1, rack, new_tiles, emit_dir, out,
            );
            new_tiles.pop();
            rack.put_back(Tile::blank()).unwrap();
        }
    }
}

/// Walks rightward from `pos` (which starts at the anchor and advances
/// one square per recursive call), consuming pre-existing board
/// letters and/or placing new rack tiles, and emits a [`Play::Place`]
/// every time a terminal lexicon node is reached at an empty or
/// off-board square.
///
/// By construction every call chain passes through the row's anchor
/// (the very first call is always made with `pos == Some(anchor)`),
/// so every emitted play is anchored and places at least one new
/// tile; no separate check for either invariant is needed here.
#[allow(clippy::too_many_arguments)]
fn extend_right(
    board: &Board,
    lexicon: &Lexicon,
    cross: &[CrossCheck],
    pos: Option<Pos>,
    node: NodeId,
    rack: &mut Rack,
    new_tiles: &mut Vec<(Pos, Tile)>,
    emit_dir: Direction,
    out: &mut Vec<Play>,
) {
    let Some(pos) = pos else {
        if lexicon.is_terminal(node) && !new_tiles.is_empty() {
            out.push(emit(new_tiles, emit_dir));
        }
        return;
    };

    match board.get(pos) {
        Some(tile) => {
            let Some(letter) = tile.letter() else { return };
            if let Some(child) = lexicon.step(node, letter) {
                extend_right(
                    board, lexicon, cross, pos.dir(Direction::East), child, rack,
                    new_tiles, emit_dir, out,
                );
            }
        }
        None => {
            if lexicon.is_terminal(node) && !new_tiles.is_empty() {
                out.push(emit(new_tiles, emit_dir));
            }

            let col = usize::from(pos.col());

            for (letter, child) in lexicon.children(node) {
                if !cross[col].admits(letter) {
                    continue;
                }

                if rack.contains(Tile::Letter(letter)) {
                    rack.take(Tile::Letter(letter)).unwrap();
                    new_tiles.push((pos, Tile::Letter(letter)));
                    extend_right(
                        board, lexicon, cross, pos.dir(Direction::East), child, rack,
                        new_tiles, emit_dir, out,
                    );
                    new_tiles.pop();
                    rack.put_back(Tile::Letter(letter)).unwrap();
                }

                if rack.has_blank() {
                    rack.take(Tile::blank()).unwrap();
                    new_tiles.push((pos, Tile::Blank(Some(letter))));
                    extend_right(
                        board, lexicon, cross, pos.dir(Direction::East), child, rack,
                        new_tiles, emit_dir, out,
                    );
                    new_tiles.pop();
                    rack.put_back(Tile::blank()).unwrap();
                }
            }
        }
    }
}

/// Converts the accumulated new tiles into a [`Play::Place`], mapping
/// positions back to the untransposed board for a down-direction
/// search.
fn emit(new_tiles: &[(Pos, Tile)], emit_dir: Direction) -> Play {
    let tiles = new_tiles
        .iter()
        .map(|&(pos, tile)| {
            let pos = match emit_dir {
                Direction::East => pos,
                Direction::South => pos.swap_rc(),
                _ => unreachable!("move generation only runs across rows"),
            };
            (pos, tile)
        })
        .collect();

    Play::Place(tiles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::tile::Letter;

    fn tile(ch: char) -> Tile {
        Tile::Letter(Letter::new(ch).unwrap())
    }

    #[test]
    fn first_move_must_cross_center() {
        let (lexicon, _) = Lexicon::build(["OH", "HO"]);
        let board = Board::new();
        let rack = Rack::from_tiles(&[tile('O'), tile('H')]);

        let plays = generate(&board, &rack, &lexicon);
        assert!(!plays.is_empty());
        for play in &plays {
            if let Play::Place(tiles) = play {
                assert!(tiles.iter().any(|(pos, _)| pos.is_start()));
            }
        }
    }

    #[test]
    fn no_plays_when_rack_cannot_form_any_word() {
        let (lexicon, _) = Lexicon::build(["ZZZ"]);
        let board = Board::new();
        let rack = Rack::from_tiles(&[tile('A'), tile('B')]);

        assert!(generate(&board, &rack, &lexicon).is_empty());
    }

    #[test]
    fn generates_extension_of_existing_word() {
        let (lexicon, _) = Lexicon::build(["CAT", "CATS"]);
        let mut board = Board::new();
        board.place(Pos::from((7usize, 7usize)), tile('C'));
        board.place(Pos::from((7usize, 8usize)), tile('A'));
        board.place(Pos::from((7usize, 9usize)), tile('T'));

        let rack = Rack::from_tiles(&[tile('S')]);
        let plays = generate(&board, &rack, &lexicon);

        let found = plays.iter().any(|p| match p {
            Play::Place(tiles) => {
                tiles.len() == 1 && tiles[0] == (Pos::from((7usize, 10usize)), tile('S'))
            }
            _ => false,
        });
        assert!(found, "expected CATS extension to be generated");
    }

    #[test]
    fn down_direction_plays_are_generated() {
        let (lexicon, _) = Lexicon::build(["AT", "CAT"]);
        let mut board = Board::new();
        board.place(Pos::from((6usize, 7usize)), tile('C'));
        board.place(Pos::from((7usize, 7usize)), tile('A'));

        let rack = Rack::from_tiles(&[tile('T')]);
        let plays = generate(&board, &rack, &lexicon);

        let found = plays.iter().any(|p| match p {
            Play::Place(tiles) => {
                tiles.len() == 1 && tiles[0] == (Pos::from((8usize, 7usize)), tile('T'))
            }
            _ => false,
        });
        assert!(found, "expected a vertical CAT extension");
    }

    #[test]
    fn every_generated_play_uses_only_tiles_in_the_rack() {
        let (lexicon, _) = Lexicon::build(["AN", "AT", "TO", "NO"]);
        let board = Board::new();
        let rack = Rack::from_tiles(&[tile('A'), tile('N')]);

        for play in generate(&board, &rack, &lexicon) {
            if let Play::Place(tiles) = play {
                assert!(tiles.len() <= rack.count());
            }
        }
    }
}
