//! Parses the community "GCG" game-record format, used only to replay
//! historical games and check recorded cumulative scores; it plays no
//! part in move generation or live scoring.
//!
//! Event lines begin with `>` followed by whitespace-separated
//! fields: player, rack, coord, word, score, cumulative. `coord`
//! encodes direction by which part comes first: a row number then a
//! column letter (e.g. "8H") places the word going down; a column
//! letter then a row number (e.g. "H8") places it across, both
//! 1-based. Within `word`, a lowercase letter marks a tile played as
//! a blank designating that letter, and a `.` marks a square that
//! already held a tile before this turn. A coordinate of exactly
//! `--` marks a withdrawal, pass, or exchange and carries no
//! placement.

use crate::{
    error::{GameError, GameResult},
    game::tile::{Letter, Tile},
    util::pos::{Col, Direction, Pos, Row},
};
use std::collections::HashMap;

/// The new tiles a single event adds to the board, decoded from its
/// `coord`/`word` fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    /// Tiles to place, in the order the word is read.
    pub new_tiles: Vec<(Pos, Tile)>,
}

/// One parsed `>` line of a GCG file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// The player making this move.
    pub player: String,
    /// The player's rack before the move, as recorded in the file.
    pub rack: String,
    /// The tiles placed this turn, or `None` for a withdrawal, pass,
    /// or exchange.
    pub placement: Option<Placement>,
    /// The point value of this move alone.
    pub score: i32,
    /// The player's running total after this move.
    pub cumulative: i32,
}

/// Parses every `>` event line in a GCG file's full text. Lines that
/// do not begin with `>` (comments, headers) are ignored.
pub fn parse(text: &str) -> GameResult<Vec<Event>> {
    text.lines()
        .filter(|line| line.starts_with('>'))
        .map(parse_event)
        .collect()
}

fn parse_event(line: &str) -> GameResult<Event> {
    let malformed = || GameError::MalformedGcgLine(line.to_string());

    let rest = line.strip_prefix('>').ok_or_else(malformed)?;
    let fields: Vec<&str> = rest.split_whitespace().collect();
    if fields.len() < 5 {
        return Err(malformed());
    }

    let player = fields[0].to_string();
    let rack = fields[1].to_string();
    let coord = fields[2];

    let score_idx = fields.len() - 2;
    let cumulative_idx = fields.len() - 1;
    let word = fields[3..score_idx].concat();

    let score: i32 = fields[score_idx].parse().map_err(|_| malformed())?;
    let cumulative: i32 = fields[cumulative_idx].parse().map_err(|_| malformed())?;

    let placement = if coord == "--" {
        None
    } else {
        Some(parse_placement(coord, &word).ok_or_else(malformed)?)
    };

    Ok(Event {
        player,
        rack,
        placement,
        score,
        cumulative,
    })
}

fn parse_placement(coord: &str, word: &str) -> Option<Placement> {
    let (start, dir) = parse_coord(coord)?;

    let mut new_tiles = Vec::new();
    let mut pos = Some(start);

    for ch in word.chars() {
        let here = pos?;

        if ch != '.' {
            let tile = if ch.is_ascii_lowercase() {
                Tile::Blank(Some(Letter::new(ch)?))
            } else {
                Tile::Letter(Letter::new(ch)?)
            };
            new_tiles.push((here, tile));
        }

        pos = here.dir(dir);
    }

    Some(Placement { new_tiles })
}

fn parse_coord(coord: &str) -> Option<(Pos, Direction)> {
    let first = coord.chars().next()?;

    if first.is_ascii_digit() {
        let split = coord.find(|c: char| c.is_ascii_alphabetic())?;
        let (row_str, col_str) = coord.split_at(split);
        let row: usize = row_str.parse().ok()?;
        let col = col_from_letter(col_str.chars().next()?)?;

        Some((Pos::from((Row::from(row.checked_sub(1)?), col)), Direction::South))
    } else {
        let col = col_from_letter(first)?;
        let row: usize = coord[1..].parse().ok()?;

        Some((Pos::from((Row::from(row.checked_sub(1)?), col)), Direction::East))
    }
}

fn col_from_letter(ch: char) -> Option<Col> {
    let letter = Letter::new(ch)?;
    Some(Col::from(usize::from(letter)))
}

/// Replays `events` on a fresh board, scoring each placement with
/// [`crate::scoring::score`] against `judge` and checking that every
/// player's running total matches the cumulative value recorded in
/// the file. Returns [`GameError::ScoreMismatch`] naming the first
/// event (1-based) whose total diverges.
pub fn replay<J: crate::lexicon::WordJudge>(events: &[Event], judge: &J) -> GameResult<()> {
    use crate::game::board::Board;

    let mut board = Board::new();
    let mut totals: HashMap<String, i64> = HashMap::new();

    for (index, event) in events.iter().enumerate() {
        let turn_score = match &event.placement {
            Some(placement) => {
                let scored = crate::scoring::score(&board, &placement.new_tiles, judge)?;
                for &(pos, tile) in &placement.new_tiles {
                    board.place(pos, tile);
                }
                scored as i64
            }
            None => 0,
        };

        let total = totals.entry(event.player.clone()).or_insert(0);
        *total += turn_score;

        if *total != i64::from(event.cumulative) {
            return Err(GameError::ScoreMismatch {
                event: index + 1,
                expected: event.cumulative.max(0) as usize,
                actual: (*total).max(0) as usize,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_across_and_down_coords() {
        let events = parse(
            "#player1 Alice\n\
             >Alice ABCDEFG H8 CAT 12 12\n\
             >Bob DEFGHIJ 9A DOG 8 8\n",
        )
        .unwrap();

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].player, "Alice");
        let p0 = events[0].placement.as_ref().unwrap();
        assert_eq!(p0.new_tiles[0].0, Pos::from((Row::from(7), Col::from(7))));

        let p1 = events[1].placement.as_ref().unwrap();
        // "9A" is digit-then-letter: down, row 8 (0-based), col A (0).
        assert_eq!(p1.new_tiles[0].0, Pos::from((Row::from(8), Col::from(0))));
    }

    #[test]
    fn withdrawal_has_no_placement() {
        let events = parse(">Alice ABCDEFG -- -- 0 0\n").unwrap();
        assert!(events[0].placement.is_none());
    }

    #[test]
    fn blank_letter_is_lowercase() {
        let events = parse(">Alice ABCDEFG H8 cAT 10 10\n").unwrap();
        let placement = events[0].placement.as_ref().unwrap();
        assert_eq!(placement.new_tiles[0].1, Tile::Blank(Some(Letter::new('C').unwrap())));
    }

    #[test]
    fn malformed_line_is_rejected() {
        assert!(parse(">Alice ABCDEFG\n").is_err());
    }

    #[test]
    fn replay_checks_cumulative_totals() {
        let (lexicon, _) = crate::lexicon::Lexicon::build(["CAT"]);
        let events = parse(">Alice ABCDEFG H8 CAT 12 12\n").unwrap();
        assert!(replay(&events, &lexicon).is_ok());
    }

    #[test]
    fn replay_reports_mismatch() {
        let (lexicon, _) = crate::lexicon::Lexicon::build(["CAT"]);
        let events = parse(">Alice ABCDEFG H8 CAT 99 99\n").unwrap();
        assert!(matches!(
            replay(&events, &lexicon),
            Err(GameError::ScoreMismatch { event: 1, .. })
        ));
    }
}
