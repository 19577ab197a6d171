//! Command-line entry point: build a lexicon from a wordlist and
//! report it, print legal plays for a board and rack, or replay a GCG
//! game record and verify its recorded cumulative scores.
//!
//! Argument handling is intentionally plain (`--flag value` pairs
//! scanned by hand) rather than routed through an argument-parsing
//! crate; the flags below are illustrative, not a committed interface.

use std::{env, fs, process::ExitCode};
use wordgrid::{
    game::{
        board::{Board, COLS, ROWS},
        play::Play,
        rack::Rack,
        tile::{Letter, Tile},
    },
    gcg,
    lexicon::Lexicon,
    movegen, scoring,
    util::pos::{Direction, Pos},
};

fn main() -> ExitCode {
    env_logger::init();

    let mut args = env::args().skip(1);
    let Some(command) = args.next() else {
        eprintln!("usage: wordgrid <build-index|moves|replay> [options]");
        return ExitCode::from(2);
    };
    let rest: Vec<String> = args.collect();

    match command.as_str() {
        "build-index" => build_index(&rest),
        "moves" => moves(&rest),
        "replay" => replay(&rest),
        other => {
            eprintln!("unknown subcommand: {other}");
            ExitCode::from(2)
        }
    }
}

/// Finds the value following a `--name` flag, if present.
fn flag<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == name)
        .and_then(|idx| args.get(idx + 1))
        .map(String::as_str)
}

fn read_file(path: &str) -> Result<String, ExitCode> {
    fs::read_to_string(path).map_err(|err| {
        log::error!("failed to read {path}: {err}");
        ExitCode::from(2)
    })
}

fn build_index(args: &[String]) -> ExitCode {
    let Some(path) = flag(args, "--dict") else {
        eprintln!("build-index requires --dict <path>");
        return ExitCode::from(2);
    };

    let text = match read_file(path) {
        Ok(text) => text,
        Err(code) => return code,
    };

    let (lexicon, report) = Lexicon::build(text.lines());
    log::info!(
        "built lexicon from {path}: {} accepted, {} skipped",
        report.accepted,
        report.skipped
    );
    println!(
        "{} words loaded, {} skipped, {} lexicon nodes",
        report.accepted,
        report.skipped,
        lexicon.node_count()
    );

    ExitCode::SUCCESS
}

fn moves(args: &[String]) -> ExitCode {
    let (Some(board_path), Some(rack_letters)) =
        (flag(args, "--board"), flag(args, "--rack"))
    else {
        eprintln!("moves requires --board <path> and --rack <letters>");
        return ExitCode::from(2);
    };
    let Some(dict_path) = flag(args, "--dict") else {
        eprintln!("moves requires --dict <path>");
        return ExitCode::from(2);
    };

    let board_text = match read_file(board_path) {
        Ok(text) => text,
        Err(code) => return code,
    };
    let Some(board) = parse_board(&board_text) else {
        eprintln!("malformed board file at {board_path}");
        return ExitCode::from(2);
    };

    let dict_text = match read_file(dict_path) {
        Ok(text) => text,
        Err(code) => return code,
    };
    let (lexicon, _) = Lexicon::build(dict_text.lines());

    let tiles: Vec<Tile> = rack_letters.chars().map(Tile::from).collect();
    let rack = Rack::from_tiles(&tiles);

    let mut lines: Vec<(usize, String)> = movegen::generate(&board, &rack, &lexicon)
        .into_iter()
        .filter_map(|play| {
            let Play::Place(new_tiles) = &play else {
                return None;
            };
            let score = scoring::score(&board, new_tiles, &lexicon).ok()?;
            let (start, dir, word) = describe_play(&board, new_tiles);
            let (row, col) = start.row_col();
            Some((
                score,
                format!(
                    "{},{},{},{},{}",
                    usize::from(col),
                    usize::from(row),
                    dir,
                    word,
                    score
                ),
            ))
        })
        .collect();

    lines.sort_by(|a, b| b.0.cmp(&a.0));
    for (_, line) in lines {
        println!("{line}");
    }

    ExitCode::SUCCESS
}

fn replay(args: &[String]) -> ExitCode {
    let (Some(gcg_path), Some(dict_path)) = (flag(args, "--gcg"), flag(args, "--dict")) else {
        eprintln!("replay requires --gcg <path> and --dict <path>");
        return ExitCode::from(2);
    };

    let gcg_text = match read_file(gcg_path) {
        Ok(text) => text,
        Err(code) => return code,
    };
    let dict_text = match read_file(dict_path) {
        Ok(text) => text,
        Err(code) => return code,
    };

    let events = match gcg::parse(&gcg_text) {
        Ok(events) => events,
        Err(err) => {
            eprintln!("failed to parse {gcg_path}: {err}");
            return ExitCode::from(2);
        }
    };
    let (lexicon, _) = Lexicon::build(dict_text.lines());

    match gcg::replay(&events, &lexicon) {
        Ok(()) => {
            log::info!("replay of {gcg_path} matched every recorded cumulative score");
            println!("ok: {} events matched", events.len());
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("replay of {gcg_path} diverged: {err}");
            eprintln!("mismatch: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Parses the implementation-defined board file format: `ROWS` lines
/// of `COLS` characters, `.` for empty, an uppercase letter for a
/// played tile, a lowercase letter for a blank played as that letter.
fn parse_board(text: &str) -> Option<Board> {
    let mut board = Board::new();
    let lines: Vec<&str> = text.lines().take(ROWS).collect();
    if lines.len() != ROWS {
        return None;
    }

    for (row, line) in lines.into_iter().enumerate() {
        let chars: Vec<char> = line.chars().collect();
        if chars.len() != COLS {
            return None;
        }

        for (col, ch) in chars.into_iter().enumerate() {
            if ch == '.' {
                continue;
            }

            let pos = Pos::from((row, col));
            let tile = if ch.is_ascii_lowercase() {
                Tile::Blank(Some(Letter::new(ch)?))
            } else {
                Tile::Letter(Letter::new(ch)?)
            };
            board.place(pos, tile);
        }
    }

    Some(board)
}

/// Reconstructs the longest word a play forms (used purely for
/// display), along with its start square and direction letter (`A`
/// for across, `D` for down).
fn describe_play(board: &Board, new_tiles: &[(Pos, Tile)]) -> (Pos, char, String) {
    let get = |pos: Pos| -> Option<Tile> {
        new_tiles
            .iter()
            .find(|&&(p, _)| p == pos)
            .map(|&(_, t)| t)
            .or_else(|| board.get(pos))
    };

    let mut best: Option<(Pos, Pos, Direction, usize)> = None;
    for &(pos, _) in new_tiles {
        for dir in [Direction::East, Direction::South] {
            let (start, end) = maximal_run(pos, dir, &get);
            let len = run_len(start, end, dir);
            if best.as_ref().map_or(true, |&(_, _, _, best_len)| len > best_len) {
                best = Some((start, end, dir, len));
            }
        }
    }

    let (start, end, dir, _) = best.expect("a generated play always forms at least one word");

    let mut word = String::new();
    let mut pos = start;
    loop {
        let tile = get(pos).expect("run squares are occupied by construction");
        word.push(char::from(
            tile.letter().expect("board tile always has a letter"),
        ));
        if pos == end {
            break;
        }
        pos = pos.dir(dir).expect("run does not run off the board");
    }

    let dir_char = match dir {
        Direction::East => 'A',
        Direction::South => 'D',
        _ => unreachable!("plays only ever read across or down"),
    };

    (start, dir_char, word)
}

fn maximal_run(pos: Pos, dir: Direction, get: &impl Fn(Pos) -> Option<Tile>) -> (Pos, Pos) {
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

    (start, end)
}

fn run_len(start: Pos, end: Pos, dir: Direction) -> usize {
    let mut len = 1;
    let mut pos = start;
    while pos != end {
        pos = pos.dir(dir).expect("run does not run off the board");
        len += 1;
    }
    len
}
