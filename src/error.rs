//! The error and result types for the library.

use std::{error::Error, fmt, io};

/// The [`Result`] type for the [`game`](super::game) module.
pub type GameResult<T> = std::result::Result<T, GameError>;

/// The error type for the game module.
#[derive(Debug)]
pub enum GameError {
    /// The letter bag does not contain enough letters to redraw the requested tiles.
    NotEnoughLetters,
    /// Attempted to play a tile which was not in the player's rack.
    NotInRack,
    /// A placed word was not in the word list.
    InvalidWord,
    /// Expected at least one and no more than 7 tiles to place.
    PlacementCount,
    /// The tiles added during a play would have overlayed existing mismatched tiles.
    CoincedentTiles,
    /// At least one pair of tiles added during a play were placed on the same square.
    DuplicatePosition,
    /// At least one and no more than 7 tiles may be redrawn from the bag.
    RedrawCount,
    /// There must be a tile on the start square.
    MustIntersectStart,
    /// Every word needs at least two letters.
    WordsNeedTwoLetters,
    /// Every tile should have a neighbour above, below, left or right.
    NotConnected,
    /// A blank tile placed on the board did not specify a letter.
    MissingLetter,
    /// The game is already over; no further plays can be made.
    Over,
    /// A replayed game record's cumulative score did not match the recorded value.
    ScoreMismatch {
        /// The event index (1-based) within the record.
        event: usize,
        /// The cumulative score recorded in the file.
        expected: usize,
        /// The cumulative score produced by replaying the move.
        actual: usize,
    },
    /// A line of a `.gcg` game record could not be parsed.
    MalformedGcgLine(String),
    /// A required file could not be read.
    Io(String),
}

impl Error for GameError {}
impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::NotEnoughLetters => {
                write!(f, "there are not enough letters in the bag to redraw")
            }
            GameError::NotInRack => write!(f, "one or more placed tiles were not in the rack"),
            GameError::InvalidWord => write!(f, "a word was not in the dictionary"),
            GameError::PlacementCount => {
                write!(f, "at least 1 and no more than 7 tiles can be placed")
            }
            GameError::CoincedentTiles => write!(f, "tiles were placed over mismatched tiles"),
            GameError::DuplicatePosition => {
                write!(f, "two or more placed tiles share the same square")
            }
            GameError::RedrawCount => write!(
                f,
                "at least 1 and up to the number of tiles on the rack can be redrawn"
            ),
            GameError::MustIntersectStart => write!(f, "a tile must be placed on the start square"),
            GameError::WordsNeedTwoLetters => write!(f, "every word needs at least two letters"),
            GameError::NotConnected => {
                write!(f, "every placed tile must neighbour another tile")
            }
            GameError::MissingLetter => {
                write!(f, "a blank tile placed on the board did not specify a letter")
            }
            GameError::Over => write!(f, "the game is already over"),
            GameError::ScoreMismatch {
                event,
                expected,
                actual,
            } => write!(
                f,
                "event {event}: expected cumulative score {expected}, got {actual}"
            ),
            GameError::MalformedGcgLine(line) => write!(f, "malformed gcg line: {line}"),
            GameError::Io(msg) => write!(f, "i/o error: {msg}"),
        }
    }
}
impl From<io::Error> for GameError {
    fn from(err: io::Error) -> Self {
        GameError::Io(err.to_string())
    }
}
