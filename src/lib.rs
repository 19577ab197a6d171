//! A crossword-rules move generator, scorer and lexicon for a
//! 15x15 board, in the style of Appel & Jacobson (1988).

// Produce a compiler warning for missing documentation.
#![warn(missing_docs)]

pub mod crosscheck;
pub mod error;
pub mod game;
pub mod gcg;
pub mod lexicon;
pub mod movegen;
pub mod scoring;
pub mod util;
