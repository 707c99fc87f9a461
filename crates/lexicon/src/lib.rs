//! Sentiment lexicon for Gridsent.
//!
//! Loads an AFINN-style score file into word and phrase tables and scores
//! free text against them. Phrases are matched and stripped before the
//! remaining text is tokenized, so a phrase's component words are never
//! double-counted.

mod error;
mod lexicon;

pub use error::{LexiconError, Result};
pub use lexicon::Lexicon;
