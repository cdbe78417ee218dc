//! Adversarial search for Qirkat
//!
//! Contains the depth-bounded minimax searcher with alpha-beta pruning
//! and the degenerate random-move chooser used by the easy opponent.

pub mod minimax;

pub use minimax::{random_move, Searcher};
