//! Game rules for Qirkat
//!
//! This module implements move legality and generation:
//! - Step rules (adjacency by square parity, no moving backward, the
//!   forbidden-reversal table)
//! - Jump rules (mandatory captures, recursive chain enumeration,
//!   full- and partial-chain validation)

pub mod jumps;
pub mod steps;

// Re-exports for convenient access
pub use jumps::{check_jump, jump_possible, jump_possible_from, jumps_from};
pub use steps::{forbidden_reversal, legal_step, move_possible, step_moves_from};
