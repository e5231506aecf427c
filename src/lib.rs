//! engine-2048: the board engine of the 2048 sliding-tile game
//!
//! This crate provides:
//! - A `Game` type owning a 4x4 grid, a running score and a one-step undo snapshot
//! - Pure helpers for the slide/merge rule (`merge_line`, `shift`) and terminal checks
//! - An `EngineConfig` loadable from TOML (spawn odds, seed, terminal-scan policy, start board)
//! - The fixed driver scenarios (`scenarios` module)
//!
//! Quick start:
//! ```
//! use engine_2048::engine::{Game, Move};
//!
//! // Deterministic game with a seeded RNG
//! let mut game = Game::seeded(42);
//! let outcome = game.make_move(Move::Left);
//! assert!(outcome.spawned.is_some());
//! assert_eq!(game.score(), outcome.gained);
//!
//! // One level of undo
//! game.undo();
//! assert_eq!(game.count_empty(), 14);
//! ```
//!
//! Full loop (simplest possible)
//! ```
//! use engine_2048::engine::{Game, Move};
//!
//! let mut game = Game::seeded(123);
//! let mut moves = 0usize;
//! while !game.game_over() && moves < 64 {
//!     game.make_move(Move::ALL[moves % 4]);
//!     moves += 1;
//! }
//! println!("{game}");
//! ```
//!
pub mod config;
pub mod engine;
pub mod scenarios;
