//! # spider-engine: Spider Solitaire Rule and State Engine
//!
//! A deterministic engine for single-player Spider Solitaire at one, two or
//! four suits. Owns the board, enforces move legality, scores, keeps a bounded
//! undo history, suggests moves, auto-completes the end game, and validates
//! saved games. Rendering, input and timers belong to the caller.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card)
//! - [`deck`] - Difficulty levels and seeded 104-card deck construction
//! - [`board`] - Columns, stock and foundation with the primitive mutations
//! - [`rules`] - Run detection, move validation and completed-set checks
//! - [`scoring`] - Score and move counter
//! - [`history`] - Bounded snapshot stack for undo
//! - [`hint`] - Heuristic move suggestions
//! - [`solver`] - Single-step end-game auto-complete
//! - [`persist`] - Saved-game record, validation and storage port
//! - [`engine`] - Command surface tying it all together
//! - [`errors`] - Error types for engine and storage operations
//!
//! ## Quick Start
//!
//! ```rust
//! use spider_engine::deck::Level;
//! use spider_engine::engine::Engine;
//! use spider_engine::hint::Hint;
//!
//! let mut engine = Engine::new(Level::Intermediate, Some(7));
//! let state = engine.state();
//! assert_eq!(state.score, 500);
//! assert_eq!(state.deals_remaining, 8);
//!
//! if let Hint::Move(mv) = engine.request_hint() {
//!     engine.move_run(mv.from, mv.start, mv.to).expect("hinted moves are legal");
//! }
//! ```
//!
//! ## Deterministic Deals
//!
//! The same level and seed always produce the same layout:
//!
//! ```rust
//! use spider_engine::deck::Level;
//! use spider_engine::engine::Engine;
//!
//! let a = Engine::new(Level::Advanced, Some(42));
//! let b = Engine::new(Level::Advanced, Some(42));
//! assert_eq!(a.board(), b.board());
//! ```
//!
//! ## Saving and Resuming
//!
//! ```rust
//! use spider_engine::deck::Level;
//! use spider_engine::engine::Engine;
//! use spider_engine::persist::{GameStore, MemoryStore};
//!
//! let mut engine = Engine::new(Level::Beginner, Some(3));
//! engine.deal().unwrap();
//!
//! let mut store = MemoryStore::new();
//! store.save(&engine.serialize()).unwrap();
//!
//! let record = store.load().unwrap().expect("slot was just written");
//! let resumed = Engine::from_record(&record).unwrap();
//! assert_eq!(resumed.board(), engine.board());
//! assert_eq!(resumed.score(), 495);
//! ```

pub mod board;
pub mod cards;
pub mod deck;
pub mod engine;
pub mod errors;
pub mod hint;
pub mod history;
pub mod persist;
pub mod rules;
pub mod scoring;
pub mod solver;
