//! Chess rules shared by the match service and the client predictor.
//!
//! Board model, pseudo-legal move generation, the turn/ownership gate and the
//! transition engine live here and nowhere else. Everything is synchronous and
//! side-effect free: states go in by reference and new states come out.

pub mod action;
pub mod board;
pub mod coord;
pub mod engine;
pub mod envelope;
pub mod error;
pub mod gate;
pub mod handler;
pub mod movegen;
pub mod pairing;
pub mod piece;
pub mod setup;
pub mod state;

pub use action::{Action, ActionPayload, ActionType};
pub use board::Board;
pub use coord::{index_to_square, square_to_index, Square};
pub use envelope::Envelope;
pub use error::RulesError;
pub use piece::{Color, Piece, PieceKind};
pub use state::{GameState, MatchRecord, MatchSnapshot, Phase};
