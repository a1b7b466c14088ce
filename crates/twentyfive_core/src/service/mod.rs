//! Core use-case services.
//!
//! # Responsibility
//! - Own the shared board and route every operation through the engine and
//!   the repository.
//! - Keep transports (CLI today) decoupled from storage details.
//!
//! # See also
//! - crate::engine
//! - crate::repo::board_repo

pub mod board_store;
pub mod requests;
pub mod seed;
