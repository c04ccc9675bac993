//! ticket_shuffler — deterministic Keccak-512 ticket assignment.
//!
//! Hashes each student record under a shared distribution parameter and
//! reduces the digest into a bounded ticket range. Same data and parameter
//! always give the same tickets; a different parameter reshuffles everything
//! without touching the data; collisions between students are accepted.
//!
//! Modules:
//! - `types`: StudentRecord, Ticket, TicketAssignment.
//! - `error`: crate-wide error taxonomy.
//! - `assign`: TicketAssigner (parameter encoding + hash-to-ticket mapping).
//! - `input`: line/whitespace record reader (batch-or-fail).
//! - `par`: order-preserving parallel map.
//! - `eval`: distribution statistics (histogram, chi-square, divergence).

pub mod assign;
pub mod error;
pub mod eval;
pub mod input;
pub mod par;
pub mod types;

pub use assign::{TicketAssigner, PARAM_BYTES};
pub use error::ShuffleError;
pub use input::read_records;
pub use types::{StudentRecord, Ticket, TicketAssignment};
