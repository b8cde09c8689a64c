//! Polling accumulator for flow graphs.
//!
//! Drives repeated execution of an external query, folds each result into
//! the session's flow graph, and decides between resetting (query-affecting
//! parameter change) and merging (steady polling). Consumers watch
//! `GraphSnapshot`s.

pub mod accumulator;
pub mod config;
pub mod error;
pub mod executor;
pub mod session;
pub mod snapshot;

pub use accumulator::Accumulator;
pub use config::{load_config, save_config, PollConfig, CONFIG_VERSION};
pub use error::{PollError, PollResult};
pub use executor::{QueryExecutor, ReplayExecutor};
pub use session::{ParamChange, PollOutcome, PollPhase, PollTicket, Session};
pub use snapshot::GraphSnapshot;
