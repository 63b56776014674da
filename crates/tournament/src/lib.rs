//! Tournament Runner
//!
//! Command-line driver around `tourney_core`:
//! - Enrolls players from a JSON registry
//! - Plays rounds interactively, asking the operator for each result
//! - Saves after every change so a tournament can be resumed later
//! - Prints standings and full tournament reports
//!
//! # Usage
//!
//! ```bash
//! # Create a tournament with four registered players and start playing
//! cargo run -p tournament -- new "Club Night" --players AB1 CD2 EF3 GH4
//!
//! # Pick it up again after quitting
//! cargo run -p tournament -- resume "Club Night"
//!
//! # Show registered players, saved tournaments and a report
//! cargo run -p tournament -- players
//! cargo run -p tournament -- list
//! cargo run -p tournament -- report "Club Night"
//! ```

pub mod cli;
pub mod config;
pub mod registry;
pub mod report;
pub mod session;

pub use cli::*;
pub use config::*;
pub use registry::*;
pub use report::*;
pub use session::*;
