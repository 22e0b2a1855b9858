// Library target holds the puzzle core and round bookkeeping so benchmarks and
// integration tests can reach them. The terminal front end (app, event, ui)
// lives with the binary in main.rs.

pub mod categories;
pub mod config;
pub mod error;
pub mod logging;
pub mod puzzle;
pub mod session;
