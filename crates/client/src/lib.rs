//! Text front end for the dungeon runtime.
//!
//! # Architecture
//!
//! ```text
//! dungeon (binary, composition root)
//!   ├─→ game-content  (loads the world from a data directory)
//!   ├─→ runtime       (turn worker + snapshot broadcast)
//!   └─→ text clients  (one printer per registered client, one stdin reader)
//! ```
//!
//! The binary owns no game logic: it reads key lines from stdin, turns them
//! into [`runtime::Input`] values and prints every snapshot it receives.

pub mod config;
pub mod input;
pub mod logging;
pub mod render;

pub use config::ClientConfig;
pub use input::parse_line;
pub use render::render_frame;
