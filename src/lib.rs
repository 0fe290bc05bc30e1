//! ZoneGrid
//!
//! Terminal catalog browser for "zones": fetches a JSON record list, lets
//! you search, sort and page through it as a card grid, and opens a zone's
//! document in an embedded viewer. Also exports and imports the persisted
//! key-value store and cookie jar as `.data` files.
//!
//! Pure core (`model`, `state`, `codec`) / impure shell (`source`,
//! `viewer`, `view`).

pub mod codec;
pub mod config;
pub mod logging;
pub mod model;
pub mod source;
pub mod state;
pub mod view;
pub mod viewer;
