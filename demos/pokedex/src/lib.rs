//! Pokédex lookup built on `use_async`: type a name, watch it load, recover
//! from a miss through an error boundary.

pub mod catalog;
pub mod session;
pub mod views;

pub use catalog::{Catalog, FetchError, Pokemon, fetch_pokemon};
pub use session::Session;
pub use views::*;
