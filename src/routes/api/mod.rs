pub mod board;
pub mod categories;
pub mod items;
pub mod lists;
pub mod public;
mod router;

pub use router::router;
