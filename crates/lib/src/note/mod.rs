//! Note records and their lock transitions.

mod errors;
pub mod lock;
mod record;
mod update;

pub use errors::NoteError;
pub use record::{LockedBody, NoteBody, NoteRecord};
pub use update::{NoteUpdate, Position};
