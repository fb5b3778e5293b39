pub mod csv;
pub mod source;
pub mod table;

pub use source::load_events;
