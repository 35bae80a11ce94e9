//! Tabular input and output formats around the core models.

mod setup_reader;
pub use self::setup_reader::read_setup;

mod table;
pub use self::table::{build_event_table, EventRow};

mod sequence_writer;
pub use self::sequence_writer::write_sequence;
