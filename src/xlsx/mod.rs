pub mod writer;

pub use writer::write_rankings_to_xlsx;
