pub mod csv;
pub mod source;
