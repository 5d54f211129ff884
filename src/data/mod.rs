pub mod bit_copy;
pub mod datum_type_parser;
pub mod format;
pub mod format_type;
pub mod small_float;
pub mod type_parser;
pub mod types;
