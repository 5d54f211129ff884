pub mod command_parser;
pub mod names;
pub mod tokenizer;
