//! File format parsers and writers

pub mod strings;
