#![warn(missing_docs)]

pub mod panic;
