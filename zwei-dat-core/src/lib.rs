pub mod dat;
pub mod error;
pub mod filename;
pub mod group;
pub mod read;
pub mod write;

mod spec;
