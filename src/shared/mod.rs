pub mod intern;

pub use intern::*;
