pub mod palette;
pub mod terminal;
