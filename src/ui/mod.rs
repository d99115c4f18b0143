pub mod footer;
pub mod screen;
pub mod theme;
