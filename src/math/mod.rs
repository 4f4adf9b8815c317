pub mod cache;
pub mod color;
pub mod suggest;
pub mod wcag;
