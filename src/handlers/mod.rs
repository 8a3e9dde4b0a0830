pub mod content;
pub mod share;
pub mod view;
