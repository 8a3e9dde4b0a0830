pub mod entity;
pub mod mime;
pub mod processor;
pub mod share;

pub use entity::EntityStore;
pub use share::ShareService;
