pub mod error;
pub mod html;
pub mod model;
pub mod observer;
pub mod registry;
pub(crate) mod serialize;
pub mod summary;
