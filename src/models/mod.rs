//! Data models for headline annotation.

mod entity;
mod row;

pub use entity::Entity;
pub use row::{AnnotatedRow, Row};
