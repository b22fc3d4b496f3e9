pub mod bounding_box;
pub mod face;
pub mod photo;
