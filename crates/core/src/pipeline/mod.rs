pub mod cluster_engine;
pub mod cluster_photos_use_case;
pub mod infrastructure;
