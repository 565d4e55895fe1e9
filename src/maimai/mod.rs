pub mod best;
pub mod rating;
pub mod schema;
