pub mod categories;
pub mod channels;
