// Location resolution exports
pub mod label;
pub mod resolver;

pub use label::extract_place_label;
pub use resolver::{LocationResolver, DEFAULT_SHORT_LINK_HOSTS};
