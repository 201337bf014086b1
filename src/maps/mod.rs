// Map rendering exports
pub mod adapter;
pub mod board;
pub mod panel;
pub mod registry;

pub use adapter::{MapError, MapHandle, MapOptions, MapRenderer, MapWidgetSpec, MarkerHandle, MarkerOptions, WidgetSpecRenderer};
pub use board::{show_map_error, MapBoard, PlaceholderOutcome};
pub use panel::{escape_html, FallbackPanel};
pub use registry::{MapEntry, MapRegistry};
