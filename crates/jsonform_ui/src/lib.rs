pub mod form_panel;
pub mod output;
pub mod runner;

pub use form_panel::{FormHost, SchemaFormPanel};
pub use output::{JsonLinesHandler, OutputTarget};
pub use runner::{run, window_title};
