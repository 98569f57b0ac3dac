pub mod config;
pub mod errors;
pub mod events;
pub mod field;
pub mod form;
pub mod options;
pub mod resolver;
pub mod schema;
pub mod state;
pub mod submit;
pub mod sync;

pub use config::*;
pub use errors::*;
pub use events::*;
pub use field::*;
pub use form::*;
pub use options::*;
pub use resolver::*;
pub use schema::*;
pub use state::*;
pub use submit::*;
pub use sync::*;
