pub mod backoff;
pub mod path;
pub mod errors;

pub use backoff::*;
pub use path::*;
pub use errors::*;
