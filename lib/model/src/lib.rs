mod error;
mod format;
mod identifier;
mod outcome;

pub use error::*;
pub use format::*;
pub use identifier::*;
pub use outcome::*;
