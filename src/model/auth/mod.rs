//! Session tokens and the slots that hold them.

mod session;
mod token;

pub use session::{SessionScope, Sessions};
pub use token::AuthToken;
