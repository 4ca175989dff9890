//! Entity definitions for the account service.

mod token;
mod user;

pub use token::*;
pub use user::*;
