pub mod token_provider;

pub use token_provider::{Clock, TokenProvider};
