pub mod providers;
pub mod relay;
pub mod token;

pub use relay::ChatRelay;
pub use token::TokenService;
