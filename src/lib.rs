pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod tree;
pub mod utils;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use tree::{ReferralNode, ReferralTree, Walk};
