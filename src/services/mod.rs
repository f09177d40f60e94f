pub mod search;
pub mod support_service;
pub mod team_service;
pub mod tree_view;
pub mod wallet_service;

pub use search::*;
pub use support_service::*;
pub use team_service::*;
pub use tree_view::*;
pub use wallet_service::*;
