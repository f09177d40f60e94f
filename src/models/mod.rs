pub mod commission;
pub mod member;
pub mod team;
pub mod ticket;
pub mod transaction;

pub use commission::*;
pub use member::*;
pub use team::*;
pub use ticket::*;
pub use transaction::*;
