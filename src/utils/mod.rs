pub mod ids;

pub use ids::{generate_member_id, generate_ticket_id, generate_transaction_id};
