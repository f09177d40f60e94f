use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    Open,
    Pending,
    Closed,
}

impl std::fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TicketStatus::Open => write!(f, "open"),
            TicketStatus::Pending => write!(f, "pending"),
            TicketStatus::Closed => write!(f, "closed"),
        }
    }
}

/// 新建工单表单的分类下拉项
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TicketCategory {
    Account,
    Payment,
    Referral,
    Technical,
    Other,
}

impl std::fmt::Display for TicketCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TicketCategory::Account => write!(f, "Account"),
            TicketCategory::Payment => write!(f, "Payment"),
            TicketCategory::Referral => write!(f, "Referral"),
            TicketCategory::Technical => write!(f, "Technical"),
            TicketCategory::Other => write!(f, "Other"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Support,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketMessage {
    pub id: String,
    pub sender: Sender,
    pub name: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    /// 形如 TKT-10045
    pub id: String,
    pub subject: String,
    pub status: TicketStatus,
    pub category: TicketCategory,
    pub created_at: DateTime<Utc>,
    pub messages: Vec<TicketMessage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTicketRequest {
    pub subject: String,
    pub category: TicketCategory,
    pub message: String,
}
