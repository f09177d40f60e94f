use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    /// 钱包充值
    Deposit,
    /// 钱包提现
    Withdrawal,
    /// 直推佣金
    DirectCommission,
    /// 团队奖金
    TeamBonus,
    /// 推荐（弱区）奖金
    ReferralBonus,
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionKind::Deposit => write!(f, "Deposit"),
            TransactionKind::Withdrawal => write!(f, "Withdrawal"),
            TransactionKind::DirectCommission => write!(f, "Direct Commission"),
            TransactionKind::TeamBonus => write!(f, "Team Bonus"),
            TransactionKind::ReferralBonus => write!(f, "Referral Bonus"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    Pending,
    Completed,
}

/// 收入页 "Recent Transactions" 列表的一条记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// 形如 TX78392
    pub id: String,
    pub kind: TransactionKind,
    /// 金额（美分，正数）
    pub amount_cents: i64,
    pub status: TransactionStatus,
    pub created_at: DateTime<Utc>,
}
