use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MemberStatus {
    Active,
    Inactive,
}

impl MemberStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, MemberStatus::Active)
    }
}

impl std::fmt::Display for MemberStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MemberStatus::Active => write!(f, "active"),
            MemberStatus::Inactive => write!(f, "inactive"),
        }
    }
}

/// 推荐网络中的一个会员
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberRecord {
    /// 会员号，形如 N78349223，全树唯一且不复用
    pub id: String,
    pub name: String,
    pub email: String,
    /// 加入日期，入树后不再变更
    pub join_date: NaiveDate,
    pub status: MemberStatus,
    /// 直推人数，必须等于树中直接子节点数，由树维护
    pub direct_referral_count: u32,
    /// 本人直接收益（美分），不含层级奖金
    pub earnings_cents: i64,
}

impl MemberRecord {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        join_date: NaiveDate,
        status: MemberStatus,
        earnings_cents: i64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            join_date,
            status,
            direct_referral_count: 0,
            earnings_cents,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }
}
