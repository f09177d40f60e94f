use serde::{Deserialize, Serialize};

/// 团队概览卡片的三个数字（Total / Active / Inactive）
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TeamStats {
    pub total_members: u32,
    pub active_members: u32,
    pub inactive_members: u32,
}

/// 团队列表的标签页筛选范围
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StatusScope {
    All,
    Active,
    Inactive,
}

impl StatusScope {
    pub fn matches(&self, active: bool) -> bool {
        match self {
            StatusScope::All => true,
            StatusScope::Active => active,
            StatusScope::Inactive => !active,
        }
    }
}

/// 收入页三张卡片：直推收入 / 团队收入 / 推荐奖金（美分）
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct IncomeBreakdown {
    pub direct_income_cents: i64,
    pub team_income_cents: i64,
    pub referral_bonus_cents: i64,
}

impl IncomeBreakdown {
    /// Total Gain 卡片显示的合计
    pub fn total_cents(&self) -> i64 {
        self.direct_income_cents + self.team_income_cents + self.referral_bonus_cents
    }
}
