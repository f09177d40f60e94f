use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// 层级佣金比例表，第1层（直推）在前，超出表长的层级比例为0
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommissionRateTable {
    rates: Vec<f64>,
}

impl CommissionRateTable {
    pub fn new(rates: Vec<f64>) -> AppResult<Self> {
        for (i, rate) in rates.iter().enumerate() {
            if !(0.0..=1.0).contains(rate) {
                return Err(AppError::InvalidRateTable(format!(
                    "Level {} rate {} is out of range 0.0..=1.0",
                    i + 1,
                    rate
                )));
            }
        }
        Ok(Self { rates })
    }

    /// 第 depth 层（1起）的比例，超出表长返回0
    pub fn rate_for(&self, depth: usize) -> f64 {
        if depth == 0 {
            return 0.0;
        }
        self.rates.get(depth - 1).copied().unwrap_or(0.0)
    }

    pub fn max_depth(&self) -> usize {
        self.rates.len()
    }
}

/// 运营方下发的完整佣金方案：层级比例表 + 弱区奖金比例
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommissionConfig {
    pub rate_table: CommissionRateTable,
    pub bonus_rate: f64,
}

impl CommissionConfig {
    pub fn new(rate_table: CommissionRateTable, bonus_rate: f64) -> AppResult<Self> {
        if !(0.0..=1.0).contains(&bonus_rate) {
            return Err(AppError::InvalidRateTable(format!(
                "Bonus rate {bonus_rate} is out of range 0.0..=1.0"
            )));
        }
        Ok(Self {
            rate_table,
            bonus_rate,
        })
    }
}
