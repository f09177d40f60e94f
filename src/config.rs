use crate::error::{AppError, AppResult};
use crate::models::{CommissionConfig, CommissionRateTable};
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub commission: CommissionSection,
    #[serde(default)]
    pub limits: LimitsConfig,
}

/// 佣金方案配置段（config.toml 的 [commission]）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommissionSection {
    /// 各层比例，第1层在前
    pub level_rates: Vec<f64>,
    /// 弱区奖金比例
    pub bonus_rate: f64,
}

impl Default for CommissionSection {
    fn default() -> Self {
        // 默认方案: 一层10%，二层5%，三层2%，弱区奖金10%
        Self {
            level_rates: vec![0.10, 0.05, 0.02],
            bonus_rate: 0.10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsConfig {
    /// 最低充值金额（美分）
    pub min_deposit_cents: i64,
    /// 最低提现金额（美分）
    pub min_withdrawal_cents: i64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        // 面板页面显示的 "Minimum deposit: $100" / "Minimum withdrawal: $100"
        Self {
            min_deposit_cents: 10_000,
            min_withdrawal_cents: 10_000,
        }
    }
}

impl Config {
    pub fn from_toml() -> AppResult<Self> {
        let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        use std::io::ErrorKind;

        // 尝试读取配置文件，不存在则使用默认值
        let mut config: Config = match std::fs::read_to_string(&config_path) {
            Ok(config_str) => toml::from_str(&config_str)
                .map_err(|e| AppError::ConfigError(format!("Failed to parse {config_path}: {e}")))?,
            Err(e) if e.kind() == ErrorKind::NotFound => Config {
                commission: CommissionSection::default(),
                limits: LimitsConfig::default(),
            },
            Err(e) => {
                return Err(AppError::ConfigError(format!(
                    "Failed to read {config_path}: {e}"
                )));
            }
        };

        // 环境变量覆盖（即便文件存在时也覆盖）
        if let Ok(v) = env::var("COMMISSION_LEVEL_RATES") {
            let rates: Result<Vec<f64>, _> =
                v.split(',').map(|s| s.trim().parse::<f64>()).collect();
            config.commission.level_rates = rates.map_err(|_| {
                AppError::ConfigError("COMMISSION_LEVEL_RATES must be comma-separated numbers".to_string())
            })?;
        }
        if let Ok(v) = env::var("COMMISSION_BONUS_RATE")
            && let Ok(r) = v.parse()
        {
            config.commission.bonus_rate = r;
        }
        if let Ok(v) = env::var("MIN_DEPOSIT_CENTS")
            && let Ok(n) = v.parse()
        {
            config.limits.min_deposit_cents = n;
        }
        if let Ok(v) = env::var("MIN_WITHDRAWAL_CENTS")
            && let Ok(n) = v.parse()
        {
            config.limits.min_withdrawal_cents = n;
        }

        // 提前校验比例表，启动时即报错
        config.commission_config()?;
        Ok(config)
    }

    /// 转换为已经校验过的佣金方案
    pub fn commission_config(&self) -> AppResult<CommissionConfig> {
        let table = CommissionRateTable::new(self.commission.level_rates.clone())?;
        CommissionConfig::new(table, self.commission.bonus_rate)
    }
}
