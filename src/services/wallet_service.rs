use crate::config::LimitsConfig;
use crate::error::{AppError, AppResult};
use crate::models::{Transaction, TransactionKind, TransactionStatus};
use crate::utils::generate_transaction_id;
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// 钱包卡片（Dashboard 的 Wallet 区块），金额为美分
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Wallet {
    pub balance_cents: i64,
    pub pending_cents: i64,
    pub total_deposited_cents: i64,
    pub total_withdrawn_cents: i64,
}

/// 内存钱包：充值/提现校验最低金额，每次变动追加一条流水
#[derive(Debug, Clone)]
pub struct WalletService {
    limits: LimitsConfig,
    wallet: Wallet,
    transactions: Vec<Transaction>,
}

impl WalletService {
    pub fn new(limits: LimitsConfig) -> Self {
        Self {
            limits,
            wallet: Wallet::default(),
            transactions: Vec::new(),
        }
    }

    pub fn wallet(&self) -> Wallet {
        self.wallet
    }

    /// 流水，最新在前（Recent Transactions 列表的顺序）
    pub fn transactions(&self) -> Vec<&Transaction> {
        self.transactions.iter().rev().collect()
    }

    /// 充值。低于最低充值金额时拒绝，钱包不变。
    pub fn deposit(&mut self, amount_cents: i64) -> AppResult<Transaction> {
        if amount_cents < self.limits.min_deposit_cents {
            return Err(AppError::ValidationError(format!(
                "Minimum deposit is ${:.2}",
                self.limits.min_deposit_cents as f64 / 100.0
            )));
        }
        self.wallet.balance_cents += amount_cents;
        self.wallet.total_deposited_cents += amount_cents;
        log::info!("Deposit of {amount_cents} cents credited");
        Ok(self.record(TransactionKind::Deposit, amount_cents))
    }

    /// 提现。低于最低提现金额或余额不足时拒绝，钱包不变。
    pub fn withdraw(&mut self, amount_cents: i64) -> AppResult<Transaction> {
        if amount_cents < self.limits.min_withdrawal_cents {
            return Err(AppError::ValidationError(format!(
                "Minimum withdrawal is ${:.2}",
                self.limits.min_withdrawal_cents as f64 / 100.0
            )));
        }
        if amount_cents > self.wallet.balance_cents {
            return Err(AppError::ValidationError(
                "You don't have enough balance to withdraw this amount".to_string(),
            ));
        }
        self.wallet.balance_cents -= amount_cents;
        self.wallet.total_withdrawn_cents += amount_cents;
        log::info!("Withdrawal of {amount_cents} cents debited");
        Ok(self.record(TransactionKind::Withdrawal, amount_cents))
    }

    /// 入账一笔佣金/奖金（直推佣金、团队奖金、推荐奖金）
    pub fn record_commission(
        &mut self,
        kind: TransactionKind,
        amount_cents: i64,
    ) -> AppResult<Transaction> {
        match kind {
            TransactionKind::DirectCommission
            | TransactionKind::TeamBonus
            | TransactionKind::ReferralBonus => {}
            other => {
                return Err(AppError::ValidationError(format!(
                    "{other} is not a commission kind"
                )));
            }
        }
        if amount_cents < 0 {
            return Err(AppError::ValidationError(
                "Commission amount must be non-negative".to_string(),
            ));
        }
        self.wallet.balance_cents += amount_cents;
        Ok(self.record(kind, amount_cents))
    }

    fn record(&mut self, kind: TransactionKind, amount_cents: i64) -> Transaction {
        let existing: Vec<&str> = self.transactions.iter().map(|t| t.id.as_str()).collect();
        let transaction = Transaction {
            id: generate_transaction_id(&existing),
            kind,
            amount_cents,
            status: TransactionStatus::Completed,
            created_at: Utc::now(),
        };
        self.transactions.push(transaction.clone());
        transaction
    }
}
