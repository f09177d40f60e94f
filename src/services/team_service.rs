use crate::error::{AppError, AppResult};
use crate::models::{CommissionConfig, IncomeBreakdown, TeamStats};
use crate::tree::ReferralTree;

/// 团队/收入聚合引擎。只读计算，不缓存、不改树，可重复调用。
#[derive(Clone)]
pub struct TeamService {
    plan: CommissionConfig,
}

impl TeamService {
    pub fn new(plan: CommissionConfig) -> Self {
        Self { plan }
    }

    pub fn plan(&self) -> &CommissionConfig {
        &self.plan
    }

    /// 团队概览统计。统计范围包含 id 本人（Team 页的
    /// "Total Team Members" 计入自己）。
    pub fn team_stats(&self, tree: &ReferralTree, id: &str) -> AppResult<TeamStats> {
        let mut stats = TeamStats {
            total_members: 0,
            active_members: 0,
            inactive_members: 0,
        };
        for (_, node) in tree.walk(id)? {
            stats.total_members += 1;
            if node.member().is_active() {
                stats.active_members += 1;
            } else {
                stats.inactive_members += 1;
            }
        }
        Ok(stats)
    }

    /// 层级佣金：对每个第 d 层（直推为第1层）的下级，
    /// 取其本人收益乘以比例表第 d 层的比例后求和。
    /// 只看每个下级自己的直接收益，与其是否还有下线无关。
    pub fn level_commission(&self, tree: &ReferralTree, id: &str) -> AppResult<i64> {
        let mut total = 0.0_f64;
        for (depth, node) in tree.walk(id)? {
            if depth == 0 {
                continue;
            }
            let rate = self.plan.rate_table.rate_for(depth);
            if rate > 0.0 {
                total += node.member().earnings_cents as f64 * rate;
            }
        }
        Ok(total.round() as i64)
    }

    /// 某条腿（子树）的业绩：含腿头本人在内的收益合计
    fn volume(&self, tree: &ReferralTree, id: &str) -> AppResult<i64> {
        Ok(tree
            .walk(id)?
            .map(|(_, node)| node.member().earnings_cents)
            .sum())
    }

    /// 双轨制弱区奖金：bonus_rate * min(左区业绩, 右区业绩)。
    /// 只对不超过两个直推的节点有定义，缺失的腿业绩记0。
    pub fn weaker_leg_bonus(&self, tree: &ReferralTree, id: &str) -> AppResult<i64> {
        let node = tree.find(id)?;
        let children = node.children();
        if children.len() > 2 {
            return Err(AppError::ValidationError(format!(
                "Member {id} has {} direct referrals; the weaker-leg plan applies to at most two legs",
                children.len()
            )));
        }
        let left = match children.first() {
            Some(c) => self.volume(tree, c.id())?,
            None => 0,
        };
        let right = match children.get(1) {
            Some(c) => self.volume(tree, c.id())?,
            None => 0,
        };
        Ok((self.plan.bonus_rate * left.min(right) as f64).round() as i64)
    }

    /// 收入页三张卡片。非双轨节点（直推超过两人）的弱区奖金记0。
    pub fn income_breakdown(&self, tree: &ReferralTree, id: &str) -> AppResult<IncomeBreakdown> {
        let direct = tree.find(id)?.member().earnings_cents;
        let team = self.level_commission(tree, id)?;
        let referral = match self.weaker_leg_bonus(tree, id) {
            Ok(bonus) => bonus,
            Err(AppError::ValidationError(_)) => 0,
            Err(e) => return Err(e),
        };
        Ok(IncomeBreakdown {
            direct_income_cents: direct,
            team_income_cents: team,
            referral_bonus_cents: referral,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CommissionRateTable, MemberRecord, MemberStatus};
    use chrono::NaiveDate;

    fn member(id: &str, active: bool, earnings_cents: i64) -> MemberRecord {
        MemberRecord::new(
            id,
            format!("Member {id}"),
            format!("{}@example.com", id.to_lowercase()),
            NaiveDate::parse_from_str("2023-05-10", "%Y-%m-%d").unwrap(),
            if active {
                MemberStatus::Active
            } else {
                MemberStatus::Inactive
            },
            earnings_cents,
        )
    }

    fn service(rates: Vec<f64>, bonus_rate: f64) -> TeamService {
        let table = CommissionRateTable::new(rates).unwrap();
        TeamService::new(CommissionConfig::new(table, bonus_rate).unwrap())
    }

    /// R(1000) -> A(500, active), B(300, inactive); A -> C(200, active)
    fn sample_tree() -> ReferralTree {
        let mut tree = ReferralTree::new(member("R", true, 1000_00));
        tree.insert("R", member("A", true, 500_00)).unwrap();
        tree.insert("R", member("B", false, 300_00)).unwrap();
        tree.insert("A", member("C", true, 200_00)).unwrap();
        tree
    }

    #[test]
    fn test_team_stats_includes_self() {
        // 统计口径：包含本人，Total = subtree_size + 1
        let tree = sample_tree();
        let svc = service(vec![0.10, 0.05], 0.10);
        let stats = svc.team_stats(&tree, "R").unwrap();
        assert_eq!(
            stats,
            TeamStats {
                total_members: 3 + 1,
                active_members: 3,
                inactive_members: 1,
            }
        );
        assert_eq!(
            stats.total_members as usize,
            tree.subtree_size("R").unwrap() + 1
        );
    }

    #[test]
    fn test_team_stats_from_mid_tree_node() {
        let tree = sample_tree();
        let svc = service(vec![0.10, 0.05], 0.10);
        // 以 A 为起点：A 本人 + C
        let stats = svc.team_stats(&tree, "A").unwrap();
        assert_eq!(stats.total_members, 2);
        assert_eq!(stats.active_members, 2);
        assert_eq!(stats.inactive_members, 0);
    }

    #[test]
    fn test_level_commission_two_levels() {
        let tree = sample_tree();
        let svc = service(vec![0.10, 0.05], 0.10);
        // 0.10*500 + 0.10*300 + 0.05*200 = 90
        assert_eq!(svc.level_commission(&tree, "R").unwrap(), 90_00);
    }

    #[test]
    fn test_level_commission_zero_for_leaf() {
        let tree = sample_tree();
        let svc = service(vec![0.10, 0.05], 0.10);
        assert_eq!(svc.level_commission(&tree, "C").unwrap(), 0);
    }

    #[test]
    fn test_level_commission_depth_beyond_table_is_free() {
        // 只配一层比例，第二层不计佣
        let tree = sample_tree();
        let svc = service(vec![0.10], 0.10);
        assert_eq!(svc.level_commission(&tree, "R").unwrap(), 80_00);
    }

    #[test]
    fn test_weaker_leg_bonus() {
        let tree = sample_tree();
        let svc = service(vec![0.10, 0.05], 0.10);
        // 左区 A+C = 700, 右区 B = 300，弱区为右
        assert_eq!(svc.weaker_leg_bonus(&tree, "R").unwrap(), 30_00);
    }

    #[test]
    fn test_weaker_leg_bonus_commutative() {
        // 左右腿对调不影响奖金
        let mut swapped = ReferralTree::new(member("R", true, 1000_00));
        swapped.insert("R", member("B", false, 300_00)).unwrap();
        swapped.insert("R", member("A", true, 500_00)).unwrap();
        swapped.insert("A", member("C", true, 200_00)).unwrap();
        let svc = service(vec![0.10, 0.05], 0.10);
        assert_eq!(
            svc.weaker_leg_bonus(&sample_tree(), "R").unwrap(),
            svc.weaker_leg_bonus(&swapped, "R").unwrap()
        );
    }

    #[test]
    fn test_weaker_leg_bonus_missing_leg_is_zero() {
        let tree = sample_tree();
        let svc = service(vec![0.10, 0.05], 0.10);
        // A 只有一条腿，min(700-500=200..) —— 左区 C=200，右区缺失=0
        assert_eq!(svc.weaker_leg_bonus(&tree, "A").unwrap(), 0);
        assert_eq!(svc.weaker_leg_bonus(&tree, "C").unwrap(), 0);
    }

    #[test]
    fn test_weaker_leg_bonus_undefined_beyond_two_legs() {
        let mut tree = sample_tree();
        tree.insert("R", member("D", true, 100_00)).unwrap();
        let svc = service(vec![0.10, 0.05], 0.10);
        assert!(matches!(
            svc.weaker_leg_bonus(&tree, "R"),
            Err(AppError::ValidationError(_))
        ));
    }

    #[test]
    fn test_aggregations_are_pure() {
        let tree = sample_tree();
        let svc = service(vec![0.10, 0.05], 0.10);
        let first = svc.level_commission(&tree, "R").unwrap();
        let second = svc.level_commission(&tree, "R").unwrap();
        assert_eq!(first, second);
        assert_eq!(
            svc.team_stats(&tree, "R").unwrap(),
            svc.team_stats(&tree, "R").unwrap()
        );
    }

    #[test]
    fn test_income_breakdown() {
        let tree = sample_tree();
        let svc = service(vec![0.10, 0.05], 0.10);
        let income = svc.income_breakdown(&tree, "R").unwrap();
        assert_eq!(income.direct_income_cents, 1000_00);
        assert_eq!(income.team_income_cents, 90_00);
        assert_eq!(income.referral_bonus_cents, 30_00);
        assert_eq!(income.total_cents(), 1120_00);
    }

    #[test]
    fn test_income_breakdown_non_binary_has_no_leg_bonus() {
        let mut tree = sample_tree();
        tree.insert("R", member("D", true, 100_00)).unwrap();
        let svc = service(vec![0.10, 0.05], 0.10);
        let income = svc.income_breakdown(&tree, "R").unwrap();
        assert_eq!(income.referral_bonus_cents, 0);
        assert_eq!(income.team_income_cents, 100_00);
    }
}
