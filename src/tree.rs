use crate::error::{AppError, AppResult};
use crate::models::{MemberRecord, MemberStatus};
use std::collections::HashSet;

/// 推荐树节点：父节点独占子树所有权，无环、不共享
#[derive(Debug, Clone)]
pub struct ReferralNode {
    member: MemberRecord,
    children: Vec<ReferralNode>,
}

impl ReferralNode {
    fn new(member: MemberRecord) -> Self {
        Self {
            member,
            children: Vec::new(),
        }
    }

    pub fn member(&self) -> &MemberRecord {
        &self.member
    }

    pub fn children(&self) -> &[ReferralNode] {
        &self.children
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn id(&self) -> &str {
        &self.member.id
    }

    fn find(&self, id: &str) -> Option<&ReferralNode> {
        if self.member.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(id))
    }

    fn find_mut(&mut self, id: &str) -> Option<&mut ReferralNode> {
        if self.member.id == id {
            return Some(self);
        }
        self.children.iter_mut().find_map(|c| c.find_mut(id))
    }
}

/// 以根会员为起点的推荐网络。节点只增不删，离开的会员仅标记为 inactive。
#[derive(Debug, Clone)]
pub struct ReferralTree {
    root: ReferralNode,
    ids: HashSet<String>,
}

impl ReferralTree {
    pub fn new(root: MemberRecord) -> Self {
        let mut ids = HashSet::new();
        ids.insert(root.id.clone());
        Self {
            root: ReferralNode::new(root),
            ids,
        }
    }

    pub fn root(&self) -> &ReferralNode {
        &self.root
    }

    /// 全树会员数（含根）
    pub fn member_count(&self) -> usize {
        self.ids.len()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// 把新会员挂到 parent_id 之下。失败时树不发生任何变化。
    pub fn insert(&mut self, parent_id: &str, mut member: MemberRecord) -> AppResult<()> {
        if member.earnings_cents < 0 {
            return Err(AppError::ValidationError(format!(
                "Member {} has negative earnings",
                member.id
            )));
        }
        // 先做全部检查，保证不会出现部分写入
        if self.ids.contains(&member.id) {
            return Err(AppError::DuplicateId(member.id));
        }
        let parent = self
            .root
            .find_mut(parent_id)
            .ok_or_else(|| AppError::ParentNotFound(parent_id.to_string()))?;

        // 新节点尚无下级
        member.direct_referral_count = 0;
        let id = member.id.clone();
        parent.children.push(ReferralNode::new(member));
        parent.member.direct_referral_count = parent.children.len() as u32;
        self.ids.insert(id.clone());
        log::debug!("Member {id} recruited under {parent_id}");
        Ok(())
    }

    pub fn find(&self, id: &str) -> AppResult<&ReferralNode> {
        self.root
            .find(id)
            .ok_or_else(|| AppError::NotFound(format!("Member {id} not found")))
    }

    /// 账号状态流转的唯一入口；树的结构操作从不改动状态
    pub fn set_status(&mut self, id: &str, status: MemberStatus) -> AppResult<()> {
        let node = self
            .root
            .find_mut(id)
            .ok_or_else(|| AppError::NotFound(format!("Member {id} not found")))?;
        node.member.status = status;
        log::info!("Member {id} status changed to {status}");
        Ok(())
    }

    /// id 的后代个数（不含自身），全量遍历
    pub fn subtree_size(&self, id: &str) -> AppResult<usize> {
        Ok(self.walk(id)?.count() - 1)
    }

    /// 以 id 为根的先序深度优先遍历，子节点按加入顺序访问。
    /// 迭代器借用整棵树，遍历期间无法同时做结构修改。
    pub fn walk(&self, id: &str) -> AppResult<Walk<'_>> {
        let start = self.find(id)?;
        Ok(Walk {
            stack: vec![(0, start)],
        })
    }
}

/// 惰性先序遍历，产出 (相对深度, 节点)，起点深度为0
pub struct Walk<'a> {
    stack: Vec<(usize, &'a ReferralNode)>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = (usize, &'a ReferralNode);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        // 逆序入栈，保证子节点按加入顺序出栈
        for child in node.children.iter().rev() {
            self.stack.push((depth + 1, child));
        }
        Some((depth, node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn member(id: &str, name: &str, active: bool, earnings_cents: i64) -> MemberRecord {
        MemberRecord::new(
            id,
            name,
            format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
            NaiveDate::parse_from_str("2023-05-10", "%Y-%m-%d").unwrap(),
            if active {
                MemberStatus::Active
            } else {
                MemberStatus::Inactive
            },
            earnings_cents,
        )
    }

    fn sample_tree() -> ReferralTree {
        // R -> A (active), B (inactive); A -> C (active)
        let mut tree = ReferralTree::new(member("R", "Root User", true, 1000_00));
        tree.insert("R", member("A", "Member A", true, 500_00)).unwrap();
        tree.insert("R", member("B", "Member B", false, 300_00)).unwrap();
        tree.insert("A", member("C", "Member C", true, 200_00)).unwrap();
        tree
    }

    #[test]
    fn test_insert_updates_direct_referral_count() {
        let tree = sample_tree();
        assert_eq!(tree.find("R").unwrap().member().direct_referral_count, 2);
        assert_eq!(tree.find("A").unwrap().member().direct_referral_count, 1);
        assert_eq!(tree.find("B").unwrap().member().direct_referral_count, 0);
        // 不变式：direct_referral_count == 子节点数
        for (_, node) in tree.walk("R").unwrap() {
            assert_eq!(
                node.member().direct_referral_count as usize,
                node.children().len()
            );
        }
    }

    #[test]
    fn test_insert_unknown_parent_leaves_tree_unchanged() {
        let mut tree = sample_tree();
        let err = tree.insert("X", member("D", "Member D", true, 0)).unwrap_err();
        assert_eq!(err, AppError::ParentNotFound("X".to_string()));
        assert_eq!(tree.member_count(), 4);
        assert_eq!(tree.subtree_size("R").unwrap(), 3);
        assert!(!tree.contains("D"));
    }

    #[test]
    fn test_insert_duplicate_id_leaves_tree_unchanged() {
        let mut tree = sample_tree();
        let err = tree.insert("A", member("B", "Impostor", true, 0)).unwrap_err();
        assert_eq!(err, AppError::DuplicateId("B".to_string()));
        // 父节点的直推数不受失败的 insert 影响
        assert_eq!(tree.find("A").unwrap().member().direct_referral_count, 1);
        assert_eq!(tree.member_count(), 4);
    }

    #[test]
    fn test_insert_negative_earnings_rejected() {
        let mut tree = sample_tree();
        assert!(matches!(
            tree.insert("R", member("D", "Member D", true, -1)),
            Err(AppError::ValidationError(_))
        ));
        assert!(!tree.contains("D"));
    }

    #[test]
    fn test_find_miss() {
        let tree = sample_tree();
        assert!(matches!(tree.find("ZZ"), Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_walk_preorder_insertion_order() {
        let tree = sample_tree();
        let order: Vec<(usize, String)> = tree
            .walk("R")
            .unwrap()
            .map(|(d, n)| (d, n.id().to_string()))
            .collect();
        assert_eq!(
            order,
            vec![
                (0, "R".to_string()),
                (1, "A".to_string()),
                (2, "C".to_string()),
                (1, "B".to_string()),
            ]
        );
    }

    #[test]
    fn test_walk_is_restartable() {
        let tree = sample_tree();
        let first: Vec<String> = tree.walk("R").unwrap().map(|(_, n)| n.id().to_string()).collect();
        let second: Vec<String> = tree.walk("R").unwrap().map(|(_, n)| n.id().to_string()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_subtree_size() {
        let tree = sample_tree();
        assert_eq!(tree.subtree_size("R").unwrap(), 3);
        assert_eq!(tree.subtree_size("A").unwrap(), 1);
        assert_eq!(tree.subtree_size("C").unwrap(), 0);
    }

    #[test]
    fn test_set_status_only_touches_status() {
        let mut tree = sample_tree();
        tree.set_status("A", MemberStatus::Inactive).unwrap();
        let a = tree.find("A").unwrap().member();
        assert_eq!(a.status, MemberStatus::Inactive);
        assert_eq!(a.direct_referral_count, 1);
        assert_eq!(a.earnings_cents, 500_00);
        assert!(matches!(
            tree.set_status("ZZ", MemberStatus::Active),
            Err(AppError::NotFound(_))
        ));
    }
}
