use crate::error::AppResult;
use crate::models::MemberStatus;
use crate::tree::{ReferralNode, ReferralTree};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 树状图的展开状态。按会员ID记录，归视图所有，
/// 与数据模型分开存放，也不随数据持久化。
#[derive(Debug, Clone, Default)]
pub struct TreeViewState {
    expanded: HashMap<String, bool>,
}

impl TreeViewState {
    /// 默认只展开深度 < 1 的节点：根展开，因此初始可见的
    /// 是根和它的直推一层
    pub fn with_defaults(tree: &ReferralTree) -> Self {
        let mut state = Self::default();
        if let Ok(walk) = tree.walk(tree.root().id()) {
            for (depth, node) in walk {
                state.expanded.insert(node.id().to_string(), depth < 1);
            }
        }
        state
    }

    /// 未记录过的ID视为收起
    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.get(id).copied().unwrap_or(false)
    }

    /// 只翻转这一个节点，不级联到后代
    pub fn toggle(&mut self, id: &str) {
        let entry = self.expanded.entry(id.to_string()).or_insert(false);
        *entry = !*entry;
    }

    pub fn expand(&mut self, id: &str) {
        self.expanded.insert(id.to_string(), true);
    }

    pub fn collapse(&mut self, id: &str) {
        self.expanded.insert(id.to_string(), false);
    }

    pub fn expand_all(&mut self, tree: &ReferralTree) {
        self.set_all(tree, true);
    }

    pub fn collapse_all(&mut self, tree: &ReferralTree) {
        self.set_all(tree, false);
    }

    fn set_all(&mut self, tree: &ReferralTree, expanded: bool) {
        if let Ok(walk) = tree.walk(tree.root().id()) {
            for (_, node) in walk {
                self.expanded.insert(node.id().to_string(), expanded);
            }
        }
    }
}

/// 渲染层要画的一行。has_children 为 false 的行不画展开按钮。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeRow {
    pub depth: usize,
    pub id: String,
    pub name: String,
    pub status: MemberStatus,
    pub join_date: NaiveDate,
    pub direct_referral_count: u32,
    pub has_children: bool,
    pub expanded: bool,
}

/// 按当前展开状态物化可见行。收起节点的后代完全不被访问，
/// 而不是生成后再隐藏。
pub fn visible_rows(tree: &ReferralTree, state: &TreeViewState) -> AppResult<Vec<TreeRow>> {
    let mut rows = Vec::new();
    push_visible(tree.root(), 0, state, &mut rows);
    Ok(rows)
}

fn push_visible(node: &ReferralNode, depth: usize, state: &TreeViewState, rows: &mut Vec<TreeRow>) {
    let expanded = state.is_expanded(node.id());
    let member = node.member();
    rows.push(TreeRow {
        depth,
        id: member.id.clone(),
        name: member.name.clone(),
        status: member.status,
        join_date: member.join_date,
        direct_referral_count: member.direct_referral_count,
        has_children: node.has_children(),
        expanded,
    });
    if expanded {
        for child in node.children() {
            push_visible(child, depth + 1, state, rows);
        }
    }
}
