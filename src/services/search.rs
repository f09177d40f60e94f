use crate::models::{MemberRecord, StatusScope, Ticket};
use crate::tree::ReferralTree;

/// 把推荐树按先序摊平成团队列表用的平面名册。
/// 搜索只在这个投影上做，不感知也不改变树结构。
pub fn roster(tree: &ReferralTree) -> Vec<MemberRecord> {
    match tree.walk(tree.root().id()) {
        Ok(walk) => walk.map(|(_, node)| node.member().clone()).collect(),
        Err(_) => Vec::new(),
    }
}

/// 团队列表搜索：大小写无关的子串匹配姓名/邮箱/ID，
/// 再按标签页范围过滤。空查询命中范围内全部成员。
/// 结果保持名册原始顺序，不按相关度重排。
pub fn search_members<'a>(
    roster: &'a [MemberRecord],
    query: &str,
    scope: StatusScope,
) -> Vec<&'a MemberRecord> {
    let query = query.to_lowercase();
    roster
        .iter()
        .filter(|m| scope.matches(m.is_active()))
        .filter(|m| {
            query.is_empty()
                || m.name.to_lowercase().contains(&query)
                || m.email.to_lowercase().contains(&query)
                || m.id.to_lowercase().contains(&query)
        })
        .collect()
}

/// 工单列表搜索：子串匹配标题/ID/分类
pub fn search_tickets<'a>(tickets: &'a [Ticket], query: &str) -> Vec<&'a Ticket> {
    let query = query.to_lowercase();
    tickets
        .iter()
        .filter(|t| {
            query.is_empty()
                || t.subject.to_lowercase().contains(&query)
                || t.id.to_lowercase().contains(&query)
                || t.category.to_string().to_lowercase().contains(&query)
        })
        .collect()
}
