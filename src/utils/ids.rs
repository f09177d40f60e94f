use crate::tree::ReferralTree;
use rand::Rng;

/// 生成唯一的会员号，形如 N78349223（N + 8位数字）
pub fn generate_member_id(tree: &ReferralTree) -> String {
    let mut rng = rand::thread_rng();

    loop {
        let id = format!("N{}", rng.gen_range(10_000_000_u32..=99_999_999_u32));

        // 检查是否已存在
        if !tree.contains(&id) {
            return id;
        }
    }
}

/// 生成唯一的工单号，形如 TKT-10045
pub fn generate_ticket_id(existing: &[&str]) -> String {
    let mut rng = rand::thread_rng();

    loop {
        let id = format!("TKT-{}", rng.gen_range(10_000_u32..=99_999_u32));
        if !existing.contains(&id.as_str()) {
            return id;
        }
    }
}

/// 生成唯一的交易号，形如 TX78392
pub fn generate_transaction_id(existing: &[&str]) -> String {
    let mut rng = rand::thread_rng();

    loop {
        let id = format!("TX{}", rng.gen_range(10_000_u32..=99_999_u32));
        if !existing.contains(&id.as_str()) {
            return id;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MemberRecord, MemberStatus};
    use chrono::NaiveDate;

    #[test]
    fn test_generate_member_id_format() {
        let root = MemberRecord::new(
            "N78349223",
            "Neeraj User",
            "user@neeraj.com",
            NaiveDate::parse_from_str("2023-04-15", "%Y-%m-%d").unwrap(),
            MemberStatus::Active,
            0,
        );
        let tree = ReferralTree::new(root);
        let id = generate_member_id(&tree);
        assert_eq!(id.len(), 9);
        assert!(id.starts_with('N'));
        assert!(id[1..].chars().all(|c| c.is_ascii_digit()));
        assert_ne!(id, "N78349223");
    }

    #[test]
    fn test_generate_ticket_id_avoids_existing() {
        let id = generate_ticket_id(&["TKT-10045", "TKT-10039"]);
        assert!(id.starts_with("TKT-"));
        assert_ne!(id, "TKT-10045");
        assert_ne!(id, "TKT-10039");
    }

    #[test]
    fn test_generate_transaction_id_format() {
        let id = generate_transaction_id(&[]);
        assert!(id.starts_with("TX"));
        assert_eq!(id.len(), 7);
    }
}
