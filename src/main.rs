use anyhow::Context;
use chrono::{Local, NaiveDate};
use env_logger::{Env, Target};
use std::io::Write; // for env_logger custom formatter

use neeraj_core::{
    config::Config,
    models::{CreateTicketRequest, MemberRecord, MemberStatus, StatusScope, TicketCategory},
    services::{
        SupportService, TeamService, TreeViewState, WalletService, roster, search_members,
        visible_rows,
    },
    tree::ReferralTree,
};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let ts = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");
            let level = record.level().as_str().to_ascii_lowercase();
            let msg_json = serde_json::to_string(&format!("{}", record.args()))
                .unwrap_or_else(|_| "\"<invalid utf8>\"".to_string());
            writeln!(
                buf,
                "{{\"timestamp\":\"{}\",\"level\":\"{}\",\"message\":{},\"target\":\"{}\"}}",
                ts,
                level,
                msg_json,
                record.target(),
            )
        })
        .target(Target::Stdout)
        .init();

    // 加载配置（佣金方案 + 充提下限）
    let config = Config::from_toml().context("Failed to load configuration")?;
    let plan = config.commission_config()?;
    let team_service = TeamService::new(plan);

    // 用面板的示例数据搭一棵演示树
    let tree = seed_tree()?;
    let root_id = tree.root().id().to_string();
    log::info!("Seeded referral tree with {} members", tree.member_count());

    // 团队概览卡片
    let stats = team_service.team_stats(&tree, &root_id)?;
    log::info!(
        "Team overview: {} total / {} active / {} inactive",
        stats.total_members,
        stats.active_members,
        stats.inactive_members
    );

    // 收入卡片
    let income = team_service.income_breakdown(&tree, &root_id)?;
    log::info!(
        "Income: direct ${:.2}, team ${:.2}, referral bonus ${:.2}, total gain ${:.2}",
        income.direct_income_cents as f64 / 100.0,
        income.team_income_cents as f64 / 100.0,
        income.referral_bonus_cents as f64 / 100.0,
        income.total_cents() as f64 / 100.0
    );

    // Priya 只有两条腿，演示弱区奖金
    let bonus = team_service.weaker_leg_bonus(&tree, "N78349225")?;
    log::info!("Weaker-leg bonus for N78349225: ${:.2}", bonus as f64 / 100.0);

    // 树状图：默认展开根和直推层，再展开 Rahul 那一支
    let mut view = TreeViewState::with_defaults(&tree);
    log::info!("Tree view renders {} rows by default", visible_rows(&tree, &view)?.len());
    view.toggle("N78349224");
    log::info!(
        "Tree view renders {} rows after expanding N78349224",
        visible_rows(&tree, &view)?.len()
    );

    // 团队列表搜索
    let members = roster(&tree);
    let hits = search_members(&members, "rahul", StatusScope::All);
    log::info!("Search 'rahul' matched {} member(s)", hits.len());

    // 钱包演示
    let mut wallet_service = WalletService::new(config.limits.clone());
    wallet_service.deposit(25_000_00)?;
    wallet_service.withdraw(13_455_25)?;
    if let Err(e) = wallet_service.withdraw(50_00) {
        log::warn!("Withdrawal rejected: {e}");
    }
    let wallet = wallet_service.wallet();
    log::info!(
        "Wallet: balance ${:.2}, deposited ${:.2}, withdrawn ${:.2}",
        wallet.balance_cents as f64 / 100.0,
        wallet.total_deposited_cents as f64 / 100.0,
        wallet.total_withdrawn_cents as f64 / 100.0
    );

    // 客服工单演示
    let mut support = SupportService::new();
    let ticket = support.create_ticket(
        "Neeraj User",
        CreateTicketRequest {
            subject: "Withdrawal Pending".to_string(),
            category: TicketCategory::Payment,
            message: "My withdrawal request has been pending for 3 days now.".to_string(),
        },
    )?;
    log::info!("Opened support ticket {}", ticket.id);

    Ok(())
}

/// 面板示例数据：Neeraj User 和他的下线
fn seed_tree() -> anyhow::Result<ReferralTree> {
    let member = |id: &str, name: &str, email: &str, joined: &str, active: bool, cents: i64| {
        let join_date = NaiveDate::parse_from_str(joined, "%Y-%m-%d")
            .with_context(|| format!("Bad join date for {id}"))?;
        let status = if active {
            MemberStatus::Active
        } else {
            MemberStatus::Inactive
        };
        Ok::<_, anyhow::Error>(MemberRecord::new(id, name, email, join_date, status, cents))
    };

    let mut tree = ReferralTree::new(member(
        "N78349223",
        "Neeraj User",
        "user@neeraj.com",
        "2023-04-15",
        true,
        3250_00,
    )?);
    let inserts = [
        ("N78349223", "N78349224", "Rahul Sharma", "rahul@example.com", "2023-05-10", true, 2450_00),
        ("N78349224", "N78349229", "Neha Gupta", "neha@example.com", "2023-07-05", false, 0),
        ("N78349224", "N78349230", "Vikram Kumar", "vikram@example.com", "2023-07-18", true, 1850_00),
        ("N78349230", "N78349235", "Rajesh Khanna", "rajesh@example.com", "2023-09-15", true, 0),
        ("N78349223", "N78349225", "Priya Patel", "priya@example.com", "2023-05-15", true, 1680_00),
        ("N78349225", "N78349231", "Meena Reddy", "meena@example.com", "2023-08-03", true, 1200_00),
        ("N78349225", "N78349232", "Suresh Menon", "suresh@example.com", "2023-08-11", true, 0),
        ("N78349223", "N78349226", "Amit Singh", "amit@example.com", "2023-06-02", false, 450_00),
        ("N78349223", "N78349227", "Sunita Verma", "sunita@example.com", "2023-06-10", true, 3200_00),
        ("N78349227", "N78349233", "Kavita Joshi", "kavita@example.com", "2023-08-25", true, 0),
        ("N78349227", "N78349234", "Deepak Nair", "deepak@example.com", "2023-09-02", true, 0),
        ("N78349223", "N78349228", "Karan Malhotra", "karan@example.com", "2023-06-22", true, 1350_00),
    ];
    for (parent, id, name, email, joined, active, cents) in inserts {
        tree.insert(parent, member(id, name, email, joined, active, cents)?)?;
    }
    Ok(tree)
}
