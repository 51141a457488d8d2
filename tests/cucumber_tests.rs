use cucumber::{given, then, when, World};

// 导入项目模块
use referralbot::database::models::RegistrationReport;
use referralbot::database::operations::DatabaseOperations;
use referralbot::ledger::ReferralLedger;
use referralbot::parser::payload::PayloadParser;

const REWARD: i64 = 10;

#[derive(Debug, World)]
#[world(init = Self::new)]
pub struct ReferralWorld {
    pub db: Option<DatabaseOperations>,
    pub ledger: Option<ReferralLedger>,
    pub parser: PayloadParser,
    pub last_report: Option<RegistrationReport>,
}

impl ReferralWorld {
    async fn new() -> Self {
        Self {
            db: None,
            ledger: None,
            parser: PayloadParser::new(),
            last_report: None,
        }
    }

    async fn setup_ledger(&mut self) {
        // 演示用内存数据库，进程退出即丢弃
        let db = DatabaseOperations::new(":memory:")
            .await
            .expect("failed to open in-memory database");
        self.ledger = Some(ReferralLedger::new(db.clone(), REWARD));
        self.db = Some(db);
    }

    fn ledger(&self) -> &ReferralLedger {
        self.ledger.as_ref().expect("ledger is not initialized")
    }
}

#[given(expr = "台账已经初始化")]
async fn ledger_initialized(world: &mut ReferralWorld) {
    world.setup_ledger().await;
}

#[when(expr = "用户 {int} 直接注册")]
async fn register_without_code(world: &mut ReferralWorld, user_id: i64) {
    let report = world
        .ledger()
        .register(user_id, None, None, None)
        .await
        .expect("register failed");
    world.last_report = Some(report);
}

#[when(expr = "用户 {int} 使用邀请码 {string} 注册")]
async fn register_with_code(world: &mut ReferralWorld, user_id: i64, code: String) {
    let report = world
        .ledger()
        .register(user_id, Some(code.as_str()), None, None)
        .await
        .expect("register failed");
    world.last_report = Some(report);
}

#[when(expr = "用户 {int} 发送消息 {string}")]
async fn register_from_message(world: &mut ReferralWorld, user_id: i64, text: String) {
    // 走和真实 /start 消息一致的解析路径
    let payload = world.parser.extract_start_payload(&text);
    let report = world
        .ledger()
        .register(user_id, payload.as_deref(), None, None)
        .await
        .expect("register failed");
    world.last_report = Some(report);
}

#[then(expr = "用户 {int} 的邀请人数应该是 {int}")]
async fn referral_count_should_be(world: &mut ReferralWorld, user_id: i64, expected: i64) {
    let stats = world
        .ledger()
        .stats(user_id)
        .await
        .expect("stats query failed")
        .expect("user is not registered");
    assert_eq!(stats.referral_count, expected);
}

#[then(expr = "用户 {int} 的余额应该是 {int}")]
async fn balance_should_be(world: &mut ReferralWorld, user_id: i64, expected: i64) {
    let stats = world
        .ledger()
        .stats(user_id)
        .await
        .expect("stats query failed")
        .expect("user is not registered");
    assert_eq!(stats.balance, expected);
}

#[then(expr = "用户 {int} 的邀请人应该是 {int}")]
async fn referrer_should_be(world: &mut ReferralWorld, user_id: i64, expected: i64) {
    let record = world
        .db
        .as_ref()
        .expect("database is not initialized")
        .get_user(user_id)
        .await
        .expect("user query failed")
        .expect("user is not registered");
    assert_eq!(record.referrer_id, Some(expected));
}

#[then(expr = "用户 {int} 应该没有邀请人")]
async fn referrer_should_be_none(world: &mut ReferralWorld, user_id: i64) {
    let record = world
        .db
        .as_ref()
        .expect("database is not initialized")
        .get_user(user_id)
        .await
        .expect("user query failed")
        .expect("user is not registered");
    assert_eq!(record.referrer_id, None);
}

#[then(expr = "用户 {int} 应该未注册")]
async fn user_should_be_unregistered(world: &mut ReferralWorld, user_id: i64) {
    let stats = world
        .ledger()
        .stats(user_id)
        .await
        .expect("stats query failed");
    assert!(stats.is_none());
}

#[then(expr = "最近一次注册不应产生新记录")]
async fn last_registration_was_repeat(world: &mut ReferralWorld) {
    let report = world.last_report.as_ref().expect("no registration recorded");
    assert!(!report.newly_registered);
    assert_eq!(report.attributed_referrer, None);
}

#[then(expr = "用户 {int} 的邀请列表长度应该是 {int}")]
async fn referral_list_len_should_be(world: &mut ReferralWorld, user_id: i64, expected: usize) {
    let referred = world
        .ledger()
        .list_referrals(user_id, 10)
        .await
        .expect("list query failed")
        .expect("user is not registered");
    assert_eq!(referred.len(), expected);
}

#[tokio::main]
async fn main() {
    ReferralWorld::run("tests/features").await;
}
