use std::sync::Arc;

use surrealdb::engine::local::Db;
use surrealdb::Surreal;

use crate::booking::BookingEngine;
use crate::core::Config;
use crate::earnings::{EarningsAggregator, PayoutLocks};
use crate::invoicing::{InvoiceService, InvoiceStore};
use crate::orders::OrderService;
use crate::settlement::SettlementEngine;

/// 服务器状态 - 持有所有服务的共享引用
///
/// ServerState 是后端的核心数据结构。
/// 使用 Arc/克隆实现浅拷贝，所有权成本极低。
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | Surreal<Db> | 嵌入式数据库 |
/// | invoices | InvoiceService | 发票渲染和存储 |
/// | payout_locks | Arc<PayoutLocks> | 员工结算锁 |
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 嵌入式数据库 (SurrealDB)
    pub db: Surreal<Db>,
    /// 发票渲染和存储
    pub invoices: InvoiceService,
    /// 员工结算锁 (per staff id)
    pub payout_locks: Arc<PayoutLocks>,
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录结构
    /// 2. 数据库 (work_dir/database)
    /// 3. 发票服务 (work_dir/uploads)
    ///
    /// # Panics
    ///
    /// 数据库初始化失败时 panic
    pub async fn initialize(config: &Config) -> Self {
        config
            .ensure_work_dir_structure()
            .expect("Failed to create work directory structure");

        let db = crate::db::init(&config.database_dir())
            .await
            .expect("Failed to initialize database");

        let store =
            InvoiceStore::new(config.uploads_dir()).expect("Failed to initialize invoice store");
        let invoices = InvoiceService::pdf(store);

        Self {
            config: config.clone(),
            db,
            invoices,
            payout_locks: Arc::new(PayoutLocks::new()),
        }
    }

    /// 获取数据库实例
    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }

    /// 订单服务 (库存扣减 + 发票)
    pub fn orders(&self) -> OrderService {
        OrderService::new(self.db.clone(), self.invoices.clone())
    }

    /// 预约引擎
    pub fn booking(&self) -> BookingEngine {
        BookingEngine::new(self.db.clone(), self.orders())
    }

    /// 支付结算引擎
    pub fn settlement(&self) -> SettlementEngine {
        SettlementEngine::new(self.db.clone(), self.orders(), self.invoices.clone())
    }

    /// 员工收益聚合器
    pub fn earnings(&self) -> EarningsAggregator {
        EarningsAggregator::new(self.db.clone(), self.payout_locks.clone())
    }
}
