//! Salon Backend - 多租户沙龙管理系统后端
//!
//! # 架构概述
//!
//! 本模块是后端的主入口，提供以下核心功能：
//!
//! - **预约引擎** (`booking`): 套餐权益消费 + 目录定价 + 总额计算
//! - **订单** (`orders`): 库存扣减订单和 PDF 发票
//! - **结算** (`settlement`): 优惠券/税/小费结算
//! - **员工收益** (`earnings`): 分成与小费聚合、payout
//! - **数据库** (`db`): 嵌入式 SurrealDB 存储
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! salon-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── api/           # HTTP 路由和处理器
//! ├── db/            # 数据库层 (repositories)
//! ├── booking/       # 预约引擎
//! ├── orders/        # 订单 + 发票生成
//! ├── settlement/    # 支付结算引擎
//! ├── earnings/      # 员工收益聚合
//! ├── invoicing/     # 发票渲染和存储
//! └── utils/         # 工具函数
//! ```

pub mod api;
pub mod booking;
pub mod core;
pub mod db;
pub mod earnings;
pub mod invoicing;
pub mod money;
pub mod orders;
pub mod settlement;
pub mod utils;

// Re-export 公共类型
pub use booking::BookingEngine;
pub use core::{Config, Server, ServerState};
pub use earnings::EarningsAggregator;
pub use orders::OrderService;
pub use settlement::SettlementEngine;
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// 设置运行环境 (dotenv + 日志)
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenv::dotenv();

    let log_level = std::env::var("LOG_LEVEL").ok();
    init_logger_with_file(log_level.as_deref(), None);

    Ok(())
}
