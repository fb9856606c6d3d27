//! # Canplan
//!
//! 容器製造的多拠點庫存引當與月次發注建議
//!
//! - [`models`]：受注、庫存、捲料配置與引當結果模型
//! - [`engine`]：瀑布式引當、不足摘要、生產警示、月次發注建議

pub use canplan_calc as engine;
pub use canplan_core as models;

pub use canplan_calc::{
    build_production_alert, compute_monthly_recommendation, compute_snapshots, summarize,
    AllocationCalculator, AllocationResult, AllocationWarning, ProductionAlert, WarningSeverity,
};
pub use canplan_core::{CanplanError, Result};
