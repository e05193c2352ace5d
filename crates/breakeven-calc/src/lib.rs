//! # Break-Even Calculation Engine
//!
//! 核心損益平衡計算引擎

pub mod allocation;
pub mod break_even;
pub mod calculator;
pub mod cost_aggregation;
pub mod demand_projection;
pub mod price_resolver;
pub mod recipe_cost;

// Re-export 主要類型
pub use allocation::{CostAllocator, CostShare};
pub use break_even::{BreakEvenAnalysis, BreakEvenAnalyzer, BreakEvenRow};
pub use calculator::BreakEvenCalculator;
pub use cost_aggregation::{CostAggregator, CostSummary, CostTotals, HeadlineFigures, ProductCost};
pub use demand_projection::{DemandProjection, DemandProjector, IngredientDemand, ProductDemand};
pub use price_resolver::PriceResolver;
pub use recipe_cost::{IngredientCost, RecipeCost, RecipeCostCalculator};

use breakeven_core::PriceTable;
use serde::{Deserialize, Serialize};

/// 損益平衡計算結果（單次計算的輸出快照）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanResult {
    /// 快照ID
    pub id: uuid::Uuid,

    /// 各原料採用的價格
    pub prices: PriceTable,

    /// 各產品的配方成本
    pub recipe_costs: Vec<RecipeCost>,

    /// 需求推算
    pub demand: DemandProjection,

    /// 月成本、營收與利潤
    pub costs: CostSummary,

    /// 各產品的損益平衡分析
    pub break_even: Vec<BreakEvenAnalysis>,

    /// 警告信息
    pub warnings: Vec<PlanWarning>,

    /// 計算耗時（毫秒）
    pub calculation_time_ms: Option<u128>,
}

impl PlanResult {
    /// 查詢產品的損益平衡分析
    pub fn break_even_for(&self, product_id: &str) -> Option<&BreakEvenAnalysis> {
        self.break_even.iter().find(|b| b.product_id == product_id)
    }

    /// 查詢產品的月成本
    pub fn product_cost(&self, product_id: &str) -> Option<&ProductCost> {
        self.costs.products.iter().find(|p| p.product_id == product_id)
    }

    /// 查詢產品的配方成本
    pub fn recipe_cost(&self, product_id: &str) -> Option<&RecipeCost> {
        self.recipe_costs.iter().find(|r| r.product_id == product_id)
    }

    /// 添加警告
    pub fn add_warning(&mut self, warning: PlanWarning) {
        self.warnings.push(warning);
    }
}

/// 計算警告（不中斷計算的異常狀況）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanWarning {
    pub subject: String,
    pub message: String,
    pub severity: WarningSeverity,
}

impl PlanWarning {
    pub fn new(subject: String, message: String, severity: WarningSeverity) -> Self {
        Self {
            subject,
            message,
            severity,
        }
    }

    pub fn info(subject: String, message: String) -> Self {
        Self::new(subject, message, WarningSeverity::Info)
    }

    pub fn warning(subject: String, message: String) -> Self {
        Self::new(subject, message, WarningSeverity::Warning)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarningSeverity {
    Info,
    Warning,
}
