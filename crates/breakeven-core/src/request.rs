//! 計算請求（單次計算的完整輸入快照）

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::{
    CostError, CostParameters, DemandForecast, PlanningConfig, PriceOffer, Recipe, Result,
};

/// 計算請求
///
/// 一次計算所需的所有參數。計算器不保留任何跨請求狀態，
/// 每次都從這份快照重新計算。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanningRequest {
    /// 產品配方（順序即輸出順序）
    pub recipes: Vec<Recipe>,

    /// 每日需求預測
    pub demand: DemandForecast,

    /// 產品售價
    pub selling_prices: HashMap<String, Decimal>,

    /// 供應商報價表
    pub price_offers: Vec<PriceOffer>,

    /// 成本參數
    pub cost_parameters: CostParameters,

    /// 計算配置
    #[serde(default)]
    pub config: PlanningConfig,
}

impl PlanningRequest {
    /// 創建空請求
    pub fn new() -> Self {
        Self::default()
    }

    /// 建構器模式：添加產品（配方、每日需求、售價）
    pub fn with_product(mut self, recipe: Recipe, daily_demand: Decimal, selling_price: Decimal) -> Self {
        let product_id = recipe.product_id.clone();
        self.demand.daily_units.insert(product_id.clone(), daily_demand);
        self.selling_prices.insert(product_id, selling_price);
        self.recipes.push(recipe);
        self
    }

    /// 建構器模式：設置報價表
    pub fn with_price_offers(mut self, offers: Vec<PriceOffer>) -> Self {
        self.price_offers = offers;
        self
    }

    /// 建構器模式：設置成本參數
    pub fn with_cost_parameters(mut self, params: CostParameters) -> Self {
        self.cost_parameters = params;
        self
    }

    /// 建構器模式：設置計算配置
    pub fn with_config(mut self, config: PlanningConfig) -> Self {
        self.config = config;
        self
    }

    /// 產品名稱列表（依配方順序）
    pub fn product_ids(&self) -> Vec<&str> {
        self.recipes.iter().map(|r| r.product_id.as_str()).collect()
    }

    /// 查詢產品售價
    pub fn selling_price(&self, product_id: &str) -> Result<Decimal> {
        self.selling_prices
            .get(product_id)
            .copied()
            .ok_or_else(|| CostError::MissingInput {
                product: product_id.to_string(),
                field: "售價".to_string(),
            })
    }

    /// 入口驗證
    ///
    /// 所有非負/正值約束都在這裡檢查一次，下游計算不再重複檢查。
    pub fn validate(&self) -> Result<()> {
        self.config.validate()?;

        if self.recipes.is_empty() {
            return Err(CostError::InvalidInput("沒有任何產品配方".to_string()));
        }
        if self.price_offers.is_empty() {
            return Err(CostError::InvalidInput("供應商報價表為空".to_string()));
        }

        let mut seen = HashSet::new();
        for recipe in &self.recipes {
            if !seen.insert(recipe.product_id.as_str()) {
                return Err(CostError::InvalidInput(format!(
                    "產品重複定義: {}",
                    recipe.product_id
                )));
            }
            recipe.validate()?;

            // 每個產品都必須有需求與正的售價
            self.demand.daily(&recipe.product_id)?;
            let price = self.selling_price(&recipe.product_id)?;
            if price <= Decimal::ZERO {
                return Err(CostError::InvalidPrice {
                    subject: format!("{} 售價", recipe.product_id),
                    value: price.to_string(),
                });
            }
        }

        self.demand.validate()?;

        for offer in &self.price_offers {
            offer.validate()?;
        }

        self.cost_parameters.validate()
    }
}
