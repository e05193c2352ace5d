//! # Break-Even Core
//!
//! 核心資料模型與類型定義

pub mod config;
pub mod cost;
pub mod demand;
pub mod money;
pub mod price;
pub mod recipe;
pub mod request;

// Re-export 主要類型
pub use config::{CostAllocation, PlanningConfig, UnitSweep, MAX_SWEEP_POINTS};
pub use cost::{CostParameters, FixedCost, PreparationStep, VariableCostRates};
pub use demand::DemandForecast;
pub use money::{
    checked_add, checked_div, checked_mul, checked_sub, checked_sum, parse_locale_decimal,
    round_money, round_units,
};
pub use price::{PriceOffer, PriceTable, ResolvedPrice};
pub use recipe::{Recipe, RecipeLine, UnitOfMeasure};
pub use request::PlanningRequest;

/// 損益平衡計算錯誤類型
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CostError {
    #[error("找不到原料價格: 產品 {product} 的原料 {ingredient} 不在報價表中")]
    MissingPrice { product: String, ingredient: String },

    #[error("無效的數量: {subject} = {value}")]
    InvalidQuantity { subject: String, value: String },

    #[error("無效的價格: {subject} = {value}")]
    InvalidPrice { subject: String, value: String },

    #[error("配方重複原料: 產品 {product} 的原料 {ingredient} 出現多次")]
    DuplicateIngredient { product: String, ingredient: String },

    #[error("缺少輸入: 產品 {product} 沒有 {field}")]
    MissingInput { product: String, field: String },

    #[error("無法計算單位變動成本: 產品 {product} 的月需求為零")]
    UndefinedUnitCost { product: String },

    #[error("邊際貢獻為零，損益平衡點無法計算: 產品 {product} 售價 {price} 等於單位變動成本")]
    DegenerateMargin { product: String, price: String },

    #[error("邊際貢獻為負: 產品 {product} 售價 {price} 低於單位變動成本 {unit_variable_cost}")]
    NegativeMargin {
        product: String,
        price: String,
        unit_variable_cost: String,
    },

    #[error("數值超出可計算範圍: {subject}")]
    Overflow { subject: String },

    #[error("無效的配置: {0}")]
    InvalidConfig(String),

    #[error("無效的輸入: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, CostError>;
