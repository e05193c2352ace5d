//! 需求模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::{CostError, Result};

/// 每日需求預測（產品 → 每日銷售單位）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DemandForecast {
    pub daily_units: HashMap<String, Decimal>,
}

impl DemandForecast {
    /// 創建空的需求預測
    pub fn new() -> Self {
        Self::default()
    }

    /// 建構器模式：設置產品每日需求
    pub fn with_daily(mut self, product_id: impl Into<String>, units: Decimal) -> Self {
        self.daily_units.insert(product_id.into(), units);
        self
    }

    /// 查詢產品每日需求
    pub fn daily(&self, product_id: &str) -> Result<Decimal> {
        self.daily_units
            .get(product_id)
            .copied()
            .ok_or_else(|| CostError::MissingInput {
                product: product_id.to_string(),
                field: "每日需求".to_string(),
            })
    }

    /// 驗證：需求不可為負
    pub fn validate(&self) -> Result<()> {
        for (product_id, units) in &self.daily_units {
            if *units < Decimal::ZERO {
                return Err(CostError::InvalidQuantity {
                    subject: format!("{} 每日需求", product_id),
                    value: units.to_string(),
                });
            }
        }
        Ok(())
    }
}
