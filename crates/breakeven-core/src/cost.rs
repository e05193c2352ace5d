//! 成本參數模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::{checked_sum, CostError, Result};

/// 固定成本項目（租金、薪資等）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedCost {
    pub name: String,
    pub amount: Decimal,
}

impl FixedCost {
    pub fn new(name: impl Into<String>, amount: Decimal) -> Self {
        Self {
            name: name.into(),
            amount,
        }
    }
}

/// 變動成本費率
///
/// 三項費率相加後乘以每月製作工時
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct VariableCostRates {
    /// 人工
    pub labor: Decimal,
    /// 能源
    pub energy: Decimal,
    /// 其他
    pub other: Decimal,
}

impl VariableCostRates {
    pub fn new(labor: Decimal, energy: Decimal, other: Decimal) -> Self {
        Self {
            labor,
            energy,
            other,
        }
    }

    /// 合計費率
    pub fn combined(&self) -> Result<Decimal> {
        checked_sum([self.labor, self.energy, self.other], "變動成本費率")
    }
}

/// 製作步驟耗時
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreparationStep {
    pub minutes: u32,
    pub seconds: u32,

    /// 步驟說明
    pub description: Option<String>,
}

impl PreparationStep {
    pub fn new(minutes: u32, seconds: u32) -> Self {
        Self {
            minutes,
            seconds,
            description: None,
        }
    }

    /// 建構器模式：設置步驟說明
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// 成本參數
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CostParameters {
    /// 固定成本項目
    pub fixed_costs: Vec<FixedCost>,

    /// 變動成本費率
    pub rates: VariableCostRates,

    /// 各產品的製作步驟
    pub preparation: HashMap<String, Vec<PreparationStep>>,
}

impl CostParameters {
    pub fn new(rates: VariableCostRates) -> Self {
        Self {
            fixed_costs: Vec::new(),
            rates,
            preparation: HashMap::new(),
        }
    }

    /// 建構器模式：添加固定成本
    pub fn with_fixed_cost(mut self, name: impl Into<String>, amount: Decimal) -> Self {
        self.fixed_costs.push(FixedCost::new(name, amount));
        self
    }

    /// 建構器模式：設置產品製作步驟
    pub fn with_preparation(mut self, product_id: impl Into<String>, steps: Vec<PreparationStep>) -> Self {
        self.preparation.insert(product_id.into(), steps);
        self
    }

    /// 固定成本合計
    pub fn total_fixed_cost(&self) -> Result<Decimal> {
        checked_sum(self.fixed_costs.iter().map(|c| c.amount), "固定成本合計")
    }

    /// 產品是否定義了製作步驟
    pub fn has_preparation(&self, product_id: &str) -> bool {
        self.preparation.get(product_id).is_some_and(|steps| !steps.is_empty())
    }

    /// 產品單位製作時間（分鐘）
    ///
    /// 分鐘加總，秒數各自除以 60 後加總。未定義步驟的產品視為 0 分鐘。
    pub fn prep_minutes(&self, product_id: &str) -> Decimal {
        let sixty = Decimal::from(60);
        self.preparation
            .get(product_id)
            .map(|steps| {
                let minutes: Decimal = steps.iter().map(|s| Decimal::from(s.minutes)).sum();
                let seconds: Decimal = steps.iter().map(|s| Decimal::from(s.seconds) / sixty).sum();
                minutes + seconds
            })
            .unwrap_or(Decimal::ZERO)
    }

    /// 驗證：金額與費率不可為負
    pub fn validate(&self) -> Result<()> {
        for cost in &self.fixed_costs {
            if cost.amount < Decimal::ZERO {
                return Err(CostError::InvalidPrice {
                    subject: format!("固定成本 {}", cost.name),
                    value: cost.amount.to_string(),
                });
            }
        }

        let rates = [
            ("人工費率", self.rates.labor),
            ("能源費率", self.rates.energy),
            ("其他費率", self.rates.other),
        ];
        for (name, rate) in rates {
            if rate < Decimal::ZERO {
                return Err(CostError::InvalidPrice {
                    subject: name.to_string(),
                    value: rate.to_string(),
                });
            }
        }

        Ok(())
    }
}
