//! 配方模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::{parse_locale_decimal, CostError, Result};

/// 計量單位
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum UnitOfMeasure {
    /// 個
    Piece,
    /// 公克
    Gram,
    /// 毫升
    Milliliter,
}

impl UnitOfMeasure {
    /// 顯示用的單位縮寫
    pub fn symbol(&self) -> &'static str {
        match self {
            UnitOfMeasure::Piece => "pcs",
            UnitOfMeasure::Gram => "g",
            UnitOfMeasure::Milliliter => "ml",
        }
    }
}

/// 配方行（單一產品單位所需的原料用量）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeLine {
    /// 原料名稱（對應報價表的產品名稱）
    pub ingredient: String,

    /// 每單位產品的用量
    pub quantity: Decimal,

    /// 計量單位
    pub unit: UnitOfMeasure,
}

impl RecipeLine {
    /// 創建新的配方行
    pub fn new(ingredient: impl Into<String>, quantity: Decimal, unit: UnitOfMeasure) -> Self {
        Self {
            ingredient: ingredient.into(),
            quantity,
            unit,
        }
    }

    /// 從地區格式字串解析用量
    pub fn parse(ingredient: impl Into<String>, raw_quantity: &str, unit: UnitOfMeasure) -> Result<Self> {
        let ingredient = ingredient.into();
        let quantity = parse_locale_decimal(raw_quantity).ok_or_else(|| CostError::InvalidQuantity {
            subject: ingredient.clone(),
            value: raw_quantity.to_string(),
        })?;

        Ok(Self::new(ingredient, quantity, unit))
    }
}

/// 配方
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    /// 產品名稱
    pub product_id: String,

    /// 配方行（保留輸入順序）
    pub lines: Vec<RecipeLine>,
}

impl Recipe {
    /// 創建空配方
    pub fn new(product_id: impl Into<String>) -> Self {
        Self {
            product_id: product_id.into(),
            lines: Vec::new(),
        }
    }

    /// 建構器模式：添加原料
    pub fn with_line(mut self, ingredient: impl Into<String>, quantity: Decimal, unit: UnitOfMeasure) -> Self {
        self.lines.push(RecipeLine::new(ingredient, quantity, unit));
        self
    }

    /// 添加配方行
    pub fn add_line(&mut self, line: RecipeLine) {
        self.lines.push(line);
    }

    /// 所有原料名稱
    pub fn ingredients(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|l| l.ingredient.as_str())
    }

    /// 驗證配方：用量不可為負、同一配方內原料不可重複
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();

        for line in &self.lines {
            if line.quantity < Decimal::ZERO {
                return Err(CostError::InvalidQuantity {
                    subject: format!("{}/{}", self.product_id, line.ingredient),
                    value: line.quantity.to_string(),
                });
            }

            if !seen.insert(line.ingredient.as_str()) {
                return Err(CostError::DuplicateIngredient {
                    product: self.product_id.clone(),
                    ingredient: line.ingredient.clone(),
                });
            }
        }

        Ok(())
    }
}
