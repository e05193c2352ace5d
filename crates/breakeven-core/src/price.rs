//! 報價模型

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::{parse_locale_decimal, CostError, Result};

/// 供應商報價（報價表中的一列）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceOffer {
    /// 產品名稱
    pub product: String,

    /// 單位價格
    pub price_per_unit: Decimal,

    /// 報價日期
    pub offer_date: NaiveDate,

    /// 供應商產品編號
    pub supplier_product_id: Option<String>,
}

impl PriceOffer {
    /// 創建新的報價
    pub fn new(product: impl Into<String>, price_per_unit: Decimal, offer_date: NaiveDate) -> Self {
        Self {
            product: product.into(),
            price_per_unit,
            offer_date,
            supplier_product_id: None,
        }
    }

    /// 從地區格式的價格字串創建報價
    pub fn parse(product: impl Into<String>, raw_price: &str, offer_date: NaiveDate) -> Result<Self> {
        let product = product.into();
        let price = parse_locale_decimal(raw_price).ok_or_else(|| CostError::InvalidPrice {
            subject: product.clone(),
            value: raw_price.to_string(),
        })?;

        Ok(Self::new(product, price, offer_date))
    }

    /// 建構器模式：設置供應商產品編號
    pub fn with_supplier_product_id(mut self, id: impl Into<String>) -> Self {
        self.supplier_product_id = Some(id.into());
        self
    }

    /// 驗證報價
    pub fn validate(&self) -> Result<()> {
        if self.price_per_unit < Decimal::ZERO {
            return Err(CostError::InvalidPrice {
                subject: self.product.clone(),
                value: self.price_per_unit.to_string(),
            });
        }
        Ok(())
    }
}

/// 已決定的原料價格
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedPrice {
    /// 產品名稱
    pub product: String,

    /// 採用的單位價格
    pub price_per_unit: Decimal,

    /// 採用報價的日期（該產品最新報價日）
    pub offer_date: NaiveDate,

    /// 採用報價的供應商產品編號
    pub supplier_product_id: Option<String>,
}

impl From<&PriceOffer> for ResolvedPrice {
    fn from(offer: &PriceOffer) -> Self {
        Self {
            product: offer.product.clone(),
            price_per_unit: offer.price_per_unit,
            offer_date: offer.offer_date,
            supplier_product_id: offer.supplier_product_id.clone(),
        }
    }
}

/// 價格表（產品名稱 → 已決定價格）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceTable {
    prices: HashMap<String, ResolvedPrice>,
}

impl PriceTable {
    /// 創建空價格表
    pub fn new() -> Self {
        Self::default()
    }

    /// 寫入價格
    pub fn insert(&mut self, price: ResolvedPrice) {
        self.prices.insert(price.product.clone(), price);
    }

    /// 查詢價格
    pub fn get(&self, product: &str) -> Option<&ResolvedPrice> {
        self.prices.get(product)
    }

    /// 查詢配方原料的單價，找不到時回報是哪個產品的哪個原料
    pub fn unit_price(&self, product_id: &str, ingredient: &str) -> Result<Decimal> {
        self.prices
            .get(ingredient)
            .map(|p| p.price_per_unit)
            .ok_or_else(|| CostError::MissingPrice {
                product: product_id.to_string(),
                ingredient: ingredient.to_string(),
            })
    }

    /// 價格數量
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// 依產品名稱排序的價格列表
    pub fn sorted(&self) -> Vec<&ResolvedPrice> {
        let mut prices: Vec<_> = self.prices.values().collect();
        prices.sort_by(|a, b| a.product.cmp(&b.product));
        prices
    }
}

impl FromIterator<ResolvedPrice> for PriceTable {
    fn from_iter<I: IntoIterator<Item = ResolvedPrice>>(iter: I) -> Self {
        let mut table = PriceTable::new();
        for price in iter {
            table.insert(price);
        }
        table
    }
}
