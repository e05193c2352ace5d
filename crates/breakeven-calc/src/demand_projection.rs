//! 需求推算

use breakeven_core::{checked_add, checked_mul, checked_sum, CostError, DemandForecast, Recipe, UnitOfMeasure};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 產品需求
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDemand {
    pub product_id: String,
    pub daily: Decimal,
    pub monthly: Decimal,
}

/// 原料需求（單一產品或跨產品合計）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientDemand {
    /// 所屬產品，合計時為 None
    pub product_id: Option<String>,
    pub ingredient: String,
    pub unit: UnitOfMeasure,
    pub daily: Decimal,
    pub monthly: Decimal,
}

/// 需求推算結果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DemandProjection {
    /// 各產品需求（依配方順序）
    pub products: Vec<ProductDemand>,

    /// 各產品的原料需求
    pub ingredients: Vec<IngredientDemand>,
}

impl DemandProjection {
    /// 查詢產品月需求
    pub fn monthly(&self, product_id: &str) -> Option<Decimal> {
        self.products
            .iter()
            .find(|p| p.product_id == product_id)
            .map(|p| p.monthly)
    }

    /// 產品的原料需求
    pub fn ingredients_for<'a>(&'a self, product_id: &'a str) -> impl Iterator<Item = &'a IngredientDemand> + 'a {
        self.ingredients
            .iter()
            .filter(move |i| i.product_id.as_deref() == Some(product_id))
    }

    /// 跨產品合計的原料需求（採購用），依原料名稱排序
    pub fn ingredient_totals(&self) -> breakeven_core::Result<Vec<IngredientDemand>> {
        let mut totals: BTreeMap<(&str, UnitOfMeasure), (Decimal, Decimal)> = BTreeMap::new();
        for demand in &self.ingredients {
            let entry = totals
                .entry((demand.ingredient.as_str(), demand.unit))
                .or_insert((Decimal::ZERO, Decimal::ZERO));
            entry.0 = checked_add(entry.0, demand.daily, &demand.ingredient)?;
            entry.1 = checked_add(entry.1, demand.monthly, &demand.ingredient)?;
        }

        Ok(totals
            .into_iter()
            .map(|((ingredient, unit), (daily, monthly))| IngredientDemand {
                product_id: None,
                ingredient: ingredient.to_string(),
                unit,
                daily,
                monthly,
            })
            .collect())
    }

    /// 所有產品的月需求合計
    pub fn total_monthly(&self) -> breakeven_core::Result<Decimal> {
        checked_sum(self.products.iter().map(|p| p.monthly), "月需求合計")
    }
}

/// 需求推算器
pub struct DemandProjector;

impl DemandProjector {
    /// 由每日需求推算月需求（產品與原料）
    ///
    /// 月需求 = 每日需求 × 每月天數（固定值）；
    /// 原料月需求 = 每單位用量 × 每日需求 × 每月天數
    pub fn project(
        recipes: &[Recipe],
        forecast: &DemandForecast,
        days_per_month: u32,
    ) -> breakeven_core::Result<DemandProjection> {
        let mut projection = DemandProjection::default();

        for recipe in recipes {
            let daily = forecast.daily(&recipe.product_id)?;
            if daily < Decimal::ZERO {
                return Err(CostError::InvalidQuantity {
                    subject: format!("{} 每日需求", recipe.product_id),
                    value: daily.to_string(),
                });
            }

            let monthly = Self::monthly_units(daily, days_per_month, &recipe.product_id)?;
            tracing::debug!("產品需求: {} 每日 {} / 每月 {}", recipe.product_id, daily, monthly);

            for line in &recipe.lines {
                let ingredient_daily = checked_mul(line.quantity, daily, &recipe.product_id)?;
                projection.ingredients.push(IngredientDemand {
                    product_id: Some(recipe.product_id.clone()),
                    ingredient: line.ingredient.clone(),
                    unit: line.unit,
                    daily: ingredient_daily,
                    monthly: Self::monthly_units(ingredient_daily, days_per_month, &recipe.product_id)?,
                });
            }

            projection.products.push(ProductDemand {
                product_id: recipe.product_id.clone(),
                daily,
                monthly,
            });
        }

        Ok(projection)
    }

    /// 每日數量換算為月數量
    pub fn monthly_units(daily: Decimal, days_per_month: u32, subject: &str) -> breakeven_core::Result<Decimal> {
        checked_mul(daily, Decimal::from(days_per_month), subject)
    }
}
