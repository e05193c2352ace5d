//! 月成本彙總

use breakeven_core::{
    checked_div, checked_mul, checked_sub, checked_sum, round_money, CostError, CostParameters,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::{DemandProjection, RecipeCost};

/// 單一產品的月成本與營收
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductCost {
    pub product_id: String,

    /// 每單位原料成本（不捨入）
    pub recipe_cost: Decimal,

    /// 每單位原料成本（捨入後）
    pub unit_ingredient_cost: Decimal,

    /// 月需求
    pub monthly_demand: Decimal,

    /// 每單位製作時間（分鐘）
    pub prep_minutes: Decimal,

    /// 每月製作工時（小時）
    pub monthly_prep_hours: Decimal,

    /// 月原料成本
    pub monthly_ingredient_cost: Decimal,

    /// 月變動成本（工時 × 合計費率）
    pub monthly_variable_cost: Decimal,

    /// 售價
    pub selling_price: Decimal,

    /// 月營收
    pub monthly_revenue: Decimal,
}

/// 全部產品的成本合計
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostTotals {
    pub total_fixed_cost: Decimal,
    pub total_variable_cost: Decimal,
    pub total_ingredients_cost: Decimal,
    pub total_cost: Decimal,
    pub total_revenue: Decimal,

    /// 營收 − 成本，可能為負
    pub profit: Decimal,
}

impl CostTotals {
    pub fn is_profitable(&self) -> bool {
        self.profit > Decimal::ZERO
    }

    /// 以千為單位的摘要數字（一位小數）
    pub fn in_thousands(&self) -> HeadlineFigures {
        let thousand = Decimal::from(1000);
        HeadlineFigures {
            total_revenue: round_money(self.total_revenue / thousand, 1),
            total_cost: round_money(self.total_cost / thousand, 1),
            profit: round_money(self.profit / thousand, 1),
        }
    }
}

/// 摘要數字（千元）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeadlineFigures {
    pub total_revenue: Decimal,
    pub total_cost: Decimal,
    pub profit: Decimal,
}

/// 成本彙總結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostSummary {
    /// 各產品成本（依配方順序）
    pub products: Vec<ProductCost>,
    pub totals: CostTotals,
}

/// 成本彙總器
pub struct CostAggregator;

impl CostAggregator {
    /// 彙總月成本、營收與利潤
    ///
    /// 輸入在請求入口已驗證過非負，這裡不再重複檢查。
    pub fn aggregate(
        recipe_costs: &[RecipeCost],
        demand: &DemandProjection,
        selling_prices: &HashMap<String, Decimal>,
        params: &CostParameters,
        money_scale: u32,
    ) -> breakeven_core::Result<CostSummary> {
        let sixty = Decimal::from(60);
        let combined_rate = params.rates.combined()?;

        let mut products = Vec::with_capacity(recipe_costs.len());
        for recipe_cost in recipe_costs {
            let product_id = recipe_cost.product_id.as_str();

            let monthly_demand = demand.monthly(product_id).ok_or_else(|| CostError::MissingInput {
                product: product_id.to_string(),
                field: "月需求".to_string(),
            })?;
            let selling_price = selling_prices
                .get(product_id)
                .copied()
                .ok_or_else(|| CostError::MissingInput {
                    product: product_id.to_string(),
                    field: "售價".to_string(),
                })?;

            let monthly_ingredient_cost = round_money(
                checked_mul(recipe_cost.total_cost, monthly_demand, product_id)?,
                money_scale,
            );

            let prep_minutes = params.prep_minutes(product_id);
            let monthly_prep_hours = checked_div(
                checked_mul(prep_minutes, monthly_demand, product_id)?,
                sixty,
                product_id,
            )?;
            let monthly_variable_cost = round_money(
                checked_mul(monthly_prep_hours, combined_rate, product_id)?,
                money_scale,
            );

            let monthly_revenue = round_money(checked_mul(selling_price, monthly_demand, product_id)?, money_scale);

            tracing::debug!(
                "產品成本: {} 原料 {} / 變動 {} / 營收 {}",
                product_id,
                monthly_ingredient_cost,
                monthly_variable_cost,
                monthly_revenue
            );

            products.push(ProductCost {
                product_id: product_id.to_string(),
                recipe_cost: recipe_cost.total_cost,
                unit_ingredient_cost: recipe_cost.unit_cost,
                monthly_demand,
                prep_minutes,
                monthly_prep_hours,
                monthly_ingredient_cost,
                monthly_variable_cost,
                selling_price,
                monthly_revenue,
            });
        }

        let totals = Self::totals(&products, params, money_scale)?;

        Ok(CostSummary { products, totals })
    }

    fn totals(
        products: &[ProductCost],
        params: &CostParameters,
        money_scale: u32,
    ) -> breakeven_core::Result<CostTotals> {
        let total_fixed_cost = params.total_fixed_cost()?;
        let total_variable_cost = checked_sum(products.iter().map(|p| p.monthly_variable_cost), "變動成本合計")?;
        let total_ingredients_cost =
            checked_sum(products.iter().map(|p| p.monthly_ingredient_cost), "原料成本合計")?;
        let total_cost = checked_sum(
            [total_fixed_cost, total_variable_cost, total_ingredients_cost],
            "總成本",
        )?;
        let total_revenue = checked_sum(products.iter().map(|p| p.monthly_revenue), "總營收")?;

        Ok(CostTotals {
            total_fixed_cost,
            total_variable_cost,
            total_ingredients_cost,
            total_cost,
            total_revenue,
            profit: round_money(checked_sub(total_revenue, total_cost, "利潤")?, money_scale),
        })
    }
}
