//! 共用成本分攤

use breakeven_core::{
    checked_add, checked_div, checked_mul, checked_sum, round_money, CostAllocation, CostError,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{CostSummary, ProductCost};

/// 產品分得的成本
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostShare {
    pub product_id: String,

    /// 分攤的固定成本
    pub fixed_cost_share: Decimal,

    /// 平均單位變動成本
    pub unit_variable_cost: Decimal,
}

/// 成本分攤計算器
pub struct CostAllocator;

impl CostAllocator {
    /// 依分攤規則計算每個產品的固定成本份額與單位變動成本
    pub fn allocate(
        summary: &CostSummary,
        allocation: CostAllocation,
        include_ingredient_cost: bool,
        money_scale: u32,
    ) -> breakeven_core::Result<Vec<CostShare>> {
        if summary.products.is_empty() {
            return Ok(Vec::new());
        }

        match allocation {
            CostAllocation::EvenSplit => {
                Self::even_split(summary, include_ingredient_cost, money_scale)
            }
            CostAllocation::DemandWeighted => {
                Self::demand_weighted(summary, include_ingredient_cost, money_scale)
            }
        }
    }

    /// 平均分攤
    ///
    /// 固定成本與變動成本總額都除以產品數，再用各產品自己的月需求換算單位成本。
    fn even_split(
        summary: &CostSummary,
        include_ingredient_cost: bool,
        money_scale: u32,
    ) -> breakeven_core::Result<Vec<CostShare>> {
        let count = Decimal::from(summary.products.len());
        let fixed_cost_share = round_money(
            checked_div(summary.totals.total_fixed_cost, count, "固定成本分攤")?,
            money_scale,
        );
        let variable_cost_share = checked_div(summary.totals.total_variable_cost, count, "變動成本分攤")?;

        summary
            .products
            .iter()
            .map(|product| {
                let per_unit = Self::per_unit(product, variable_cost_share)?;
                Ok(CostShare {
                    product_id: product.product_id.clone(),
                    fixed_cost_share,
                    unit_variable_cost: Self::unit_variable_cost(
                        product,
                        per_unit,
                        include_ingredient_cost,
                        money_scale,
                    )?,
                })
            })
            .collect()
    }

    /// 依需求比例分攤
    ///
    /// 固定成本依月需求佔比分攤；變動成本直接採用產品自身的月變動成本。
    fn demand_weighted(
        summary: &CostSummary,
        include_ingredient_cost: bool,
        money_scale: u32,
    ) -> breakeven_core::Result<Vec<CostShare>> {
        let total_demand = checked_sum(summary.products.iter().map(|p| p.monthly_demand), "月需求合計")?;

        summary
            .products
            .iter()
            .map(|product| {
                let per_unit = Self::per_unit(product, product.monthly_variable_cost)?;
                let weight = checked_div(product.monthly_demand, total_demand, &product.product_id)?;
                let fixed_cost_share = round_money(
                    checked_mul(summary.totals.total_fixed_cost, weight, &product.product_id)?,
                    money_scale,
                );
                Ok(CostShare {
                    product_id: product.product_id.clone(),
                    fixed_cost_share,
                    unit_variable_cost: Self::unit_variable_cost(
                        product,
                        per_unit,
                        include_ingredient_cost,
                        money_scale,
                    )?,
                })
            })
            .collect()
    }

    /// 月成本換算為單位成本，月需求為零時無法換算
    fn per_unit(product: &ProductCost, monthly_cost: Decimal) -> breakeven_core::Result<Decimal> {
        if product.monthly_demand.is_zero() {
            return Err(CostError::UndefinedUnitCost {
                product: product.product_id.clone(),
            });
        }
        checked_div(monthly_cost, product.monthly_demand, &product.product_id)
    }

    fn unit_variable_cost(
        product: &ProductCost,
        per_unit: Decimal,
        include_ingredient_cost: bool,
        money_scale: u32,
    ) -> breakeven_core::Result<Decimal> {
        let per_unit = if include_ingredient_cost {
            checked_add(per_unit, product.recipe_cost, &product.product_id)?
        } else {
            per_unit
        };
        Ok(round_money(per_unit, money_scale))
    }
}
