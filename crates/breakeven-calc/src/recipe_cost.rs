//! 配方成本計算

use breakeven_core::{checked_mul, checked_sum, round_money, PriceTable, Recipe, UnitOfMeasure};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 單一原料成本
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientCost {
    pub ingredient: String,
    pub quantity: Decimal,
    pub unit: UnitOfMeasure,
    pub unit_price: Decimal,
    /// 用量 × 單價（不捨入）
    pub cost: Decimal,
}

/// 配方成本
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeCost {
    pub product_id: String,

    /// 各原料成本（依配方順序）
    pub lines: Vec<IngredientCost>,

    /// 配方總成本（不捨入，供月成本計算使用）
    pub total_cost: Decimal,

    /// 配方總成本（捨入後，供顯示使用）
    pub unit_cost: Decimal,
}

/// 配方成本計算器
pub struct RecipeCostCalculator;

impl RecipeCostCalculator {
    /// 計算單位產品的原料成本
    ///
    /// 各原料成本保留完整精度，只有總成本另外提供捨入後的值。
    pub fn calculate(
        recipe: &Recipe,
        prices: &PriceTable,
        money_scale: u32,
    ) -> breakeven_core::Result<RecipeCost> {
        recipe.validate()?;

        let mut lines = Vec::with_capacity(recipe.lines.len());
        for line in &recipe.lines {
            let unit_price = prices.unit_price(&recipe.product_id, &line.ingredient)?;
            lines.push(IngredientCost {
                ingredient: line.ingredient.clone(),
                quantity: line.quantity,
                unit: line.unit,
                unit_price,
                cost: checked_mul(line.quantity, unit_price, &recipe.product_id)?,
            });
        }

        let total_cost = checked_sum(lines.iter().map(|l| l.cost), &recipe.product_id)?;

        tracing::debug!("配方成本: {} = {}", recipe.product_id, total_cost);

        Ok(RecipeCost {
            product_id: recipe.product_id.clone(),
            lines,
            total_cost,
            unit_cost: round_money(total_cost, money_scale),
        })
    }
}
