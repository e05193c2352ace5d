//! # 酪梨醬損益平衡計算範例
//!
//! 三款產品（Thai / Kid Friendly / Fiery），從供應商報價表到損益平衡點。
//! 可用第一個參數指定報價 CSV，未指定時使用內建範例報價。
//!
//! ```text
//! RUST_LOG=debug cargo run --example guacamole -- data/supplier-ingredients.csv
//! ```

use anyhow::Context;
use breakeven::reference;
use breakeven::{load_price_offers_file, BreakEvenCalculator, WarningSeverity};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("===== 酪梨醬損益平衡分析 =====\n");

    // ========== 1. 載入報價 ==========
    let request = match std::env::args().nth(1) {
        Some(path) => {
            println!("[1] 載入報價表: {}", path);
            let offers = load_price_offers_file(&path).with_context(|| format!("無法載入報價表 {}", path))?;
            reference::request_with_offers(offers)
        }
        None => {
            println!("[1] 使用內建範例報價表");
            reference::sample_request().context("範例報價表解析失敗")?
        }
    };
    println!("    報價筆數: {}\n", request.price_offers.len());

    // ========== 2. 執行計算 ==========
    let result = BreakEvenCalculator::calculate(&request).context("損益平衡計算失敗")?;

    println!("[2] 採用價格（最新報價日的最低價）");
    for price in result.prices.sorted() {
        println!(
            "    {:<16} {:>8}  ({})",
            price.product, price.price_per_unit, price.offer_date
        );
    }
    println!();

    // ========== 3. 配方成本 ==========
    println!("[3] 配方成本");
    for recipe in &result.recipe_costs {
        println!("    {} = {}", recipe.product_id, recipe.unit_cost);
        for line in &recipe.lines {
            println!(
                "      {} {} {} × {} = {}",
                line.quantity,
                line.unit.symbol(),
                line.ingredient,
                line.unit_price,
                line.cost
            );
        }
    }
    println!();

    // ========== 4. 需求 ==========
    println!("[4] 月需求");
    for product in &result.demand.products {
        println!("    {:<24} 每日 {:>4} / 每月 {:>6}", product.product_id, product.daily, product.monthly);
    }
    println!("    原料採購量（每月）:");
    for ingredient in result.demand.ingredient_totals().context("原料採購量計算失敗")? {
        println!(
            "      {:<16} {:>10} {}",
            ingredient.ingredient,
            ingredient.monthly,
            ingredient.unit.symbol()
        );
    }
    println!();

    // ========== 5. 成本與利潤 ==========
    let totals = &result.costs.totals;
    let headline = totals.in_thousands();
    println!("[5] 月成本與利潤");
    println!("    固定成本: {}", totals.total_fixed_cost);
    println!("    變動成本: {}", totals.total_variable_cost);
    println!("    原料成本: {}", totals.total_ingredients_cost);
    println!(
        "    總營收 {}k / 總成本 {}k / 利潤 {}k\n",
        headline.total_revenue, headline.total_cost, headline.profit
    );

    // ========== 6. 損益平衡 ==========
    println!("[6] 損益平衡點");
    for analysis in &result.break_even {
        println!(
            "    {:<24} 售價 {:>6} 單位變動成本 {:>6} 固定成本 {:>8} → {} 單位 (營收 {})",
            analysis.product_id,
            analysis.selling_price,
            analysis.unit_variable_cost,
            analysis.fixed_cost_share,
            analysis.break_even_units,
            analysis.break_even_revenue
        );
    }

    if !result.warnings.is_empty() {
        println!("\n警告:");
        for warning in &result.warnings {
            let tag = match warning.severity {
                WarningSeverity::Info => "INFO",
                WarningSeverity::Warning => "WARN",
            };
            println!("    [{}] {}: {}", tag, warning.subject, warning.message);
        }
    }

    if let Some(ms) = result.calculation_time_ms {
        println!("\n計算耗時: {} ms", ms);
    }

    Ok(())
}
