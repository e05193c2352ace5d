//! 集成測試

use breakeven::reference::{self, FIERY, KID_FRIENDLY, THAI};
use breakeven::*;
use chrono::NaiveDate;
use rust_decimal::Decimal;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// 兩種原料、單一產品的最小場景
fn avocado_lime_request() -> PlanningRequest {
    let recipe = Recipe::new(THAI)
        .with_line("Avocado", Decimal::from(2), UnitOfMeasure::Piece)
        .with_line("Lime", Decimal::new(5, 1), UnitOfMeasure::Piece);

    PlanningRequest::new()
        .with_product(recipe, Decimal::from(15), Decimal::from(11))
        .with_price_offers(vec![
            PriceOffer::new("Avocado", Decimal::new(50, 2), date(2024, 2, 1)),
            PriceOffer::new("Lime", Decimal::new(30, 2), date(2024, 2, 1)),
        ])
        .with_cost_parameters(
            CostParameters::new(VariableCostRates::default())
                .with_fixed_cost("Rent", Decimal::from(1500))
                .with_fixed_cost("Salary", Decimal::from(1250))
                .with_preparation(THAI, vec![PreparationStep::new(12, 0)]),
        )
}

#[test]
fn test_single_product_ingredient_cost() {
    // 2 個酪梨 @ 0.50 + 0.5 個萊姆 @ 0.30 = 1.15；每日 15 → 每月 450；450 × 1.15 = 517.50
    let result = BreakEvenCalculator::calculate(&avocado_lime_request()).unwrap();

    let recipe = result.recipe_cost(THAI).unwrap();
    assert_eq!(recipe.unit_cost, Decimal::new(115, 2));
    assert_eq!(result.demand.monthly(THAI), Some(Decimal::from(450)));

    let cost = result.product_cost(THAI).unwrap();
    assert_eq!(cost.monthly_ingredient_cost, Decimal::new(51750, 2));
    assert_eq!(result.costs.totals.total_fixed_cost, Decimal::from(2750));
}

#[test]
fn test_reference_dataset_prices() {
    let result = BreakEvenCalculator::calculate(&reference::sample_request().unwrap()).unwrap();

    // 最新報價日 2024-02-01 有 0.80 與 0.92，較舊的 0.85 不列入
    let avocado = result.prices.get("Avocado").unwrap();
    assert_eq!(avocado.price_per_unit, Decimal::new(80, 2));
    assert_eq!(avocado.offer_date, date(2024, 2, 1));
    assert_eq!(avocado.supplier_product_id.as_deref(), Some("1002"));

    // 較舊的報價即使更便宜也不採用
    assert_eq!(result.prices.get("Lime").unwrap().price_per_unit, Decimal::new(30, 2));
    assert_eq!(result.prices.len(), 10);
    assert!(result.warnings.is_empty());
}

#[test]
fn test_reference_dataset_recipe_costs() {
    let result = BreakEvenCalculator::calculate(&reference::sample_request().unwrap()).unwrap();

    // 1.60 + 0.15 + 0.06 + 0.075 + 0.12 = 2.005，雙數捨入為 2.00
    let thai = result.recipe_cost(THAI).unwrap();
    assert_eq!(thai.total_cost, Decimal::new(2005, 3));
    assert_eq!(thai.unit_cost, Decimal::new(200, 2));
    assert_eq!(thai.lines.len(), 5);

    assert_eq!(result.recipe_cost(KID_FRIENDLY).unwrap().unit_cost, Decimal::new(232, 2));
    // 2.095 → 2.10
    assert_eq!(result.recipe_cost(FIERY).unwrap().unit_cost, Decimal::new(210, 2));

    // 月原料成本使用未捨入的配方成本
    assert_eq!(
        result.product_cost(THAI).unwrap().monthly_ingredient_cost,
        Decimal::new(90225, 2)
    );
}

#[test]
fn test_reference_dataset_totals() {
    let result = BreakEvenCalculator::calculate(&reference::sample_request().unwrap()).unwrap();
    let totals = &result.costs.totals;

    assert_eq!(totals.total_fixed_cost, Decimal::from(2750));
    // 1642.50 + 3938.96 + 958.12
    assert_eq!(totals.total_variable_cost, Decimal::new(653958, 2));
    // 902.25 + 1948.80 + 439.95
    assert_eq!(totals.total_ingredients_cost, Decimal::from(3291));
    assert_eq!(totals.total_cost, Decimal::new(1258058, 2));
    assert_eq!(totals.total_revenue, Decimal::from(17970));
    assert_eq!(totals.profit, Decimal::new(538942, 2));

    let headline = totals.in_thousands();
    assert_eq!(headline.total_revenue, Decimal::new(180, 1));
    assert_eq!(headline.total_cost, Decimal::new(126, 1));
    assert_eq!(headline.profit, Decimal::new(54, 1));
}

#[test]
fn test_reference_dataset_break_even() {
    let result = BreakEvenCalculator::calculate(&reference::sample_request().unwrap()).unwrap();

    // 2750 / 3 = 916.666... → 916.67
    for analysis in &result.break_even {
        assert_eq!(analysis.fixed_cost_share, Decimal::new(91667, 2));
        assert_eq!(analysis.rows.len(), 13);
    }

    // 單位變動成本 = (6539.58 / 3) / 月需求
    let thai = result.break_even_for(THAI).unwrap();
    assert_eq!(thai.unit_variable_cost, Decimal::new(484, 2));
    assert_eq!(thai.break_even_units, 149);

    let kid = result.break_even_for(KID_FRIENDLY).unwrap();
    assert_eq!(kid.unit_variable_cost, Decimal::new(260, 2));
    assert_eq!(kid.break_even_units, 93);

    let fiery = result.break_even_for(FIERY).unwrap();
    assert_eq!(fiery.unit_variable_cost, Decimal::new(1038, 2));
    assert_eq!(fiery.break_even_units, 566);
    assert_eq!(fiery.break_even_revenue, Decimal::from(6792));
}

#[test]
fn test_ingredient_purchasing_totals() {
    let result = BreakEvenCalculator::calculate(&reference::sample_request().unwrap()).unwrap();
    let totals = result.demand.ingredient_totals().unwrap();

    let avocado = totals.iter().find(|t| t.ingredient == "Avocado").unwrap();
    // (15 + 28 + 7) × 30 × 2
    assert_eq!(avocado.monthly, Decimal::from(3000));

    let onion = totals.iter().find(|t| t.ingredient == "Onion").unwrap();
    // (15 + 7) × 30 × 25 g
    assert_eq!(onion.monthly, Decimal::from(16500));
    assert_eq!(onion.unit, UnitOfMeasure::Gram);
}

#[test]
fn test_missing_price_names_product_and_ingredient() {
    let offers: Vec<PriceOffer> = load_price_offers(reference::SAMPLE_SUPPLIER_CSV.as_bytes())
        .unwrap()
        .into_iter()
        .filter(|o| o.product != "Tabasco")
        .collect();

    let err = BreakEvenCalculator::calculate(&reference::request_with_offers(offers)).unwrap_err();
    assert_eq!(
        err,
        CostError::MissingPrice {
            product: FIERY.to_string(),
            ingredient: "Tabasco".to_string(),
        }
    );
    assert!(err.to_string().contains("Tabasco"));
}

#[test]
fn test_degenerate_margin() {
    // 單位變動成本 (1642.50 / 450) = 3.65，售價 3.65
    let mut request = avocado_lime_request();
    request.cost_parameters.rates =
        VariableCostRates::new(Decimal::from(11), Decimal::new(45, 1), Decimal::new(275, 2));
    request.selling_prices.insert(THAI.to_string(), Decimal::new(365, 2));

    assert!(matches!(
        BreakEvenCalculator::calculate(&request),
        Err(CostError::DegenerateMargin { .. })
    ));
}

#[test]
fn test_oversized_demand_is_error() {
    // 通過入口驗證，但月需求 × 用量超出 Decimal 範圍
    let mut request = reference::sample_request().unwrap();
    request
        .demand
        .daily_units
        .insert(THAI.to_string(), Decimal::from_i128_with_scale(10i128.pow(27), 0));
    assert!(request.validate().is_ok());

    match BreakEvenCalculator::calculate(&request) {
        Err(CostError::Overflow { subject }) => assert_eq!(subject, THAI),
        other => panic!("預期溢位錯誤，實際: {:?}", other.map(|r| r.id)),
    }
}

#[test]
fn test_loss_is_reported() {
    let mut request = reference::sample_request().unwrap();
    request.cost_parameters = reference::cost_parameters().with_fixed_cost("Equipment", Decimal::from(6000));

    let result = BreakEvenCalculator::calculate(&request).unwrap();
    let totals = &result.costs.totals;

    // 營收 17970 − 成本 18580.58
    assert_eq!(totals.total_cost, Decimal::new(1858058, 2));
    assert_eq!(totals.profit, Decimal::new(-61058, 2));
    assert!(!totals.is_profitable());
    assert_eq!(totals.in_thousands().profit, Decimal::new(-6, 1));
}

#[test]
fn test_recalculation_uses_new_prices() {
    let first = BreakEvenCalculator::calculate(&reference::sample_request().unwrap()).unwrap();

    let mut offers = load_price_offers(reference::SAMPLE_SUPPLIER_CSV.as_bytes()).unwrap();
    offers.push(PriceOffer::new("Avocado", Decimal::new(70, 2), date(2024, 3, 1)));
    let second = BreakEvenCalculator::calculate(&reference::request_with_offers(offers)).unwrap();

    assert_eq!(second.prices.get("Avocado").unwrap().price_per_unit, Decimal::new(70, 2));
    assert!(second.costs.totals.total_ingredients_cost < first.costs.totals.total_ingredients_cost);
    assert_ne!(first.id, second.id);
}

#[test]
fn test_demand_weighted_allocation() {
    let request = reference::sample_request()
        .unwrap()
        .with_config(PlanningConfig::new().with_allocation(CostAllocation::DemandWeighted));

    let result = BreakEvenCalculator::calculate(&request).unwrap();

    // 2750 × 450 / 1500
    assert_eq!(result.break_even_for(THAI).unwrap().fixed_cost_share, Decimal::from(825));
    assert_eq!(result.break_even_for(KID_FRIENDLY).unwrap().fixed_cost_share, Decimal::from(1540));
    assert_eq!(result.break_even_for(FIERY).unwrap().fixed_cost_share, Decimal::from(385));
}

#[test]
fn test_request_json_snapshot() {
    let request = reference::sample_request().unwrap();
    let json = serde_json::to_string(&request).unwrap();

    let loaded = load_request(json.as_bytes()).unwrap();
    assert_eq!(loaded, request);

    let result = BreakEvenCalculator::calculate(&loaded).unwrap();
    let snapshot = serde_json::to_value(&result).unwrap();
    assert!(snapshot.get("break_even").is_some());
}
