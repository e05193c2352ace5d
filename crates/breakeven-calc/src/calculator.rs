//! 損益平衡主計算器

use breakeven_core::{PlanningRequest, PriceTable};
use std::collections::HashSet;

use crate::{
    BreakEvenAnalyzer, CostAggregator, CostAllocator, DemandProjector, PlanResult, PlanWarning,
    PriceResolver, RecipeCostCalculator,
};

/// 損益平衡計算器
///
/// 無狀態：每次計算都從請求快照重新開始，不快取任何中間結果。
pub struct BreakEvenCalculator;

impl BreakEvenCalculator {
    /// 主計算入口
    ///
    /// 任何一步失敗都直接回傳錯誤，不產生部分結果。
    pub fn calculate(request: &PlanningRequest) -> breakeven_core::Result<PlanResult> {
        tracing::info!(
            "開始損益平衡計算：產品 {} 項，報價 {} 筆，固定成本 {} 項",
            request.recipes.len(),
            request.price_offers.len(),
            request.cost_parameters.fixed_costs.len()
        );

        let start_time = std::time::Instant::now();
        let config = &request.config;

        // Step 0: 入口驗證
        tracing::debug!("Step 0: 入口驗證");
        request.validate()?;

        // Step 1: 決定原料價格
        tracing::debug!("Step 1: 決定原料價格");
        let prices = PriceResolver::resolve(&request.price_offers)?;
        tracing::debug!("採用價格數量: {}", prices.len());

        // Step 2: 配方成本
        tracing::debug!("Step 2: 配方成本");
        let recipe_costs = request
            .recipes
            .iter()
            .map(|recipe| RecipeCostCalculator::calculate(recipe, &prices, config.money_scale))
            .collect::<breakeven_core::Result<Vec<_>>>()?;

        // Step 3: 需求推算
        tracing::debug!("Step 3: 需求推算");
        let demand = DemandProjector::project(&request.recipes, &request.demand, config.days_per_month)?;

        // Step 4: 月成本彙總
        tracing::debug!("Step 4: 月成本彙總");
        let costs = CostAggregator::aggregate(
            &recipe_costs,
            &demand,
            &request.selling_prices,
            &request.cost_parameters,
            config.money_scale,
        )?;

        // Step 5: 成本分攤與損益平衡
        tracing::debug!("Step 5: 成本分攤 ({:?}) 與損益平衡", config.allocation);
        let shares = CostAllocator::allocate(
            &costs,
            config.allocation,
            config.include_ingredient_cost,
            config.money_scale,
        )?;

        let break_even = costs
            .products
            .iter()
            .zip(shares.iter())
            .map(|(product, share)| {
                BreakEvenAnalyzer::analyze(&product.product_id, product.selling_price, share, &config.sweep)
            })
            .collect::<breakeven_core::Result<Vec<_>>>()?;

        let warnings = Self::collect_warnings(request, &prices);

        let mut result = PlanResult {
            id: uuid::Uuid::new_v4(),
            prices,
            recipe_costs,
            demand,
            costs,
            break_even,
            warnings: Vec::new(),
            calculation_time_ms: Some(start_time.elapsed().as_millis()),
        };

        for warning in warnings {
            tracing::warn!("{}: {}", warning.subject, warning.message);
            result.add_warning(warning);
        }

        tracing::info!("損益平衡計算完成，耗時 {:?}", start_time.elapsed());
        tracing::info!(
            "總營收 {} / 總成本 {} / 利潤 {}",
            result.costs.totals.total_revenue,
            result.costs.totals.total_cost,
            result.costs.totals.profit
        );

        Ok(result)
    }

    /// 收集不影響計算結果的警告
    fn collect_warnings(request: &PlanningRequest, prices: &PriceTable) -> Vec<PlanWarning> {
        let mut warnings = Vec::new();

        for product_id in request.product_ids() {
            if !request.cost_parameters.has_preparation(product_id) {
                warnings.push(PlanWarning::warning(
                    product_id.to_string(),
                    "未定義製作步驟，變動成本以 0 計".to_string(),
                ));
            }
        }

        let used: HashSet<&str> = request.recipes.iter().flat_map(|r| r.ingredients()).collect();
        for price in prices.sorted() {
            if !used.contains(price.product.as_str()) {
                warnings.push(PlanWarning::info(
                    price.product.clone(),
                    "報價表中的產品未被任何配方使用".to_string(),
                ));
            }
        }

        warnings
    }
}
