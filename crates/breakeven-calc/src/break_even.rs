//! 損益平衡分析

use breakeven_core::{
    checked_add, checked_div, checked_mul, checked_sub, round_units, CostError, UnitSweep,
};
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

use crate::CostShare;

/// 損益平衡表的一列
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakEvenRow {
    pub units: u64,
    pub price: Decimal,
    pub unit_variable_cost: Decimal,
    pub total_variable_cost: Decimal,
    pub fixed_cost: Decimal,
    pub total_cost: Decimal,
    pub total_revenue: Decimal,
    pub profit_loss: Decimal,
    pub break_even_units: u64,
}

/// 單一產品的損益平衡分析
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakEvenAnalysis {
    pub product_id: String,
    pub selling_price: Decimal,
    pub unit_variable_cost: Decimal,
    pub fixed_cost_share: Decimal,

    /// 邊際貢獻（售價 − 單位變動成本）
    pub contribution_margin: Decimal,

    /// 損益平衡銷量
    pub break_even_units: u64,

    /// 損益平衡營收
    pub break_even_revenue: Decimal,

    /// 銷量範圍最大點的總成本（圖表標註高度）
    pub peak_total_cost: Decimal,

    /// 成本/營收表
    pub rows: Vec<BreakEvenRow>,
}

impl BreakEvenAnalysis {
    /// 指定銷量的邊際貢獻是否足以涵蓋固定成本
    ///
    /// 以實際金額判斷而非比較 `break_even_units`：後者經過四捨五入，
    /// 可能略低於真正的損益平衡點。
    pub fn is_profitable_at(&self, units: u64) -> bool {
        // 邊際貢獻恆為正，乘積溢位時必定大於固定成本
        Decimal::from(units)
            .checked_mul(self.contribution_margin)
            .map_or(true, |covered| covered >= self.fixed_cost_share)
    }
}

/// 損益平衡分析器
pub struct BreakEvenAnalyzer;

impl BreakEvenAnalyzer {
    /// 計算損益平衡點與成本/營收表
    ///
    /// 損益平衡銷量不隨表中銷量變化，表格只用於繪製成本線與營收線。
    pub fn analyze(
        product_id: &str,
        selling_price: Decimal,
        share: &CostShare,
        sweep: &UnitSweep,
    ) -> breakeven_core::Result<BreakEvenAnalysis> {
        sweep.validate()?;

        let unit_variable_cost = share.unit_variable_cost;
        let fixed_cost = share.fixed_cost_share;
        let break_even_units =
            Self::break_even_units(product_id, fixed_cost, selling_price, unit_variable_cost)?;

        let rows = sweep
            .units()
            .into_iter()
            .map(|units| {
                let quantity = Decimal::from(units);
                let total_variable_cost = checked_mul(quantity, unit_variable_cost, product_id)?;
                let total_cost = checked_add(fixed_cost, total_variable_cost, product_id)?;
                let total_revenue = checked_mul(quantity, selling_price, product_id)?;
                Ok(BreakEvenRow {
                    units,
                    price: selling_price,
                    unit_variable_cost,
                    total_variable_cost,
                    fixed_cost,
                    total_cost,
                    total_revenue,
                    profit_loss: checked_sub(total_revenue, total_cost, product_id)?,
                    break_even_units,
                })
            })
            .collect::<breakeven_core::Result<Vec<_>>>()?;

        let peak_total_cost = rows.last().map(|r| r.total_cost).unwrap_or(fixed_cost);

        tracing::debug!(
            "損益平衡: {} 售價 {} / 單位變動成本 {} / 固定成本 {} → {} 單位",
            product_id,
            selling_price,
            unit_variable_cost,
            fixed_cost,
            break_even_units
        );

        Ok(BreakEvenAnalysis {
            product_id: product_id.to_string(),
            selling_price,
            unit_variable_cost,
            fixed_cost_share: fixed_cost,
            contribution_margin: checked_sub(selling_price, unit_variable_cost, product_id)?,
            break_even_units,
            break_even_revenue: checked_mul(Decimal::from(break_even_units), selling_price, product_id)?,
            peak_total_cost,
            rows,
        })
    }

    /// 損益平衡銷量 = round(固定成本 / (售價 − 單位變動成本))
    ///
    /// 邊際貢獻為零或為負時無法得到有意義的銷量，直接回報錯誤。
    pub fn break_even_units(
        product_id: &str,
        fixed_cost: Decimal,
        selling_price: Decimal,
        unit_variable_cost: Decimal,
    ) -> breakeven_core::Result<u64> {
        let margin = checked_sub(selling_price, unit_variable_cost, product_id)?;

        if margin.is_zero() {
            return Err(CostError::DegenerateMargin {
                product: product_id.to_string(),
                price: selling_price.to_string(),
            });
        }
        if margin < Decimal::ZERO {
            return Err(CostError::NegativeMargin {
                product: product_id.to_string(),
                price: selling_price.to_string(),
                unit_variable_cost: unit_variable_cost.to_string(),
            });
        }

        let units = checked_div(fixed_cost, margin, product_id)?;
        round_units(units).to_u64().ok_or_else(|| {
            CostError::InvalidInput(format!(
                "損益平衡銷量超出範圍: {} 固定成本 {}",
                product_id, fixed_cost
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    fn share(fixed: Decimal, vc: Decimal) -> CostShare {
        CostShare {
            product_id: "Thai Guacamole".to_string(),
            fixed_cost_share: fixed,
            unit_variable_cost: vc,
        }
    }

    #[test]
    fn test_break_even_units() {
        // 916.67 / (11 − 4.78) = 147.37...
        let analysis = BreakEvenAnalyzer::analyze(
            "Thai Guacamole",
            Decimal::from(11),
            &share(Decimal::new(91667, 2), Decimal::new(478, 2)),
            &UnitSweep::default(),
        )
        .unwrap();

        assert_eq!(analysis.break_even_units, 147);
        assert_eq!(analysis.contribution_margin, Decimal::new(622, 2));
        assert_eq!(analysis.break_even_revenue, Decimal::from(1617));
        assert!(analysis.is_profitable_at(200));
        assert!(!analysis.is_profitable_at(100));
    }

    #[test]
    fn test_profitability_below_rounded_break_even() {
        // 916.67 / 6.22 = 147.37，捨入為 147，但 147 單位仍虧損 2.33
        let analysis = BreakEvenAnalyzer::analyze(
            "Thai Guacamole",
            Decimal::from(11),
            &share(Decimal::new(91667, 2), Decimal::new(478, 2)),
            &UnitSweep::new(0, 147, 147),
        )
        .unwrap();

        let last = analysis.rows.last().unwrap();
        assert_eq!(last.units, 147);
        assert_eq!(last.profit_loss, Decimal::new(-233, 2));

        assert_eq!(analysis.break_even_units, 147);
        assert!(!analysis.is_profitable_at(147));
        assert!(analysis.is_profitable_at(148));
    }

    #[test]
    fn test_schedule_overflow_is_error() {
        let result = BreakEvenAnalyzer::analyze(
            "Thai Guacamole",
            Decimal::MAX,
            &share(Decimal::ZERO, Decimal::ONE),
            &UnitSweep::new(0, 200, 100),
        );

        assert_eq!(
            result,
            Err(CostError::Overflow {
                subject: "Thai Guacamole".to_string(),
            })
        );
    }

    #[test]
    fn test_schedule_rows() {
        let analysis = BreakEvenAnalyzer::analyze(
            "Thai Guacamole",
            Decimal::from(11),
            &share(Decimal::new(91667, 2), Decimal::new(478, 2)),
            &UnitSweep::default(),
        )
        .unwrap();

        assert_eq!(analysis.rows.len(), 13);

        let zero = &analysis.rows[0];
        assert_eq!(zero.units, 0);
        assert_eq!(zero.total_cost, Decimal::new(91667, 2));
        assert_eq!(zero.total_revenue, Decimal::ZERO);
        assert_eq!(zero.profit_loss, Decimal::new(-91667, 2));

        let row = &analysis.rows[2];
        assert_eq!(row.units, 200);
        assert_eq!(row.total_variable_cost, Decimal::from(956));
        assert_eq!(row.total_cost, Decimal::new(187267, 2));
        assert_eq!(row.total_revenue, Decimal::from(2200));
        assert_eq!(row.profit_loss, Decimal::new(32733, 2));

        // 每一列的損益平衡銷量相同
        assert!(analysis.rows.iter().all(|r| r.break_even_units == 147));
        assert_eq!(analysis.peak_total_cost, analysis.rows[12].total_cost);
    }

    #[rstest]
    #[case(Decimal::new(91667, 2), Decimal::from(11), Decimal::new(484, 2), 149)]
    #[case(Decimal::new(91667, 2), Decimal::new(125, 1), Decimal::new(260, 2), 93)]
    #[case(Decimal::new(91667, 2), Decimal::from(12), Decimal::new(1038, 2), 566)]
    #[case(Decimal::from(2750), Decimal::from(11), Decimal::new(365, 2), 374)]
    // 2.5 → 2（雙數捨入）
    #[case(Decimal::from(5), Decimal::from(3), Decimal::from(1), 2)]
    fn test_break_even_cases(
        #[case] fixed: Decimal,
        #[case] price: Decimal,
        #[case] vc: Decimal,
        #[case] expected: u64,
    ) {
        assert_eq!(
            BreakEvenAnalyzer::break_even_units("P", fixed, price, vc).unwrap(),
            expected
        );
    }

    #[test]
    fn test_degenerate_margin() {
        let result = BreakEvenAnalyzer::analyze(
            "Thai Guacamole",
            Decimal::new(478, 2),
            &share(Decimal::new(91667, 2), Decimal::new(478, 2)),
            &UnitSweep::default(),
        );

        assert!(matches!(result, Err(CostError::DegenerateMargin { .. })));
    }

    #[test]
    fn test_negative_margin() {
        let result = BreakEvenAnalyzer::break_even_units(
            "Fiery Guacamole",
            Decimal::new(91667, 2),
            Decimal::from(10),
            Decimal::new(1025, 2),
        );

        assert_eq!(
            result,
            Err(CostError::NegativeMargin {
                product: "Fiery Guacamole".to_string(),
                price: "10".to_string(),
                unit_variable_cost: "10.25".to_string(),
            })
        );
    }

    #[test]
    fn test_zero_fixed_cost() {
        let units = BreakEvenAnalyzer::break_even_units(
            "Thai Guacamole",
            Decimal::ZERO,
            Decimal::from(11),
            Decimal::new(478, 2),
        )
        .unwrap();

        assert_eq!(units, 0);
    }

    proptest! {
        #[test]
        fn prop_break_even_covers_fixed_cost(
            fixed in 0i64..10_000_000,
            vc in 0i64..5_000,
            margin in 1i64..5_000,
        ) {
            let fixed = Decimal::new(fixed, 2);
            let vc = Decimal::new(vc, 2);
            let margin = Decimal::new(margin, 2);
            let price = vc + margin;

            let units = BreakEvenAnalyzer::break_even_units("P", fixed, price, vc).unwrap();
            let covered = Decimal::from(units) * margin;

            // 誤差不超過一個單位的邊際貢獻
            prop_assert!((covered - fixed).abs() <= margin);
        }

        #[test]
        fn prop_schedule_is_linear(
            fixed in 0i64..1_000_000,
            vc in 0i64..2_000,
            margin in 1i64..2_000,
        ) {
            let fixed = Decimal::new(fixed, 2);
            let vc = Decimal::new(vc, 2);
            let price = vc + Decimal::new(margin, 2);

            let analysis =
                BreakEvenAnalyzer::analyze("P", price, &share(fixed, vc), &UnitSweep::default()).unwrap();

            for pair in analysis.rows.windows(2) {
                let step = Decimal::from(pair[1].units - pair[0].units);
                prop_assert_eq!(pair[1].total_cost - pair[0].total_cost, step * vc);
                prop_assert_eq!(pair[1].total_revenue - pair[0].total_revenue, step * price);
            }
            for row in &analysis.rows {
                prop_assert_eq!(analysis.is_profitable_at(row.units), row.profit_loss >= Decimal::ZERO);
            }
        }
    }
}
