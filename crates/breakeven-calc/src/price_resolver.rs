//! 原料價格決定

use breakeven_core::{CostError, PriceOffer, PriceTable, ResolvedPrice};
use std::collections::HashMap;

/// 價格決定器
pub struct PriceResolver;

impl PriceResolver {
    /// 從報價表決定每個產品的採用價格
    ///
    /// 規則：
    /// 1. 依產品分組
    /// 2. 只保留該產品最新報價日的報價
    /// 3. 取其中最低價；同價時取輸入順序中最先出現者
    pub fn resolve(offers: &[PriceOffer]) -> breakeven_core::Result<PriceTable> {
        if offers.is_empty() {
            return Err(CostError::InvalidInput("供應商報價表為空".to_string()));
        }

        let grouped = Self::group_offers_by_product(offers);

        let mut table = PriceTable::new();
        for (product, product_offers) in grouped {
            // 分組時保證每組至少一筆
            let Some(latest_date) = product_offers.iter().map(|o| o.offer_date).max() else {
                continue;
            };

            let mut best: Option<&PriceOffer> = None;
            for offer in product_offers.iter().filter(|o| o.offer_date == latest_date) {
                match best {
                    Some(current) if offer.price_per_unit >= current.price_per_unit => {}
                    _ => best = Some(offer),
                }
            }

            if let Some(offer) = best {
                tracing::debug!(
                    "採用價格: {} = {} ({})",
                    product,
                    offer.price_per_unit,
                    offer.offer_date
                );
                table.insert(ResolvedPrice::from(offer));
            }
        }

        Ok(table)
    }

    /// 按產品分組報價（組內保留輸入順序）
    fn group_offers_by_product(offers: &[PriceOffer]) -> HashMap<&str, Vec<&PriceOffer>> {
        let mut grouped: HashMap<&str, Vec<&PriceOffer>> = HashMap::new();
        for offer in offers {
            grouped.entry(offer.product.as_str()).or_default().push(offer);
        }
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_min_price_on_latest_date() {
        let offers = vec![
            PriceOffer::new("P", Decimal::new(100, 2), date(2024, 1, 1)),
            PriceOffer::new("P", Decimal::new(80, 2), date(2024, 2, 1)),
            PriceOffer::new("P", Decimal::new(90, 2), date(2024, 2, 1)),
        ];

        let table = PriceResolver::resolve(&offers).unwrap();
        let price = table.get("P").unwrap();

        assert_eq!(price.price_per_unit, Decimal::new(80, 2));
        assert_eq!(price.offer_date, date(2024, 2, 1));
    }

    #[test]
    fn test_older_cheaper_offer_ignored() {
        // 舊報價雖然更便宜，仍以最新報價日為準
        let offers = vec![
            PriceOffer::new("Avocado", Decimal::new(35, 2), date(2024, 1, 15)),
            PriceOffer::new("Avocado", Decimal::new(55, 2), date(2024, 3, 1)),
            PriceOffer::new("Avocado", Decimal::new(50, 2), date(2024, 3, 1)),
        ];

        let table = PriceResolver::resolve(&offers).unwrap();
        assert_eq!(table.get("Avocado").unwrap().price_per_unit, Decimal::new(50, 2));
    }

    #[test]
    fn test_tie_break_first_in_input_order() {
        let offers = vec![
            PriceOffer::new("Lime", Decimal::new(30, 2), date(2024, 2, 1))
                .with_supplier_product_id("A-1"),
            PriceOffer::new("Lime", Decimal::new(30, 2), date(2024, 2, 1))
                .with_supplier_product_id("B-7"),
        ];

        let table = PriceResolver::resolve(&offers).unwrap();
        assert_eq!(
            table.get("Lime").unwrap().supplier_product_id,
            Some("A-1".to_string())
        );
    }

    #[test]
    fn test_resolve_multiple_products() {
        let offers = vec![
            PriceOffer::new("Avocado", Decimal::new(50, 2), date(2024, 2, 1)),
            PriceOffer::new("Lime", Decimal::new(30, 2), date(2024, 2, 1)),
            PriceOffer::new("Onion", Decimal::new(1, 3), date(2024, 1, 20)),
        ];

        let table = PriceResolver::resolve(&offers).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.get("Onion").unwrap().price_per_unit, Decimal::new(1, 3));
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let offers = vec![
            PriceOffer::new("Avocado", Decimal::new(50, 2), date(2024, 2, 1)),
            PriceOffer::new("Avocado", Decimal::new(45, 2), date(2024, 1, 1)),
            PriceOffer::new("Lime", Decimal::new(30, 2), date(2024, 2, 1)),
        ];

        let first = PriceResolver::resolve(&offers).unwrap();
        let second = PriceResolver::resolve(&offers).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_offers() {
        assert!(matches!(
            PriceResolver::resolve(&[]),
            Err(CostError::InvalidInput(_))
        ));
    }
}
