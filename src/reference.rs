//! 三款酪梨醬的參考資料集
//!
//! 配方、每日需求、售價、固定成本、變動費率與製作步驟。
//! 報價另外以 `SAMPLE_SUPPLIER_CSV` 提供，格式與供應商報價表相同。

use breakeven_core::{
    CostParameters, PlanningConfig, PlanningRequest, PreparationStep, PriceOffer, Recipe,
    UnitOfMeasure, VariableCostRates,
};
use rust_decimal::Decimal;

use crate::loader::{load_price_offers, LoadError};

pub const THAI: &str = "Thai Guacamole";
pub const KID_FRIENDLY: &str = "Kid Friendly Guacamole";
pub const FIERY: &str = "Fiery Guacamole";

/// 範例供應商報價表
pub const SAMPLE_SUPPLIER_CSV: &str = "\
Product-ID;Product;Quantity;Price per Unit;Date of Offer
1,001;Avocado;1,000;0,85;2024-01-15
1,002;Avocado;2,000;0,80;2024-02-01
1,003;Avocado;500;0,92;2024-02-01
2,001;Lime;1,500;0,25;2024-01-10
2,002;Lime;1,000;0,30;2024-02-01
3,001;Red Chili;5,000;0,02;2024-02-01
3,002;Jalapeno Chili;5,000;0,025;2024-02-01
4,001;Onion;20,000;0,003;2024-02-01
4,002;Coriander;3,000;0,015;2024-02-01
4,003;Garlic;2,000;0,01;2024-02-01
5,001;Tomato;30,000;0,004;2024-02-01
6,001;Mayonnaise;10,000;0,006;01.02.2024
6,002;Tabasco;1,000;0,03;01.02.2024
";

/// 三款產品的配方（每份用量）
pub fn recipes() -> Vec<Recipe> {
    vec![
        Recipe::new(THAI)
            .with_line("Avocado", Decimal::from(2), UnitOfMeasure::Piece)
            .with_line("Lime", Decimal::new(5, 1), UnitOfMeasure::Piece)
            .with_line("Red Chili", Decimal::from(3), UnitOfMeasure::Gram)
            .with_line("Onion", Decimal::from(25), UnitOfMeasure::Gram)
            .with_line("Coriander", Decimal::from(8), UnitOfMeasure::Gram),
        Recipe::new(KID_FRIENDLY)
            .with_line("Avocado", Decimal::from(2), UnitOfMeasure::Piece)
            .with_line("Lime", Decimal::new(5, 1), UnitOfMeasure::Piece)
            .with_line("Mayonnaise", Decimal::from(30), UnitOfMeasure::Gram)
            .with_line("Tomato", Decimal::from(80), UnitOfMeasure::Gram)
            .with_line("Garlic", Decimal::from(7), UnitOfMeasure::Gram),
        Recipe::new(FIERY)
            .with_line("Avocado", Decimal::from(2), UnitOfMeasure::Piece)
            .with_line("Lime", Decimal::new(5, 1), UnitOfMeasure::Piece)
            .with_line("Jalapeno Chili", Decimal::from(6), UnitOfMeasure::Gram)
            .with_line("Onion", Decimal::from(25), UnitOfMeasure::Gram)
            .with_line("Tabasco", Decimal::from(4), UnitOfMeasure::Milliliter),
    ]
}

/// 固定成本、每小時變動費率與製作步驟
pub fn cost_parameters() -> CostParameters {
    CostParameters::new(VariableCostRates::new(
        Decimal::from(11),
        Decimal::new(45, 1),
        Decimal::new(275, 2),
    ))
    .with_fixed_cost("Rent", Decimal::from(1500))
    .with_fixed_cost("Salary", Decimal::from(1250))
    .with_preparation(
        THAI,
        vec![
            PreparationStep::new(7, 0).with_description("酪梨與萊姆汁放入碗中壓碎，調味"),
            PreparationStep::new(5, 0).with_description("拌入其餘材料，保留部分辣椒、香菜與洋蔥裝飾"),
        ],
    )
    .with_preparation(
        KID_FRIENDLY,
        vec![
            PreparationStep::new(7, 25).with_description("酪梨與萊姆汁放入碗中壓碎，調味"),
            PreparationStep::new(5, 0).with_description("加入美乃滋、大蒜與四分之三的番茄拌勻"),
            PreparationStep::new(3, 0).with_description("以保留的番茄丁裝飾"),
        ],
    )
    .with_preparation(
        FIERY,
        vec![
            PreparationStep::new(7, 0).with_description("酪梨與萊姆汁放入碗中壓碎，調味"),
            PreparationStep::new(3, 0).with_description("拌入其餘材料，保留部分洋蔥裝飾"),
            PreparationStep::new(5, 0).with_description("以墨西哥辣椒片、洋蔥與香草裝飾"),
        ],
    )
}

/// 以指定報價組成完整的計算請求
pub fn request_with_offers(offers: Vec<PriceOffer>) -> PlanningRequest {
    // (每日需求, 售價)
    let products = [
        (Decimal::from(15), Decimal::from(11)),
        (Decimal::from(28), Decimal::new(125, 1)),
        (Decimal::from(7), Decimal::from(12)),
    ];

    let mut request = PlanningRequest::new();
    for (recipe, (daily, price)) in recipes().into_iter().zip(products) {
        request = request.with_product(recipe, daily, price);
    }

    request
        .with_price_offers(offers)
        .with_cost_parameters(cost_parameters())
        .with_config(PlanningConfig::default())
}

/// 以範例報價表組成完整的計算請求
pub fn sample_request() -> Result<PlanningRequest, LoadError> {
    let offers = load_price_offers(SAMPLE_SUPPLIER_CSV.as_bytes())?;
    Ok(request_with_offers(offers))
}
