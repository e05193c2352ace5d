//! # Break-Even Planning
//!
//! 酪梨醬小型食品事業的損益平衡與成本規劃
//!
//! - `breakeven_core`: 資料模型、配置與錯誤類型
//! - `breakeven_calc`: 價格決定、配方成本、需求推算、成本彙總與損益平衡
//! - `loader`: 供應商報價表（CSV）與請求快照（JSON）載入
//! - `reference`: 三款酪梨醬的參考資料集

pub mod loader;
pub mod reference;

pub use breakeven_calc::*;
pub use breakeven_core::*;
pub use loader::{
    load_price_offers, load_price_offers_file, load_request, load_request_file,
    load_supplier_table, LoadError, SupplierRecord,
};
