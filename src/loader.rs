//! 供應商報價表與請求快照載入
//!
//! 報價表為分號分隔的 CSV，欄位：
//!   Product-ID;Product;Quantity;Price per Unit;Date of Offer
//! 價格使用逗號小數點，Product-ID 與 Quantity 可能含千分位逗號。

use breakeven_core::{CostError, PlanningRequest, PriceOffer};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

/// 支援的報價日期格式
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%d.%m.%Y"];

/// 載入錯誤
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("CSV 解析錯誤: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON 解析錯誤: {0}")]
    Json(#[from] serde_json::Error),

    #[error("讀取檔案失敗: {0}")]
    Io(#[from] std::io::Error),

    #[error("第 {line} 行日期格式錯誤: {value}")]
    InvalidDate { line: usize, value: String },

    #[error("第 {line} 行數量格式錯誤: {value}")]
    InvalidQuantity { line: usize, value: String },

    #[error("第 {line} 行: {source}")]
    Row {
        line: usize,
        #[source]
        source: CostError,
    },

    #[error(transparent)]
    Cost(#[from] CostError),
}

/// CSV 原始列
#[derive(Debug, Clone, Deserialize)]
struct RawSupplierRow {
    #[serde(rename = "Product-ID")]
    product_id: String,
    #[serde(rename = "Product")]
    product: String,
    #[serde(rename = "Quantity")]
    quantity: String,
    #[serde(rename = "Price per Unit")]
    price_per_unit: String,
    #[serde(rename = "Date of Offer")]
    date_of_offer: String,
}

/// 供應商報價表的一列
#[derive(Debug, Clone, PartialEq)]
pub struct SupplierRecord {
    pub product_id: String,
    pub product: String,
    pub quantity: u64,
    pub price_per_unit: Decimal,
    pub offer_date: NaiveDate,
}

impl SupplierRecord {
    /// 轉換為報價
    pub fn to_price_offer(&self) -> PriceOffer {
        PriceOffer::new(self.product.clone(), self.price_per_unit, self.offer_date)
            .with_supplier_product_id(self.product_id.clone())
    }
}

/// 解析報價日期（YYYY-MM-DD 或 DD.MM.YYYY）
pub fn parse_offer_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
}

/// 從 reader 載入供應商報價表
pub fn load_supplier_table<R: Read>(reader: R) -> Result<Vec<SupplierRecord>, LoadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for (index, result) in csv_reader.deserialize().enumerate() {
        // 標題列佔第 1 行
        let line = index + 2;
        let raw: RawSupplierRow = result?;

        let quantity_text = raw.quantity.replace(',', "");
        let quantity = quantity_text
            .parse::<u64>()
            .map_err(|_| LoadError::InvalidQuantity {
                line,
                value: raw.quantity.clone(),
            })?;

        let offer_date = parse_offer_date(&raw.date_of_offer).ok_or_else(|| LoadError::InvalidDate {
            line,
            value: raw.date_of_offer.clone(),
        })?;

        let offer = PriceOffer::parse(raw.product.clone(), &raw.price_per_unit, offer_date)
            .map_err(|source| LoadError::Row { line, source })?;

        records.push(SupplierRecord {
            product_id: raw.product_id.replace(',', ""),
            product: raw.product,
            quantity,
            price_per_unit: offer.price_per_unit,
            offer_date,
        });
    }

    tracing::debug!("載入供應商報價 {} 筆", records.len());
    Ok(records)
}

/// 從 reader 載入報價（供價格決定使用）
pub fn load_price_offers<R: Read>(reader: R) -> Result<Vec<PriceOffer>, LoadError> {
    Ok(load_supplier_table(reader)?
        .iter()
        .map(SupplierRecord::to_price_offer)
        .collect())
}

/// 從檔案路徑載入報價
pub fn load_price_offers_file(path: impl AsRef<Path>) -> Result<Vec<PriceOffer>, LoadError> {
    let file = std::fs::File::open(path)?;
    load_price_offers(file)
}

/// 從 JSON 載入計算請求快照
pub fn load_request<R: Read>(reader: R) -> Result<PlanningRequest, LoadError> {
    let request: PlanningRequest = serde_json::from_reader(reader)?;
    request.validate()?;
    Ok(request)
}

/// 從檔案路徑載入計算請求快照
pub fn load_request_file(path: impl AsRef<Path>) -> Result<PlanningRequest, LoadError> {
    let file = std::fs::File::open(path)?;
    load_request(file)
}
