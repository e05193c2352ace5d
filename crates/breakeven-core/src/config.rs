//! 計算配置模型

use serde::{Deserialize, Serialize};

use crate::money::MONEY_SCALE;
use crate::{CostError, Result};

/// 計算參數配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanningConfig {
    /// 每月天數（固定值，不依日曆）
    pub days_per_month: u32,

    /// 共用成本分攤規則
    pub allocation: CostAllocation,

    /// 損益平衡表的銷量範圍
    pub sweep: UnitSweep,

    /// 單位變動成本是否包含原料成本
    /// - false: 只計入製作工時成本（預設）
    /// - true: 加上每單位原料成本
    pub include_ingredient_cost: bool,

    /// 金額小數位數
    pub money_scale: u32,
}

impl Default for PlanningConfig {
    fn default() -> Self {
        Self {
            days_per_month: 30,
            allocation: CostAllocation::EvenSplit,
            sweep: UnitSweep::default(),
            include_ingredient_cost: false,
            money_scale: MONEY_SCALE,
        }
    }
}

impl PlanningConfig {
    /// 創建預設配置
    pub fn new() -> Self {
        Self::default()
    }

    /// 建構器模式：設置每月天數
    pub fn with_days_per_month(mut self, days: u32) -> Self {
        self.days_per_month = days;
        self
    }

    /// 建構器模式：設置分攤規則
    pub fn with_allocation(mut self, allocation: CostAllocation) -> Self {
        self.allocation = allocation;
        self
    }

    /// 建構器模式：設置銷量範圍
    pub fn with_sweep(mut self, sweep: UnitSweep) -> Self {
        self.sweep = sweep;
        self
    }

    /// 建構器模式：設置單位變動成本是否包含原料
    ///
    /// # 範例
    /// ```
    /// # use breakeven_core::PlanningConfig;
    /// let config = PlanningConfig::new().with_include_ingredient_cost(true);
    /// assert!(config.include_ingredient_cost);
    /// ```
    pub fn with_include_ingredient_cost(mut self, include: bool) -> Self {
        self.include_ingredient_cost = include;
        self
    }

    /// 建構器模式：設置金額小數位數
    pub fn with_money_scale(mut self, scale: u32) -> Self {
        self.money_scale = scale;
        self
    }

    /// 驗證配置
    pub fn validate(&self) -> Result<()> {
        if self.days_per_month == 0 {
            return Err(CostError::InvalidConfig("每月天數必須大於 0".to_string()));
        }
        if self.money_scale > 10 {
            return Err(CostError::InvalidConfig(format!(
                "金額小數位數過大: {}",
                self.money_scale
            )));
        }
        self.sweep.validate()
    }
}

/// 共用成本（固定成本、變動成本）分攤規則
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CostAllocation {
    /// 平均分攤：每個產品分得 1/N，不論需求比例
    EvenSplit,

    /// 依月需求量比例分攤
    DemandWeighted,
}

/// 損益平衡表的最大點數
pub const MAX_SWEEP_POINTS: u64 = 10_000;

/// 損益平衡表的銷量範圍（含起訖）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitSweep {
    pub start: u64,
    pub end: u64,
    pub step: u64,
}

impl Default for UnitSweep {
    fn default() -> Self {
        Self {
            start: 0,
            end: 1200,
            step: 100,
        }
    }
}

impl UnitSweep {
    pub fn new(start: u64, end: u64, step: u64) -> Self {
        Self { start, end, step }
    }

    /// 驗證範圍
    pub fn validate(&self) -> Result<()> {
        if self.step == 0 {
            return Err(CostError::InvalidConfig("銷量間距必須大於 0".to_string()));
        }
        if self.end < self.start {
            return Err(CostError::InvalidConfig(format!(
                "銷量範圍無效: {} > {}",
                self.start, self.end
            )));
        }
        if self.point_count() > MAX_SWEEP_POINTS {
            return Err(CostError::InvalidConfig(format!(
                "銷量點數過多: {} 至 {} 間距 {}，上限 {} 點",
                self.start, self.end, self.step, MAX_SWEEP_POINTS
            )));
        }
        Ok(())
    }

    /// 範圍內的銷量點數（未套用上限）
    fn point_count(&self) -> u64 {
        if self.step == 0 || self.end < self.start {
            return 0;
        }
        (self.end - self.start) / self.step + 1
    }

    /// 範圍內的所有銷量點，最多 `MAX_SWEEP_POINTS` 點
    pub fn units(&self) -> Vec<u64> {
        if self.step == 0 {
            return vec![self.start];
        }
        let count = self.point_count().min(MAX_SWEEP_POINTS);
        (0..count).map(|i| self.start + i * self.step).collect()
    }

    /// 最大銷量點
    pub fn last(&self) -> u64 {
        self.units().last().copied().unwrap_or(self.start)
    }
}
