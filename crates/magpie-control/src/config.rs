//! 标定常量集
//!
//! 底盘修正系数、爪角度、检测阈值、搜索时限等都是经验标定值：出厂
//! 默认写死在 `Default` 实现里，可用 TOML 文件整体或部分覆盖。配置在
//! 构造后只读，注入各组件，运行期不再变化。

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 配置层错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    /// 配置文件读取失败
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML 解析失败
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// 取值非法
    #[error("invalid config value: {field}: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },
}

/// 底盘标定
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DriveConfig {
    /// 非主侧电机的速度修正系数，补偿两侧电机的系统性差异。
    /// 机器人向左偏则调小（如 0.95），向右偏则调大（如 1.05）。
    pub correction_factor: f32,

    /// 机身转角到轮转角的经验比值，轮距固定时幅值恒大于 1
    pub turn_ratio: f32,

    /// 搜索巡航速度
    pub search_speed: i32,

    /// 夹取前短距推进速度
    pub approach_speed: i32,

    /// 原地转向时的轮速
    pub turn_speed: i32,
}

impl Default for DriveConfig {
    fn default() -> Self {
        Self {
            correction_factor: 0.95,
            turn_ratio: 4.5,
            search_speed: 400,
            approach_speed: 200,
            turn_speed: 300,
        }
    }
}

/// 爪标定
///
/// 角度均为相对角度；开/合方向符号相反。举升不走角度控制而是定时
/// 转动，避免电机顶着物理限位堵转，各步之间的 settle 延时代替缺失的
/// 位置反馈。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClawConfig {
    /// 张开角度
    pub open_angle: i32,
    /// 闭合角度（反向大角度，保证夹紧）
    pub close_angle: i32,
    /// 正常下放角度
    pub arm_down_angle: i32,
    /// 末段完全下放角度（正常下放的两倍）
    pub arm_down_final_angle: i32,

    /// 开合与下放的常规速度
    pub arm_speed: i32,
    /// 闭合专用高速（加大夹持力）
    pub close_speed: i32,
    /// 举升低速（降低对限位的冲击）
    pub lift_speed: i32,

    /// 举升持续时长（定时开环）
    pub lift_duration_ms: u32,
    /// 举升停止后的稳定延时
    pub lift_hold_settle_ms: u32,

    /// 各步 settle 延时
    pub open_settle_ms: u32,
    /// 推进持续时长
    pub approach_ms: u32,
    pub approach_settle_ms: u32,
    pub close_settle_ms: u32,
    pub lift_settle_ms: u32,
    pub release_settle_ms: u32,
    pub lower_settle_ms: u32,
}

impl Default for ClawConfig {
    fn default() -> Self {
        Self {
            open_angle: 320,
            close_angle: -700,
            arm_down_angle: -90,
            arm_down_final_angle: -180,
            arm_speed: 200,
            close_speed: 500,
            lift_speed: 150,
            lift_duration_ms: 4000,
            lift_hold_settle_ms: 200,
            open_settle_ms: 400,
            approach_ms: 300,
            approach_settle_ms: 150,
            close_settle_ms: 400,
            lift_settle_ms: 500,
            release_settle_ms: 200,
            lower_settle_ms: 400,
        }
    }
}

/// 检测阈值
///
/// 颜色分类只在近距离可靠，反射/环境光强阈值是远距启发式的标定值，
/// 偏向宁多误报、换取更早反应。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// 反射光强阈值，高于此值视为近处有反光物
    pub reflection_threshold: u8,
    /// 环境光强主阈值，高于此值视为环境明亮（可能有物体反光）
    pub ambient_bright: u8,
    /// 环境光强次阈值，配合主阈值放宽远距判定
    pub ambient_glow: u8,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            reflection_threshold: 30,
            ambient_bright: 20,
            ambient_glow: 12,
        }
    }
}

/// 搜索回路参数
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// 搜索时限
    pub timeout_ms: u32,
    /// 候选目标的二次确认延时
    pub confirm_delay_ms: u32,
    /// 回路节拍
    pub tick_ms: u32,
    /// 避障掉头角度
    pub avoid_turn_deg: i32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 30_000,
            confirm_delay_ms: 150,
            tick_ms: 30,
            avoid_turn_deg: 180,
        }
    }
}

/// 完整标定集
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectorConfig {
    pub drive: DriveConfig,
    pub claw: ClawConfig,
    pub detection: DetectionConfig,
    pub search: SearchConfig,
}

impl CollectorConfig {
    /// 从 TOML 文件加载并校验
    ///
    /// 文件可以只覆盖部分字段，其余字段取默认值。
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// 校验取值范围
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
            ConfigError::Invalid {
                field,
                reason: reason.into(),
            }
        }

        if self.drive.correction_factor <= 0.0 {
            return Err(invalid("drive.correction_factor", "must be positive"));
        }
        if self.drive.turn_ratio.abs() <= 1.0 {
            return Err(invalid("drive.turn_ratio", "magnitude must exceed 1"));
        }
        for (field, speed) in [
            ("drive.search_speed", self.drive.search_speed),
            ("drive.approach_speed", self.drive.approach_speed),
            ("drive.turn_speed", self.drive.turn_speed),
            ("claw.arm_speed", self.claw.arm_speed),
            ("claw.close_speed", self.claw.close_speed),
            ("claw.lift_speed", self.claw.lift_speed),
        ] {
            if speed <= 0 {
                return Err(invalid(field, "must be positive"));
            }
        }
        if self.claw.open_angle <= 0 {
            return Err(invalid("claw.open_angle", "must be positive"));
        }
        if self.claw.close_angle >= 0 {
            return Err(invalid(
                "claw.close_angle",
                "must be negative (opposite sign of open_angle)",
            ));
        }
        if self.claw.lift_duration_ms == 0 {
            return Err(invalid("claw.lift_duration_ms", "must be nonzero"));
        }
        if self.search.timeout_ms == 0 {
            return Err(invalid("search.timeout_ms", "must be nonzero"));
        }
        if self.search.tick_ms == 0 {
            return Err(invalid("search.tick_ms", "must be nonzero"));
        }
        for (field, value) in [
            (
                "detection.reflection_threshold",
                self.detection.reflection_threshold,
            ),
            ("detection.ambient_bright", self.detection.ambient_bright),
            ("detection.ambient_glow", self.detection.ambient_glow),
        ] {
            if value > 100 {
                return Err(invalid(field, "intensity thresholds are 0-100"));
            }
        }
        Ok(())
    }
}
