//! 场景文件
//!
//! 一个场景就是传感器读数脚本：按顺序逐条喂给任务回路，耗尽后视为
//! 读取失败（机器人保持巡航直到超时）。

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use magpie_hal::Color;
use magpie_hal::mock::ScriptedColorSensor;

/// 仿真场景
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    /// 场景名（仅用于日志）
    #[serde(default)]
    pub name: Option<String>,

    /// 读数脚本，按顺序消耗
    pub readings: Vec<ScenarioStep>,
}

/// 脚本中的一段读数
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioStep {
    /// 颜色分类（None / Red / White / Other）
    #[serde(default = "default_color")]
    pub color: Color,

    /// 反射光强（0-100）
    #[serde(default)]
    pub reflection: u8,

    /// 环境光强（0-100）
    #[serde(default)]
    pub ambient: u8,

    /// 本段重复次数
    #[serde(default = "default_repeat")]
    pub repeat: u32,

    /// 模拟读取失败（忽略其余字段）
    #[serde(default)]
    pub fail: bool,
}

fn default_color() -> Color {
    Color::Other
}

fn default_repeat() -> u32 {
    1
}

impl Scenario {
    /// 从 TOML 文件加载
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario {}", path.display()))?;
        let scenario: Scenario = toml::from_str(&content)
            .with_context(|| format!("failed to parse scenario {}", path.display()))?;
        Ok(scenario)
    }

    /// 展开后的读数总条数
    pub fn total_readings(&self) -> usize {
        self.readings
            .iter()
            .map(|step| step.repeat.max(1) as usize)
            .sum()
    }

    /// 展开为脚本传感器
    pub fn into_sensor(self) -> ScriptedColorSensor {
        let mut sensor = ScriptedColorSensor::new();
        for step in self.readings {
            for _ in 0..step.repeat.max(1) {
                if step.fail {
                    sensor.push_failure();
                } else {
                    sensor.push_reading(step.color, step.reflection, step.ambient);
                }
            }
        }
        sensor
    }
}
