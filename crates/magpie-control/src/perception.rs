//! 感知分类
//!
//! 把一次传感器采样归成三个布尔量：前方是墙、确认目标、疑似目标。
//! 分类无记忆，只看最新一次采样；抖动抑制由任务层的延时复查承担，
//! 这里不做滑窗投票或滤波。

use magpie_hal::{Color, ColorSensor, SensorReading};
use tracing::trace;

use crate::config::DetectionConfig;

/// 一次采样的分类结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Detection {
    /// 前方是白色围墙
    pub wall_ahead: bool,
    /// 近距直接确认目标（颜色分类命中红色）
    pub target_confirmed: bool,
    /// 疑似目标（含远距光强启发式）
    pub target_near: bool,
}

impl Detection {
    /// 一无所见：传感器读取失败时的安全回退值
    pub const NONE: Detection = Detection {
        wall_ahead: false,
        target_confirmed: false,
        target_near: false,
    };

    /// 是否存在值得停车确认的目标候选
    pub fn target_candidate(&self) -> bool {
        self.target_near || self.target_confirmed
    }
}

/// 感知分类器
pub struct Detector {
    cfg: DetectionConfig,
}

impl Detector {
    pub fn new(cfg: DetectionConfig) -> Self {
        Self { cfg }
    }

    /// 对一次采样做纯分类
    ///
    /// 规则按序求值：
    /// 1. 颜色为白 => 前方是墙；
    /// 2. 颜色为红 => 确认目标（同时必为疑似目标）；
    /// 3. 远距启发式：环境光强超过主阈值且（反射超阈值或环境光强超
    ///    次阈值），或反射单独超阈值 => 疑似目标。
    ///
    /// 光强规则是"前方有反光/发亮物"的代理，不是距离估计；阈值见
    /// [`DetectionConfig`]，标定偏向误报换取更早反应。
    pub fn classify(&self, reading: &SensorReading) -> Detection {
        let wall_ahead = reading.color == Color::White;
        let target_confirmed = reading.color == Color::Red;

        let bright_profile = reading.ambient > self.cfg.ambient_bright
            && (reading.reflection > self.cfg.reflection_threshold
                || reading.ambient > self.cfg.ambient_glow);
        let target_near = target_confirmed
            || bright_profile
            || reading.reflection > self.cfg.reflection_threshold;

        Detection {
            wall_ahead,
            target_confirmed,
            target_near,
        }
    }

    /// 轮询传感器并分类
    ///
    /// 任何读取失败都折叠为 [`Detection::NONE`]（视为一无所见），
    /// 不向调用方传播错误；持续性故障表现为机器人保持巡航直到超时。
    pub fn poll<S: ColorSensor>(&self, sensor: &mut S) -> Detection {
        match sensor.sample() {
            Ok(reading) => self.classify(&reading),
            Err(error) => {
                trace!(%error, "sensor sample failed; treating as nothing detected");
                Detection::NONE
            }
        }
    }
}
