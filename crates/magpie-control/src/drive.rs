//! 差速底盘
//!
//! 把"前进/后退/原地转向"意图翻译成左右轮的成对执行器指令。全程
//! 开环：直行靠静态修正系数压住系统性偏航，转向靠经验轮转比，均不做
//! 到位校验。

use magpie_hal::{Actuator, ActuatorError, PendingMove, StopAction};
use tracing::{debug, trace};

use crate::config::DriveConfig;

/// 双轮差速底盘
///
/// 左轮为主侧，右轮按修正系数缩放速度。
pub struct Drivetrain<A: Actuator> {
    left: A,
    right: A,
    cfg: DriveConfig,
}

impl<A: Actuator> Drivetrain<A> {
    pub fn new(left: A, right: A, cfg: DriveConfig) -> Self {
        Self { left, right, cfg }
    }

    /// 底盘标定（只读）
    pub fn config(&self) -> &DriveConfig {
        &self.cfg
    }

    /// 以带符号速度直行，正值向前
    ///
    /// 持续运动直到被后续指令取代或 [`stop`](Self::stop)。
    pub fn drive(&mut self, speed: i32) -> Result<(), ActuatorError> {
        let corrected = (speed as f32 * self.cfg.correction_factor).round() as i32;
        trace!(speed, corrected, "drive");
        self.left.run(speed)?;
        self.right.run(corrected)
    }

    /// 双轮立即刹车。幂等。
    pub fn stop(&mut self) -> Result<(), ActuatorError> {
        self.left.stop(StopAction::Brake)?;
        self.right.stop(StopAction::Brake)
    }

    /// 绕机身中心原地转向，正角度为顺时针（右转）
    ///
    /// 机身角度按轮转比换算成轮转角，左右轮反号。两条角度移动都发起
    /// 之后才逐一汇合，保证两轮在硬件上同时转动；返回时两轮均已到位
    /// 并保持。转角精度不做校验。
    pub fn turn(&mut self, angle_deg: i32, speed: i32) -> Result<(), ActuatorError> {
        let wheel_angle = (angle_deg as f32 * self.cfg.turn_ratio).round() as i32;
        debug!(angle_deg, wheel_angle, speed, "turn in place");

        let left = self.left.run_angle(speed, wheel_angle, StopAction::Hold)?;
        let right = self.right.run_angle(speed, -wheel_angle, StopAction::Hold)?;
        left.wait()?;
        right.wait()
    }
}
