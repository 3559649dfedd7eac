//! 旋转执行器能力接口
//!
//! 一个执行器支持三种指令：连续转动、相对角度移动、停止。角度移动是
//! 非阻塞发起的，返回 [`PendingMove`] 句柄；需要"两个执行器同时动作"
//! 的调用方（差速转向）先发起两条指令，再分别 `wait()` 汇合。依赖
//! 调用顺序（先阻塞后阻塞）来假装并行是不允许的，会把几何运动串行化。

use thiserror::Error;

/// 执行器层错误类型
#[derive(Error, Debug)]
pub enum ActuatorError {
    /// 底层设备 IO 错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// 设备断开或未绑定
    #[error("actuator disconnected: {0}")]
    Disconnected(String),

    /// 指令被设备拒绝（超出允许范围等）
    #[error("command rejected: {0}")]
    Rejected(String),
}

/// 移动完成后的停止方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StopAction {
    /// 自由滑行
    Coast,
    /// 主动刹车（默认）
    #[default]
    Brake,
    /// 刹车并保持位置（抵抗外力）
    Hold,
}

/// 在途的角度移动
///
/// 由 [`Actuator::run_angle`] 返回。`wait()` 阻塞到物理移动完成且停止
/// 方式已生效。句柄被丢弃时移动继续执行，只是无法再汇合。
pub trait PendingMove {
    /// 阻塞等待移动完成
    fn wait(self) -> Result<(), ActuatorError>;
}

/// 旋转执行器
///
/// 四个独立实例：左驱动轮、右驱动轮、爪开合、爪升降。同一实例同一时刻
/// 只由一个组件驱动，无需加锁。
pub trait Actuator {
    /// 在途移动句柄类型
    type Move: PendingMove;

    /// 以带符号速度连续转动，直到被后续指令取代或停止
    fn run(&mut self, speed: i32) -> Result<(), ActuatorError>;

    /// 非阻塞发起相对角度移动
    ///
    /// `angle_deg` 的符号决定转动方向；到达目标后按 `then` 停止。
    /// 返回的句柄用于汇合，见 [`PendingMove`]。
    fn run_angle(
        &mut self,
        speed: i32,
        angle_deg: i32,
        then: StopAction,
    ) -> Result<Self::Move, ActuatorError>;

    /// 立即停止，按 `then` 处理。幂等。
    fn stop(&mut self, then: StopAction) -> Result<(), ActuatorError>;

    /// 发起角度移动并立即阻塞等待完成
    fn run_angle_blocking(
        &mut self,
        speed: i32,
        angle_deg: i32,
        then: StopAction,
    ) -> Result<(), ActuatorError> {
        self.run_angle(speed, angle_deg, then)?.wait()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_action_default_is_brake() {
        assert_eq!(StopAction::default(), StopAction::Brake);
    }

    #[test]
    fn test_actuator_error_display() {
        let err = ActuatorError::Disconnected("outA".to_string());
        assert!(format!("{err}").contains("outA"));

        let err = ActuatorError::Rejected("speed out of range".to_string());
        assert!(format!("{err}").contains("speed out of range"));
    }
}
