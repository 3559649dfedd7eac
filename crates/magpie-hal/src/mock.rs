//! 无硬件的模拟实现（`mock` feature）
//!
//! 测试与仿真共用：执行器把收到的指令按序记入共享的 [`CommandLog`]，
//! 传感器按脚本逐次吐出读数，时钟的 `sleep_ms` 直接拨快虚拟时间，
//! 整个控制回路因此可以在毫秒内跑完 30 秒的任务。

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::actuator::{Actuator, ActuatorError, PendingMove, StopAction};
use crate::clock::Clock;
use crate::feedback::Feedback;
use crate::sensor::{Color, ColorSensor, SensorError, SensorReading};

// ==================== 执行器 ====================

/// 模拟执行器收到的单条指令
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCommand {
    /// 连续转动
    Run { speed: i32 },
    /// 相对角度移动（发起时刻记录）
    RunAngle {
        speed: i32,
        angle_deg: i32,
        then: StopAction,
    },
    /// 停止
    Stop { then: StopAction },
    /// 角度移动汇合完成（`wait()` 时刻记录）
    MoveComplete,
}

/// 带执行器名字的日志条目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggedCommand {
    pub actuator: &'static str,
    pub command: MockCommand,
}

/// 多个模拟执行器共享的指令日志
///
/// 共享保证了跨执行器的指令顺序可断言（例如转向必须先发起两条
/// 角度移动再汇合）。
#[derive(Clone, Default)]
pub struct CommandLog {
    entries: Arc<Mutex<Vec<LoggedCommand>>>,
}

impl CommandLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, actuator: &'static str, command: MockCommand) {
        self.entries.lock().push(LoggedCommand { actuator, command });
    }

    /// 当前日志快照
    pub fn snapshot(&self) -> Vec<LoggedCommand> {
        self.entries.lock().clone()
    }

    /// 取走全部日志并清空
    pub fn take(&self) -> Vec<LoggedCommand> {
        std::mem::take(&mut *self.entries.lock())
    }

    /// 指定执行器收到的指令序列
    pub fn commands_for(&self, actuator: &str) -> Vec<MockCommand> {
        self.entries
            .lock()
            .iter()
            .filter(|entry| entry.actuator == actuator)
            .map(|entry| entry.command.clone())
            .collect()
    }
}

/// 记录型模拟执行器
///
/// 所有指令立即"成功"；角度移动的句柄在 `wait()` 时记录
/// [`MockCommand::MoveComplete`]。
pub struct MockActuator {
    name: &'static str,
    log: CommandLog,
}

impl MockActuator {
    pub fn new(name: &'static str, log: CommandLog) -> Self {
        Self { name, log }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// 模拟执行器的在途移动句柄
pub struct MockMove {
    actuator: &'static str,
    log: CommandLog,
}

impl PendingMove for MockMove {
    fn wait(self) -> Result<(), ActuatorError> {
        self.log.push(self.actuator, MockCommand::MoveComplete);
        Ok(())
    }
}

impl Actuator for MockActuator {
    type Move = MockMove;

    fn run(&mut self, speed: i32) -> Result<(), ActuatorError> {
        self.log.push(self.name, MockCommand::Run { speed });
        Ok(())
    }

    fn run_angle(
        &mut self,
        speed: i32,
        angle_deg: i32,
        then: StopAction,
    ) -> Result<Self::Move, ActuatorError> {
        self.log.push(
            self.name,
            MockCommand::RunAngle {
                speed,
                angle_deg,
                then,
            },
        );
        Ok(MockMove {
            actuator: self.name,
            log: self.log.clone(),
        })
    }

    fn stop(&mut self, then: StopAction) -> Result<(), ActuatorError> {
        self.log.push(self.name, MockCommand::Stop { then });
        Ok(())
    }
}

// ==================== 传感器 ====================

/// 脚本驱动的模拟传感器
///
/// 每次 `sample()` 消耗一条脚本读数；脚本耗尽后返回
/// [`SensorError::Unavailable`]。注意单独调用 `color()` 等访问器同样
/// 消耗一整条读数。
#[derive(Default)]
pub struct ScriptedColorSensor {
    script: VecDeque<Result<SensorReading, SensorError>>,
}

impl ScriptedColorSensor {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一条读数
    pub fn push_reading(&mut self, color: Color, reflection: u8, ambient: u8) -> &mut Self {
        self.script.push_back(Ok(SensorReading {
            color,
            reflection,
            ambient,
        }));
        self
    }

    /// 追加 `count` 条相同读数
    pub fn push_repeated(
        &mut self,
        color: Color,
        reflection: u8,
        ambient: u8,
        count: usize,
    ) -> &mut Self {
        for _ in 0..count {
            self.push_reading(color, reflection, ambient);
        }
        self
    }

    /// 追加一次读取失败
    pub fn push_failure(&mut self) -> &mut Self {
        self.script.push_back(Err(SensorError::Unavailable));
        self
    }

    /// 剩余脚本条数
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl ColorSensor for ScriptedColorSensor {
    fn color(&mut self) -> Result<Color, SensorError> {
        self.sample().map(|reading| reading.color)
    }

    fn reflection(&mut self) -> Result<u8, SensorError> {
        self.sample().map(|reading| reading.reflection)
    }

    fn ambient(&mut self) -> Result<u8, SensorError> {
        self.sample().map(|reading| reading.ambient)
    }

    fn sample(&mut self) -> Result<SensorReading, SensorError> {
        self.script.pop_front().unwrap_or(Err(SensorError::Unavailable))
    }
}

// ==================== 时钟 ====================

/// 虚拟时钟
///
/// `sleep_ms` 不真正等待，只把计数拨快；克隆的句柄共享同一时间，
/// 测试可以在任务运行后读取经过的虚拟时长。
#[derive(Clone, Default)]
pub struct VirtualClock {
    now_ms: Arc<Mutex<u32>>,
}

impl VirtualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// 手动拨快时间
    pub fn advance(&self, ms: u32) {
        let mut now = self.now_ms.lock();
        *now = now.wrapping_add(ms);
    }

    /// 当前虚拟时间
    pub fn now(&self) -> u32 {
        *self.now_ms.lock()
    }
}

impl Clock for VirtualClock {
    fn ticks_ms(&self) -> u32 {
        self.now()
    }

    fn sleep_ms(&self, ms: u32) {
        self.advance(ms);
    }
}

// ==================== 提示 ====================

/// 模拟提示收到的单条提示
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cue {
    Beep { frequency_hz: u32, duration_ms: u32 },
    Display { message: String },
}

/// 记录型模拟提示
#[derive(Clone, Default)]
pub struct MockFeedback {
    cues: Arc<Mutex<Vec<Cue>>>,
}

impl MockFeedback {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cues(&self) -> Vec<Cue> {
        self.cues.lock().clone()
    }
}

impl Feedback for MockFeedback {
    fn beep(&mut self, frequency_hz: u32, duration_ms: u32) {
        self.cues.lock().push(Cue::Beep {
            frequency_hz,
            duration_ms,
        });
    }

    fn display(&mut self, message: &str) {
        self.cues.lock().push(Cue::Display {
            message: message.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_actuator_records_commands_in_order() {
        let log = CommandLog::new();
        let mut motor = MockActuator::new("left", log.clone());

        motor.run(400).unwrap();
        motor.stop(StopAction::Brake).unwrap();

        assert_eq!(
            log.commands_for("left"),
            vec![
                MockCommand::Run { speed: 400 },
                MockCommand::Stop {
                    then: StopAction::Brake
                },
            ]
        );
    }

    #[test]
    fn test_mock_move_records_completion_on_wait() {
        let log = CommandLog::new();
        let mut motor = MockActuator::new("lift", log.clone());

        let pending = motor.run_angle(200, -180, StopAction::Hold).unwrap();
        pending.wait().unwrap();

        assert_eq!(
            log.commands_for("lift"),
            vec![
                MockCommand::RunAngle {
                    speed: 200,
                    angle_deg: -180,
                    then: StopAction::Hold,
                },
                MockCommand::MoveComplete,
            ]
        );
    }

    #[test]
    fn test_shared_log_preserves_cross_actuator_order() {
        let log = CommandLog::new();
        let mut left = MockActuator::new("left", log.clone());
        let mut right = MockActuator::new("right", log.clone());

        left.run(100).unwrap();
        right.run(95).unwrap();

        let entries = log.take();
        assert_eq!(entries[0].actuator, "left");
        assert_eq!(entries[1].actuator, "right");
    }

    #[test]
    fn test_scripted_sensor_pops_in_order_then_fails() {
        let mut sensor = ScriptedColorSensor::new();
        sensor
            .push_reading(Color::Other, 10, 10)
            .push_reading(Color::Red, 50, 30);

        assert_eq!(sensor.sample().unwrap().color, Color::Other);
        assert_eq!(sensor.sample().unwrap().color, Color::Red);
        assert!(matches!(sensor.sample(), Err(SensorError::Unavailable)));
    }

    #[test]
    fn test_scripted_sensor_failure_entry() {
        let mut sensor = ScriptedColorSensor::new();
        sensor.push_failure().push_reading(Color::White, 0, 0);

        assert!(sensor.sample().is_err());
        assert_eq!(sensor.sample().unwrap().color, Color::White);
    }

    #[test]
    fn test_virtual_clock_sleep_advances_time() {
        let clock = VirtualClock::new();
        let observer = clock.clone();

        clock.sleep_ms(30);
        clock.sleep_ms(150);

        assert_eq!(observer.now(), 180);
    }

    #[test]
    fn test_mock_feedback_records_cues() {
        let mut feedback = MockFeedback::new();
        feedback.beep(1000, 300);
        feedback.display("target stored");

        assert_eq!(
            feedback.cues(),
            vec![
                Cue::Beep {
                    frequency_hz: 1000,
                    duration_ms: 300,
                },
                Cue::Display {
                    message: "target stored".to_string(),
                },
            ]
        );
    }
}
