//! # Magpie HAL - 硬件能力抽象层
//!
//! 定义采集机器人核心逻辑所依赖的四种硬件能力接口：
//!
//! - [`Actuator`] - 旋转执行器（左右驱动轮、爪开合、爪升降，共四个实例）
//! - [`ColorSensor`] - 颜色/光强组合传感器
//! - [`Feedback`] - 声音与文字提示（蜂鸣器、屏幕）
//! - [`Clock`] - 单调毫秒时钟与阻塞等待
//!
//! 端口绑定和底层电机固件不属于本层：真实硬件后端在进程入口处构造并
//! 以 trait 对象/泛型注入控制层。启用 `mock` feature 可获得无硬件的
//! 模拟实现，用于测试与仿真（参见 [`mock`] 模块）。

pub mod actuator;
pub mod clock;
pub mod feedback;
pub mod sensor;

#[cfg(feature = "mock")]
pub mod mock;

// 重新导出常用类型
pub use actuator::{Actuator, ActuatorError, PendingMove, StopAction};
pub use clock::{Clock, MonotonicClock, ticks_diff};
pub use feedback::{Feedback, TraceFeedback};
pub use sensor::{Color, ColorSensor, SensorError, SensorReading};
