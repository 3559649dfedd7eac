//! # Magpie Control - 搜索采集控制核心
//!
//! 驱动一台带动力爪的小型轮式机器人在场地内搜索彩色目标：找到后夹取、
//! 举起存入收纳筐并复位爪子；碰到白色围墙则掉头规避；超出搜索时限则
//! 以"未找到"结束。单线程协作式轮询回路，无建图、无定位、无多目标
//! 规划。
//!
//! ## 模块
//!
//! - [`config`] - 标定常量集（出厂默认 + TOML 覆盖，构造后只读）
//! - [`drive`] - 差速底盘：直行修正与原地转向
//! - [`perception`] - 传感器读数到 墙/目标/无 的启发式分类
//! - [`grasp`] - 固定六步的夹取-举升-释放-复位序列
//! - [`mission`] - 顶层搜索采集状态机
//!
//! 硬件通过 `magpie-hal` 的能力接口注入，核心逻辑不触碰端口绑定。

pub mod config;
pub mod drive;
pub mod grasp;
pub mod mission;
pub mod perception;

// 重新导出常用类型
pub use config::{
    ClawConfig, CollectorConfig, ConfigError, DetectionConfig, DriveConfig, SearchConfig,
};
pub use drive::Drivetrain;
pub use grasp::Claw;
pub use mission::{Mission, MissionError, MissionState, SearchOutcome};
pub use perception::{Detection, Detector};
