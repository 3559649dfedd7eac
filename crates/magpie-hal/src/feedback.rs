//! 声音与文字提示能力接口
//!
//! 只在任务开始、成功、失败和避障时调用，核心逻辑不依赖其成败，
//! 因此接口不返回错误，实现自行吞掉设备故障。

use tracing::info;

/// 用户提示能力（蜂鸣器 + 屏幕）
pub trait Feedback {
    /// 以给定频率（Hz）鸣响给定时长（ms）
    fn beep(&mut self, frequency_hz: u32, duration_ms: u32);

    /// 显示一行短文本
    fn display(&mut self, message: &str);
}

/// 仅写日志的提示实现，用于仿真和无声运行
#[derive(Debug, Default)]
pub struct TraceFeedback;

impl Feedback for TraceFeedback {
    fn beep(&mut self, frequency_hz: u32, duration_ms: u32) {
        info!(frequency_hz, duration_ms, "beep");
    }

    fn display(&mut self, message: &str) {
        info!(message, "display");
    }
}
