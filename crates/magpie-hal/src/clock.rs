//! 单调时钟能力接口
//!
//! 控制回路用 32 位毫秒计数器计算超时，计数器约 49.7 天回绕一次；
//! [`ticks_diff`] 通过环绕减法保证跨回绕的差值正确。

use std::time::{Duration, Instant};

use spin_sleep::SpinSleeper;

/// 单调毫秒时钟
///
/// `ticks_ms` 返回回绕的毫秒计数，差值必须用 [`ticks_diff`] 计算，
/// 不能直接相减。`sleep_ms` 阻塞当前线程。
pub trait Clock {
    /// 当前毫秒计数（回绕）
    fn ticks_ms(&self) -> u32;

    /// 阻塞等待指定毫秒数
    fn sleep_ms(&self, ms: u32);
}

/// 回绕安全的计数差值：`later` 相对 `earlier` 经过的毫秒数
#[inline]
pub fn ticks_diff(later: u32, earlier: u32) -> u32 {
    later.wrapping_sub(earlier)
}

/// 基于 `Instant` 的单调时钟实现
///
/// 使用 [`SpinSleeper`] 获得比 `thread::sleep` 更精确的短时等待，
/// 控制回路的节拍（几十毫秒）对过睡较敏感。
pub struct MonotonicClock {
    origin: Instant,
    sleeper: SpinSleeper,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            sleeper: SpinSleeper::default(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn ticks_ms(&self) -> u32 {
        // 截断到 32 位即为回绕计数
        self.origin.elapsed().as_millis() as u32
    }

    fn sleep_ms(&self, ms: u32) {
        self.sleeper.sleep(Duration::from_millis(u64::from(ms)));
    }
}
