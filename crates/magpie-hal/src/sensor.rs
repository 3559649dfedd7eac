//! 颜色/光强组合传感器能力接口
//!
//! 单个朝前的传感器同时提供三种读数：离散颜色分类、反射光强、环境光强。
//! 颜色分类只在近距离可靠；反射与环境光强由感知层用作远距启发式。
//! 读数每次轮询新取，不缓存。

use num_enum::FromPrimitive;
use thiserror::Error;

/// 传感器层错误类型
#[derive(Error, Debug)]
pub enum SensorError {
    /// 本次读取不可用（设备忙、未就绪等瞬时失败）
    #[error("sensor reading unavailable")]
    Unavailable,

    /// 底层设备 IO 错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// 离散颜色分类
///
/// 判别值对应传感器固件的原始颜色码（0 = 无，5 = 红，6 = 白），
/// 其余颜色码一律归入 [`Color::Other`]。
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Color {
    /// 未检测到颜色
    None = 0,
    /// 红色（采集目标）
    Red = 5,
    /// 白色（场地围墙）
    White = 6,
    /// 其他任意颜色
    #[num_enum(default)]
    Other = 0xFF,
}

/// 一次完整的传感器采样
///
/// `reflection` 与 `ambient` 取值 0-100。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SensorReading {
    /// 离散颜色分类
    pub color: Color,
    /// 反射光强（0-100）
    pub reflection: u8,
    /// 环境光强（0-100）
    pub ambient: u8,
}

/// 颜色/光强组合传感器
pub trait ColorSensor {
    /// 读取离散颜色分类
    fn color(&mut self) -> Result<Color, SensorError>;

    /// 读取反射光强（0-100）
    fn reflection(&mut self) -> Result<u8, SensorError>;

    /// 读取环境光强（0-100）
    fn ambient(&mut self) -> Result<u8, SensorError>;

    /// 取一次完整采样
    ///
    /// 依次读取颜色、反射、环境光强，任一失败即整体失败。
    fn sample(&mut self) -> Result<SensorReading, SensorError> {
        Ok(SensorReading {
            color: self.color()?,
            reflection: self.reflection()?,
            ambient: self.ambient()?,
        })
    }
}
