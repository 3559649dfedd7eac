//! 搜索采集状态机
//!
//! 单线程协作式轮询回路。每一轮：先对照时限，再轮询感知，避墙优先于
//! 目标处理，候选目标经一次停车复查确认后才进入夹取；其余情况保持
//! 巡航。夹取一旦开始便是终态路径，本次运行不再回到搜索。
//!
//! 抖动抑制只有"延时后复查一次"这一层（无滑窗投票/指数滤波），
//! 对抗传感器噪声的强度有限，调大 `confirm_delay_ms` 是现有的唯一
//! 手段。

use magpie_hal::{Actuator, ActuatorError, Clock, ColorSensor, Feedback, ticks_diff};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::SearchConfig;
use crate::drive::Drivetrain;
use crate::grasp::Claw;
use crate::perception::Detector;

/// 任务层错误类型
#[derive(Error, Debug)]
pub enum MissionError {
    /// 执行器指令失败
    #[error("actuator command failed: {0}")]
    Actuator(#[from] ActuatorError),
}

/// 任务终值
///
/// 超时结束不是错误，`found = false` 是正常结果之一。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    /// 是否完成了目标采集
    pub found: bool,
}

/// 任务状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissionState {
    /// 巡航搜索
    Searching,
    /// 避墙掉头
    Avoiding,
    /// 停车复查候选目标
    Confirming,
    /// 执行夹取序列
    Grasping,
    /// 终态（成功或超时）
    Done,
}

/// 搜索采集任务
///
/// 组合底盘、爪、感知与各硬件能力，跑完一次完整任务。每次运行至多
/// 一次夹取尝试；时限只在回路迭代之间生效，不会打断进行中的阻塞
/// 执行器调用。
pub struct Mission<A, S, F, C>
where
    A: Actuator,
    S: ColorSensor,
    F: Feedback,
    C: Clock,
{
    drive: Drivetrain<A>,
    claw: Claw<A>,
    detector: Detector,
    sensor: S,
    feedback: F,
    clock: C,
    cfg: SearchConfig,
    state: MissionState,
}

impl<A, S, F, C> Mission<A, S, F, C>
where
    A: Actuator,
    S: ColorSensor,
    F: Feedback,
    C: Clock,
{
    pub fn new(
        drive: Drivetrain<A>,
        claw: Claw<A>,
        detector: Detector,
        sensor: S,
        feedback: F,
        clock: C,
        cfg: SearchConfig,
    ) -> Self {
        Self {
            drive,
            claw,
            detector,
            sensor,
            feedback,
            clock,
            cfg,
            state: MissionState::Searching,
        }
    }

    /// 当前任务状态
    pub fn state(&self) -> MissionState {
        self.state
    }

    /// 运行搜索采集任务直到终态
    pub fn run(&mut self) -> Result<SearchOutcome, MissionError> {
        self.feedback.beep(500, 100);
        info!(timeout_ms = self.cfg.timeout_ms, "search started");

        let start = self.clock.ticks_ms();
        self.enter(MissionState::Searching);

        loop {
            let elapsed = ticks_diff(self.clock.ticks_ms(), start);
            if elapsed >= self.cfg.timeout_ms {
                info!(elapsed_ms = elapsed, "search budget exhausted");
                self.enter(MissionState::Done);
                self.feedback.display("target not found");
                self.feedback.beep(200, 500);
                return Ok(SearchOutcome { found: false });
            }

            let detection = self.detector.poll(&mut self.sensor);

            // 避墙优先：本轮不再进入目标处理
            if detection.wall_ahead {
                self.avoid_wall()?;
                continue;
            }

            if detection.target_candidate() && self.confirm_target()? {
                self.collect_target()?;
                return Ok(SearchOutcome { found: true });
            }

            // 继续巡航一拍
            self.drive_forward()?;
            self.clock.sleep_ms(self.cfg.tick_ms);
        }
    }

    fn drive_forward(&mut self) -> Result<(), ActuatorError> {
        let speed = self.drive.config().search_speed;
        self.drive.drive(speed)
    }

    /// 停车、低音提示、原地掉头，然后回到搜索
    ///
    /// 掉头是尽力而为的开环动作，转角精度不做校验。
    fn avoid_wall(&mut self) -> Result<(), ActuatorError> {
        self.enter(MissionState::Avoiding);
        warn!("wall ahead; evasive turn");

        self.drive.stop()?;
        self.feedback.beep(300, 100);
        let speed = self.drive.config().turn_speed;
        self.drive.turn(self.cfg.avoid_turn_deg, speed)?;

        self.enter(MissionState::Searching);
        Ok(())
    }

    /// 停车短暂等待后复查一次，候选仍然成立才算确认
    fn confirm_target(&mut self) -> Result<bool, ActuatorError> {
        self.enter(MissionState::Confirming);
        debug!("target candidate; stopping to confirm");

        self.drive.stop()?;
        self.clock.sleep_ms(self.cfg.confirm_delay_ms);

        let recheck = self.detector.poll(&mut self.sensor);
        let confirmed = recheck.target_confirmed || recheck.target_near;
        if confirmed {
            info!("target confirmed");
        } else {
            debug!("candidate did not hold; resuming search");
            self.enter(MissionState::Searching);
        }
        Ok(confirmed)
    }

    /// 执行夹取序列并收尾
    fn collect_target(&mut self) -> Result<(), ActuatorError> {
        self.enter(MissionState::Grasping);

        self.claw.collect(&mut self.drive, &self.clock)?;

        self.enter(MissionState::Done);
        self.feedback.beep(1000, 300);
        self.feedback.display("target stored");
        info!("target collected");
        Ok(())
    }

    fn enter(&mut self, next: MissionState) {
        if self.state != next {
            debug!(from = ?self.state, to = ?next, "state transition");
            self.state = next;
        }
    }
}
