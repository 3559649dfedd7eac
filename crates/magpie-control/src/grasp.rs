//! 夹取序列
//!
//! 固定的六步"张爪-推进-闭合-举升-释放-复位"序列，每步之后跟一段
//! 固定 settle 延时顶替缺失的位置/力反馈。序列严格顺序、全程阻塞、
//! 不分支：一旦开始就执行到底，途中不再看传感器，也没有回滚路径。

use magpie_hal::{Actuator, ActuatorError, Clock, StopAction};
use tracing::{debug, info};

use crate::config::ClawConfig;
use crate::drive::Drivetrain;

/// 动力爪：开合电机 + 升降电机
pub struct Claw<A: Actuator> {
    jaws: A,
    lift: A,
    cfg: ClawConfig,
}

impl<A: Actuator> Claw<A> {
    pub fn new(jaws: A, lift: A, cfg: ClawConfig) -> Self {
        Self { jaws, lift, cfg }
    }

    /// 张开爪子到标定角度并保持
    pub fn open(&mut self) -> Result<(), ActuatorError> {
        self.jaws
            .run_angle_blocking(self.cfg.arm_speed, self.cfg.open_angle, StopAction::Hold)
    }

    /// 高速闭合爪子并保持
    ///
    /// 速度高于常规值是有意的：物体尺寸和停车位置都有不确定性，
    /// 加大速度/力保证夹紧。
    pub fn close(&mut self) -> Result<(), ActuatorError> {
        self.jaws
            .run_angle_blocking(self.cfg.close_speed, self.cfg.close_angle, StopAction::Hold)
    }

    /// 定时举升
    ///
    /// 举升终点是未知的物理限位，走角度控制会顶着限位堵转，所以低速
    /// 定时转动，到时主动停止并保持位置，防止重力把爪子拉回。
    pub fn lift_up<C: Clock>(&mut self, clock: &C) -> Result<(), ActuatorError> {
        self.lift.run(self.cfg.lift_speed)?;
        clock.sleep_ms(self.cfg.lift_duration_ms);
        self.lift.stop(StopAction::Hold)?;
        clock.sleep_ms(self.cfg.lift_hold_settle_ms);
        Ok(())
    }

    /// 常规下放（标定/手动调试用）
    pub fn lower(&mut self) -> Result<(), ActuatorError> {
        self.lift
            .run_angle_blocking(self.cfg.arm_speed, self.cfg.arm_down_angle, StopAction::Hold)
    }

    /// 完全下放到基准位（常规下放角度的两倍）
    pub fn lower_fully(&mut self) -> Result<(), ActuatorError> {
        self.lift.run_angle_blocking(
            self.cfg.arm_speed,
            self.cfg.arm_down_final_angle,
            StopAction::Hold,
        )
    }

    /// 执行完整采集序列
    ///
    /// 1. 张爪；2. 短距推进把物体送入爪口后停车；3. 高速闭合夹紧；
    /// 4. 定时举升并保持（把物体倒入收纳筐的高度）；5. 再次张爪释放；
    /// 6. 完全下放复位，准备下一轮。
    pub fn collect<C: Clock>(
        &mut self,
        drive: &mut Drivetrain<A>,
        clock: &C,
    ) -> Result<(), ActuatorError> {
        info!("grasp sequence started");

        debug!("step 1: open jaws");
        self.open()?;
        clock.sleep_ms(self.cfg.open_settle_ms);

        debug!("step 2: nudge forward");
        let approach_speed = drive.config().approach_speed;
        drive.drive(approach_speed)?;
        clock.sleep_ms(self.cfg.approach_ms);
        drive.stop()?;
        clock.sleep_ms(self.cfg.approach_settle_ms);

        debug!("step 3: close jaws");
        self.close()?;
        clock.sleep_ms(self.cfg.close_settle_ms);

        debug!("step 4: timed lift");
        self.lift_up(clock)?;
        clock.sleep_ms(self.cfg.lift_settle_ms);

        debug!("step 5: release into bin");
        self.open()?;
        clock.sleep_ms(self.cfg.release_settle_ms);

        debug!("step 6: lower to rest");
        self.lower_fully()?;
        clock.sleep_ms(self.cfg.lower_settle_ms);

        info!("grasp sequence complete");
        Ok(())
    }
}
