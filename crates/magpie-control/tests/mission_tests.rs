//! 任务级集成测试
//!
//! 用脚本传感器 + 虚拟时钟在模拟硬件上跑完整任务回路，断言终值、
//! 指令轨迹和提示音。

use magpie_control::config::CollectorConfig;
use magpie_control::{Claw, Detector, Drivetrain, Mission, MissionState, SearchOutcome};
use magpie_hal::mock::{
    CommandLog, Cue, MockActuator, MockCommand, MockFeedback, ScriptedColorSensor, VirtualClock,
};
use magpie_hal::{Color, StopAction};

type MockMission = Mission<MockActuator, ScriptedColorSensor, MockFeedback, VirtualClock>;

struct Rig {
    mission: MockMission,
    log: CommandLog,
    feedback: MockFeedback,
    clock: VirtualClock,
}

fn rig(config: CollectorConfig, script: impl FnOnce(&mut ScriptedColorSensor)) -> Rig {
    let log = CommandLog::new();
    let feedback = MockFeedback::new();
    let clock = VirtualClock::new();

    let mut sensor = ScriptedColorSensor::new();
    script(&mut sensor);

    let drive = Drivetrain::new(
        MockActuator::new("left", log.clone()),
        MockActuator::new("right", log.clone()),
        config.drive.clone(),
    );
    let claw = Claw::new(
        MockActuator::new("jaws", log.clone()),
        MockActuator::new("lift", log.clone()),
        config.claw.clone(),
    );
    let detector = Detector::new(config.detection.clone());

    Rig {
        mission: Mission::new(
            drive,
            claw,
            detector,
            sensor,
            feedback.clone(),
            clock.clone(),
            config.search.clone(),
        ),
        log,
        feedback,
        clock,
    }
}

fn beeps(feedback: &MockFeedback) -> Vec<u32> {
    feedback
        .cues()
        .into_iter()
        .filter_map(|cue| match cue {
            Cue::Beep { frequency_hz, .. } => Some(frequency_hz),
            Cue::Display { .. } => None,
        })
        .collect()
}

#[test]
fn test_empty_arena_times_out_not_earlier() {
    let config = CollectorConfig::default();
    let timeout_ms = config.search.timeout_ms;
    let mut rig = rig(config, |sensor| {
        sensor.push_repeated(Color::Other, 0, 0, 1100);
    });

    let outcome = rig.mission.run().unwrap();

    assert_eq!(outcome, SearchOutcome { found: false });
    assert_eq!(rig.mission.state(), MissionState::Done);
    // 只有在经过整个时限之后才允许放弃
    assert!(rig.clock.now() >= timeout_ms);
    // 从未碰过爪子
    assert!(rig.log.commands_for("jaws").is_empty());
    assert!(rig.log.commands_for("lift").is_empty());
    // 失败提示：文字 + 低音
    assert!(beeps(&rig.feedback).contains(&200));
    assert!(rig.feedback.cues().contains(&Cue::Display {
        message: "target not found".to_string(),
    }));
}

#[test]
fn test_wall_preempts_target_logic_within_iteration() {
    let mut config = CollectorConfig::default();
    config.search.timeout_ms = 100;
    let mut rig = rig(config, |sensor| {
        // 白色且高反射：若目标逻辑先行会被误判为候选
        sensor.push_reading(Color::White, 50, 50);
        sensor.push_repeated(Color::Other, 0, 0, 10);
    });

    let outcome = rig.mission.run().unwrap();
    assert!(!outcome.found);

    // 第一轮就停车掉头：左轮先刹车，再收到保持式角度移动
    let left = rig.log.commands_for("left");
    assert_eq!(
        left[0],
        MockCommand::Stop {
            then: StopAction::Brake
        }
    );
    // round(180 * 4.5) = 810，左右反号
    assert_eq!(
        left[1],
        MockCommand::RunAngle {
            speed: 300,
            angle_deg: 810,
            then: StopAction::Hold,
        }
    );
    let right = rig.log.commands_for("right");
    assert_eq!(
        right[1],
        MockCommand::RunAngle {
            speed: 300,
            angle_deg: -810,
            then: StopAction::Hold,
        }
    );

    // 避障蜂鸣响过，夹取从未发生
    assert!(beeps(&rig.feedback).contains(&300));
    assert!(!beeps(&rig.feedback).contains(&1000));
    assert!(rig.log.commands_for("jaws").is_empty());
}

#[test]
fn test_scripted_target_drives_full_collect() {
    let config = CollectorConfig::default();
    let mut rig = rig(config, |sensor| {
        // 巡航五拍，然后看到红色，复查仍是红色
        sensor.push_repeated(Color::Other, 0, 0, 5);
        sensor.push_reading(Color::Red, 50, 30);
        sensor.push_reading(Color::Red, 50, 30);
    });

    let outcome = rig.mission.run().unwrap();

    assert_eq!(outcome, SearchOutcome { found: true });
    assert_eq!(rig.mission.state(), MissionState::Done);

    // 完整六步序列恰好执行一次：爪口 张开/闭合/释放 三次角度移动
    assert_eq!(
        rig.log.commands_for("jaws"),
        vec![
            MockCommand::RunAngle {
                speed: 200,
                angle_deg: 320,
                then: StopAction::Hold,
            },
            MockCommand::MoveComplete,
            MockCommand::RunAngle {
                speed: 500,
                angle_deg: -700,
                then: StopAction::Hold,
            },
            MockCommand::MoveComplete,
            MockCommand::RunAngle {
                speed: 200,
                angle_deg: 320,
                then: StopAction::Hold,
            },
            MockCommand::MoveComplete,
        ]
    );
    // 定时举升 + 完全下放复位
    assert_eq!(
        rig.log.commands_for("lift"),
        vec![
            MockCommand::Run { speed: 150 },
            MockCommand::Stop {
                then: StopAction::Hold
            },
            MockCommand::RunAngle {
                speed: 200,
                angle_deg: -180,
                then: StopAction::Hold,
            },
            MockCommand::MoveComplete,
        ]
    );

    // 成功提示音
    assert!(beeps(&rig.feedback).contains(&1000));
    assert!(rig.feedback.cues().contains(&Cue::Display {
        message: "target stored".to_string(),
    }));
}

#[test]
fn test_failed_recheck_resumes_search() {
    let mut config = CollectorConfig::default();
    config.search.timeout_ms = 300;
    let mut rig = rig(config, |sensor| {
        // 高反射制造候选，复查时什么都没有（噪声尖峰）
        sensor.push_reading(Color::Other, 50, 0);
        sensor.push_repeated(Color::Other, 0, 0, 20);
    });

    let outcome = rig.mission.run().unwrap();

    assert!(!outcome.found);
    assert!(rig.log.commands_for("jaws").is_empty());

    // 复查失败后继续巡航：停车之后仍有前进指令
    let left = rig.log.commands_for("left");
    let stop_at = left
        .iter()
        .position(|c| matches!(c, MockCommand::Stop { .. }))
        .expect("confirm stop recorded");
    assert!(
        left[stop_at + 1..]
            .iter()
            .any(|c| matches!(c, MockCommand::Run { .. })),
        "search resumed after failed recheck"
    );
}

#[test]
fn test_persistent_sensor_failure_degrades_to_timeout() {
    let mut config = CollectorConfig::default();
    config.search.timeout_ms = 90;
    let mut rig = rig(config, |sensor| {
        for _ in 0..10 {
            sensor.push_failure();
        }
    });

    let outcome = rig.mission.run().unwrap();

    assert!(!outcome.found);
    // 读不到传感器时按"一无所见"处理，机器人保持巡航
    assert!(
        rig.log
            .commands_for("left")
            .iter()
            .any(|c| matches!(c, MockCommand::Run { speed: 400 })),
    );
}
