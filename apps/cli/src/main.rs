//! # Magpie CLI
//!
//! 采集机器人的命令行工具。真实硬件后端在机器人本体上构造；这里
//! 提供的是脚本场景仿真（模拟执行器 + 虚拟时钟，任务瞬间跑完）和
//! 标定配置管理。
//!
//! ```bash
//! # 在脚本场景下跑一次完整任务
//! magpie-cli simulate --scenario scenarios/find_target.toml
//!
//! # 查看出厂标定，或生成可编辑的配置文件
//! magpie-cli config show
//! magpie-cli config init --path magpie.toml
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use magpie_control::{Claw, CollectorConfig, Detector, Drivetrain, Mission};
use magpie_hal::TraceFeedback;
use magpie_hal::mock::{CommandLog, MockActuator, VirtualClock};

mod scenario;

use scenario::Scenario;

/// Magpie CLI - 采集机器人命令行工具
#[derive(Parser, Debug)]
#[command(name = "magpie-cli")]
#[command(about = "Command-line interface for the Magpie collector robot", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// 在脚本场景下仿真一次搜索采集任务
    Simulate {
        /// 场景文件（TOML，传感器读数脚本）
        #[arg(short, long)]
        scenario: PathBuf,

        /// 标定配置文件（缺省用出厂标定）
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// 标定配置管理
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// 打印出厂标定（TOML）
    Show,

    /// 生成可编辑的标定配置文件
    Init {
        /// 输出路径
        #[arg(short, long)]
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    // 初始化日志
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("magpie_cli=info".parse().unwrap())
                .add_directive("magpie_control=info".parse().unwrap())
                .add_directive("magpie_hal=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Simulate { scenario, config } => simulate(&scenario, config.as_deref()),
        Commands::Config(ConfigCommand::Show) => {
            let text = toml::to_string_pretty(&CollectorConfig::default())?;
            print!("{text}");
            Ok(())
        }
        Commands::Config(ConfigCommand::Init { path }) => {
            let text = toml::to_string_pretty(&CollectorConfig::default())?;
            std::fs::write(&path, text)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("✅ wrote default calibration to {}", path.display());
            Ok(())
        }
    }
}

/// 在模拟硬件上跑完整任务回路
fn simulate(scenario_path: &Path, config_path: Option<&Path>) -> Result<()> {
    let config = match config_path {
        Some(path) => CollectorConfig::load_from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => CollectorConfig::default(),
    };
    let scenario = Scenario::load(scenario_path)?;
    info!(
        name = scenario.name.as_deref().unwrap_or("unnamed"),
        readings = scenario.total_readings(),
        "scenario loaded"
    );

    let log = CommandLog::new();
    let clock = VirtualClock::new();

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
    let sensor = scenario.into_sensor();

    let mut mission = Mission::new(
        drive,
        claw,
        detector,
        sensor,
        TraceFeedback,
        clock.clone(),
        config.search.clone(),
    );

    let outcome = mission.run()?;

    println!();
    if outcome.found {
        println!("✅ target collected");
    } else {
        println!(
            "❌ target not found within {} ms budget",
            config.search.timeout_ms
        );
    }
    println!("   simulated time:    {} ms", clock.now());
    println!("   actuator commands: {}", log.snapshot().len());
    Ok(())
}
