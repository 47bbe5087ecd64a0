use anyhow::Result;
use clap::{Parser, ValueEnum};
use schemars::schema_for;
use tracing::debug;

#[derive(Debug, Parser)]
#[clap(name = env!("CARGO_BIN_NAME"))]
struct Args {
    #[clap(subcommand)]
    subcommand: Subcommand,
}

#[derive(Debug, clap::Subcommand)]
enum Subcommand {
    /// Generate JSON schema for the specified config.
    Schema {
        /// Kind of config.
        #[clap(value_enum, ignore_case = true)]
        kind: ConfigKind,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ConfigKind {
    NodeConfig,
    CaptureGeneral,
    CaptureFrame,
    #[value(name = "capture-2d-frame")]
    Capture2DFrame,
}

fn main() -> Result<()> {
    zivid_camera_apps::utils::init_tracing();
    let args = Args::parse();
    debug!(?args);

    match args.subcommand {
        Subcommand::Schema { kind } => {
            let schema = match kind {
                ConfigKind::NodeConfig => schema_for!(zivid_camera_apps::ZividCameraNodeConfig),
                ConfigKind::CaptureGeneral => schema_for!(zivid_camera::CaptureGeneralConfig),
                ConfigKind::CaptureFrame => schema_for!(zivid_camera::CaptureFrameConfig),
                ConfigKind::Capture2DFrame => schema_for!(zivid_camera::Capture2DFrameConfig),
            };
            println!("{}", serde_json::to_string_pretty(&schema)?);
        }
    }
    Ok(())
}
