// 该文件是 Tiangong （天宫慧眼） 项目的一部分。
// src/main.rs - 项目主程序
//
// 本文件根据 Apache 许可证第 2.0 版（以下简称“许可证”）授权使用；
// 除非遵守该许可证条款，否则您不得使用本文件。
// 您可通过以下网址获取许可证副本：
// http://www.apache.org/licenses/LICENSE-2.0
// 除非适用法律要求或书面同意，根据本许可协议分发的软件均按“原样”提供，
// 不附带任何形式的明示或暗示的保证或条件。
// 有关许可权限与限制的具体条款，请参阅本许可协议。
//
// Copyright (C) 2026 Johann Li <me@qinka.pro>, Wareless Group

mod args;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use uuid::Uuid;

use tiangong::model::{Detector, RecordedDetector};
use tiangong::output::ResultPackager;
use tiangong::pipeline::Pipeline;

fn main() -> Result<()> {
  tracing_subscriber::fmt::init();

  let args = args::Args::parse();

  info!("输入图像: {}", args.input.display());
  info!("推理记录: {}", args.detections.display());
  info!("置信度阈值: {}", args.confidence);
  info!("输出目录: {}", args.output_dir.display());

  let detector = RecordedDetector::from_path(&args.detections)?;
  let image_data = std::fs::read(&args.input)?;

  info!("开始处理...");
  let now = std::time::Instant::now();
  let inference = detector.infer(&image_data)?;
  let pipeline = Pipeline::new(ResultPackager::new(args.output_dir, args.url_prefix));
  let report = pipeline.process(&image_data, &inference, args.confidence, Uuid::new_v4())?;
  info!("处理完成，耗时: {:.2?}", now.elapsed());

  println!("{}", serde_json::to_string_pretty(&report)?);

  Ok(())
}
