// 该文件是 Tiangong （天宫慧眼） 项目的一部分。
// src/args.rs - 项目参数配置
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

use std::path::PathBuf;

use clap::Parser;

/// Tiangong 项目参数配置
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
  /// 输入图像文件路径
  /// 支持格式: *.jpg, *.jpeg, *.png
  #[arg(long, value_name = "FILE")]
  pub input: PathBuf,

  /// 推理记录文件路径（检测器输出的 JSON 候选框序列）
  #[arg(long, value_name = "FILE")]
  pub detections: PathBuf,

  /// 置信度阈值 (0.0 - 1.0)
  #[arg(long, default_value_t = tiangong::DEFAULT_CONFIDENCE, value_name = "THRESHOLD")]
  pub confidence: f32,

  /// 结果图像输出目录
  #[arg(long, default_value = "static/processed", value_name = "DIR")]
  pub output_dir: PathBuf,

  /// 结果图像的 URL 前缀
  #[arg(long, default_value = "/static/processed", value_name = "PREFIX")]
  pub url_prefix: String,
}
