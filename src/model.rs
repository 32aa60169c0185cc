// 该文件是 Tiangong （天宫慧眼） 项目的一部分。
// src/model.rs - 检测器边界
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

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 检测器给出的原始候选框
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawDetection {
  pub class_id: u32,
  pub score: f32,
  pub bbox: [f32; 4], // [x_min, y_min, x_max, y_max]（像素坐标）
}

/// 一次推理的完整输出
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Inference {
  pub candidates: Vec<RawDetection>,
  /// 推理耗时（毫秒），由检测器提供，可能缺失
  #[serde(default)]
  pub inference_ms: Option<f32>,
}

#[derive(Error, Debug)]
pub enum DetectorError {
  #[error("模型尚未加载")]
  NotLoaded,
  #[error("I/O 错误: {0}")]
  IoError(#[from] std::io::Error),
  #[error("推理记录解析错误: {0}")]
  ParseError(#[from] serde_json::Error),
}

/// 检测器协作方：接收图像字节，产出候选框序列。
/// 非极大值抑制由检测器自行完成，管线不再做去重。
pub trait Detector {
  type Error: std::error::Error;

  fn infer(&self, image_data: &[u8]) -> Result<Inference, Self::Error>;
}

mod recorded;
pub use self::recorded::RecordedDetector;
