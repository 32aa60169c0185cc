// 该文件是 Tiangong （天宫慧眼） 项目的一部分。
// src/model/recorded.rs - 回放式检测器
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

use std::path::Path;

use tracing::info;

use super::{Detector, DetectorError, Inference};

/// 回放式检测器：从磁盘上的推理记录文件回放候选框序列。
/// 真实模型由外部协作方负责，本检测器供命令行与测试使用。
#[derive(Debug, Default)]
pub struct RecordedDetector {
  inference: Option<Inference>,
}

impl RecordedDetector {
  /// 未加载任何推理记录的检测器
  pub fn unloaded() -> Self {
    Self { inference: None }
  }

  pub fn from_path(path: &Path) -> Result<Self, DetectorError> {
    let data = std::fs::read_to_string(path)?;
    let inference: Inference = serde_json::from_str(&data)?;
    info!("推理记录加载完成: {} 个候选框", inference.candidates.len());

    Ok(Self {
      inference: Some(inference),
    })
  }

  pub fn is_loaded(&self) -> bool {
    self.inference.is_some()
  }
}

impl Detector for RecordedDetector {
  type Error = DetectorError;

  fn infer(&self, _image_data: &[u8]) -> Result<Inference, Self::Error> {
    self.inference.clone().ok_or(DetectorError::NotLoaded)
  }
}
