// 该文件是 Tiangong （天宫慧眼） 项目的一部分。
// src/stats.rs - 检测统计聚合
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

use std::collections::BTreeMap;

use serde::Serialize;

use crate::filter::{AcceptedDetection, round3};

/// 单次请求的聚合统计
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Stats {
  pub total_detections: usize,
  pub class_counts: BTreeMap<String, usize>,
  pub average_confidence: f32,
  pub confidence_threshold: f32,
  pub processing_time: f32,
}

/// 保留两位小数
fn round2(value: f32) -> f32 {
  (value * 100.0).round() / 100.0
}

/// 聚合统计：逐一遍历已接受的检测，统计各类别数量与平均置信度。
/// `inference_ms` 由检测器透传，缺失时记为 0。
pub fn aggregate(
  accepted: &[AcceptedDetection],
  threshold: f32,
  inference_ms: Option<f32>,
) -> Stats {
  let mut class_counts = BTreeMap::new();
  let mut total_confidence = 0.0f32;

  for detection in accepted {
    *class_counts.entry(detection.class.clone()).or_insert(0) += 1;
    total_confidence += detection.confidence;
  }

  // 空列表时平均置信度记为 0，避免除零
  let average_confidence = if accepted.is_empty() {
    0.0
  } else {
    round3(total_confidence / accepted.len() as f32)
  };

  Stats {
    total_detections: accepted.len(),
    class_counts,
    average_confidence,
    confidence_threshold: threshold,
    processing_time: inference_ms.map(round2).unwrap_or(0.0),
  }
}
