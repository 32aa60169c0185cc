// 该文件是 Tiangong （天宫慧眼） 项目的一部分。
// src/filter.rs - 置信度过滤
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

use serde::Serialize;

use crate::model::RawDetection;
use crate::registry;

/// 通过置信度阈值的检测结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AcceptedDetection {
  pub class: String,
  pub confidence: f32,
  pub bbox: [i32; 4], // [x_min, y_min, x_max, y_max]（整数像素坐标）
  pub center: [i32; 2],
}

/// 保留三位小数
pub(crate) fn round3(value: f32) -> f32 {
  (value * 1000.0).round() / 1000.0
}

/// 过滤原始候选框：丢弃置信度低于阈值的候选框，保持检测器的输出顺序。
/// 零面积或反转的候选框原样通过，由绘制阶段容忍处理。
pub fn filter(candidates: &[RawDetection], threshold: f32) -> Vec<AcceptedDetection> {
  let mut accepted = Vec::new();

  for candidate in candidates {
    if candidate.score < threshold {
      continue;
    }

    // 坐标截断为整数（不做四舍五入），保证可直接用作像素索引
    let x1 = candidate.bbox[0] as i32;
    let y1 = candidate.bbox[1] as i32;
    let x2 = candidate.bbox[2] as i32;
    let y2 = candidate.bbox[3] as i32;

    accepted.push(AcceptedDetection {
      class: registry::class_name(candidate.class_id),
      confidence: round3(candidate.score),
      bbox: [x1, y1, x2, y2],
      // 中心点为中点坐标的整数向下取整
      center: [(x1 + x2).div_euclid(2), (y1 + y2).div_euclid(2)],
    });
  }

  accepted
}
