// 该文件是 Tiangong （天宫慧眼） 项目的一部分。
// src/pipeline.rs - 检测结果处理管线
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

use image::RgbImage;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::filter;
use crate::model::Inference;
use crate::output::{Draw, EmptyReport, PackageError, Report, ResultPackager};
use crate::stats;

#[derive(Error, Debug)]
pub enum PipelineError {
  #[error("图像解码错误: {0}")]
  ImageDecodeError(image::ImageError),
  #[error("结果打包错误: {0}")]
  PackageError(#[from] PackageError),
}

/// 检测结果处理管线：过滤 → {标注, 统计} → 打包。
/// 每次调用相互独立，除只读的类别注册表外无跨请求共享状态。
pub struct Pipeline<'a> {
  draw: Draw<'a>,
  packager: ResultPackager,
}

impl Pipeline<'_> {
  pub fn new(packager: ResultPackager) -> Self {
    Self {
      draw: Draw::default(),
      packager,
    }
  }

  /// 处理一次请求：接收图像字节与检测器输出，产出交付文档。
  pub fn process(
    &self,
    image_data: &[u8],
    inference: &Inference,
    threshold: f32,
    request_id: Uuid,
  ) -> Result<Report, PipelineError> {
    // 无任何候选框时走廉价路径，不解码也不复制图像
    if inference.candidates.is_empty() {
      info!("检测器未给出候选框，返回降级响应");
      return Ok(Report::NoCandidates(EmptyReport::new()));
    }

    let source: RgbImage = image::load_from_memory(image_data)
      .map_err(PipelineError::ImageDecodeError)?
      .into_rgb8();

    let accepted = filter::filter(&inference.candidates, threshold);
    info!(
      "通过置信度阈值 {} 的检测: {}/{}",
      threshold,
      accepted.len(),
      inference.candidates.len()
    );

    let annotated = self.draw.annotate(&source, &accepted);
    let aggregated = stats::aggregate(&accepted, threshold, inference.inference_ms);

    let report = self
      .packager
      .package(&annotated, accepted, aggregated, request_id)?;
    Ok(Report::Processed(Box::new(report)))
  }
}

#[cfg(test)]
mod tests {
  use std::io::Cursor;

  use image::ImageFormat;

  use super::*;
  use crate::model::RawDetection;

  fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let image = RgbImage::new(width, height);
    let mut buffer = Vec::new();
    image
      .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
      .unwrap();
    buffer
  }

  fn pipeline(dir: &std::path::Path) -> Pipeline<'static> {
    Pipeline::new(ResultPackager::new(dir, "/static/processed"))
  }

  #[test]
  fn end_to_end_single_detection() {
    let dir = tempfile::tempdir().unwrap();
    let inference = Inference {
      candidates: vec![
        RawDetection {
          class_id: 0,
          score: 0.9,
          bbox: [10.0, 10.0, 50.0, 50.0],
        },
        RawDetection {
          class_id: 2,
          score: 0.1,
          bbox: [5.0, 5.0, 20.0, 20.0],
        },
      ],
      inference_ms: Some(8.6),
    };

    let report = pipeline(dir.path())
      .process(&png_bytes(64, 64), &inference, 0.25, Uuid::new_v4())
      .unwrap();

    let Report::Processed(report) = report else {
      panic!("期望完整响应文档");
    };
    assert_eq!(report.detections.len(), 1);
    assert_eq!(report.detections[0].class, "OxygenTank");
    assert_eq!(report.detections[0].confidence, 0.9);
    assert_eq!(report.detections[0].bbox, [10, 10, 50, 50]);
    assert_eq!(report.detections[0].center, [30, 30]);
    assert_eq!(report.stats.total_detections, 1);
    assert_eq!(report.stats.class_counts["OxygenTank"], 1);
    assert_eq!(report.stats.average_confidence, 0.9);
    assert_eq!(report.stats.processing_time, 8.6);
  }

  #[test]
  fn zero_candidates_short_circuits_without_decoding() {
    let dir = tempfile::tempdir().unwrap();

    // 图像字节并非合法图像，但空候选路径不会解码它
    let report = pipeline(dir.path())
      .process(b"not an image", &Inference::default(), 0.25, Uuid::new_v4())
      .unwrap();

    let Report::NoCandidates(report) = report else {
      panic!("期望降级响应文档");
    };
    assert!(report.detections.is_empty());
    assert!(report.image_url.is_none());
    assert_eq!(report.stats.total_detections, 0);
  }

  #[test]
  fn undecodable_image_surfaces_decode_error() {
    let dir = tempfile::tempdir().unwrap();
    let inference = Inference {
      candidates: vec![RawDetection {
        class_id: 0,
        score: 0.9,
        bbox: [1.0, 1.0, 4.0, 4.0],
      }],
      inference_ms: None,
    };

    let result = pipeline(dir.path()).process(b"not an image", &inference, 0.25, Uuid::new_v4());
    assert!(matches!(result, Err(PipelineError::ImageDecodeError(_))));
  }

  #[test]
  fn all_candidates_below_threshold_is_success_not_error() {
    let dir = tempfile::tempdir().unwrap();
    let inference = Inference {
      candidates: vec![RawDetection {
        class_id: 1,
        score: 0.05,
        bbox: [2.0, 2.0, 10.0, 10.0],
      }],
      inference_ms: None,
    };

    let report = pipeline(dir.path())
      .process(&png_bytes(32, 32), &inference, 0.25, Uuid::new_v4())
      .unwrap();

    // 区别于空候选路径：仍产出带标注图像的完整文档，检测列表为空
    let Report::Processed(report) = report else {
      panic!("期望完整响应文档");
    };
    assert!(report.detections.is_empty());
    assert_eq!(report.stats.total_detections, 0);
    assert_eq!(report.stats.average_confidence, 0.0);
    assert!(report.image_base64.starts_with("data:image/png;base64,"));
  }

  #[test]
  fn report_serializes_to_expected_shape() {
    let dir = tempfile::tempdir().unwrap();
    let inference = Inference {
      candidates: vec![RawDetection {
        class_id: 0,
        score: 0.9,
        bbox: [10.0, 10.0, 50.0, 50.0],
      }],
      inference_ms: Some(5.0),
    };

    let report = pipeline(dir.path())
      .process(&png_bytes(64, 64), &inference, 0.25, Uuid::new_v4())
      .unwrap();

    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["success"], true);
    assert_eq!(value["detections"][0]["class"], "OxygenTank");
    assert_eq!(value["detections"][0]["bbox"][0], 10);
    assert_eq!(value["detections"][0]["center"][1], 30);
    assert_eq!(value["stats"]["total_detections"], 1);
    assert!(value["result_url"].as_str().unwrap().ends_with(".png"));
  }
}
