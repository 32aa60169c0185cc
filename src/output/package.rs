// 该文件是 Tiangong （天宫慧眼） 项目的一部分。
// src/output/package.rs - 结果打包
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

use std::io::Cursor;
use std::path::PathBuf;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use chrono::Local;
use image::{ImageFormat, RgbImage};
use serde::Serialize;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::filter::AcceptedDetection;
use crate::stats::Stats;

#[derive(Error, Debug)]
pub enum PackageError {
  #[error("图像编码错误: {0}")]
  EncodeError(image::ImageError),
  #[error("保存结果图像错误: {0}")]
  SaveError(image::ImageError),
  #[error("I/O 错误: {0}")]
  IoError(#[from] std::io::Error),
}

/// 完整的检测响应文档
#[derive(Debug, Serialize)]
pub struct DetectionReport {
  pub success: bool,
  pub detections: Vec<AcceptedDetection>,
  pub image_base64: String,
  pub result_url: String,
  pub stats: Stats,
  pub timestamp: String,
}

/// 检测器未给出任何候选框时的降级响应文档
#[derive(Debug, Serialize)]
pub struct EmptyReport {
  pub message: String,
  pub detections: Vec<AcceptedDetection>,
  pub image_url: Option<String>,
  pub stats: Stats,
}

impl EmptyReport {
  pub fn new() -> Self {
    Self {
      message: "No objects detected".to_string(),
      detections: Vec::new(),
      image_url: None,
      stats: Stats::default(),
    }
  }
}

impl Default for EmptyReport {
  fn default() -> Self {
    Self::new()
  }
}

/// 交付给客户端的最终文档
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Report {
  NoCandidates(EmptyReport),
  Processed(Box<DetectionReport>),
}

/// 结果打包器：负责标注图像的传输编码与落盘
pub struct ResultPackager {
  processed_dir: PathBuf,
  url_prefix: String,
}

impl ResultPackager {
  pub fn new(processed_dir: impl Into<PathBuf>, url_prefix: impl Into<String>) -> Self {
    Self {
      processed_dir: processed_dir.into(),
      url_prefix: url_prefix.into(),
    }
  }

  /// 组装最终响应：内嵌 data URI 编码 + 按请求 id 落盘的结果文件。
  /// 请求 id 由调用方生成，保证并发请求不会写入同一路径。
  pub fn package(
    &self,
    annotated: &RgbImage,
    detections: Vec<AcceptedDetection>,
    stats: Stats,
    request_id: Uuid,
  ) -> Result<DetectionReport, PackageError> {
    let image_base64 = encode_data_uri(annotated)?;

    let filename = format!("result_{}.png", request_id);
    std::fs::create_dir_all(&self.processed_dir)?;
    let path = self.processed_dir.join(&filename);
    annotated.save(&path).map_err(PackageError::SaveError)?;
    info!("结果图像已保存: {}", path.display());

    Ok(DetectionReport {
      success: true,
      detections,
      image_base64,
      result_url: format!("{}/{}", self.url_prefix, filename),
      stats,
      timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
    })
  }
}

/// 将标注图像编码为自描述的 data URI（PNG 无损编码）
fn encode_data_uri(image: &RgbImage) -> Result<String, PackageError> {
  let mut buffer = Vec::new();
  image
    .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
    .map_err(PackageError::EncodeError)?;

  Ok(format!("data:image/png;base64,{}", STANDARD.encode(&buffer)))
}
