// 该文件是 Tiangong （天宫慧眼） 项目的一部分。
// src/output/draw.rs - 检测结果标注绘制
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

use ab_glyph::{FontRef, PxScale};
use image::{Rgb, RgbImage};
use imageproc::drawing::{
  draw_filled_rect_mut, draw_hollow_rect_mut, draw_text_mut, text_size,
};
use imageproc::rect::Rect;

use crate::filter::AcceptedDetection;
use crate::registry;

// 标签渲染常量
const LABEL_FONT_SIZE: f32 = 20.0;
const LABEL_BACKGROUND_PADDING: i32 = 10; // 文本高度之上的背景留白
const LABEL_TEXT_RAISE: i32 = 5; // 文本底边相对边框上沿的抬升
const LABEL_TEXT_COLOR: [u8; 3] = [255, 255, 255]; // 白色文本

pub struct Draw<'a> {
  font: FontRef<'a>,
  font_scale: PxScale,
}

impl Default for Draw<'_> {
  fn default() -> Self {
    let font_data = include_bytes!("../../assets/DejaVuSans.ttf"); // default font
    let font = FontRef::try_from_slice(font_data).expect("无法加载嵌入的字体文件");

    Self {
      font,
      font_scale: PxScale::from(LABEL_FONT_SIZE),
    }
  }
}

impl Draw<'_> {
  /// 在图像副本上绘制全部检测框与标签，原图保持不变。
  /// 输出尺寸与原图一致；绘制过程无内部状态，重复调用结果逐像素一致。
  pub fn annotate(&self, source: &RgbImage, detections: &[AcceptedDetection]) -> RgbImage {
    let mut image = source.clone();
    for detection in detections {
      self.draw_bbox_with_label(&mut image, detection);
    }
    image
  }

  fn draw_bbox_with_label(&self, image: &mut RgbImage, detection: &AcceptedDetection) {
    let color = registry::class_color(&detection.class);
    let [x1, y1, x2, y2] = detection.bbox;

    // 零面积与反转框按单点处理，不做修复
    let width = (x2 - x1).max(0) as u32 + 1;
    let height = (y2 - y1).max(0) as u32 + 1;

    // 绘制边框（加粗为 2 像素）
    let rect = Rect::at(x1, y1).of_size(width, height);
    draw_hollow_rect_mut(image, rect, color);
    let inner = Rect::at(x1 + 1, y1 + 1).of_size(
      width.saturating_sub(2).max(1),
      height.saturating_sub(2).max(1),
    );
    draw_hollow_rect_mut(image, inner, color);

    // 标签文本：类别名 + 两位小数的置信度
    let label = format!("{}: {:.2}", detection.class, detection.confidence);
    let (text_width, text_height) = text_size(self.font_scale, &self.font, &label);

    // 标签背景位于边框上方；贴近画布上沿时坐标可为负，由绘制例程裁剪
    let label_y = y1 - text_height as i32 - LABEL_BACKGROUND_PADDING;
    let background = Rect::at(x1, label_y).of_size(
      text_width.max(1),
      text_height + LABEL_BACKGROUND_PADDING as u32,
    );
    draw_filled_rect_mut(image, background, color);

    draw_text_mut(
      image,
      Rgb(LABEL_TEXT_COLOR),
      x1,
      y1 - text_height as i32 - LABEL_TEXT_RAISE,
      self.font_scale,
      &self.font,
      &label,
    );
  }
}
