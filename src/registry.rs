// 该文件是 Tiangong （天宫慧眼） 项目的一部分。
// src/registry.rs - 安全设备类别注册表
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

use image::Rgb;
use tracing::warn;

/// 安全设备类别名称（顺序与模型输出的类别 id 一致）
pub const CLASSES: [&str; 7] = [
  "OxygenTank",
  "NitrogenTank",
  "FirstAidBox",
  "FireAlarm",
  "SafetySwitchPanel",
  "EmergencyPhone",
  "FireExtinguisher",
];

/// 类别显示颜色（RGB）
pub const CLASS_COLORS: [(&str, [u8; 3]); 7] = [
  ("OxygenTank", [0, 255, 0]),          // 绿色
  ("NitrogenTank", [0, 0, 255]),        // 蓝色
  ("FirstAidBox", [255, 0, 0]),         // 红色
  ("FireAlarm", [255, 255, 0]),         // 黄色
  ("SafetySwitchPanel", [255, 0, 255]), // 品红
  ("EmergencyPhone", [0, 255, 255]),    // 青色
  ("FireExtinguisher", [128, 0, 128]),  // 紫色
];

/// 未知类别名称的回退颜色
const FALLBACK_COLOR: [u8; 3] = [255, 255, 255]; // 白色

/// 将类别 id 解析为类别名称。
/// id 超出注册表范围时合成 `Class_<id>`，不视为错误。
pub fn class_name(class_id: u32) -> String {
  match CLASSES.get(class_id as usize) {
    Some(name) => (*name).to_string(),
    None => {
      warn!("未知类别 id: {}, 使用合成名称", class_id);
      format!("Class_{}", class_id)
    }
  }
}

/// 按类别名称查询显示颜色，未知名称回退为白色
pub fn class_color(name: &str) -> Rgb<u8> {
  let color = CLASS_COLORS
    .iter()
    .find(|(n, _)| *n == name)
    .map(|(_, c)| *c)
    .unwrap_or(FALLBACK_COLOR);
  Rgb(color)
}
