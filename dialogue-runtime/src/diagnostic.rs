//! # 诊断模块
//!
//! 提供剧本集的静态检查 API，不依赖 IO 或引擎。
//!
//! ## 设计原则
//!
//! - 纯函数 API，可在无 IO 环境下运行
//! - 诊断分级：Error（必须修复）、Warn（建议修复）、Info（信息提示）
//! - **纯咨询性**：引擎保持选择时惰性解析，诊断结果不参与注册，
//!   也不改变任何运行时行为

use std::collections::{HashMap, HashSet};

use crate::scene::Scene;

/// 诊断级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticLevel {
    /// 信息提示
    Info,
    /// 警告（建议修复）
    Warn,
    /// 错误（必须修复）
    Error,
}

impl std::fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Warn => write!(f, "WARN"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

/// 诊断条目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// 诊断级别
    pub level: DiagnosticLevel,
    /// 场景 ID
    pub scene_id: String,
    /// 诊断消息
    pub message: String,
    /// 诊断详情（可选，如涉及的选项标签）
    pub detail: Option<String>,
}

impl Diagnostic {
    /// 创建错误诊断
    pub fn error(scene_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: DiagnosticLevel::Error,
            scene_id: scene_id.into(),
            message: message.into(),
            detail: None,
        }
    }

    /// 创建警告诊断
    pub fn warn(scene_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: DiagnosticLevel::Warn,
            scene_id: scene_id.into(),
            message: message.into(),
            detail: None,
        }
    }

    /// 创建信息诊断
    pub fn info(scene_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: DiagnosticLevel::Info,
            scene_id: scene_id.into(),
            message: message.into(),
            detail: None,
        }
    }

    /// 设置详情
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.level, self.scene_id, self.message)?;
        if let Some(detail) = &self.detail {
            write!(f, "\n  | {}", detail)?;
        }
        Ok(())
    }
}

/// 诊断结果
#[derive(Debug, Clone, Default)]
pub struct DiagnosticResult {
    /// 诊断条目列表
    pub diagnostics: Vec<Diagnostic>,
}

impl DiagnosticResult {
    /// 创建空结果
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加诊断
    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// 合并另一个结果
    pub fn merge(&mut self, other: DiagnosticResult) {
        self.diagnostics.extend(other.diagnostics);
    }

    /// 获取错误数量
    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.level == DiagnosticLevel::Error)
            .count()
    }

    /// 获取警告数量
    pub fn warn_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.level == DiagnosticLevel::Warn)
            .count()
    }

    /// 是否有错误
    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// 按级别过滤
    pub fn filter_by_level(&self, min_level: DiagnosticLevel) -> Vec<&Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.level >= min_level)
            .collect()
    }
}

/// 分析剧本集，返回诊断结果
///
/// 执行以下检查：
/// - Error：分支目标不在剧本集中（选择时必然软失败）
/// - Warn：分支目标是空场景（选择时同样软失败）、
///   场景内重复的台词编号、剧本集中重复的场景 ID
/// - Info：没有台词的场景、从任何分支都到达不了的场景
///   （列表首个场景视为入口，不算不可达）
///
/// 诊断不改变引擎行为：无效目标依然推迟到选择时才暴露。
pub fn analyze_scenes(scenes: &[Scene]) -> DiagnosticResult {
    let mut result = DiagnosticResult::new();

    // 场景 ID -> 是否为空场景（后写覆盖，与注册表语义一致）
    let mut known: HashMap<&str, bool> = HashMap::new();
    let mut seen_ids: HashSet<&str> = HashSet::new();
    for scene in scenes {
        if !seen_ids.insert(scene.scene_id.as_str()) {
            result.push(Diagnostic::warn(
                &scene.scene_id,
                "剧本集中存在重复的场景 ID，后者将覆盖前者",
            ));
        }
        known.insert(scene.scene_id.as_str(), scene.is_empty());
    }

    // 被任何分支引用过的场景
    let mut referenced: HashSet<&str> = HashSet::new();

    for scene in scenes {
        if scene.is_empty() {
            result.push(Diagnostic::info(
                &scene.scene_id,
                "场景没有台词，无法被启动",
            ));
        }

        // 场景内重复的台词编号
        let mut line_ids: HashSet<u32> = HashSet::new();
        for line in &scene.lines {
            if !line_ids.insert(line.line_id) {
                result.push(
                    Diagnostic::warn(&scene.scene_id, "场景内存在重复的台词编号")
                        .with_detail(format!("line_id = {}", line.line_id)),
                );
            }
        }

        for (choice, target) in &scene.branches {
            match known.get(target.as_str()) {
                None => {
                    result.push(
                        Diagnostic::error(&scene.scene_id, "分支目标场景不存在")
                            .with_detail(format!("{choice} -> {target}")),
                    );
                }
                Some(true) => {
                    result.push(
                        Diagnostic::warn(&scene.scene_id, "分支目标是空场景，选择时将失败")
                            .with_detail(format!("{choice} -> {target}")),
                    );
                }
                Some(false) => {}
            }
            referenced.insert(target.as_str());
        }
    }

    // 不可达场景（首个场景视为入口）
    for scene in scenes.iter().skip(1) {
        if !referenced.contains(scene.scene_id.as_str()) {
            result.push(Diagnostic::info(
                &scene.scene_id,
                "没有任何分支指向该场景",
            ));
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Line;

    fn scene(id: &str, lines: usize) -> Scene {
        let mut s = Scene::new(id, id);
        for i in 0..lines {
            s = s.with_line(Line::new(i as u32, "A", "……", "calm"));
        }
        s
    }

    #[test]
    fn test_clean_set_has_no_findings() {
        let scenes = vec![
            scene("s1", 2).with_branch("go", "s2"),
            scene("s2", 1),
        ];
        let result = analyze_scenes(&scenes);
        assert!(result.is_empty());
        assert!(!result.has_errors());
    }

    #[test]
    fn test_dangling_branch_target() {
        let scenes = vec![scene("s1", 1).with_branch("go", "nowhere")];
        let result = analyze_scenes(&scenes);

        assert_eq!(result.error_count(), 1);
        assert!(result.has_errors());
        let diag = &result.diagnostics[0];
        assert_eq!(diag.level, DiagnosticLevel::Error);
        assert_eq!(diag.detail.as_deref(), Some("go -> nowhere"));
    }

    #[test]
    fn test_empty_branch_target() {
        let scenes = vec![scene("s1", 1).with_branch("go", "s2"), scene("s2", 0)];
        let result = analyze_scenes(&scenes);

        assert!(!result.has_errors());
        // 空场景本身是 Info，指向它的分支是 Warn
        assert_eq!(result.warn_count(), 1);
        assert_eq!(result.filter_by_level(DiagnosticLevel::Warn).len(), 1);
        assert_eq!(result.diagnostics.len(), 2);
    }

    #[test]
    fn test_duplicate_line_ids() {
        let dup = Scene::new("s1", "s1")
            .with_line(Line::new(7, "A", "一", "calm"))
            .with_line(Line::new(7, "B", "二", "calm"));
        let result = analyze_scenes(&[dup]);

        assert_eq!(result.warn_count(), 1);
        assert_eq!(result.diagnostics[0].detail.as_deref(), Some("line_id = 7"));
    }

    #[test]
    fn test_duplicate_scene_ids() {
        let scenes = vec![scene("s1", 1), scene("s1", 2)];
        let result = analyze_scenes(&scenes);
        assert_eq!(result.warn_count(), 1);
    }

    #[test]
    fn test_unreachable_scene() {
        let scenes = vec![
            scene("entry", 1).with_branch("go", "next"),
            scene("next", 1),
            scene("orphan", 1),
        ];
        let result = analyze_scenes(&scenes);

        assert!(!result.has_errors());
        let infos = result
            .diagnostics
            .iter()
            .filter(|d| d.level == DiagnosticLevel::Info)
            .collect::<Vec<_>>();
        assert_eq!(infos.len(), 1);
        assert_eq!(infos[0].scene_id, "orphan");
    }

    #[test]
    fn test_diagnostic_display() {
        let diag = Diagnostic::error("s1", "分支目标场景不存在").with_detail("go -> nowhere");
        let text = format!("{diag}");
        assert!(text.starts_with("[ERROR] s1:"));
        assert!(text.contains("go -> nowhere"));
    }

    #[test]
    fn test_result_merge() {
        let mut a = DiagnosticResult::new();
        a.push(Diagnostic::info("s1", "信息"));
        let mut b = DiagnosticResult::new();
        b.push(Diagnostic::error("s2", "错误"));

        a.merge(b);
        assert_eq!(a.diagnostics.len(), 2);
        assert!(a.has_errors());
    }
}
