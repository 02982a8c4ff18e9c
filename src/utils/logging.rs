/// 日志工具模块
///
/// 提供日志初始化、格式化和输出的辅助函数
use crate::config::Config;
use crate::models::{ExtractionReport, QuestionCollection};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// 初始化日志
///
/// 优先使用 `RUST_LOG`，否则按 `verbose` 选择 debug / info
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    // 重复初始化（例如测试中）时忽略
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
///
/// # 参数
/// - `config`: 本次运行的配置
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - PDF 题目提取");
    info!("📄 PDF 文件: {}", config.pdf_path);
    info!("🖼️ 图片目录: {}", config.image_dir);
    info!("💾 输出文件: {}", config.output_json);
    info!("{}", "=".repeat(60));
}

/// 打印最终统计信息
///
/// # 参数
/// - `collection`: 排好序的题目集合
/// - `report`: 逐页、逐图的失败汇总
/// - `config`: 本次运行的配置
pub fn print_final_stats(collection: &QuestionCollection, report: &ExtractionReport, config: &Config) {
    info!("\n{}", "=".repeat(60));
    info!("📊 提取完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 题目总数: {}", collection.len());

    info!("📚 各科目题目数:");
    for (subject, count) in collection.subject_counts() {
        let label = subject.map(|s| s.label()).unwrap_or("(无科目)");
        info!("   {}: {}", label, count);
    }

    info!("🖼️ 带图片的题目: {}", collection.with_images_count());
    info!("🖼️ 已保存图片: {}", report.images_saved);
    if let Some((min, max)) = collection.number_range() {
        info!("🔢 题号范围: {} - {}", min, max);
    }
    info!("🔢 不重复题号: {}", collection.unique_numbers());

    if report.failure_count() > 0 {
        warn!("❌ 失败单元: {}", report.failure_count());
        for failure in report
            .text_page_failures
            .iter()
            .chain(&report.image_page_failures)
            .chain(&report.image_failures)
        {
            warn!("   {}", failure);
        }
    }
    info!("{}", "=".repeat(60));

    if let Some(first) = collection.first() {
        match serde_json::to_string_pretty(first) {
            Ok(json) => info!("\n第一道题示例:\n{}", json),
            Err(e) => warn!("无法序列化示例题目: {}", e),
        }
    }

    info!("\n结果已保存至: {}", config.output_json);
    info!("图片已保存至: {}", config.image_dir);
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text_counts_chars() {
        assert_eq!(truncate_text("ação", 10), "ação");
        assert_eq!(truncate_text("ilustração", 5), "ilust...");
    }
}
