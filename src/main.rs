use anyhow::Result;
use clap::Parser;
use question_extractor::utils::logging;
use question_extractor::{App, Config};

/// 从考试 PDF 中提取题目
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// PDF 文件路径
    pdf: Option<String>,

    /// 输出 JSON 路径
    output: Option<String>,

    /// 图片保存目录
    #[arg(long)]
    image_dir: Option<String>,

    /// 显示详细日志
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// 命令行参数覆盖配置文件和环境变量
    fn apply(self, config: Config) -> Config {
        Config {
            pdf_path: self.pdf.unwrap_or(config.pdf_path),
            output_json: self.output.unwrap_or(config.output_json),
            image_dir: self.image_dir.unwrap_or(config.image_dir),
            verbose_logging: self.verbose || config.verbose_logging,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // 加载配置
    let config = cli.apply(Config::load()?);

    // 初始化日志
    logging::init(config.verbose_logging);

    // 初始化并运行应用
    if let Err(e) = App::initialize(config).and_then(|app| app.run()) {
        tracing::error!("❌ 程序执行失败: {:?}", e);
        return Err(e);
    }

    Ok(())
}
