use clap::Parser;
use zettel_indexer::cli::{self, Cli};

fn main() -> anyhow::Result<()> {
    // 解析命令行参数
    let cli = Cli::parse();

    // 初始化日志
    zettel_indexer::init(cli.verbose)?;

    // 单个文件的错误只体现在汇总中，不影响退出码
    cli::commands::run(&cli)?;
    Ok(())
}
