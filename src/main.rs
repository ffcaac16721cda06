use clap::Parser;
use compta_extract::utils::{logger, validation::Validate};
use compta_extract::{convert_with, CliConfig};

fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting compta-extract CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 合併並驗證配置
    let settings = match config.resolve().and_then(|settings| {
        settings.validate()?;
        Ok(settings)
    }) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    match convert_with(settings) {
        Ok(report) => {
            println!(
                "✅ Data from {} was extracted successfully into {} ({} comptes, {} tiers, {} ecritures).",
                report.input_path.display(),
                report.output_path.display(),
                report.comptes,
                report.tiers,
                report.ecritures
            );
        }
        Err(e) => {
            // 記錄詳細錯誤信息
            tracing::error!("❌ Conversion failed: {} (Category: {:?})", e, e.category());
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            // 輸出用戶友好的錯誤信息
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    }
}
