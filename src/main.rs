use clap::Parser;
use talk_probe::config::load_env_file;
use talk_probe::core::ProbeSettings;
use talk_probe::utils::error::{ErrorSeverity, ProbeError};
use talk_probe::utils::{logger, validation::Validate};
use talk_probe::{CliConfig, ProbeRequest, ProbeRunner, RoomProbe};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env 必須在 clap 讀取環境變數之前載入
    let env_file = load_env_file();
    let config = CliConfig::parse();

    // 初始化日誌
    if config.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    if let Some(path) = &env_file {
        tracing::debug!("Loaded environment from {}", path.display());
    }

    let config = match config.resolve() {
        Ok(config) => config,
        Err(e) => exit_with_config_error(e),
    };
    tracing::debug!("CLI config: {:?}", config);

    // 驗證配置
    if let Err(e) = config.validate() {
        exit_with_config_error(e);
    }

    let request = ProbeRequest::new(config.endpoint()?, config.credentials()?)
        .with_timeout(config.timeout());
    let runner = ProbeRunner::new(RoomProbe::new(request)).with_summary(config.summary);

    let mut stdout = std::io::stdout().lock();
    let outcome = runner.run(&mut stdout).await?;

    if config.fail_on_error && !outcome.is_success() {
        std::process::exit(outcome.exit_code());
    }

    Ok(())
}

fn exit_with_config_error(e: ProbeError) -> ! {
    tracing::error!(
        "❌ Configuration failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Critical => 3,
        _ => 1,
    };
    std::process::exit(exit_code);
}
