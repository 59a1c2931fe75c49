use clap::Parser;
use student_registry::core::ConfigProvider;
use student_registry::utils::{logger, validation::Validate};
use student_registry::{CliConfig, Console, RollCounter, Session, Settings, TomlConfig};

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if let Err(e) = cli.validate() {
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let file = match &cli.config {
        Some(path) => match TomlConfig::from_file(path).and_then(|c| c.validate().map(|_| c)) {
            Ok(config) => Some(config),
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path, e);
                std::process::exit(1);
            }
        },
        None => None,
    };

    let settings = Settings::merge(file.as_ref(), &cli);

    // 初始化日誌
    logger::init_cli_logger(
        settings.verbose,
        settings.log_level.as_deref(),
        settings.log_json,
    );

    tracing::info!("Starting student-registry");
    tracing::debug!("Effective settings: {:?}", settings);

    let stdin = std::io::stdin();
    let console = Console::new(stdin.lock(), std::io::stdout());
    let mut session = Session::new(console, RollCounter::new(settings.roll_seed()));

    session.run()?;

    tracing::info!(
        students = session.repository().len(),
        "Session finished"
    );
    Ok(())
}
