use clap::Parser;
use well_inflow_toolbox::{app, config};

/// 유정 유입 성능(IPR) 계산 도구.
#[derive(Debug, Parser)]
#[command(name = "well_inflow_toolbox", version, about)]
struct Cli {
    /// 설정 파일 경로
    #[arg(long, default_value = config::DEFAULT_CONFIG_PATH)]
    config: String,
    /// 언어 (auto/en/es)
    #[arg(long, short = 'L', default_value = "auto")]
    lang: String,
    /// IPR 곡선 재표본 점 수 (설정값을 덮어씀)
    #[arg(long)]
    resolution: Option<usize>,
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 CLI 애플리케이션을 실행한다.
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    if let Err(err) = try_run(Cli::parse()) {
        tracing::error!("{err}");
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn try_run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut cfg = config::load_or_default(&cli.config)?;
    let session = app::SessionOverrides::new(&cli.lang, cli.resolution)?;
    let mut tr = session.translator(&cfg);
    tracing::debug!(
        lang = ?tr.language(),
        overrides = tr.has_overrides(),
        "language resolved"
    );
    app::run(&mut cfg, &session, &mut tr)?;
    Ok(())
}
