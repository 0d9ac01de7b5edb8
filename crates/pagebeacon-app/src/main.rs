//! # pagebeacon
//!
//! 녹화된 페이지 세션을 실제 메트릭 클라이언트로 재생하는 CLI.

use anyhow::{Context, Result};
use clap::Parser;
use pagebeacon_app::config_loader::{resolve_config, ConfigOverrides, ConfigSource};
use pagebeacon_app::lifecycle::LifecycleManager;
use pagebeacon_app::replay::{parse_script, ScriptReplayer};
use pagebeacon_network::http_client::HttpMetricTransport;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// PageBeacon 세션 재생기
///
/// 페이지 세션 스크립트(JSON lines)를 읽어 수집 엔드포인트로 메트릭을 보낸다.
#[derive(Parser, Debug)]
#[command(name = "pagebeacon")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// 보고 대상 URL (설정 파일 값보다 우선)
    #[arg(long, short = 'u')]
    report_url: Option<String>,

    /// 활동 보고 주기 (초, 최소 20)
    #[arg(long, short = 'i')]
    interval: Option<u64>,

    /// 설정 파일 경로 (기본: 플랫폼별 설정 디렉토리)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// 설정 파일을 읽지 않고 내장 기본값 사용
    #[arg(long, conflicts_with = "config")]
    no_config_file: bool,

    /// 세션 스크립트 경로 (기본: 표준 입력)
    #[arg(long, short = 's')]
    script: Option<PathBuf>,

    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, short = 'l', default_value = "info")]
    log_level: String,

    /// 종료 전 진행 중 전송을 기다리는 시간 (밀리초)
    #[arg(long, default_value = "2000")]
    linger_ms: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_filter = format!(
        "pagebeacon={},pagebeacon_app={},pagebeacon_core={},pagebeacon_monitor={},pagebeacon_network={}",
        args.log_level, args.log_level, args.log_level, args.log_level, args.log_level
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_filter)),
        )
        .init();

    let overrides = ConfigOverrides {
        report_url: args.report_url.clone(),
        interval_secs: args.interval,
    };
    let source = match (&args.config, args.no_config_file) {
        (Some(path), _) => ConfigSource::File(path.clone()),
        (None, true) => ConfigSource::Defaults,
        (None, false) => ConfigSource::Platform,
    };
    let config = resolve_config(&source, &overrides).context("설정 로드 실패")?;

    let script = match &args.script {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("스크립트 열기 실패: {}", path.display()))?;
            parse_script(BufReader::new(file))?
        }
        None => parse_script(io::stdin().lock())?,
    };
    info!(
        "세션 스크립트: {} ({}단계)",
        script.page.url,
        script.steps.len()
    );

    let transport = HttpMetricTransport::new(config.request_timeout())
        .context("HTTP 클라이언트 생성 실패")?
        .with_page_url(&script.page.url);
    let replayer = ScriptReplayer::new(&config, &script.page, Arc::new(transport));

    let lifecycle = LifecycleManager::new();
    tokio::select! {
        summary = replayer.run(&script.steps) => {
            if summary.skipped > 0 {
                warn!("존재하지 않는 노드를 가리킨 단계 {}건", summary.skipped);
            }
        }
        _ = lifecycle.wait_for_signal() => {
            info!("재생 중단");
        }
    }

    // 페이지 언로드
    let client = replayer.client();
    client.shutdown();
    if !client.flush(Duration::from_millis(args.linger_ms)).await {
        warn!("대기 시간 내에 끝나지 않은 전송이 있음");
    }

    info!("종료");
    Ok(())
}
