// 로깅 초기화
// Structured logging via tracing, filtered by RUST_LOG
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the global tracing subscriber.
/// 전역 tracing 구독자 초기화. main()에서 한 번만 호출
///
/// RUST_LOG가 설정되어 있으면 그 값을, 없으면 default_level을 사용
/// The RUST_LOG environment variable overrides `default_level` when set.
pub fn init_logging(default_level: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true))
        .init();
}
