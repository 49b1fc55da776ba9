use tracing_subscriber::EnvFilter;

/// Установить глобальный subscriber для `tracing`.
///
/// `RUST_LOG` (если задан) перекрывает `level`. Повторный вызов
/// ничего не ломает – второй subscriber просто не ставится.
pub fn init(level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    let _ = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}
