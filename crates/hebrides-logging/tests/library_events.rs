// Errors built by the library reach the hook through the log bridge
use std::sync::{Arc, Mutex};

use hebrides::Real;
use hebrides_logging::{init_logging, set_log_hook, LogFormat, LogRecord, LoggingOptions};

#[test]
fn domain_errors_are_logged_at_debug() {
    std::env::remove_var("RUST_LOG");
    std::env::remove_var("HEBRIDES_LOG");
    let captured: Arc<Mutex<Vec<LogRecord>>> = Arc::new(Mutex::new(Vec::new()));
    let c = captured.clone();
    set_log_hook(move |rec: &LogRecord| c.lock().unwrap().push(rec.clone()));
    let _guard = init_logging(LoggingOptions {
        level: Some("debug".to_string()),
        format: LogFormat::Off,
    });

    assert!(Real::new(-1.0).sqrt().is_err());
    log::info!(target: "hebrides::test", "plain log record");

    let items = captured.lock().unwrap();
    let domain = items
        .iter()
        .find(|r| r.message.contains("sqrt"))
        .expect("domain error logged");
    assert_eq!(domain.level, "DEBUG");
    assert_eq!(domain.target, "hebrides::domain");
    assert!(items.iter().any(|r| r.target == "hebrides::test"));
    assert!(items.iter().all(|r| !r.ts.is_empty()));
}
