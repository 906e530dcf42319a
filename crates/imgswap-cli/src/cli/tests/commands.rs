//! Command handlers against a temp media directory (no network needed).

use crate::cli::commands::{run_known, run_resolve};
use imgswap_core::classify::Category;
use imgswap_core::config::ImgswapConfig;
use imgswap_core::media::{Ledger, LEDGER_FILE};

fn offline_config() -> ImgswapConfig {
    ImgswapConfig {
        fetch_delay_ms: 0,
        ..ImgswapConfig::default()
    }
}

#[test]
fn resolve_records_invalid_urls_and_persists() {
    let tmp = tempfile::tempdir().unwrap();
    let media = tmp.path().join("imgswap_media");
    let urls = vec![
        "not a url".to_string(),
        "ftp://example.com/a.png".to_string(),
        "not a url".to_string(),
    ];

    let counters = run_resolve(&offline_config(), &media, Category::Img, &urls).unwrap();
    assert_eq!(counters.failed, 2);
    assert_eq!(counters.cached, 1);
    assert_eq!(counters.fetched, 0);

    let ledger = Ledger::load(&media.join(LEDGER_FILE)).unwrap();
    assert_eq!(ledger.len(), 2);
    assert_eq!(ledger.failures(), 2);
}

#[test]
fn resolve_fails_when_media_path_is_a_file() {
    let tmp = tempfile::tempdir().unwrap();
    let media = tmp.path().join("media");
    std::fs::write(&media, b"x").unwrap();
    let urls = vec!["http://example.com/a.png".to_string()];
    assert!(run_resolve(&offline_config(), &media, Category::Img, &urls).is_err());
}

#[test]
fn known_lists_existing_and_missing_ledgers() {
    let tmp = tempfile::tempdir().unwrap();
    run_known(tmp.path()).unwrap();

    std::fs::write(
        tmp.path().join(LEDGER_FILE),
        r#"{"http://a/x.png": "abc.png", "http://a/y.png": null}"#,
    )
    .unwrap();
    run_known(tmp.path()).unwrap();
}

#[test]
fn known_reports_corrupt_ledger() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(tmp.path().join(LEDGER_FILE), b"[").unwrap();
    assert!(run_known(tmp.path()).is_err());
}
