use assert_cmd::Command;

fn scraper() -> Command {
    Command::cargo_bin("price-scraper").expect("binary is built")
}

#[test]
fn test_invalid_keyword_exits_before_scraping() {
    let output = scraper()
        .args(["--keywords", "btc,e7h"])
        .env("RUST_LOG", "info")
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid keyword"), "stderr: {stderr}");
    assert!(!stderr.contains("Browser session started"), "stderr: {stderr}");
    assert!(output.stdout.is_empty());
}

#[test]
fn test_empty_entry_is_rejected() {
    scraper().args(["--keywords", "btc,,eth"]).assert().failure();
}

#[test]
fn test_help_lists_flags() {
    let output = scraper().arg("--help").output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for flag in ["--keywords", "--url", "--headed", "--row-timeout-secs", "--abort-on-malformed-row"] {
        assert!(stdout.contains(flag), "missing {flag} in help");
    }
}
