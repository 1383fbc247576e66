use std::net::TcpListener;
use std::process::Command;

#[test]
fn bind_failure_prints_error_and_exits_1() {
    let taken = TcpListener::bind("0.0.0.0:0").unwrap();
    let port = taken.local_addr().unwrap().port();

    let output = Command::new(env!("CARGO_BIN_EXE_producer"))
        .env("PORT", port.to_string())
        .env("PRODUCER_CONFIG", "/nonexistent/producer.toml")
        .env("RUST_LOG", "off")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.starts_with(&format!("Error: bind 0.0.0.0:{port}:")), "{stderr}");
}

#[test]
fn invalid_config_file_prints_error_and_exits_1() {
    let path = std::env::temp_dir().join(format!("producer-bad-{}.toml", std::process::id()));
    std::fs::write(&path, "port = \"not a number\"").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_producer"))
        .env_remove("PORT")
        .env("PRODUCER_CONFIG", &path)
        .env("RUST_LOG", "off")
        .output()
        .unwrap();
    let _ = std::fs::remove_file(&path);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.starts_with("Error: config (parse):"), "{stderr}");
}
