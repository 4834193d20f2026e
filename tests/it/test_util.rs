/// Installs a logger printing to the test output; repeated calls are no-ops.
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Decodes a hex fixture, ignoring whitespace.
pub fn bytes(hex: &str) -> Vec<u8> {
    let hex = hex.split_whitespace().collect::<String>();
    hex::decode(hex).unwrap()
}
