//! Tests for subscriber initialization

#[cfg(test)]
mod tests {
    use gendraw::io::logging::init;

    // Tests repeated initialization keeps the first subscriber without panicking
    // Verified by switching to the panicking initializer
    #[test]
    fn test_init_is_idempotent() {
        init(false);
        init(true);
        tracing::info!("logging initialized twice");
    }
}
