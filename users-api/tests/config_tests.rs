use std::env;

use users_api::config::Config;

// Kept to a single test: the process environment is shared by every test in this binary
#[test]
fn test_load_reads_environment_overrides() {
    env::set_var("RUN_MODE", "test");
    env::set_var("SERVER__HTTP_PORT", "4100");
    env::set_var("JWT__SECRET", "a_secret_that_is_long_enough_to_sign_with");
    env::set_var("HASHING__TIME_COST", "2");

    let config = Config::load().expect("Environment should complete the configuration");

    assert_eq!(config.server.http_port, 4100);
    assert_eq!(config.jwt.secret, "a_secret_that_is_long_enough_to_sign_with");
    // config/test.toml still applies beneath the environment
    assert_eq!(config.hashing.memory_cost, 1024);
    assert_eq!(config.hashing.time_cost, 2);

    env::remove_var("JWT__SECRET");
    assert!(Config::load().is_err());
}
