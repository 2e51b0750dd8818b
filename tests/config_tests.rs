//! Config Tests

use std::path::PathBuf;
use std::time::Duration;

use btpd_client::config::{default_base_dir, expand_base_dir};
use btpd_client::Config;

#[test]
fn test_socket_path_is_inside_base_dir() {
    let config = Config::builder().base_dir("/tmp/btpd-test").build();
    assert_eq!(config.socket_path(), PathBuf::from("/tmp/btpd-test/sock"));
}

#[test]
fn test_default_is_blocking_in_home_btpd() {
    let config = Config::default();
    assert_eq!(config.base_dir, default_base_dir());
    assert!(config.base_dir.ends_with(".btpd"));
    assert_eq!(config.read_timeout(), None);
    assert_eq!(config.write_timeout(), None);
}

#[test]
fn test_timeouts() {
    let config = Config::builder().read_timeout_ms(250).build();
    assert_eq!(config.read_timeout(), Some(Duration::from_millis(250)));
    assert_eq!(config.write_timeout(), None);
}

#[test]
fn test_expand_plain_path_is_verbatim() {
    assert_eq!(
        expand_base_dir("/var/lib/btpd").unwrap(),
        PathBuf::from("/var/lib/btpd")
    );
    assert_eq!(expand_base_dir("rel/~/x").unwrap(), PathBuf::from("rel/~/x"));
}

#[test]
fn test_expand_home_prefixes() {
    if let Some(home) = dirs::home_dir() {
        assert_eq!(expand_base_dir("~/.btpd").unwrap(), home.join(".btpd"));
        assert_eq!(expand_base_dir("$HOME/dl").unwrap(), home.join("dl"));

        let config = Config::builder().base_dir_str("~/.btpd").unwrap().build();
        assert_eq!(config.socket_path(), home.join(".btpd").join("sock"));
    }
}
