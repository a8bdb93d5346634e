use super::*;
use std::path::Path;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(args).unwrap()
}

#[test]
fn cli_parse_check() {
    match parse(&["localcopy", "check", "https://example.com/list.txt", "cache/list.txt"]).command {
        CliCommand::Check { url, path } => {
            assert_eq!(url, "https://example.com/list.txt");
            assert_eq!(path, Path::new("cache/list.txt"));
        }
        _ => panic!("expected Check"),
    }
}

#[test]
fn cli_parse_download() {
    match parse(&["localcopy", "download", "http://h/f", "/tmp/f"]).command {
        CliCommand::Download { url, path } => {
            assert_eq!(url, "http://h/f");
            assert_eq!(path, Path::new("/tmp/f"));
        }
        _ => panic!("expected Download"),
    }
}

#[test]
fn cli_parse_sync() {
    match parse(&["localcopy", "sync", "http://h/f", "f"]).command {
        CliCommand::Sync { url, path } => {
            assert_eq!(url, "http://h/f");
            assert_eq!(path, Path::new("f"));
        }
        _ => panic!("expected Sync"),
    }
}

#[test]
fn cli_parse_cat_and_fetch() {
    match parse(&["localcopy", "cat", "f.txt"]).command {
        CliCommand::Cat { path } => assert_eq!(path, Path::new("f.txt")),
        _ => panic!("expected Cat"),
    }
    match parse(&["localcopy", "fetch", "http://h/f"]).command {
        CliCommand::Fetch { url } => assert_eq!(url, "http://h/f"),
        _ => panic!("expected Fetch"),
    }
}

#[test]
fn cli_parse_global_config() {
    let cli = parse(&["localcopy", "sync", "http://h/f", "f", "--config", "/etc/localcopy.toml"]);
    assert_eq!(cli.config.as_deref(), Some(Path::new("/etc/localcopy.toml")));
}

#[test]
fn cli_parse_sync_requires_path() {
    assert!(Cli::try_parse_from(["localcopy", "sync", "http://h/f"]).is_err());
}
