use std::fs;
use std::path::Path;

use clap::Parser;

use super::*;

fn data_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("tempdir");
    let write = |name: &str, contents: &str| {
        fs::write(dir.path().join(name), contents).expect("write fixture");
    };
    write(
        "shops.csv",
        "id,name,lat,lng\ns1,Corner Store,59.33258,18.0649\ns2,Book Nook,59.33258,18.0749\n",
    );
    write(
        "products.csv",
        "id,shop_id,title,popularity,quantity\np1,s1,Socks,0.2,3\np2,s1,Boots,0.9,1\np3,s2,Novel,0.5,7\n",
    );
    write("taggings.csv", "id,shop_id,tag_id\nt1,s2,books\n");
    write("tags.csv", "id,tag\nbooks,Books\n");
    dir
}

fn search_args(tags: Option<&str>, limit: i64) -> query::SearchArgs {
    query::SearchArgs {
        lat: 59.33258,
        lng: 18.0649,
        radius_km: 1.0,
        tags: tags.map(ToString::to_string),
        limit,
    }
}

fn run_search_json(dir: &Path, args: &query::SearchArgs) -> serde_json::Value {
    let mut out = Vec::new();
    query::run_search(dir, 4, args, &mut out).expect("search");
    serde_json::from_slice(&out).expect("json output")
}

#[test]
fn parses_search_command() {
    let cli = Cli::try_parse_from([
        "shopgeo-cli",
        "search",
        "--data-dir",
        "/tmp/data",
        "--lat",
        "-33.9",
        "--lng",
        "18.4",
        "--radius-km",
        "2.5",
        "--tags",
        "a,b",
        "--limit",
        "5",
        "--precision",
        "5",
    ])
    .expect("expected valid cli args");

    match cli.command {
        Commands::Search {
            data_dir,
            lat,
            lng,
            radius_km,
            tags,
            limit,
            precision,
        } => {
            assert_eq!(data_dir, Path::new("/tmp/data"));
            assert!((lat + 33.9).abs() < f64::EPSILON);
            assert!((lng - 18.4).abs() < f64::EPSILON);
            assert!((radius_km - 2.5).abs() < f64::EPSILON);
            assert_eq!(tags.as_deref(), Some("a,b"));
            assert_eq!(limit, 5);
            assert_eq!(precision, 5);
        }
        Commands::Stats { .. } => panic!("expected search command"),
    }
}

#[test]
fn search_requires_coordinates() {
    assert!(Cli::try_parse_from(["shopgeo-cli", "search", "--lat", "1"]).is_err());
}

#[test]
fn parses_stats_command() {
    let cli = Cli::try_parse_from(["shopgeo-cli", "stats", "--data-dir", "/tmp/data"])
        .expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::Stats { .. }));
}

#[test]
fn missing_command_is_an_error() {
    assert!(Cli::try_parse_from(["shopgeo-cli"]).is_err());
}

#[test]
fn search_prints_ranked_products() {
    let dir = data_dir();
    let json = run_search_json(dir.path(), &search_args(None, 2));

    assert_eq!(json["count"], 2);
    assert_eq!(json["products"][0]["id"], "p2");
    assert_eq!(json["products"][1]["id"], "p3");
    assert_eq!(json["products"][1]["shop"]["name"], "Book Nook");
}

#[test]
fn search_applies_tag_filter() {
    let dir = data_dir();
    let json = run_search_json(dir.path(), &search_args(Some("books"), 10));

    assert_eq!(json["count"], 1);
    assert_eq!(json["products"][0]["id"], "p3");
}

#[test]
fn search_rejects_invalid_latitude() {
    let dir = data_dir();
    let mut args = search_args(None, 10);
    args.lat = 120.0;
    let mut out = Vec::new();
    assert!(query::run_search(dir.path(), 4, &args, &mut out).is_err());
    assert!(out.is_empty());
}

#[test]
fn search_reports_missing_data_directory() {
    let mut out = Vec::new();
    let err = query::run_search(
        Path::new("/definitely/not/here"),
        4,
        &search_args(None, 10),
        &mut out,
    )
    .unwrap_err();
    assert!(err.to_string().contains("/definitely/not/here"), "got {err}");
}

#[test]
fn stats_prints_catalog_sizes() {
    let dir = data_dir();
    let mut out = Vec::new();
    query::run_stats(dir.path(), 4, &mut out).expect("stats");
    let json: serde_json::Value = serde_json::from_slice(&out).expect("json output");

    assert_eq!(json["shops"], 2);
    assert_eq!(json["products"], 3);
    assert_eq!(json["tags"], 1);
    assert_eq!(json["grid_precision"], 4);
    assert_eq!(json["grid_buckets"], 1);
}

#[derive(Clone, Default)]
struct Captured(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

impl std::io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().expect("log buffer").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[test]
fn search_logs_data_directory_and_precision() {
    let dir = data_dir();
    let captured = Captured::default();
    let writer = captured.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        run_search_json(dir.path(), &search_args(None, 2));
    });

    let logs = String::from_utf8(captured.0.lock().expect("log buffer").clone()).unwrap();
    assert!(logs.contains("loading data directory"), "got {logs}");
    assert!(logs.contains("precision=4"), "got {logs}");
    assert!(logs.contains("search finished"), "got {logs}");
}
