use super::*;
use clap::CommandFactory;
use sfntname_core::extract::FontNames;
use std::io::Cursor;
use tempfile::tempdir;

#[test]
fn parses_scan_args_into_query() {
    let cli = Cli::try_parse_from([
        "sfntname", "scan", "--family", "^Noto", "--style", "Bold", "-j", "2", "--json", "/fonts",
    ])
    .expect("parse cli");

    let Command::Scan(args) = cli.command else {
        panic!("expected scan command");
    };
    assert!(args.json);
    assert!(!args.ndjson);
    assert_eq!(args.jobs, Some(2));

    let query = build_query(&args).expect("build query");
    let matching = FontNames {
        family: Some("Noto Sans".into()),
        subfamily: Some("Bold".into()),
    };
    assert!(query.matches(&matching));

    let non_matching = FontNames {
        family: Some("Arial".into()),
        subfamily: Some("Bold".into()),
    };
    assert!(!query.matches(&non_matching));
}

#[test]
fn json_and_ndjson_conflict() {
    let parse = Cli::try_parse_from(["sfntname", "scan", "--json", "--ndjson", "/fonts"]);
    assert!(parse.is_err());
}

#[test]
fn family_requires_a_file() {
    assert!(Cli::try_parse_from(["sfntname", "family"]).is_err());
}

#[test]
fn global_flags_apply_to_subcommands() {
    let cli = Cli::try_parse_from([
        "sfntname",
        "style",
        "-vv",
        "--max-table-bytes",
        "4096",
        "/fonts/a.ttf",
    ])
    .expect("parse cli");

    assert_eq!(cli.verbose, 2);
    assert_eq!(cli.max_table_bytes, 4096);
    assert!(matches!(cli.command, Command::Style(_)));
}

#[test]
fn max_table_bytes_defaults_to_core_limit() {
    let cli = Cli::try_parse_from(["sfntname", "tables", "/fonts/a.ttf"]).expect("parse cli");
    assert_eq!(cli.max_table_bytes, DEFAULT_MAX_TABLE_LEN);
}

#[test]
fn invalid_regex_returns_error() {
    let args = ScanArgs {
        paths: vec![PathBuf::from("/fonts")],
        stdin_paths: false,
        family_patterns: vec!["(".to_string()],
        style_patterns: Vec::new(),
        follow_symlinks: false,
        jobs: None,
        json: false,
        ndjson: false,
    };

    assert!(build_query(&args).is_err());
}

#[test]
fn unreadable_files_print_nothing() {
    let tmp = tempdir().expect("tempdir");
    let junk = tmp.path().join("junk.ttf");
    std::fs::write(&junk, b"definitely not a font").expect("write");

    let mut buf = Cursor::new(Vec::new());
    write_names(
        &[junk, tmp.path().join("missing.ttf")],
        Which::Family,
        ExtractOptions::default(),
        &mut buf,
    )
    .expect("write names");

    assert!(buf.into_inner().is_empty());
}

#[test]
fn tables_rejects_non_fonts() {
    let tmp = tempdir().expect("tempdir");
    let junk = tmp.path().join("junk.bin");
    std::fs::write(&junk, b"GIF89a............").expect("write");

    let err = write_tables(&junk, &[], Vec::new()).unwrap_err();
    assert!(err.to_string().contains("not an sfnt font"));
}

#[test]
fn scan_needs_paths_unless_reading_stdin() {
    assert!(Cli::try_parse_from(["sfntname", "scan"]).is_err());

    let cli = Cli::try_parse_from(["sfntname", "scan", "--stdin-paths"]).expect("parse cli");
    let Command::Scan(args) = cli.command else {
        panic!("expected scan command");
    };
    assert!(args.stdin_paths);
    assert!(args.paths.is_empty());
}

#[test]
fn table_tags_are_parsed_and_padded() {
    let cli = Cli::try_parse_from(["sfntname", "tables", "--tag", "cvt", "--tag", "name", "/f.ttf"])
        .expect("parse cli");

    let Command::Tables(args) = cli.command else {
        panic!("expected tables command");
    };
    assert_eq!(args.tags, [Tag::new(b"cvt "), Tag::new(b"name")]);
}

#[test]
fn malformed_table_tags_are_rejected() {
    for bad in ["", "toolong"] {
        let parse = Cli::try_parse_from(["sfntname", "tables", "--tag", bad, "/f.ttf"]);
        assert!(parse.is_err(), "{bad:?} should be rejected");
    }
}

#[test]
fn help_lists_subcommands() {
    let help = Cli::command().render_long_help().to_string();
    for sub in ["family", "style", "scan", "tables"] {
        assert!(help.contains(sub), "help should mention {sub}");
    }
}
