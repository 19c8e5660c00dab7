use super::{SuffixError, SuffixTable};
use crate::http::tests::StubTransport;
use crate::http::{HttpResponse, TransportError};

const SAMPLE: &str = "\
// ===BEGIN ICANN DOMAINS===
// uk : https://en.wikipedia.org/wiki/.uk
uk
co.uk
  org.uk

com
// *.ck is a wildcard rule, kept verbatim
*.ck
";

fn sample() -> SuffixTable {
    SuffixTable::load(SAMPLE.as_bytes()).expect("sample list loads")
}

#[test]
fn load_skips_comments_and_blank_lines() {
    let table = sample();
    assert_eq!(table.len(), 5);
    assert!(table.contains("co.uk"));
    assert!(table.contains("org.uk"));
    assert!(!table.contains("// uk : https://en.wikipedia.org/wiki/.uk"));
}

#[test]
fn load_rejects_empty_source() {
    let err = SuffixTable::load("// only comments\n\n".as_bytes()).expect_err("no entries");
    assert!(matches!(err, SuffixError::EmptyList));
    assert!(err.is_load_error());
}

#[test]
fn load_rejects_non_utf8() {
    let bytes: &[u8] = b"com\n\xff\xfe\n";
    let err = SuffixTable::load(bytes).expect_err("invalid utf-8");
    assert!(matches!(err, SuffixError::Load { line: 2, .. }));
}

#[test]
fn extract_sld_under_multi_label_suffix() {
    let table = sample();
    let sld = table.extract_sld("mail.sub.example.co.uk").expect("sld");
    assert_eq!(sld, "example.co.uk");
}

#[test]
fn extract_sld_normalizes_case_and_trailing_dot() {
    let table = sample();
    assert_eq!(table.extract_sld("MX1.Example.COM.").unwrap(), "example.com");
}

#[test]
fn extract_sld_on_public_suffix_fails() {
    let table = sample();
    let err = table.extract_sld("co.uk").expect_err("suffix itself");
    assert!(matches!(err, SuffixError::NoRegistrableDomain { .. }));
    assert!(!err.is_load_error());
}

#[test]
fn extract_sld_without_matching_suffix_fails() {
    let table = sample();
    let err = table.extract_sld("example").expect_err("no suffix");
    assert!(matches!(err, SuffixError::NoPublicSuffixFound { .. }));
    let err = table.extract_sld("host.example.invalid").expect_err("no suffix");
    assert!(matches!(err, SuffixError::NoPublicSuffixFound { .. }));
}

#[test]
fn wildcard_rules_never_match_concrete_labels() {
    let table = sample();
    assert!(table.extract_sld("www.example.ck").is_err());
}

#[test]
fn write_list_is_sorted_and_reloadable() {
    let table = SuffixTable::from_entries(["net", "com", "co.uk"]);
    let mut out = Vec::new();
    table.write_list(&mut out).unwrap();
    assert_eq!(String::from_utf8(out.clone()).unwrap(), "co.uk\ncom\nnet\n");
    assert_eq!(SuffixTable::load(out.as_slice()).unwrap(), table);
}

#[test]
fn from_path_reports_missing_file() {
    let err = SuffixTable::from_path("/nonexistent/public_suffix_list.dat").expect_err("missing");
    assert!(matches!(err, SuffixError::Open { .. }));
}

#[test]
fn fetch_loads_downloaded_list() {
    let http = StubTransport::new(|request| {
        assert_eq!(request.uri, "https://psl.test/list.dat");
        Ok(HttpResponse::new(200, SAMPLE.as_bytes().to_vec()))
    });
    let table = SuffixTable::fetch(&http, "https://psl.test/list.dat").expect("download");
    assert!(table.contains("co.uk"));
    assert_eq!(http.call_count(), 1);
}

#[test]
fn fetch_reports_http_status() {
    let http = StubTransport::new(|_| Ok(HttpResponse::new(404, Vec::new())));
    let err = SuffixTable::fetch(&http, "https://psl.test/list.dat").expect_err("404");
    assert!(matches!(err, SuffixError::Download { status: 404, .. }));
}

#[test]
fn fetch_reports_transport_failure() {
    let http = StubTransport::new(|request| Err(TransportError::request(&request.uri, "refused")));
    let err = SuffixTable::fetch(&http, "https://psl.test/list.dat").expect_err("refused");
    assert!(matches!(err, SuffixError::Transport { .. }));
}

#[cfg(feature = "with-serde")]
#[test]
fn json_snapshot_round_trip() {
    let table = SuffixTable::from_entries(["com", "co.uk"]);
    let mut out = Vec::new();
    table.write_json(&mut out).unwrap();
    assert_eq!(String::from_utf8(out.clone()).unwrap(), r#"{"co.uk":true,"com":true}"#);
    let reloaded = SuffixTable::from_json_reader(out.as_slice()).unwrap();
    assert_eq!(reloaded, table);
}

#[cfg(feature = "with-serde")]
#[test]
fn json_snapshot_ignores_false_entries() {
    let table = SuffixTable::from_json_reader(r#"{"com":true,"example":false}"#.as_bytes())
        .expect("snapshot loads");
    assert!(table.contains("com"));
    assert!(!table.contains("example"));
}
