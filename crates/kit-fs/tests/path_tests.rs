use kit_fs::NormalizedPath;
use rstest::rstest;

#[rstest]
#[case("C:\\work\\app", "C:/work/app")]
#[case("/home/dev/app", "/home/dev/app")]
#[case("relative\\dir", "relative/dir")]
fn test_normalizes_separators(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(NormalizedPath::new(input).as_str(), expected);
}

#[rstest]
#[case("/proj", "package.json", "/proj/package.json")]
#[case("/proj/", "package.json", "/proj/package.json")]
#[case("/proj", ".fe-kit\\pending-install.json", "/proj/.fe-kit/pending-install.json")]
#[case("", "package.json", "package.json")]
fn test_join(#[case] base: &str, #[case] segment: &str, #[case] expected: &str) {
    assert_eq!(NormalizedPath::new(base).join(segment).as_str(), expected);
}

#[rstest]
#[case("/proj/package.json", Some("json"))]
#[case("/proj/.fe-kit.toml", Some("toml"))]
#[case("/proj/.fe-kit", None)]
#[case("/proj/Makefile", None)]
fn test_extension(#[case] input: &str, #[case] expected: Option<&str>) {
    assert_eq!(NormalizedPath::new(input).extension(), expected);
}

#[rstest]
#[case("/proj/.fe-kit/pending-install.json", Some("pending-install.json"))]
#[case("/proj/app/", Some("app"))]
#[case("/", None)]
fn test_file_name(#[case] input: &str, #[case] expected: Option<&str>) {
    assert_eq!(NormalizedPath::new(input).file_name(), expected);
}

#[test]
fn test_canonical_root_resolves_existing_dir() {
    let temp = tempfile::TempDir::new().unwrap();
    let root = NormalizedPath::canonical_root(temp.path()).unwrap();
    assert!(root.exists());
    assert!(!root.as_str().contains('\\'));
}

#[test]
fn test_canonical_root_missing_dir_errors() {
    let temp = tempfile::TempDir::new().unwrap();
    let result = NormalizedPath::canonical_root(temp.path().join("nope"));
    assert!(result.unwrap_err().is_not_found());
}
