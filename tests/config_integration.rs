use markshelf::config::{
    ConfigFlags, ThemeMode, load_config_flags, parse_flag_tokens,
};

#[test]
fn test_config_file_parsing_ignores_comments_and_blank_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".markshelfrc");
    let content = r"
# comment
--no-index

--theme light

";
    std::fs::write(&path, content).unwrap();

    let flags = load_config_flags(&path).unwrap();
    assert!(flags.no_index);
    assert_eq!(flags.theme, Some(ThemeMode::Light));
}

#[test]
fn test_cli_flags_override_file_flags() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".markshelfrc");
    std::fs::write(&path, "--no-index\n--theme light\n").unwrap();

    let file_flags = load_config_flags(&path).unwrap();
    let cli_args = vec![
        "markshelf".to_string(),
        "--theme".to_string(),
        "dark".to_string(),
    ];
    let cli_flags = parse_flag_tokens(&cli_args);

    let effective = file_flags.union(&cli_flags);
    assert!(effective.no_index, "file flags should remain enabled");
    assert_eq!(
        effective.theme,
        Some(ThemeMode::Dark),
        "cli should override theme"
    );
}

#[test]
fn test_defaults_when_no_config_present() {
    let dir = tempfile::tempdir().unwrap();
    let flags = load_config_flags(&dir.path().join("missing")).unwrap();
    assert_eq!(flags, ConfigFlags::default());
    assert_eq!(flags.union(&ConfigFlags::default()), ConfigFlags::default());
}
