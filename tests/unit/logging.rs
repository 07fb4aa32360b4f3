use super::*;

#[test]
fn engine_level_names_parse() {
    for level in LogLevel::ALL {
        assert_eq!(level.as_str().parse::<LogLevel>().unwrap(), level);
    }
    assert_eq!("WARN".parse::<LogLevel>().unwrap(), LogLevel::Warning);
    assert_eq!("trace".parse::<LogLevel>().unwrap(), LogLevel::Verbose);
    assert!(matches!("loud".parse::<LogLevel>(), Err(NglError::Serde(_))));
}

#[test]
fn levels_map_to_tracing_directives() {
    let directives: Vec<&str> = LogLevel::ALL.iter().map(|l| l.directive()).collect();
    assert_eq!(directives, vec!["trace", "debug", "info", "warn", "error"]);
    assert_eq!(env_filter(Some(LogLevel::Warning)).to_string(), "warn");
}

#[test]
fn serde_uses_engine_spelling() {
    assert_eq!(
        serde_json::to_string(&LogLevel::Warning).unwrap(),
        "\"warning\""
    );
}
