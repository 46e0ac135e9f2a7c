use section_map::{
    find_by, format_text, normalize, parse, parse_file, write_file, Command, ScriptFormat,
    SectionMap,
};

fn sample() -> SectionMap<String> {
    let mut map = SectionMap::new();
    map.push(
        "/interface wifi".to_string(),
        r#"set [ find default-name=wifi2 ] configuration.ssid="Home 2.4""#,
    );
    map.push(
        "/ip route".to_string(),
        "add dst-address=0.0.0.0/0 gateway=wg-client routing-table=to-VPN",
    );
    map
}

#[test]
fn rendered_script_reads_back_unchanged() {
    let text = format_text(&sample());
    let parsed = parse(&text).expect("parse should succeed");
    assert_eq!(parsed, sample());
}

#[test]
fn write_file_then_parse_file() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let path = dir.path().join("out.rsc");

    write_file(&sample(), &path, ScriptFormat::Text).expect("write should succeed");
    let parsed = parse_file(&path).expect("parse_file should succeed");
    assert_eq!(parsed.line_count(), 2);
}

#[test]
fn json_output_is_an_ordered_object() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let path = dir.path().join("out.json");

    write_file(&sample(), &path, ScriptFormat::Json).expect("write should succeed");
    let raw = std::fs::read_to_string(&path).expect("read back");
    let value: serde_json::Value = serde_json::from_str(&raw).expect("valid json");
    assert_eq!(value["/ip route"][0], "add dst-address=0.0.0.0/0 gateway=wg-client routing-table=to-VPN");
}

#[test]
fn multi_line_secrets_stay_on_one_command_line() {
    let mut map = SectionMap::new();
    map.push(
        "/interface wifi".to_string(),
        Command::set(find_by("default-name", "wifi2"))
            .arg("configuration.ssid", "Home\tNet")
            .arg("security.passphrase", "ab\ncd\r"),
    );
    map.push("/interface wifi".to_string(), "set [ find default-name=wifi1 ] disabled=yes");

    let text = format_text(&map);
    assert_eq!(text.lines().count(), 3);

    let parsed = parse(&text).expect("parse should succeed");
    let wifi = parsed.get(&"/interface wifi".to_string());
    assert_eq!(wifi.len(), 2);
    assert_eq!(
        wifi[0],
        r#"set [ find default-name=wifi2 ] configuration.ssid="Home\tNet" security.passphrase="ab\ncd\r""#
    );
    assert_eq!(normalize(&parsed), parsed);
}
