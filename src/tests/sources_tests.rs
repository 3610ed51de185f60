use crate::regions::{
    sources::{parse_alpha_code_table, parse_hierarchy_table},
    FetchError, HierarchyRow,
};

const ISO_3166_PAGE: &str = r#"
<html><body>
<table><tr><td>Decoy</td><td>XX</td><td>XXX</td></tr></table>
<div class="mw-heading"><h2 id="Current_codes">Current codes</h2></div>
<p>Officially assigned code elements.</p>
<div>
<table class="wikitable sortable">
  <tr>
    <th>English short name</th><th>Alpha-2 code</th><th>Alpha-3 code</th><th>Numeric code</th>
  </tr>
  <tr>
    <td><span class="flagicon"></span><a href="/wiki/Afghanistan">Afghanistan</a></td>
    <td><a href="/wiki/ISO_3166-2:AF"><span class="monospaced">AF</span></a></td>
    <td><span class="monospaced">AFG</span></td>
    <td><span class="monospaced">004</span></td>
  </tr>
  <tr>
    <th scope="row"><a href="/wiki/Chad">Chad</a></th>
    <td><span class="monospaced">TD</span></td>
    <td><span class="monospaced">TCD</span></td>
    <td><span class="monospaced">148</span></td>
  </tr>
  <tr>
    <td>Nigeria</td><td>NG</td><td>NGA</td><td>566</td>
  </tr>
</table>
</div>
<table><tr><td>Later</td><td>YY</td><td>YYY</td></tr></table>
</body></html>
"#;

const M49_PAGE: &str = r#"
<html><body>
<table id="GeoGroupsENG">
  <thead>
  <tr><th>Country or Area</th><th>M49 Code</th><th>ISO-alpha3 code</th></tr>
  </thead>
  <tbody>
  <tr data-tt-id="001"><td>World</td><td>001</td><td></td></tr>
  <tr data-tt-id="002" data-tt-parent-id="001"><td>Africa</td><td>002</td><td></td></tr>
  <tr data-tt-id="566" data-tt-parent-id="002"><td>Nigeria</td><td>566</td><td>NGA</td></tr>
  <tr data-tt-id="148" data-tt-parent-id="002"><td> Chad </td><td>148</td><td>TCD</td></tr>
  </tbody>
</table>
</body></html>
"#;

#[test]
fn alpha_codes_come_from_table_after_anchor() {
    let codes = parse_alpha_code_table(ISO_3166_PAGE).unwrap();

    assert_eq!(3, codes.len());
    assert_eq!("AF", codes["AFG"]);
    assert_eq!("TD", codes["TCD"]);
    assert_eq!("NG", codes["NGA"]);
    assert!(!codes.contains_key("XXX"));
    assert!(!codes.contains_key("YYY"));
}

#[test]
fn alpha_codes_without_anchor_is_schema_error() {
    let page = "<html><body><table><tr><td>AF</td><td>AFG</td></tr></table></body></html>";

    let err = parse_alpha_code_table(page).unwrap_err();

    assert!(matches!(err, FetchError::Schema(_)));
}

#[test]
fn hierarchy_rows_keep_table_order() {
    let rows = parse_hierarchy_table(M49_PAGE).unwrap();

    assert_eq!(4, rows.len());
    assert_eq!(
        HierarchyRow {
            name: "World".to_string(),
            id: Some("001".to_string()),
            parent_id: None,
            alpha3: None,
        },
        rows[0]
    );
    assert_eq!(
        HierarchyRow {
            name: "Chad".to_string(),
            id: Some("148".to_string()),
            parent_id: Some("002".to_string()),
            alpha3: Some("TCD".to_string()),
        },
        rows[3]
    );
    assert_eq!(Some("NGA".to_string()), rows[2].alpha3);
}

#[test]
fn hierarchy_without_table_is_schema_error() {
    let err = parse_hierarchy_table("<html><body><p>moved</p></body></html>").unwrap_err();

    assert!(matches!(err, FetchError::Schema(_)));
}

#[test]
fn hierarchy_without_name_column_is_schema_error() {
    let page = r#"<table id="GeoGroupsENG">
        <tr><th>Name</th></tr>
        <tr data-tt-id="1"><td>World</td></tr>
    </table>"#;

    let err = parse_hierarchy_table(page).unwrap_err();

    assert!(matches!(err, FetchError::Schema(_)));
}
