#[path = "../common/mod.rs"]
mod common;

use common::{shop_source, SqliteCatalog};
use schemagen::metadata::InformationSchema;
use schemagen::validation::{ColumnRules, Rule, RuleDeriver, RuleMode};

fn rule_strings(rules: &ColumnRules) -> Vec<(String, String)> {
    rules
        .iter()
        .map(|(column, set)| (column.clone(), set.to_rule_string()))
        .collect()
}

fn pairs(expected: &[(&str, &str)]) -> Vec<(String, String)> {
    expected
        .iter()
        .map(|(c, r)| (c.to_string(), r.to_string()))
        .collect()
}

/// `members` has a plain unsigned age and a draft/published enum; `countries`
/// has a nullable primary key that is not auto-increment.
fn registry() -> InformationSchema<SqliteCatalog> {
    let catalog = SqliteCatalog::empty();
    catalog.execute(
        "INSERT INTO information_schema.TABLES VALUES
            ('registry', 'members', 'BASE TABLE'),
            ('registry', 'countries', 'BASE TABLE');
         INSERT INTO information_schema.COLUMNS
            (TABLE_SCHEMA, TABLE_NAME, COLUMN_NAME, ORDINAL_POSITION, IS_NULLABLE, DATA_TYPE,
             CHARACTER_MAXIMUM_LENGTH, COLUMN_TYPE, COLUMN_KEY, EXTRA)
         VALUES
            ('registry', 'members', 'id', 1, 'NO', 'bigint', NULL, 'bigint(20) unsigned', 'PRI', 'auto_increment'),
            ('registry', 'members', 'age', 2, 'NO', 'int', NULL, 'int(11) unsigned', '', ''),
            ('registry', 'members', 'status', 3, 'NO', 'enum', 9, 'enum(''draft'',''published'')', '', ''),
            ('registry', 'members', 'rank', 4, 'NO', 'tinyint', NULL, 'tinyint(4)', '', ''),
            ('registry', 'members', 'joined', 5, 'YES', 'year', NULL, 'year(4)', '', ''),
            ('registry', 'members', 'active', 6, 'NO', 'BOOLEAN', NULL, 'tinyint(1)', '', ''),
            ('registry', 'members', 'contact', 7, 'NO', 'email', NULL, 'email', 'UNI', ''),
            ('registry', 'members', 'homepage', 8, 'YES', 'url', NULL, 'url', '', ''),
            ('registry', 'members', 'location', 9, 'YES', 'point', NULL, 'point', '', ''),
            ('registry', 'members', 'kind', 10, 'NO', 'enum', 0, 'enum()', '', ''),
            ('registry', 'countries', 'code', 1, 'YES', 'char', 2, 'char(2)', 'PRI', ''),
            ('registry', 'countries', 'name', 2, 'NO', 'varchar', 80, 'varchar(80)', '', '');
         INSERT INTO information_schema.KEY_COLUMN_USAGE VALUES
            ('registry', 'PRIMARY', 'registry', 'members', 'id', 1, NULL, NULL),
            ('registry', 'PRIMARY', 'registry', 'countries', 'code', 1, NULL, NULL);",
    );
    InformationSchema::new(catalog, "registry")
}

#[test]
fn test_unsigned_int_rules() {
    let deriver = RuleDeriver::new(registry());

    let rules = deriver.generate_rules("members", RuleMode::Create).unwrap();
    let age = &rules["age"];
    assert_eq!(age.tokens(), vec!["required", "integer", "min:0"]);
    assert_eq!(age.to_rule_string(), "required|integer|min:0");
}

#[test]
fn test_enum_rules() {
    let deriver = RuleDeriver::new(registry());

    let rules = deriver.generate_rules("members", RuleMode::Create).unwrap();
    assert_eq!(rules["status"].to_rule_string(), "required|in:draft,published");
    assert_eq!(
        rules["status"].rules()[1],
        Rule::In(vec!["draft".to_string(), "published".to_string()])
    );
}

#[test]
fn test_every_type_family() {
    let deriver = RuleDeriver::new(registry());

    let rules = deriver.generate_rules("members", RuleMode::Create).unwrap();
    assert_eq!(
        rule_strings(&rules),
        pairs(&[
            ("age", "required|integer|min:0"),
            ("status", "required|in:draft,published"),
            ("rank", "required|integer|min:-128|max:127"),
            ("joined", "nullable|integer|min:1901|max:2155"),
            ("active", "required|boolean"),
            ("contact", "required|email|unique:members,contact"),
            ("homepage", "nullable|url"),
            ("location", "nullable"),
            ("kind", "required"),
        ])
    );
}

#[test]
fn test_auto_increment_primary_key_never_appears() {
    let deriver = RuleDeriver::new(registry());

    let sets = deriver.generate_rule_sets("members").unwrap();
    assert!(!sets.create.contains_key("id"));
    assert!(!sets.update.contains_key("id"));
}

#[test]
fn test_plain_primary_key_only_in_update_mode() {
    let deriver = RuleDeriver::new(registry());

    let create = deriver.generate_rules("countries", RuleMode::Create).unwrap();
    assert_eq!(rule_strings(&create), pairs(&[("name", "required|string|max:80")]));

    let update = deriver.generate_rules("countries", RuleMode::Update).unwrap();
    assert_eq!(
        rule_strings(&update),
        pairs(&[
            ("code", "nullable|string|max:2"),
            ("name", "required|string|max:80"),
        ])
    );
}

#[test]
fn test_shop_users() {
    let deriver = RuleDeriver::new(shop_source());

    let rules = deriver.generate_rules("users", RuleMode::Create).unwrap();
    assert_eq!(
        rule_strings(&rules),
        pairs(&[
            ("email", "required|string|max:255|unique:users,email"),
            ("name", "required|string|max:100"),
            ("age", "nullable|integer|min:0|max:255"),
            ("status", "required|in:active,banned"),
            ("settings", "nullable|array"),
            ("created_at", "nullable|date"),
        ])
    );
}

#[test]
fn test_shop_posts_and_audit_log() {
    let deriver = RuleDeriver::new(shop_source());

    let posts = deriver.generate_rules("posts", RuleMode::Update).unwrap();
    assert_eq!(
        rule_strings(&posts),
        pairs(&[
            ("user_id", "required|integer|min:0"),
            ("title", "required|string|max:200"),
            ("body", "nullable|string"),
            ("price", "required|numeric|min:0"),
            ("published_on", "nullable|date"),
        ])
    );

    let audit = deriver.generate_rules("audit_log", RuleMode::Create).unwrap();
    assert_eq!(audit["logged_at"].to_rule_string(), "required|date_format:H:i:s");
}

#[test]
fn test_unknown_table_has_no_rules() {
    let deriver = RuleDeriver::new(shop_source());
    assert!(deriver
        .generate_rules("missing", RuleMode::Create)
        .unwrap()
        .is_empty());
}

#[test]
fn test_rule_sets_serialize_as_rule_strings() {
    let deriver = RuleDeriver::new(registry());

    let sets = deriver.generate_rule_sets("countries").unwrap();
    let json = serde_json::to_value(&sets).unwrap();

    assert_eq!(
        json,
        serde_json::json!({
            "create": { "name": "required|string|max:80" },
            "update": { "code": "nullable|string|max:2", "name": "required|string|max:80" },
        })
    );
}
