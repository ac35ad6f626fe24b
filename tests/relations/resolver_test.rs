#[path = "../common/mod.rs"]
mod common;

use common::{shop_source, SqliteCatalog};
use schemagen::metadata::InformationSchema;
use schemagen::relations::{RelationOptions, RelationshipKind, RelationshipResolver};

#[test]
fn test_posts_belong_to_user() {
    let resolver = RelationshipResolver::new(shop_source());

    let belongs_to = resolver.belongs_to("posts").unwrap();
    assert_eq!(belongs_to.len(), 1);

    let user = &belongs_to[0];
    assert_eq!(user.kind, RelationshipKind::BelongsTo);
    assert_eq!(user.accessor, "user");
    assert_eq!(user.entity, "User");
    assert_eq!(user.related_table, "users");
    assert_eq!(user.foreign_key, "user_id");
    assert_eq!(user.referenced_key, "id");
}

#[test]
fn test_user_has_many_posts() {
    let resolver = RelationshipResolver::new(shop_source());

    let has_many = resolver.has_many("users").unwrap();
    let accessors: Vec<&str> = has_many.iter().map(|r| r.accessor.as_str()).collect();
    assert_eq!(accessors, vec!["posts", "profiles"]);

    let posts = &has_many[0];
    assert_eq!(posts.kind, RelationshipKind::HasMany);
    assert_eq!(posts.entity, "Post");
    assert_eq!(posts.related_table, "posts");
    assert_eq!(posts.foreign_key, "user_id");
}

#[test]
fn test_unique_foreign_key_makes_has_one() {
    let resolver = RelationshipResolver::new(shop_source());

    let has_many = resolver.has_many("users").unwrap();
    let has_one = resolver.has_one_from(&has_many).unwrap();

    assert_eq!(has_one.len(), 1);
    let profile = &has_one[0];
    assert_eq!(profile.kind, RelationshipKind::HasOne);
    assert_eq!(profile.accessor, "profile");
    assert_eq!(profile.entity, "Profile");
    assert_eq!(profile.related_table, "profiles");
    assert_eq!(profile.foreign_key, "user_id");
}

#[test]
fn test_non_unique_composite_index_is_not_has_one() {
    // posts.user_id sits in a composite index, but not a unique one
    let resolver = RelationshipResolver::new(shop_source());

    let relations = resolver.resolve("users").unwrap();
    assert!(relations.has_one.iter().all(|r| r.related_table != "posts"));
}

#[test]
fn test_resolve_drops_collection_shadowed_by_has_one() {
    let resolver = RelationshipResolver::new(shop_source());

    let relations = resolver.resolve("users").unwrap();
    assert_eq!(relations.table, "users");
    assert!(relations.belongs_to.is_empty());
    assert_eq!(relations.has_many.len(), 1);
    assert_eq!(relations.has_many[0].accessor, "posts");
    assert_eq!(relations.has_one.len(), 1);
    assert_eq!(relations.has_one[0].accessor, "profile");
    assert_eq!(relations.len(), 2);
}

#[test]
fn test_resolve_keeps_duplicate_collections_when_asked() {
    let resolver = RelationshipResolver::with_options(
        shop_source(),
        RelationOptions {
            keep_duplicate_collections: true,
        },
    );

    let relations = resolver.resolve("users").unwrap();
    assert_eq!(relations.has_many.len(), 2);
    assert_eq!(relations.has_one.len(), 1);
}

#[test]
fn test_foreign_key_to_unknown_table_is_skipped() {
    let resolver = RelationshipResolver::new(shop_source());

    assert!(resolver.belongs_to("audit_log").unwrap().is_empty());
    assert!(resolver.resolve("audit_log").unwrap().is_empty());
}

#[test]
fn test_self_reference() {
    let resolver = RelationshipResolver::new(shop_source());

    let relations = resolver.resolve("comments").unwrap();

    let targets: Vec<(&str, &str)> = relations
        .belongs_to
        .iter()
        .map(|r| (r.accessor.as_str(), r.foreign_key.as_str()))
        .collect();
    assert_eq!(targets, vec![("comment", "parent_id"), ("post", "post_id")]);

    // a table never collects itself
    assert!(relations.has_many.is_empty());
}

#[test]
fn test_post_has_many_comments() {
    let resolver = RelationshipResolver::new(shop_source());

    let relations = resolver.resolve("posts").unwrap();
    assert_eq!(relations.belongs_to.len(), 1);
    assert_eq!(relations.has_many.len(), 1);
    assert_eq!(relations.has_many[0].accessor, "comments");
    assert_eq!(relations.has_many[0].entity, "Comment");
    assert_eq!(relations.has_many[0].foreign_key, "post_id");
    assert!(relations.has_one.is_empty());
}

#[test]
fn test_multi_word_and_irregular_names() {
    let catalog = SqliteCatalog::empty();
    catalog.execute(
        "INSERT INTO information_schema.TABLES VALUES
            ('hr', 'people', 'BASE TABLE'),
            ('hr', 'order_items', 'BASE TABLE');
         INSERT INTO information_schema.KEY_COLUMN_USAGE VALUES
            ('hr', 'order_items_buyer_id_foreign', 'hr', 'order_items', 'buyer_id', 1, 'people', 'id');",
    );
    let resolver = RelationshipResolver::new(InformationSchema::new(catalog, "hr"));

    let belongs_to = resolver.belongs_to("order_items").unwrap();
    assert_eq!(belongs_to[0].accessor, "person");
    assert_eq!(belongs_to[0].entity, "Person");

    let has_many = resolver.has_many("people").unwrap();
    assert_eq!(has_many[0].accessor, "orderItems");
    assert_eq!(has_many[0].entity, "OrderItem");
}

#[test]
fn test_declarations() {
    let resolver = RelationshipResolver::new(shop_source());

    let relations = resolver.resolve("profiles").unwrap();
    insta::assert_snapshot!(relations.declarations(), @r"
    #[belongs_to(key = user_id, references = id)]
    user: BelongsTo<User>,
    ");
}
