//! End-to-end parse and serialize scenarios.

use blockmark::{
    parse, serialize, AttributeSchema, AttributeType, AttributeValue, Attributes, BlockNode,
    BlockType, Extractor, Options, Registry,
};
use pretty_assertions::assert_eq;

use crate::common::{init_tracing, registry, test_block};

#[test]
fn test_mixed_document() {
    init_tracing();

    let mut registry = Registry::new();
    registry
        .register(
            BlockType::new("core/test-block", |_| String::new()).attribute(
                "content",
                Extractor::function(|raw| Some(format!("{raw} & Chicken").into())),
            ),
        )
        .unwrap();

    let doc = "<!-- wp:core/test-block -->Ribs<!-- /wp:core/test-block --><p>Broccoli</p><!-- wp:core/unknown-block -->Ribs<!-- /wp:core/unknown-block -->";
    let blocks = parse(doc, &registry, &Options::default());

    assert_eq!(blocks.len(), 3);

    assert_eq!(blocks[0].block_type, "core/test-block");
    let mut expected = Attributes::new();
    expected.insert("content".to_string(), "Ribs & Chicken".into());
    assert_eq!(blocks[0].attributes, expected);

    assert_eq!(blocks[1].block_type, "freeform");
    assert_eq!(blocks[1].raw_content, "<p>Broccoli</p>");
    assert!(blocks[1].attributes.is_empty());

    assert_eq!(blocks[2].block_type, "core/unknown-block");
    assert!(blocks[2].attributes.is_empty());
}

#[test]
fn test_minimal_delimiter_on_serialize() {
    let block = BlockNode::new("core/test-block", Attributes::new())
        .with_attribute("content", "Ribs & Chicken")
        .with_attribute("align", "left");

    assert_eq!(
        serialize(&[block], &registry(), &Options::default()),
        "<!-- wp:core/test-block align:left --><p>Ribs & Chicken</p><!-- /wp:core/test-block -->"
    );
}

#[test]
fn test_delimiter_takes_precedence() {
    let mut registry = Registry::new();
    registry
        .register(
            BlockType::new("core/test-block", |_| String::new())
                .attribute("align", Extractor::function(|_| Some("center".into()))),
        )
        .unwrap();

    let doc = "<!-- wp:core/test-block align:left --><p>x</p><!-- /wp:core/test-block -->";
    let blocks = parse(doc, &registry, &Options::default());
    assert_eq!(blocks[0].attribute("align"), Some(&"left".into()));
}

#[test]
fn test_parse_is_total() {
    let registry = registry();
    let options = Options::default();
    let noise = "[[[".repeat(10_000);

    for doc in [
        "",
        "<!-- wp:core/test-block -->",
        "<!-- /wp:core/test-block -->",
        "<!-- wp:core/test-block",
        "<!-- wp:core/test-block align:left /",
        "<!---->",
        "<!-- wp:core/test-block --><!-- wp:core/test-block -->",
        noise.as_str(),
    ] {
        let blocks = parse(doc, &registry, &options);
        let rebuilt: String = blocks.iter().map(|b| b.raw_content.as_str()).collect();
        assert_eq!(rebuilt, doc, "literal input must survive as freeform content");
    }
}

#[test]
fn test_idempotent_on_untouched_document() {
    let doc = concat!(
        "<!-- wp:plugin/hero tone:dark --><h1>Hi</h1><!-- /wp:plugin/hero -->",
        "<!-- wp:core/test-block align:wide --><p>Ribs</p><!-- /wp:core/test-block -->",
        "<!-- wp:core/test-block --><p>Broccoli</p><!-- /wp:core/test-block -->",
        "<!-- wp:plugin/embed url:https://example.com/v -->",
        "<iframe></iframe><!-- /wp:plugin/embed -->",
    );
    let registry = registry();
    let options = Options::default();

    let blocks = parse(doc, &registry, &options);
    assert_eq!(blocks.len(), 4);
    assert_eq!(serialize(&blocks, &registry, &options), doc);
}

#[test]
fn test_freeform_between_blocks_survives() {
    let doc = "<p>intro</p>\n<!-- wp:core/test-block --><p>Ribs</p><!-- /wp:core/test-block -->\n<hr>";
    let registry = registry();
    let options = Options::default();

    let blocks = parse(doc, &registry, &options);
    assert_eq!(blocks.len(), 3);
    assert_eq!(serialize(&blocks, &registry, &options), doc);
}

#[test]
fn test_edited_attributes_are_persisted() {
    let registry = registry();
    let options = Options::default();

    let doc = "<!-- wp:core/test-block --><p>Ribs</p><!-- /wp:core/test-block -->";
    let mut blocks = parse(doc, &registry, &options);
    blocks[0]
        .attributes
        .insert("content".to_string(), "Chicken".into());
    blocks[0]
        .attributes
        .insert("align".to_string(), "right".into());

    assert_eq!(
        serialize(&blocks, &registry, &options),
        "<!-- wp:core/test-block align:right --><p>Chicken</p><!-- /wp:core/test-block -->"
    );
}

#[test]
fn test_typed_attributes_round_trip() {
    let mut registry = Registry::new();
    registry
        .register(
            test_block()
                .attribute("width", AttributeSchema::of_type(AttributeType::Integer))
                .attribute(
                    "wide",
                    AttributeSchema::of_type(AttributeType::Boolean).with_default(false),
                )
                .attribute("ids", AttributeSchema::of_type(AttributeType::Array)),
        )
        .unwrap();
    let options = Options::default();

    let block = BlockNode::new("core/test-block", Attributes::new())
        .with_attribute("content", "Ribs")
        .with_attribute("width", 300_i64)
        .with_attribute("wide", false)
        .with_attribute(
            "ids",
            AttributeValue::List(vec![1_i64.into(), 2_i64.into()]),
        );

    let doc = serialize(&[block.clone()], &registry, &options);
    assert_eq!(
        doc,
        "<!-- wp:core/test-block width:300 ids:[1.0,2.0] --><p>Ribs</p><!-- /wp:core/test-block -->"
    );

    let parsed = parse(&doc, &registry, &options);
    assert_eq!(parsed.len(), 1);
    assert_eq!(parsed[0].attributes, block.attributes);
}

#[test]
fn test_unknown_type_handler_round_trip() {
    let mut registry = registry();
    registry
        .register(BlockType::new("core/missing", |_| String::new()))
        .unwrap();
    registry.set_unknown_type_handler_name(Some("core/missing".to_string()));
    let options = Options::default();

    let doc = "<!-- wp:plugin/gallery columns:3 --><ul><li>a</li></ul><!-- /wp:plugin/gallery -->";
    let blocks = parse(doc, &registry, &options);

    assert_eq!(blocks[0].block_type, "core/missing");
    assert_eq!(blocks[0].original_type.as_deref(), Some("plugin/gallery"));
    assert_eq!(serialize(&blocks, &registry, &options), doc);
}

#[test]
fn test_fallback_with_extracted_markup_round_trip() {
    let mut registry = registry();
    registry
        .register(
            BlockType::new("core/missing", |_| String::new())
                .attribute("content", Extractor::function(|raw| Some(raw.into()))),
        )
        .unwrap();
    registry.set_unknown_type_handler_name(Some("core/missing".to_string()));
    let options = Options::default();

    let doc = "<!-- wp:plugin/gallery columns:3 --><ul><li>a</li></ul><!-- /wp:plugin/gallery -->";
    let blocks = parse(doc, &registry, &options);
    assert_eq!(blocks[0].attribute("content"), Some(&"<ul><li>a</li></ul>".into()));

    let serialized = serialize(&blocks, &registry, &options);
    assert_eq!(serialized, doc);
    assert_eq!(parse(&serialized, &registry, &options), blocks);
}

#[test]
fn test_block_named_like_freeform_round_trip() {
    let registry = registry();
    let options = Options::default();

    let doc = "<p>intro</p><!-- wp:freeform a:1 -->x<!-- /wp:freeform -->";
    let blocks = parse(doc, &registry, &options);
    assert_eq!(blocks.len(), 2);
    assert!(blocks[0].freeform);
    assert!(!blocks[1].freeform);

    let serialized = serialize(&blocks, &registry, &options);
    assert_eq!(serialized, doc);
    assert_eq!(parse(&serialized, &registry, &options)[1].attribute("a"), Some(&"1".into()));
}

#[test]
fn test_edited_block_is_flagged_invalid() {
    let registry = registry();
    let options = Options::default();

    let doc = concat!(
        "<!-- wp:core/test-block --><p>Ribs</p><!-- /wp:core/test-block -->",
        "<!-- wp:core/test-block --><div>Ribs</div><!-- /wp:core/test-block -->",
    );
    let blocks = parse(doc, &registry, &options);

    assert!(blocks[0].is_valid);
    assert!(!blocks[1].is_valid);
    assert_eq!(blocks[1].raw_content, "<div>Ribs</div>");
}

#[test]
fn test_parse_is_shareable_across_threads() {
    let registry = registry();
    let options = Options::default();
    let doc = "<!-- wp:core/test-block align:left --><p>Ribs</p><!-- /wp:core/test-block -->";
    let expected = parse(doc, &registry, &options);

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| parse(doc, &registry, &options)))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}
