mod common;

use jar_inspector::{
    analysis::{Analyzer, Resource},
    report::{ReportOptions, write_json},
};
use serde_json::Value;

fn report(resources: Vec<Resource>, options: ReportOptions) -> Value {
    let analysis = Analyzer::default().analyze(resources);
    let mut out = Vec::new();
    write_json(&analysis, &mut out, options).unwrap();
    serde_json::from_slice(&out).unwrap()
}

fn resources() -> Vec<Resource> {
    let mut truncated = common::holder_class(52, "com/example/Cut");
    truncated.truncate(truncated.len() - 3);
    vec![
        Resource::new("Holder.class", common::holder_class(52, "com/example/Holder").into()),
        Resource::new("Preview.class", common::ClassFileBuilder::new(65, "Preview").minor(0xFFFF).build().into()),
        Resource::new("Cut.class", truncated.into()),
        Resource::new("readme.class", b"hello".to_vec().into()),
    ]
}

#[test]
fn meta_section() {
    let json = report(resources(), ReportOptions::default());
    let meta = &json["meta"];
    assert_eq!(meta["status"], "ERROR");
    assert!(meta["message"].as_str().unwrap().starts_with("Cut.class: "));
    assert_eq!(meta["found_versions"]["1.8"], 2);
    assert_eq!(meta["found_versions"]["21"], 1);
}

#[test]
fn resource_entries() {
    let json = report(resources(), ReportOptions::default());
    let resources = json["resources"].as_array().unwrap();
    assert_eq!(resources.len(), 4);

    let holder = &resources[0];
    assert_eq!(holder["name"], "Holder.class");
    assert_eq!(holder["compiled_version"], "1.8");
    assert_eq!(holder["valid"], true);
    assert_eq!(holder["access_flags"], serde_json::json!(["PUBLIC", "SUPER"]));
    assert_eq!(
        holder["referenced_classes"],
        serde_json::json!([
            "com/example/Holder",
            "java/lang/Integer",
            "java/lang/Object",
            "java/util/List"
        ])
    );
    assert!(holder.get("constant_pool").is_none());
    assert!(holder.get("error").is_none());

    let cut = &resources[2];
    assert_eq!(cut["valid"], true);
    assert_eq!(cut["referenced_classes"], serde_json::json!([]));
    assert!(cut["error"].as_str().unwrap().contains("Unexpected end of input"));

    let junk = &resources[3];
    assert_eq!(junk["valid"], false);
    assert_eq!(junk["compiled_version"], Value::Null);
}

#[test]
fn constant_pool_section() {
    let options = ReportOptions {
        include_constant_pool: true,
    };
    let json = report(resources(), options);
    let pool = json["resources"][0]["constant_pool"].as_array().unwrap();
    assert!(!pool.is_empty());
    // Kept even though the class body is truncated.
    assert!(json["resources"][2]["constant_pool"].is_array());
    assert!(json["resources"][3].get("constant_pool").is_none());
}
