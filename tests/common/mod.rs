#![allow(dead_code)]

#[path = "../../src/tests/builder.rs"]
mod builder;

pub use builder::ClassFileBuilder;

/// A public class extending `java/lang/Object` with a generic `List<Integer>` field.
pub fn holder_class(major: u16, name: &str) -> Vec<u8> {
    let mut builder = ClassFileBuilder::new(major, name);
    let signature = builder.signature("Ljava/util/List<Ljava/lang/Integer;>;");
    builder
        .field(0x0002, "items", "Ljava/util/List;", &[signature])
        .build()
}
