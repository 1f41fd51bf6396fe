mod common;

use common::ClassFileBuilder;
use jar_inspector::{
    jvm::{
        ClassVersion, ReferencedClasses,
        access_flags::{ClassAccessFlags, MethodAccessFlags},
        attribute::Attribute,
        constant_pool::{ConstantType, InfoValue},
        parsing::{ClassReader, Error, parse_class_body, parse_constant_pool, parse_header},
    },
    specification::Specifications,
};

struct Parsed {
    version: ClassVersion,
    class_file: jar_inspector::jvm::ClassFile,
    constant_pool: jar_inspector::jvm::ConstantPool,
    references: ReferencedClasses,
}

fn parse(bytes: &[u8]) -> Result<Parsed, Error> {
    let specifications = Specifications::default();
    let mut reader = ClassReader::new(bytes);
    let version = parse_header(&mut reader)?;
    let specification = specifications.for_version("17");
    let constant_pool = parse_constant_pool(&mut reader, specification)?;
    let mut references = ReferencedClasses::new();
    let class_file = parse_class_body(
        &mut reader,
        version,
        &constant_pool,
        specification,
        &mut references,
    )?;
    Ok(Parsed {
        version,
        class_file,
        constant_pool,
        references,
    })
}

fn service_class() -> Vec<u8> {
    let mut b = ClassFileBuilder::new(61, "com/example/Service");
    let println = b.method_ref("java/io/PrintStream", "println", "(Ljava/lang/String;)V");
    let [hi, lo] = println.to_be_bytes();
    let code = b.code(2, 2, &[0x2B, 0xB6, hi, lo, 0xB1], &[]);
    let class_signature =
        b.signature("<T::Ljava/lang/Comparable<TT;>;>Ljava/lang/Object;Ljava/util/function/Supplier<TT;>;");
    b.interface("java/util/function/Supplier")
        .field(0x0012, "cache", "Ljava/util/Map;", &[])
        .method(0x0001, "log", "(Ljava/lang/String;)V", &[code])
        .method(0x0401, "get", "()Ljava/lang/Object;", &[])
        .class_attribute(class_signature)
        .build()
}

#[test]
fn parse_staged() {
    let parsed = parse(&service_class()).unwrap();
    assert_eq!(parsed.version, ClassVersion::new(61, 0));
    assert!(!parsed.version.is_preview_enabled());

    let class_file = &parsed.class_file;
    assert_eq!(
        class_file.access_flags,
        ClassAccessFlags::PUBLIC | ClassAccessFlags::SUPER
    );
    assert_eq!(class_file.this_class, "com/example/Service");
    assert_eq!(class_file.interfaces, ["java/util/function/Supplier"]);
    assert_eq!(class_file.fields[0].name, "cache");
    assert_eq!(class_file.methods.len(), 2);

    let get = class_file.get_method("get", "()Ljava/lang/Object;").unwrap();
    assert!(get.access_flags.contains(MethodAccessFlags::ABSTRACT));
    assert!(get.code().is_none());

    let log = class_file.get_method("log", "(Ljava/lang/String;)V").unwrap();
    let code = log.code().unwrap();
    let instructions: Vec<_> = code.instructions.iter().map(ToString::to_string).collect();
    assert_eq!(instructions.len(), 3);
    assert_eq!(code.instructions[1].mnemonic, "invokevirtual");
    assert_eq!(code.instructions[2].offset, 4);

    assert!(matches!(class_file.attributes[0], Attribute::Signature(_)));
}

#[test]
fn references_from_descriptors_and_signatures() {
    let parsed = parse(&service_class()).unwrap();
    let references: Vec<_> = parsed.references.iter().collect();
    assert_eq!(
        references,
        [
            "java/lang/Comparable",
            "java/lang/Object",
            "java/lang/String",
            "java/util/Map",
            "java/util/function/Supplier",
        ]
    );
}

#[test]
fn constant_pool_entries() {
    let parsed = parse(&service_class()).unwrap();
    let constant_pool = &parsed.constant_pool;
    let first = constant_pool.iter().next().unwrap();
    assert_eq!(first.pool_index, 1);
    assert_eq!(first.constant_type, ConstantType::Utf8);
    assert_eq!(
        first.info[0].value,
        InfoValue::String("com/example/Service".to_owned())
    );
    assert!(
        constant_pool
            .iter()
            .any(|it| it.constant_type == ConstantType::MethodRef)
    );
}

#[test]
fn not_a_class_file() {
    let err = parse(b"PK\x03\x04not a class").err().unwrap();
    assert!(matches!(err, Error::InvalidMagicNumber(0x504B_0304)));
}

#[test]
fn truncated_anywhere() {
    let bytes = service_class();
    for len in [0, 3, 7, 9, 20, bytes.len() / 2, bytes.len() - 1] {
        let err = parse(&bytes[..len]).err().unwrap();
        assert!(
            matches!(err, Error::TruncatedInput { offset } if offset == len as u64),
            "{len}: {err}"
        );
    }
}
