//! Assembles class files byte by byte for tests.

/// A class file under construction.
/// Constant pool entries are appended on demand and `Utf8`/`Class` entries are deduplicated.
#[derive(Debug, Clone)]
pub struct ClassFileBuilder {
    major: u16,
    minor: u16,
    constant_pool: Vec<u8>,
    next_index: u16,
    strings: Vec<(String, u16)>,
    classes: Vec<(String, u16)>,
    access_flags: u16,
    this_class: u16,
    super_class: u16,
    interfaces: Vec<u16>,
    fields: Vec<Vec<u8>>,
    methods: Vec<Vec<u8>>,
    attributes: Vec<Vec<u8>>,
}

impl ClassFileBuilder {
    /// Starts a public class `this_class` extending `java/lang/Object`.
    pub fn new(major: u16, this_class: &str) -> Self {
        let mut builder = Self {
            major,
            minor: 0,
            constant_pool: Vec::new(),
            next_index: 1,
            strings: Vec::new(),
            classes: Vec::new(),
            access_flags: 0x0021,
            this_class: 0,
            super_class: 0,
            interfaces: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            attributes: Vec::new(),
        };
        builder.this_class = builder.class(this_class);
        builder.super_class = builder.class("java/lang/Object");
        builder
    }

    pub fn minor(mut self, minor: u16) -> Self {
        self.minor = minor;
        self
    }

    pub fn access_flags(mut self, access_flags: u16) -> Self {
        self.access_flags = access_flags;
        self
    }

    /// Removes the superclass, as in `java/lang/Object`.
    pub fn no_super_class(mut self) -> Self {
        self.super_class = 0;
        self
    }

    pub fn interface(mut self, name: &str) -> Self {
        let index = self.class(name);
        self.interfaces.push(index);
        self
    }

    /// Appends a raw constant pool entry occupying `slots` indices.
    pub fn raw_constant(&mut self, bytes: &[u8], slots: u16) -> u16 {
        let index = self.next_index;
        self.constant_pool.extend_from_slice(bytes);
        self.next_index += slots;
        index
    }

    pub fn utf8(&mut self, value: &str) -> u16 {
        if let Some((_, index)) = self.strings.iter().find(|(it, _)| it == value) {
            return *index;
        }
        let encoded = cesu8::to_java_cesu8(value);
        let mut bytes = vec![1];
        bytes.extend_from_slice(&u16::try_from(encoded.len()).unwrap().to_be_bytes());
        bytes.extend_from_slice(&encoded);
        let index = self.raw_constant(&bytes, 1);
        self.strings.push((value.to_owned(), index));
        index
    }

    pub fn class(&mut self, name: &str) -> u16 {
        if let Some((_, index)) = self.classes.iter().find(|(it, _)| it == name) {
            return *index;
        }
        let name_index = self.utf8(name);
        let mut bytes = vec![7];
        bytes.extend_from_slice(&name_index.to_be_bytes());
        let index = self.raw_constant(&bytes, 1);
        self.classes.push((name.to_owned(), index));
        index
    }

    pub fn integer(&mut self, value: i32) -> u16 {
        let mut bytes = vec![3];
        bytes.extend_from_slice(&value.to_be_bytes());
        self.raw_constant(&bytes, 1)
    }

    pub fn long(&mut self, value: i64) -> u16 {
        let mut bytes = vec![5];
        bytes.extend_from_slice(&value.to_be_bytes());
        self.raw_constant(&bytes, 2)
    }

    pub fn double(&mut self, value: f64) -> u16 {
        let mut bytes = vec![6];
        bytes.extend_from_slice(&value.to_be_bytes());
        self.raw_constant(&bytes, 2)
    }

    pub fn string(&mut self, value: &str) -> u16 {
        let string_index = self.utf8(value);
        let mut bytes = vec![8];
        bytes.extend_from_slice(&string_index.to_be_bytes());
        self.raw_constant(&bytes, 1)
    }

    pub fn name_and_type(&mut self, name: &str, descriptor: &str) -> u16 {
        let name_index = self.utf8(name);
        let descriptor_index = self.utf8(descriptor);
        let mut bytes = vec![12];
        bytes.extend_from_slice(&name_index.to_be_bytes());
        bytes.extend_from_slice(&descriptor_index.to_be_bytes());
        self.raw_constant(&bytes, 1)
    }

    pub fn method_ref(&mut self, class: &str, name: &str, descriptor: &str) -> u16 {
        let class_index = self.class(class);
        let name_and_type_index = self.name_and_type(name, descriptor);
        let mut bytes = vec![10];
        bytes.extend_from_slice(&class_index.to_be_bytes());
        bytes.extend_from_slice(&name_and_type_index.to_be_bytes());
        self.raw_constant(&bytes, 1)
    }

    /// Encodes an attribute with the given body.
    pub fn attribute(&mut self, name: &str, body: &[u8]) -> Vec<u8> {
        let mut bytes = self.utf8(name).to_be_bytes().to_vec();
        bytes.extend_from_slice(&u32::try_from(body.len()).unwrap().to_be_bytes());
        bytes.extend_from_slice(body);
        bytes
    }

    /// Encodes a `Signature` attribute.
    pub fn signature(&mut self, signature: &str) -> Vec<u8> {
        let index = self.utf8(signature);
        self.attribute("Signature", &index.to_be_bytes())
    }

    /// Encodes a `Code` attribute without exception handlers.
    pub fn code(&mut self, max_stack: u16, max_locals: u16, code: &[u8], attributes: &[Vec<u8>]) -> Vec<u8> {
        let mut body = Vec::new();
        body.extend_from_slice(&max_stack.to_be_bytes());
        body.extend_from_slice(&max_locals.to_be_bytes());
        body.extend_from_slice(&u32::try_from(code.len()).unwrap().to_be_bytes());
        body.extend_from_slice(code);
        body.extend_from_slice(&0u16.to_be_bytes());
        push_table(&mut body, attributes);
        self.attribute("Code", &body)
    }

    pub fn field(mut self, access_flags: u16, name: &str, descriptor: &str, attributes: &[Vec<u8>]) -> Self {
        let member = self.member(access_flags, name, descriptor, attributes);
        self.fields.push(member);
        self
    }

    pub fn method(mut self, access_flags: u16, name: &str, descriptor: &str, attributes: &[Vec<u8>]) -> Self {
        let member = self.member(access_flags, name, descriptor, attributes);
        self.methods.push(member);
        self
    }

    pub fn class_attribute(mut self, attribute: Vec<u8>) -> Self {
        self.attributes.push(attribute);
        self
    }

    fn member(&mut self, access_flags: u16, name: &str, descriptor: &str, attributes: &[Vec<u8>]) -> Vec<u8> {
        let mut bytes = access_flags.to_be_bytes().to_vec();
        bytes.extend_from_slice(&self.utf8(name).to_be_bytes());
        bytes.extend_from_slice(&self.utf8(descriptor).to_be_bytes());
        push_table(&mut bytes, attributes);
        bytes
    }

    pub fn build(&self) -> Vec<u8> {
        let mut bytes = vec![0xCA, 0xFE, 0xBA, 0xBE];
        bytes.extend_from_slice(&self.minor.to_be_bytes());
        bytes.extend_from_slice(&self.major.to_be_bytes());
        bytes.extend_from_slice(&self.next_index.to_be_bytes());
        bytes.extend_from_slice(&self.constant_pool);
        bytes.extend_from_slice(&self.access_flags.to_be_bytes());
        bytes.extend_from_slice(&self.this_class.to_be_bytes());
        bytes.extend_from_slice(&self.super_class.to_be_bytes());
        bytes.extend_from_slice(&u16::try_from(self.interfaces.len()).unwrap().to_be_bytes());
        for interface in &self.interfaces {
            bytes.extend_from_slice(&interface.to_be_bytes());
        }
        push_table(&mut bytes, &self.fields);
        push_table(&mut bytes, &self.methods);
        push_table(&mut bytes, &self.attributes);
        bytes
    }
}

fn push_table(bytes: &mut Vec<u8>, items: &[Vec<u8>]) {
    bytes.extend_from_slice(&u16::try_from(items.len()).unwrap().to_be_bytes());
    for item in items {
        bytes.extend_from_slice(item);
    }
}
