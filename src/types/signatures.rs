//! Extraction of class names from descriptors and generic signatures.
//!
//! The grammar accepted here is the union of field descriptors, method descriptors and the
//! class, method and field signatures of the JVM:
//! ```text
//! Signature        := TypeParameters? ( MethodPart | JavaType+ | 'V' )
//! TypeParameters   := '<' ( Identifier ':' Reference? ( ':' Reference )* )+ '>'
//! MethodPart       := '(' JavaType* ')' ( JavaType | 'V' ) ( '^' Reference )*
//! JavaType         := 'B' | 'C' | 'D' | 'F' | 'I' | 'J' | 'S' | 'Z' | Reference
//! Reference        := ClassType | 'T' Identifier ';' | '[' JavaType
//! ClassType        := 'L' Name TypeArguments? ( '.' Identifier TypeArguments? )* ';'
//! TypeArguments    := '<' ( '*' | ( '+' | '-' )? Reference )+ '>'
//! ```
//!
//! See the [JVM Specification §4.7.9.1](https://docs.oracle.com/javase/specs/jvms/se21/html/jvms-4.html#jvms-4.7.9.1) for more information.

use crate::jvm::references::ReferencedClasses;

use super::PrimitiveType;

/// Decodes a descriptor or signature and adds every class it mentions to `references`.
///
/// Nested classes written as `Outer<...>.Inner` are recorded as both `Outer` and
/// `Outer$Inner`. Type variables, primitive types and wildcards contribute nothing.
/// Input that does not follow the grammar leaves `references` unchanged.
///
/// Returns `true` if the input was well-formed.
pub fn collect_referenced_classes(input: &str, references: &mut ReferencedClasses) -> bool {
    let mut parser = SignatureParser {
        input,
        position: 0,
        found: ReferencedClasses::new(),
    };
    match parser.signature() {
        Some(()) if parser.is_at_end() => {
            references.union_with(parser.found);
            true
        }
        _ => false,
    }
}

struct SignatureParser<'a> {
    input: &'a str,
    position: usize,
    found: ReferencedClasses,
}

impl<'a> SignatureParser<'a> {
    fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.position).copied()
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn advance(&mut self) -> Option<u8> {
        let next = self.peek()?;
        self.position += 1;
        Some(next)
    }

    fn expect(&mut self, expected: u8) -> Option<()> {
        (self.advance()? == expected).then_some(())
    }

    /// Consumes the longest non-empty run of characters that are not in `delimiters`.
    fn identifier(&mut self, delimiters: &[u8]) -> Option<&'a str> {
        let start = self.position;
        let length = self.input.as_bytes()[start..]
            .iter()
            .take_while(|it| !delimiters.contains(it))
            .count();
        if length == 0 {
            return None;
        }
        self.position += length;
        self.input.get(start..self.position)
    }

    fn signature(&mut self) -> Option<()> {
        if self.peek() == Some(b'<') {
            self.type_parameters()?;
        }
        match self.peek()? {
            b'(' => self.method_part(),
            b'V' => {
                self.advance();
                Some(())
            }
            _ => {
                while !self.is_at_end() {
                    self.java_type()?;
                }
                Some(())
            }
        }
    }

    fn type_parameters(&mut self) -> Option<()> {
        self.expect(b'<')?;
        loop {
            self.identifier(b":>")?;
            self.expect(b':')?;
            if matches!(self.peek(), Some(b'L' | b'T' | b'[')) {
                self.reference()?;
            }
            while self.peek() == Some(b':') {
                self.advance();
                self.reference()?;
            }
            if self.peek()? == b'>' {
                self.advance();
                return Some(());
            }
        }
    }

    fn method_part(&mut self) -> Option<()> {
        self.expect(b'(')?;
        while self.peek()? != b')' {
            self.java_type()?;
        }
        self.expect(b')')?;
        if self.peek()? == b'V' {
            self.advance();
        } else {
            self.java_type()?;
        }
        while self.peek() == Some(b'^') {
            self.advance();
            self.reference()?;
        }
        Some(())
    }

    fn java_type(&mut self) -> Option<()> {
        let next = self.peek()?;
        if PrimitiveType::try_from(char::from(next)).is_ok() {
            self.advance();
            Some(())
        } else {
            self.reference()
        }
    }

    fn reference(&mut self) -> Option<()> {
        match self.peek()? {
            b'L' => self.class_type(),
            b'T' => {
                self.advance();
                self.identifier(b";<>.:/[")?;
                self.expect(b';')
            }
            b'[' => {
                self.advance();
                self.java_type()
            }
            _ => None,
        }
    }

    fn class_type(&mut self) -> Option<()> {
        self.expect(b'L')?;
        let mut name = self.identifier(b";<>.:[")?.to_owned();
        loop {
            match self.advance()? {
                b'<' => self.type_arguments()?,
                b'.' => {
                    self.found.insert(name.as_str());
                    let inner = self.identifier(b";<>.:[/")?;
                    name = format!("{name}${inner}");
                }
                b';' => {
                    self.found.insert(name);
                    return Some(());
                }
                _ => return None,
            }
        }
    }

    /// Parses the arguments after the opening `<`.
    fn type_arguments(&mut self) -> Option<()> {
        loop {
            match self.peek()? {
                b'>' => {
                    self.advance();
                    return Some(());
                }
                b'*' => {
                    self.advance();
                }
                b'+' | b'-' => {
                    self.advance();
                    self.reference()?;
                }
                _ => self.reference()?,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::arb_class_name;
    use proptest::prelude::*;

    fn collect(input: &str) -> Vec<String> {
        let mut refs = ReferencedClasses::new();
        collect_referenced_classes(input, &mut refs);
        refs.into_iter().collect()
    }

    #[test]
    fn plain_descriptor() {
        assert_eq!(collect("Ljava/util/List;"), vec!["java/util/List"]);
    }

    #[test]
    fn single_type_argument() {
        assert_eq!(
            collect("Ljava/util/List<Ljava/lang/Integer;>;"),
            vec!["java/lang/Integer", "java/util/List"]
        );
    }

    #[test]
    fn nested_type_arguments() {
        assert_eq!(
            collect("Ljava/util/List<Ljava/util/Set<Ljava/util/Map<**>;>;>;"),
            vec!["java/util/List", "java/util/Map", "java/util/Set"]
        );
    }

    #[test]
    fn sibling_type_arguments() {
        assert_eq!(
            collect("Ljava/util/Map<Ljava/lang/String;Ljava/util/List<Ljava/lang/Long;>;>;"),
            vec![
                "java/lang/Long",
                "java/lang/String",
                "java/util/List",
                "java/util/Map"
            ]
        );
    }

    #[test]
    fn method_descriptor() {
        assert_eq!(
            collect("(I[Ljava/lang/String;J)Ljava/lang/Object;"),
            vec!["java/lang/Object", "java/lang/String"]
        );
        assert!(collect("()V").is_empty());
    }

    #[test]
    fn generic_method_signature() {
        assert_eq!(
            collect("<T:Ljava/lang/Object;E:Ljava/lang/Exception;>(TT;Ljava/util/function/Supplier<+TT;>;)TT;^TE;^Ljava/io/IOException;"),
            vec![
                "java/io/IOException",
                "java/lang/Exception",
                "java/lang/Object",
                "java/util/function/Supplier"
            ]
        );
    }

    #[test]
    fn class_signature_with_interface_bound() {
        assert_eq!(
            collect("<K::Ljava/lang/Comparable<TK;>;>Ljava/lang/Object;Ljava/io/Serializable;"),
            vec!["java/io/Serializable", "java/lang/Comparable", "java/lang/Object"]
        );
    }

    #[test]
    fn inner_class_of_generic() {
        assert_eq!(
            collect("Lcom/example/Outer<Ljava/lang/String;>.Inner<-Ljava/lang/Number;>;"),
            vec![
                "com/example/Outer",
                "com/example/Outer$Inner",
                "java/lang/Number",
                "java/lang/String"
            ]
        );
    }

    #[test]
    fn primitive_and_void() {
        let mut refs = ReferencedClasses::new();
        assert!(collect_referenced_classes("I", &mut refs));
        assert!(collect_referenced_classes("V", &mut refs));
        assert!(collect_referenced_classes("[[D", &mut refs));
        assert!(refs.is_empty());
    }

    #[test]
    fn malformed_input_is_noop() {
        let mut refs = ReferencedClasses::new();
        for input in [
            "",
            "Ljava/util/List",
            "Ljava/util/List<Ljava/lang/Integer;",
            "L;",
            "(Ljava/lang/String;",
            "Ljava/lang/String;X",
            "not a descriptor",
        ] {
            assert!(!collect_referenced_classes(input, &mut refs), "{input}");
        }
        assert!(refs.is_empty());
    }

    proptest! {
        #[test]
        fn any_plain_class_descriptor(name in arb_class_name(), dims in 0usize..4) {
            let descriptor = format!("{}L{name};", "[".repeat(dims));
            prop_assert_eq!(collect(&descriptor), vec![name]);
        }

        #[test]
        fn decoding_is_idempotent(names in prop::collection::vec(arb_class_name(), 1..5)) {
            let descriptor = format!(
                "({})V",
                names.iter().map(|it| format!("L{it};")).collect::<String>()
            );
            let mut first = ReferencedClasses::new();
            prop_assert!(collect_referenced_classes(&descriptor, &mut first));
            let mut second = first.clone();
            prop_assert!(collect_referenced_classes(&descriptor, &mut second));
            prop_assert_eq!(first, second);
        }
    }
}
