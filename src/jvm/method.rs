//! Module for the APIs for the method in JVM.
use super::{access_flags::MethodAccessFlags, attribute::Attribute, code::Code};

/// A method declared in a class.
#[derive(Debug, Clone, PartialEq)]
pub struct Method {
    /// The access flags of the method.
    pub access_flags: MethodAccessFlags,
    /// The name of the method.
    pub name: String,
    /// The method descriptor, e.g. `(Ljava/lang/String;)V`.
    pub descriptor: String,
    /// The attributes of the method.
    pub attributes: Vec<Attribute>,
}

impl Method {
    /// The name of the constructors.
    pub const CONSTRUCTOR_NAME: &'static str = "<init>";

    /// Gets the body of the method, absent for `abstract` and `native` methods.
    #[must_use]
    pub fn code(&self) -> Option<&Code> {
        self.attributes.iter().find_map(|attr| match attr {
            Attribute::Code(code) => Some(code),
            _ => None,
        })
    }

    /// Gets the names of the checked exceptions the method declares.
    #[must_use]
    pub fn exceptions(&self) -> &[String] {
        self.attributes
            .iter()
            .find_map(|attr| match attr {
                Attribute::Exceptions(exceptions) => Some(exceptions.as_slice()),
                _ => None,
            })
            .unwrap_or_default()
    }

    /// Returns `true` if the method is a constructor.
    #[must_use]
    pub fn is_constructor(&self) -> bool {
        self.name == Self::CONSTRUCTOR_NAME
    }
}
