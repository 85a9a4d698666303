//! # Synthesized debug representations
//! Builds a `TypeName(name=value, ...)` debug representation from an
//! explicit declaration of a type's constructor parameters and its
//! same-named accessors.
//!
//! A type opts in by owning a `ReprSlot` (normally a `static`) and applying
//! a `Definition` to it, either eagerly with `auto_repr` or lazily with
//! `ReprSlot::get_or_apply`.
//!
//! # Example
//! ```rust
//! use geoposition::repr::{auto_repr, Definition, ReprSlot};
//!
//! struct Size {
//!     width: u32,
//!     height: u32,
//! }
//!
//! impl Size {
//!     fn width(&self) -> u32 {
//!         self.width
//!     }
//!
//!     fn height(&self) -> u32 {
//!         self.height
//!     }
//! }
//!
//! static SIZE_REPR: ReprSlot<Size> = ReprSlot::new();
//!
//! let definition = Definition::<Size>::new("Size")
//!     .parameters(&["width", "height"])
//!     .accessor("width", |size| Box::new(size.width()))
//!     .accessor("height", |size| Box::new(size.height()));
//! let repr = auto_repr(&SIZE_REPR, definition).unwrap();
//!
//! let size = Size { width: 3, height: 4 };
//! assert_eq!(repr.render(&size), "Size(width=3, height=4)");
//!
//! // The slot can only be filled once.
//! let again = Definition::new("Size").parameters(&[]);
//! assert!(auto_repr(&SIZE_REPR, again).is_err());
//! ```

use crate::err::DefinitionError;
use std::collections::HashSet;
use std::fmt;
use std::sync::OnceLock;

/// Reads a named value out of an instance, in a form which can be rendered
/// with its `Debug` implementation.
pub type Accessor<T> = fn(&T) -> Box<dyn fmt::Debug>;

struct Field<T> {
    name: &'static str,
    accessor: Accessor<T>,
}

/// The declaration of a type which wants a synthesized debug
/// representation: its name, its ordered constructor parameters, and its
/// named accessors.
pub struct Definition<T> {
    type_name: &'static str,
    parameters: Option<Vec<&'static str>>,
    accessors: Vec<Field<T>>,
}

impl<T> Definition<T> {
    /// Start a declaration for the type called `type_name`.
    pub fn new(type_name: &'static str) -> Self {
        Self {
            type_name,
            parameters: None,
            accessors: Vec::new(),
        }
    }

    /// Declare the constructor parameters, in declaration order.
    pub fn parameters(mut self, names: &[&'static str]) -> Self {
        self.parameters = Some(names.to_vec());
        self
    }

    /// Declare a read-only accessor called `name`.
    pub fn accessor(mut self, name: &'static str, accessor: Accessor<T>) -> Self {
        self.accessors.push(Field { name, accessor });
        self
    }

    /// Validate this declaration and build the representation it describes.
    /// Accessors which do not correspond to a parameter are accepted but
    /// are not rendered.
    pub fn build(self) -> Result<AutoRepr<T>, DefinitionError> {
        let type_name = self.type_name;
        let parameters = self
            .parameters
            .ok_or(DefinitionError::NoConstructor { type_name })?;

        let mut seen = HashSet::new();
        for field in &self.accessors {
            if !seen.insert(field.name) {
                return Err(DefinitionError::DuplicateAccessor {
                    type_name,
                    name: field.name,
                });
            }
        }

        let mut accessors = self.accessors;
        let mut fields = Vec::with_capacity(parameters.len());
        for parameter in parameters {
            let index = accessors
                .iter()
                .position(|field| field.name == parameter)
                .ok_or(DefinitionError::MissingAccessor {
                    type_name,
                    parameter,
                })?;
            fields.push(accessors.swap_remove(index));
        }

        Ok(AutoRepr { type_name, fields })
    }
}

/// A validated, synthesized debug representation for values of type `T`.
pub struct AutoRepr<T> {
    type_name: &'static str,
    fields: Vec<Field<T>>,
}

impl<T> AutoRepr<T> {
    /// Return the name of the type this representation was declared for.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Return the names of the rendered fields, in order.
    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|field| field.name)
    }

    /// Write the representation of `value`, using `type_name` as the
    /// rendered type name. Types which share one representation across
    /// several named variants pass the variant's own name here.
    pub fn fmt_as(
        &self,
        type_name: &str,
        value: &T,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}(", type_name)?;
        for (index, field) in self.fields.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}={:?}", field.name, (field.accessor)(value))?;
        }
        f.write_str(")")
    }

    /// Return the representation of `value` under the declared type name.
    pub fn render(&self, value: &T) -> String {
        self.render_as(self.type_name, value)
    }

    /// Return the representation of `value` under `type_name`.
    pub fn render_as(&self, type_name: &str, value: &T) -> String {
        Rendered {
            repr: self,
            type_name,
            value,
        }
        .to_string()
    }
}

impl<T> fmt::Debug for AutoRepr<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AutoRepr")
            .field("type_name", &self.type_name)
            .field("fields", &self.field_names().collect::<Vec<_>>())
            .finish()
    }
}

struct Rendered<'a, T> {
    repr: &'a AutoRepr<T>,
    type_name: &'a str,
    value: &'a T,
}

impl<T> fmt::Display for Rendered<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.repr.fmt_as(self.type_name, self.value, f)
    }
}

/// The place a type keeps its synthesized debug representation. A slot is
/// filled at most once.
pub struct ReprSlot<T> {
    inner: OnceLock<AutoRepr<T>>,
}

impl<T> ReprSlot<T> {
    /// Create an empty slot.
    pub const fn new() -> Self {
        Self {
            inner: OnceLock::new(),
        }
    }

    /// Return the installed representation, if any.
    pub fn get(&self) -> Option<&AutoRepr<T>> {
        self.inner.get()
    }

    /// Return the installed representation, applying the declaration
    /// returned by `define` if nothing is installed yet.
    ///
    /// # Panics
    /// Panics if the declaration is invalid. A malformed declaration is a
    /// defect in the type itself and the type cannot be rendered until it
    /// is fixed.
    pub fn get_or_apply<F>(&self, define: F) -> &AutoRepr<T>
    where
        F: FnOnce() -> Definition<T>,
    {
        self.inner.get_or_init(|| {
            let definition = define();
            let type_name = definition.type_name;
            match definition.build() {
                Ok(repr) => {
                    tracing::debug!(
                        type_name,
                        "installed synthesized debug representation"
                    );
                    repr
                }
                Err(err) => panic!("{}", err),
            }
        })
    }
}

impl<T> Default for ReprSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for ReprSlot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ReprSlot").field(&self.inner.get()).finish()
    }
}

/// Validate `definition` and install the resulting representation into
/// `slot`, returning the installed representation.
///
/// Fails if the slot already holds a representation, if the definition
/// never declared its constructor parameters, or if a parameter has no
/// accessor of the same name.
pub fn auto_repr<T>(
    slot: &ReprSlot<T>,
    definition: Definition<T>,
) -> Result<&AutoRepr<T>, DefinitionError> {
    let type_name = definition.type_name;
    let already_defined = DefinitionError::AlreadyDefined { type_name };

    if slot.get().is_some() {
        return Err(already_defined);
    }

    let repr = definition.build()?;
    slot.inner.set(repr).map_err(|_| already_defined.clone())?;
    tracing::debug!(type_name, "installed synthesized debug representation");

    slot.get().ok_or(already_defined)
}
