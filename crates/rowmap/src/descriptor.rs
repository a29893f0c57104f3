use crate::{
    model::{FieldRegistry, SetFn},
    stmt::{Type, Value},
    Model, Result,
};

use indexmap::IndexMap;

/// The resolved name-to-mutator table for one target type.
///
/// Scoped to a single query invocation: [`resolve`] rebuilds the table from
/// scratch on every call, trading repeated registration cost for
/// statelessness.
///
/// [`resolve`]: TypeDescriptor::resolve
pub struct TypeDescriptor<M: Model> {
    setters: IndexMap<String, FieldSetter<M>>,
}

struct FieldSetter<M> {
    ty: Type,
    set: SetFn<M>,
}

impl<M: Model> TypeDescriptor<M> {
    /// Resolve the descriptor for `M`.
    ///
    /// A mutator is kept iff its name parses under the naming convention,
    /// a field with exactly the derived name exists, and the field's
    /// declared type is identical to the mutator's parameter type. No
    /// widening or narrowing happens here; conversion is applied later, at
    /// value-assignment time. When two mutators resolve to the same field
    /// name, the one registered last wins (nearest to the leaf type).
    pub fn resolve() -> Self {
        let mut registry = FieldRegistry::new();
        M::register(&mut registry);

        let mut setters = IndexMap::new();

        for mutator in registry.mutators {
            // must be a setter
            let Some(field_name) = mutator_field_name(&mutator.name) else {
                continue;
            };

            // must have a matching field
            let Some(field_ty) = registry.fields.get(&field_name) else {
                continue;
            };

            // field type must match the setter's parameter exactly
            if *field_ty != mutator.param_ty {
                continue;
            }

            setters.insert(
                field_name,
                FieldSetter {
                    ty: mutator.param_ty,
                    set: mutator.set,
                },
            );
        }

        Self { setters }
    }

    /// Returns `true` if a mutator resolved for `field_name`.
    pub fn field_exists(&self, field_name: &str) -> bool {
        self.setters.contains_key(field_name)
    }

    /// Construct a fresh instance of the target type.
    pub fn new_object(&self) -> M {
        M::default()
    }

    /// Coerce `value` toward the field's declared type and invoke its
    /// mutator. A name with no resolved mutator is silently skipped.
    pub fn set_field_value(&self, field_name: &str, obj: &mut M, value: Value) -> Result<()> {
        let Some(setter) = self.setters.get(field_name) else {
            return Ok(());
        };
        (setter.set)(obj, setter.ty.coerce(value))
    }
}

/// Derives a field name from a mutator name.
///
/// Strips the `set` prefix and lower-cases the first remaining character;
/// rejects names with nothing after the prefix. Matching against field
/// names is exact-case, with no case-insensitive fallback.
pub(crate) fn mutator_field_name(name: &str) -> Option<String> {
    let rest = name.strip_prefix("set")?;
    let mut chars = rest.chars();
    let first = chars.next()?;

    let mut out = String::with_capacity(rest.len());
    out.extend(first.to_lowercase());
    out.push_str(chars.as_str());
    Some(out)
}

/// Normalizes a column label into the field naming convention.
///
/// Splits on underscores; the first segment is kept verbatim and each later
/// segment is appended with its first character upper-cased, so snake_case
/// labels normalize to the lower-camel convention mutators are named under.
/// A label with no underscores normalizes to itself; the function is
/// idempotent on already-normalized input.
pub fn normalize_column_label(label: &str) -> String {
    let mut parts = label.split('_');

    let mut out = String::with_capacity(label.len());
    out.push_str(parts.next().unwrap_or(""));

    for part in parts {
        let mut chars = part.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }

    out
}
