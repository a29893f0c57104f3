use crate::{
    stmt::{Type, Value},
    Result,
};

use indexmap::IndexMap;
use std::sync::Arc;

/// A target type that can be materialized from query result rows.
///
/// The `Default` bound is the zero-argument constructor: one fresh instance
/// is created per result row and mutated once per mapped column.
pub trait Model: Default + Sized + 'static {
    /// Declare the type's fields and mutators into `fields`.
    ///
    /// Registration order carries the shadowing contract: embed ancestor
    /// types first (via [`FieldRegistry::embed`]), then declare the type's
    /// own fields. A later declaration under the same name overwrites an
    /// earlier one, so the declaration nearest to the leaf type wins.
    fn register(fields: &mut FieldRegistry<Self>);
}

pub(crate) type SetFn<M> = Arc<dyn Fn(&mut M, Value) -> Result<()> + Send + Sync>;

pub(crate) struct Mutator<M> {
    pub(crate) name: String,
    pub(crate) param_ty: Type,
    pub(crate) set: SetFn<M>,
}

/// Collects a model's declared fields and candidate mutators.
///
/// Mirrors what runtime introspection would discover: the set of fields
/// found anywhere in the type's ancestor chain, and the set of single-value
/// mutator methods. Which mutators actually resolve against which fields is
/// decided later, by [`TypeDescriptor::resolve`].
///
/// [`TypeDescriptor::resolve`]: crate::TypeDescriptor::resolve
pub struct FieldRegistry<M> {
    pub(crate) fields: IndexMap<String, Type>,
    pub(crate) mutators: Vec<Mutator<M>>,
}

impl<M: Model> FieldRegistry<M> {
    pub(crate) fn new() -> Self {
        Self {
            fields: IndexMap::new(),
            mutators: Vec::new(),
        }
    }

    /// Declare a field with its static type.
    pub fn field(&mut self, name: impl Into<String>, ty: Type) -> &mut Self {
        self.fields.insert(name.into(), ty);
        self
    }

    /// Declare a candidate mutator under the `set`-prefixed naming
    /// convention, e.g. `"setUserId"`.
    ///
    /// The setter takes exactly one value and returns nothing, which carries
    /// the "one parameter, void return" part of the mutator contract in its
    /// signature. Whether the mutator resolves is decided at descriptor
    /// build time: its name must parse under the convention and a same-named
    /// field with the identical declared type must exist.
    pub fn mutator(
        &mut self,
        name: impl Into<String>,
        param_ty: Type,
        set: impl Fn(&mut M, Value) -> Result<()> + Send + Sync + 'static,
    ) -> &mut Self {
        self.mutators.push(Mutator {
            name: name.into(),
            param_ty,
            set: Arc::new(set),
        });
        self
    }

    /// Replay an embedded base type's registrations through a projection,
    /// modelling the ancestor chain.
    ///
    /// Call this before declaring the embedding type's own fields: a leaf
    /// declaration under the same name then overwrites the ancestor's.
    pub fn embed<B: Model>(&mut self, project: fn(&mut M) -> &mut B) -> &mut Self {
        let mut base = FieldRegistry::<B>::new();
        B::register(&mut base);

        for (name, ty) in base.fields {
            self.fields.insert(name, ty);
        }

        for mutator in base.mutators {
            let set = mutator.set;
            self.mutators.push(Mutator {
                name: mutator.name,
                param_ty: mutator.param_ty,
                set: Arc::new(move |obj, value| set(project(obj), value)),
            });
        }

        self
    }
}
