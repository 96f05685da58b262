//! Construction builder for `new T(...)`, arrays and anonymous subclasses.

use std::fmt;

use stmtgen_meta::{TypeDescriptor, TypeHandle, TypeProvider, TypeRef, best_matching_constructor};
use tracing::debug;

use super::{
    CallParameters, ClassBody, ClassBodyBuilder, Construct, ConstructKind, Expression, Scope,
    Value,
    value::{coerce, coerce_assignable, coerce_to},
};
use crate::{Error, Result};

/// Progress of a construction.
///
/// Transitions only move forward: parameters may be attached once, a body
/// may be added once, and `Finished` is terminal.
#[derive(Debug, Clone, PartialEq)]
enum BuildState {
    Unset,
    ParametersAttached(CallParameters),
    Subclassed {
        args: CallParameters,
        body: ClassBody,
    },
    Finished(ConstructKind),
}

/// Fluent builder for a single construction expression.
///
/// # Example
///
/// ```
/// use stmtgen_codegen::builder::ObjectBuilder;
/// use stmtgen_meta::{TypeProvider, TypeRegistry};
///
/// let types = TypeRegistry::with_builtins();
/// let string = types.descriptor("java.lang.String").unwrap();
///
/// let mut builder = ObjectBuilder::new_instance_of(&types, string)
///     .with_parameters(["hello"])
///     .unwrap();
/// assert_eq!(builder.render().unwrap(), "new java.lang.String(\"hello\")");
/// ```
pub struct ObjectBuilder<'t> {
    types: &'t dyn TypeProvider,
    ty: TypeRef,
    descriptor: Option<TypeHandle>,
    scope: Scope,
    state: BuildState,
}

impl fmt::Debug for ObjectBuilder<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectBuilder")
            .field("ty", &self.ty)
            .field("scope", &self.scope)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl<'t> ObjectBuilder<'t> {
    /// Start building an instance of `descriptor`.
    ///
    /// The scope is seeded with the type's fields.
    pub fn new_instance_of(types: &'t dyn TypeProvider, descriptor: TypeHandle) -> Self {
        let scope = Scope::with_fields(descriptor.fields());
        Self::instance_in(types, descriptor, scope)
    }

    /// Start building an instance in a scope that already holds variables.
    ///
    /// Fields not shadowed by an existing variable are added to the scope.
    pub(crate) fn instance_in(
        types: &'t dyn TypeProvider,
        descriptor: TypeHandle,
        mut scope: Scope,
    ) -> Self {
        for field in descriptor.fields() {
            scope.declare_if_absent(field.name.clone(), field.ty.clone());
        }
        Self {
            types,
            ty: descriptor.type_ref(),
            descriptor: Some(descriptor),
            scope,
            state: BuildState::Unset,
        }
    }

    /// Start building an unsized array, `new T[]`.
    pub fn new_array_of(types: &'t dyn TypeProvider, element: TypeRef) -> Self {
        Self::array(types, element, None)
    }

    /// Start building an array of fixed length, `new T[n]`.
    pub fn new_sized_array_of(types: &'t dyn TypeProvider, element: TypeRef, length: usize) -> Self {
        Self::array(types, element, Some(length))
    }

    fn array(types: &'t dyn TypeProvider, element: TypeRef, length: Option<usize>) -> Self {
        Self {
            types,
            ty: TypeRef::array(element.clone()),
            descriptor: None,
            scope: Scope::new(),
            state: BuildState::Finished(ConstructKind::Array {
                element,
                length,
                values: None,
            }),
        }
    }

    pub(crate) fn in_scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    /// Supply array initializer values.
    ///
    /// Only valid in array mode, and only once. Each value must be
    /// assignable to the element type.
    pub fn initialize<I, V>(mut self, values: I) -> Result<Self>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value<'t>>,
    {
        let (element, length) = match &self.state {
            BuildState::Finished(ConstructKind::Array {
                values: Some(_), ..
            }) => {
                return Err(Error::invalid_state(
                    "initialize",
                    "the array is already initialized",
                ));
            }
            BuildState::Finished(ConstructKind::Array {
                element, length, ..
            }) => (element.clone(), *length),
            _ => {
                return Err(Error::invalid_state(
                    "initialize",
                    "the builder does not construct an array",
                ));
            }
        };

        let values: Vec<Value<'t>> = values.into_iter().map(Into::into).collect();
        if let Some(length) = length {
            if values.len() > length {
                return Err(Error::too_many_values(length, values.len()));
            }
        }

        let exprs = values
            .into_iter()
            .map(|v| coerce_assignable(self.types, &self.scope, v, &element))
            .collect::<Result<Vec<_>>>()?;

        if let BuildState::Finished(ConstructKind::Array { values, .. }) = &mut self.state {
            *values = Some(exprs);
        }
        Ok(self)
    }

    /// Attach constructor arguments, coercing each value in order.
    pub fn with_parameters<I, V>(self, values: I) -> Result<Self>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value<'t>>,
    {
        self.ensure_unset()?;
        let params = CallParameters::from_values(self.types, &self.scope, values)?;
        self.attach(params)
    }

    /// Attach pre-built expressions as constructor arguments.
    pub fn with_expressions(self, expressions: impl IntoIterator<Item = Expression>) -> Result<Self> {
        self.ensure_unset()?;
        self.attach(CallParameters::from_expressions(expressions))
    }

    /// Attach a ready argument list.
    pub fn with_call_parameters(self, params: CallParameters) -> Result<Self> {
        self.ensure_unset()?;
        self.attach(params)
    }

    fn ensure_unset(&self) -> Result<()> {
        match self.state {
            BuildState::Unset => Ok(()),
            BuildState::Finished(ConstructKind::Array { .. }) => Err(Error::invalid_state(
                "attach parameters",
                "arrays take initializer values instead",
            )),
            _ => Err(Error::invalid_state(
                "attach parameters",
                "parameters are already attached",
            )),
        }
    }

    fn attach(mut self, params: CallParameters) -> Result<Self> {
        self.resolve_constructor(&params)?;
        self.state = BuildState::ParametersAttached(params);
        Ok(self)
    }

    fn resolve_constructor(&self, params: &CallParameters) -> Result<()> {
        let Some(descriptor) = &self.descriptor else {
            return Ok(());
        };
        if descriptor.is_interface() {
            debug!(ty = %self.ty, "interface target, skipping constructor matching");
            return Ok(());
        }

        let args = params.parameter_types();
        match best_matching_constructor(self.types, descriptor.as_ref(), &args) {
            Some(ctor) => {
                debug!(ty = %self.ty, params = ?ctor.params, "resolved constructor");
                Ok(())
            }
            None => Err(Error::undefined_constructor(self.ty.clone(), args)),
        }
    }

    /// Declare a variable in this builder's scope.
    pub fn add_variable(mut self, name: impl Into<String>, value: impl Into<Value<'t>>) -> Result<Self> {
        let expr = coerce(self.types, &self.scope, value.into())?;
        self.scope.declare(name, expr.ty(), Some(expr))?;
        Ok(self)
    }

    /// Declare a variable with an explicit type.
    ///
    /// Text values are parsed under the declared type's rules when it is a
    /// primitive or boxed primitive.
    pub fn add_typed_variable(
        mut self,
        name: impl Into<String>,
        ty: TypeRef,
        value: impl Into<Value<'t>>,
    ) -> Result<Self> {
        let expr = coerce_to(self.types, &self.scope, value.into(), &ty)?;
        self.scope.declare(name, ty, Some(expr))?;
        Ok(self)
    }

    /// Reference a variable of this builder's scope.
    pub fn reference(&self, name: &str) -> Result<Expression> {
        self.scope.reference(name)
    }

    /// The builder's scope.
    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    /// The constructed type; an array type in array mode.
    pub fn ty(&self) -> &TypeRef {
        &self.ty
    }

    pub(crate) fn types(&self) -> &'t dyn TypeProvider {
        self.types
    }

    /// Start an anonymous subclass body.
    ///
    /// Completes with zero parameters first if none were attached.
    pub fn extend(mut self) -> Result<ClassBodyBuilder<'t>> {
        let args = match std::mem::replace(&mut self.state, BuildState::Unset) {
            BuildState::Unset => {
                debug!(ty = %self.ty, "implicit completion before subclass body");
                let args = CallParameters::none();
                self.resolve_constructor(&args)?;
                args
            }
            BuildState::ParametersAttached(args) => args,
            BuildState::Subclassed { .. } => {
                return Err(Error::invalid_state("extend", "a class body is already attached"));
            }
            BuildState::Finished(_) => {
                return Err(Error::invalid_state("extend", "the construction is already finished"));
            }
        };
        Ok(ClassBodyBuilder::new(self, args))
    }

    pub(crate) fn attach_body(mut self, args: CallParameters, body: ClassBody) -> Self {
        self.state = BuildState::Subclassed { args, body };
        self
    }

    fn complete(&mut self) -> Result<()> {
        if matches!(self.state, BuildState::Unset) {
            debug!(ty = %self.ty, "implicit completion with no parameters");
            let args = CallParameters::none();
            self.resolve_constructor(&args)?;
            self.state = BuildState::ParametersAttached(args);
        }

        self.state = match std::mem::replace(&mut self.state, BuildState::Unset) {
            BuildState::ParametersAttached(args) => BuildState::Finished(ConstructKind::Instance {
                ty: self.ty.clone(),
                args,
                body: None,
            }),
            BuildState::Subclassed { args, body } => BuildState::Finished(ConstructKind::Instance {
                ty: self.ty.clone(),
                args,
                body: Some(body),
            }),
            other => other,
        };
        Ok(())
    }

    /// Complete the construction if needed and return its text.
    ///
    /// Calling this again returns the same text.
    pub fn render(&mut self) -> Result<String> {
        self.complete()?;
        match &self.state {
            BuildState::Finished(kind) => kind.render(&self.scope),
            _ => Err(Error::invalid_state("render", "the construction did not complete")),
        }
    }

    /// Complete the construction and return it as an expression.
    pub fn finish(mut self) -> Result<Expression> {
        self.complete()?;
        match self.state {
            BuildState::Finished(kind) => Ok(Construct::new(kind, self.scope).into()),
            _ => Err(Error::invalid_state("finish", "the construction did not complete")),
        }
    }
}

#[cfg(test)]
mod tests {
    use stmtgen_meta::{ClassSpec, TypeRegistry};

    use super::*;

    fn registry() -> TypeRegistry {
        TypeRegistry::with_builtins()
            .with(
                ClassSpec::class("com.example.Circle")
                    .field("radius", TypeRef::int())
                    .constructor([TypeRef::int()])
                    .constructor([TypeRef::string()]),
            )
            .with(ClassSpec::class("com.example.Empty"))
            .with(ClassSpec::class("com.example.Point").constructor([TypeRef::int(), TypeRef::int()]))
    }

    fn instance<'t>(types: &'t TypeRegistry, name: &str) -> ObjectBuilder<'t> {
        ObjectBuilder::new_instance_of(types, types.descriptor(name).unwrap())
    }

    #[test]
    fn test_implicit_completion() {
        let types = registry();
        let mut builder = instance(&types, "com.example.Empty");
        assert_eq!(builder.render().unwrap(), "new com.example.Empty()");
    }

    #[test]
    fn test_render_is_idempotent() {
        let types = registry();
        let mut builder = instance(&types, "com.example.Point")
            .with_parameters([1, 2])
            .unwrap();
        let first = builder.render().unwrap();
        assert_eq!(first, "new com.example.Point(1, 2)");
        assert_eq!(builder.render().unwrap(), first);
    }

    #[test]
    fn test_missing_constructor() {
        let types = registry();
        let err = instance(&types, "com.example.Point")
            .with_parameters([true])
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "no constructor com.example.Point(boolean) is defined"
        );

        let mut builder = instance(&types, "com.example.Point");
        assert!(matches!(
            *builder.render().unwrap_err(),
            Error::UndefinedConstructor { .. }
        ));
    }

    #[test]
    fn test_parameters_only_once() {
        let types = registry();
        let builder = instance(&types, "com.example.Circle")
            .with_parameters([1])
            .unwrap();
        let err = builder.with_parameters([2]).unwrap_err();
        assert!(matches!(*err, Error::InvalidBuildState { .. }));
    }

    #[test]
    fn test_no_parameters_after_render() {
        let types = registry();
        let mut builder = instance(&types, "com.example.Empty");
        builder.render().unwrap();
        assert!(builder.with_call_parameters(CallParameters::none()).is_err());
    }

    #[test]
    fn test_array_rejects_parameters() {
        let types = registry();
        let err = ObjectBuilder::new_array_of(&types, TypeRef::int())
            .with_parameters([1])
            .unwrap_err();
        assert!(matches!(*err, Error::InvalidBuildState { .. }));
    }

    #[test]
    fn test_initialize_requires_array() {
        let types = registry();
        let err = instance(&types, "com.example.Empty")
            .initialize([1])
            .unwrap_err();
        assert!(matches!(*err, Error::InvalidBuildState { .. }));
    }

    #[test]
    fn test_initialize_only_once() {
        let types = registry();
        let builder = ObjectBuilder::new_array_of(&types, TypeRef::int())
            .initialize([1])
            .unwrap();
        assert!(builder.initialize([2]).is_err());
    }

    #[test]
    fn test_array_forms() {
        let types = registry();

        let mut sized = ObjectBuilder::new_sized_array_of(&types, TypeRef::long(), 4);
        assert_eq!(sized.render().unwrap(), "new long[4]");
        assert_eq!(sized.ty(), &TypeRef::array(TypeRef::long()));

        let mut bare = ObjectBuilder::new_array_of(&types, TypeRef::string());
        assert_eq!(bare.render().unwrap(), "new java.lang.String[]");

        let mut listed = ObjectBuilder::new_array_of(&types, TypeRef::long())
            .initialize([1, 2, 3])
            .unwrap();
        assert_eq!(listed.render().unwrap(), "new long[] {\n1, 2, 3\n}");
    }

    #[test]
    fn test_fields_seed_scope() {
        let types = registry();
        let builder = instance(&types, "com.example.Circle");
        assert_eq!(builder.reference("radius").unwrap().ty(), TypeRef::int());

        let mut builder = builder.with_parameters([Value::var("radius")]).unwrap();
        assert_eq!(builder.render().unwrap(), "new com.example.Circle(radius)");
    }

    #[test]
    fn test_variables() {
        let types = registry();
        let builder = instance(&types, "com.example.Point")
            .add_variable("x", 3)
            .unwrap()
            .add_typed_variable("y", TypeRef::long(), "7")
            .unwrap();

        assert_eq!(builder.scope().resolve("x").unwrap().ty(), &TypeRef::int());
        let y = builder.scope().resolve("y").unwrap();
        assert_eq!(y.ty(), &TypeRef::long());
        assert_eq!(y.value().unwrap().render(builder.scope()).unwrap(), "7L");

        assert!(matches!(
            *builder.add_variable("x", 4).unwrap_err(),
            Error::DuplicateDeclaration { .. }
        ));
    }

    #[test]
    fn test_interface_skips_matching() {
        let types = registry();
        let mut builder = instance(&types, "java.lang.Runnable")
            .with_parameters([1])
            .unwrap();
        assert_eq!(builder.render().unwrap(), "new java.lang.Runnable(1)");
    }

    #[test]
    fn test_nested_builder_argument() {
        let types = registry();
        let inner = instance(&types, "com.example.Circle")
            .with_parameters([5])
            .unwrap();
        let mut outer = ObjectBuilder::new_array_of(&types, TypeRef::object())
            .initialize([Value::from(inner), Value::null()])
            .unwrap();
        assert_eq!(
            outer.render().unwrap(),
            "new java.lang.Object[] {\nnew com.example.Circle(5), null\n}"
        );
    }
}
