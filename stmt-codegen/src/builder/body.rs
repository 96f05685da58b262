//! Anonymous subclass bodies.
//!
//! [`ObjectBuilder::extend`] hands over a [`ClassBodyBuilder`]. Members are
//! declared through [`MethodBuilder`]s, and [`ClassBodyBuilder::finish`]
//! gives the construction builder back with the body attached.

use stmtgen_meta::{TypeProvider, TypeRef};

use super::{
    CallParameters, Expression, ObjectBuilder, Scope, Value,
    value::{assert_assignable, coerce, coerce_to},
};
use crate::{Error, Result};

/// A statement inside a method body.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `return <expr>;`
    Return(Expression),
    /// `<expr>;`
    Expression(Expression),
    /// `<T> <name> = <expr>;` or `<T> <name>;`
    Declare {
        name: String,
        ty: TypeRef,
        value: Option<Expression>,
    },
}

impl Statement {
    /// Render against the enclosing method's scope.
    pub fn render(&self, scope: &Scope) -> Result<String> {
        Ok(match self {
            Self::Return(expr) => format!("return {};", expr.render(scope)?),
            Self::Expression(expr) => format!("{};", expr.render(scope)?),
            Self::Declare {
                name,
                ty,
                value: Some(value),
            } => format!("{} {} = {};", ty, name, value.render(scope)?),
            Self::Declare {
                name,
                ty,
                value: None,
            } => format!("{} {};", ty, name),
        })
    }
}

/// A finished method member.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodDef {
    name: String,
    returns: Option<TypeRef>,
    params: Vec<(String, TypeRef)>,
    statements: Vec<Statement>,
    scope: Scope,
}

impl MethodDef {
    /// Method name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return type, `None` for `void`.
    pub fn returns(&self) -> Option<&TypeRef> {
        self.returns.as_ref()
    }

    /// Render as `public <ret> <name>(<params>) {...}`.
    pub fn render(&self) -> Result<String> {
        let returns = self
            .returns
            .as_ref()
            .map_or_else(|| "void".to_string(), ToString::to_string);
        let params = self
            .params
            .iter()
            .map(|(name, ty)| format!("{} {}", ty, name))
            .collect::<Vec<_>>()
            .join(", ");

        let mut out = format!("public {} {}({}) {{\n", returns, self.name, params);
        for statement in &self.statements {
            out.push_str(&statement.render(&self.scope)?);
            out.push('\n');
        }
        out.push('}');
        Ok(out)
    }
}

/// The members of an anonymous subclass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassBody {
    members: Vec<MethodDef>,
}

impl ClassBody {
    /// Members in declaration order.
    pub fn members(&self) -> &[MethodDef] {
        &self.members
    }

    /// Render members separated by newlines.
    pub fn render(&self) -> Result<String> {
        let rendered = self
            .members
            .iter()
            .map(MethodDef::render)
            .collect::<Result<Vec<_>>>()?;
        Ok(rendered.join("\n"))
    }
}

/// Collects the members of an anonymous subclass.
#[derive(Debug)]
pub struct ClassBodyBuilder<'t> {
    builder: ObjectBuilder<'t>,
    args: CallParameters,
    members: Vec<MethodDef>,
}

impl<'t> ClassBodyBuilder<'t> {
    pub(crate) fn new(builder: ObjectBuilder<'t>, args: CallParameters) -> Self {
        Self {
            builder,
            args,
            members: Vec::new(),
        }
    }

    /// Override a method declared on the target type or one of its
    /// supertypes.
    ///
    /// Parameters take the declared types and are named `arg0`, `arg1`, ...
    pub fn public_overrides_method(self, name: &str) -> Result<MethodBuilder<'t>> {
        let Some(spec) = self.builder.types().find_method(self.builder.ty(), name) else {
            return Err(Error::undefined_method(self.builder.ty().clone(), name));
        };

        let mut method = MethodBuilder::new(self, spec.name, spec.returns);
        for (i, ty) in spec.params.into_iter().enumerate() {
            method = method.parameter(format!("arg{}", i), ty)?;
        }
        Ok(method)
    }

    /// Declare a new public method; `None` returns `void`.
    pub fn public_method(self, returns: Option<TypeRef>, name: impl Into<String>) -> MethodBuilder<'t> {
        MethodBuilder::new(self, name.into(), returns)
    }

    /// Attach the body and return the construction builder.
    pub fn finish(self) -> ObjectBuilder<'t> {
        let body = ClassBody {
            members: self.members,
        };
        self.builder.attach_body(self.args, body)
    }
}

/// Builds a single method of an anonymous subclass.
///
/// Parameters and local declarations live in the method's own scope.
#[derive(Debug)]
pub struct MethodBuilder<'t> {
    parent: ClassBodyBuilder<'t>,
    name: String,
    returns: Option<TypeRef>,
    params: Vec<(String, TypeRef)>,
    statements: Vec<Statement>,
    scope: Scope,
}

impl<'t> MethodBuilder<'t> {
    fn new(parent: ClassBodyBuilder<'t>, name: String, returns: Option<TypeRef>) -> Self {
        Self {
            parent,
            name,
            returns,
            params: Vec::new(),
            statements: Vec::new(),
            scope: Scope::new(),
        }
    }

    /// Add a parameter.
    pub fn parameter(mut self, name: impl Into<String>, ty: TypeRef) -> Result<Self> {
        let name = name.into();
        self.scope.declare(name.clone(), ty.clone(), None)?;
        self.params.push((name, ty));
        Ok(self)
    }

    /// The method's scope.
    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    /// Reference a parameter or local variable.
    pub fn reference(&self, name: &str) -> Result<Expression> {
        self.scope.reference(name)
    }

    /// Append a statement.
    ///
    /// Returned values must match the return type and declarations must
    /// match their declared type.
    pub fn append(mut self, statement: Statement) -> Result<Self> {
        let types = self.parent.builder.types();
        match &statement {
            Statement::Return(expr) => match &self.returns {
                Some(returns) => assert_assignable(types, &expr.ty(), returns)?,
                None => {
                    return Err(Error::invalid_state(
                        "return a value",
                        "the method is declared void",
                    ));
                }
            },
            Statement::Declare { name, ty, value } => {
                if let Some(value) = value {
                    assert_assignable(types, &value.ty(), ty)?;
                }
                self.scope.declare(name.clone(), ty.clone(), value.clone())?;
            }
            Statement::Expression(_) => {}
        }
        self.statements.push(statement);
        Ok(self)
    }

    /// Append `return <value>;`.
    pub fn return_value(self, value: impl Into<Value<'t>>) -> Result<Self> {
        let expr = coerce(self.parent.builder.types(), &self.scope, value.into())?;
        self.append(Statement::Return(expr))
    }

    /// Append `<T> <name> = <value>;` and bring `name` into scope.
    pub fn declare(
        self,
        name: impl Into<String>,
        ty: TypeRef,
        value: impl Into<Value<'t>>,
    ) -> Result<Self> {
        let expr = coerce_to(self.parent.builder.types(), &self.scope, value.into(), &ty)?;
        self.append(Statement::Declare {
            name: name.into(),
            ty,
            value: Some(expr),
        })
    }

    /// Close the method and return to the class body.
    pub fn finish(mut self) -> ClassBodyBuilder<'t> {
        self.parent.members.push(MethodDef {
            name: self.name,
            returns: self.returns,
            params: self.params,
            statements: self.statements,
            scope: self.scope,
        });
        self.parent
    }
}
