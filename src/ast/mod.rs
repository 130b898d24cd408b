pub mod pp;

use num_bigint::BigUint;
use pretty_trait::to_string;

use std::fmt;
use std::ops::{Deref, DerefMut};
use std::rc::Rc;

use pp::PrettyPrintable;

#[derive(PartialEq, Debug)]
pub struct Program(pub Vec<Definition>);

impl Deref for Program {
    type Target = Vec<Definition>;
    fn deref(&self) -> &Vec<Definition> {
        &self.0
    }
}

impl DerefMut for Program {
    fn deref_mut(&mut self) -> &mut Vec<Definition> {
        &mut self.0
    }
}

#[derive(PartialEq, Debug)]
pub enum Definition {
    Function(FunctionDefinition),
    Data(DataDefinition),
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Id(pub String);

impl From<String> for Id {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Id {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl Deref for Id {
    type Target = String;
    fn deref(&self) -> &String {
        &self.0
    }
}

impl DerefMut for Id {
    fn deref_mut(&mut self) -> &mut String {
        &mut self.0
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A function definition `name params = body;`. Multiple parameters denote a
/// curried function.
#[derive(PartialEq, Debug)]
pub struct FunctionDefinition {
    pub name: Id,
    pub params: Vec<Id>,
    pub body: Ast,
}

/// An algebraic data type `data Name = Ctor T1 T2 | Ctor2;`.
#[derive(PartialEq, Debug)]
pub struct DataDefinition {
    pub name: Id,
    pub constructors: Vec<DataConstructor>,
}

impl DataDefinition {
    /// The curried type of each constructor, ending in the defined type itself.
    pub fn constructor_signatures(&self) -> Vec<(Id, Type)> {
        let result = Type::Const(self.name.clone());

        self.constructors
            .iter()
            .map(|c| {
                let params = c.types.iter().map(Type::from_name).collect();
                (c.name.clone(), Type::function(params, result.clone()))
            })
            .collect()
    }
}

#[derive(PartialEq, Debug)]
pub struct DataConstructor {
    pub name: Id,
    pub types: Vec<Id>,
}

#[derive(PartialEq, Debug, Clone)]
pub enum Ast {
    Int(BigUint),
    /// Reference to a data constructor.
    TypeId(Id),
    VarId(Id),
    Add(Box<Ast>, Box<Ast>),
    Sub(Box<Ast>, Box<Ast>),
    Mul(Box<Ast>, Box<Ast>),
    Div(Box<Ast>, Box<Ast>),
    Case(Box<Ast>, Vec<Branch>),
    Application(Box<Ast>, Box<Ast>),
}

#[derive(PartialEq, Debug, Clone)]
pub struct Branch {
    pub pattern: Pattern,
    pub ast: Ast,
}

#[derive(PartialEq, Debug, Clone)]
pub enum Pattern {
    Constructor { constructor: Id, params: Vec<Id> },
    Var(Id),
}

pub type TypeVar = Id;

/// Type expressions. Subtrees are reference counted so that unification can
/// hand out the same expression from several bindings without copying it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Type {
    Var(TypeVar),
    Const(Id),
    Arrow(Rc<Type>, Rc<Type>),
}

impl Type {
    pub fn var(name: &str) -> Self {
        Type::Var(name.into())
    }

    pub fn constant(name: &str) -> Self {
        Type::Const(name.into())
    }

    pub fn arrow(domain: Type, codomain: Type) -> Self {
        Type::Arrow(Rc::new(domain), Rc::new(codomain))
    }

    /// Curried function type, `function([a, b], c)` is `a -> b -> c`.
    pub fn function(params: Vec<Type>, result: Type) -> Self {
        params
            .into_iter()
            .rev()
            .fold(result, |acc, param| Type::arrow(param, acc))
    }

    /// Capitalized names denote constants, anything else a type variable.
    pub fn from_name(name: &Id) -> Self {
        if name.starts_with(char::is_uppercase) {
            Type::Const(name.clone())
        } else {
            Type::Var(name.clone())
        }
    }
}

impl From<TypeVar> for Type {
    fn from(var: TypeVar) -> Self {
        Type::Var(var)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", to_string(&self.to_pretty(), None, 4))
    }
}
