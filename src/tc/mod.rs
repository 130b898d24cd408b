#[cfg(test)]
mod test;

use crate::ast::*;

use log::{debug, trace};
use thiserror::Error as ThisError;

use std::collections::HashMap;
use std::ops::{Deref, DerefMut};

#[derive(ThisError, Clone, Debug, PartialEq)]
pub enum UnificationError {
    #[error("Unification error: {0} and {1}")]
    Mismatch(Type, Type),

    #[error("Occur check cannot construct infinite type: {0} = {1}")]
    InfiniteType(TypeVar, Type),
}

/// Name of the `id`-th generated type variable: "a" to "z", then "aa", "ab"
/// and so on, like spreadsheet columns.
pub fn type_name(id: usize) -> String {
    let mut letters = vec![];
    let mut rest = Some(id);

    while let Some(n) = rest {
        letters.push(char::from(b'a' + (n % 26) as u8));
        rest = (n / 26).checked_sub(1);
    }

    letters.iter().rev().collect()
}

#[derive(Debug, Default)]
pub struct VarGenerator {
    counter: usize,
}

impl VarGenerator {
    pub fn new_var(&mut self) -> TypeVar {
        let var = type_name(self.counter);
        self.counter += 1;

        var.into()
    }
}

// Finite mapping from type variables to types.

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Subst(HashMap<TypeVar, Type>);

impl Deref for Subst {
    type Target = HashMap<TypeVar, Type>;
    fn deref(&self) -> &HashMap<TypeVar, Type> {
        &self.0
    }
}
impl DerefMut for Subst {
    fn deref_mut(&mut self) -> &mut HashMap<TypeVar, Type> {
        &mut self.0
    }
}

impl Subst {
    // Maps `var` to `ty`, replacing an earlier binding. Binding a variable
    // to itself is a no-op.
    fn bind(&mut self, var: TypeVar, ty: Type) {
        if let Type::Var(v) = &ty {
            if *v == var {
                return;
            }
        }

        debug!("Binding {} to {}", var, ty);
        self.insert(var, ty);
    }
}

/// Read access to variable bindings, shared by the committed substitution
/// and the bindings staged during a single unification.
trait Bindings {
    fn lookup(&self, var: &TypeVar) -> Option<&Type>;

    // Follows variable bindings until reaching a non-variable or an unbound
    // variable, which is returned separately.
    fn chase(&self, ty: &Type) -> (Type, Option<TypeVar>) {
        let mut current = ty.clone();

        loop {
            let next = match &current {
                Type::Var(v) => match self.lookup(v) {
                    Some(bound) => bound.clone(),
                    None => {
                        let var = v.clone();
                        return (current, Some(var));
                    }
                },
                _ => return (current, None),
            };

            current = next;
        }
    }

    // Dereferences every variable in `ty`, including those nested in arrows.
    fn resolve(&self, ty: &Type) -> Type {
        match self.chase(ty).0 {
            Type::Arrow(domain, codomain) => {
                Type::arrow(self.resolve(&domain), self.resolve(&codomain))
            }
            resolved => resolved,
        }
    }

    // Whether the unbound `var` appears in `ty` once bindings are followed.
    fn occurs(&self, var: &TypeVar, ty: &Type) -> bool {
        match self.chase(ty) {
            (_, Some(v)) => v == *var,
            (Type::Arrow(domain, codomain), None) => {
                self.occurs(var, &domain) || self.occurs(var, &codomain)
            }
            _ => false,
        }
    }
}

impl Bindings for Subst {
    fn lookup(&self, var: &TypeVar) -> Option<&Type> {
        self.get(var)
    }
}

/// Bindings made by one call to `Unifier::unify`, layered over the committed
/// substitution. Dropped without effect when unification fails.
struct Transaction<'a> {
    committed: &'a Subst,
    staged: Subst,
}

impl<'a> Bindings for Transaction<'a> {
    fn lookup(&self, var: &TypeVar) -> Option<&Type> {
        self.staged.get(var).or_else(|| self.committed.get(var))
    }
}

impl<'a> Transaction<'a> {
    fn new(committed: &'a Subst) -> Self {
        Self {
            committed,
            staged: Subst::default(),
        }
    }

    fn unify(&mut self, left: &Type, right: &Type) -> Result<(), UnificationError> {
        let (left, left_var) = self.chase(left);
        let (right, right_var) = self.chase(right);

        trace!("Unifying {} with {}", left, right);

        // Checked first, so that of two unbound variables the left one is bound.
        if let Some(var) = left_var {
            return self.bind(var, right);
        }
        if let Some(var) = right_var {
            return self.bind(var, left);
        }

        match (&left, &right) {
            (Type::Arrow(d1, c1), Type::Arrow(d2, c2)) => {
                self.unify(d1, d2)?;
                self.unify(c1, c2)
            }

            (Type::Const(n1), Type::Const(n2)) if n1 == n2 => Ok(()),

            _ => Err(UnificationError::Mismatch(
                self.resolve(&left),
                self.resolve(&right),
            )),
        }
    }

    fn bind(&mut self, var: TypeVar, ty: Type) -> Result<(), UnificationError> {
        let is_self = matches!(&ty, Type::Var(v) if *v == var);

        if !is_self && self.occurs(&var, &ty) {
            let ty = self.resolve(&ty);
            return Err(UnificationError::InfiniteType(var, ty));
        }

        self.staged.bind(var, ty);

        Ok(())
    }
}

/// Solves equality constraints between type expressions by growing a
/// substitution. Each instance owns its substitution and fresh name counter.
#[derive(Debug, Default)]
pub struct Unifier {
    generator: VarGenerator,
    subst: Subst,
}

impl Unifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `left` and `right` equal by binding type variables.
    ///
    /// Either all bindings needed are added to the substitution, or, on
    /// failure, none are.
    pub fn unify(&mut self, left: &Type, right: &Type) -> Result<(), UnificationError> {
        let mut transaction = Transaction::new(&self.subst);

        match transaction.unify(left, right) {
            Ok(()) => {
                let staged = transaction.staged;
                self.subst.extend(staged.0);

                Ok(())
            }
            Err(e) => {
                debug!(
                    "Discarding {} staged bindings: {}",
                    transaction.staged.len(),
                    e
                );

                Err(e)
            }
        }
    }

    /// The fully dereferenced form of `ty` under the current substitution.
    pub fn resolve(&self, ty: &Type) -> Type {
        self.subst.resolve(ty)
    }

    pub fn fresh_var(&mut self) -> Type {
        Type::Var(self.generator.new_var())
    }

    /// An arrow between two fresh variables, the domain generated first.
    pub fn fresh_arrow(&mut self) -> Type {
        let domain = self.fresh_var();
        let codomain = self.fresh_var();

        Type::arrow(domain, codomain)
    }

    pub fn substitution(&self) -> &Subst {
        &self.subst
    }
}
