#![allow(non_snake_case)]

use fl_compiler::ast::pp::PrettyPrintable;
use fl_compiler::ast::{Definition, Type};
use fl_compiler::parser::parse_program;
use fl_compiler::tc::Unifier;

use pretty_trait::to_string;

// Primes every type variable, so that written field types never share a name
// with generated ones.
fn rename_apart(ty: &Type) -> Type {
    match ty {
        Type::Var(v) => Type::var(&format!("{}'", v)),
        Type::Const(_) => ty.clone(),
        Type::Arrow(domain, codomain) => Type::arrow(rename_apart(domain), rename_apart(codomain)),
    }
}

include!(concat!(env!("OUT_DIR"), "/tests_gen.rs"));
