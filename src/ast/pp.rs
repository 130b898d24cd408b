use super::*;

use pretty_trait::{delimited, Group, Indent, JoinExt, Pretty, Sep};

macro_rules! bin_ast (
    ($e1:expr, $e2:expr, $precedence:expr, $op:expr) => (
        // Operators are left associative, so only the right operand needs
        // parentheses at equal precedence.
        Box::new(child_ast($e1, $precedence).join($op).join(child_ast($e2, $precedence + 1)))
    )
);

fn precedence(ast: &Ast) -> i32 {
    match ast {
        Ast::Add(..) | Ast::Sub(..) => 1,
        Ast::Mul(..) | Ast::Div(..) => 2,
        Ast::Application(..) => 3,
        // A case expression is closed by "esac" and never needs parentheses.
        Ast::Int(..) | Ast::TypeId(..) | Ast::VarId(..) | Ast::Case(..) => 4,
    }
}

fn child_ast(ast: &Ast, min_precedence: i32) -> Box<dyn Pretty> {
    if precedence(ast) < min_precedence {
        Box::new(Group::new("(".join(ast.to_pretty()).join(")")))
    } else {
        ast.to_pretty()
    }
}

fn pretty_names(names: &[Id]) -> String {
    names.iter().fold(String::new(), |mut acc, name| {
        acc.push(' ');
        acc.push_str(name);
        acc
    })
}

pub trait PrettyPrintable {
    fn to_pretty(&self) -> Box<dyn Pretty>;
}

impl PrettyPrintable for Program {
    fn to_pretty(&self) -> Box<dyn Pretty> {
        Box::new(delimited(
            &"".join(Sep(1)).join(Sep(1)),
            self.iter().map(Definition::to_pretty),
        ))
    }
}

impl PrettyPrintable for Definition {
    fn to_pretty(&self) -> Box<dyn Pretty> {
        match self {
            Definition::Function(f) => f.to_pretty(),
            Definition::Data(d) => d.to_pretty(),
        }
    }
}

impl PrettyPrintable for FunctionDefinition {
    fn to_pretty(&self) -> Box<dyn Pretty> {
        Box::new(Group::new(
            self.name
                .to_pretty()
                .join(pretty_names(&self.params))
                .join(" =")
                .join(Indent(Sep(1).join(self.body.to_pretty())))
                .join(";"),
        ))
    }
}

impl PrettyPrintable for DataDefinition {
    fn to_pretty(&self) -> Box<dyn Pretty> {
        Box::new(Group::new(
            "data "
                .join(self.name.to_pretty())
                .join(" =")
                .join(Indent(Sep(1).join(delimited(
                    &" |".join(Sep(1)),
                    self.constructors.iter().map(DataConstructor::to_pretty),
                ))))
                .join(";"),
        ))
    }
}

impl PrettyPrintable for DataConstructor {
    fn to_pretty(&self) -> Box<dyn Pretty> {
        Box::new(self.name.to_pretty().join(pretty_names(&self.types)))
    }
}

impl PrettyPrintable for Id {
    fn to_pretty(&self) -> Box<dyn Pretty> {
        Box::new(self.0.to_string())
    }
}

impl PrettyPrintable for Ast {
    fn to_pretty(&self) -> Box<dyn Pretty> {
        let precedence = precedence(self);

        match self {
            Ast::Int(i) => Box::new(i.to_str_radix(10)),
            Ast::TypeId(id) | Ast::VarId(id) => id.to_pretty(),
            Ast::Add(e1, e2) => bin_ast!(e1, e2, precedence, " + "),
            Ast::Sub(e1, e2) => bin_ast!(e1, e2, precedence, " - "),
            Ast::Mul(e1, e2) => bin_ast!(e1, e2, precedence, " * "),
            Ast::Div(e1, e2) => bin_ast!(e1, e2, precedence, " / "),
            Ast::Application(f, arg) => Box::new(Group::new(
                child_ast(f, precedence)
                    .join(" ")
                    .join(child_ast(arg, precedence + 1)),
            )),
            Ast::Case(of, branches) => Box::new(Group::new(
                "case "
                    .join(of.to_pretty())
                    .join(" of")
                    .join(Indent(Sep(1).join(delimited(
                        &";".join(Sep(1)),
                        branches.iter().map(Branch::to_pretty),
                    ))))
                    .join(Sep(1))
                    .join("esac"),
            )),
        }
    }
}

impl PrettyPrintable for Branch {
    fn to_pretty(&self) -> Box<dyn Pretty> {
        Box::new(self.pattern.to_pretty().join(" -> ").join(self.ast.to_pretty()))
    }
}

impl PrettyPrintable for Pattern {
    fn to_pretty(&self) -> Box<dyn Pretty> {
        match self {
            Pattern::Constructor {
                constructor,
                params,
            } => Box::new(constructor.to_pretty().join(pretty_names(params))),
            Pattern::Var(id) => id.to_pretty(),
        }
    }
}

impl PrettyPrintable for Type {
    fn to_pretty(&self) -> Box<dyn Pretty> {
        match self {
            Type::Var(id) | Type::Const(id) => id.to_pretty(),
            Type::Arrow(domain, codomain) => {
                let domain: Box<dyn Pretty> = match &**domain {
                    Type::Arrow(..) => Box::new("(".join(domain.to_pretty()).join(")")),
                    _ => domain.to_pretty(),
                };

                Box::new(domain.join(" -> ").join(codomain.to_pretty()))
            }
        }
    }
}
