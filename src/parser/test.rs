use super::*;

use crate::error::LexerErrorKind;

use indoc::indoc;

macro_rules! boxed_int (
    ($value:expr) => (
        Box::new(Ast::Int(u32::into($value)))
    )
);

macro_rules! boxed_var (
    ($name:expr) => (
        Box::new(Ast::VarId(Id::from($name)))
    )
);

fn parse_body(input: &str) -> Ast {
    let tokens: Vec<Token> = Scanner::new(input).unwrap().collect();
    let tokens = Tokens::new(&tokens, input);

    let (rest, ast) = ast_parser(tokens).unwrap();
    assert!(rest.is_empty(), "Unconsumed input: {:#?}", rest);

    ast
}

#[test]
fn test_parenthesized_precedence() {
    assert_eq!(
        parse_body("(2 + 6) / 4"),
        Ast::Div(
            Box::new(Ast::Add(boxed_int!(2), boxed_int!(6))),
            boxed_int!(4),
        )
    );
}

#[test]
fn test_left_associative_arithmetic() {
    assert_eq!(
        parse_body("1 - 2 - 3 * 4"),
        Ast::Sub(
            Box::new(Ast::Sub(boxed_int!(1), boxed_int!(2))),
            Box::new(Ast::Mul(boxed_int!(3), boxed_int!(4))),
        )
    );
}

#[test]
fn test_application_binds_tighter_than_operators() {
    assert_eq!(
        parse_body("f x y + g 1"),
        Ast::Add(
            Box::new(Ast::Application(
                Box::new(Ast::Application(boxed_var!("f"), boxed_var!("x"))),
                boxed_var!("y"),
            )),
            Box::new(Ast::Application(boxed_var!("g"), boxed_int!(1))),
        )
    );
}

#[test]
fn test_constructor_application() {
    assert_eq!(
        parse_body("Cons 1 Nil"),
        Ast::Application(
            Box::new(Ast::Application(
                Box::new(Ast::TypeId(Id::from("Cons"))),
                boxed_int!(1),
            )),
            Box::new(Ast::TypeId(Id::from("Nil"))),
        )
    );
}

#[test]
fn test_case_expression() {
    let expected = Ast::Case(
        boxed_var!("xs"),
        vec![
            Branch {
                pattern: Pattern::Constructor {
                    constructor: Id::from("Nil"),
                    params: vec![],
                },
                ast: Ast::Int(0u32.into()),
            },
            Branch {
                pattern: Pattern::Constructor {
                    constructor: Id::from("Cons"),
                    params: vec![Id::from("y"), Id::from("ys")],
                },
                ast: Ast::VarId(Id::from("y")),
            },
            Branch {
                pattern: Pattern::Var(Id::from("other")),
                ast: Ast::Int(1u32.into()),
            },
        ],
    );

    assert_eq!(
        parse_body("case xs of Nil -> 0; Cons y ys -> y; other -> 1 esac"),
        expected
    );
}

#[test]
fn test_case_as_argument() {
    let ast = parse_body("f case x of y -> y esac 2");

    match ast {
        Ast::Application(f, arg) => {
            assert_eq!(*arg, Ast::Int(2u32.into()));
            assert!(matches!(*f, Ast::Application(_, ref case) if matches!(**case, Ast::Case(..))));
        }
        _ => panic!("expected an application, got {:?}", ast),
    }
}

#[test]
fn test_program() {
    const PROGRAM: &str = indoc! {"
        data List = Nil | Cons Int List;

        // Number of elements.
        length xs = case xs of
            Nil -> 0;
            Cons y ys -> 1 + length ys
        esac;

        main = length (Cons 1 Nil);
    "};

    let program = parse_program(PROGRAM).unwrap();
    assert_eq!(program.len(), 3);

    assert_eq!(
        program[0],
        Definition::Data(DataDefinition {
            name: Id::from("List"),
            constructors: vec![
                DataConstructor {
                    name: Id::from("Nil"),
                    types: vec![],
                },
                DataConstructor {
                    name: Id::from("Cons"),
                    types: vec![Id::from("Int"), Id::from("List")],
                },
            ],
        })
    );

    match &program[1] {
        Definition::Function(f) => {
            assert_eq!(f.name, Id::from("length"));
            assert_eq!(f.params, vec![Id::from("xs")]);
            assert!(matches!(f.body, Ast::Case(..)));
        }
        d => panic!("expected a function definition, got {:?}", d),
    }

    match &program[2] {
        Definition::Function(f) => assert!(f.params.is_empty()),
        d => panic!("expected a function definition, got {:?}", d),
    }
}

#[test]
fn test_empty_program() {
    assert_eq!(parse_program("  // nothing here\n").unwrap(), Program(vec![]));
}

#[test]
fn test_missing_semicolon() {
    let result = parse_program("f x = x\ng y = y;");
    assert!(matches!(result, Err(Error::RemainingInput(_))));
}

#[test]
fn test_unterminated_case() {
    let result = parse_program("f x = case x of y -> y;");
    assert!(matches!(result, Err(Error::RemainingInput(_))));
}

#[test]
fn test_lexer_error_position() {
    match parse_program("f x =\n  x $ 1;") {
        Err(Error::LexerError { kind, line, column }) => {
            assert_eq!(kind, LexerErrorKind::IllegalToken(String::from("$")));
            assert_eq!((line, column), (2, 5));
        }
        r => panic!("expected a lexer error, got {:?}", r),
    }
}

#[test]
fn test_self_overlapping_comment_is_unclosed() {
    match parse_program("f = 1; /*/") {
        Err(Error::LexerError { kind, line, column }) => {
            assert_eq!(kind, LexerErrorKind::UnclosedMultiLineComment);
            assert_eq!((line, column), (1, 8));
        }
        r => panic!("expected a lexer error, got {:?}", r),
    }

    assert_eq!(parse_program("/*/ f = 1; */ g = 2;").unwrap().len(), 1);
}

#[test]
fn test_arrow_types_are_right_associative() {
    assert_eq!(
        parse_type("a -> Int -> b").unwrap(),
        Type::arrow(
            Type::var("a"),
            Type::arrow(Type::constant("Int"), Type::var("b"))
        )
    );
}

#[test]
fn test_parenthesized_domain_type() {
    assert_eq!(
        parse_type("(a -> b) -> List").unwrap(),
        Type::arrow(
            Type::arrow(Type::var("a"), Type::var("b")),
            Type::constant("List")
        )
    );
}

#[test]
fn test_trailing_type_input() {
    assert!(matches!(
        parse_type("a -> b )"),
        Err(Error::RemainingInput(_))
    ));
}

#[test]
fn test_incomplete_type() {
    assert!(matches!(parse_type("a ->"), Err(Error::RemainingInput(_))));
    assert!(matches!(parse_type(""), Err(Error::ParserError(_))));
}
