#[cfg(test)]
mod test;

use crate::ast::*;
use crate::error::Error;
use crate::scanner::Scanner;
use crate::token::*;

use log::debug;
use nom::branch::alt;
use nom::bytes::complete::take;
use nom::combinator::{map, opt, verify};
use nom::error::{self, ErrorKind};
use nom::multi::{fold_many0, many0, separated_list1};
use nom::sequence::{delimited, pair, preceded, separated_pair, tuple};
use nom::{Err, IResult};

macro_rules! token_parser (
    ($name:ident, $kind:expr) => (
        fn $name(tokens: Tokens) -> IResult<Tokens, Tokens> {
            verify(take(1usize), |t: &Tokens| {
                t[0].kind == $kind}
            )(tokens)
        }
    )
);

// Keywords
token_parser!(data_parser, TokenKind::Data);
token_parser!(case_parser, TokenKind::Case);
token_parser!(of_parser, TokenKind::Of);
token_parser!(esac_parser, TokenKind::Esac);

// Definitions
token_parser!(assignment_parser, TokenKind::Assignment);
token_parser!(bar_parser, TokenKind::Bar);
token_parser!(semicolon_parser, TokenKind::Semicolon);

// Branches and types
token_parser!(right_arrow_parser, TokenKind::RightArrow);

// Non-terminal Term
token_parser!(plus_parser, TokenKind::Plus);
token_parser!(minus_parser, TokenKind::Minus);

// Non-terminal Factor
token_parser!(times_parser, TokenKind::Times);
token_parser!(divide_parser, TokenKind::Divide);

// Non-terminal Atom
token_parser!(opening_paren_parser, TokenKind::OpeningParen);
token_parser!(closing_paren_parser, TokenKind::ClosingParen);

/// Scans, parses and checks that the whole input is a program.
pub fn parse_program(input: &str) -> Result<Program, Error> {
    let tokens = scan(input)?;
    let tokens = Tokens::new(&tokens, input);

    let (rest, program) = program_parser(tokens).map_err(describe_error)?;

    if !rest.is_empty() {
        return Err(Error::RemainingInput(format!(
            "Definition starting at {} could not be parsed",
            rest.describe_head()
        )));
    }

    debug!("Parsed {} definitions", program.len());

    Ok(program)
}

/// Scans and parses a single type expression like "(a -> Int) -> b".
pub fn parse_type(input: &str) -> Result<Type, Error> {
    let tokens = scan(input)?;
    let tokens = Tokens::new(&tokens, input);

    let (rest, ty) = type_parser(tokens).map_err(describe_error)?;

    if !rest.is_empty() {
        return Err(Error::RemainingInput(format!(
            "Unexpected {} after type",
            rest.describe_head()
        )));
    }

    Ok(ty)
}

/// Collects all tokens, failing on the first lexer error.
fn scan(input: &str) -> Result<Vec<Token>, Error> {
    let tokens: Vec<Token> = Scanner::new(input)?.collect();

    for t in &tokens {
        if let TokenKind::Error(kind) = &t.kind {
            return Err(Error::LexerError {
                kind: kind.clone(),
                line: t.line + 1,
                column: t.column + 1,
            });
        }
    }

    Ok(tokens)
}

fn describe_error(e: Err<error::Error<Tokens>>) -> Error {
    match e {
        Err::Incomplete(_) => Error::ParserError(String::from("Unexpected end of input")),
        Err::Error(e) | Err::Failure(e) => Error::ParserError(format!(
            "{:?} failed at {}",
            e.code,
            e.input.describe_head()
        )),
    }
}

pub fn program_parser(tokens: Tokens) -> IResult<Tokens, Program> {
    map(many0(definition_parser), Program)(tokens)
}

fn definition_parser(tokens: Tokens) -> IResult<Tokens, Definition> {
    alt((
        map(data_definition_parser, Definition::Data),
        map(function_definition_parser, Definition::Function),
    ))(tokens)
}

/// Parses a data definition, ie. "data" TypeId "=" ctor ("|" ctor)* ";".
fn data_definition_parser(tokens: Tokens) -> IResult<Tokens, DataDefinition> {
    map(
        tuple((
            data_parser,
            type_id_parser,
            assignment_parser,
            separated_list1(bar_parser, data_constructor_parser),
            semicolon_parser,
        )),
        |(_, name, _, constructors, _)| DataDefinition { name, constructors },
    )(tokens)
}

fn data_constructor_parser(tokens: Tokens) -> IResult<Tokens, DataConstructor> {
    map(
        pair(
            type_id_parser,
            many0(alt((type_id_parser, var_id_parser))),
        ),
        |(name, types)| DataConstructor { name, types },
    )(tokens)
}

/// Parses a function definition, ie. VarId VarId* "=" ast ";".
fn function_definition_parser(tokens: Tokens) -> IResult<Tokens, FunctionDefinition> {
    map(
        tuple((
            var_id_parser,
            many0(var_id_parser),
            assignment_parser,
            ast_parser,
            semicolon_parser,
        )),
        |(name, params, _, body, _)| FunctionDefinition { name, params, body },
    )(tokens)
}

pub fn ast_parser(tokens: Tokens) -> IResult<Tokens, Ast> {
    term_ast_parser(tokens)
}

fn term_ast_parser(tokens: Tokens) -> IResult<Tokens, Ast> {
    let (rest, start) = factor_ast_parser(tokens)?;

    fold_many0(
        pair(alt((plus_parser, minus_parser)), factor_ast_parser),
        move || start.clone(),
        |acc, (op, rhs)| {
            let acc = Box::new(acc);
            let rhs = Box::new(rhs);
            match op[0].kind {
                TokenKind::Plus => Ast::Add(acc, rhs),
                TokenKind::Minus => Ast::Sub(acc, rhs),
                _ => unreachable!(),
            }
        },
    )(rest)
}

fn factor_ast_parser(tokens: Tokens) -> IResult<Tokens, Ast> {
    let (rest, start) = application_ast_parser(tokens)?;

    fold_many0(
        pair(alt((times_parser, divide_parser)), application_ast_parser),
        move || start.clone(),
        |acc, (op, rhs)| {
            let acc = Box::new(acc);
            let rhs = Box::new(rhs);
            match op[0].kind {
                TokenKind::Times => Ast::Mul(acc, rhs),
                TokenKind::Divide => Ast::Div(acc, rhs),
                _ => unreachable!(),
            }
        },
    )(rest)
}

/// Juxtaposition, "f x y" is "(f x) y".
fn application_ast_parser(tokens: Tokens) -> IResult<Tokens, Ast> {
    let (rest, start) = atom_ast_parser(tokens)?;

    fold_many0(
        atom_ast_parser,
        move || start.clone(),
        |f, arg| Ast::Application(Box::new(f), Box::new(arg)),
    )(rest)
}

fn atom_ast_parser(tokens: Tokens) -> IResult<Tokens, Ast> {
    alt((
        // '(' Ast ')'
        delimited(opening_paren_parser, ast_parser, closing_paren_parser),
        // 'case' Ast 'of' Branches 'esac'
        case_ast_parser,
        map(var_id_parser, Ast::VarId),
        map(type_id_parser, Ast::TypeId),
        int_ast_parser,
    ))(tokens)
}

fn case_ast_parser(tokens: Tokens) -> IResult<Tokens, Ast> {
    map(
        tuple((
            case_parser,
            ast_parser,
            of_parser,
            separated_list1(semicolon_parser, branch_parser),
            esac_parser,
        )),
        |(_, of, _, branches, _)| Ast::Case(Box::new(of), branches),
    )(tokens)
}

fn branch_parser(tokens: Tokens) -> IResult<Tokens, Branch> {
    map(
        separated_pair(pattern_parser, right_arrow_parser, ast_parser),
        |(pattern, ast)| Branch { pattern, ast },
    )(tokens)
}

fn pattern_parser(tokens: Tokens) -> IResult<Tokens, Pattern> {
    alt((
        map(
            pair(type_id_parser, many0(var_id_parser)),
            |(constructor, params)| Pattern::Constructor {
                constructor,
                params,
            },
        ),
        map(var_id_parser, Pattern::Var),
    ))(tokens)
}

/// Parses a type expression. Arrows associate to the right.
pub fn type_parser(tokens: Tokens) -> IResult<Tokens, Type> {
    map(
        pair(
            base_type_parser,
            opt(preceded(right_arrow_parser, type_parser)),
        ),
        |(domain, codomain)| match codomain {
            Some(codomain) => Type::arrow(domain, codomain),
            None => domain,
        },
    )(tokens)
}

fn base_type_parser(tokens: Tokens) -> IResult<Tokens, Type> {
    alt((
        map(type_id_parser, Type::Const),
        map(var_id_parser, Type::Var),
        delimited(opening_paren_parser, type_parser, closing_paren_parser),
    ))(tokens)
}

fn var_id_parser(tokens: Tokens) -> IResult<Tokens, Id> {
    let (tail, mat) = take(1usize)(tokens)?;

    match mat[0].kind {
        TokenKind::VarId(i) => Ok((tail, Id(i.to_string()))),
        _ => Err(Err::Error(error::Error::new(tokens, ErrorKind::Tag))),
    }
}

fn type_id_parser(tokens: Tokens) -> IResult<Tokens, Id> {
    let (tail, mat) = take(1usize)(tokens)?;

    match mat[0].kind {
        TokenKind::TypeId(i) => Ok((tail, Id(i.to_string()))),
        _ => Err(Err::Error(error::Error::new(tokens, ErrorKind::Tag))),
    }
}

fn int_ast_parser(tokens: Tokens) -> IResult<Tokens, Ast> {
    let (tail, mat) = take(1usize)(tokens)?;

    match mat[0].kind {
        TokenKind::Integer(ref i) => Ok((tail, Ast::Int(i.clone()))),
        _ => Err(Err::Error(error::Error::new(tokens, ErrorKind::Tag))),
    }
}
