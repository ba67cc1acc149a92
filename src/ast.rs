// program ::= statement*
// statement ::= declaration | if | assignment
// declaration ::= ('int' | 'float') ID ['=' expr] ';'
// assignment ::= ID '=' expr ';'
// if ::= 'if' '(' expr ')' '{' statement* '}'
// expr ::= expr '==' expr
//        | expr ('+' | '-') expr
//        | expr ('*' | '/') expr
//        | '(' expr ')'
//        | ID
//        | number

// Precedence (binds tighter further down)
//
// ==
// + -
// * /

/// A top-level or if-body statement.
#[derive(Debug, PartialEq)]
pub enum Stmt {
    Declaration {
        ty: TypeName,
        name: String,
        initializer: Option<Expr>,
    },
    Assignment {
        target: String,
        value: Expr,
    },
    If {
        condition: Expr,
        body: Vec<Stmt>,
    },
}

#[derive(Debug, PartialEq)]
pub enum Expr {
    Number(Number),
    Identifier(String),
    Binary {
        op: BinaryOperator,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
}

/// A numeric literal keeps the integer/float distinction of its lexeme: no
/// decimal point means an integer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

/// The reserved type names of the language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeName {
    Int,
    Float,
}

impl TypeName {
    /// Reserved type names are ordinary identifier tokens; the parser picks
    /// them out by lexeme.
    pub fn from_lexeme(lexeme: &str) -> Option<TypeName> {
        match lexeme {
            "int" => Some(TypeName::Int),
            "float" => Some(TypeName::Float),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TypeName::Int => "int",
            TypeName::Float => "float",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Eq,
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOperator {
    /// Higher binds tighter. Equality is the loosest operator.
    pub fn precedence(self) -> u8 {
        match self {
            BinaryOperator::Eq => 0,
            BinaryOperator::Add | BinaryOperator::Sub => 1,
            BinaryOperator::Mul | BinaryOperator::Div => 2,
        }
    }
}

/// The binary operator lexemes. The assignment `=` shares a token kind with
/// the arithmetic operators but is deliberately absent here.
pub static BINARY_OPERATORS: phf::Map<&'static str, BinaryOperator> = phf::phf_map! {
    "==" => BinaryOperator::Eq,
    "+" => BinaryOperator::Add,
    "-" => BinaryOperator::Sub,
    "*" => BinaryOperator::Mul,
    "/" => BinaryOperator::Div,
};
