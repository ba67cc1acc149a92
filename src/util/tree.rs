use std::io::Write;

use crate::ast::{Expr, Number, Stmt};

const INDENT_WIDTH: usize = 2;

pub fn print_program_string(program: &[Stmt]) -> String {
    let mut buf = Vec::with_capacity(512);
    print_program(&mut buf, program).unwrap();
    String::from_utf8(buf).unwrap()
}

pub fn print_program(w: &mut impl Write, program: &[Stmt]) -> std::io::Result<()> {
    for stmt in program {
        print_stmt(w, 0, stmt)?;
    }
    Ok(())
}

fn print_stmt(w: &mut impl Write, i: usize, stmt: &Stmt) -> std::io::Result<()> {
    sp(w, i)?;
    match stmt {
        Stmt::Declaration {
            ty,
            name,
            initializer,
        } => {
            write!(w, "declaration {} {name}", ty.as_str())?;
            if let Some(initializer) = initializer {
                writeln!(w, " (initialized)")?;
                print_expr(w, i + 1, initializer)?;
            } else {
                writeln!(w)?;
            }
        }
        Stmt::Assignment { target, value } => {
            writeln!(w, "assignment {target}")?;
            print_expr(w, i + 1, value)?;
        }
        Stmt::If { condition, body } => {
            writeln!(w, "if")?;
            print_expr(w, i + 1, condition)?;
            if !body.is_empty() {
                sp(w, i + 1)?;
                writeln!(w, "body")?;
                for stmt in body {
                    print_stmt(w, i + 2, stmt)?;
                }
            }
        }
    }
    Ok(())
}

pub fn print_expr(w: &mut impl Write, i: usize, expr: &Expr) -> std::io::Result<()> {
    sp(w, i)?;
    match expr {
        Expr::Binary { op, lhs, rhs } => {
            writeln!(w, "binary {op:?}")?;
            print_expr(w, i + 1, lhs)?;
            print_expr(w, i + 1, rhs)?;
        }
        Expr::Identifier(name) => writeln!(w, "ident {name}")?,
        Expr::Number(Number::Int(value)) => writeln!(w, "int {value}")?,
        Expr::Number(Number::Float(value)) => writeln!(w, "float {value}")?,
    }
    Ok(())
}

fn sp(w: &mut impl Write, i: usize) -> std::io::Result<()> {
    write!(w, "{:width$}", "", width = i * INDENT_WIDTH)
}
