use crate::ast::{Program, Stmt, StmtKind, Type};

/// What the program needs from the C++ standard library.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Usage {
    /// A `says` statement appears somewhere
    pub prints: bool,
    /// A `text` value is declared or printed somewhere
    pub text: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoInclude {
    pub header: &'static str,
    pub reason: &'static str,
}

/// Headers to emit beyond the program's own `use` declarations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncludePlan {
    pub auto: Vec<AutoInclude>,
    /// `<iostream>` ends up included, explicitly or automatically
    pub iostream: bool,
}

impl IncludePlan {
    pub fn includes(&self, header: &str) -> bool {
        self.auto.iter().any(|inc| inc.header == header)
    }
}

/// Scan every statement reachable from the top level, branches included.
pub fn scan_usage(program: &Program) -> Usage {
    let mut usage = Usage::default();
    for stmt in &program.statements {
        scan_stmt(stmt, &mut usage);
    }
    usage
}

fn scan_stmt(stmt: &Stmt, usage: &mut Usage) {
    match &stmt.kind {
        StmtKind::VarDecl { ty, value, .. } => {
            if *ty == Type::Text || value.ty == Type::Text {
                usage.text = true;
            }
        }
        StmtKind::Says(expr) => {
            usage.prints = true;
            if expr.ty == Type::Text {
                usage.text = true;
            }
        }
        StmtKind::If {
            then_branch,
            else_branch,
            ..
        } => {
            scan_stmt(then_branch, usage);
            if let Some(else_branch) = else_branch {
                scan_stmt(else_branch, usage);
            }
        }
        StmtKind::Block(stmts) => {
            for stmt in stmts {
                scan_stmt(stmt, usage);
            }
        }
    }
}

/// Decide which headers to add automatically. Never repeats a header the
/// program already asked for with `use`, and never adds one twice.
pub fn plan_includes(program: &Program) -> IncludePlan {
    let usage = scan_usage(program);
    let mut plan = IncludePlan {
        auto: Vec::new(),
        iostream: program.uses_header("iostream"),
    };

    let add = |plan: &mut IncludePlan, header: &'static str, reason: &'static str| {
        if !program.uses_header(header) && !plan.includes(header) {
            plan.auto.push(AutoInclude { header, reason });
        }
    };

    if usage.text {
        add(&mut plan, "string", "Auto-included for text type or string operations");
    }

    if usage.prints {
        add(&mut plan, "iostream", "Auto-included for 'says'");
        add(&mut plan, "iomanip", "For std::boolalpha with 'says'");
        add(&mut plan, "string", "For std::to_string with 'says'");
        plan.iostream = true;
    }

    log::debug!(
        "include plan: prints={}, text={}, auto={:?}",
        usage.prints,
        usage.text,
        plan.auto.iter().map(|inc| inc.header).collect::<Vec<_>>()
    );
    plan
}
