//! Statement walking and expression typing inside function bodies.

use protoget_parser::parser::syntax_kind_ext::{
    ARRAY_TYPE, ASSIGNMENT_STATEMENT, BINARY_EXPRESSION, BLOCK, CALL_EXPRESSION, CHANNEL_TYPE,
    COMPOSITE_LITERAL, DEFER_STATEMENT, EXPRESSION_STATEMENT, FOR_RANGE_STATEMENT, FOR_STATEMENT,
    FUNCTION_EXPRESSION, FUNCTION_TYPE, GO_STATEMENT, IF_STATEMENT, INDEX_EXPRESSION,
    INTERFACE_TYPE, LABELED_STATEMENT, MAP_TYPE, PARENTHESIZED_EXPRESSION, POINTER_TYPE,
    RETURN_STATEMENT, SELECT_STATEMENT, SELECTOR_EXPRESSION, SEND_STATEMENT, SLICE_EXPRESSION,
    SLICE_TYPE, STRUCT_TYPE, SWITCH_STATEMENT, TYPE_ASSERTION_EXPRESSION, TYPE_SWITCH_STATEMENT,
    UNARY_EXPRESSION, VARIABLE_STATEMENT,
};
use protoget_parser::parser::{AccessExprData, FunctionData, NodeArena, NodeIndex};
use protoget_scanner::SyntaxKind;

use super::ProgramResolver;
use super::scope::{Entity, LocalScopes};
use super::type_nodes::predeclared_type;
use crate::types::{BasicKind, TypeData, TypeId};

/// Position of the walk: which file, and the locals in scope.
pub(crate) struct BodyContext<'a> {
    pub pkg: usize,
    pub file: usize,
    pub arena: &'a NodeArena,
    pub locals: LocalScopes,
}

impl<'a> ProgramResolver<'a> {
    // =========================================================================
    // Statements
    // =========================================================================

    /// Bind the receiver, parameters and named results of `function`.
    pub(super) fn bind_parameters(&mut self, cx: &mut BodyContext<'a>, function: &FunctionData) {
        let arena = cx.arena;
        let params = std::iter::once(function.receiver)
            .filter(|r| r.is_some())
            .chain(function.parameters.iter())
            .chain(function.results.iter());
        for param in params {
            let Some(field) = arena.get(param).and_then(|n| arena.get_field(n)) else {
                continue;
            };
            let ty = self.resolve_type_node(cx.pkg, cx.file, field.type_annotation);
            for name in field.names.iter() {
                if let Some(text) = arena.identifier_text(name) {
                    cx.locals.bind(text, ty);
                }
            }
        }
    }

    pub(super) fn resolve_statement(&mut self, cx: &mut BodyContext<'a>, stmt: NodeIndex) {
        let arena = cx.arena;
        let Some(node) = arena.get(stmt) else {
            return;
        };

        match node.kind {
            BLOCK => {
                let Some(block) = arena.get_block(node) else {
                    return;
                };
                cx.locals.push();
                self.resolve_statements(cx, block.statements.iter());
                cx.locals.pop();
            }
            VARIABLE_STATEMENT => {
                for (name, ty) in self.resolve_variable(cx, stmt) {
                    cx.locals.bind(&name, ty);
                }
            }
            ASSIGNMENT_STATEMENT => self.resolve_assignment(cx, stmt),
            EXPRESSION_STATEMENT | DEFER_STATEMENT | GO_STATEMENT => {
                if let Some(statement) = arena.get_expr_statement(node) {
                    self.type_expression(cx, statement.expression);
                }
            }
            SEND_STATEMENT => {
                if let Some(send) = arena.get_send(node) {
                    self.type_expression(cx, send.channel);
                    self.type_expression(cx, send.value);
                }
            }
            RETURN_STATEMENT => {
                if let Some(ret) = arena.get_return_statement(node) {
                    for expr in ret.expressions.iter() {
                        self.type_expression(cx, expr);
                    }
                }
            }
            IF_STATEMENT => {
                if let Some(if_stmt) = arena.get_if_statement(node) {
                    cx.locals.push();
                    self.resolve_statement(cx, if_stmt.initializer);
                    self.type_expression(cx, if_stmt.condition);
                    self.resolve_statement(cx, if_stmt.then_statement);
                    self.resolve_statement(cx, if_stmt.else_statement);
                    cx.locals.pop();
                }
            }
            FOR_STATEMENT => {
                if let Some(for_stmt) = arena.get_for_statement(node) {
                    cx.locals.push();
                    self.resolve_statement(cx, for_stmt.initializer);
                    self.type_expression(cx, for_stmt.condition);
                    self.resolve_statement(cx, for_stmt.incrementor);
                    self.resolve_statement(cx, for_stmt.body);
                    cx.locals.pop();
                }
            }
            FOR_RANGE_STATEMENT => self.resolve_range(cx, stmt),
            SWITCH_STATEMENT | TYPE_SWITCH_STATEMENT => self.resolve_switch(cx, stmt),
            SELECT_STATEMENT => {
                let Some(select) = arena.get_select(node) else {
                    return;
                };
                for clause in select.clauses.iter() {
                    let Some(clause) = arena.get(clause).and_then(|n| arena.get_case_clause(n))
                    else {
                        continue;
                    };
                    cx.locals.push();
                    self.resolve_statements(cx, clause.expressions.iter());
                    self.resolve_statements(cx, clause.statements.iter());
                    cx.locals.pop();
                }
            }
            LABELED_STATEMENT => {
                if let Some(labeled) = arena.get_labeled(node) {
                    self.resolve_statement(cx, labeled.statement);
                }
            }
            // Branch statements hold no expressions. Local type
            // declarations are not resolved.
            _ => {}
        }
    }

    fn resolve_statements(
        &mut self,
        cx: &mut BodyContext<'a>,
        statements: impl Iterator<Item = NodeIndex>,
    ) {
        for stmt in statements {
            self.resolve_statement(cx, stmt);
        }
    }

    fn resolve_assignment(&mut self, cx: &mut BodyContext<'a>, stmt: NodeIndex) {
        let arena = cx.arena;
        let Some(assignment) = arena.get(stmt).and_then(|n| arena.get_assignment(n)) else {
            return;
        };
        let right: Vec<Option<TypeId>> = assignment
            .right
            .iter()
            .map(|expr| self.type_expression(cx, expr))
            .collect();

        if assignment.operator_token != SyntaxKind::ColonEqualsToken as u16 {
            for target in assignment.left.iter() {
                self.type_expression(cx, target);
            }
            return;
        }

        let types = if assignment.left.len() == right.len() {
            right
        } else {
            self.multi_value_types(cx, assignment.right.first())
        };
        for (i, target) in assignment.left.iter().enumerate() {
            if let Some(name) = arena.identifier_text(target) {
                let ty = types.get(i).copied().flatten();
                cx.locals.bind(name, ty.unwrap_or(TypeId::UNKNOWN));
            }
        }
    }

    /// `for k, v := range x`. Targets of `=` are typed as expressions.
    fn resolve_range(&mut self, cx: &mut BodyContext<'a>, stmt: NodeIndex) {
        let arena = cx.arena;
        let Some(range) = arena.get(stmt).and_then(|n| arena.get_range_statement(n)) else {
            return;
        };

        cx.locals.push();
        let collection = self.type_expression(cx, range.expression);
        if range.operator_token == SyntaxKind::ColonEqualsToken as u16 {
            let (key, value) = collection.map_or((None, None), |ty| self.range_types(ty));
            for (target, ty) in range.left.iter().zip([key, value]) {
                if let Some(name) = arena.identifier_text(target) {
                    cx.locals.bind(name, ty.unwrap_or(TypeId::UNKNOWN));
                }
            }
        } else {
            for target in range.left.iter() {
                self.type_expression(cx, target);
            }
        }
        self.resolve_statement(cx, range.body);
        cx.locals.pop();
    }

    /// Key and value types produced by ranging over `ty`.
    fn range_types(&self, ty: TypeId) -> (Option<TypeId>, Option<TypeId>) {
        if let Some(elem) = self.array_element(ty) {
            return (Some(TypeId::INT), Some(elem));
        }
        match self.interner.lookup(self.interner.underlying(ty)) {
            Some(TypeData::Slice(elem)) => (Some(TypeId::INT), Some(*elem)),
            Some(TypeData::Basic(BasicKind::String)) => (Some(TypeId::INT), Some(TypeId::INT32)),
            Some(TypeData::Map { key, value }) => (Some(*key), Some(*value)),
            Some(TypeData::Chan(elem)) => (Some(*elem), None),
            Some(TypeData::Basic(
                BasicKind::Unknown | BasicKind::Bool | BasicKind::Float32 | BasicKind::Float64,
            )) => (None, None),
            // Ranging over an integer counts up in its type.
            Some(TypeData::Basic(_)) => (Some(ty), None),
            _ => (None, None),
        }
    }

    /// Expression and type switches. Each clause is its own scope; a type
    /// switch binding takes the clause's type when exactly one is listed,
    /// and the guarded operand's type otherwise.
    fn resolve_switch(&mut self, cx: &mut BodyContext<'a>, stmt: NodeIndex) {
        let arena = cx.arena;
        let Some(node) = arena.get(stmt) else {
            return;
        };
        let Some(switch) = arena.get_switch(node) else {
            return;
        };
        let is_type_switch = node.kind == TYPE_SWITCH_STATEMENT;

        cx.locals.push();
        self.resolve_statement(cx, switch.initializer);
        let tag = self.type_expression(cx, switch.tag);
        let subject = if is_type_switch {
            arena
                .get(switch.tag)
                .and_then(|n| arena.get_type_assertion(n))
                .and_then(|guard| self.recorded_type(cx, guard.expression))
        } else {
            tag
        };
        let binding = arena.identifier_text(switch.binding);

        for clause in switch.clauses.iter() {
            let Some(clause) = arena.get(clause).and_then(|n| arena.get_case_clause(n)) else {
                continue;
            };
            cx.locals.push();
            if is_type_switch {
                let listed: Vec<TypeId> = clause
                    .expressions
                    .iter()
                    .map(|type_node| self.resolve_type_node(cx.pkg, cx.file, type_node))
                    .collect();
                if let Some(name) = binding {
                    let ty = match listed.as_slice() {
                        [single] if !single.is_unknown() => Some(*single),
                        _ => subject,
                    };
                    cx.locals.bind(name, ty.unwrap_or(TypeId::UNKNOWN));
                }
            } else {
                for expr in clause.expressions.iter() {
                    self.type_expression(cx, expr);
                }
            }
            self.resolve_statements(cx, clause.statements.iter());
            cx.locals.pop();
        }
        cx.locals.pop();
    }

    /// `var`/`const` specs: type the initializers and return the bindings
    /// in declaration order. A const spec with neither type nor values
    /// repeats the types of the spec before it.
    pub(super) fn resolve_variable(
        &mut self,
        cx: &mut BodyContext<'a>,
        stmt: NodeIndex,
    ) -> Vec<(String, TypeId)> {
        let arena = cx.arena;
        let Some(statement) = arena
            .get(stmt)
            .and_then(|n| arena.get_variable_statement(n))
        else {
            return Vec::new();
        };

        let mut bindings = Vec::new();
        let mut repeated: Vec<Option<TypeId>> = Vec::new();
        for decl in statement.declarations.iter() {
            let Some(spec) = arena.get(decl).and_then(|n| arena.get_variable_decl(n)) else {
                continue;
            };
            let declared = spec
                .type_annotation
                .is_some()
                .then(|| self.resolve_type_node(cx.pkg, cx.file, spec.type_annotation));
            let mut values: Vec<Option<TypeId>> = spec
                .initializers
                .iter()
                .map(|expr| self.type_expression(cx, expr))
                .collect();
            if values.len() == 1 && spec.names.len() > 1 {
                values = self.multi_value_types(cx, spec.initializers.first());
            }

            if statement.is_const {
                if declared.is_none() && spec.initializers.is_empty() {
                    values = repeated.clone();
                } else {
                    repeated = match declared {
                        Some(ty) => vec![Some(ty); spec.names.len()],
                        None => values.clone(),
                    };
                }
            }

            for (i, name) in spec.names.iter().enumerate() {
                let Some(text) = arena.identifier_text(name) else {
                    continue;
                };
                let ty = declared
                    .or_else(|| values.get(i).copied().flatten())
                    .unwrap_or(TypeId::UNKNOWN);
                bindings.push((text.to_string(), ty));
            }
        }
        bindings
    }

    /// Types bound by `a, b := x` when the single expression `x` yields
    /// several values: a multi-result call, or a comma-ok map index, type
    /// assertion or receive.
    fn multi_value_types(
        &self,
        cx: &BodyContext<'a>,
        expr: Option<NodeIndex>,
    ) -> Vec<Option<TypeId>> {
        let arena = cx.arena;
        let Some(expr) = expr.map(|e| arena.skip_parentheses(e)) else {
            return Vec::new();
        };
        if arena.kind_of(expr) == Some(CALL_EXPRESSION) {
            return self.call_results(cx, expr);
        }
        vec![self.recorded_type(cx, expr), Some(TypeId::BOOL)]
    }

    /// Result types of a call already typed by `type_expression`.
    fn call_results(&self, cx: &BodyContext<'a>, call: NodeIndex) -> Vec<Option<TypeId>> {
        let arena = cx.arena;
        let Some(callee) = arena
            .get(call)
            .and_then(|n| arena.get_call_expr(n))
            .map(|c| c.expression)
        else {
            return Vec::new();
        };
        self.recorded_type(cx, callee)
            .and_then(|sig| self.interner.signature_results(sig))
            .map(|results| results.iter().map(|&r| Some(r)).collect())
            .unwrap_or_default()
    }

    fn recorded_type(&self, cx: &BodyContext<'a>, expr: NodeIndex) -> Option<TypeId> {
        self.exprs[cx.pkg][cx.file].get(&expr).copied()
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    /// Type `expr` and its subexpressions, recording every known type.
    pub(super) fn type_expression(
        &mut self,
        cx: &mut BodyContext<'a>,
        expr: NodeIndex,
    ) -> Option<TypeId> {
        let ty = self.compute_expression_type(cx, expr)?;
        if ty.is_unknown() {
            return None;
        }
        self.exprs[cx.pkg][cx.file].insert(expr, ty);
        Some(ty)
    }

    fn compute_expression_type(
        &mut self,
        cx: &mut BodyContext<'a>,
        expr: NodeIndex,
    ) -> Option<TypeId> {
        let arena = cx.arena;
        let node = arena.get(expr)?;

        match node.kind {
            k if k == SyntaxKind::Identifier as u16 => {
                self.identifier_type(cx, arena.identifier_text(expr)?)
            }
            k if k == SyntaxKind::IntLiteral as u16 => Some(TypeId::INT),
            k if k == SyntaxKind::FloatLiteral as u16 => Some(TypeId::FLOAT64),
            k if k == SyntaxKind::RuneLiteral as u16 => Some(TypeId::INT32),
            k if k == SyntaxKind::StringLiteral as u16 => Some(TypeId::STRING),
            SELECTOR_EXPRESSION => {
                let selector = arena.get_selector(node)?;
                self.selector_type(cx, selector)
            }
            INDEX_EXPRESSION => {
                let access = arena.get_access_expr(node)?;
                let base = self.type_expression(cx, access.expression);
                self.type_expression(cx, access.name_or_argument);
                self.element_type(base?)
            }
            SLICE_EXPRESSION => {
                let slice = arena.get_slice_expr(node)?;
                let base = self.type_expression(cx, slice.expression);
                for bound in [slice.low, slice.high, slice.max] {
                    self.type_expression(cx, bound);
                }
                let base = base?;
                match self.array_element(base) {
                    Some(elem) => Some(self.interner.slice(elem)),
                    None => Some(base),
                }
            }
            TYPE_ASSERTION_EXPRESSION => {
                let assertion = arena.get_type_assertion(node)?;
                self.type_expression(cx, assertion.expression);
                if assertion.type_node.is_none() {
                    return None;
                }
                Some(self.resolve_type_node(cx.pkg, cx.file, assertion.type_node))
            }
            CALL_EXPRESSION => self.call_type(cx, expr),
            UNARY_EXPRESSION => {
                let unary = arena.get_unary_expr(node)?;
                let operand = self.type_expression(cx, unary.operand);
                match SyntaxKind::from_u16(unary.operator)? {
                    SyntaxKind::AmpersandToken => Some(self.interner.pointer(operand?)),
                    SyntaxKind::AsteriskToken => match self.interner.lookup(operand?)? {
                        TypeData::Pointer(elem) => Some(*elem),
                        _ => None,
                    },
                    SyntaxKind::LessThanMinusToken => {
                        match self.interner.lookup(self.interner.underlying(operand?))? {
                            TypeData::Chan(elem) => Some(*elem),
                            _ => None,
                        }
                    }
                    SyntaxKind::ExclamationToken => Some(TypeId::BOOL),
                    _ => operand,
                }
            }
            BINARY_EXPRESSION => {
                let binary = arena.get_binary_expr(node)?;
                let left = self.type_expression(cx, binary.left);
                let right = self.type_expression(cx, binary.right);
                match SyntaxKind::from_u16(binary.operator_token)?.binary_precedence()? {
                    // Comparisons and logical operators
                    1..=3 => Some(TypeId::BOOL),
                    _ => left.or(right),
                }
            }
            PARENTHESIZED_EXPRESSION => {
                let inner = arena.get_parenthesized(node)?.expression;
                self.type_expression(cx, inner)
            }
            COMPOSITE_LITERAL => self.composite_literal_type(cx, expr, None),
            FUNCTION_EXPRESSION => {
                let function = arena.get_function(node)?;
                let signature = self.signature_type(cx.pkg, cx.file, expr);
                cx.locals.push();
                self.bind_parameters(cx, function);
                self.resolve_statement(cx, function.body);
                cx.locals.pop();
                Some(signature)
            }
            _ => None,
        }
    }

    /// Type of `x[i]` for `x` of type `ty`.
    fn element_type(&self, ty: TypeId) -> Option<TypeId> {
        if let Some(elem) = self.array_element(ty) {
            return Some(elem);
        }
        match self.interner.lookup(self.interner.underlying(ty))? {
            TypeData::Slice(elem) => Some(*elem),
            TypeData::Map { value, .. } => Some(*value),
            TypeData::Basic(BasicKind::String) => Some(TypeId::UINT8),
            _ => None,
        }
    }

    /// Element type of an array or a pointer to an array.
    fn array_element(&self, ty: TypeId) -> Option<TypeId> {
        let base = match self.interner.lookup(ty)? {
            TypeData::Pointer(inner) => *inner,
            _ => ty,
        };
        match self.interner.lookup(self.interner.underlying(base))? {
            TypeData::Array(elem) => Some(*elem),
            _ => None,
        }
    }

    /// Type a composite literal and its elements. `hint` is the element
    /// type of the enclosing literal and types an elided `{...}`; a `*T`
    /// hint elides `&T{...}`.
    fn composite_literal_type(
        &mut self,
        cx: &mut BodyContext<'a>,
        expr: NodeIndex,
        hint: Option<TypeId>,
    ) -> Option<TypeId> {
        let arena = cx.arena;
        let literal = arena
            .get(expr)
            .and_then(|n| arena.get_composite_literal(n))?;
        let ty = if literal.type_node.is_some() {
            self.type_name_expression(cx, literal.type_node)
        } else {
            hint
        };
        let base = ty.map(|ty| match self.interner.lookup(ty) {
            Some(TypeData::Pointer(inner)) if literal.type_node.is_none() => *inner,
            _ => ty,
        });
        let layout = base
            .and_then(|b| self.interner.lookup(self.interner.underlying(b)))
            .cloned();

        for (position, element) in literal.elements.iter().enumerate() {
            let (key, value) = match arena.get(element).and_then(|n| arena.get_key_value(n)) {
                Some(pair) => (pair.key, pair.value),
                None => (NodeIndex::NONE, element),
            };
            let value_hint = match &layout {
                // Struct keys are field names, not expressions.
                Some(TypeData::Struct(fields)) => {
                    let field = match arena.identifier_text(key) {
                        Some(name) => fields.iter().find(|f| f.name == name),
                        None => fields.get(position),
                    };
                    field.map(|f| f.type_id)
                }
                Some(TypeData::Map { key: key_type, value }) => {
                    self.type_element(cx, key, Some(*key_type));
                    Some(*value)
                }
                Some(TypeData::Slice(elem) | TypeData::Array(elem)) => {
                    self.type_expression(cx, key);
                    Some(*elem)
                }
                _ => {
                    if arena.identifier_text(key).is_none() {
                        self.type_element(cx, key, None);
                    }
                    None
                }
            };
            self.type_element(cx, value, value_hint);
        }
        ty
    }

    /// Type one element of a composite literal; an elided inner literal
    /// takes `hint` as its type.
    fn type_element(&mut self, cx: &mut BodyContext<'a>, value: NodeIndex, hint: Option<TypeId>) {
        let arena = cx.arena;
        let elided = arena
            .get(value)
            .and_then(|n| arena.get_composite_literal(n))
            .is_some_and(|l| l.type_node.is_none());
        if !elided {
            self.type_expression(cx, value);
            return;
        }
        if let Some(ty) = self.composite_literal_type(cx, value, hint)
            && !ty.is_unknown()
        {
            self.exprs[cx.pkg][cx.file].insert(value, ty);
        }
    }

    fn identifier_type(&self, cx: &BodyContext<'a>, name: &str) -> Option<TypeId> {
        if let Some(ty) = cx.locals.lookup(name) {
            return Some(ty);
        }
        match self.scopes[cx.pkg].members.get(name) {
            Some(Entity::Var(ty) | Entity::Func(ty)) => return Some(*ty),
            Some(Entity::Type(_)) => return None,
            None => {}
        }
        match name {
            "true" | "false" => Some(TypeId::BOOL),
            "iota" => Some(TypeId::INT),
            _ => None,
        }
    }

    /// Whether `name` refers to a package-level entity or builtin rather
    /// than a local.
    fn is_unshadowed(&self, cx: &BodyContext<'a>, name: &str) -> bool {
        !cx.locals.contains(name) && !self.scopes[cx.pkg].members.contains_key(name)
    }

    /// The package an identifier names through this file's imports.
    /// `Some(None)` is an import that is not part of the program.
    fn imported_package(&self, cx: &BodyContext<'a>, expr: NodeIndex) -> Option<Option<usize>> {
        let name = cx.arena.identifier_text(expr)?;
        if !self.is_unshadowed(cx, name) {
            return None;
        }
        self.file_scopes[cx.pkg][cx.file].imports.get(name).copied()
    }

    fn selector_type(&mut self, cx: &mut BodyContext<'a>, selector: &AccessExprData) -> Option<TypeId> {
        let arena = cx.arena;

        if let Some(target) = self.imported_package(cx, selector.expression) {
            let member = arena.identifier_text(selector.name_or_argument)?;
            return match self.scopes[target?].members.get(member)? {
                Entity::Var(ty) | Entity::Func(ty) => Some(*ty),
                Entity::Type(_) => None,
            };
        }

        let base = self.type_expression(cx, selector.expression)?;
        let name = arena.identifier_text(selector.name_or_argument)?;
        self.interner
            .field(base, name)
            .or_else(|| self.interner.selectable_method(base, name))
    }

    /// A type used in expression position: conversions, `new`, `make` and
    /// composite literal types.
    fn type_name_expression(&mut self, cx: &BodyContext<'a>, expr: NodeIndex) -> Option<TypeId> {
        let arena = cx.arena;
        let node = arena.get(expr)?;
        match node.kind {
            k if k == SyntaxKind::Identifier as u16 => {
                let name = arena.identifier_text(expr)?;
                if cx.locals.contains(name) {
                    return None;
                }
                match self.scopes[cx.pkg].members.get(name) {
                    Some(Entity::Type(ty)) => Some(*ty),
                    Some(_) => None,
                    None => predeclared_type(name),
                }
            }
            SELECTOR_EXPRESSION => {
                let selector = arena.get_selector(node)?;
                self.imported_package(cx, selector.expression)?;
                self.qualified_type(cx.pkg, cx.file, expr)
            }
            PARENTHESIZED_EXPRESSION => {
                let inner = arena.get_parenthesized(node)?.expression;
                self.type_name_expression(cx, inner)
            }
            // `(*T)(x)`
            UNARY_EXPRESSION => {
                let unary = arena.get_unary_expr(node)?;
                if unary.operator != SyntaxKind::AsteriskToken as u16 {
                    return None;
                }
                let elem = self.type_name_expression(cx, unary.operand)?;
                Some(self.interner.pointer(elem))
            }
            POINTER_TYPE | SLICE_TYPE | ARRAY_TYPE | MAP_TYPE | CHANNEL_TYPE | FUNCTION_TYPE
            | STRUCT_TYPE | INTERFACE_TYPE => {
                let ty = self.resolve_type_node(cx.pkg, cx.file, expr);
                (!ty.is_unknown()).then_some(ty)
            }
            _ => None,
        }
    }

    fn call_type(&mut self, cx: &mut BodyContext<'a>, expr: NodeIndex) -> Option<TypeId> {
        let arena = cx.arena;
        let call = arena.get(expr).and_then(|n| arena.get_call_expr(n))?;
        let builtin = arena
            .identifier_text(call.expression)
            .filter(|name| self.is_unshadowed(cx, name));

        match builtin {
            Some("new") => {
                let elem = call
                    .arguments
                    .first()
                    .and_then(|arg| self.type_name_expression(cx, arg))?;
                return Some(self.interner.pointer(elem));
            }
            Some("make") => {
                let made = call
                    .arguments
                    .first()
                    .and_then(|arg| self.type_name_expression(cx, arg));
                for arg in call.arguments.iter().skip(1) {
                    self.type_expression(cx, arg);
                }
                return made;
            }
            Some("len" | "cap" | "copy") => {
                for arg in call.arguments.iter() {
                    self.type_expression(cx, arg);
                }
                return Some(TypeId::INT);
            }
            // Result has the type of the first argument.
            Some("append" | "min" | "max") => {
                let types: Vec<Option<TypeId>> = call
                    .arguments
                    .iter()
                    .map(|arg| self.type_expression(cx, arg))
                    .collect();
                return types.first().copied().flatten();
            }
            _ => {}
        }

        if let Some(conversion) = self.type_name_expression(cx, call.expression) {
            for arg in call.arguments.iter() {
                self.type_expression(cx, arg);
            }
            return Some(conversion);
        }

        let callee = self.type_expression(cx, call.expression);
        for arg in call.arguments.iter() {
            self.type_expression(cx, arg);
        }
        match self.interner.signature_results(callee?)? {
            [single] => Some(*single),
            _ => None,
        }
    }
}
