//! Lexical scopes and the bindings they introduce.
//!
//! A scope is a module, function, class, lambda or comprehension node.
//! Bindings are collected per scope without descending into nested scopes,
//! except to record the names nested definitions bind.

use tree_sitter::Node;

use super::{named_children, text};

const COMPREHENSIONS: &[&str] = &[
    "list_comprehension",
    "set_comprehension",
    "dictionary_comprehension",
    "generator_expression",
];

/// What a binding assigns to its name.
#[derive(Debug, Clone)]
pub(crate) enum BindingKind<'t> {
    Function(Node<'t>),
    Class(Node<'t>),
    /// Assignment or walrus. `index` selects an element when the target
    /// was unpacked from a tuple or list.
    Assign {
        value: Option<Node<'t>>,
        annotation: Option<Node<'t>>,
        index: Option<usize>,
    },
    /// `import a.b` binds `a` to module `a`; `import a.b as c` binds `c`
    /// to module `a.b`.
    Import { module: String },
    /// `from m import x`. `module` is the `dotted_name` or `relative_import`.
    FromImport { module: Node<'t>, member: String },
    Param(Node<'t>),
    /// `except E as e`; holds the exception type expression.
    ExceptTarget(Node<'t>),
    /// Loop and `with` targets, star imports, and other values not tracked.
    Opaque,
}

#[derive(Debug, Clone)]
pub(crate) struct Binding<'t> {
    pub name: &'t str,
    /// The identifier being bound.
    pub node: Node<'t>,
    pub kind: BindingKind<'t>,
}

impl Binding<'_> {
    /// Whether `byte` falls inside the value this binding assigns, so that
    /// `x = x + 1` resolves its right-hand `x` to an earlier binding.
    fn assigns_around(&self, byte: usize) -> bool {
        match &self.kind {
            BindingKind::Assign {
                value: Some(value), ..
            } => value.start_byte() <= byte && byte < value.end_byte(),
            _ => false,
        }
    }
}

pub(crate) fn is_scope(node: Node<'_>) -> bool {
    matches!(
        node.kind(),
        "module" | "function_definition" | "class_definition" | "lambda"
    ) || COMPREHENSIONS.contains(&node.kind())
}

/// Scopes whose names are visible from `node`, innermost first.
///
/// A function's name, decorators and annotations live in the enclosing
/// scope. Class scopes are only visible to code directly in the class body.
pub(crate) fn enclosing_scopes<'t>(node: Node<'t>) -> Vec<Node<'t>> {
    let mut scopes = Vec::new();
    let mut child = node;
    while let Some(parent) = child.parent() {
        let visible = match parent.kind() {
            "function_definition" | "lambda" => {
                is_field(parent, "body", child) || is_field(parent, "parameters", child)
            }
            "class_definition" => scopes.is_empty() && is_field(parent, "body", child),
            "module" => true,
            kind => COMPREHENSIONS.contains(&kind),
        };
        if visible {
            scopes.push(parent);
        }
        child = parent;
    }
    scopes
}

/// Whether `child` is the node stored under `field` of `parent`.
pub(crate) fn is_field(parent: Node<'_>, field: &str, child: Node<'_>) -> bool {
    parent.child_by_field_name(field) == Some(child)
}

/// Every binding made directly in `scope`, in source order.
pub(crate) fn collect<'t>(scope: Node<'t>, source: &'t str) -> Vec<Binding<'t>> {
    let mut out = Vec::new();
    match scope.kind() {
        "function_definition" | "lambda" => {
            if let Some(params) = scope.child_by_field_name("parameters") {
                bind_parameters(params, source, &mut out);
            }
            if let Some(body) = scope.child_by_field_name("body") {
                visit(body, source, &mut out);
            }
        }
        "class_definition" => {
            if let Some(body) = scope.child_by_field_name("body") {
                visit(body, source, &mut out);
            }
        }
        kind if COMPREHENSIONS.contains(&kind) => {
            for clause in named_children(scope) {
                if clause.kind() == "for_in_clause" {
                    if let Some(left) = clause.child_by_field_name("left") {
                        bind_opaque(left, source, &mut out);
                    }
                }
            }
        }
        _ => visit(scope, source, &mut out),
    }
    out
}

/// Look `name` up from `reference`: the nearest scope binding it wins, and
/// within it the last binding before the reference (or the first binding
/// when all of them come later).
pub(crate) fn lookup<'t>(name: &str, reference: Node<'t>, source: &'t str) -> Option<Binding<'t>> {
    let at = reference.start_byte();
    for scope in enclosing_scopes(reference) {
        let bindings: Vec<Binding<'t>> = collect(scope, source)
            .into_iter()
            .filter(|b| b.name == name && !b.assigns_around(at))
            .collect();
        if bindings.is_empty() {
            continue;
        }
        let chosen = bindings
            .iter()
            .rev()
            .find(|b| b.node.start_byte() <= at)
            .or_else(|| bindings.first())
            .cloned();
        return chosen;
    }
    None
}

/// Walk `root` in source order, recording bindings without entering nested
/// scopes. Uses an explicit stack: source nesting depth is unbounded.
fn visit<'t>(root: Node<'t>, source: &'t str, out: &mut Vec<Binding<'t>>) {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        match node.kind() {
            "function_definition" | "class_definition" => {
                if let Some(name) = node.child_by_field_name("name") {
                    let kind = if node.kind() == "function_definition" {
                        BindingKind::Function(node)
                    } else {
                        BindingKind::Class(node)
                    };
                    push(out, name, source, kind);
                }
                continue;
            }
            "lambda" => continue,
            kind if COMPREHENSIONS.contains(&kind) => continue,
            "assignment" => {
                bind_assignment(node, source, out);
                stack.extend(node.child_by_field_name("right"));
                continue;
            }
            "named_expression" => {
                if let Some(name) = node.child_by_field_name("name") {
                    let value = node.child_by_field_name("value");
                    push(
                        out,
                        name,
                        source,
                        BindingKind::Assign {
                            value,
                            annotation: None,
                            index: None,
                        },
                    );
                }
            }
            "import_statement" => {
                bind_import(node, source, out);
                continue;
            }
            "import_from_statement" => {
                bind_from_import(node, source, out);
                continue;
            }
            "for_statement" => {
                if let Some(left) = node.child_by_field_name("left") {
                    bind_opaque(left, source, out);
                }
            }
            "as_pattern" => {
                bind_as_pattern(node, source, out);
                continue;
            }
            "except_clause" => {
                if let Some(alias) = node.child_by_field_name("alias") {
                    if let Some(value) = node.child_by_field_name("value") {
                        push_identifiers(alias, source, out, BindingKind::ExceptTarget(value));
                    }
                }
            }
            _ => {}
        }
        push_children(&mut stack, node);
    }
}

/// Queue `node`'s named children so they pop in source order.
fn push_children<'t>(stack: &mut Vec<Node<'t>>, node: Node<'t>) {
    let mut children = named_children(node);
    children.reverse();
    stack.extend(children);
}

fn bind_assignment<'t>(node: Node<'t>, source: &'t str, out: &mut Vec<Binding<'t>>) {
    let Some(left) = node.child_by_field_name("left") else {
        return;
    };
    let annotation = node.child_by_field_name("type");

    // a = b = value: every target shares the innermost value
    let mut value = node.child_by_field_name("right");
    while let Some(v) = value.filter(|v| v.kind() == "assignment") {
        value = v.child_by_field_name("right");
    }

    match left.kind() {
        "identifier" => push(
            out,
            left,
            source,
            BindingKind::Assign {
                value,
                annotation,
                index: None,
            },
        ),
        "pattern_list" | "tuple_pattern" | "list_pattern" => {
            let targets = named_children(left)
                .into_iter()
                .filter(|n| n.kind() != "comment");
            for (i, target) in targets.enumerate() {
                if target.kind() == "identifier" {
                    push(
                        out,
                        target,
                        source,
                        BindingKind::Assign {
                            value,
                            annotation: None,
                            index: Some(i),
                        },
                    );
                } else {
                    bind_opaque(target, source, out);
                }
            }
        }
        _ => {}
    }
}

fn bind_import<'t>(node: Node<'t>, source: &'t str, out: &mut Vec<Binding<'t>>) {
    let mut cursor = node.walk();
    let names: Vec<Node<'t>> = node.children_by_field_name("name", &mut cursor).collect();
    for name in names {
        match name.kind() {
            "dotted_name" => {
                if let Some(first) = named_children(name).into_iter().next() {
                    let module = text(first, source).to_string();
                    push(out, first, source, BindingKind::Import { module });
                }
            }
            "aliased_import" => {
                let (Some(dotted), Some(alias)) = (
                    name.child_by_field_name("name"),
                    name.child_by_field_name("alias"),
                ) else {
                    continue;
                };
                let module = text(dotted, source).to_string();
                push(out, alias, source, BindingKind::Import { module });
            }
            _ => {}
        }
    }
}

fn bind_from_import<'t>(node: Node<'t>, source: &'t str, out: &mut Vec<Binding<'t>>) {
    let Some(module) = node.child_by_field_name("module_name") else {
        return;
    };
    let mut cursor = node.walk();
    let names: Vec<Node<'t>> = node.children_by_field_name("name", &mut cursor).collect();
    for name in names {
        let (target, member) = match name.kind() {
            "dotted_name" => (name, text(name, source)),
            "aliased_import" => {
                let (Some(dotted), Some(alias)) = (
                    name.child_by_field_name("name"),
                    name.child_by_field_name("alias"),
                ) else {
                    continue;
                };
                (alias, text(dotted, source))
            }
            _ => continue,
        };
        // `target` may be a dotted_name wrapping a single identifier
        let ident = if target.kind() == "identifier" {
            Some(target)
        } else {
            named_children(target).into_iter().last()
        };
        if let Some(ident) = ident {
            let kind = BindingKind::FromImport {
                module,
                member: member.to_string(),
            };
            push(out, ident, source, kind);
        }
    }
}

fn bind_as_pattern<'t>(node: Node<'t>, source: &'t str, out: &mut Vec<Binding<'t>>) {
    let Some(alias) = node.child_by_field_name("alias") else {
        return;
    };
    let in_except = node.parent().is_some_and(|p| p.kind() == "except_clause");
    let caught = named_children(node).into_iter().next();
    let kind = match caught {
        Some(expr) if in_except => BindingKind::ExceptTarget(expr),
        _ => BindingKind::Opaque,
    };
    push_identifiers(alias, source, out, kind);
}

fn bind_parameters<'t>(params: Node<'t>, source: &'t str, out: &mut Vec<Binding<'t>>) {
    for param in named_children(params) {
        if let Some(name) = parameter_name(param) {
            push(out, name, source, BindingKind::Param(param));
        }
    }
}

/// The identifier a parameter node binds.
pub(crate) fn parameter_name(param: Node<'_>) -> Option<Node<'_>> {
    match param.kind() {
        "identifier" => Some(param),
        "default_parameter" | "typed_default_parameter" => param.child_by_field_name("name"),
        "typed_parameter" => {
            let first = named_children(param).into_iter().next()?;
            if first.kind() == "identifier" {
                Some(first)
            } else {
                parameter_name(first)
            }
        }
        "list_splat_pattern" | "dictionary_splat_pattern" => named_children(param)
            .into_iter()
            .find(|n| n.kind() == "identifier"),
        _ => None,
    }
}

fn bind_opaque<'t>(target: Node<'t>, source: &'t str, out: &mut Vec<Binding<'t>>) {
    push_identifiers(target, source, out, BindingKind::Opaque);
}

fn push_identifiers<'t>(
    target: Node<'t>,
    source: &'t str,
    out: &mut Vec<Binding<'t>>,
    kind: BindingKind<'t>,
) {
    let mut stack = vec![target];
    while let Some(node) = stack.pop() {
        match node.kind() {
            "identifier" => push(out, node, source, kind.clone()),
            "attribute" | "subscript" => {}
            _ => push_children(&mut stack, node),
        }
    }
}

fn push<'t>(out: &mut Vec<Binding<'t>>, node: Node<'t>, source: &'t str, kind: BindingKind<'t>) {
    out.push(Binding {
        name: text(node, source),
        node,
        kind,
    });
}

#[cfg(test)]
mod tests {
    use super::super::parse;
    use super::*;

    fn names(source: &str) -> Vec<String> {
        let tree = parse(source);
        collect(tree.root_node(), source)
            .into_iter()
            .map(|b| b.name.to_string())
            .collect()
    }

    #[test]
    fn module_bindings_in_order() {
        let src = "import os\nfrom a import b as c\nx = 1\ndef f(p):\n    y = 2\nclass K:\n    z = 3\n";
        assert_eq!(names(src), vec!["os", "c", "x", "f", "K"]);
    }

    #[test]
    fn unpacking_and_loops() {
        let src = "a, b = 1, 2\nfor i in range(3):\n    pass\nwith open(p) as fh:\n    pass\n";
        assert_eq!(names(src), vec!["a", "b", "i", "fh"]);
    }

    #[test]
    fn chained_assignment_binds_every_target() {
        let src = "a = b = 5\n";
        let tree = parse(src);
        let bindings = collect(tree.root_node(), src);
        assert_eq!(bindings.len(), 2);
        for b in &bindings {
            match &b.kind {
                BindingKind::Assign { value: Some(v), .. } => assert_eq!(v.kind(), "integer"),
                other => panic!("unexpected binding {other:?}"),
            }
        }
    }

    #[test]
    fn function_scope_includes_parameters() {
        let src = "def f(a, b: int = 2, *rest, **kw):\n    c = a\n";
        let tree = parse(src);
        let def = named_children(tree.root_node())[0];
        let got: Vec<&str> = collect(def, src).iter().map(|b| b.name).collect();
        assert_eq!(got, vec!["a", "b", "rest", "kw", "c"]);
    }

    #[test]
    fn lookup_prefers_last_binding_before_reference() {
        let src = "x = 1\nx = 'two'\nprint(x)\nx = 3.0\n";
        let tree = parse(src);
        let at = src.find("print(x)").unwrap() + 6;
        let reference = tree
            .root_node()
            .descendant_for_byte_range(at, at + 1)
            .unwrap();
        let binding = lookup("x", reference, src).unwrap();
        assert_eq!(binding.node.start_position().row, 1);
    }

    /// `[[[ ... 1 ... ]]]` nested `depth` times.
    fn nested_list(depth: usize) -> String {
        format!("{}1{}", "[".repeat(depth), "]".repeat(depth))
    }

    #[test]
    fn deeply_nested_values_are_walked_without_recursion() {
        let src = format!("x = {}\ny = x\n", nested_list(10_000));
        let tree = parse(&src);
        let got: Vec<&str> = collect(tree.root_node(), &src).iter().map(|b| b.name).collect();
        assert_eq!(got, vec!["x", "y"]);
    }

    #[test]
    fn class_scope_hidden_from_methods() {
        let src = "class K:\n    v = 1\n    def m(self):\n        return v\n";
        let tree = parse(src);
        let at = src.rfind('v').unwrap();
        let reference = tree.root_node().descendant_for_byte_range(at, at + 1).unwrap();
        assert!(lookup("v", reference, src).is_none());
    }
}
