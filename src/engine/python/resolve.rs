//! Name resolution and value inference over one parsed module.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;
use tree_sitter::{Node, Parser, Point};

use super::docstring::{
    class_signature, docstring_of, function_signature, init_method, squash, with_doc,
};
use super::scope::{self, is_field, Binding, BindingKind};
use super::{module_name_for, name_at, named_children, text};
use crate::engine::builtins::{self, BuiltinDoc, BuiltinKind, MethodDoc};
use crate::engine::stdlib::{self, MemberDoc};
use crate::engine::{Candidate, SymbolKind};

/// Recursion limit for following names, attributes and calls.
const MAX_DEPTH: usize = 16;

/// Nesting limit for modules read from disk while resolving imports.
const MAX_IMPORT_DEPTH: usize = 4;

/// An inferred value. Local nodes stay as syntax nodes until described.
#[derive(Debug, Clone)]
pub(crate) enum Value<'t> {
    Module(ModuleValue),
    Function(Node<'t>),
    Class(Node<'t>),
    Instance(Node<'t>),
    Param(Node<'t>),
    Builtin(&'static BuiltinDoc),
    BuiltinInstance(&'static BuiltinDoc),
    BuiltinMethod(&'static MethodDoc),
    StdMember(&'static MemberDoc),
    /// Already described, e.g. a definition read from another file.
    Described(Candidate),
}

#[derive(Debug, Clone)]
pub(crate) struct ModuleValue {
    pub name: String,
    pub doc: String,
    /// Source file for modules found on disk.
    pub file: Option<PathBuf>,
    /// Directory holding submodules, for packages found on disk.
    pub package: Option<PathBuf>,
}

pub(crate) struct Resolver<'t> {
    source: &'t str,
    root: Node<'t>,
    module: String,
    dir: PathBuf,
    parser: &'t mut Parser,
    local_modules: bool,
    import_depth: usize,
}

impl<'t> Resolver<'t> {
    pub(crate) fn new(
        source: &'t str,
        root: Node<'t>,
        path: &Path,
        parser: &'t mut Parser,
        local_modules: bool,
    ) -> Self {
        Self {
            source,
            root,
            module: module_name_for(path),
            dir: path.parent().map(Path::to_path_buf).unwrap_or_default(),
            parser,
            local_modules,
            import_depth: 0,
        }
    }

    /// Candidates for whatever sits at `point`, deduplicated, in order.
    pub(crate) fn infer_at(&mut self, point: Point) -> Vec<Candidate> {
        let Some(leaf) = name_at(self.root, point) else {
            return Vec::new();
        };
        let values = match leaf.kind() {
            "identifier" => self.infer_name(leaf),
            "integer" => builtin_instance("int"),
            "float" => builtin_instance("float"),
            "true" | "false" => builtin_instance("bool"),
            "none" => builtin_instance("NoneType"),
            _ => Vec::new(),
        };
        debug!(kind = leaf.kind(), values = values.len(), "resolved leaf");

        let mut candidates: Vec<Candidate> = Vec::with_capacity(values.len());
        for value in values {
            let candidate = self.describe(value);
            if !candidates.contains(&candidate) {
                candidates.push(candidate);
            }
        }
        candidates
    }

    fn text(&self, node: Node<'t>) -> &'t str {
        text(node, self.source)
    }

    // ── Names ──

    fn infer_name(&mut self, ident: Node<'t>) -> Vec<Value<'t>> {
        let Some(parent) = ident.parent() else {
            return Vec::new();
        };
        if let Some(values) = self.infer_import_name(ident, parent) {
            return values;
        }
        match parent.kind() {
            "function_definition" if is_field(parent, "name", ident) => {
                vec![Value::Function(parent)]
            }
            "class_definition" if is_field(parent, "name", ident) => vec![Value::Class(parent)],
            "attribute" if is_field(parent, "attribute", ident) => {
                let Some(object) = parent.child_by_field_name("object") else {
                    return Vec::new();
                };
                let owners = self.infer_expr(object, 0);
                self.members(owners, self.text(ident), 0)
            }
            "keyword_argument" if is_field(parent, "name", ident) => {
                self.keyword_parameter(parent, self.text(ident))
            }
            _ => self.infer_reference(ident, 0),
        }
    }

    /// Names inside `import` and `from ... import` statements.
    fn infer_import_name(&mut self, ident: Node<'t>, parent: Node<'t>) -> Option<Vec<Value<'t>>> {
        if parent.kind() == "aliased_import" && is_field(parent, "alias", ident) {
            let imported = self.text(parent.child_by_field_name("name")?);
            let statement = parent.parent()?;
            return Some(self.imported(statement, imported));
        }
        if parent.kind() != "dotted_name" {
            return None;
        }

        let prefix = dotted_prefix(parent, ident, self.source);
        let holder = parent.parent()?;
        let values = match holder.kind() {
            "import_statement" => self.module_values(&prefix),
            "aliased_import" => {
                let statement = holder.parent()?;
                self.imported(statement, &prefix)
            }
            "import_from_statement" if is_field(holder, "module_name", parent) => {
                self.module_values(&prefix)
            }
            "import_from_statement" => self.from_import(holder, &prefix),
            "relative_import" => {
                let level = dots(holder, self.source);
                self.relative_module(level, Some(&prefix))
                    .map(Value::Module)
                    .into_iter()
                    .collect()
            }
            _ => return None,
        };
        Some(values)
    }

    /// `name` as imported by `statement`: a module for `import`, a member
    /// for `from ... import`.
    fn imported(&mut self, statement: Node<'t>, name: &str) -> Vec<Value<'t>> {
        if statement.kind() == "import_from_statement" {
            self.from_import(statement, name)
        } else {
            self.module_values(name)
        }
    }

    fn from_import(&mut self, statement: Node<'t>, member: &str) -> Vec<Value<'t>> {
        match statement.child_by_field_name("module_name") {
            Some(module) => self.from_import_member(module, member),
            None => Vec::new(),
        }
    }

    fn from_import_member(&mut self, module: Node<'t>, member: &str) -> Vec<Value<'t>> {
        let owner = match module.kind() {
            "relative_import" => {
                let level = dots(module, self.source);
                let name = named_children(module)
                    .into_iter()
                    .find(|n| n.kind() == "dotted_name")
                    .map(|n| self.text(n));
                self.relative_module(level, name)
            }
            _ => self.find_module(self.text(module)),
        };
        match owner {
            Some(owner) => self.module_member(&owner, member),
            None => Vec::new(),
        }
    }

    fn infer_reference(&mut self, ident: Node<'t>, depth: usize) -> Vec<Value<'t>> {
        let name = self.text(ident);
        match scope::lookup(name, ident, self.source) {
            Some(binding) => self.binding_values(&binding, depth),
            None => builtins::lookup(name)
                .map(Value::Builtin)
                .into_iter()
                .collect(),
        }
    }

    fn binding_values(&mut self, binding: &Binding<'t>, depth: usize) -> Vec<Value<'t>> {
        if depth > MAX_DEPTH {
            return Vec::new();
        }
        match &binding.kind {
            BindingKind::Function(def) => vec![Value::Function(*def)],
            BindingKind::Class(class) => vec![Value::Class(*class)],
            BindingKind::Assign {
                value,
                annotation,
                index,
            } => {
                if let Some(annotation) = annotation {
                    let declared = self.instances_of(*annotation, depth);
                    if !declared.is_empty() {
                        return declared;
                    }
                }
                let Some(value) = value else {
                    return Vec::new();
                };
                match index {
                    Some(i) => match unpack(*value, *i) {
                        Some(element) => self.infer_expr(element, depth + 1),
                        None => Vec::new(),
                    },
                    None => self.infer_expr(*value, depth + 1),
                }
            }
            BindingKind::Import { module } => self.module_values(module),
            BindingKind::FromImport { module, member } => self.from_import_member(*module, member),
            BindingKind::Param(param) => self.param_values(*param, depth),
            BindingKind::ExceptTarget(expr) => self.instances_of(*expr, depth),
            BindingKind::Opaque => Vec::new(),
        }
    }

    fn param_values(&mut self, param: Node<'t>, depth: usize) -> Vec<Value<'t>> {
        if let Some(receiver) = implicit_receiver(param, self.source) {
            return vec![receiver];
        }
        if let Some(annotation) = param.child_by_field_name("type") {
            let declared = self.instances_of(annotation, depth);
            if !declared.is_empty() {
                return declared;
            }
        }
        if let Some(default) = param.child_by_field_name("value") {
            let values = self.infer_expr(default, depth + 1);
            if !values.is_empty() {
                return values;
            }
        }
        vec![Value::Param(param)]
    }

    /// `f(name=...)`: the parameter `name` of whatever `f` is.
    fn keyword_parameter(&mut self, argument: Node<'t>, name: &str) -> Vec<Value<'t>> {
        let Some(call) = argument.parent().and_then(|args| args.parent()) else {
            return Vec::new();
        };
        let Some(function) = call.child_by_field_name("function") else {
            return Vec::new();
        };
        let callees = self.infer_expr(function, 0);
        let source = self.source;
        callees
            .into_iter()
            .filter_map(|callee| match callee {
                Value::Function(def) => Some(def),
                Value::Class(class) => init_method(class, source),
                _ => None,
            })
            .filter_map(|def| def.child_by_field_name("parameters"))
            .flat_map(named_children)
            .filter(|p| scope::parameter_name(*p).is_some_and(|n| text(n, source) == name))
            .map(Value::Param)
            .collect()
    }

    // ── Expressions ──

    fn infer_expr(&mut self, node: Node<'t>, depth: usize) -> Vec<Value<'t>> {
        if depth > MAX_DEPTH {
            return Vec::new();
        }
        match node.kind() {
            "identifier" => self.infer_reference(node, depth + 1),
            "attribute" => {
                let (Some(object), Some(attr)) = (
                    node.child_by_field_name("object"),
                    node.child_by_field_name("attribute"),
                ) else {
                    return Vec::new();
                };
                let owners = self.infer_expr(object, depth + 1);
                self.members(owners, self.text(attr), depth + 1)
            }
            "call" => {
                let Some(function) = node.child_by_field_name("function") else {
                    return Vec::new();
                };
                let callees = self.infer_expr(function, depth + 1);
                callees
                    .into_iter()
                    .flat_map(|callee| self.call_result(callee, depth + 1))
                    .collect()
            }
            "integer" => builtin_instance("int"),
            "float" => builtin_instance("float"),
            "string" | "concatenated_string" => {
                let literal = self.text(node);
                let prefix = &literal[..literal.find(['"', '\'']).unwrap_or(0)];
                if prefix.to_ascii_lowercase().contains('b') {
                    builtin_instance("bytes")
                } else {
                    builtin_instance("str")
                }
            }
            "true" | "false" | "comparison_operator" | "not_operator" => builtin_instance("bool"),
            "none" => builtin_instance("NoneType"),
            "list" | "list_comprehension" => builtin_instance("list"),
            "dictionary" | "dictionary_comprehension" => builtin_instance("dict"),
            "set" | "set_comprehension" => builtin_instance("set"),
            "tuple" => builtin_instance("tuple"),
            "parenthesized_expression" | "type" => match named_children(node).into_iter().next() {
                Some(inner) => self.infer_expr(inner, depth + 1),
                None => Vec::new(),
            },
            "conditional_expression" => {
                let parts = named_children(node);
                let mut values = Vec::new();
                if let Some(body) = parts.first() {
                    values.extend(self.infer_expr(*body, depth + 1));
                }
                if let Some(orelse) = parts.get(2) {
                    values.extend(self.infer_expr(*orelse, depth + 1));
                }
                values
            }
            "boolean_operator" => {
                let mut values = Vec::new();
                for field in ["left", "right"] {
                    if let Some(side) = node.child_by_field_name(field) {
                        values.extend(self.infer_expr(side, depth + 1));
                    }
                }
                values
            }
            "binary_operator" => match node.child_by_field_name("left") {
                Some(left) => self.infer_expr(left, depth + 1),
                None => Vec::new(),
            },
            "unary_operator" => match node.child_by_field_name("argument") {
                Some(arg) => self.infer_expr(arg, depth + 1),
                None => Vec::new(),
            },
            _ => Vec::new(),
        }
    }

    /// Annotation or exception expression → instances of the named types.
    fn instances_of(&mut self, expr: Node<'t>, depth: usize) -> Vec<Value<'t>> {
        let types = self.infer_expr(expr, depth + 1);
        types
            .into_iter()
            .filter_map(|value| match value {
                Value::Class(class) => Some(Value::Instance(class)),
                Value::Builtin(doc) if doc.kind == BuiltinKind::Class => {
                    Some(Value::BuiltinInstance(doc))
                }
                Value::StdMember(member) if member.kind == SymbolKind::Class => {
                    Some(Value::Described(std_instance(member)))
                }
                _ => None,
            })
            .collect()
    }

    fn call_result(&mut self, callee: Value<'t>, depth: usize) -> Vec<Value<'t>> {
        match callee {
            Value::Class(class) => vec![Value::Instance(class)],
            Value::Builtin(doc) => match doc.kind {
                BuiltinKind::Class => vec![Value::BuiltinInstance(doc)],
                BuiltinKind::Function => returned_builtin(doc.returns),
            },
            Value::BuiltinMethod(method) => returned_builtin(method.returns),
            Value::Function(def) => self.return_values(def, depth),
            Value::StdMember(member) => match member.kind {
                SymbolKind::Class => vec![Value::Described(std_instance(member))],
                _ => returned_builtin(member.returns),
            },
            _ => Vec::new(),
        }
    }

    fn return_values(&mut self, def: Node<'t>, depth: usize) -> Vec<Value<'t>> {
        if let Some(annotation) = def.child_by_field_name("return_type") {
            return self.instances_of(annotation, depth);
        }
        let Some(body) = def.child_by_field_name("body") else {
            return Vec::new();
        };
        let mut returned = Vec::new();
        collect_returns(body, &mut returned);
        returned
            .into_iter()
            .flat_map(|expr| self.infer_expr(expr, depth + 1))
            .collect()
    }

    // ── Members ──

    fn members(&mut self, owners: Vec<Value<'t>>, name: &str, depth: usize) -> Vec<Value<'t>> {
        owners
            .into_iter()
            .flat_map(|owner| match owner {
                Value::Module(module) => self.module_member(&module, name),
                Value::Class(class) => self.class_member(class, name, false, depth),
                Value::Instance(class) => self.class_member(class, name, true, depth),
                Value::Builtin(doc) | Value::BuiltinInstance(doc) => builtins::method(doc.name, name)
                    .map(Value::BuiltinMethod)
                    .into_iter()
                    .collect(),
                _ => Vec::new(),
            })
            .collect()
    }

    fn class_member(
        &mut self,
        class: Node<'t>,
        name: &str,
        instance: bool,
        depth: usize,
    ) -> Vec<Value<'t>> {
        if depth > MAX_DEPTH {
            return Vec::new();
        }
        let bindings = scope::collect(class, self.source);
        if let Some(binding) = bindings.iter().rev().find(|b| b.name == name) {
            return self.binding_values(binding, depth + 1);
        }

        if instance {
            if let Some(value) = self_assignment(class, name, self.source) {
                return self.infer_expr(value, depth + 1);
            }
        }

        let Some(bases) = class.child_by_field_name("superclasses") else {
            return Vec::new();
        };
        for base in named_children(bases) {
            let owners: Vec<Value<'t>> = self
                .infer_expr(base, depth + 1)
                .into_iter()
                .map(|owner| match owner {
                    Value::Class(c) if instance => Value::Instance(c),
                    other => other,
                })
                .collect();
            let found = self.members(owners, name, depth + 1);
            if !found.is_empty() {
                return found;
            }
        }
        Vec::new()
    }

    // ── Modules ──

    fn module_values(&mut self, name: &str) -> Vec<Value<'t>> {
        self.find_module(name)
            .map(Value::Module)
            .into_iter()
            .collect()
    }

    fn find_module(&mut self, name: &str) -> Option<ModuleValue> {
        if let Some(doc) = stdlib::module_doc(name) {
            return Some(ModuleValue {
                name: name.to_string(),
                doc: doc.to_string(),
                file: None,
                package: None,
            });
        }
        if !self.local_modules {
            return None;
        }
        let relative: PathBuf = name.split('.').collect();
        let file = module_file(&self.dir, &relative)?;
        Some(self.load_module(name.to_string(), file))
    }

    /// Module named by a relative import: `level` dots, then `name`.
    fn relative_module(&mut self, level: usize, name: Option<&str>) -> Option<ModuleValue> {
        if !self.local_modules {
            return None;
        }
        let mut base = self.dir.clone();
        for _ in 1..level {
            base.pop();
        }
        let package = base
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        match name {
            Some(name) => {
                let relative: PathBuf = name.split('.').collect();
                let file = module_file(&base, &relative)?;
                let qualified = if package.is_empty() {
                    name.to_string()
                } else {
                    format!("{package}.{name}")
                };
                Some(self.load_module(qualified, file))
            }
            None => {
                let file = base.join("__init__.py");
                if file.is_file() {
                    return Some(self.load_module(package, file));
                }
                // namespace package: submodules only
                Some(ModuleValue {
                    name: package,
                    doc: String::new(),
                    file: None,
                    package: Some(base),
                })
            }
        }
    }

    fn load_module(&mut self, name: String, file: PathBuf) -> ModuleValue {
        let doc = match fs::read_to_string(&file) {
            Ok(source) => self
                .parser
                .parse(&source, None)
                .and_then(|tree| docstring_of(tree.root_node(), &source))
                .unwrap_or_default(),
            Err(e) => {
                debug!(file = %file.display(), error = %e, "module unreadable");
                String::new()
            }
        };
        let package = file
            .file_name()
            .is_some_and(|n| n == "__init__.py")
            .then(|| file.parent().map(Path::to_path_buf).unwrap_or_default());
        ModuleValue {
            name,
            doc,
            file: Some(file),
            package,
        }
    }

    fn module_member(&mut self, module: &ModuleValue, member: &str) -> Vec<Value<'t>> {
        let dotted = format!("{}.{member}", module.name);
        if let Some(doc) = stdlib::module_doc(&dotted) {
            return vec![Value::Module(ModuleValue {
                name: dotted,
                doc: doc.to_string(),
                file: None,
                package: None,
            })];
        }
        if let Some(doc) = stdlib::member(&module.name, member) {
            return vec![Value::StdMember(doc)];
        }
        if let Some(package) = &module.package {
            if let Some(sub) = module_file(package, Path::new(member)) {
                return vec![Value::Module(self.load_module(dotted, sub))];
            }
        }
        match &module.file {
            Some(file) => self.foreign_member(file, &module.name, member),
            None => Vec::new(),
        }
    }

    /// Top-level definition `member` of a module read from `file`.
    fn foreign_member(&mut self, file: &Path, module: &str, member: &str) -> Vec<Value<'t>> {
        if self.import_depth >= MAX_IMPORT_DEPTH {
            return Vec::new();
        }
        let source = match fs::read_to_string(file) {
            Ok(source) => source,
            Err(e) => {
                debug!(file = %file.display(), error = %e, "module unreadable");
                return Vec::new();
            }
        };
        let Some(tree) = self.parser.parse(&source, None) else {
            return Vec::new();
        };

        let mut nested = Resolver {
            source: &source,
            root: tree.root_node(),
            module: module.to_string(),
            dir: file.parent().map(Path::to_path_buf).unwrap_or_default(),
            parser: &mut *self.parser,
            local_modules: self.local_modules,
            import_depth: self.import_depth + 1,
        };
        nested
            .top_level(member)
            .into_iter()
            .map(Value::Described)
            .collect()
    }

    fn top_level(&mut self, name: &str) -> Vec<Candidate> {
        let bindings = scope::collect(self.root, self.source);
        let Some(binding) = bindings.iter().rev().find(|b| b.name == name) else {
            return Vec::new();
        };
        let values = self.binding_values(binding, 0);
        values.into_iter().map(|v| self.describe(v)).collect()
    }

    // ── Description ──

    fn describe(&self, value: Value<'t>) -> Candidate {
        match value {
            Value::Module(module) => Candidate::module(&module.name, &module.doc),
            Value::Function(def) => {
                let doc = def
                    .child_by_field_name("body")
                    .and_then(|b| docstring_of(b, self.source));
                let signature = function_signature(def, self.source);
                self.local(def, SymbolKind::Function, with_doc(signature, doc))
            }
            Value::Class(class) => {
                let docstring = self.class_docstring(class);
                self.local(class, SymbolKind::Class, docstring)
            }
            Value::Instance(class) => {
                let docstring = self.class_docstring(class);
                self.local(class, SymbolKind::Instance, docstring)
            }
            Value::Param(param) => Candidate {
                name: scope::parameter_name(param)
                    .map(|n| self.text(n).to_string())
                    .unwrap_or_default(),
                full_name: None,
                kind: SymbolKind::Param,
                docstring: squash(self.text(param)),
                module_name: Some(self.module.clone()),
            },
            Value::Builtin(doc) => builtin_candidate(doc, false),
            Value::BuiltinInstance(doc) => builtin_candidate(doc, true),
            Value::BuiltinMethod(method) => Candidate {
                name: method.name.to_string(),
                full_name: Some(format!("builtins.{}.{}", method.owner, method.name)),
                kind: SymbolKind::Function,
                docstring: method.doc.to_string(),
                module_name: Some("builtins".to_string()),
            },
            Value::StdMember(member) => Candidate {
                name: member.name.to_string(),
                full_name: Some(format!("{}.{}", member.module, member.name)),
                kind: member.kind,
                docstring: member.doc.to_string(),
                module_name: Some(member.module.to_string()),
            },
            Value::Described(candidate) => candidate,
        }
    }

    fn class_docstring(&self, class: Node<'t>) -> String {
        let doc = class
            .child_by_field_name("body")
            .and_then(|b| docstring_of(b, self.source));
        with_doc(class_signature(class, self.source), doc)
    }

    /// Candidate for a definition in this module.
    fn local(&self, def: Node<'t>, kind: SymbolKind, docstring: String) -> Candidate {
        let name = def
            .child_by_field_name("name")
            .map(|n| self.text(n).to_string())
            .unwrap_or_default();
        Candidate {
            full_name: Some(self.qualified(def, &name)),
            name,
            kind,
            docstring,
            module_name: Some(self.module.clone()),
        }
    }

    /// `module.Outer.inner` for a definition node named `name`.
    fn qualified(&self, def: Node<'t>, name: &str) -> String {
        let mut parts = vec![name.to_string()];
        let mut node = def;
        while let Some(parent) = node.parent() {
            if matches!(parent.kind(), "function_definition" | "class_definition") {
                if let Some(n) = parent.child_by_field_name("name") {
                    parts.push(self.text(n).to_string());
                }
            }
            node = parent;
        }
        parts.push(self.module.clone());
        parts.reverse();
        parts.join(".")
    }
}

/// `dir/a/b.py`, else `dir/a/b/__init__.py`.
fn module_file(dir: &Path, relative: &Path) -> Option<PathBuf> {
    let base = dir.join(relative);
    let file = base.with_extension("py");
    if file.is_file() {
        return Some(file);
    }
    let package = base.join("__init__.py");
    package.is_file().then_some(package)
}

fn builtin_instance(name: &str) -> Vec<Value<'static>> {
    builtins::lookup(name)
        .map(Value::BuiltinInstance)
        .into_iter()
        .collect()
}

fn returned_builtin(returns: Option<&str>) -> Vec<Value<'static>> {
    returns.map(builtin_instance).unwrap_or_default()
}

fn builtin_candidate(doc: &BuiltinDoc, instance: bool) -> Candidate {
    let kind = match (instance, doc.kind) {
        (true, _) => SymbolKind::Instance,
        (false, BuiltinKind::Class) => SymbolKind::Class,
        (false, BuiltinKind::Function) => SymbolKind::Function,
    };
    Candidate {
        name: doc.name.to_string(),
        full_name: Some(format!("builtins.{}", doc.name)),
        kind,
        docstring: doc.doc.to_string(),
        module_name: Some("builtins".to_string()),
    }
}

fn std_instance(member: &MemberDoc) -> Candidate {
    Candidate {
        name: member.name.to_string(),
        full_name: Some(format!("{}.{}", member.module, member.name)),
        kind: SymbolKind::Instance,
        docstring: member.doc.to_string(),
        module_name: Some(member.module.to_string()),
    }
}

/// `a.b.c` up to and including `ident`.
fn dotted_prefix(dotted: Node<'_>, ident: Node<'_>, source: &str) -> String {
    let mut parts = Vec::new();
    for part in named_children(dotted) {
        parts.push(text(part, source));
        if part == ident {
            break;
        }
    }
    parts.join(".")
}

/// Number of leading dots of a relative import.
fn dots(relative: Node<'_>, source: &str) -> usize {
    named_children(relative)
        .into_iter()
        .find(|n| n.kind() == "import_prefix")
        .map(|prefix| text(prefix, source).chars().filter(|c| *c == '.').count())
        .unwrap_or(1)
}

/// Element `index` of a tuple/list literal on the right of an unpacking.
fn unpack(value: Node<'_>, index: usize) -> Option<Node<'_>> {
    if !matches!(value.kind(), "expression_list" | "tuple" | "list") {
        return None;
    }
    named_children(value)
        .into_iter()
        .filter(|n| n.kind() != "comment")
        .nth(index)
}

/// `self` and `cls` in methods: the instance or class they receive.
fn implicit_receiver<'t>(param: Node<'t>, source: &str) -> Option<Value<'t>> {
    if param.kind() != "identifier" {
        return None;
    }
    let params = param.parent()?;
    let first = named_children(params).into_iter().next()?;
    if first != param {
        return None;
    }
    let def = params.parent()?;
    if def.kind() != "function_definition" {
        return None;
    }

    let mut holder = def.parent()?;
    let mut decorators: Vec<&str> = Vec::new();
    if holder.kind() == "decorated_definition" {
        decorators = named_children(holder)
            .into_iter()
            .filter(|n| n.kind() == "decorator")
            .map(|n| text(n, source).trim_start_matches('@').trim())
            .collect();
        holder = holder.parent()?;
    }
    let class = holder.parent()?;
    if holder.kind() != "block" || class.kind() != "class_definition" {
        return None;
    }

    if decorators.contains(&"staticmethod") {
        None
    } else if decorators.contains(&"classmethod") {
        Some(Value::Class(class))
    } else {
        Some(Value::Instance(class))
    }
}

/// Value assigned to `self.<name>` anywhere in the class's methods.
fn self_assignment<'t>(class: Node<'t>, name: &str, source: &str) -> Option<Node<'t>> {
    let body = class.child_by_field_name("body")?;
    let mut stack = vec![body];
    while let Some(node) = stack.pop() {
        if node.kind() == "assignment" {
            let assigned = node.child_by_field_name("left").is_some_and(|left| {
                left.kind() == "attribute"
                    && left
                        .child_by_field_name("object")
                        .is_some_and(|o| text(o, source) == "self")
                    && left
                        .child_by_field_name("attribute")
                        .is_some_and(|a| text(a, source) == name)
            });
            if assigned {
                return node.child_by_field_name("right");
            }
        }
        if node.kind() == "class_definition" {
            continue;
        }
        let mut children = named_children(node);
        children.reverse();
        stack.extend(children);
    }
    None
}

/// Expressions returned from a function body, not counting nested scopes.
fn collect_returns<'t>(body: Node<'t>, out: &mut Vec<Node<'t>>) {
    let mut stack = named_children(body);
    stack.reverse();
    while let Some(node) = stack.pop() {
        match node.kind() {
            "return_statement" => out.extend(named_children(node).into_iter().next()),
            "function_definition" | "class_definition" | "lambda" => {}
            _ => {
                let mut children = named_children(node);
                children.reverse();
                stack.extend(children);
            }
        }
    }
}
