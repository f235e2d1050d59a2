//! Whole-program type resolution.
//!
//! Packages are resolved together so a file can see message types declared
//! in the packages it imports. Resolution runs in phases:
//!
//! 1. declare every named type of every package,
//! 2. bind each file's imports to loaded packages,
//! 3. resolve underlying types,
//! 4. declare functions, methods and package-level variables,
//! 5. walk function bodies and record expression types per file.

mod bodies;
mod scope;
mod type_nodes;

use protoget_parser::parser::syntax_kind_ext::{
    FUNCTION_DECLARATION, IMPORT_DECLARATION, POINTER_TYPE, TYPE_DECLARATION, VARIABLE_STATEMENT,
};
use protoget_parser::parser::{NodeArena, NodeIndex};
use tracing::{debug, trace};

use crate::info::{ExprTypes, TypeInfo};
use crate::intern::TypeInterner;
use crate::types::{MethodInfo, TypeId};
use bodies::BodyContext;
use scope::{Entity, FileScope, LocalScopes, PackageScope};

/// A parsed file: its arena and root `SOURCE_FILE` node.
#[derive(Clone, Copy)]
pub struct SourceUnit<'a> {
    pub arena: &'a NodeArena,
    pub root: NodeIndex,
}

/// The files of one package. `path` is matched against import paths by
/// suffix (`example.com/app/gen/pb` imports a package whose path is `gen/pb`).
pub struct PackageInput<'a> {
    pub path: String,
    pub files: Vec<SourceUnit<'a>>,
}

/// Resolved types for a whole program.
pub struct ProgramTypes {
    pub interner: TypeInterner,
    /// Indexed by package, then file, in input order.
    files: Vec<Vec<ExprTypes>>,
}

impl ProgramTypes {
    pub fn expr_types(&self, package: usize, file: usize) -> Option<&ExprTypes> {
        self.files.get(package)?.get(file)
    }

    pub fn type_info(&self, package: usize, file: usize) -> Option<TypeInfo<'_>> {
        self.expr_types(package, file)
            .map(|exprs| TypeInfo::new(&self.interner, exprs))
    }

    pub fn package_count(&self) -> usize {
        self.files.len()
    }
}

/// Resolve every package of a program.
#[tracing::instrument(level = "debug", skip_all, fields(packages = packages.len()))]
pub fn resolve_program(packages: &[PackageInput<'_>]) -> ProgramTypes {
    let mut resolver = ProgramResolver::new(packages);
    let type_decls = resolver.declare_types();
    resolver.bind_imports();
    resolver.resolve_underlying_types(&type_decls);
    resolver.declare_functions();
    resolver.declare_package_vars();
    resolver.resolve_bodies();
    resolver.finish()
}

/// Resolve a single file as a one-package program.
pub fn resolve_file(arena: &NodeArena, root: NodeIndex) -> ProgramTypes {
    resolve_program(&[PackageInput {
        path: String::new(),
        files: vec![SourceUnit { arena, root }],
    }])
}

fn import_matches(import: &str, package_path: &str) -> bool {
    !package_path.is_empty()
        && (import == package_path
            || import
                .strip_suffix(package_path)
                .is_some_and(|prefix| prefix.ends_with('/'))
            || package_path
                .strip_suffix(import)
                .is_some_and(|prefix| prefix.ends_with('/')))
}

fn last_segment(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

pub(crate) struct ProgramResolver<'a> {
    packages: &'a [PackageInput<'a>],
    interner: TypeInterner,
    scopes: Vec<PackageScope>,
    file_scopes: Vec<Vec<FileScope>>,
    exprs: Vec<Vec<ExprTypes>>,
}

struct PendingType {
    pkg: usize,
    file: usize,
    named: TypeId,
    type_node: NodeIndex,
}

impl<'a> ProgramResolver<'a> {
    fn new(packages: &'a [PackageInput<'a>]) -> Self {
        let scopes = packages
            .iter()
            .map(|package| {
                let declared = package
                    .files
                    .iter()
                    .find_map(|unit| unit.arena.package_name(unit.root))
                    .filter(|name| !name.is_empty());
                PackageScope {
                    name: declared
                        .unwrap_or_else(|| last_segment(&package.path))
                        .to_string(),
                    path: package.path.clone(),
                    members: Default::default(),
                }
            })
            .collect();
        let file_scopes = packages
            .iter()
            .map(|p| p.files.iter().map(|_| FileScope::default()).collect())
            .collect();
        let exprs = packages
            .iter()
            .map(|p| p.files.iter().map(|_| ExprTypes::default()).collect())
            .collect();

        ProgramResolver {
            packages,
            interner: TypeInterner::new(),
            scopes,
            file_scopes,
            exprs,
        }
    }

    /// Top-level declarations of every file, with their package/file index.
    fn top_level(&self, kind: u16) -> Vec<(usize, usize, NodeIndex)> {
        let mut out = Vec::new();
        for (pkg, package) in self.packages.iter().enumerate() {
            for (file, unit) in package.files.iter().enumerate() {
                let Some(source) = unit
                    .arena
                    .get(unit.root)
                    .and_then(|n| unit.arena.get_source_file(n))
                else {
                    continue;
                };
                out.extend(
                    source
                        .statements
                        .iter()
                        .filter(|&stmt| unit.arena.kind_of(stmt) == Some(kind))
                        .map(|stmt| (pkg, file, stmt)),
                );
            }
        }
        out
    }

    fn declare_types(&mut self) -> Vec<PendingType> {
        let mut pending = Vec::new();
        for (pkg, file, decl) in self.top_level(TYPE_DECLARATION) {
            let arena = self.packages[pkg].files[file].arena;
            let Some(data) = arena.get(decl).and_then(|n| arena.get_type_decl(n)) else {
                continue;
            };
            let Some(name) = arena.identifier_text(data.name).filter(|n| !n.is_empty()) else {
                continue;
            };
            let named = self.interner.declare_named(&self.scopes[pkg].name, name);
            self.scopes[pkg]
                .members
                .insert(name.to_string(), Entity::Type(named));
            pending.push(PendingType {
                pkg,
                file,
                named,
                type_node: data.type_node,
            });
        }
        pending
    }

    fn bind_imports(&mut self) {
        for (pkg, file, decl) in self.top_level(IMPORT_DECLARATION) {
            let arena = self.packages[pkg].files[file].arena;
            let Some(data) = arena.get(decl).and_then(|n| arena.get_import_decl(n)) else {
                continue;
            };

            let target = self
                .scopes
                .iter()
                .position(|scope| scope.path == data.path && !scope.path.is_empty())
                .or_else(|| {
                    self.scopes
                        .iter()
                        .position(|scope| import_matches(&data.path, &scope.path))
                });
            if target.is_none() {
                trace!(import = %data.path, "import not part of the program");
            }

            let alias = match arena.identifier_text(data.name) {
                Some(alias) => alias.to_string(),
                None => match target {
                    Some(index) => self.scopes[index].name.clone(),
                    None => last_segment(&data.path).to_string(),
                },
            };
            if alias == "_" || alias.is_empty() {
                continue;
            }
            self.file_scopes[pkg][file].imports.insert(alias, target);
        }
    }

    fn resolve_underlying_types(&mut self, pending: &[PendingType]) {
        for decl in pending {
            let underlying = self.resolve_type_node(decl.pkg, decl.file, decl.type_node);
            self.interner.set_underlying(decl.named, underlying);
        }
    }

    fn declare_functions(&mut self) {
        for (pkg, file, decl) in self.top_level(FUNCTION_DECLARATION) {
            let arena = self.packages[pkg].files[file].arena;
            let Some(function) = arena.get(decl).and_then(|n| arena.get_function(n)) else {
                continue;
            };
            let Some(name) = arena.identifier_text(function.name).filter(|n| !n.is_empty()) else {
                continue;
            };

            let signature = self.signature_type(pkg, file, decl);

            if function.receiver.is_none() {
                self.scopes[pkg]
                    .members
                    .insert(name.to_string(), Entity::Func(signature));
                continue;
            }

            let Some(receiver_type) = arena
                .get(function.receiver)
                .and_then(|n| arena.get_field(n))
                .map(|f| f.type_annotation)
            else {
                continue;
            };
            let (base_node, pointer_receiver) = match arena.get(receiver_type) {
                Some(n) if n.kind == POINTER_TYPE => (
                    arena
                        .get_wrapped_type(n)
                        .map_or(NodeIndex::NONE, |w| w.type_node),
                    true,
                ),
                _ => (receiver_type, false),
            };
            let Some(Entity::Type(named)) = arena
                .identifier_text(base_node)
                .and_then(|base| self.scopes[pkg].members.get(base))
                .copied()
            else {
                trace!(method = name, "receiver is not a local named type");
                continue;
            };
            self.interner.add_method(
                named,
                MethodInfo {
                    name: name.to_string(),
                    signature,
                    pointer_receiver,
                },
            );
        }
    }

    fn declare_package_vars(&mut self) {
        for (pkg, file, decl) in self.top_level(VARIABLE_STATEMENT) {
            let arena = self.packages[pkg].files[file].arena;
            let mut cx = BodyContext {
                pkg,
                file,
                arena,
                locals: LocalScopes::new(),
            };
            for (name, ty) in self.resolve_variable(&mut cx, decl) {
                if name != "_" {
                    self.scopes[pkg].members.insert(name, Entity::Var(ty));
                }
            }
        }
    }

    fn resolve_bodies(&mut self) {
        for (pkg, file, decl) in self.top_level(FUNCTION_DECLARATION) {
            let arena = self.packages[pkg].files[file].arena;
            let Some(function) = arena.get(decl).and_then(|n| arena.get_function(n)) else {
                continue;
            };
            if function.body.is_none() {
                continue;
            }

            let mut cx = BodyContext {
                pkg,
                file,
                arena,
                locals: LocalScopes::new(),
            };
            self.bind_parameters(&mut cx, function);
            self.resolve_statement(&mut cx, function.body);
        }
    }

    fn finish(self) -> ProgramTypes {
        for (scope, exprs) in self.scopes.iter().zip(&self.exprs) {
            debug!(
                package = %scope.name,
                path = %scope.path,
                members = scope.members.len(),
                typed_expressions = exprs.iter().map(|e| e.len()).sum::<usize>(),
                "resolved package"
            );
        }
        ProgramTypes {
            interner: self.interner,
            files: self.exprs,
        }
    }
}
