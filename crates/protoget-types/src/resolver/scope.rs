//! Name tables used during resolution.

use rustc_hash::FxHashMap;

use crate::types::TypeId;

/// What a package-level name denotes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Entity {
    Type(TypeId),
    /// A function; the id is its signature.
    Func(TypeId),
    Var(TypeId),
}

#[derive(Debug, Default)]
pub(crate) struct PackageScope {
    pub name: String,
    pub path: String,
    pub members: FxHashMap<String, Entity>,
}

/// Import bindings of one file. `None` marks a package that is imported but
/// not part of the program (e.g. `fmt`): the name is a namespace with no
/// known members.
#[derive(Debug, Default)]
pub(crate) struct FileScope {
    pub imports: FxHashMap<String, Option<usize>>,
}

/// Lexical block scopes inside a function body.
#[derive(Debug, Default)]
pub(crate) struct LocalScopes {
    frames: Vec<FxHashMap<String, TypeId>>,
}

impl LocalScopes {
    pub fn new() -> Self {
        LocalScopes {
            frames: vec![FxHashMap::default()],
        }
    }

    pub fn push(&mut self) {
        self.frames.push(FxHashMap::default());
    }

    pub fn pop(&mut self) {
        self.frames.pop();
    }

    /// Bind `name` in the innermost frame. The blank identifier is never
    /// bound.
    pub fn bind(&mut self, name: &str, ty: TypeId) {
        if name == "_" || name.is_empty() {
            return;
        }
        if let Some(frame) = self.frames.last_mut() {
            frame.insert(name.to_string(), ty);
        }
    }

    pub fn lookup(&self, name: &str) -> Option<TypeId> {
        self.frames
            .iter()
            .rev()
            .find_map(|frame| frame.get(name).copied())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }
}
