//! Type interning and the structural queries built on it.
//!
//! Structural types are deduplicated through a hash map; named types are
//! allocated fresh by `declare_named`, so two declarations with the same
//! spelling in different packages stay distinct.

use rustc_hash::FxHashMap;

use crate::types::{BasicKind, FieldInfo, MethodInfo, MethodSig, NamedTypeInfo, TypeData, TypeId};

/// Bound on `type A B` chains and embedded-field promotion depth.
const MAX_NAMED_DEPTH: usize = 32;

#[derive(Debug)]
pub struct TypeInterner {
    types: Vec<TypeData>,
    map: FxHashMap<TypeData, TypeId>,
    named: Vec<NamedTypeInfo>,
}

impl Default for TypeInterner {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeInterner {
    pub fn new() -> TypeInterner {
        let mut interner = TypeInterner {
            types: Vec::new(),
            map: FxHashMap::default(),
            named: Vec::new(),
        };

        // Order must match the `TypeId` constants.
        for kind in [
            BasicKind::Unknown,
            BasicKind::Bool,
            BasicKind::Int,
            BasicKind::Int8,
            BasicKind::Int16,
            BasicKind::Int32,
            BasicKind::Int64,
            BasicKind::Uint,
            BasicKind::Uint8,
            BasicKind::Uint16,
            BasicKind::Uint32,
            BasicKind::Uint64,
            BasicKind::Float32,
            BasicKind::Float64,
            BasicKind::String,
        ] {
            interner.intern(TypeData::Basic(kind));
        }
        let empty = interner.signature(Vec::new(), Vec::new());
        debug_assert_eq!(empty, TypeId::EMPTY_SIGNATURE);

        let error = interner.declare_named("", "error");
        debug_assert_eq!(error, TypeId::ERROR);
        let error_method = interner.signature(Vec::new(), vec![TypeId::STRING]);
        let error_iface = interner.interface(vec![MethodSig {
            name: "Error".to_string(),
            signature: error_method,
        }]);
        interner.set_underlying(error, error_iface);

        interner
    }

    /// Intern `data`, returning the existing id for structurally equal data.
    pub fn intern(&mut self, data: TypeData) -> TypeId {
        if let Some(&id) = self.map.get(&data) {
            return id;
        }
        let id = TypeId(u32::try_from(self.types.len()).unwrap_or(u32::MAX));
        self.types.push(data.clone());
        self.map.insert(data, id);
        id
    }

    #[inline]
    pub fn lookup(&self, id: TypeId) -> Option<&TypeData> {
        self.types.get(id.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    // =========================================================================
    // Constructors
    // =========================================================================

    pub fn pointer(&mut self, elem: TypeId) -> TypeId {
        self.intern(TypeData::Pointer(elem))
    }

    pub fn slice(&mut self, elem: TypeId) -> TypeId {
        self.intern(TypeData::Slice(elem))
    }

    pub fn array(&mut self, elem: TypeId) -> TypeId {
        self.intern(TypeData::Array(elem))
    }

    pub fn map(&mut self, key: TypeId, value: TypeId) -> TypeId {
        self.intern(TypeData::Map { key, value })
    }

    pub fn chan(&mut self, elem: TypeId) -> TypeId {
        self.intern(TypeData::Chan(elem))
    }

    pub fn signature(&mut self, params: Vec<TypeId>, results: Vec<TypeId>) -> TypeId {
        self.intern(TypeData::Signature { params, results })
    }

    pub fn struct_type(&mut self, fields: Vec<FieldInfo>) -> TypeId {
        self.intern(TypeData::Struct(fields))
    }

    /// Intern an interface; method order does not matter.
    pub fn interface(&mut self, mut methods: Vec<MethodSig>) -> TypeId {
        methods.sort_by(|a, b| a.name.cmp(&b.name));
        methods.dedup_by(|a, b| a.name == b.name);
        self.intern(TypeData::Interface(methods))
    }

    /// Allocate a new named type. Its underlying type is `UNKNOWN` until
    /// `set_underlying` is called.
    pub fn declare_named(&mut self, package: &str, name: &str) -> TypeId {
        let index = u32::try_from(self.named.len()).unwrap_or(u32::MAX);
        self.named.push(NamedTypeInfo {
            package: package.to_string(),
            name: name.to_string(),
            underlying: TypeId::UNKNOWN,
            methods: Vec::new(),
        });
        self.intern(TypeData::Named(index))
    }

    pub fn named_info(&self, id: TypeId) -> Option<&NamedTypeInfo> {
        match self.lookup(id)? {
            TypeData::Named(index) => self.named.get(*index as usize),
            _ => None,
        }
    }

    fn named_info_mut(&mut self, id: TypeId) -> Option<&mut NamedTypeInfo> {
        match self.types.get(id.0 as usize)? {
            TypeData::Named(index) => self.named.get_mut(*index as usize),
            _ => None,
        }
    }

    pub fn set_underlying(&mut self, named: TypeId, underlying: TypeId) {
        if let Some(info) = self.named_info_mut(named) {
            info.underlying = underlying;
        }
    }

    /// Attach a method to a named type. A later method with the same name
    /// replaces the earlier one.
    pub fn add_method(&mut self, named: TypeId, method: MethodInfo) {
        if let Some(info) = self.named_info_mut(named) {
            info.methods.retain(|m| m.name != method.name);
            info.methods.push(method);
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Underlying type: named types are followed to the first non-named type.
    pub fn underlying(&self, mut id: TypeId) -> TypeId {
        for _ in 0..MAX_NAMED_DEPTH {
            match self.named_info(id) {
                Some(info) => id = info.underlying,
                None => return id,
            }
        }
        TypeId::UNKNOWN
    }

    pub fn is_interface(&self, id: TypeId) -> bool {
        matches!(
            self.lookup(self.underlying(id)),
            Some(TypeData::Interface(_))
        )
    }

    /// Look up `name` in the method set of `ty`, following Go: `T` has its
    /// value-receiver methods, `*T` has all methods of `T`, an interface
    /// has its declared methods.
    pub fn method_set_lookup(&self, ty: TypeId, name: &str) -> Option<TypeId> {
        self.find_method(ty, name, false)
    }

    /// Like `method_set_lookup`, but for an addressable operand: a variable
    /// of type `T` may also call pointer-receiver methods.
    pub fn selectable_method(&self, ty: TypeId, name: &str) -> Option<TypeId> {
        self.find_method(ty, name, true)
    }

    fn find_method(&self, ty: TypeId, name: &str, addressable: bool) -> Option<TypeId> {
        if let Some(TypeData::Interface(methods)) = self.lookup(self.underlying(ty)) {
            return methods
                .iter()
                .find(|m| m.name == name)
                .map(|m| m.signature);
        }

        let (named, through_pointer) = match self.lookup(ty)? {
            TypeData::Pointer(elem) => (*elem, true),
            TypeData::Named(_) => (ty, false),
            _ => return None,
        };
        let info = self.named_info(named)?;
        if through_pointer && self.is_interface(named) {
            // Pointers to interfaces have no methods.
            return None;
        }
        info.methods
            .iter()
            .find(|m| m.name == name && (through_pointer || addressable || !m.pointer_receiver))
            .map(|m| m.signature)
    }

    /// Whether `ty` implements the interface `iface`: every interface
    /// method is in the method set of `ty` with an identical signature.
    pub fn implements(&self, ty: TypeId, iface: TypeId) -> bool {
        let Some(TypeData::Interface(required)) = self.lookup(self.underlying(iface)) else {
            return false;
        };
        required
            .iter()
            .all(|m| self.method_set_lookup(ty, &m.name) == Some(m.signature))
    }

    /// Type of field `name` selected from `ty`, dereferencing one pointer
    /// and falling back to promoted fields of embedded structs.
    pub fn field(&self, ty: TypeId, name: &str) -> Option<TypeId> {
        self.field_at_depth(ty, name, 0)
    }

    fn field_at_depth(&self, ty: TypeId, name: &str, depth: usize) -> Option<TypeId> {
        if depth > MAX_NAMED_DEPTH {
            return None;
        }
        let base = match self.lookup(ty)? {
            TypeData::Pointer(elem) => *elem,
            _ => ty,
        };
        let TypeData::Struct(fields) = self.lookup(self.underlying(base))? else {
            return None;
        };
        if let Some(field) = fields.iter().find(|f| f.name == name) {
            return Some(field.type_id);
        }
        fields
            .iter()
            .filter(|f| f.embedded)
            .find_map(|f| self.field_at_depth(f.type_id, name, depth + 1))
    }

    /// Results of a signature type.
    pub fn signature_results(&self, ty: TypeId) -> Option<&[TypeId]> {
        match self.lookup(self.underlying(ty))? {
            TypeData::Signature { results, .. } => Some(results),
            _ => None,
        }
    }

    /// Go-like spelling of a type, for logs and test assertions.
    pub fn display(&self, id: TypeId) -> String {
        let Some(data) = self.lookup(id) else {
            return format!("<type {}>", id.0);
        };
        match data {
            TypeData::Basic(kind) => kind.name().to_string(),
            TypeData::Pointer(elem) => format!("*{}", self.display(*elem)),
            TypeData::Slice(elem) => format!("[]{}", self.display(*elem)),
            TypeData::Array(elem) => format!("[...]{}", self.display(*elem)),
            TypeData::Map { key, value } => {
                format!("map[{}]{}", self.display(*key), self.display(*value))
            }
            TypeData::Chan(elem) => format!("chan {}", self.display(*elem)),
            TypeData::Signature { params, results } => {
                let params: Vec<_> = params.iter().map(|p| self.display(*p)).collect();
                let results: Vec<_> = results.iter().map(|r| self.display(*r)).collect();
                match results.len() {
                    0 => format!("func({})", params.join(", ")),
                    1 => format!("func({}) {}", params.join(", "), results[0]),
                    _ => format!("func({}) ({})", params.join(", "), results.join(", ")),
                }
            }
            TypeData::Struct(fields) => {
                let fields: Vec<_> = fields
                    .iter()
                    .map(|f| {
                        if f.embedded {
                            self.display(f.type_id)
                        } else {
                            format!("{} {}", f.name, self.display(f.type_id))
                        }
                    })
                    .collect();
                format!("struct{{{}}}", fields.join("; "))
            }
            TypeData::Interface(methods) => {
                let methods: Vec<_> = methods
                    .iter()
                    .map(|m| {
                        let sig = self.display(m.signature);
                        format!("{}{}", m.name, sig.strip_prefix("func").unwrap_or(&sig))
                    })
                    .collect();
                format!("interface{{{}}}", methods.join("; "))
            }
            TypeData::Named(_) => match self.named_info(id) {
                Some(info) if info.package.is_empty() => info.name.clone(),
                Some(info) => format!("{}.{}", info.package, info.name),
                None => format!("<type {}>", id.0),
            },
        }
    }
}
