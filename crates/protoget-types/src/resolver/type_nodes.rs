//! Type expression nodes to `TypeId`s.

use protoget_parser::parser::NodeIndex;
use protoget_parser::parser::syntax_kind_ext::{
    ARRAY_TYPE, CHANNEL_TYPE, FUNCTION_TYPE, INTERFACE_TYPE, MAP_TYPE, METHOD_SIGNATURE,
    PARAMETER, POINTER_TYPE, SELECTOR_EXPRESSION, SLICE_TYPE, STRUCT_TYPE, VARIADIC_TYPE,
};
use protoget_scanner::SyntaxKind;

use super::ProgramResolver;
use super::scope::Entity;
use crate::types::{FieldInfo, MethodSig, TypeData, TypeId};

/// Predeclared type names.
pub(crate) fn predeclared_type(name: &str) -> Option<TypeId> {
    Some(match name {
        "bool" => TypeId::BOOL,
        "int" => TypeId::INT,
        "int8" => TypeId::INT8,
        "int16" => TypeId::INT16,
        "int32" | "rune" => TypeId::INT32,
        "int64" => TypeId::INT64,
        "uint" => TypeId::UINT,
        "uint8" | "byte" => TypeId::UINT8,
        "uint16" => TypeId::UINT16,
        "uint32" => TypeId::UINT32,
        "uint64" => TypeId::UINT64,
        "float32" => TypeId::FLOAT32,
        "float64" => TypeId::FLOAT64,
        "string" => TypeId::STRING,
        "error" => TypeId::ERROR,
        _ => return None,
    })
}

impl ProgramResolver<'_> {
    /// Resolve a type node written in file `file` of package `pkg`.
    /// Unresolvable names become `TypeId::UNKNOWN`.
    pub(super) fn resolve_type_node(&mut self, pkg: usize, file: usize, node: NodeIndex) -> TypeId {
        let arena = self.packages[pkg].files[file].arena;
        let Some(n) = arena.get(node) else {
            return TypeId::UNKNOWN;
        };

        match n.kind {
            k if k == SyntaxKind::Identifier as u16 => arena
                .identifier_text(node)
                .map_or(TypeId::UNKNOWN, |name| self.lookup_type_name(pkg, name)),
            SELECTOR_EXPRESSION => self
                .qualified_type(pkg, file, node)
                .unwrap_or(TypeId::UNKNOWN),
            POINTER_TYPE | SLICE_TYPE | VARIADIC_TYPE => {
                let Some(elem_node) = arena.get_wrapped_type(n).map(|w| w.type_node) else {
                    return TypeId::UNKNOWN;
                };
                let elem = self.resolve_type_node(pkg, file, elem_node);
                if n.kind == POINTER_TYPE {
                    self.interner.pointer(elem)
                } else {
                    self.interner.slice(elem)
                }
            }
            ARRAY_TYPE => {
                let Some(element) = arena.get_array_type(n).map(|a| a.element) else {
                    return TypeId::UNKNOWN;
                };
                let elem = self.resolve_type_node(pkg, file, element);
                self.interner.array(elem)
            }
            MAP_TYPE => {
                let Some(map) = arena.get_map_type(n) else {
                    return TypeId::UNKNOWN;
                };
                let key = self.resolve_type_node(pkg, file, map.key);
                let value = self.resolve_type_node(pkg, file, map.value);
                self.interner.map(key, value)
            }
            CHANNEL_TYPE => {
                let Some(element) = arena.get_channel_type(n).map(|c| c.element) else {
                    return TypeId::UNKNOWN;
                };
                let elem = self.resolve_type_node(pkg, file, element);
                self.interner.chan(elem)
            }
            FUNCTION_TYPE | METHOD_SIGNATURE => self.signature_type(pkg, file, node),
            INTERFACE_TYPE => self.interface_type(pkg, file, node),
            STRUCT_TYPE => {
                let Some(struct_type) = arena.get_struct_type(n) else {
                    return TypeId::UNKNOWN;
                };
                let mut fields = Vec::new();
                for decl in struct_type.fields.iter() {
                    let Some(field) = arena.get(decl).and_then(|d| arena.get_field(d)) else {
                        continue;
                    };
                    let type_id = self.resolve_type_node(pkg, file, field.type_annotation);
                    if field.names.is_empty() {
                        if let Some(name) = self.embedded_field_name(pkg, file, field.type_annotation) {
                            fields.push(FieldInfo {
                                name,
                                type_id,
                                embedded: true,
                            });
                        }
                        continue;
                    }
                    for name in field.names.iter() {
                        if let Some(text) = arena.identifier_text(name) {
                            fields.push(FieldInfo {
                                name: text.to_string(),
                                type_id,
                                embedded: false,
                            });
                        }
                    }
                }
                self.interner.struct_type(fields)
            }
            _ => TypeId::UNKNOWN,
        }
    }

    /// Signature of any function-shaped node: a declaration, literal,
    /// function type or interface method.
    pub(super) fn signature_type(&mut self, pkg: usize, file: usize, node: NodeIndex) -> TypeId {
        let arena = self.packages[pkg].files[file].arena;
        let Some(function) = arena.get(node).and_then(|n| arena.get_function(n)) else {
            return TypeId::UNKNOWN;
        };
        let params = self.parameter_types(pkg, file, function.parameters.iter());
        let results = self.parameter_types(pkg, file, function.results.iter());
        self.interner.signature(params, results)
    }

    /// Explicit methods plus those of embedded interfaces. An embedded
    /// interface declared later in the same package contributes nothing.
    fn interface_type(&mut self, pkg: usize, file: usize, node: NodeIndex) -> TypeId {
        let arena = self.packages[pkg].files[file].arena;
        let Some(interface) = arena.get(node).and_then(|n| arena.get_interface_type(n)) else {
            return TypeId::UNKNOWN;
        };
        let mut methods = Vec::new();
        for member in interface.members.iter() {
            if arena.kind_of(member) == Some(METHOD_SIGNATURE) {
                let Some(name) = arena
                    .get(member)
                    .and_then(|n| arena.get_function(n))
                    .and_then(|f| arena.identifier_text(f.name))
                else {
                    continue;
                };
                let name = name.to_string();
                let signature = self.signature_type(pkg, file, member);
                methods.push(MethodSig { name, signature });
                continue;
            }
            let embedded = self.resolve_type_node(pkg, file, member);
            if let Some(TypeData::Interface(inherited)) =
                self.interner.lookup(self.interner.underlying(embedded))
            {
                methods.extend(inherited.iter().cloned());
            }
        }
        self.interner.interface(methods)
    }

    /// A type name declared in `pkg`, or a predeclared one.
    pub(super) fn lookup_type_name(&self, pkg: usize, name: &str) -> TypeId {
        match self.scopes[pkg].members.get(name) {
            Some(Entity::Type(ty)) => *ty,
            Some(_) => TypeId::UNKNOWN,
            None => predeclared_type(name).unwrap_or(TypeId::UNKNOWN),
        }
    }

    /// `pkg.T` where `pkg` is an import of `file` and `T` a type it declares.
    pub(super) fn qualified_type(&self, pkg: usize, file: usize, node: NodeIndex) -> Option<TypeId> {
        let arena = self.packages[pkg].files[file].arena;
        let selector = arena.get(node).and_then(|n| arena.get_selector(n))?;
        let package_name = arena.identifier_text(selector.expression)?;
        let member = arena.identifier_text(selector.name_or_argument)?;
        let target = (*self.file_scopes[pkg][file].imports.get(package_name)?)?;
        match self.scopes[target].members.get(member)? {
            Entity::Type(ty) => Some(*ty),
            _ => None,
        }
    }

    /// Name of an embedded field: the type name without package or `*`.
    fn embedded_field_name(&self, pkg: usize, file: usize, node: NodeIndex) -> Option<String> {
        let arena = self.packages[pkg].files[file].arena;
        let n = arena.get(node)?;
        match n.kind {
            k if k == SyntaxKind::Identifier as u16 => {
                arena.identifier_text(node).map(str::to_string)
            }
            SELECTOR_EXPRESSION => {
                let selector = arena.get_selector(n)?;
                arena
                    .identifier_text(selector.name_or_argument)
                    .map(str::to_string)
            }
            POINTER_TYPE => {
                let inner = arena.get_wrapped_type(n)?.type_node;
                self.embedded_field_name(pkg, file, inner)
            }
            _ => None,
        }
    }

    /// Flatten `PARAMETER` nodes into one type per declared name.
    pub(super) fn parameter_types(
        &mut self,
        pkg: usize,
        file: usize,
        params: impl Iterator<Item = NodeIndex>,
    ) -> Vec<TypeId> {
        let arena = self.packages[pkg].files[file].arena;
        let mut types = Vec::new();
        for param in params {
            let Some(field) = arena
                .get(param)
                .filter(|n| n.kind == PARAMETER)
                .and_then(|n| arena.get_field(n))
            else {
                continue;
            };
            let ty = self.resolve_type_node(pkg, file, field.type_annotation);
            let count = field.names.len().max(1);
            types.extend(std::iter::repeat_n(ty, count));
        }
        types
    }
}
