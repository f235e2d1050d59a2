//! Static shape queries: a closed view over a type for callers that only
//! care whether it is a pointer to a named struct.

use crate::intern::TypeInterner;
use crate::types::{FieldInfo, TypeData, TypeId};

/// A named struct reached through one pointer.
#[derive(Clone, Copy, Debug)]
pub struct RecordView<'a> {
    pub name: &'a str,
    pub package: &'a str,
    fields: &'a [FieldInfo],
}

impl<'a> RecordView<'a> {
    /// Declared field names in declaration order, embedded fields included.
    pub fn fields(&self) -> impl Iterator<Item = &'a str> + 'a {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Exact, case-sensitive match against a declared field name.
    pub fn has_field(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f.name == name)
    }
}

#[derive(Clone, Copy, Debug)]
pub enum StaticShape<'a> {
    PointerToRecord {
        record: RecordView<'a>,
        implements_marker: bool,
    },
    Other {
        implements_marker: bool,
    },
}

impl<'a> StaticShape<'a> {
    pub fn implements_marker(&self) -> bool {
        match self {
            StaticShape::PointerToRecord {
                implements_marker, ..
            }
            | StaticShape::Other { implements_marker } => *implements_marker,
        }
    }

    pub fn record(&self) -> Option<RecordView<'a>> {
        match self {
            StaticShape::PointerToRecord { record, .. } => Some(*record),
            StaticShape::Other { .. } => None,
        }
    }
}

impl TypeInterner {
    /// Classify `ty` against the marker interface `marker`.
    ///
    /// Exactly one pointer and one named level are unwrapped: `*T` with a
    /// struct underlying type is a record; `**T`, `*struct{...}` and named
    /// pointer types are not.
    pub fn shape(&self, ty: TypeId, marker: TypeId) -> StaticShape<'_> {
        let implements_marker = self.implements(ty, marker);
        match self.record_behind_pointer(ty) {
            Some(record) => StaticShape::PointerToRecord {
                record,
                implements_marker,
            },
            None => StaticShape::Other { implements_marker },
        }
    }

    fn record_behind_pointer(&self, ty: TypeId) -> Option<RecordView<'_>> {
        let TypeData::Pointer(elem) = self.lookup(ty)? else {
            return None;
        };
        let info = self.named_info(*elem)?;
        let TypeData::Struct(fields) = self.lookup(self.underlying(*elem))? else {
            return None;
        };
        Some(RecordView {
            name: &info.name,
            package: &info.package,
            fields,
        })
    }
}
