use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use super::{TypeInfo, Typed};
use crate::Value;

/// Reads a member out of its owner, `None` if the owner has the wrong type.
pub type MemberGetter = for<'a> fn(&'a dyn Value) -> Option<&'a dyn Value>;

/// Stores a decoded value into a member.
///
/// Hands the value back if the owner or the value has the wrong type.
pub type MemberSetter = fn(&mut dyn Value, Box<dyn Value>) -> Result<(), Box<dyn Value>>;

// -----------------------------------------------------------------------------
// MemberInfo

/// One serialized member of a data contract.
#[derive(Clone, Copy)]
pub struct MemberInfo {
    name: &'static str,
    info: fn() -> &'static TypeInfo,
    get: MemberGetter,
    set: MemberSetter,
}

impl MemberInfo {
    /// Describes a member of declared type `T` serialized as `name`.
    #[inline]
    pub fn new<T: Typed>(name: &'static str, get: MemberGetter, set: MemberSetter) -> Self {
        Self {
            name,
            info: T::type_info,
            get,
            set,
        }
    }

    /// Serialized name, also the name of the child node.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Declared type of the member.
    #[inline]
    pub fn type_info(&self) -> &'static TypeInfo {
        (self.info)()
    }

    #[inline]
    pub fn get<'a>(&self, owner: &'a dyn Value) -> Option<&'a dyn Value> {
        (self.get)(owner)
    }

    #[inline]
    pub fn set(&self, owner: &mut dyn Value, value: Box<dyn Value>) -> Result<(), Box<dyn Value>> {
        (self.set)(owner, value)
    }
}

impl fmt::Debug for MemberInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemberInfo")
            .field("name", &self.name)
            .field("type", &self.type_info().type_path())
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// ContractInfo

/// The serialized members of a data contract type.
///
/// Members are kept sorted by serialized name. The encoder writes them in
/// that order and the decoder looks them up by binary search.
///
/// # Panics
///
/// [`ContractInfo::new`] panics if two members share a serialized name.
#[derive(Clone)]
pub struct ContractInfo {
    members: Box<[MemberInfo]>,
}

impl ContractInfo {
    pub fn new(members: impl IntoIterator<Item = MemberInfo>) -> Self {
        let mut members: Vec<MemberInfo> = members.into_iter().collect();
        members.sort_unstable_by(|a, b| a.name.cmp(b.name));

        if let Some(pair) = members.windows(2).find(|pair| pair[0].name == pair[1].name) {
            panic!("duplicate contract member `{}`", pair[0].name);
        }

        Self {
            members: members.into_boxed_slice(),
        }
    }

    /// Finds a member by serialized name.
    pub fn member(&self, name: &str) -> Option<&MemberInfo> {
        self.members
            .binary_search_by(|member| member.name.cmp(name))
            .ok()
            .map(|index| &self.members[index])
    }

    /// Members in serialized order.
    #[inline]
    pub fn members(&self) -> &[MemberInfo] {
        &self.members
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl fmt::Debug for ContractInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.members.iter()).finish()
    }
}
