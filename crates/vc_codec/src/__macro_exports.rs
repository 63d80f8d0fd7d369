//! Items used by the code `#[derive(Contract)]` generates.

pub use alloc::boxed::Box;

#[cfg(feature = "auto_register")]
pub mod auto_register {
    use core::any::TypeId;

    pub use inventory;

    use crate::derive::Contract;
    use crate::info::TypeInfo;
    use crate::registry::TypeRegistry;

    /// A type submitted by `#[contract(auto_register)]`.
    pub struct __AutoRegisterFunc(pub fn() -> &'static TypeInfo);

    inventory::collect!(__AutoRegisterFunc);

    /// Submitted like any user type; finding it proves that submissions
    /// reached the collection on this platform.
    #[derive(Contract)]
    #[contract(
        opaque,
        auto_register,
        type_path = "vc_codec::__macro_exports::auto_register::AvailabilityFlag"
    )]
    struct AvailabilityFlag;

    /// Registers every submitted type, returning whether submission works.
    pub fn register_types(registry: &mut TypeRegistry) -> bool {
        for entry in inventory::iter::<__AutoRegisterFunc> {
            registry.register_info((entry.0)());
        }
        registry.contains(TypeId::of::<AvailabilityFlag>())
    }
}
