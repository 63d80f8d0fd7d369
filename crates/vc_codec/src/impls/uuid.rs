use ::uuid::Uuid;

use crate::impls::impl_opaque;

impl_opaque!(Uuid, "uuid::Uuid", "Uuid");
