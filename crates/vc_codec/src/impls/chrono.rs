use ::chrono::{DateTime, FixedOffset, Utc};

use crate::impls::impl_opaque;

impl_opaque!(
    DateTime<FixedOffset>,
    "chrono::DateTime<chrono::FixedOffset>",
    "DateTime<FixedOffset>"
);

impl_opaque!(DateTime<Utc>, "chrono::DateTime<chrono::Utc>", "DateTime<Utc>");
