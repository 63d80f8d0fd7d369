#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

pub use vc_codec as codec;
pub use vc_node as node;
pub use vc_utils as utils;
