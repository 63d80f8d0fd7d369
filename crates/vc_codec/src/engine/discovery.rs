//! Strategy discovery.
//!
//! Runs when a type has no handler. The probes are tried in order and the
//! first match is installed in the registry by the caller:
//!
//! 1. native hooks, for types implementing
//!    [`NodeCodec`](crate::info::NodeCodec);
//! 2. contract members, one child node per member;
//! 3. decoding only, when the call supplied a factory: the factory result,
//!    ignoring the node content.

use alloc::boxed::Box;

use vc_node::Node;

use super::{Decoder, Encoder};
use crate::info::{ContractInfo, TypeInfo};
use crate::registry::{DecodeFn, EncodeFn, decode_fn, encode_fn};
use crate::{CodecError, CodecResult, Direction, Value};

/// Synthesizes an encoder for `info`, `None` if no probe matches.
pub(crate) fn discover_encoder(info: &'static TypeInfo) -> Option<(EncodeFn, &'static str)> {
    if let Some(hooks) = info.native().copied() {
        let encoder = encode_fn(move |value, node, encoder| hooks.write(value, node, encoder));
        return Some((encoder, "native"));
    }

    if let Some(contract) = info.as_contract() {
        let owner = info.type_path();
        let encoder = encode_fn(move |value, node, encoder| {
            encode_members(contract, owner, value, node, encoder)
        });
        return Some((encoder, "contract"));
    }

    None
}

/// Synthesizes a decoder for `info`, `None` if no probe matches.
pub(crate) fn discover_decoder(
    info: &'static TypeInfo,
    with_factory: bool,
) -> Option<(DecodeFn, &'static str)> {
    if let Some(hooks) = info.native().copied() {
        let decoder = decode_fn(move |node, _, decoder| hooks.read(node, decoder));
        return Some((decoder, "native"));
    }

    if let Some(contract) = info.as_contract() {
        let decoder = decode_fn(move |node, target, decoder| {
            decode_members(contract, target, node, decoder)
        });
        return Some((decoder, "contract"));
    }

    if with_factory {
        let decoder = decode_fn(|node, target, decoder| {
            if decoder.factory().is_none() {
                return Err(CodecError::unsupported(target.type_path(), Direction::Decode));
            }
            log::warn!(
                "`{}` is built by the factory, the content of node `{}` is ignored",
                target.type_path(),
                node.name(),
            );
            decoder.default_instance(target)
        });
        return Some((decoder, "factory"));
    }

    None
}

fn encode_members(
    contract: &ContractInfo,
    owner: &'static str,
    value: &dyn Value,
    node: &mut Node,
    encoder: &mut Encoder<'_>,
) -> CodecResult<()> {
    for member in contract.members() {
        let field = member
            .get(value)
            .ok_or_else(|| CodecError::mismatch(owner, value.type_path()))?;

        let mut child = Node::try_new(member.name())?;
        encoder
            .encode_declared(field, &mut child, member.type_info())
            .map_err(|err| err.in_member(owner, member.name()))?;
        node.push_child(child);
    }
    Ok(())
}

fn decode_members(
    contract: &ContractInfo,
    target: &'static TypeInfo,
    node: &Node,
    decoder: &mut Decoder<'_>,
) -> CodecResult<Box<dyn Value>> {
    let owner = target.type_path();
    if node.has_value() {
        return Err(CodecError::malformed(node, "expected member children, found a value"));
    }

    let mut instance = decoder.default_instance(target)?;

    // A repeated child overwrites the earlier one.
    for child in node.children() {
        let Some(member) = contract.member(child.name()) else {
            log::trace!("skipping unknown child `{}` of `{owner}`", child.name());
            continue;
        };

        let value = decoder
            .decode(child, member.type_info())
            .map_err(|err| err.in_member(owner, member.name()))?;
        member.set(&mut *instance, value).map_err(|value| {
            CodecError::mismatch(member.type_info().type_path(), value.type_path())
                .in_member(owner, member.name())
        })?;
    }

    Ok(instance)
}
