/*!
Turning collected buckets into values.

This runs in three passes: first every required slot is checked for values,
then every mentioned slot is coerced and validated into a staged value, and
only then is anything written back. If any pass fails, the registry's values
are exactly what they were before the parse began.
 */

use flagship_parser::Arg;
use log::{debug, warn};

use crate::descriptor::OptionDescriptor;
use crate::errors::{CoercionError, ParseError};
use crate::registry::Registry;
use crate::state::Buckets;
use crate::value::Value;

pub(crate) fn build(registry: &Registry, buckets: Buckets<'_>) -> Result<(), ParseError> {
    let positional = registry.positional_descriptor();
    let options = registry.options();

    debug_assert_eq!(options.len(), buckets.options.len());

    let slots = positional
        .map(|descriptor| (descriptor, buckets.positional.as_deref()))
        .into_iter()
        .chain(
            options
                .iter()
                .zip(buckets.options.iter().map(Option::as_deref)),
        );

    // Requiredness comes first, so that a missing option is reported even if
    // some other option has a bad value.
    if let Some((descriptor, _)) = slots
        .clone()
        .filter(|(descriptor, _)| descriptor.is_required())
        .find(|(_, tokens)| tokens.is_none_or(|tokens| tokens.is_empty()))
    {
        return Err(ParseError::MissingRequired {
            slot: descriptor.slot().clone(),
        });
    }

    if positional.is_none() {
        if let Some(ref tokens) = buckets.positional {
            warn!(
                "discarding {count} stray argument(s) {tokens:?}: \
                no positional argument is registered",
                count = tokens.len(),
            );
        }
    }

    let staged = slots
        .map(|(descriptor, tokens)| match tokens {
            None => Ok((descriptor, descriptor.default_value().clone())),
            Some(tokens) => stage(descriptor, tokens).map(|value| (descriptor, value)),
        })
        .collect::<Result<Vec<_>, _>>()?;

    staged
        .into_iter()
        .for_each(|(descriptor, value)| descriptor.commit(value));

    Ok(())
}

/// Coerce and validate the tokens for a single slot, without touching its
/// current value.
fn stage(descriptor: &OptionDescriptor, tokens: &[&Arg]) -> Result<Value, ParseError> {
    let invalid_value = |error| ParseError::InvalidValue {
        slot: descriptor.slot().clone(),
        error,
    };

    let texts = tokens
        .iter()
        .map(|token| {
            token.as_str().map_err(|_| CoercionError::InvalidUtf8 {
                token: String::from_utf8_lossy(token.bytes()).into_owned(),
                expected: descriptor.value_type().element(),
            })
        })
        .collect::<Result<Vec<&str>, _>>()
        .map_err(invalid_value)?;

    let mut value = descriptor.default_value().clone();
    value.assign_from_tokens(&texts).map_err(invalid_value)?;

    debug!("{slot} = {value}", slot = descriptor.slot());

    descriptor
        .check(&value)
        .map_err(|message| ParseError::ValidationFailed {
            slot: descriptor.slot().clone(),
            message,
        })?;

    Ok(value)
}
