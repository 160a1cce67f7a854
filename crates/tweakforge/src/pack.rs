//! Packing annotated fragments into `!bset <category><slot> <base64url>` commands.
//!
//! Fragments are packed first-fit in arrival order: a slot is closed as soon as the next fragment
//! would push its command over the length limit. Fragments are never split or reordered, so slot
//! numbering is stable for a given input.

use crate::annotate::AnnotatedFragment;
use crate::category::Category;
use crate::errors::PackError;
use crate::limits::PackLimits;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use itertools::Itertools;

pub const COMMAND_PREFIX: &str = "!bset";

/// Length of the command that would carry a payload of `payload_len` bytes in `slot`.
fn command_length(category: Category, slot: usize, payload_len: usize) -> usize {
    let encoded = base64::encoded_len(payload_len, false).unwrap_or(usize::MAX);
    let header = COMMAND_PREFIX.len() + 1 + category.slot_name(slot).len() + 1;
    header.saturating_add(encoded)
}

pub fn slot_command<S: AsRef<str>>(category: Category, slot: usize, payload: S) -> String {
    format!(
        "{COMMAND_PREFIX} {} {}",
        category.slot_name(slot),
        URL_SAFE_NO_PAD.encode(payload.as_ref())
    )
}

pub fn pack(
    category: Category,
    fragments: &[AnnotatedFragment],
    limits: &PackLimits,
) -> Result<Vec<String>, PackError> {
    let limit = limits.max_command_length;
    let separator = category.line_terminator();

    let mut groups: Vec<Vec<&AnnotatedFragment>> = vec![];
    let mut current: Vec<&AnnotatedFragment> = vec![];
    let mut current_len = 0;

    for fragment in fragments {
        if !current.is_empty() {
            let candidate_len = current_len + separator.len() + fragment.text.len();
            if command_length(category, groups.len(), candidate_len) <= limit {
                current.push(fragment);
                current_len = candidate_len;
                continue;
            }
            groups.push(std::mem::take(&mut current));
        }

        let slot = groups.len();
        let length = command_length(category, slot, fragment.text.len());
        if length > limit {
            return Err(PackError::FragmentTooLarge {
                category,
                slot,
                reference: fragment.reference.clone(),
                length,
                limit,
            });
        }

        current.push(fragment);
        current_len = fragment.text.len();
    }

    if !current.is_empty() {
        groups.push(current);
    }

    if groups.len() > limits.max_slots_per_type {
        return Err(PackError::TooManySlots {
            category,
            required: groups.len(),
            max: limits.max_slots_per_type,
        });
    }

    tracing::debug!(
        "packed {} {category} fragment(s) into {} slot(s)",
        fragments.len(),
        groups.len()
    );

    Ok(groups
        .iter()
        .enumerate()
        .map(|(slot, group)| {
            let payload = group.iter().map(|f| f.text.as_str()).join(separator);
            let command = slot_command(category, slot, payload);
            debug_assert!(command.len() <= limit);
            command
        })
        .collect())
}
