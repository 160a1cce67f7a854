use crate::category::Category;
use thiserror::Error;

/// Capacity failures. These abort the build: dropping content would leave the lobby with a
/// different ruleset than the configuration describes.
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum PackError {
    #[error(
        "fragment from {reference} needs a {length}-character command in {category} slot {slot}, limit is {limit}"
    )]
    FragmentTooLarge {
        category: Category,
        slot: usize,
        reference: String,
        length: usize,
        limit: usize,
    },

    #[error("{category} needs {required} slots, only {max} are available")]
    TooManySlots {
        category: Category,
        required: usize,
        max: usize,
    },
}

pub type TweakResult<T> = anyhow::Result<T>;
