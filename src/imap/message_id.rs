use std::{fmt::Display, num::NonZeroU32};

use thiserror::Error;

/// Server-assigned message sequence number, as returned by SEARCH. Only valid
/// while the folder it came from stays selected.
#[derive(Debug, PartialEq, Clone, Copy, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct MessageId(NonZeroU32);

#[derive(Debug, Error)]
#[error("message sequence numbers start at 1")]
pub struct InvalidMessageId;

impl TryFrom<u32> for MessageId {
    type Error = InvalidMessageId;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        NonZeroU32::new(value).ok_or(InvalidMessageId).map(Self)
    }
}

impl TryFrom<&u32> for MessageId {
    type Error = <Self as TryFrom<u32>>::Error;

    fn try_from(value: &u32) -> Result<Self, Self::Error> {
        Self::try_from(*value)
    }
}

impl From<MessageId> for u32 {
    fn from(value: MessageId) -> Self {
        value.0.into()
    }
}

impl Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
