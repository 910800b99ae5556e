//! Light group names, bit allocation, and packed membership masks.
#![forbid(unsafe_code)]

pub mod alloc;
pub mod mask;
pub mod sync;
pub mod types;

pub use alloc::{BitMapping, DEFAULT_BIT, MAX_BIT, allocate, collect_names};
pub use mask::{GroupBit, MASK_WORDS, PackedMask, WORD_BITS};
pub use sync::{EntityKind, GroupMasks, GroupMember, compute_masks, sync_masks};
pub use types::{GroupList, GroupName, InvalidGroupName, Membership};
