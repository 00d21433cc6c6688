use zerocopy::byteorder::{LE, U32};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

/// `12345678` in the game's own decimal spelling.
pub const DAT_MAGIC: u32 = 0x00BC_614E;

#[derive(Debug, Clone, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C)]
pub struct Header {
    pub magic: U32<LE>,
    pub group_count: U32<LE>,
}

static_assertions::assert_eq_size!(Header, [u8; 8]);

impl Header {
    pub const SIZE: usize = std::mem::size_of::<Self>();

    pub fn new(group_count: u32) -> Self {
        Self {
            magic: U32::new(DAT_MAGIC),
            group_count: U32::new(group_count),
        }
    }

    pub fn into_bytes(self) -> [u8; Self::SIZE] {
        self.as_bytes().try_into().unwrap()
    }
}
