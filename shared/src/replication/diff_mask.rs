/// Tracks which properties of a replicated record have changed since the
/// last replication flush, one bit per property index
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiffMask {
    mask: Vec<u8>,
}

impl DiffMask {
    pub fn new(bytes: u8) -> Self {
        Self {
            mask: vec![0; bytes as usize],
        }
    }

    pub fn set_bit(&mut self, index: u8, value: bool) {
        if let Some(byte) = self.mask.get_mut((index / 8) as usize) {
            let bit = 1 << (index % 8);
            if value {
                *byte |= bit;
            } else {
                *byte &= !bit;
            }
        }
    }

    pub fn bit(&self, index: u8) -> Option<bool> {
        self.mask
            .get((index / 8) as usize)
            .map(|byte| byte & (1 << (index % 8)) != 0)
    }

    pub fn is_clear(&self) -> bool {
        self.mask.iter().all(|byte| *byte == 0)
    }

    pub fn clear(&mut self) {
        for byte in self.mask.iter_mut() {
            *byte = 0;
        }
    }
}
