use thiserror::Error;

use crate::DisplayItemId;

/// Identifier the image service's `info.json` endpoint expects.
pub type InfoId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdMapError {
    #[error("compound record has no sub-images")]
    EmptyRecord,
    #[error("display id {last_display_id} is smaller than item count {count}")]
    Underflow {
        last_display_id: DisplayItemId,
        count: usize,
    },
}

/// Mapping from download-pass position to image-service id.
///
/// `first = last_display_id - count` and `info_id(i) = first + i`. This
/// assumes the service allocates ids contiguously, in display order, for
/// every compound record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdMapping {
    first_info_id: InfoId,
    count: usize,
}

impl IdMapping {
    pub fn new(last_display_id: DisplayItemId, count: usize) -> Result<Self, IdMapError> {
        if count == 0 {
            return Err(IdMapError::EmptyRecord);
        }
        let first_info_id = last_display_id
            .checked_sub(count as u64)
            .ok_or(IdMapError::Underflow {
                last_display_id,
                count,
            })?;
        Ok(Self {
            first_info_id,
            count,
        })
    }

    pub fn first_info_id(&self) -> InfoId {
        self.first_info_id
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Id for the `index`-th sub-image, `None` past the probed count.
    pub fn info_id(&self, index: usize) -> Option<InfoId> {
        (index < self.count).then(|| self.first_info_id + index as u64)
    }

    pub fn info_ids(&self) -> impl Iterator<Item = InfoId> + '_ {
        (0..self.count).map(|index| self.first_info_id + index as u64)
    }
}
