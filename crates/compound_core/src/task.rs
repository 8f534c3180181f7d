use crate::{DisplayItemId, InfoId, RecordKey};

/// One image to fetch: where it came from and which service id backs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTask {
    pub record: RecordKey,
    pub display_id: DisplayItemId,
    pub info_id: InfoId,
}

impl DownloadTask {
    /// `rec_<record>_id_<display>.jpg`
    pub fn file_name(&self) -> String {
        format!("rec_{}_id_{}.jpg", self.record, self.display_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_uses_record_and_display_id() {
        let task = DownloadTask {
            record: RecordKey::Numbered(39),
            display_id: 3666,
            info_id: 3665,
        };
        assert_eq!(task.file_name(), "rec_39_id_3666.jpg");
    }

    #[test]
    fn synthetic_record_keeps_id_prefix() {
        let task = DownloadTask {
            record: RecordKey::Synthetic(12),
            display_id: 12,
            info_id: 11,
        };
        assert_eq!(task.file_name(), "rec_id_12_id_12.jpg");
    }
}
