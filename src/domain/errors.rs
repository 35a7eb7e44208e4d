use std::fmt;

use super::ReadingStatus;

/// ステータスが列挙値に含まれない
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidStatus(pub String);

impl fmt::Display for InvalidStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let valid: Vec<&str> = ReadingStatus::ALL.iter().map(|s| s.as_str()).collect();
        write!(f, "Status must be one of: {}", valid.join(", "))
    }
}

impl std::error::Error for InvalidStatus {}

/// 書籍登録のエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateBookError {
    /// タイトルまたは著者が空
    MissingTitleOrAuthor,
}
