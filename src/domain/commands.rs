use serde::{Deserialize, Serialize};

use super::{BookId, ReadingStatus};

/// コマンド：書籍を登録する
///
/// `status`は検証されず、そのまま保存される。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateBook {
    pub title: Option<String>,
    pub author: Option<String>,
    pub status: Option<String>,
    pub is_favorite: Option<bool>,
}

/// コマンド：書籍を更新する（指定されたフィールドのみ上書き）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateBook {
    pub book_id: BookId,
    pub title: Option<String>,
    pub author: Option<String>,
    pub is_favorite: Option<bool>,
    pub status: Option<String>,
}

/// コマンド：お気に入りを切り替える
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleFavorite {
    pub book_id: BookId,
}

/// コマンド：読書ステータスを変更する
///
/// `status`は未検証の入力。存在確認より先に列挙値として検証される。
/// `book_id`が`None`（IDとして読めない）の場合も検証が先に行われる。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeStatus {
    pub book_id: Option<BookId>,
    pub status: Option<String>,
}

impl ChangeStatus {
    pub fn parse_status(&self) -> Result<ReadingStatus, super::InvalidStatus> {
        self.status.as_deref().unwrap_or_default().parse()
    }
}
