use crate::domain::{Book, BookId};
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// 書籍リポジトリポート
///
/// 挿入順を保った書籍の並びを管理する。
/// 一覧は常に挿入順で返す（並べ替えはアプリケーション層の責務）。
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// 全書籍を挿入順で取得する
    async fn list(&self) -> Result<Vec<Book>>;

    /// IDで書籍を取得する
    async fn get_by_id(&self, book_id: BookId) -> Result<Option<Book>>;

    /// 次に採番するIDを返す
    ///
    /// 現在の最大ID + 1、空なら1。
    async fn next_id(&self) -> Result<BookId>;

    /// 書籍を末尾に追加する
    ///
    /// 同じIDの書籍が既に存在する場合はエラー。
    async fn insert(&self, book: Book) -> Result<()>;

    /// 既存の書籍をその位置のまま置き換える
    ///
    /// 該当IDの書籍が存在しない場合はエラー。
    async fn save(&self, book: Book) -> Result<()>;

    /// IDで書籍を削除し、削除した書籍を返す
    async fn remove(&self, book_id: BookId) -> Result<Option<Book>>;

    /// 全書籍を削除する
    async fn clear(&self) -> Result<()>;
}
