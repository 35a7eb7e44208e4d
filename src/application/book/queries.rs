use crate::domain::{Book, BookId, ReadingStatus, value_objects::parse_leading_int};
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

use super::book_service::{ServiceDependencies, load_book};
use super::errors::{BookApplicationError, Result};

/// 並べ替えのキー
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Title,
    Author,
}

impl SortKey {
    /// `title` / `author` 以外は`None`（並び順を変えない）
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "title" => Some(SortKey::Title),
            "author" => Some(SortKey::Author),
            _ => None,
        }
    }

    fn field<'a>(&self, book: &'a Book) -> &'a str {
        match self {
            SortKey::Title => &book.title,
            SortKey::Author => &book.author,
        }
    }
}

/// 一覧取得の条件
///
/// 処理順：お気に入り → ステータス → 並べ替え → ページング。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListCriteria {
    /// お気に入りのみに絞り込む
    pub favorites_only: bool,
    /// ステータスで絞り込む（大文字小文字を区別しない）
    pub status: Option<String>,
    pub sort_by: Option<SortKey>,
    /// ページ番号（1始まり、未指定は1）
    pub page: Option<usize>,
    /// 1ページの件数（未指定は絞り込み後の全件）
    pub limit: Option<usize>,
}

/// 一覧取得の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookPage {
    /// ページング前の件数
    pub total: usize,
    pub page: usize,
    pub limit: usize,
    pub data: Vec<Book>,
}

/// コレクションの集計
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookStats {
    pub total: usize,
    pub favorites: usize,
    pub completed: usize,
    pub reading: usize,
    pub unread: usize,
}

/// 正の整数として読めればその値を返す
///
/// 先頭の整数部分だけを解釈する。数値でない、0、負の値は`None`。
pub fn parse_positive(raw: Option<&str>) -> Option<usize> {
    raw.and_then(parse_leading_int)
        .filter(|v| *v > 0)
        .and_then(|v| usize::try_from(v).ok())
}

/// 正の整数として読めればその値、そうでなければ既定値を返す（エラーにはならない）
pub fn parse_positive_or(raw: Option<&str>, default: usize) -> usize {
    parse_positive(raw).unwrap_or(default)
}

/// 一次比較のキー：分解した結合文字（アクセント）を除き小文字化したもの
fn base_letters(s: &str) -> String {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// ロケール風の文字列比較
///
/// 1. アクセントと大文字小文字を無視した順序（"Émile" < "Zola"）
/// 2. アクセントなしを先に（"e" < "é"）
/// 3. 小文字を先に
fn locale_compare(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(&base_letters(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| b.cmp(a))
}

/// 絞り込み・並べ替え・ページングを適用する（純粋関数）
pub fn apply_criteria(books: Vec<Book>, criteria: &ListCriteria) -> BookPage {
    let status = criteria.status.as_deref().map(str::to_lowercase);

    let mut filtered: Vec<Book> = books
        .into_iter()
        .filter(|b| !criteria.favorites_only || b.is_favorite)
        .filter(|b| status.as_deref().is_none_or(|s| b.status == s))
        .collect();

    if let Some(key) = criteria.sort_by {
        // 安定ソート：同順位は挿入順を保つ
        filtered.sort_by(|a, b| locale_compare(key.field(a), key.field(b)));
    }

    let total = filtered.len();
    let page = criteria.page.unwrap_or(1);
    let limit = criteria.limit.unwrap_or(total);

    let start = page.saturating_sub(1).saturating_mul(limit);
    let data = filtered.into_iter().skip(start).take(limit).collect();

    BookPage {
        total,
        page,
        limit,
        data,
    }
}

async fn all_books(deps: &ServiceDependencies) -> Result<Vec<Book>> {
    deps.book_repository
        .list()
        .await
        .map_err(BookApplicationError::RepositoryError)
}

/// 書籍一覧を取得する
pub async fn list_books(deps: &ServiceDependencies, criteria: &ListCriteria) -> Result<BookPage> {
    let books = all_books(deps).await?;
    Ok(apply_criteria(books, criteria))
}

/// IDで書籍を取得する
pub async fn get_book(deps: &ServiceDependencies, book_id: BookId) -> Result<Book> {
    load_book(deps, book_id).await
}

/// タイトルまたは著者の部分一致で検索する（大文字小文字を区別しない）
///
/// 検索語が空の場合は`QueryRequired`。ページングはしない。
pub async fn search_books(deps: &ServiceDependencies, query: Option<&str>) -> Result<Vec<Book>> {
    let needle = match query {
        Some(q) if !q.is_empty() => q.to_lowercase(),
        _ => return Err(BookApplicationError::QueryRequired),
    };

    let books = all_books(deps).await?;
    Ok(books
        .into_iter()
        .filter(|b| {
            b.title.to_lowercase().contains(&needle) || b.author.to_lowercase().contains(&needle)
        })
        .collect())
}

/// 全書籍から一様ランダムに1冊選ぶ
pub async fn recommend_book(deps: &ServiceDependencies) -> Result<Book> {
    let books = all_books(deps).await?;
    books
        .choose(&mut rand::thread_rng())
        .cloned()
        .ok_or(BookApplicationError::NoBooksAvailable)
}

/// 総数・お気に入り数・ステータス別件数を集計する
pub async fn stats(deps: &ServiceDependencies) -> Result<BookStats> {
    let books = all_books(deps).await?;
    Ok(books.iter().fold(
        BookStats {
            total: books.len(),
            ..Default::default()
        },
        |mut acc, b| {
            if b.is_favorite {
                acc.favorites += 1;
            }
            if b.has_status(ReadingStatus::Completed) {
                acc.completed += 1;
            } else if b.has_status(ReadingStatus::Reading) {
                acc.reading += 1;
            } else if b.has_status(ReadingStatus::Unread) {
                acc.unread += 1;
            }
            acc
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn book(id: u64, title: &str, author: &str, favorite: bool, status: &str) -> Book {
        Book {
            id: BookId::new(id),
            title: title.to_string(),
            author: author.to_string(),
            created_at: Utc::now(),
            is_favorite: favorite,
            status: status.to_string(),
        }
    }

    fn library() -> Vec<Book> {
        vec![
            book(1, "1984", "George Orwell", false, "unread"),
            book(2, "The Alchemist", "Paulo Coelho", true, "completed"),
            book(3, "dune", "Frank Herbert", true, "reading"),
            book(4, "Animal Farm", "George Orwell", true, "completed"),
        ]
    }

    fn ids(page: &BookPage) -> Vec<u64> {
        page.data.iter().map(|b| b.id.value()).collect()
    }

    #[test]
    fn test_parse_positive_or() {
        assert_eq!(parse_positive_or(Some("3"), 1), 3);
        assert_eq!(parse_positive_or(Some("2x"), 1), 2);
        assert_eq!(parse_positive_or(Some("abc"), 1), 1);
        assert_eq!(parse_positive_or(Some("0"), 7), 7);
        assert_eq!(parse_positive_or(Some("-4"), 7), 7);
        assert_eq!(parse_positive_or(None, 5), 5);
        assert_eq!(parse_positive(Some("0")), None);
    }

    #[test]
    fn test_no_criteria_returns_everything_in_insertion_order() {
        let page = apply_criteria(library(), &ListCriteria::default());
        assert_eq!(page.total, 4);
        assert_eq!(page.page, 1);
        assert_eq!(page.limit, 4);
        assert_eq!(ids(&page), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_favorites_and_status_filters_combine() {
        let criteria = ListCriteria {
            favorites_only: true,
            status: Some("COMPLETED".to_string()),
            ..Default::default()
        };
        let page = apply_criteria(library(), &criteria);
        assert_eq!(ids(&page), vec![2, 4]);
        assert!(page.data.iter().all(|b| b.is_favorite && b.status == "completed"));
    }

    #[test]
    fn test_sort_by_title_is_case_insensitive() {
        let criteria = ListCriteria {
            sort_by: Some(SortKey::Title),
            ..Default::default()
        };
        let page = apply_criteria(library(), &criteria);
        let titles: Vec<&str> = page.data.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["1984", "Animal Farm", "dune", "The Alchemist"]);
    }

    #[test]
    fn test_sort_by_author_keeps_ties_in_insertion_order() {
        let criteria = ListCriteria {
            sort_by: Some(SortKey::Author),
            ..Default::default()
        };
        let page = apply_criteria(library(), &criteria);
        assert_eq!(ids(&page), vec![3, 1, 4, 2]);
    }

    #[test]
    fn test_sort_by_title_ignores_accents() {
        let books = vec![
            book(1, "Zola", "Émile Zola", false, "unread"),
            book(2, "Émile", "Jean-Jacques Rousseau", false, "unread"),
            book(3, "eclair", "Anon", false, "unread"),
            book(4, "Ecole", "Anon", false, "unread"),
            book(5, "émile", "Anon", false, "unread"),
            book(6, "emile", "Anon", false, "unread"),
        ];
        let criteria = ListCriteria {
            sort_by: Some(SortKey::Title),
            ..Default::default()
        };
        let page = apply_criteria(books, &criteria);
        let titles: Vec<&str> = page.data.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["eclair", "Ecole", "emile", "émile", "Émile", "Zola"]);
    }

    #[test]
    fn test_locale_compare_orders_accent_before_case() {
        assert_eq!(locale_compare("Émile", "Zola"), Ordering::Less);
        assert_eq!(locale_compare("resume", "résumé"), Ordering::Less);
        assert_eq!(locale_compare("a", "A"), Ordering::Less);
        assert_eq!(locale_compare("Orwell", "Orwell"), Ordering::Equal);
    }

    #[test]
    fn test_unknown_sort_key_is_ignored() {
        assert_eq!(SortKey::parse("createdAt"), None);
        assert_eq!(SortKey::parse("author"), Some(SortKey::Author));
    }

    #[test]
    fn test_pagination_second_page() {
        let criteria = ListCriteria {
            favorites_only: true,
            status: Some("completed".to_string()),
            page: Some(2),
            limit: Some(1),
            ..Default::default()
        };
        let page = apply_criteria(library(), &criteria);
        assert_eq!(page.total, 2);
        assert_eq!(page.page, 2);
        assert_eq!(page.limit, 1);
        assert_eq!(ids(&page), vec![4]);
    }

    #[test]
    fn test_pagination_past_end_is_empty() {
        let criteria = ListCriteria {
            page: Some(10),
            limit: Some(3),
            ..Default::default()
        };
        let page = apply_criteria(library(), &criteria);
        assert_eq!(page.total, 4);
        assert!(page.data.is_empty());
    }

    #[test]
    fn test_empty_collection_has_zero_limit() {
        let page = apply_criteria(Vec::new(), &ListCriteria::default());
        assert_eq!(page.total, 0);
        assert_eq!(page.limit, 0);
        assert!(page.data.is_empty());
    }
}
