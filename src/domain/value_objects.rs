use serde::{Deserialize, Serialize};
use std::fmt;

use super::InvalidStatus;

/// 書籍ID - ストアが採番する整数ID
///
/// 不変条件：コレクション内で一意。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(u64);

impl BookId {
    /// 空のコレクションで最初に採番されるID
    pub const FIRST: BookId = BookId(1);

    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    /// 次のID（現在値 + 1）
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }

    /// パスパラメータ等の文字列から寛容にIDを読み取る
    ///
    /// 先頭の整数部分だけを解釈する（"12abc" は 12）。
    /// 整数として読めない、または負の値の場合は`None`を返す。
    /// `None`はどの書籍にも一致しない。
    pub fn parse_lenient(raw: &str) -> Option<Self> {
        let value = parse_leading_int(raw)?;
        u64::try_from(value).ok().map(Self)
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 文字列先頭の整数を読み取る
///
/// 先頭の空白を読み飛ばし、任意の符号に続く数字列を解釈する。
/// 数字が1つもなければ`None`。
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }

    let magnitude: i64 = rest[..digits_len].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// 読書ステータス
///
/// ステータス更新操作でのみ検証される列挙値。
/// 遷移の制約はなく、どの値からどの値へも変更できる。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadingStatus {
    /// 未読
    #[default]
    Unread,
    /// 読書中
    Reading,
    /// 読了
    Completed,
}

impl ReadingStatus {
    /// 有効な値（表示順）
    pub const ALL: [ReadingStatus; 3] = [
        ReadingStatus::Unread,
        ReadingStatus::Reading,
        ReadingStatus::Completed,
    ];

    /// 文字列表現を取得する
    pub fn as_str(&self) -> &'static str {
        match self {
            ReadingStatus::Unread => "unread",
            ReadingStatus::Reading => "reading",
            ReadingStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for ReadingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ReadingStatus {
    type Err = InvalidStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unread" => Ok(ReadingStatus::Unread),
            "reading" => Ok(ReadingStatus::Reading),
            "completed" => Ok(ReadingStatus::Completed),
            other => Err(InvalidStatus(other.to_string())),
        }
    }
}
