//! Artwork Context - Value Objects

use serde::{Deserialize, Serialize};
use sha1::{Digest, Sha1};

/// 缓存文件固定扩展名
pub const CACHE_EXTENSION: &str = "jpg";

/// 艺术家与专辑之间的分隔符
const IDENTITY_SEPARATOR: char = '|';

/// 规范化标识字符串：去除首尾空白并转小写
///
/// 缓存 key 派生和专辑名精确匹配共用同一规则
pub fn normalize_identity(value: &str) -> String {
    value.trim().to_lowercase()
}

/// 封面请求 - 艺术家 + 专辑
///
/// 保留原始文本（用于外部查询），规范化只在派生 key / 比较时进行。
/// 同名的不同发行版会映射到同一个 key，这是已知的精度限制。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtworkRequest {
    pub artist: String,
    pub album: String,
}

impl ArtworkRequest {
    pub fn new(artist: impl Into<String>, album: impl Into<String>) -> Self {
        Self {
            artist: artist.into(),
            album: album.into(),
        }
    }

    /// 派生该请求对应的缓存 key
    pub fn cache_key(&self) -> CacheKey {
        CacheKey::derive(&self.artist, &self.album)
    }
}

impl std::fmt::Display for ArtworkRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.artist, self.album)
    }
}

/// 缓存 key - sha1("artist|album") 的小写十六进制
///
/// 不变量:
/// - 固定 40 个十六进制字符
/// - 规范化后相同的输入总是得到相同的 key
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CacheKey(String);

impl CacheKey {
    /// 从艺术家/专辑派生 key（纯函数，无 I/O）
    pub fn derive(artist: &str, album: &str) -> Self {
        let identity = format!(
            "{}{}{}",
            normalize_identity(artist),
            IDENTITY_SEPARATOR,
            normalize_identity(album)
        );
        let digest = Sha1::digest(identity.as_bytes());
        Self(format!("{:x}", digest))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 缓存文件名：`<hex>.jpg`
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.0, CACHE_EXTENSION)
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_is_fixed_length_lowercase_hex() {
        let key = CacheKey::derive("Radiohead", "OK Computer");
        assert_eq!(key.as_str().len(), 40);
        assert!(key
            .as_str()
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn test_known_digest() {
        // sha1("abc|def")
        let key = CacheKey::derive("abc", "def");
        let expected = format!("{:x}", Sha1::digest(b"abc|def"));
        assert_eq!(key.as_str(), expected);
    }

    #[test]
    fn test_key_ignores_case_and_surrounding_whitespace() {
        let pairs = [
            (("Radiohead", "OK Computer"), ("radiohead", "ok computer")),
            (("  Radiohead ", "OK Computer\n"), ("RADIOHEAD", "ok COMPUTER")),
            (("Björk", "Homogenic"), ("BJÖRK", " homogenic ")),
        ];

        for ((a1, b1), (a2, b2)) in pairs {
            assert_eq!(CacheKey::derive(a1, b1), CacheKey::derive(a2, b2));
        }
    }

    #[test]
    fn test_distinct_identities_give_distinct_keys() {
        let corpus = [
            ("Radiohead", "OK Computer"),
            ("Radiohead", "Kid A"),
            ("Radiohead", "OK Computer OKNOTOK"),
            ("The Beatles", "Abbey Road"),
            ("Beatles", "Abbey Road"),
            ("Abbey Road", "The Beatles"),
            ("ab", "c"),
            ("a", "bc"),
            ("Massive Attack", "Mezzanine"),
            ("", ""),
        ];

        let keys: std::collections::HashSet<_> = corpus
            .iter()
            .map(|(artist, album)| CacheKey::derive(artist, album))
            .collect();
        assert_eq!(keys.len(), corpus.len());
    }

    #[test]
    fn test_inner_whitespace_is_significant() {
        assert_ne!(
            CacheKey::derive("Daft Punk", "Discovery"),
            CacheKey::derive("DaftPunk", "Discovery")
        );
    }

    #[test]
    fn test_file_name_has_fixed_extension() {
        let request = ArtworkRequest::new("Portishead", "Dummy");
        let name = request.cache_key().file_name();
        assert!(name.ends_with(".jpg"));
        assert_eq!(name.len(), 44);
    }
}
