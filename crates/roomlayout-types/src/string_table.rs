use serde::Serialize;

/// Raised when a record refers past the end of the file's string table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("string index {index} out of range (table has {len} entries)")]
pub struct StringIndexError {
    pub index: i64,
    pub len: usize,
}

/// The file-local dictionary referenced by 1-based indices elsewhere in a
/// layout file. Index 0 means "no string".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StringTable {
    strings: Vec<String>,
}

impl StringTable {
    pub fn new(strings: Vec<String>) -> Self {
        Self { strings }
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// Resolve a 1-based index: `0` is absent, `1..=len` is a string.
    pub fn resolve(&self, index: i64) -> Result<Option<&str>, StringIndexError> {
        if index == 0 {
            return Ok(None);
        }
        usize::try_from(index)
            .ok()
            .and_then(|i| self.strings.get(i - 1))
            .map(|s| Some(s.as_str()))
            .ok_or(StringIndexError {
                index,
                len: self.strings.len(),
            })
    }

    /// Like [`resolve`](Self::resolve) but returns an owned string.
    pub fn resolve_owned(&self, index: i64) -> Result<Option<String>, StringIndexError> {
        self.resolve(index).map(|s| s.map(str::to_owned))
    }
}

impl FromIterator<String> for StringTable {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> StringTable {
        ["alpha", "beta", "gamma"]
            .into_iter()
            .map(String::from)
            .collect()
    }

    #[test]
    fn zero_is_absent() {
        assert_eq!(table().resolve(0), Ok(None));
        assert_eq!(StringTable::default().resolve(0), Ok(None));
    }

    #[test]
    fn one_based_lookup() {
        let t = table();
        assert_eq!(t.resolve(1), Ok(Some("alpha")));
        assert_eq!(t.resolve(3), Ok(Some("gamma")));
    }

    #[test]
    fn past_end_is_an_error() {
        let err = table().resolve(4).unwrap_err();
        assert_eq!(err, StringIndexError { index: 4, len: 3 });
    }

    #[test]
    fn negative_is_an_error() {
        assert!(table().resolve(-1).is_err());
    }

    #[test]
    fn serializes_as_plain_list() {
        let json = serde_json::to_string(&table()).expect("serialize");
        assert_eq!(json, r#"["alpha","beta","gamma"]"#);
    }
}
