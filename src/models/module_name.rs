use std::fmt;

/// A dotted platform module identifier (e.g. `java.base`, `jdk.crypto.ec`).
///
/// Equality and ordering are by string, which is what gives `AnalysisResult`'s
/// sets their deterministic iteration order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub struct ModuleName(String);

impl ModuleName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_platform_prefixed(&self) -> bool {
        self.0.starts_with("java.") || self.0.starts_with("jdk.")
    }
}

impl fmt::Display for ModuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ModuleName {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ModuleName {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for ModuleName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

pub const JAVA_BASE: &str = "java.base";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orders_by_string() {
        let mut names = vec![
            ModuleName::new("jdk.zipfs"),
            ModuleName::new("java.base"),
            ModuleName::new("java.sql"),
        ];
        names.sort();
        assert_eq!(
            names,
            vec![
                ModuleName::new("java.base"),
                ModuleName::new("java.sql"),
                ModuleName::new("jdk.zipfs"),
            ]
        );
    }

    #[test]
    fn recognizes_platform_prefix() {
        assert!(ModuleName::new("java.sql").is_platform_prefixed());
        assert!(ModuleName::new("jdk.zipfs").is_platform_prefixed());
        assert!(!ModuleName::new("com.example.app").is_platform_prefixed());
    }
}
