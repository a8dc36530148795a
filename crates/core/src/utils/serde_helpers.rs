//! Serde helpers for unit enums stored as lowercase strings in config files

/// Implement `Serialize` (lowercase name) and case-insensitive `Deserialize`
/// for a unit-only enum.
///
/// Usage:
/// ```ignore
/// impl_case_insensitive_serde!(
///     StdioMode,
///     Inherit => "inherit",
///     Null => "null"
/// );
/// ```
#[macro_export]
macro_rules! impl_case_insensitive_serde {
    ($enum_type:ty, $($variant:ident => $str_val:expr),+ $(,)?) => {
        impl $enum_type {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(
                        Self::$variant => $str_val,
                    )+
                }
            }
        }

        impl std::str::FromStr for $enum_type {
            type Err = String;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                match s.to_lowercase().as_str() {
                    $(
                        $str_val => Ok(Self::$variant),
                    )+
                    _ => Err(format!(
                        "unknown variant '{}', expected one of: {}",
                        s,
                        [$($str_val),+].join(", ")
                    )),
                }
            }
        }

        impl serde::Serialize for $enum_type {
            fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> serde::Deserialize<'de> for $enum_type {
            fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = <String as serde::Deserialize>::deserialize(deserializer)?;
                s.parse::<Self>().map_err(serde::de::Error::custom)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Channel {
        Stable,
        Nightly,
    }

    impl_case_insensitive_serde!(
        Channel,
        Stable => "stable",
        Nightly => "nightly"
    );

    #[test]
    fn test_deserialize_ignores_case() {
        let result: Channel = serde_json::from_str(r#""NIGHTLY""#).unwrap();
        assert_eq!(result, Channel::Nightly);

        let result: Channel = serde_json::from_str(r#""Stable""#).unwrap();
        assert_eq!(result, Channel::Stable);
    }

    #[test]
    fn test_serialize_lowercase() {
        assert_eq!(serde_json::to_string(&Channel::Nightly).unwrap(), r#""nightly""#);
    }

    #[test]
    fn test_unknown_variant_lists_choices() {
        let err = serde_json::from_str::<Channel>(r#""beta""#)
            .unwrap_err()
            .to_string();
        assert!(err.contains("unknown variant 'beta'"));
        assert!(err.contains("expected one of: stable, nightly"));
    }
}
