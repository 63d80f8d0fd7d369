use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

use thiserror::Error;

/// Errors raised when parsing comma-separated value text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ParseValueError {
    #[error("expected {expected} comma-separated components, found {found}")]
    Arity { expected: usize, found: usize },

    #[error("invalid component `{text}`")]
    Component { text: String },
}

/// Splits `text` at commas and parses exactly `N` components.
pub(crate) fn parse_components<T: FromStr, const N: usize>(
    text: &str,
) -> Result<[T; N], ParseValueError> {
    let parts: Vec<&str> = text.split(',').map(str::trim).collect();
    if parts.len() != N {
        return Err(ParseValueError::Arity {
            expected: N,
            found: parts.len(),
        });
    }

    let values = parts
        .iter()
        .map(|part| {
            part.parse::<T>().map_err(|_| ParseValueError::Component {
                text: part.to_string(),
            })
        })
        .collect::<Result<Vec<T>, _>>()?;

    values.try_into().map_err(|values: Vec<T>| ParseValueError::Arity {
        expected: N,
        found: values.len(),
    })
}

/// Writes `parts` separated by commas.
pub(crate) fn write_components<T: fmt::Display>(
    f: &mut impl fmt::Write,
    parts: &[T],
) -> fmt::Result {
    for (index, part) in parts.iter().enumerate() {
        if index > 0 {
            f.write_char(',')?;
        }
        write!(f, "{part}")?;
    }
    Ok(())
}

/// Implements `Display` and `FromStr` as comma-separated fields.
macro_rules! delimited {
    ($ty:ident { $($field:ident),+ $(,)? }: $component:ty) => {
        impl ::core::fmt::Display for $ty {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                $crate::types::parse::write_components(f, &[$(self.$field),+])
            }
        }

        impl ::core::str::FromStr for $ty {
            type Err = $crate::types::ParseValueError;

            fn from_str(text: &str) -> Result<Self, Self::Err> {
                let [$($field),+] = $crate::types::parse::parse_components::<
                    $component,
                    { [$(stringify!($field)),+].len() },
                >(text)?;
                Ok(Self { $($field),+ })
            }
        }
    };
}

pub(crate) use delimited;

#[cfg(test)]
mod tests {
    use super::{ParseValueError, parse_components};

    #[test]
    fn parses_trimmed_components() {
        let parsed: [f32; 3] = parse_components(" 1.5, 2 ,-3").unwrap();
        assert_eq!(parsed, [1.5, 2.0, -3.0]);
    }

    #[test]
    fn reports_arity_and_bad_components() {
        assert_eq!(
            parse_components::<u8, 2>("1,2,3"),
            Err(ParseValueError::Arity { expected: 2, found: 3 })
        );
        assert_eq!(
            parse_components::<u8, 2>("1,x"),
            Err(ParseValueError::Component { text: "x".into() })
        );
        assert_eq!(
            parse_components::<u8, 1>("300"),
            Err(ParseValueError::Component { text: "300".into() })
        );
    }
}
