//! Stable codes for parser diagnostics.
//!
//! Messages follow the usual Kotlin wording and may change; the code a
//! message is filed under does not. All parser codes live in `E1xxx`.

use std::fmt;
use std::str::FromStr;

macro_rules! error_codes {
    ($($code:ident => $description:literal,)*) => {
        #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
        pub enum ErrorCode {
            $(
                #[doc = $description]
                $code,
            )*
        }

        impl ErrorCode {
            pub const ALL: &[ErrorCode] = &[$(ErrorCode::$code),*];

            pub fn as_str(self) -> &'static str {
                match self {
                    $(ErrorCode::$code => stringify!($code),)*
                }
            }

            /// Short lowercase summary of the whole family of messages.
            pub fn description(self) -> &'static str {
                match self {
                    $(ErrorCode::$code => $description,)*
                }
            }
        }
    };
}

error_codes! {
    E1001 => "unexpected token",
    E1002 => "expected an expression",
    E1003 => "expected punctuation or closing delimiter",
    E1004 => "expected a name",
    E1005 => "expected a type",
    E1006 => "malformed declaration",
    E1007 => "missing statement separator",
    E1008 => "malformed string template",
    E1009 => "expression nested too deeply",
    E1010 => "malformed `when` entry",
    E1011 => "malformed label",
    E1012 => "`try` without `catch` or `finally`",
    E1013 => "reserved syntax",
}

impl ErrorCode {
    pub fn is_parser_error(self) -> bool {
        self.as_str().starts_with("E1")
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no known code.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownErrorCode;

impl FromStr for ErrorCode {
    type Err = UnknownErrorCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ErrorCode::ALL
            .iter()
            .copied()
            .find(|code| code.as_str() == s)
            .ok_or(UnknownErrorCode)
    }
}
