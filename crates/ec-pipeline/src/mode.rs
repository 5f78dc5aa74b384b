use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Pipeline path selected per frame.
///
/// The discriminants are the wire codes used by hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProcessingMode {
    #[default]
    Passthrough = 0,
    Grayscale = 1,
    EdgeDetect = 2,
}

impl ProcessingMode {
    /// Decodes a host mode code. Unknown codes select `Passthrough`.
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => Self::Passthrough,
            1 => Self::Grayscale,
            2 => Self::EdgeDetect,
            other => {
                log::debug!("unknown processing mode {other}, falling back to passthrough");
                Self::Passthrough
            }
        }
    }

    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Passthrough => "passthrough",
            Self::Grayscale => "grayscale",
            Self::EdgeDetect => "edge-detect",
        }
    }
}

impl From<i32> for ProcessingMode {
    fn from(code: i32) -> Self {
        Self::from_code(code)
    }
}

impl fmt::Display for ProcessingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseModeError(String);

impl fmt::Display for ParseModeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown processing mode '{}' (expected passthrough, grayscale or edge-detect)",
            self.0
        )
    }
}

impl std::error::Error for ParseModeError {}

impl FromStr for ProcessingMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "passthrough" | "raw" | "0" => Ok(Self::Passthrough),
            "grayscale" | "gray" | "1" => Ok(Self::Grayscale),
            "edge-detect" | "edges" | "edge" | "2" => Ok(Self::EdgeDetect),
            _ => Err(ParseModeError(s.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ProcessingMode;

    #[test]
    fn codes_round_trip() {
        for mode in [
            ProcessingMode::Passthrough,
            ProcessingMode::Grayscale,
            ProcessingMode::EdgeDetect,
        ] {
            assert_eq!(ProcessingMode::from_code(mode.code()), mode);
        }
    }

    #[test]
    fn unknown_codes_fall_back_to_passthrough() {
        assert_eq!(ProcessingMode::from_code(3), ProcessingMode::Passthrough);
        assert_eq!(ProcessingMode::from_code(-1), ProcessingMode::Passthrough);
        assert_eq!(ProcessingMode::from(i32::MAX), ProcessingMode::Passthrough);
    }

    #[test]
    fn parses_names_and_aliases() {
        assert_eq!("edge-detect".parse::<ProcessingMode>(), Ok(ProcessingMode::EdgeDetect));
        assert_eq!("RAW".parse::<ProcessingMode>(), Ok(ProcessingMode::Passthrough));
        assert_eq!("gray".parse::<ProcessingMode>(), Ok(ProcessingMode::Grayscale));
        assert!("sepia".parse::<ProcessingMode>().is_err());
    }

    #[test]
    fn serializes_by_name() {
        let json = serde_json::to_string(&ProcessingMode::EdgeDetect).expect("serialize");
        assert_eq!(json, r#""edge-detect""#);
    }
}
