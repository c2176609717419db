use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The closed set of content the gateway knows how to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationKind {
    Resume,
    CoverLetter,
    Interview,
    Salary,
    CareerPath,
    SkillsGap,
}

#[derive(Debug, Error)]
#[error("unknown generation type '{0}'")]
pub struct UnknownKind(pub String);

impl GenerationKind {
    pub const ALL: [GenerationKind; 6] = [
        GenerationKind::Resume,
        GenerationKind::CoverLetter,
        GenerationKind::Interview,
        GenerationKind::Salary,
        GenerationKind::CareerPath,
        GenerationKind::SkillsGap,
    ];

    /// Wire name sent to the gateway as `type`.
    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationKind::Resume => "resume",
            GenerationKind::CoverLetter => "cover_letter",
            GenerationKind::Interview => "interview",
            GenerationKind::Salary => "salary",
            GenerationKind::CareerPath => "career_path",
            GenerationKind::SkillsGap => "skills_gap",
        }
    }
}

impl fmt::Display for GenerationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GenerationKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownKind(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_parses_its_own_name() {
        for kind in GenerationKind::ALL {
            assert_eq!(kind.as_str().parse::<GenerationKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let err = "poetry".parse::<GenerationKind>().unwrap_err();
        assert_eq!(err.0, "poetry");
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert!("Cover_Letter".parse::<GenerationKind>().is_err());
        assert!(" resume".parse::<GenerationKind>().is_err());
    }

    #[test]
    fn test_serde_matches_wire_name() {
        let json = serde_json::to_value(GenerationKind::SkillsGap).unwrap();
        assert_eq!(json, serde_json::json!("skills_gap"));
    }
}
