use super::*;

/// What a dry run reports: a 4-bit exit code and one line per finding.
///
/// | bit | value | meaning                          |
/// |-----|-------|----------------------------------|
/// | 0   | 1     | Core needs to be retrained       |
/// | 1   | 2     | NLU needs to be retrained        |
/// | 2   | 4     | responses should be updated      |
/// | 3   | 8     | training was forced              |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DryRun {
    pub code: u8,
    pub texts: Vec<String>,
}

impl DryRun {
    pub const CORE: u8 = 0b0001;
    pub const NLU: u8 = 0b0010;
    pub const NLG: u8 = 0b0100;
    pub const FORCED: u8 = 0b1000;
}

/// Forcing short-circuits every other signal.
impl From<FingerprintComparisonResult> for DryRun {
    fn from(result: FingerprintComparisonResult) -> Self {
        if result.force_training {
            return Self {
                code: Self::FORCED,
                texts: vec![String::from("The training was forced.")],
            };
        }
        let findings = [
            (result.core, Self::CORE, "Core model should be retrained."),
            (result.nlu, Self::NLU, "NLU model should be retrained."),
            (result.nlg, Self::NLG, "Responses in the domain should be updated."),
        ];
        let code = findings
            .iter()
            .filter(|(flag, _, _)| *flag)
            .fold(0u8, |code, (_, bit, _)| code | *bit);
        let texts = findings
            .iter()
            .filter(|(flag, _, _)| *flag)
            .map(|(_, _, text)| text.to_string())
            .collect::<Vec<_>>();
        match texts.is_empty() {
            true => Self {
                code: 0,
                texts: vec![String::from("No training of components required.")],
            },
            false => Self { code, texts },
        }
    }
}

impl std::fmt::Display for DryRun {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.texts.join("\n"))
    }
}
