//! A single 13F information-table row.

use super::MatchingKey;
use crate::error::{HoldtrackError, HoldtrackResult};
use serde::{Deserialize, Serialize};

/// Option flag on a 13F row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PutCall {
    /// Put option position.
    Put,
    /// Call option position.
    Call,
}

impl PutCall {
    /// Returns the label used in filings.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Put => "Put",
            Self::Call => "Call",
        }
    }
}

impl std::fmt::Display for PutCall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Whether the reported amount is a share count or a principal amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SharesType {
    /// Shares.
    #[default]
    #[serde(rename = "SH")]
    Shares,
    /// Principal amount (debt securities).
    #[serde(rename = "PRN")]
    Principal,
}

impl SharesType {
    /// Returns the short code used in filings.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Shares => "SH",
            Self::Principal => "PRN",
        }
    }
}

/// Investment discretion reported for a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum InvestmentDiscretion {
    /// Sole discretion.
    #[default]
    #[serde(rename = "SOLE")]
    Sole,
    /// Shared-defined discretion.
    #[serde(rename = "DFND")]
    Defined,
    /// Shared-other discretion.
    #[serde(rename = "OTR")]
    Other,
}

impl InvestmentDiscretion {
    /// Returns the short code used in filings.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Sole => "SOLE",
            Self::Defined => "DFND",
            Self::Other => "OTR",
        }
    }
}

/// Voting authority counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VotingAuthority {
    /// Shares with sole voting authority.
    pub sole: u64,
    /// Shares with shared voting authority.
    pub shared: u64,
    /// Shares with no voting authority.
    pub none: u64,
}

impl VotingAuthority {
    /// Creates a new voting authority record.
    #[must_use]
    pub fn new(sole: u64, shared: u64, none: u64) -> Self {
        Self { sole, shared, none }
    }

    /// Total shares across all three authority buckets.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.sole + self.shared + self.none
    }
}

/// A single holding as reported in a 13F filing.
///
/// Values are whole US dollars. Holdings are immutable once produced by
/// a [`FilingSource`](crate::source::FilingSource).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    /// Issuer name as printed in the filing.
    pub issuer_name: String,

    /// Title of class (e.g. `COM`, `CL A`, `NOTE 1.000% 6/2`).
    pub title_of_class: String,

    /// 9-character CUSIP.
    pub cusip: String,

    /// Optional FIGI.
    #[serde(default)]
    pub figi: Option<String>,

    /// Reported market value in whole dollars.
    pub value_usd: i64,

    /// Share count or principal amount.
    #[serde(default)]
    pub shares_or_principal: i64,

    /// Whether `shares_or_principal` is shares or principal.
    #[serde(default)]
    pub shares_type: SharesType,

    /// Option flag, `None` for plain shares.
    #[serde(default)]
    pub put_call: Option<PutCall>,

    /// Investment discretion.
    #[serde(default)]
    pub investment_discretion: InvestmentDiscretion,

    /// Voting authority counts.
    #[serde(default)]
    pub voting: VotingAuthority,
}

impl Holding {
    /// Creates a new holding builder.
    #[must_use]
    pub fn builder() -> HoldingBuilder {
        HoldingBuilder::new()
    }

    /// Returns the composite key used to match this row across filings.
    #[must_use]
    pub fn key(&self) -> MatchingKey {
        MatchingKey::new(&self.cusip, &self.title_of_class, self.put_call)
    }

    /// Returns true for put or call rows.
    #[must_use]
    pub fn is_option(&self) -> bool {
        self.put_call.is_some()
    }

    /// Checks the invariants a filing source must uphold.
    ///
    /// # Errors
    ///
    /// Returns an error if the CUSIP is not 9 alphanumeric characters, or if
    /// the value or share count is negative.
    pub fn validate(&self) -> HoldtrackResult<()> {
        if self.cusip.len() != 9 || !self.cusip.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(HoldtrackError::invalid_holding(
                &self.cusip,
                "cusip must be 9 alphanumeric characters",
            ));
        }

        if self.value_usd < 0 {
            return Err(HoldtrackError::invalid_holding(
                &self.cusip,
                "value_usd cannot be negative",
            ));
        }

        if self.shares_or_principal < 0 {
            return Err(HoldtrackError::invalid_holding(
                &self.cusip,
                "shares_or_principal cannot be negative",
            ));
        }

        Ok(())
    }
}

/// Builder for constructing a Holding.
#[derive(Debug, Clone, Default)]
pub struct HoldingBuilder {
    issuer_name: Option<String>,
    title_of_class: Option<String>,
    cusip: Option<String>,
    figi: Option<String>,
    value_usd: Option<i64>,
    shares_or_principal: i64,
    shares_type: SharesType,
    put_call: Option<PutCall>,
    investment_discretion: InvestmentDiscretion,
    voting: VotingAuthority,
}

impl HoldingBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the issuer name.
    #[must_use]
    pub fn issuer_name(mut self, name: impl Into<String>) -> Self {
        self.issuer_name = Some(name.into());
        self
    }

    /// Sets the title of class. Defaults to `COM`.
    #[must_use]
    pub fn title_of_class(mut self, title: impl Into<String>) -> Self {
        self.title_of_class = Some(title.into());
        self
    }

    /// Sets the CUSIP.
    #[must_use]
    pub fn cusip(mut self, cusip: impl Into<String>) -> Self {
        self.cusip = Some(cusip.into());
        self
    }

    /// Sets the FIGI.
    #[must_use]
    pub fn figi(mut self, figi: impl Into<String>) -> Self {
        self.figi = Some(figi.into());
        self
    }

    /// Sets the reported value in whole dollars.
    #[must_use]
    pub fn value_usd(mut self, value: i64) -> Self {
        self.value_usd = Some(value);
        self
    }

    /// Sets the share count or principal amount.
    #[must_use]
    pub fn shares(mut self, shares: i64) -> Self {
        self.shares_or_principal = shares;
        self
    }

    /// Sets the shares type.
    #[must_use]
    pub fn shares_type(mut self, shares_type: SharesType) -> Self {
        self.shares_type = shares_type;
        self
    }

    /// Sets the option flag.
    #[must_use]
    pub fn put_call(mut self, put_call: PutCall) -> Self {
        self.put_call = Some(put_call);
        self
    }

    /// Sets the investment discretion.
    #[must_use]
    pub fn investment_discretion(mut self, discretion: InvestmentDiscretion) -> Self {
        self.investment_discretion = discretion;
        self
    }

    /// Sets the voting authority counts.
    #[must_use]
    pub fn voting(mut self, voting: VotingAuthority) -> Self {
        self.voting = voting;
        self
    }

    /// Builds the holding.
    ///
    /// # Errors
    ///
    /// Returns an error if required fields are missing or the holding
    /// fails [`Holding::validate`].
    pub fn build(self) -> HoldtrackResult<Holding> {
        let issuer_name = self
            .issuer_name
            .ok_or_else(|| HoldtrackError::missing_field("issuer_name"))?;

        let cusip = self
            .cusip
            .ok_or_else(|| HoldtrackError::missing_field("cusip"))?;

        let value_usd = self
            .value_usd
            .ok_or_else(|| HoldtrackError::missing_field("value_usd"))?;

        let holding = Holding {
            issuer_name,
            title_of_class: self.title_of_class.unwrap_or_else(|| "COM".to_string()),
            cusip,
            figi: self.figi,
            value_usd,
            shares_or_principal: self.shares_or_principal,
            shares_type: self.shares_type,
            put_call: self.put_call,
            investment_discretion: self.investment_discretion,
            voting: self.voting,
        };
        holding.validate()?;

        Ok(holding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nvidia() -> Holding {
        Holding::builder()
            .issuer_name("NVIDIA CORP")
            .cusip("67066G104")
            .value_usd(1_000_000)
            .shares(1_000)
            .voting(VotingAuthority::new(900, 0, 100))
            .build()
            .unwrap()
    }

    #[test]
    fn test_builder_defaults() {
        let h = nvidia();
        assert_eq!(h.title_of_class, "COM");
        assert_eq!(h.shares_type, SharesType::Shares);
        assert_eq!(h.investment_discretion, InvestmentDiscretion::Sole);
        assert!(!h.is_option());
        assert_eq!(h.voting.total(), 1_000);
    }

    #[test]
    fn test_key_separates_options() {
        let shares = nvidia();
        let calls = Holding::builder()
            .issuer_name("NVIDIA CORP")
            .cusip("67066G104")
            .value_usd(250_000)
            .put_call(PutCall::Call)
            .build()
            .unwrap();

        assert_ne!(shares.key(), calls.key());
        assert_eq!(calls.key().put_call, Some(PutCall::Call));
    }

    #[test]
    fn test_builder_validation() {
        // Missing CUSIP
        let result = Holding::builder()
            .issuer_name("APPLE INC")
            .value_usd(100)
            .build();
        assert_eq!(result, Err(HoldtrackError::missing_field("cusip")));

        // Short CUSIP
        let result = Holding::builder()
            .issuer_name("APPLE INC")
            .cusip("0378331")
            .value_usd(100)
            .build();
        assert!(result.is_err());

        // Negative value
        let result = Holding::builder()
            .issuer_name("APPLE INC")
            .cusip("037833100")
            .value_usd(-1)
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_serde_filing_codes() {
        let json = r#"{
            "issuer_name": "TESLA INC",
            "title_of_class": "COM",
            "cusip": "88160R101",
            "value_usd": 5000,
            "shares_or_principal": 20,
            "shares_type": "SH",
            "put_call": "Put",
            "investment_discretion": "DFND"
        }"#;
        let h: Holding = serde_json::from_str(json).unwrap();
        assert_eq!(h.put_call, Some(PutCall::Put));
        assert_eq!(h.investment_discretion, InvestmentDiscretion::Defined);
        assert_eq!(h.voting, VotingAuthority::default());
        assert!(h.figi.is_none());
        assert!(h.validate().is_ok());
    }
}
