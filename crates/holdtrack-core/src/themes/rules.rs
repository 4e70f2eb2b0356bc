//! Keyword rules mapping issuer names to investment themes.

use crate::error::{HoldtrackError, HoldtrackResult};
use serde::{Deserialize, Serialize};

/// Theme assigned to names no rule matches.
pub const UNCATEGORIZED: &str = "Other";

/// Classifies an issuer name into a theme.
///
/// Returning `None` means the name is uncategorized.
pub trait Classify {
    /// Returns the theme for an issuer name, if any rule matches.
    fn classify(&self, issuer_name: &str) -> Option<&str>;

    /// Returns the theme, falling back to [`UNCATEGORIZED`].
    fn theme_of(&self, issuer_name: &str) -> &str {
        self.classify(issuer_name).unwrap_or(UNCATEGORIZED)
    }
}

impl<C: Classify + ?Sized> Classify for &C {
    fn classify(&self, issuer_name: &str) -> Option<&str> {
        (**self).classify(issuer_name)
    }
}

/// One theme and the keywords that select it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeRule {
    /// Theme name.
    pub name: String,
    /// Substrings matched against the upper-cased issuer name.
    pub keywords: Vec<String>,
}

impl ThemeRule {
    /// Creates a rule. Keywords are upper-cased.
    #[must_use]
    pub fn new<I, S>(name: impl Into<String>, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            name: name.into(),
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().to_uppercase())
                .collect(),
        }
    }

    fn matches(&self, upper_name: &str) -> bool {
        self.keywords.iter().any(|k| upper_name.contains(k.as_str()))
    }
}

/// Ordered rule list. The first rule with a matching keyword wins.
///
/// # Example
///
/// ```rust
/// use holdtrack_core::themes::{Classify, ThemeRule, ThemeRules};
///
/// let rules = ThemeRules::new(vec![ThemeRule::new("Chips", ["nvidia", "semiconductor"])]);
/// assert_eq!(rules.classify("NVIDIA CORP"), Some("Chips"));
/// assert_eq!(rules.theme_of("APPLE INC"), "Other");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<ThemeRule>", into = "Vec<ThemeRule>")]
pub struct ThemeRules {
    rules: Vec<ThemeRule>,
}

impl From<Vec<ThemeRule>> for ThemeRules {
    fn from(rules: Vec<ThemeRule>) -> Self {
        Self::new(rules)
    }
}

impl From<ThemeRules> for Vec<ThemeRule> {
    fn from(rules: ThemeRules) -> Self {
        rules.rules
    }
}

impl ThemeRules {
    /// Creates a ruleset, normalizing every keyword to upper case.
    #[must_use]
    pub fn new(rules: Vec<ThemeRule>) -> Self {
        let rules = rules
            .into_iter()
            .map(|r| ThemeRule::new(r.name, r.keywords))
            .collect();
        Self { rules }
    }

    /// Returns the rules in match order.
    #[must_use]
    pub fn rules(&self) -> &[ThemeRule] {
        &self.rules
    }

    /// Number of themes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if there are no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rejects unnamed themes, empty keywords, and rules named like the
    /// uncategorized bucket.
    ///
    /// # Errors
    ///
    /// Returns [`HoldtrackError::InvalidConfig`] naming the offending rule.
    pub fn validate(&self) -> HoldtrackResult<()> {
        for (i, rule) in self.rules.iter().enumerate() {
            let field = format!("themes[{i}]");
            if rule.name.trim().is_empty() {
                return Err(HoldtrackError::invalid_config(field, "theme name is empty"));
            }
            if rule.name == UNCATEGORIZED {
                return Err(HoldtrackError::invalid_config(
                    field,
                    format!("'{UNCATEGORIZED}' is reserved for unmatched names"),
                ));
            }
            if rule.keywords.iter().any(|k| k.trim().is_empty()) {
                return Err(HoldtrackError::invalid_config(field, "empty keyword"));
            }
        }
        Ok(())
    }

    /// The built-in fourteen-theme table.
    #[must_use]
    pub fn standard() -> Self {
        let table: [(&str, &[&str]); 14] = [
            (
                "AI/Semiconductors",
                &[
                    "NVIDIA", "AMD", "ADVANCED MICRO", "INTEL", "ASML", "TSMC", "TAIWAN SEMI",
                    "SEMICONDUCTOR", "BROADCOM", "QUALCOMM", "MARVELL", "MICRON",
                    "APPLIED MATERIAL", "LAM RESEARCH", "KLA", "SYNOPSYS", "CADENCE",
                    "ARM HOLDINGS", "LATTICE",
                ],
            ),
            (
                "Cloud/SaaS",
                &[
                    "SALESFORCE", "SERVICENOW", "WORKDAY", "SNOWFLAKE", "DATADOG", "MONGODB",
                    "CLOUDFLARE", "ATLASSIAN", "HUBSPOT", "ZSCALER", "CROWDSTRIKE", "OKTA",
                    "SPLUNK", "TWILIO", "DOCUSIGN", "ZOOM", "DROPBOX", "BOX INC",
                ],
            ),
            (
                "Fintech/Payments",
                &[
                    "VISA", "MASTERCARD", "PAYPAL", "SQUARE", "BLOCK INC", "STRIPE", "ADYEN",
                    "AFFIRM", "SOFI", "ROBINHOOD", "COINBASE", "MARQETA", "TOAST", "BILL.COM",
                    "BILL HOLDINGS",
                ],
            ),
            (
                "E-commerce/Retail",
                &[
                    "AMAZON", "SHOPIFY", "MERCADOLIBRE", "ETSY", "EBAY", "WAYFAIR", "CHEWY",
                    "COUPANG", "PINDUODUO", "JD.COM", "ALIBABA", "WALMART", "TARGET", "COSTCO",
                    "HOME DEPOT", "LOWE",
                ],
            ),
            (
                "Social/Advertising",
                &[
                    "META", "FACEBOOK", "GOOGLE", "ALPHABET", "SNAP", "PINTEREST", "TWITTER",
                    "LINKEDIN", "REDDIT", "TRADE DESK", "PUBMATIC", "DIGITAL TURBINE",
                ],
            ),
            (
                "Streaming/Media",
                &[
                    "NETFLIX", "SPOTIFY", "DISNEY", "WARNER", "PARAMOUNT", "ROKU", "ROBLOX",
                    "UNITY", "TAKE-TWO", "ELECTRONIC ARTS", "ACTIVISION", "LIVE NATION", "IMAX",
                ],
            ),
            (
                "Healthcare/Biotech",
                &[
                    "UNITEDHEALTH", "CVS", "HUMANA", "CIGNA", "ANTHEM", "ELEVANCE", "PFIZER",
                    "LILLY", "ELI LILLY", "MERCK", "JOHNSON & JOHNSON", "ABBVIE", "AMGEN",
                    "GILEAD", "REGENERON", "MODERNA", "BIONTECH", "VERTEX", "ILLUMINA",
                    "DEXCOM", "INTUITIVE SURGICAL", "THERMO FISHER", "DANAHER", "ABBOTT",
                ],
            ),
            (
                "Energy",
                &[
                    "EXXON", "CHEVRON", "MARATHON", "OCCIDENTAL", "CONOCOPHILLIPS",
                    "SCHLUMBERGER", "HALLIBURTON", "PIONEER", "DEVON", "EOG", "DIAMONDBACK",
                    "COTERRA", "HESS", "VALERO", "PHILLIPS 66",
                ],
            ),
            (
                "Clean Energy",
                &[
                    "TESLA", "RIVIAN", "LUCID", "ENPHASE", "SOLAREDGE", "FIRST SOLAR", "SUNRUN",
                    "PLUG POWER", "BLOOM ENERGY", "CHARGEPOINT", "EVGO", "NEXTERA",
                ],
            ),
            (
                "Financials/Banks",
                &[
                    "JPMORGAN", "JP MORGAN", "BANK OF AMERICA", "WELLS FARGO", "CITIGROUP",
                    "GOLDMAN", "MORGAN STANLEY", "CHARLES SCHWAB", "BLACKROCK", "BLACKSTONE",
                    "KKR", "APOLLO", "CARLYLE", "STATE STREET", "NORTHERN TRUST",
                    "BANK OF NEW YORK", "US BANCORP", "PNC", "TRUIST", "CAPITAL ONE",
                    "AMERICAN EXPRESS", "DISCOVER", "SYNCHRONY",
                ],
            ),
            (
                "Industrials",
                &[
                    "CATERPILLAR", "DEERE", "JOHN DEERE", "BOEING", "LOCKHEED", "RAYTHEON", "RTX",
                    "NORTHROP", "GENERAL DYNAMICS", "L3HARRIS", "HONEYWELL", "3M",
                    "GENERAL ELECTRIC", "UNION PACIFIC", "CSX", "NORFOLK", "FEDEX", "UPS",
                    "UNITED PARCEL",
                ],
            ),
            (
                "Consumer",
                &[
                    "COCA-COLA", "PEPSI", "PROCTER", "P&G", "UNILEVER", "COLGATE", "KIMBERLY",
                    "CLOROX", "ESTEE LAUDER", "NIKE", "LULULEMON", "STARBUCKS", "MCDONALD",
                    "CHIPOTLE", "YUM", "DOMINO",
                ],
            ),
            (
                "Telecom",
                &[
                    "AT&T", "VERIZON", "T-MOBILE", "COMCAST", "CHARTER", "DISH", "LUMEN",
                    "VONAGE",
                ],
            ),
            (
                "Real Estate",
                &[
                    "PROLOGIS", "AMERICAN TOWER", "CROWN CASTLE", "EQUINIX", "DIGITAL REALTY",
                    "PUBLIC STORAGE", "REALTY INCOME", "SIMON PROPERTY", "WELLTOWER", "VENTAS",
                    "AVALONBAY", "EQUITY RESIDENTIAL",
                ],
            ),
        ];

        Self {
            rules: table
                .iter()
                .map(|(name, keywords)| ThemeRule::new(*name, keywords.iter()))
                .collect(),
        }
    }
}

impl Classify for ThemeRules {
    fn classify(&self, issuer_name: &str) -> Option<&str> {
        let upper = issuer_name.to_uppercase();
        self.rules
            .iter()
            .find(|rule| rule.matches(&upper))
            .map(|rule| rule.name.as_str())
    }
}
