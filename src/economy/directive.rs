//! Parsing of balance placeholder directives such as `balance_commas` or `balance_3dp`.
use thiserror::Error;

/// Prefix shared by every directive except the plain `balance`.
const PREFIX: &str = "balance_";

/// Suffix closing a decimal points directive.
const DECIMAL_POINTS_SUFFIX: &str = "dp";

/// Enum representing the rendering requested by a placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// `balance`: the economy's own precision, at least two decimal points.
    Balance,
    /// `balance_fixed`: whole number, no grouping.
    Fixed,
    /// `balance_formatted`: compact form with a magnitude suffix.
    Formatted,
    /// `balance_commas`: whole number with thousands separators.
    Commas,
    /// `balance_<N>dp`: at most `N` decimal points.
    DecimalPoints(usize),
}

impl Directive {
    /// Parses a placeholder into a directive.
    ///
    /// The decimal points form is looked for first, anywhere in a `balance_`
    /// placeholder, before the exact names are compared.
    pub fn parse(params: &str) -> Result<Self, DirectiveError> {
        if params.starts_with(PREFIX) {
            if let Some(digits) = find_decimal_points(params) {
                return digits
                    .parse::<i32>()
                    .map(|points| Directive::DecimalPoints(points.unsigned_abs() as usize))
                    .map_err(|_| DirectiveError::InvalidNumber(digits.to_string()));
            }
        }

        match params {
            "balance" => Ok(Directive::Balance),
            "balance_fixed" => Ok(Directive::Fixed),
            "balance_formatted" => Ok(Directive::Formatted),
            "balance_commas" => Ok(Directive::Commas),
            _ => Err(DirectiveError::Unrecognized),
        }
    }
}

/// Finds the first `balance_<digits>dp` occurrence and returns its digit run.
fn find_decimal_points(params: &str) -> Option<&str> {
    params.match_indices(PREFIX).find_map(|(start, _)| {
        let rest = &params[start + PREFIX.len()..];
        let len = rest.bytes().take_while(u8::is_ascii_digit).count();
        (len > 0 && rest[len..].starts_with(DECIMAL_POINTS_SUFFIX)).then(|| &rest[..len])
    })
}

/// Errors that can occur while parsing a directive.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DirectiveError {
    #[error("Unrecognized directive")]
    Unrecognized,
    #[error("{0} is not a valid number")]
    InvalidNumber(String),
}
