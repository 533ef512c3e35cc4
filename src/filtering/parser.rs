use std::fmt;

/// Comparison operator accepted at the front of a numeric filter string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Lte,
    Gte,
    Lt,
    Gt,
    Eq,
}

impl CompareOp {
    /// Evaluate `lhs <op> rhs`
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn holds(self, lhs: f64, rhs: f64) -> bool {
        match self {
            Self::Lte => lhs <= rhs,
            Self::Gte => lhs >= rhs,
            Self::Lt => lhs < rhs,
            Self::Gt => lhs > rhs,
            Self::Eq => lhs == rhs,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lte => "<=",
            Self::Gte => ">=",
            Self::Lt => "<",
            Self::Gt => ">",
            Self::Eq => "=",
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed numeric filter such as `<=400` or `4.5`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericFilter {
    pub op: CompareOp,
    pub value: f64,
}

impl NumericFilter {
    #[must_use]
    pub const fn new(op: CompareOp, value: f64) -> Self {
        Self { op, value }
    }

    /// Whether a present field value satisfies this filter
    #[must_use]
    pub fn matches(&self, field_value: f64) -> bool {
        self.op.holds(field_value, self.value)
    }
}

/// Two-character operators come first so `<=` never parses as `<`
const OPERATOR_PREFIXES: [(&str, CompareOp); 5] = [
    ("<=", CompareOp::Lte),
    (">=", CompareOp::Gte),
    ("<", CompareOp::Lt),
    (">", CompareOp::Gt),
    ("=", CompareOp::Eq),
];

/// Split an optional operator prefix off the filter string; none means `=`
fn split_operator(input: &str) -> (CompareOp, &str) {
    OPERATOR_PREFIXES
        .iter()
        .find_map(|&(prefix, op)| input.strip_prefix(prefix).map(|rest| (op, rest)))
        .unwrap_or((CompareOp::Eq, input))
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Operand grammar: `-?digits(.digits)?`
fn is_valid_operand(operand: &str) -> bool {
    let unsigned = operand.strip_prefix('-').unwrap_or(operand);
    match unsigned.split_once('.') {
        Some((whole, fraction)) => is_digits(whole) && is_digits(fraction),
        None => is_digits(unsigned),
    }
}

/// Parse a filter string like `<=400`, `>=4.5`, `=100` or a bare number.
///
/// Returns `None` when the trimmed input does not match the grammar, in which
/// case the caller skips the constraint instead of failing the request.
/// Operands too large for `f64` become infinite and still apply.
#[must_use]
pub fn parse_numeric_filter(input: &str) -> Option<NumericFilter> {
    let (op, operand) = split_operator(input.trim());
    if !is_valid_operand(operand) {
        return None;
    }
    operand
        .parse::<f64>()
        .ok()
        .map(|value| NumericFilter::new(op, value))
}
