use alloc::sync::Arc;

/// A per-index extent function. Must be pure for the lifetime of one index build.
pub type ExtentFn = Arc<dyn Fn(usize) -> f64 + Send + Sync>;

/// A host callback receiving [`ExtentDiagnostic`]s.
pub type DiagnosticCallback = Arc<dyn Fn(ExtentDiagnostic) + Send + Sync>;

/// Where item extents come from.
///
/// `Fixed` selects the O(1) uniform layout; `Variable` builds a cumulative offset table.
#[derive(Clone)]
pub enum ExtentSource {
    Fixed(f64),
    Variable(ExtentFn),
}

impl ExtentSource {
    pub fn fixed(extent: f64) -> Self {
        Self::Fixed(extent)
    }

    pub fn variable(f: impl Fn(usize) -> f64 + Send + Sync + 'static) -> Self {
        Self::Variable(Arc::new(f))
    }

    /// A variable source backed by a table of extents. Indexes past the table have extent `0`.
    pub fn from_extents(extents: impl Into<Arc<[f64]>>) -> Self {
        let extents: Arc<[f64]> = extents.into();
        Self::variable(move |i| extents.get(i).copied().unwrap_or(0.0))
    }

    pub fn is_fixed(&self) -> bool {
        matches!(self, Self::Fixed(_))
    }

    /// Returns `true` when both sources are known to produce the same extents.
    ///
    /// Closures are compared by identity (`Arc::ptr_eq`): swapping in a new closure is how a host
    /// signals that extents changed.
    pub fn same_source(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Fixed(a), Self::Fixed(b)) => a.to_bits() == b.to_bits(),
            (Self::Variable(a), Self::Variable(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    pub(crate) fn raw(&self, index: usize) -> f64 {
        match self {
            Self::Fixed(v) => *v,
            Self::Variable(f) => f(index),
        }
    }
}

impl From<f64> for ExtentSource {
    fn from(extent: f64) -> Self {
        Self::Fixed(extent)
    }
}

impl core::fmt::Debug for ExtentSource {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Fixed(v) => f.debug_tuple("Fixed").field(v).finish(),
            Self::Variable(_) => f.write_str("Variable(..)"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExtentIssue {
    Negative,
    NonFinite,
}

/// Reported when a host-supplied extent had to be clamped to zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExtentDiagnostic {
    /// The offending index, or `None` for a [`ExtentSource::Fixed`] extent.
    pub index: Option<usize>,
    pub value: f64,
    pub issue: ExtentIssue,
}

/// Clamps an extent to a finite, non-negative value, reporting anything that was clamped.
pub(crate) fn sanitize_extent(
    value: f64,
    index: Option<usize>,
    on_diagnostic: Option<&DiagnosticCallback>,
) -> f64 {
    let issue = if !value.is_finite() {
        ExtentIssue::NonFinite
    } else if value < 0.0 {
        ExtentIssue::Negative
    } else {
        return value;
    };
    vwarn!(index, value, ?issue, "invalid extent clamped to zero");
    if let Some(cb) = on_diagnostic {
        cb(ExtentDiagnostic {
            index,
            value,
            issue,
        });
    }
    0.0
}
