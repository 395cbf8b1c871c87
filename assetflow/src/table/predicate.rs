//! Declarative predicates over a context snapshot.

use crate::context::{CompilerMode, ContextSnapshot, Feature, LayoutRegion, PageTemplate};
use std::fmt;

/// Signature of a custom predicate.
pub type PredicateFn = fn(&ContextSnapshot) -> bool;

/// A named predicate implemented in code, for conditions the declarative
/// variants cannot express.
#[derive(Clone, Copy)]
pub struct CustomPredicate {
    /// Name shown in logs.
    pub name: &'static str,
    /// The check.
    pub check: PredicateFn,
}

impl PartialEq for CustomPredicate {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl fmt::Debug for CustomPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Custom({})", self.name)
    }
}

/// A condition evaluated once per request.
///
/// Predicates never fail: anything the snapshot does not know about (a
/// missing option, an unknown integration) evaluates to `false` for the
/// positive forms.
///
/// Custom predicates compare equal by name.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Always true.
    Always,
    /// The integration is active.
    Feature(Feature),
    /// Any of the integrations is active.
    AnyFeature(Vec<Feature>),
    /// The option is set and truthy.
    OptionTruthy(String),
    /// The option's string form equals the value.
    OptionEquals(String, String),
    /// The option's string form differs from the value; true when absent.
    OptionNotEquals(String, String),
    /// A builder or preview frame is active.
    Builder,
    /// A singular page is rendered.
    Singular,
    /// The page uses the template.
    Template(PageTemplate),
    /// The layout region is replaced by the template builder.
    Override(LayoutRegion),
    /// Right-to-left language.
    Rtl,
    /// The admin bar is shown.
    AdminBar,
    /// The dynamic CSS compiler runs in the given mode.
    Compiler(CompilerMode),
    /// The multilingual plugin offers at least one language.
    HasLanguages,
    /// Singular page with threaded comments enabled and comments open.
    CommentsThreaded,
    /// The legacy header is rendered on this page.
    DisplaysHeader,
    /// Condition implemented in code.
    Custom(CustomPredicate),
    /// Negation.
    Not(Box<Predicate>),
    /// Conjunction; true when empty.
    All(Vec<Predicate>),
    /// Disjunction; false when empty.
    Any(Vec<Predicate>),
}

impl Predicate {
    /// The integration is active.
    #[must_use]
    pub const fn feature(feature: Feature) -> Self {
        Self::Feature(feature)
    }

    /// The option is truthy.
    #[must_use]
    pub fn option(key: impl Into<String>) -> Self {
        Self::OptionTruthy(key.into())
    }

    /// The option equals the value.
    #[must_use]
    pub fn option_eq(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::OptionEquals(key.into(), value.into())
    }

    /// The option does not equal the value. Absent options never equal
    /// anything, so this is true for them.
    #[must_use]
    pub fn option_ne(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::OptionNotEquals(key.into(), value.into())
    }

    /// The region is overridden.
    #[must_use]
    pub const fn overridden(region: LayoutRegion) -> Self {
        Self::Override(region)
    }

    /// A custom predicate.
    #[must_use]
    pub const fn custom(name: &'static str, check: PredicateFn) -> Self {
        Self::Custom(CustomPredicate { name, check })
    }

    /// Both predicates hold.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        match self {
            Self::All(mut all) => {
                all.push(other);
                Self::All(all)
            }
            first => Self::All(vec![first, other]),
        }
    }

    /// Either predicate holds.
    #[must_use]
    pub fn or(self, other: Self) -> Self {
        match self {
            Self::Any(mut any) => {
                any.push(other);
                Self::Any(any)
            }
            first => Self::Any(vec![first, other]),
        }
    }

    /// The predicate holds or a builder frame is active. Builder frames load
    /// every optional asset so that toggled options preview live.
    #[must_use]
    pub fn or_builder(self) -> Self {
        self.or(Self::Builder)
    }

    /// The top-level conjuncts, nested conjunctions flattened and `Always`
    /// dropped.
    #[must_use]
    pub fn conjuncts(&self) -> Vec<&Self> {
        match self {
            Self::Always => Vec::new(),
            Self::All(all) => all.iter().flat_map(Self::conjuncts).collect(),
            other => vec![other],
        }
    }

    /// Whether `self` holding guarantees that `other` holds.
    ///
    /// The check is syntactic and conservative: every conjunct of `other`
    /// must be a conjunct of `self`, or a disjunction one of whose members
    /// is. A `false` answer does not prove the opposite.
    #[must_use]
    pub fn implies(&self, other: &Self) -> bool {
        let have = self.conjuncts();
        other.conjuncts().into_iter().all(|needed| {
            have.contains(&needed)
                || matches!(needed, Self::Any(any) if any.iter().any(|p| {
                    *p == Self::Always || have.contains(&p)
                }))
        })
    }

    /// Evaluates the predicate.
    #[must_use]
    pub fn evaluate(&self, ctx: &ContextSnapshot) -> bool {
        match self {
            Self::Always => true,
            Self::Feature(feature) => ctx.has(*feature),
            Self::AnyFeature(features) => features.iter().any(|f| ctx.has(*f)),
            Self::OptionTruthy(key) => ctx.options.is_truthy(key),
            Self::OptionEquals(key, value) => ctx.options.equals(key, value),
            Self::OptionNotEquals(key, value) => !ctx.options.equals(key, value),
            Self::Builder => ctx.is_builder(),
            Self::Singular => ctx.page.is_singular(),
            Self::Template(template) => ctx.page.uses_template(template),
            Self::Override(region) => ctx.is_overridden(*region),
            Self::Rtl => ctx.is_rtl,
            Self::AdminBar => ctx.admin_bar_showing,
            Self::Compiler(mode) => ctx.compiler_mode == *mode,
            Self::HasLanguages => !ctx.languages.is_empty(),
            Self::CommentsThreaded => {
                ctx.page.is_singular() && ctx.thread_comments && ctx.page.comments_open
            }
            Self::DisplaysHeader => ctx.page.displays_header(),
            Self::Custom(custom) => (custom.check)(ctx),
            Self::Not(inner) => !inner.evaluate(ctx),
            Self::All(all) => all.iter().all(|p| p.evaluate(ctx)),
            Self::Any(any) => any.iter().any(|p| p.evaluate(ctx)),
        }
    }
}

impl std::ops::Not for Predicate {
    type Output = Self;

    fn not(self) -> Self::Output {
        match self {
            Self::Not(inner) => *inner,
            other => Self::Not(Box::new(other)),
        }
    }
}
