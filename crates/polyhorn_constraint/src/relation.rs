/// The sign relating a constraint's body to zero.
///
/// Constructors normalize away `<` and `≤`: a `Relation::Lt`/`Relation::Le`
/// request is folded into `Gt`/`Ge` by negating the body at construction
/// time, so a [`crate::PolyConstraint`] or [`crate::CoeffConstraint`] only
/// ever stores one of the four canonical variants below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    Gt,
    Ge,
    Eq,
    Ne,
}

/// The relation requested by a caller before `<`/`≤` normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RawRelation {
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
}

impl RawRelation {
    /// Normalizes `<` to `>` and `≤` to `≥`, reporting whether the body must
    /// be negated to match (`true` for `Lt`/`Le`).
    pub fn normalize(self) -> (Relation, bool) {
        match self {
            RawRelation::Lt => (Relation::Gt, true),
            RawRelation::Le => (Relation::Ge, true),
            RawRelation::Gt => (Relation::Gt, false),
            RawRelation::Ge => (Relation::Ge, false),
            RawRelation::Eq => (Relation::Eq, false),
            RawRelation::Ne => (Relation::Ne, false),
        }
    }
}

impl Relation {
    /// Negation flips `>↔≥` (the body must also be negated by the caller)
    /// and `=↔≠` (the body is unchanged).
    pub fn negate(self) -> (Relation, bool) {
        match self {
            Relation::Gt => (Relation::Ge, true),
            Relation::Ge => (Relation::Gt, true),
            Relation::Eq => (Relation::Ne, false),
            Relation::Ne => (Relation::Eq, false),
        }
    }

    pub fn as_smt_op(self) -> &'static str {
        match self {
            Relation::Gt => ">",
            Relation::Ge => ">=",
            Relation::Eq => "=",
            Relation::Ne => "distinct",
        }
    }

    pub fn is_strict(self) -> bool {
        matches!(self, Relation::Gt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lt_normalizes_to_gt_with_negation() {
        let (rel, negate) = RawRelation::Lt.normalize();
        assert_eq!(rel, Relation::Gt);
        assert!(negate);
    }

    #[test]
    fn le_normalizes_to_ge_with_negation() {
        let (rel, negate) = RawRelation::Le.normalize();
        assert_eq!(rel, Relation::Ge);
        assert!(negate);
    }

    #[test]
    fn negation_flips_strict_and_nonstrict() {
        assert_eq!(Relation::Gt.negate(), (Relation::Ge, true));
        assert_eq!(Relation::Ge.negate(), (Relation::Gt, true));
    }

    #[test]
    fn negation_flips_eq_and_ne_without_negating_body() {
        assert_eq!(Relation::Eq.negate(), (Relation::Ne, false));
        assert_eq!(Relation::Ne.negate(), (Relation::Eq, false));
    }

    #[test]
    fn double_negation_is_identity() {
        for rel in [Relation::Gt, Relation::Ge, Relation::Eq, Relation::Ne] {
            let (once, _) = rel.negate();
            let (twice, _) = once.negate();
            assert_eq!(twice, rel);
        }
    }
}
