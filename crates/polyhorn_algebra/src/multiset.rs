use std::cmp::Ordering;
use std::collections::BTreeMap;

use polyhorn_base::Variable;

/// A multiset of (template or auxiliary) variables, interpreted as a product.
///
/// Mirrors the `BTreeMap<var, power>` representation used for `Monomial` in
/// an ordinary polynomial ring, except the "variables" here are the
/// template/auxiliary unknowns that occur inside a [`crate::CoeffExpr`]
/// coefficient, not the program variables a [`crate::Polynomial`] is indexed
/// by.
///
/// Canonical order is `(size, lexicographic on the expanded sorted sequence)`,
/// matching the order used to sort [`crate::CoeffExpr`] terms.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Multiset {
    powers: BTreeMap<Variable, u32>,
}

impl Multiset {
    pub fn empty() -> Self {
        Multiset::default()
    }

    pub fn single(var: Variable) -> Self {
        let mut powers = BTreeMap::new();
        powers.insert(var, 1);
        Multiset { powers }
    }

    pub fn is_empty(&self) -> bool {
        self.powers.is_empty()
    }

    /// Total number of variable occurrences (sum of exponents), i.e. `|e|` for
    /// the analogous monomial.
    pub fn size(&self) -> u32 {
        self.powers.values().sum()
    }

    /// Number of distinct variables.
    pub fn distinct_count(&self) -> usize {
        self.powers.len()
    }

    /// Power of `var` in this multiset (0 if absent).
    pub fn power_of(&self, var: &Variable) -> u32 {
        self.powers.get(var).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Variable, u32)> {
        self.powers.iter().map(|(v, &p)| (v, p))
    }

    /// Union of the two multisets (exponents add), the representation used
    /// by `CoeffExpr` multiplication to combine two terms' variable products.
    pub fn merge(&self, other: &Multiset) -> Multiset {
        let mut powers = self.powers.clone();
        for (v, p) in &other.powers {
            *powers.entry(v.clone()).or_insert(0) += p;
        }
        Multiset { powers }
    }

    /// This multiset with `var` removed entirely, used by equality
    /// elimination when substituting `var ↦ constant` out of every term.
    pub fn without(&self, var: &Variable) -> Multiset {
        let mut powers = self.powers.clone();
        powers.remove(var);
        Multiset { powers }
    }

    /// The expanded, sorted sequence of variables this multiset denotes
    /// (e.g. `{a: 2, b: 1}` expands to `[a, a, b]`), used both for the
    /// canonical `Ord` below and for SMT-LIB2 printing.
    pub fn expand_sorted(&self) -> Vec<Variable> {
        let mut out = Vec::with_capacity(self.size() as usize);
        for (v, p) in &self.powers {
            for _ in 0..*p {
                out.push(v.clone());
            }
        }
        out
    }
}

impl PartialOrd for Multiset {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Multiset {
    fn cmp(&self, other: &Self) -> Ordering {
        self.size()
            .cmp(&other.size())
            .then_with(|| self.expand_sorted().cmp(&other.expand_sorted()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polyhorn_base::{VariableKind, VariableTable};

    #[test]
    fn merge_adds_exponents() {
        let mut t = VariableTable::new();
        let a = t.intern("a", VariableKind::Template);
        let ma = Multiset::single(a.clone());
        let merged = ma.merge(&ma);
        assert_eq!(merged.power_of(&a), 2);
        assert_eq!(merged.size(), 2);
    }

    #[test]
    fn ordering_prefers_smaller_size_first() {
        let mut t = VariableTable::new();
        let a = t.intern("a", VariableKind::Template);
        let b = t.intern("b", VariableKind::Template);
        let single = Multiset::single(a.clone());
        let double = Multiset::single(a).merge(&Multiset::single(b));
        assert!(single < double);
    }

    #[test]
    fn without_removes_variable_entirely() {
        let mut t = VariableTable::new();
        let a = t.intern("a", VariableKind::Template);
        let b = t.intern("b", VariableKind::Template);
        let ab = Multiset::single(a.clone()).merge(&Multiset::single(b.clone()));
        let just_b = ab.without(&a);
        assert_eq!(just_b.power_of(&a), 0);
        assert_eq!(just_b.power_of(&b), 1);
    }
}
