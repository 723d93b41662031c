use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// The role a [`Variable`] plays in the reasoner.
///
/// `rank()` fixes the total order every downstream normal form assumes:
/// program variables sort before template variables, which sort before every
/// auxiliary kind, in Farkas/Handelman/Putinar introduction order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariableKind {
    /// Occurs in hypotheses/goal; universally quantified.
    Program,
    /// Occurs inside coefficients; existentially quantified, the synthesis target.
    Template,
    /// Minted by the Farkas generator (the `y_i` multipliers).
    AuxFarkas,
    /// Minted by the Handelman generator (one per monoid product).
    AuxHandelman,
    /// Minted by a Putinar SOS template (`L` matrix entries and replaced monomial coefficients).
    AuxPutinarSos,
    /// Minted by a Putinar SAT/UNSAT witness (`h_i`, `y_0`, `y_0^i` multipliers).
    AuxPutinarEta,
    /// Minted by the Putinar strict-UNSAT branch (`w` program-level auxiliaries and `eta` templates).
    AuxStrictWitness,
}

impl VariableKind {
    fn rank(self) -> u8 {
        match self {
            VariableKind::Program => 0,
            VariableKind::Template => 1,
            VariableKind::AuxFarkas => 2,
            VariableKind::AuxHandelman => 3,
            VariableKind::AuxPutinarSos => 4,
            VariableKind::AuxPutinarEta => 5,
            VariableKind::AuxStrictWitness => 6,
        }
    }

    /// `true` for every kind minted by a witness generator rather than supplied
    /// by the caller (i.e. everything except [`VariableKind::Program`] and
    /// [`VariableKind::Template`]).
    pub fn is_auxiliary(self) -> bool {
        !matches!(self, VariableKind::Program | VariableKind::Template)
    }
}

/// An immutable (name, kind) pair. Cheap to clone: the name is shared via
/// [`Rc<str>`] rather than duplicated on every copy, since the same variable
/// is referenced from many terms/monomials.
#[derive(Debug, Clone, Eq)]
pub struct Variable {
    name: Rc<str>,
    kind: VariableKind,
}

impl Variable {
    fn new(name: impl Into<Rc<str>>, kind: VariableKind) -> Self {
        Variable {
            name: name.into(),
            kind,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> VariableKind {
        self.kind
    }
}

impl PartialEq for Variable {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.name == other.name
    }
}

impl std::hash::Hash for Variable {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.kind.hash(state);
        self.name.hash(state);
    }
}

impl PartialOrd for Variable {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Variable {
    fn cmp(&self, other: &Self) -> Ordering {
        self.kind
            .rank()
            .cmp(&other.kind.rank())
            .then_with(|| self.name.cmp(&other.name))
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Interns program/template variables by (name, kind) and mints fresh,
/// uniquely-named auxiliary variables for the witness generators.
///
/// One `VariableTable` is owned per reasoning run (by `PositiveModel` in
/// `polyhorn-model`); it is never shared across runs, so counters always
/// start from zero and generated names are reproducible.
#[derive(Debug, Default)]
pub struct VariableTable {
    interned: HashMap<(Rc<str>, VariableKindKey), Variable>,
    counters: HashMap<VariableKindKey, u64>,
}

/// `VariableKind` is not itself hashable as a map key alongside an `Rc<str>`
/// tuple without an extra derive; this newtype keeps the table's internals
/// simple without adding a dependency on a `u8`-keyed map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct VariableKindKey(u8);

impl From<VariableKind> for VariableKindKey {
    fn from(k: VariableKind) -> Self {
        VariableKindKey(k.rank())
    }
}

impl VariableTable {
    pub fn new() -> Self {
        VariableTable::default()
    }

    /// Intern a variable supplied by the caller (program or template name).
    pub fn intern(&mut self, name: &str, kind: VariableKind) -> Variable {
        let key = (Rc::<str>::from(name), VariableKindKey::from(kind));
        if let Some(v) = self.interned.get(&key) {
            return v.clone();
        }
        let var = Variable::new(name, kind);
        self.interned.insert(key, var.clone());
        var
    }

    /// Mint a fresh auxiliary variable of the given kind, unique within this
    /// table: `prefix0`, `prefix1`, `prefix2`, ... per kind.
    pub fn fresh(&mut self, kind: VariableKind, prefix: &str) -> Variable {
        let key = VariableKindKey::from(kind);
        let counter = self.counters.entry(key).or_insert(0);
        let name = format!("{prefix}{counter}");
        *counter += 1;
        self.intern(&name, kind)
    }
}
