use indexmap::IndexMap;
use serde::Serialize;

use idcard_core::{CardError, CardResult, DomainCode};

/// Built-in organizational domains loaded at start.
///
/// Names are kept exactly as issued on existing cards, spelling included.
pub const DEFAULT_DOMAINS: &[(&str, u32)] = &[
    ("Consultant", 2),
    ("Data Analyst", 6),
    ("Project Manager", 5),
    ("Business Analysits", 7),
    ("Developers", 4),
    ("Sales", 3),
    ("Human Resources", 1),
    ("Digital Marketing", 9),
    ("Cyber Security", 8),
    ("Process Associates", 10),
    ("Security Anlayst", 11),
    ("SAP Consultant", 12),
    ("Data Scientist", 24),
    ("R&D", 15),
    ("Trainers", 13),
    ("UI/UX", 14),
    ("Administrative Manager", 16),
    ("Ai Automator", 17),
    ("CFO", 18),
    ("CMO", 19),
    ("CTO", 20),
    ("Devops Engineer", 21),
    ("Director", 22),
    ("Graphical Designer", 23),
];

/// Name → code table of organizational domains.
///
/// Both names and codes are unique. Entries are only ever added; iteration
/// follows insertion order. Serializes as a JSON object `{name: code}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DomainRegistry {
    entries: IndexMap<String, DomainCode>,
}

impl DomainRegistry {
    /// An empty registry (no defaults).
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding [`DEFAULT_DOMAINS`].
    ///
    /// Defaults go through the same checks as operator additions.
    pub fn seeded() -> CardResult<Self> {
        let mut registry = Self::new();
        for (name, code) in DEFAULT_DOMAINS {
            registry.add_domain(name, i64::from(*code))?;
        }
        Ok(registry)
    }

    /// Register a new domain.
    ///
    /// Checks run in order: name, code, code uniqueness, name uniqueness. The
    /// trimmed name is stored. On error the registry is unchanged.
    pub fn add_domain(&mut self, name: &str, code: i64) -> CardResult<DomainCode> {
        self.insert(name, DomainCode::new(code))
    }

    /// Like [`DomainRegistry::add_domain`], for a code typed in as text.
    pub fn add_domain_raw(&mut self, name: &str, raw_code: &str) -> CardResult<DomainCode> {
        self.insert(name, raw_code.parse())
    }

    fn insert(&mut self, name: &str, code: CardResult<DomainCode>) -> CardResult<DomainCode> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CardError::InvalidName);
        }
        let code = code?;

        if let Some((existing, _)) = self.entries.iter().find(|(_, c)| **c == code) {
            return Err(CardError::DuplicateCode {
                code,
                existing: existing.clone(),
            });
        }
        if self.entries.contains_key(name) {
            return Err(CardError::DuplicateName(name.to_string()));
        }

        self.entries.insert(name.to_string(), code);
        Ok(code)
    }

    pub fn lookup_code(&self, name: &str) -> CardResult<DomainCode> {
        self.entries.get(name).copied().ok_or(CardError::NotFound)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// All (name, code) pairs in insertion order.
    pub fn all_entries(&self) -> impl Iterator<Item = (&str, DomainCode)> + '_ {
        self.entries.iter().map(|(name, code)| (name.as_str(), *code))
    }

    /// Entries whose name contains `query` (case-insensitive) or whose code
    /// contains it as digits, sorted by name. An empty query matches everything.
    pub fn find(&self, query: &str) -> Vec<(&str, DomainCode)> {
        let needle = query.trim().to_lowercase();
        let mut found: Vec<(&str, DomainCode)> = self
            .all_entries()
            .filter(|(name, code)| {
                needle.is_empty()
                    || name.to_lowercase().contains(&needle)
                    || code.to_string().contains(&needle)
            })
            .collect();
        found.sort_by(|(a, _), (b, _)| {
            a.to_lowercase()
                .cmp(&b.to_lowercase())
                .then_with(|| a.cmp(b))
        });
        found
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
