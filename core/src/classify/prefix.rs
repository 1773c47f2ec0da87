//! Prefix conventions for uniform names
//!
//! The first letter of a declared uniform name says how the parameter behaves.
//! The letter must be followed by `_` or an uppercase letter (`p_density`,
//! `pDensity`); `position` has no prefix.

/// Naming scope of a parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scope {
    /// The declared name is the registry key
    #[default]
    Shared,
    /// The registry key is namespaced by the consumer
    Unique,
}

/// Behaviour attached to a name prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrefixPolicy {
    /// Written to and read from the persistence tree
    pub persistent: bool,
    /// Shown in the debug inspector
    pub debug_visible: bool,
    pub scope: Scope,
    /// Written by the host every tick (time and friends)
    pub engine_fed: bool,
}

impl PrefixPolicy {
    /// Policy for names without a recognized prefix
    pub const PLAIN: PrefixPolicy = PrefixPolicy {
        persistent: false,
        debug_visible: false,
        scope: Scope::Shared,
        engine_fed: false,
    };
}

/// Prefix letter -> policy
pub const PREFIX_POLICIES: &[(char, PrefixPolicy)] = &[
    (
        'p',
        PrefixPolicy {
            persistent: true,
            debug_visible: true,
            scope: Scope::Shared,
            engine_fed: false,
        },
    ),
    (
        'u',
        PrefixPolicy {
            persistent: false,
            debug_visible: false,
            scope: Scope::Unique,
            engine_fed: false,
        },
    ),
    (
        'e',
        PrefixPolicy {
            persistent: false,
            debug_visible: false,
            scope: Scope::Shared,
            engine_fed: true,
        },
    ),
];

/// Look up the policy for a prefix letter
pub fn policy_for(prefix: char) -> Option<PrefixPolicy> {
    PREFIX_POLICIES
        .iter()
        .find(|(letter, _)| *letter == prefix)
        .map(|(_, policy)| *policy)
}

/// Split an identifier into its recognized prefix letter and bare name.
///
/// Identifiers without a recognized prefix come back whole.
pub fn split_prefix(identifier: &str) -> (Option<char>, &str) {
    let mut chars = identifier.chars();
    let (Some(first), Some(second)) = (chars.next(), chars.next()) else {
        return (None, identifier);
    };
    if policy_for(first).is_none() {
        return (None, identifier);
    }

    let rest = &identifier[first.len_utf8()..];
    let bare = match second {
        '_' => &rest[1..],
        c if c.is_ascii_uppercase() => rest,
        _ => return (None, identifier),
    };

    if bare.is_empty() {
        (None, identifier)
    } else {
        (Some(first), bare)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_has_unique_letters() {
        for (i, (a, _)) in PREFIX_POLICIES.iter().enumerate() {
            for (b, _) in &PREFIX_POLICIES[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_split_prefix() {
        assert_eq!(split_prefix("p_density"), (Some('p'), "density"));
        assert_eq!(split_prefix("pDensity"), (Some('p'), "Density"));
        assert_eq!(split_prefix("u_noise"), (Some('u'), "noise"));
        assert_eq!(split_prefix("eTime"), (Some('e'), "Time"));
        assert_eq!(split_prefix("position"), (None, "position"));
        assert_eq!(split_prefix("modelMatrix"), (None, "modelMatrix"));
        assert_eq!(split_prefix("p_"), (None, "p_"));
        assert_eq!(split_prefix("p"), (None, "p"));
        assert_eq!(split_prefix(""), (None, ""));
    }

    #[test]
    fn test_policies() {
        let p = policy_for('p').unwrap();
        assert!(p.persistent && p.debug_visible);
        assert_eq!(p.scope, Scope::Shared);

        let u = policy_for('u').unwrap();
        assert!(!u.persistent && !u.debug_visible);
        assert_eq!(u.scope, Scope::Unique);

        assert!(policy_for('e').unwrap().engine_fed);
        assert_eq!(policy_for('x'), None);
    }
}
