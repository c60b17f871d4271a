//! Resolution of the local cluster member.
//!
//! The collector connects to a single host, but member- and table-scoped statistics are keyed
//! by member id. This module matches the configured host against the canonical addresses each
//! member advertises in `server_status` to find the member this collector is attached to.

use crate::stats::{
    MemberId,
    ServerStatus,
};

/// Find the member whose canonical addresses contain an exact match for `configured_host`.
///
/// First match in input order wins; duplicate or ambiguous topology entries are not an error.
/// Returns `None` when no candidate matches, in which case member- and table-scoped
/// collection has to be skipped for this cycle.
///
/// The identity is recomputed every cycle rather than cached, because topology may change
/// between cycles.
pub fn resolve_local_member(candidates: &[ServerStatus], configured_host: &str) -> Option<MemberId> {
    for status in candidates {
        for address in &status.network.canonical_addresses {
            if address.host == configured_host {
                return Some(status.id.clone());
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::{
        CanonicalAddress,
        Network,
    };
    use pretty_assertions::assert_eq;

    fn member(id: &str, hosts: &[&str]) -> ServerStatus {
        ServerStatus {
            id: MemberId(id.to_string()),
            name: format!("server_{id}"),
            network: Network {
                canonical_addresses: hosts
                    .iter()
                    .map(|host| CanonicalAddress {
                        host: host.to_string(),
                        port: 29015,
                    })
                    .collect(),
            },
        }
    }

    #[test]
    fn matches_configured_host_against_any_address() {
        let candidates = vec![member("m1", &["10.0.0.1"]), member("m2", &["10.0.0.2", "localhost"])];
        assert_eq!(
            resolve_local_member(&candidates, "localhost"),
            Some(MemberId("m2".to_string()))
        );
    }

    #[test]
    fn first_match_wins_on_duplicate_topology() {
        let candidates = vec![
            member("m1", &["10.0.0.1"]),
            member("m2", &["localhost"]),
            member("m3", &["localhost"]),
        ];
        assert_eq!(
            resolve_local_member(&candidates, "localhost"),
            Some(MemberId("m2".to_string()))
        );
    }

    #[test]
    fn no_match_resolves_to_none() {
        let candidates = vec![member("m1", &["10.0.0.1"]), member("m2", &["10.0.0.2"])];
        assert_eq!(resolve_local_member(&candidates, "localhost"), None);
    }

    #[test]
    fn empty_topology_resolves_to_none() {
        assert_eq!(resolve_local_member(&[], "localhost"), None);
    }

    #[test]
    fn match_is_exact_not_substring() {
        let candidates = vec![member("m1", &["localhost.localdomain"])];
        assert_eq!(resolve_local_member(&candidates, "localhost"), None);
    }
}
