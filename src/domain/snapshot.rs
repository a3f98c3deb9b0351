//! Read-only row projection and change-detection fingerprints

use serde::Serialize;

use crate::domain::item::NodeId;

/// Externalizable view of one node, as consumed by a list renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeSnapshot<'a, T> {
    pub id: &'a NodeId,
    pub expanded: bool,
    pub depth: usize,
    pub checked: bool,
    pub indeterminate: bool,
    pub has_children: bool,
    /// Fingerprint of `(id, checked, indeterminate, expanded)`
    pub key: String,
    pub data: &'a T,
}

/// Encode a row's visual state as a lowercase hex token.
///
/// The token is the hex form of `"{id}_{checked}_{indeterminate}_{expanded}"`,
/// so it decodes back to the tuple and distinct tuples never share a token.
/// The id is followed by exactly three boolean fields, which keeps the
/// encoding unambiguous even when ids contain `_`.
pub fn fingerprint(id: &NodeId, checked: bool, indeterminate: bool, expanded: bool) -> String {
    hex::encode(format!("{id}_{checked}_{indeterminate}_{expanded}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_same_state_when_fingerprinting_then_token_is_stable() {
        let id = NodeId::from("1");
        assert_eq!(
            fingerprint(&id, true, false, false),
            fingerprint(&id, true, false, false)
        );
        assert_eq!(fingerprint(&id, true, false, false), hex::encode("1_true_false_false"));
    }

    #[test]
    fn given_any_flag_change_when_fingerprinting_then_token_differs() {
        let id = NodeId::from("1");
        let base = fingerprint(&id, false, false, false);
        assert_ne!(base, fingerprint(&id, true, false, false));
        assert_ne!(base, fingerprint(&id, false, true, false));
        assert_ne!(base, fingerprint(&id, false, false, true));
        assert_ne!(base, fingerprint(&NodeId::from("2"), false, false, false));
    }

    #[test]
    fn given_id_containing_separator_when_fingerprinting_then_token_decodes_back() {
        // Ids containing the separator still map to distinct tokens
        let a = fingerprint(&NodeId::from("a_true"), false, false, false);
        let b = fingerprint(&NodeId::from("a"), true, false, false);
        assert_ne!(a, b);

        let decoded = String::from_utf8(hex::decode(&a).unwrap()).unwrap();
        assert_eq!(decoded, "a_true_false_false_false");
    }
}
